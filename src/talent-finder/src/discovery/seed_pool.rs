//! Bounded, login-keyed set of discovered owners.

use super::owner::{DiscoveryPath, Owner};
use crate::api::Repo;
use std::collections::HashMap;

/// Result of offering a repo to the pool for a login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// A new owner was added.
    New,
    /// The repo was folded into an existing owner.
    Merged,
    /// The owner already counted this repo.
    Duplicate,
    /// The login is new but the pool is closed to it.
    Rejected,
}

/// Seed pool of owners in discovery order.
///
/// Logins are matched case-insensitively and the pool never holds more
/// than its capacity.
#[derive(Debug, Clone)]
pub struct SeedPool {
    owners: Vec<Owner>,
    index: HashMap<String, usize>,
    capacity: usize,
}

impl SeedPool {
    /// Creates an empty pool holding at most `capacity` owners.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            owners: Vec::new(),
            index: HashMap::new(),
            capacity,
        }
    }

    /// Records `repo` for `login`, admitting a new owner if there is room.
    pub fn record(&mut self, login: &str, repo: &Repo, path: DiscoveryPath) -> Admission {
        if let Some(admission) = self.merge(login, repo) {
            return admission;
        }
        if self.is_full() {
            return Admission::Rejected;
        }

        let order = self.owners.len();
        self.index.insert(login.to_lowercase(), order);
        self.owners.push(Owner::new(login, repo, path, order));
        Admission::New
    }

    /// Records `repo` for `login` only if the owner is already pooled.
    pub fn record_existing(&mut self, login: &str, repo: &Repo) -> Admission {
        self.merge(login, repo).unwrap_or(Admission::Rejected)
    }

    fn merge(&mut self, login: &str, repo: &Repo) -> Option<Admission> {
        let position = *self.index.get(&login.to_lowercase())?;
        let owner = &mut self.owners[position];
        Some(if owner.absorb(repo) {
            Admission::Merged
        } else {
            Admission::Duplicate
        })
    }

    /// Returns true once the pool holds `capacity` owners.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.owners.len() >= self.capacity
    }

    /// Maximum number of owners.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of owners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Returns true if no owner has been admitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Looks up an owner by login, ignoring case.
    #[must_use]
    pub fn get(&self, login: &str) -> Option<&Owner> {
        self.index
            .get(&login.to_lowercase())
            .map(|&position| &self.owners[position])
    }

    /// Owners in discovery order.
    #[must_use]
    pub fn owners(&self) -> &[Owner] {
        &self.owners
    }

    /// Iterates owners in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Owner> {
        self.owners.iter()
    }
}
