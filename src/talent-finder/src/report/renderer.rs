//! Report renderer.

use super::ReportError;
use handlebars::{no_escape, Handlebars};
use serde_json::Value;

/// Text report listing every ranked candidate.
pub const REPORT_TEMPLATE: &str = "\
Top candidates (GitHub-only, heuristic v0.1)
Requirements inferred:
  Languages: {{requirements.languages}}
  Frameworks: {{requirements.frameworks}}
  Keywords: {{requirements.keywords}}

{{#each candidates}}
{{rank}}. {{name}} - score {{score}}
   GitHub: {{html_url}}
   Total stars (matched repos): {{total_stars}}
   Notable repo: {{notable_repo.full_name}} ({{notable_repo.stars}} stars) {{notable_repo.html_url}}
{{#if top_repos}}
   Top repos: {{top_repos}}
{{/if}}
{{#if languages}}
   Languages: {{languages}}
{{/if}}
{{#if contact}}
   Contact: {{contact}}
{{/if}}
   Breakdown: language {{breakdown.language_overlap}} | quality {{breakdown.repo_quality}} | activity {{breakdown.activity_recency}} | followers {{breakdown.followers}} | top repos {{breakdown.top_repo}} | seed bonus {{breakdown.seed_bonus}}

{{/each}}
Telemetry:
{{#each telemetry}}
  {{name}}: {{value}}
{{/each}}
";

/// Console preview printed on dry runs.
pub const PREVIEW_TEMPLATE: &str = "\
Dry run preview
Languages: {{requirements.languages}}
Frameworks: {{requirements.frameworks}}
Keywords: {{requirements.keywords}}
Top candidates:
{{#each candidates}}
  - {{name}} ({{score}}) - {{html_url}}
{{/each}}
";

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (plain text output)
/// - Strict mode (catches missing variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs
}

/// Renders report and preview templates.
pub struct ReportRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer {
    /// Creates a new renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(),
        }
    }

    /// Renders `template` with prepared report data.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is invalid or references a
    /// missing field.
    pub fn render(&self, template: &str, data: &Value) -> Result<String, ReportError> {
        Ok(self.handlebars.render_template(template, data)?)
    }
}
