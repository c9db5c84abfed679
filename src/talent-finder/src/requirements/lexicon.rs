//! Built-in skill lexicon used by [`extract_requirements`](super::extract_requirements).

pub(crate) const LANGUAGES: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "go",
    "rust",
    "c",
    "c++",
    "c#",
    "scala",
    "kotlin",
    "ruby",
    "php",
    "swift",
    "objective-c",
    "r",
];

pub(crate) const FRAMEWORKS: &[&str] = &[
    // backend
    "django",
    "flask",
    "fastapi",
    "spring",
    "spring boot",
    "quarkus",
    "express",
    "nestjs",
    "laravel",
    "rails",
    // frontend
    "react",
    "next.js",
    "nextjs",
    "vue",
    "nuxt",
    "angular",
    "svelte",
    // data/ml
    "pandas",
    "numpy",
    "scikit-learn",
    "sklearn",
    "pytorch",
    "tensorflow",
    "keras",
    "xgboost",
    "lightgbm",
    // devops
    "docker",
    "kubernetes",
    "k8s",
    "terraform",
    "ansible",
    "pulumi",
    "helm",
    "github actions",
    "circleci",
    "travis",
    "gitlab ci",
    // systems
    "grpc",
    "protobuf",
    "thrift",
    "postgres",
    "mysql",
    "redis",
    "kafka",
    "rabbitmq",
    "elasticsearch",
    "clickhouse",
];

pub(crate) const GENERAL_KEYWORDS: &[&str] = &[
    "distributed systems",
    "microservices",
    "rest",
    "grpc",
    "event-driven",
    "real-time",
    "low-latency",
    "concurrency",
    "multithreading",
    "testing",
    "unit tests",
    "integration tests",
    "ci",
    "cd",
    "observability",
    "monitoring",
    "tracing",
    "profiling",
    "performance",
    "scalability",
    "security",
    "cryptography",
    "oauth",
    "oidc",
    "sso",
    "tls",
];

/// Common languages accepted as loose tokens when no language matched.
pub(crate) const FALLBACK_LANGUAGES: &[&str] = &["python", "javascript", "typescript", "java", "go"];

/// Spelling variants folded onto one canonical term.
pub(crate) const ALIASES: &[(&str, &str)] = &[
    ("nextjs", "next.js"),
    ("k8s", "kubernetes"),
    ("sklearn", "scikit-learn"),
];

/// Keywords that pull each other in.
pub(crate) const PAIRED_KEYWORDS: &[&str] = &["ci", "cd"];
