//! Report error types.

use thiserror::Error;

/// Errors that can occur while rendering or writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Template rendering failed.
    #[error("Template rendering error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    /// Failed to write the report file.
    #[error("Failed to write report '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
