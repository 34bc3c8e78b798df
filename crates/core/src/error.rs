//! Error types for appsdk-core.

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building widgets or rendering pages.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A page template failed to load or render.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// A widget descriptor is malformed.
    #[error("Invalid widget: {0}")]
    InvalidWidget(String),
}
