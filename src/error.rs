//! Error types for the ResourceHub host.

/// Top-level error type for configuration and persistence.
///
/// Searching itself never fails; see [`hub_search::search`].
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// Configuration file could not be parsed or is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Search configuration rejected by the search core.
    #[error("search error: {0}")]
    Search(#[from] hub_search::SearchError),

    /// Usage ledger could not be read or written.
    #[error("usage ledger error: {0}")]
    Usage(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, HubError>;
