//! Error types for rs-pagination.
//!
//! Detection itself never fails: the public `detect*` functions degrade to an
//! empty result. These errors are used where a caller (or an internal
//! candidate builder) wants to know why something was rejected.

/// Error type for pagination detection operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The document URL or a link target is not an absolute http(s) URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A URL page pattern candidate could not be built.
    #[error("Invalid page pattern: {0}")]
    InvalidPattern(String),
}

/// Result type alias for detection operations.
pub type Result<T> = std::result::Result<T, Error>;
