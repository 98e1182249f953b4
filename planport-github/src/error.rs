//! Error types for GitHub operations

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure
    #[error("GraphQL request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("GraphQL request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response carried a GraphQL `errors` array
    #[error("GraphQL errors: {}", .0.join(", "))]
    GraphQl(Vec<String>),

    /// Authentication error
    #[error("GitHub authentication error: {0}")]
    Auth(String),

    /// Response was well-formed but lacked an expected value
    #[error("GraphQL response missing {0}")]
    MissingData(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// A task failed part way through its import
    #[error("Failed to import task '{title}': {source}")]
    Task {
        title: String,
        #[source]
        source: Box<Error>,
    },

    /// Error from the core crate
    #[error(transparent)]
    Core(#[from] planport_core::Error),
}
