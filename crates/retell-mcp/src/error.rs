//! Server error types.

/// Errors raised while running the protocol transport.
///
/// Tool failures never show up here; they are rendered into tool results.
#[derive(Debug, thiserror::Error)]
pub enum McpError {
    /// Reading from or writing to the transport failed.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A background task panicked or was aborted.
    #[error("task failed: {0}")]
    Task(String),
}

/// Convenience alias for server results.
pub type Result<T> = std::result::Result<T, McpError>;
