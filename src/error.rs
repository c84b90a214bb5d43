/// Error type for a single log source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Underlying I/O failure while reading the log.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The log is corrupt or structurally invalid.
    #[error("malformed log: {0}")]
    Malformed(String),

    /// The log uses a schema this source cannot decode.
    #[error("unsupported schema: {0}")]
    UnsupportedSchema(String),

    /// Any other source-reported failure.
    #[error("source failed: {0}")]
    Failed(String),
}

/// Error type for the playback engine itself.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    /// An operation was called before `initialize` completed.
    #[error("player is not initialized; call initialize() first")]
    NotInitialized,

    /// `initialize` was called a second time.
    #[error("player is already initialized")]
    AlreadyInitialized,

    /// The player was constructed with an empty source list.
    #[error("at least one log source is required")]
    NoSources,

    /// A source failure, surfaced unchanged.
    #[error(transparent)]
    Source(#[from] SourceError),
}
