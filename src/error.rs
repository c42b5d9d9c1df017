use thiserror::Error;

/// Failures that stop a split run.
///
/// Cancellation is not an error; see [`crate::splitter::SplitOutcome`].
#[derive(Debug, Error)]
pub enum SplitError {
    /// The name column is empty or has a blank cell. Nothing has been written.
    #[error("invalid name source: {reason}")]
    InvalidInput { reason: String },

    /// Fewer names than output files. Nothing has been written.
    #[error(
        "the name source has fewer names ({available}) than the number of files to create ({required})"
    )]
    InsufficientNames { available: usize, required: usize },

    /// Two chunks resolve to the same filename and strict naming is on.
    #[error("chunks {first} and {second} would both be written as '{file_name}'")]
    NameCollision {
        file_name: String,
        first: usize,
        second: usize,
    },

    /// Writing one output file failed. Files for earlier chunks stay on disk.
    #[error("failed to write chunk {chunk_index} as '{name}': {source}")]
    WriteFailed {
        chunk_index: usize,
        name: String,
        #[source]
        source: lopdf::Error,
    },
}

impl SplitError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        SplitError::InvalidInput {
            reason: reason.into(),
        }
    }
}
