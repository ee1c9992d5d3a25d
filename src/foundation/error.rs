use std::path::PathBuf;

/// Convenience result type used across photoreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Error taxonomy shared by the layout engine, the pipelines and the writers.
///
/// `MediaDecode` is the only variant the pipelines recover from (the item is skipped); every other
/// variant aborts the call or the run it came from.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Zero, negative or non-finite width/height handed to the layout engine.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// A single media item could not be read or decoded.
    #[error("failed to decode '{}': {message}", path.display())]
    MediaDecode {
        /// Offending file.
        path: PathBuf,
        /// Decoder message.
        message: String,
    },

    /// The input folder does not exist or is not a directory.
    #[error("input directory not found: '{}'", .0.display())]
    MissingInputDirectory(PathBuf),

    /// The input folder produced nothing to write.
    #[error("no usable media in '{}'", .0.display())]
    EmptyInputSet(PathBuf),

    /// The output artifact could not be created, written or finalized.
    #[error("output write error: {0}")]
    OutputWrite(String),

    /// Invalid configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::InvalidDimension`] value.
    pub fn invalid_dimension(msg: impl Into<String>) -> Self {
        Self::InvalidDimension(msg.into())
    }

    /// Build a [`ReelError::MediaDecode`] value.
    pub fn media_decode(path: impl Into<PathBuf>, msg: impl std::fmt::Display) -> Self {
        Self::MediaDecode {
            path: path.into(),
            message: msg.to_string(),
        }
    }

    /// Build a [`ReelError::OutputWrite`] value.
    pub fn output_write(msg: impl Into<String>) -> Self {
        Self::OutputWrite(msg.into())
    }

    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Return `true` for errors scoped to a single media item.
    pub fn is_per_item(&self) -> bool {
        matches!(self, Self::MediaDecode { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            ReelError::invalid_dimension("x")
                .to_string()
                .contains("invalid dimension:")
        );
        assert!(
            ReelError::output_write("x")
                .to_string()
                .contains("output write error:")
        );
        assert!(
            ReelError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            ReelError::MissingInputDirectory(PathBuf::from("nowhere"))
                .to_string()
                .contains("'nowhere'")
        );
    }

    #[test]
    fn media_decode_names_the_file() {
        let err = ReelError::media_decode("photos/a.jpg", "truncated");
        let msg = err.to_string();
        assert!(msg.contains("a.jpg"));
        assert!(msg.contains("truncated"));
        assert!(err.is_per_item());
        assert!(!ReelError::EmptyInputSet(PathBuf::from(".")).is_per_item());
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = ReelError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
