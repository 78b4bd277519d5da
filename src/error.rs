use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse Error in {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    #[error("Malformed Document {}: {message}", .path.display())]
    MalformedDocument { path: PathBuf, message: String },
}

/// Coarse classification of a `PipelineError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Parse,
    MalformedDocument,
}

impl PipelineError {
    pub fn parse(path: &Path, message: impl std::fmt::Display) -> Self {
        PipelineError::Parse {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    pub fn malformed(path: &Path, message: impl std::fmt::Display) -> Self {
        PipelineError::MalformedDocument {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Io(_) => ErrorKind::Io,
            PipelineError::Parse { .. } => ErrorKind::Parse,
            PipelineError::MalformedDocument { .. } => ErrorKind::MalformedDocument,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_names_file() {
        let err = PipelineError::parse(Path::new("people.csv"), "missing field `weight`");
        let msg = err.to_string();
        assert!(msg.contains("Parse Error"));
        assert!(msg.contains("people.csv"));
        assert!(msg.contains("missing field `weight`"));
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_malformed_error_kind() {
        let err = PipelineError::malformed(Path::new("people.xml"), "no root element");
        assert!(err.to_string().contains("Malformed Document"));
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
    }

    #[test]
    fn test_io_error_from() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PipelineError = io.into();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().starts_with("I/O Error"));
    }
}
