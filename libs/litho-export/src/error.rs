//! # Export Errors
//!
//! Failures while serializing a triangle buffer.

use thiserror::Error;

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The buffer is empty or its length is not a multiple of 3.
    ///
    /// Raised before any file is touched.
    #[error("{message}")]
    InvalidMesh { message: String },

    /// Underlying file system failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 3MF archive could not be produced: archiver missing, timed out or
    /// exited with failure.
    #[error("Failed to create 3MF archive: {message}")]
    Packaging { message: String },
}

impl ExportError {
    /// Creates an invalid mesh error.
    pub fn invalid_mesh(message: impl Into<String>) -> Self {
        Self::InvalidMesh {
            message: message.into(),
        }
    }

    /// Creates a packaging error.
    pub fn packaging(message: impl Into<String>) -> Self {
        Self::Packaging {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_mesh_display() {
        let err = ExportError::invalid_mesh("Empty mesh");
        assert_eq!(err.to_string(), "Empty mesh");
    }

    #[test]
    fn test_packaging_display() {
        let err = ExportError::packaging("zip not found");
        assert_eq!(err.to_string(), "Failed to create 3MF archive: zip not found");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ExportError = io.into();
        assert!(matches!(err, ExportError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }
}
