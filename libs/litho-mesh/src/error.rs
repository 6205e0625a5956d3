//! # Mesh Errors
//!
//! Error types for mesh generation inputs.
//!
//! Generation itself is infallible once a [`crate::HeightGrid`] exists:
//! configuration values are not validated here (see
//! [`config::MeshConfig::validate`]).

use thiserror::Error;

/// Errors that can occur while preparing mesh generation inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// Height grid dimensions or sample data are unusable
    #[error("Invalid height grid: {message}")]
    InvalidGrid { message: String },
}

impl MeshError {
    /// Creates an invalid grid error.
    pub fn invalid_grid(message: impl Into<String>) -> Self {
        Self::InvalidGrid {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeshError::invalid_grid("grid must be at least 2x2");
        assert_eq!(err.to_string(), "Invalid height grid: grid must be at least 2x2");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MeshError>();
    }
}
