//! # Export Result
//!
//! Outcome record returned to hosts by every exporter.

use std::path::Path;

use litho_mesh::TriangleBuffer;
use tracing::{info, warn};

use crate::error::ExportError;

/// Outcome of one export.
///
/// Exporters never panic or propagate errors to the host; failures are
/// folded into this record.
///
/// # Example
///
/// ```rust
/// use litho_export::{ExportError, ExportResult};
///
/// let ok: ExportResult = Ok(1284).into();
/// assert!(ok.success);
/// assert_eq!(ok.bytes_written, 1284);
///
/// let failed: ExportResult = Err(ExportError::invalid_mesh("Empty mesh")).into();
/// assert!(!failed.success);
/// assert_eq!(failed.message, "Empty mesh");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// True if the file was written completely.
    pub success: bool,
    /// Error description; empty on success.
    pub message: String,
    /// Size of the written file in bytes; 0 on failure.
    pub bytes_written: u64,
}

impl ExportResult {
    /// Successful export of `bytes_written` bytes.
    pub fn ok(bytes_written: u64) -> Self {
        Self {
            success: true,
            message: String::new(),
            bytes_written,
        }
    }

    /// Failed export.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            bytes_written: 0,
        }
    }
}

impl From<Result<u64, ExportError>> for ExportResult {
    fn from(result: Result<u64, ExportError>) -> Self {
        match result {
            Ok(bytes) => Self::ok(bytes),
            Err(err) => Self::failed(err.to_string()),
        }
    }
}

/// Rejects buffers no format can represent.
pub(crate) fn validate(buffer: &TriangleBuffer) -> Result<(), ExportError> {
    if buffer.is_empty() {
        return Err(ExportError::invalid_mesh("Empty mesh"));
    }
    if buffer.len() % 3 != 0 {
        return Err(ExportError::invalid_mesh(
            "Invalid mesh: vertex count not divisible by 3",
        ));
    }
    Ok(())
}

/// Logs the outcome of an export and folds it into an [`ExportResult`].
pub(crate) fn finish(exporter: &str, path: &Path, result: Result<u64, ExportError>) -> ExportResult {
    match &result {
        Ok(bytes) => info!(exporter, path = %path.display(), bytes, "export complete"),
        Err(err) => warn!(exporter, path = %path.display(), error = %err, "export failed"),
    }
    result.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_validate_empty() {
        let err = validate(&TriangleBuffer::new()).unwrap_err();
        assert_eq!(err.to_string(), "Empty mesh");
    }

    #[test]
    fn test_validate_partial_triangle() {
        let buffer = TriangleBuffer::from_vertices(vec![DVec3::ZERO; 5]);
        let err = validate(&buffer).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid mesh: vertex count not divisible by 3"
        );
    }

    #[test]
    fn test_validate_ok() {
        let buffer = TriangleBuffer::from_vertices(vec![DVec3::ZERO; 6]);
        assert!(validate(&buffer).is_ok());
    }

    #[test]
    fn test_failed_result_has_no_bytes() {
        let result: ExportResult = Err(ExportError::packaging("timed out")).into();
        assert!(!result.success);
        assert_eq!(result.bytes_written, 0);
        assert!(result.message.contains("timed out"));
    }
}
