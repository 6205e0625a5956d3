//! # Lithophane Export
//!
//! Writes a [`TriangleBuffer`] to the file formats slicers read.
//!
//! ## Formats
//!
//! | Format | Module | Vertices |
//! |--------|--------|----------|
//! | STL binary / ASCII | [`stl`] | per triangle, `f32` |
//! | Wavefront OBJ | [`obj`] | deduplicated, 1-based |
//! | 3MF | [`threemf`] | deduplicated, 0-based |
//!
//! Every exporter validates the buffer first and reports the outcome as an
//! [`ExportResult`]; nothing panics and no error escapes to the host.
//!
//! ## Usage
//!
//! ```rust
//! use config::MeshConfig;
//! use litho_export::stl::binary_size;
//! use litho_export::{export, ExportFormat};
//! use litho_mesh::{HeightGrid, MeshGenerator};
//!
//! let grid = HeightGrid::filled(8, 8, 128).unwrap();
//! let mesh = MeshGenerator::new(MeshConfig::default()).generate(&grid);
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("panel.stl");
//! let result = export(ExportFormat::StlBinary, &mesh, &path);
//! assert!(result.success);
//! assert_eq!(result.bytes_written, binary_size(mesh.triangle_count()));
//! ```

use std::path::Path;

use litho_mesh::TriangleBuffer;

pub mod dedup;
pub mod error;
pub mod obj;
pub mod result;
pub mod stl;
pub mod threemf;

pub use error::ExportError;
pub use obj::ObjExporter;
pub use result::ExportResult;
pub use stl::{StlEncoding, StlExporter};
pub use threemf::{Archiver, ExternalArchiver, ThreeMfExporter};

/// A mesh file writer.
pub trait Exporter {
    /// Writes `buffer` to `path`, replacing any existing file.
    fn export(&self, buffer: &TriangleBuffer, path: &Path) -> ExportResult;

    /// Human readable format name.
    fn name(&self) -> &'static str;

    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    /// File dialog filter, e.g. `STL Files (*.stl)`.
    fn file_filter(&self) -> &'static str;
}

/// Selectable output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    StlBinary,
    StlAscii,
    Obj,
    ThreeMf,
}

impl ExportFormat {
    /// Every format, in menu order.
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::StlBinary,
        ExportFormat::StlAscii,
        ExportFormat::Obj,
        ExportFormat::ThreeMf,
    ];

    /// Stable identifier, suitable for persisted preferences.
    pub fn id(self) -> &'static str {
        match self {
            Self::StlBinary => "stl_bin",
            Self::StlAscii => "stl_ascii",
            Self::Obj => "obj",
            Self::ThreeMf => "3mf",
        }
    }

    /// Parses an identifier produced by [`ExportFormat::id`].
    ///
    /// ```rust
    /// use litho_export::ExportFormat;
    ///
    /// assert_eq!(ExportFormat::from_id("3mf"), Some(ExportFormat::ThreeMf));
    /// assert_eq!(ExportFormat::from_id("ply"), None);
    /// ```
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.id() == id)
    }

    /// Creates the exporter for this format with default settings.
    pub fn exporter(self) -> Box<dyn Exporter> {
        match self {
            Self::StlBinary => Box::new(StlExporter::binary()),
            Self::StlAscii => Box::new(StlExporter::ascii()),
            Self::Obj => Box::new(ObjExporter::new()),
            Self::ThreeMf => Box::new(ThreeMfExporter::default()),
        }
    }
}

/// Writes `buffer` to `path` in `format`.
pub fn export(format: ExportFormat, buffer: &TriangleBuffer, path: &Path) -> ExportResult {
    format.exporter().export(buffer, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_roundtrip() {
        for format in ExportFormat::ALL {
            assert_eq!(ExportFormat::from_id(format.id()), Some(format));
        }
        assert_eq!(ExportFormat::from_id("STL_BIN"), None);
    }

    #[test]
    fn test_exporter_extensions() {
        let extensions: Vec<_> = ExportFormat::ALL
            .iter()
            .map(|f| f.exporter().extension())
            .collect();
        assert_eq!(extensions, vec!["stl", "stl", "obj", "3mf"]);
    }

    #[test]
    fn test_file_filters_name_extension() {
        for format in ExportFormat::ALL {
            let exporter = format.exporter();
            let pattern = format!("(*.{})", exporter.extension());
            assert!(exporter.file_filter().ends_with(&pattern));
        }
    }
}
