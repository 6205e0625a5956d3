//! # OBJ Writer
//!
//! Wavefront OBJ output with shared vertices.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use config::constants::{DEDUP_DECIMALS, EXPORT_OBJECT_NAME, EXPORT_SIGNATURE};
use litho_mesh::TriangleBuffer;
use tracing::info;

use crate::dedup::IndexedTriangles;
use crate::error::ExportError;
use crate::result::{finish, validate, ExportResult};
use crate::Exporter;

/// Wavefront OBJ exporter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjExporter;

impl ObjExporter {
    /// Creates an OBJ exporter.
    pub fn new() -> Self {
        Self
    }

    fn write_file(&self, buffer: &TriangleBuffer, path: &Path) -> Result<u64, ExportError> {
        validate(buffer)?;

        let indexed = IndexedTriangles::from_buffer(buffer);
        info!(unique_vertices = indexed.vertices.len(), "obj vertices");

        let mut writer = BufWriter::new(File::create(path)?);
        write_obj(&indexed, &mut writer)?;
        writer.flush()?;
        drop(writer);

        Ok(fs::metadata(path)?.len())
    }
}

impl Exporter for ObjExporter {
    fn export(&self, buffer: &TriangleBuffer, path: &Path) -> ExportResult {
        finish(self.name(), path, self.write_file(buffer, path))
    }

    fn name(&self) -> &'static str {
        "OBJ"
    }

    fn extension(&self) -> &'static str {
        "obj"
    }

    fn file_filter(&self) -> &'static str {
        "Wavefront OBJ (*.obj)"
    }
}

/// Writes an indexed mesh as OBJ. Face indices are 1-based.
pub fn write_obj<W: Write>(indexed: &IndexedTriangles, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "# {EXPORT_SIGNATURE}")?;
    writeln!(writer, "# Triangles: {}", indexed.triangles.len())?;
    writeln!(writer)?;
    writeln!(writer, "o {EXPORT_OBJECT_NAME}")?;
    writeln!(writer)?;

    for v in &indexed.vertices {
        writeln!(
            writer,
            "v {:.*} {:.*} {:.*}",
            DEDUP_DECIMALS, v.x, DEDUP_DECIMALS, v.y, DEDUP_DECIMALS, v.z
        )?;
    }

    writeln!(writer)?;
    writeln!(writer, "# Faces")?;

    for [a, b, c] in &indexed.triangles {
        writeln!(writer, "f {} {} {}", a + 1, b + 1, c + 1)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_quad_document() {
        let mut buffer = TriangleBuffer::new();
        buffer.push_quad(
            DVec3::ZERO,
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(2.0, 1.5, 0.0),
            DVec3::new(0.0, 1.5, -0.8),
        );

        let mut bytes = Vec::new();
        write_obj(&IndexedTriangles::from_buffer(&buffer), &mut bytes).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let expected = "\
# LithoMaker Export
# Triangles: 2

o lithophane

v 0.000000 0.000000 0.000000
v 2.000000 0.000000 0.000000
v 2.000000 1.500000 0.000000
v 0.000000 1.500000 -0.800000

# Faces
f 1 2 3
f 1 3 4
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_exporter_metadata() {
        let exporter = ObjExporter::new();
        assert_eq!(exporter.name(), "OBJ");
        assert_eq!(exporter.extension(), "obj");
        assert_eq!(exporter.file_filter(), "Wavefront OBJ (*.obj)");
    }
}
