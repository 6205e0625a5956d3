//! # STL Writer
//!
//! Binary and ASCII stereolithography output.
//!
//! ## Binary Layout
//!
//! ```text
//! UINT8[80]    – Header ("LithoMaker Export", zero padded)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal, always (0, 0, 0)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count, always 0
//! end
//! ```
//!
//! Normals are not computed; slicers recompute them from the vertex order.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use config::constants::{
    EXPORT_OBJECT_NAME, EXPORT_SIGNATURE, STL_ASCII_SIGNIFICANT_DIGITS, STL_HEADER_SIZE,
    STL_TRIANGLE_SIZE,
};
use glam::DVec3;
use litho_mesh::TriangleBuffer;

use crate::error::ExportError;
use crate::result::{finish, validate, ExportResult};
use crate::Exporter;

/// STL flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StlEncoding {
    #[default]
    Binary,
    Ascii,
}

/// STL exporter.
///
/// # Examples
///
/// ```no_run
/// use litho_export::{Exporter, StlExporter};
/// use litho_mesh::TriangleBuffer;
/// # let buffer = TriangleBuffer::new();
///
/// let result = StlExporter::binary().export(&buffer, "panel.stl".as_ref());
/// if !result.success {
///     eprintln!("{}", result.message);
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StlExporter {
    encoding: StlEncoding,
}

impl StlExporter {
    /// Creates an exporter for `encoding`.
    pub fn new(encoding: StlEncoding) -> Self {
        Self { encoding }
    }

    /// Binary STL exporter.
    pub fn binary() -> Self {
        Self::new(StlEncoding::Binary)
    }

    /// ASCII STL exporter.
    pub fn ascii() -> Self {
        Self::new(StlEncoding::Ascii)
    }

    /// Returns the encoding this exporter writes.
    pub fn encoding(&self) -> StlEncoding {
        self.encoding
    }

    fn write_file(&self, buffer: &TriangleBuffer, path: &Path) -> Result<u64, ExportError> {
        validate(buffer)?;
        if self.encoding == StlEncoding::Binary {
            binary_triangle_count(buffer.triangle_count())?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        match self.encoding {
            StlEncoding::Binary => write_binary(buffer, &mut writer)?,
            StlEncoding::Ascii => write_ascii(buffer, &mut writer)?,
        }
        writer.flush()?;
        drop(writer);

        Ok(fs::metadata(path)?.len())
    }
}

impl Exporter for StlExporter {
    fn export(&self, buffer: &TriangleBuffer, path: &Path) -> ExportResult {
        finish(self.name(), path, self.write_file(buffer, path))
    }

    fn name(&self) -> &'static str {
        match self.encoding {
            StlEncoding::Binary => "STL",
            StlEncoding::Ascii => "STL (ASCII)",
        }
    }

    fn extension(&self) -> &'static str {
        "stl"
    }

    fn file_filter(&self) -> &'static str {
        "STL Files (*.stl)"
    }
}

// =============================================================================
// BINARY
// =============================================================================

/// Writes `buffer` as binary STL.
pub fn write_binary<W: Write>(buffer: &TriangleBuffer, writer: &mut W) -> std::io::Result<()> {
    let mut header = [0u8; STL_HEADER_SIZE];
    let text = EXPORT_SIGNATURE.as_bytes();
    header[..text.len()].copy_from_slice(text);
    writer.write_all(&header)?;

    let count = binary_triangle_count(buffer.triangle_count())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    writer.write_all(&count.to_le_bytes())?;

    for triangle in buffer.triangles() {
        write_vector(writer, DVec3::ZERO)?;
        for vertex in triangle {
            write_vector(writer, vertex)?;
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }

    Ok(())
}

/// Converts a triangle count to the binary count field, which is a `u32`.
pub fn binary_triangle_count(count: usize) -> Result<u32, ExportError> {
    u32::try_from(count).map_err(|_| {
        ExportError::invalid_mesh(format!(
            "Invalid mesh: {count} triangles exceed the binary STL limit of {}",
            u32::MAX
        ))
    })
}

/// Size in bytes of a binary STL holding `triangles` triangles.
pub fn binary_size(triangles: usize) -> u64 {
    (STL_HEADER_SIZE + 4 + STL_TRIANGLE_SIZE * triangles) as u64
}

fn write_vector<W: Write>(writer: &mut W, v: DVec3) -> std::io::Result<()> {
    let v = v.as_vec3();
    writer.write_all(&v.x.to_le_bytes())?;
    writer.write_all(&v.y.to_le_bytes())?;
    writer.write_all(&v.z.to_le_bytes())
}

// =============================================================================
// ASCII
// =============================================================================

/// Writes `buffer` as ASCII STL.
pub fn write_ascii<W: Write>(buffer: &TriangleBuffer, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "solid {EXPORT_OBJECT_NAME}")?;

    for triangle in buffer.triangles() {
        writeln!(writer, "facet normal 0 0 0")?;
        writeln!(writer, "  outer loop")?;
        for vertex in triangle {
            let v = vertex.as_vec3();
            writeln!(
                writer,
                "    vertex {} {} {}",
                format_general(f64::from(v.x)),
                format_general(f64::from(v.y)),
                format_general(f64::from(v.z)),
            )?;
        }
        writeln!(writer, "  endloop")?;
        writeln!(writer, "endfacet")?;
    }

    writeln!(writer, "endsolid")
}

/// Formats `value` like C's `%g` with six significant digits: fixed
/// notation for decimal exponents in `[-4, 6)`, scientific otherwise, with
/// trailing zeros removed.
///
/// ```rust
/// use litho_export::stl::format_general;
///
/// assert_eq!(format_general(3.2), "3.2");
/// assert_eq!(format_general(50.0), "50");
/// assert_eq!(format_general(-0.8), "-0.8");
/// assert_eq!(format_general(1234567.0), "1.23457e+06");
/// assert_eq!(format_general(0.00001), "1e-05");
/// ```
pub fn format_general(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let precision = STL_ASCII_SIGNIFICANT_DIGITS - 1;
    let scientific = format!("{:.*e}", precision, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= STL_ASCII_SIGNIFICANT_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
