//! # 3MF Writer
//!
//! 3D Manufacturing Format output.
//!
//! # Format Structure
//!
//! A 3MF file is a ZIP archive containing:
//! - `\[Content_Types\].xml` - MIME type mappings
//! - `_rels/.rels` - Relationships
//! - `3D/3dmodel.model` - Model XML with one mesh object
//!
//! # Packaging
//!
//! The members are assembled by an [`Archiver`]. The default
//! [`ExternalArchiver`] stages them in a scratch directory and runs the
//! platform's compression utility (`zip` on Unix, PowerShell
//! `Compress-Archive` on Windows) with a bounded wait. [`Archiver::Embedded`]
//! writes the archive in process with the `zip` crate.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{Cursor, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use config::constants::{ARCHIVE_POLL_INTERVAL_MS, ARCHIVE_TIMEOUT_SECS, DEDUP_DECIMALS};
use litho_mesh::TriangleBuffer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use tracing::info;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::dedup::IndexedTriangles;
use crate::error::ExportError;
use crate::result::{finish, validate, ExportResult};
use crate::Exporter;

/// 3MF core namespace URI.
const NAMESPACE_3MF: &str = "http://schemas.microsoft.com/3dmanufacturing/core/2015/02";

/// Content types XML for 3MF.
const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="model" ContentType="application/vnd.ms-package.3dmanufacturing-3dmodel+xml"/>
</Types>
"#;

/// Relationships XML for 3MF.
const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Target="/3D/3dmodel.model" Id="rel0" Type="http://schemas.microsoft.com/3dmanufacturing/2013/01/3dmodel"/>
</Relationships>
"#;

/// Content types member path.
pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";
/// Package relationships member path.
pub const RELS_PATH: &str = "_rels/.rels";
/// Model member path.
pub const MODEL_PATH: &str = "3D/3dmodel.model";

/// One file inside the 3MF package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Path inside the archive, `/` separated.
    pub path: &'static str,
    pub contents: String,
}

// =============================================================================
// EXPORTER
// =============================================================================

/// 3MF exporter.
///
/// # Examples
///
/// ```no_run
/// use litho_export::threemf::{Archiver, ThreeMfExporter};
/// use litho_export::Exporter;
/// use litho_mesh::TriangleBuffer;
/// # let buffer = TriangleBuffer::new();
///
/// // No external tool required
/// let exporter = ThreeMfExporter::new(Archiver::Embedded);
/// let result = exporter.export(&buffer, "panel.3mf".as_ref());
/// assert!(result.success);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ThreeMfExporter {
    archiver: Archiver,
}

impl ThreeMfExporter {
    /// Creates an exporter packaging with `archiver`.
    pub fn new(archiver: Archiver) -> Self {
        Self { archiver }
    }

    /// Returns the archiver in use.
    pub fn archiver(&self) -> &Archiver {
        &self.archiver
    }

    fn write_file(&self, buffer: &TriangleBuffer, path: &Path) -> Result<u64, ExportError> {
        validate(buffer)?;

        let indexed = IndexedTriangles::from_buffer(buffer);
        info!(unique_vertices = indexed.vertices.len(), "3mf vertices");

        let members = members(&indexed)?;
        self.archiver.package(&members, path)?;

        Ok(fs::metadata(path)?.len())
    }
}

impl Exporter for ThreeMfExporter {
    fn export(&self, buffer: &TriangleBuffer, path: &Path) -> ExportResult {
        finish(self.name(), path, self.write_file(buffer, path))
    }

    fn name(&self) -> &'static str {
        "3MF"
    }

    fn extension(&self) -> &'static str {
        "3mf"
    }

    fn file_filter(&self) -> &'static str {
        "3MF Files (*.3mf)"
    }
}

/// Builds the three package members for `indexed`.
pub fn members(indexed: &IndexedTriangles) -> Result<[Member; 3], ExportError> {
    Ok([
        Member {
            path: CONTENT_TYPES_PATH,
            contents: CONTENT_TYPES_XML.to_string(),
        },
        Member {
            path: RELS_PATH,
            contents: RELS_XML.to_string(),
        },
        Member {
            path: MODEL_PATH,
            contents: model_xml(indexed)?,
        },
    ])
}

// =============================================================================
// MODEL XML
// =============================================================================

/// Generates the 3D model document. Triangle indices are 0-based.
pub fn model_xml(indexed: &IndexedTriangles) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    let mut writer = Writer::new_with_indent(Cursor::new(&mut buffer), b' ', 2);

    let xml_error = |what: &str, e: &dyn std::fmt::Display| {
        ExportError::packaging(format!("failed to write {what}: {e}"))
    };

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| xml_error("XML declaration", &e))?;

    let mut model = BytesStart::new("model");
    model.push_attribute(("unit", "millimeter"));
    model.push_attribute(("xmlns", NAMESPACE_3MF));
    writer
        .write_event(Event::Start(model))
        .map_err(|e| xml_error("model element", &e))?;

    writer
        .write_event(Event::Start(BytesStart::new("resources")))
        .map_err(|e| xml_error("resources element", &e))?;

    let mut object = BytesStart::new("object");
    object.push_attribute(("id", "1"));
    object.push_attribute(("type", "model"));
    writer
        .write_event(Event::Start(object))
        .map_err(|e| xml_error("object element", &e))?;

    writer
        .write_event(Event::Start(BytesStart::new("mesh")))
        .map_err(|e| xml_error("mesh element", &e))?;

    writer
        .write_event(Event::Start(BytesStart::new("vertices")))
        .map_err(|e| xml_error("vertices element", &e))?;
    for v in &indexed.vertices {
        let mut vertex = BytesStart::new("vertex");
        vertex.push_attribute(("x", format!("{:.*}", DEDUP_DECIMALS, v.x).as_str()));
        vertex.push_attribute(("y", format!("{:.*}", DEDUP_DECIMALS, v.y).as_str()));
        vertex.push_attribute(("z", format!("{:.*}", DEDUP_DECIMALS, v.z).as_str()));
        writer
            .write_event(Event::Empty(vertex))
            .map_err(|e| xml_error("vertex", &e))?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("vertices")))
        .map_err(|e| xml_error("vertices end", &e))?;

    writer
        .write_event(Event::Start(BytesStart::new("triangles")))
        .map_err(|e| xml_error("triangles element", &e))?;
    for [v1, v2, v3] in &indexed.triangles {
        let mut triangle = BytesStart::new("triangle");
        triangle.push_attribute(("v1", v1.to_string().as_str()));
        triangle.push_attribute(("v2", v2.to_string().as_str()));
        triangle.push_attribute(("v3", v3.to_string().as_str()));
        writer
            .write_event(Event::Empty(triangle))
            .map_err(|e| xml_error("triangle", &e))?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("triangles")))
        .map_err(|e| xml_error("triangles end", &e))?;

    for name in ["mesh", "object", "resources"] {
        writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(|e| xml_error(name, &e))?;
    }

    writer
        .write_event(Event::Start(BytesStart::new("build")))
        .map_err(|e| xml_error("build element", &e))?;
    let mut item = BytesStart::new("item");
    item.push_attribute(("objectid", "1"));
    writer
        .write_event(Event::Empty(item))
        .map_err(|e| xml_error("item", &e))?;
    writer
        .write_event(Event::End(BytesEnd::new("build")))
        .map_err(|e| xml_error("build end", &e))?;

    writer
        .write_event(Event::End(BytesEnd::new("model")))
        .map_err(|e| xml_error("model end", &e))?;

    let mut xml = String::from_utf8(buffer)
        .map_err(|e| ExportError::packaging(format!("invalid UTF-8 in generated XML: {e}")))?;
    xml.push('\n');
    Ok(xml)
}

// =============================================================================
// ARCHIVERS
// =============================================================================

/// Strategy that turns package members into the final archive.
#[derive(Debug, Clone)]
pub enum Archiver {
    /// Stage members on disk and run an external compression utility.
    External(ExternalArchiver),
    /// Write the archive in process with deflate compression.
    Embedded,
}

impl Default for Archiver {
    fn default() -> Self {
        Self::External(ExternalArchiver::default())
    }
}

impl Archiver {
    /// Writes `members` as a ZIP archive at `dest`, replacing any existing file.
    pub fn package(&self, members: &[Member], dest: &Path) -> Result<(), ExportError> {
        match self {
            Self::External(external) => external.package(members, dest),
            Self::Embedded => package_embedded(members, dest),
        }
    }
}

fn package_embedded(members: &[Member], dest: &Path) -> Result<(), ExportError> {
    let mut zip = ZipWriter::new(File::create(dest)?);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for member in members {
        zip.start_file(member.path, options).map_err(|e| {
            ExportError::packaging(format!("failed to add {}: {e}", member.path))
        })?;
        zip.write_all(member.contents.as_bytes())?;
    }

    zip.finish()
        .map_err(|e| ExportError::packaging(format!("failed to finalize archive: {e}")))?;
    Ok(())
}

/// External compression utility with a bounded wait.
///
/// On Unix the program is invoked as `<program> -r -X <output> .` from inside
/// the scratch directory, where `<output>` is an absolute staging path beside
/// the target. On Windows it is invoked as
/// `<program> -NoProfile -Command <script>` with a `Compress-Archive` script.
/// [`ExternalArchiver::leading_args`] are inserted right after the program,
/// for launchers and wrappers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalArchiver {
    /// Program to run.
    pub program: OsString,
    /// Arguments placed before the archive arguments.
    pub leading_args: Vec<OsString>,
    /// Upper bound on the archiver's run time. The child is killed after it.
    pub timeout: Duration,
}

impl Default for ExternalArchiver {
    fn default() -> Self {
        let program = if cfg!(windows) { "powershell" } else { "zip" };
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            timeout: Duration::from_secs(ARCHIVE_TIMEOUT_SECS),
        }
    }
}

impl ExternalArchiver {
    /// Uses `program` instead of the platform default.
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Inserts `args` between the program and the archive arguments.
    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the wait bound.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Stages `members` in a scratch directory and archives it to `dest`.
    ///
    /// The archiver writes into a staging directory next to `dest`, and the
    /// result replaces `dest` only once the archiver has succeeded. A failed
    /// run leaves any previous file at `dest` untouched. Both scratch
    /// directories are removed when this returns, on success and on every
    /// failure path.
    pub fn package(&self, members: &[Member], dest: &Path) -> Result<(), ExportError> {
        let scratch = tempfile::Builder::new().prefix("litho_3mf_").tempdir()?;
        for member in members {
            let staged = scratch.path().join(member.path);
            if let Some(parent) = staged.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&staged, &member.contents)?;
        }

        let dest = std::path::absolute(dest)?;
        let parent = dest.parent().ok_or_else(|| {
            ExportError::packaging(format!("{} has no parent directory", dest.display()))
        })?;

        // Same directory as the target so the final rename stays on one filesystem
        let staging = tempfile::Builder::new()
            .prefix(".litho_3mf_")
            .tempdir_in(parent)?;
        let output = staging.path().join("package.3mf");

        self.run(scratch.path(), &output)?;

        if !output.is_file() {
            return Err(ExportError::packaging(format!(
                "{} did not create {}",
                self.program.to_string_lossy(),
                output.display()
            )));
        }
        fs::rename(&output, &dest)?;
        Ok(())
    }

    /// Runs the archiver in `dir` and waits at most `timeout` for it.
    fn run(&self, dir: &Path, dest: &Path) -> Result<(), ExportError> {
        let program = self.program.to_string_lossy();
        let mut child = self
            .command(dir, dest)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ExportError::packaging(format!("cannot run {program}: {e}")))?;

        let deadline = Instant::now() + self.timeout;
        let poll = Duration::from_millis(ARCHIVE_POLL_INTERVAL_MS);

        loop {
            match child.try_wait()? {
                Some(status) if status.success() => return Ok(()),
                Some(status) => {
                    return Err(ExportError::packaging(format!(
                        "{program} exited with {status}"
                    )))
                }
                None if Instant::now() >= deadline => {
                    // The child may exit between the poll and the kill
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ExportError::packaging(format!(
                        "{program} timed out after {:?}",
                        self.timeout
                    )));
                }
                None => thread::sleep(poll),
            }
        }
    }

    #[cfg(not(windows))]
    fn command(&self, dir: &Path, dest: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .current_dir(dir)
            .args(&self.leading_args)
            .arg("-r")
            .arg("-X")
            .arg(dest)
            .arg(".");
        command
    }

    #[cfg(windows)]
    fn command(&self, dir: &Path, dest: &Path) -> Command {
        // Compress-Archive only accepts a .zip destination
        let staging = dest.with_extension("3mf.zip");
        let script = format!(
            "Compress-Archive -Path '{src}\\*' -DestinationPath '{zip}' -Force; \
             Move-Item -Force -LiteralPath '{zip}' -Destination '{dest}'",
            src = dir.display(),
            zip = staging.display(),
            dest = dest.display(),
        );
        let mut command = Command::new(&self.program);
        command
            .current_dir(dir)
            .args(&self.leading_args)
            .arg("-NoProfile")
            .arg("-Command")
            .arg(script);
        command
    }
}

#[cfg(test)]
mod tests;
