use std::io::Read;

use glam::DVec3;
use zip::ZipArchive;

use super::*;

fn quad() -> TriangleBuffer {
    let mut buffer = TriangleBuffer::new();
    buffer.push_quad(
        DVec3::ZERO,
        DVec3::new(10.0, 0.0, 0.0),
        DVec3::new(10.0, 10.0, 1.5),
        DVec3::new(0.0, 10.0, -0.8),
    );
    buffer
}

fn read_member(path: &Path, name: &str) -> String {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut member = archive.by_name(name).unwrap();
    let mut contents = String::new();
    member.read_to_string(&mut contents).unwrap();
    contents
}

#[test]
fn model_xml_structure() {
    let xml = model_xml(&IndexedTriangles::from_buffer(&quad())).unwrap();

    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(xml.contains(r#"<model unit="millimeter" xmlns="http://schemas.microsoft.com/3dmanufacturing/core/2015/02">"#));
    assert!(xml.contains(r#"<object id="1" type="model">"#));
    assert!(xml.contains(r#"<vertex x="10.000000" y="10.000000" z="1.500000"/>"#));
    assert!(xml.contains(r#"<vertex x="0.000000" y="10.000000" z="-0.800000"/>"#));
    assert!(xml.contains(r#"<triangle v1="0" v2="1" v3="2"/>"#));
    assert!(xml.contains(r#"<triangle v1="0" v2="2" v3="3"/>"#));
    assert!(xml.contains(r#"<item objectid="1"/>"#));
    assert_eq!(xml.matches("<vertex ").count(), 4);
    assert_eq!(xml.matches("<triangle ").count(), 2);
}

#[test]
fn members_in_package_order() {
    let members = members(&IndexedTriangles::from_buffer(&quad())).unwrap();
    let paths: Vec<_> = members.iter().map(|m| m.path).collect();
    assert_eq!(paths, vec![CONTENT_TYPES_PATH, RELS_PATH, MODEL_PATH]);
    assert!(members[1].contents.contains(r#"Target="/3D/3dmodel.model" Id="rel0""#));
}

#[test]
fn embedded_archive_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quad.3mf");

    let result = ThreeMfExporter::new(Archiver::Embedded).export(&quad(), &path);
    assert!(result.success, "{}", result.message);
    assert_eq!(result.bytes_written, fs::metadata(&path).unwrap().len());

    let archive = ZipArchive::new(File::open(&path).unwrap()).unwrap();
    assert_eq!(archive.len(), 3);

    let model = read_member(&path, MODEL_PATH);
    assert_eq!(model.matches("<triangle ").count(), 2);
    assert!(read_member(&path, CONTENT_TYPES_PATH).contains("Extension=\"model\""));
}

#[test]
fn embedded_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("again.3mf");
    fs::write(&path, b"stale").unwrap();

    let result = ThreeMfExporter::new(Archiver::Embedded).export(&quad(), &path);
    assert!(result.success);
    assert!(read_member(&path, MODEL_PATH).contains("<mesh>"));
}

#[test]
fn invalid_mesh_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.3mf");

    let result = ThreeMfExporter::default().export(&TriangleBuffer::new(), &path);
    assert!(!result.success);
    assert_eq!(result.message, "Empty mesh");
    assert!(!path.exists());
}

#[test]
fn missing_archiver_is_packaging_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.3mf");

    let archiver = ExternalArchiver::default().with_program("litho-no-such-archiver");
    let err = ThreeMfExporter::new(Archiver::External(archiver))
        .write_file(&quad(), &path)
        .unwrap_err();

    assert!(matches!(err, ExportError::Packaging { .. }));
    assert!(err.to_string().contains("litho-no-such-archiver"));
    assert!(!path.exists());
}

#[test]
fn default_archiver_is_external() {
    match ThreeMfExporter::default().archiver() {
        Archiver::External(external) => {
            assert_eq!(external.timeout, Duration::from_secs(30));
        }
        Archiver::Embedded => panic!("expected external archiver"),
    }
}

#[test]
fn system_zip_when_available() {
    let available = Command::new("zip")
        .arg("-v")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false);
    if cfg!(windows) || !available {
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("system.3mf");
    let result = ThreeMfExporter::default().export(&quad(), &path);
    assert!(result.success, "{}", result.message);

    let model = read_member(&path, MODEL_PATH);
    assert!(model.contains(r#"<item objectid="1"/>"#));
}

#[cfg(unix)]
mod scripted {
    use super::*;

    /// Archiver running `body` through `sh -c`; the archive arguments arrive
    /// as `$1..$4`.
    fn exporter(body: &str, timeout: Duration) -> ThreeMfExporter {
        ThreeMfExporter::new(Archiver::External(
            ExternalArchiver::default()
                .with_program("sh")
                .with_leading_args(["-c", body, "fake-zip"])
                .with_timeout(timeout),
        ))
    }

    #[test]
    fn runs_in_scratch_dir_with_absolute_dest() {
        let dir = tempfile::tempdir().unwrap();
        let body = r#"[ "$1" = "-r" ] && [ "$2" = "-X" ] && [ "$4" = "." ] || exit 7
case "$3" in /*) ;; *) exit 8 ;; esac
[ -f 3D/3dmodel.model ] && [ -f _rels/.rels ] || exit 9
printf packaged > "$3""#;
        let path = dir.path().join("out.3mf");

        let result = exporter(body, Duration::from_secs(10)).export(&quad(), &path);
        assert!(result.success, "{}", result.message);
        assert_eq!(fs::read_to_string(&path).unwrap(), "packaged");
        assert_eq!(result.bytes_written, 8);
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn existing_target_replaced_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let body = r#"[ -e "$3" ] && exit 9
printf fresh > "$3""#;
        let path = dir.path().join("out.3mf");
        fs::write(&path, b"stale").unwrap();

        let result = exporter(body, Duration::from_secs(10)).export(&quad(), &path);
        assert!(result.success, "{}", result.message);
        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh");
    }

    #[test]
    fn failed_reexport_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.3mf");
        fs::write(&path, b"previous good export").unwrap();

        let result = exporter("exit 3", Duration::from_secs(10)).export(&quad(), &path);
        assert!(!result.success);
        assert_eq!(fs::read(&path).unwrap(), b"previous good export");
        assert_eq!(entries(dir.path()), vec!["panel.3mf"]);
    }

    #[test]
    fn timed_out_reexport_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.3mf");
        fs::write(&path, b"previous good export").unwrap();

        let result = exporter("exec sleep 5", Duration::from_millis(200)).export(&quad(), &path);
        assert!(!result.success);
        assert_eq!(fs::read(&path).unwrap(), b"previous good export");
    }

    #[test]
    fn scratch_dir_removed_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let record = dir.path().join("scratch.txt");
        let body = format!("pwd > '{}'\nexit 3", record.display());
        let path = dir.path().join("out.3mf");

        let result = exporter(&body, Duration::from_secs(10)).export(&quad(), &path);
        assert!(!result.success);

        let scratch = fs::read_to_string(&record).unwrap();
        let scratch = Path::new(scratch.trim());
        assert!(scratch
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("litho_3mf_"));
        assert!(!scratch.exists());
        assert_eq!(entries(dir.path()), vec!["scratch.txt"]);
    }

    #[test]
    fn scratch_dir_removed_after_success() {
        let dir = tempfile::tempdir().unwrap();
        let record = dir.path().join("scratch.txt");
        let body = format!("pwd > '{}'\nprintf packaged > \"$3\"", record.display());
        let path = dir.path().join("out.3mf");

        let result = exporter(&body, Duration::from_secs(10)).export(&quad(), &path);
        assert!(result.success, "{}", result.message);

        let scratch = fs::read_to_string(&record).unwrap();
        assert!(!Path::new(scratch.trim()).exists());
        assert_eq!(entries(dir.path()), vec!["out.3mf", "scratch.txt"]);
    }

    #[test]
    fn non_zero_exit_is_packaging_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.3mf");

        let err = exporter("exit 3", Duration::from_secs(10))
            .write_file(&quad(), &path)
            .unwrap_err();
        assert!(matches!(err, ExportError::Packaging { .. }));
        assert!(err.to_string().contains("exited with"));
    }

    #[test]
    fn silent_success_without_output_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.3mf");

        let err = exporter("exit 0", Duration::from_secs(10))
            .write_file(&quad(), &path)
            .unwrap_err();
        assert!(err.to_string().contains("did not create"));
    }

    #[test]
    fn hung_archiver_is_killed_after_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.3mf");

        let started = Instant::now();
        let err = exporter("exec sleep 5", Duration::from_millis(200))
            .write_file(&quad(), &path)
            .unwrap_err();

        assert!(err.to_string().contains("timed out"));
        assert!(started.elapsed() < Duration::from_secs(4));
        assert!(!path.exists());
    }
}
