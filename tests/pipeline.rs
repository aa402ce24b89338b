//! End-to-end tests for the batch pipeline and the binary surface.
//!
//! Real HEIC decoding needs fixture files we do not ship, so these tests
//! exercise the orchestration paths that do not require a successful
//! decode: skip-on-existing, per-file failure isolation, deletion
//! ordering, discovery filtering, and the pre-loop validation errors.

use std::fs;
use std::path::Path;
use std::process::Command;

use heicsan::core::{DEFAULT_QUALITY, PipelineSettings, StagePlan};
use heicsan::processing;
use heicsan::utils::parse_extension_list;
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_heicsan");

fn convert_settings(root: &Path, recursive: bool, delete_source: bool) -> PipelineSettings {
    PipelineSettings {
        root: root.to_path_buf(),
        recursive,
        extensions: parse_extension_list("heic,heif").unwrap(),
        quality: DEFAULT_QUALITY,
        stages: StagePlan {
            strip: false,
            convert: true,
            keep_datetimes: false,
            delete_source,
            delete_on_skip: false,
        },
        exiftool: None,
    }
}

#[test]
fn existing_destination_is_skipped_and_never_overwritten() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("pair.heic"), b"garbage").unwrap();
    fs::write(dir.path().join("pair.jpg"), b"first output").unwrap();

    let summary = processing::run(&convert_settings(dir.path(), false, false));
    assert_eq!(summary.discovered, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.processed, 0);

    // Running again changes nothing.
    let summary = processing::run(&convert_settings(dir.path(), false, false));
    assert_eq!(summary.skipped, 1);
    assert_eq!(fs::read(dir.path().join("pair.jpg")).unwrap(), b"first output");
    assert!(dir.path().join("pair.heic").exists());
}

#[test]
fn corrupt_files_are_isolated_and_counted() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad1.heic"), b"not heif").unwrap();
    fs::write(dir.path().join("bad2.HEIC"), b"also not heif").unwrap();
    fs::write(dir.path().join("ignored.txt"), b"text").unwrap();

    let summary = processing::run(&convert_settings(dir.path(), false, false));
    assert_eq!(summary.discovered, 2);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.processed, 0);
}

#[test]
fn failed_conversion_never_deletes_the_source() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("keepme.heic");
    fs::write(&src, b"corrupt").unwrap();

    let summary = processing::run(&convert_settings(dir.path(), false, true));
    assert_eq!(summary.failed, 1);
    assert!(src.exists(), "source must survive a failed conversion");
}

#[test]
fn delete_flag_does_not_clean_up_skipped_sources() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("pair.heic");
    fs::write(&src, b"garbage").unwrap();
    fs::write(dir.path().join("pair.jpg"), b"already converted").unwrap();

    let summary = processing::run(&convert_settings(dir.path(), false, true));
    assert_eq!(summary.skipped, 1);
    assert!(src.exists(), "convert --delete leaves skipped sources alone");
}

#[test]
fn destructive_skip_cleans_up_the_source() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("pair.heic");
    fs::write(&src, b"garbage").unwrap();
    fs::write(dir.path().join("pair.jpg"), b"already converted").unwrap();

    let mut settings = convert_settings(dir.path(), false, true);
    settings.stages.delete_on_skip = true;

    let summary = processing::run(&settings);
    assert_eq!(summary.skipped, 1);
    assert!(!src.exists(), "leftover source goes away in destructive mode");
    assert_eq!(
        fs::read(dir.path().join("pair.jpg")).unwrap(),
        b"already converted"
    );
}

#[test]
fn recursion_flag_bounds_discovery() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("top.heic"), b"x").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("deep.heic"), b"x").unwrap();

    let flat = processing::run(&convert_settings(dir.path(), false, false));
    assert_eq!(flat.discovered, 1);

    let deep = processing::run(&convert_settings(dir.path(), true, false));
    assert_eq!(deep.discovered, 2);
}

#[test]
fn empty_directory_discovers_nothing() {
    let dir = TempDir::new().unwrap();
    let summary = processing::run(&convert_settings(dir.path(), true, false));
    assert_eq!(summary.discovered, 0);
}

// ── Binary surface ────────────────────────────────────────────────────────────────────

#[test]
fn missing_directory_exits_nonzero() {
    let output = Command::new(BIN)
        .args(["convert", "/no/such/directory/heicsan"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Directory not found"), "stderr: {stderr}");
}

#[test]
fn out_of_range_quality_fails_before_touching_files() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("photo.heic");
    fs::write(&src, b"garbage").unwrap();

    let output = Command::new(BIN)
        .args(["convert", dir.path().to_str().unwrap(), "-q", "0"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(src.exists());
    assert!(!dir.path().join("photo.jpg").exists());
}

#[test]
fn empty_extension_list_fails_before_touching_files() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("photo.heic"), b"garbage").unwrap();

    let output = Command::new(BIN)
        .args(["convert", dir.path().to_str().unwrap(), "--ext", " , ."])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no valid extensions"), "stderr: {stderr}");
}

#[test]
fn per_file_errors_do_not_fail_the_process() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.heic"), b"corrupt").unwrap();

    let output = Command::new(BIN)
        .args(["convert", dir.path().to_str().unwrap()])
        .output()
        .unwrap();

    assert!(output.status.success(), "per-file errors keep exit code 0");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[ERROR]"), "stderr: {stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No files processed"), "stdout: {stdout}");
}

#[test]
fn strip_requires_exiftool_on_path() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("photo.heic"), b"garbage").unwrap();

    let output = Command::new(BIN)
        .args(["strip", dir.path().to_str().unwrap()])
        .env("PATH", "")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ExifTool not found"), "stderr: {stderr}");
    // The wipe never started.
    assert_eq!(fs::read(dir.path().join("photo.heic")).unwrap(), b"garbage");
}

#[cfg(unix)]
#[test]
fn sanitize_end_to_end_with_stubbed_exiftool() {
    use std::os::unix::fs::PermissionsExt;

    // A stub standing in for ExifTool keeps the test hermetic; the strip
    // stage only observes the exit status.
    let bin_dir = TempDir::new().unwrap();
    let stub = bin_dir.path().join("exiftool");
    fs::write(&stub, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();

    let dir = TempDir::new().unwrap();
    // Already-converted pair: skipped, source cleaned up (delete is the default).
    fs::write(dir.path().join("pair.heic"), b"garbage").unwrap();
    fs::write(dir.path().join("pair.jpg"), b"existing output").unwrap();
    // Corrupt file: strip succeeds, conversion fails, source survives.
    fs::write(dir.path().join("broken.heic"), b"corrupt").unwrap();

    let output = Command::new(BIN)
        .args(["sanitize", dir.path().to_str().unwrap()])
        .env("PATH", bin_dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("[SKIP] pair.jpg already exists"), "stdout: {stdout}");
    assert!(stderr.contains("[ERROR] broken.heic"), "stderr: {stderr}");

    assert!(!dir.path().join("pair.heic").exists());
    assert_eq!(
        fs::read(dir.path().join("pair.jpg")).unwrap(),
        b"existing output"
    );
    assert!(dir.path().join("broken.heic").exists());
}
