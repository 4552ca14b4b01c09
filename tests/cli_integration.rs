use image::{GrayImage, Luma};
use std::path::Path;
use std::process::{Command, Output};

fn run_painter(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mask-painter"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("run mask-painter")
}

/// 6x2 picture: row 0 has dark pixels at x=1,2; row 1 is dark all the way.
fn write_sample(dir: &Path) {
    let img = GrayImage::from_fn(6, 2, |x, y| {
        if y == 1 || x == 1 || x == 2 { Luma([10]) } else { Luma([240]) }
    });
    img.save(dir.join("sample.png")).expect("write sample png");
}

#[test]
fn events_prints_the_gesture_list() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_sample(dir.path());

    let output = run_painter(&["events", "sample.png", "--config", "cfg.toml"], dir.path());
    assert!(output.status.success(), "process failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["press 1 0", "release 2 0", "press 0 1", "release 6 1"]);
}

#[test]
fn high_threshold_override_inks_everything() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_sample(dir.path());

    let output = run_painter(
        &["events", "sample.png", "--threshold", "255", "--config", "cfg.toml"],
        dir.path(),
    );
    assert!(output.status.success(), "process failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 4);
    assert!(stdout.starts_with("press 0 0\nrelease 6 0\n"));
}

#[test]
fn dry_run_paint_succeeds_and_writes_config() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_sample(dir.path());

    let output = run_painter(
        &["paint", "sample.png", "--dry-run", "--config", "cfg.toml", "--write-config"],
        dir.path(),
    );
    assert!(output.status.success(), "process failed: {output:?}");
    let written = std::fs::read_to_string(dir.path().join("cfg.toml")).expect("config written");
    assert!(written.contains("threshold = 150"));
}

#[test]
fn drag_with_equal_points_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output = run_painter(
        &["drag", "3", "3", "3", "3", "--dry-run", "--config", "cfg.toml"],
        dir.path(),
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("InvalidArgument"), "stderr: {stderr}");
}

#[test]
fn missing_image_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output = run_painter(&["events", "nope.png", "--config", "cfg.toml"], dir.path());
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ImageLoad"), "stderr: {stderr}");
}
