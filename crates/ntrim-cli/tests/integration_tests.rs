//! End-to-end tests for the `ntrim` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Test context with a temporary home, a project tree and a packages folder
struct TestContext {
    temp_dir: TempDir,
    projects: PathBuf,
    cache: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let projects = temp_dir.path().join("src");
        let cache = temp_dir.path().join(".nuget").join("packages");
        fs::create_dir_all(&projects).expect("failed to create projects dir");
        fs::create_dir_all(&cache).expect("failed to create cache dir");

        Self {
            temp_dir,
            projects,
            cache,
        }
    }

    fn write(&self, path: &Path, body: &[u8]) {
        fs::create_dir_all(path.parent().expect("no parent")).expect("failed to create dir");
        fs::write(path, body).expect("failed to write file");
    }

    fn project_file(&self, rel: &str, body: &str) {
        self.write(&self.projects.join(rel), body.as_bytes());
    }

    fn cached(&self, name: &str, version: &str, size: usize) {
        self.write(
            &self.cache.join(name).join(version).join(format!("{name}.nupkg")),
            &vec![0u8; size],
        );
    }

    fn ntrim_cmd(&self) -> Command {
        let bin_path = env!("CARGO_BIN_EXE_ntrim");
        let mut cmd = Command::new(bin_path);
        cmd.env("HOME", self.temp_dir.path());
        cmd.env("NUGET_PACKAGES", &self.cache);
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// used = {foo 1.0.0}; cache = foo 1.0.0 (10B), foo 2.0.0 (20B), bar 1.0.0 (5B)
    fn standard_fixture(&self) {
        self.project_file(
            "App/obj/project.assets.json",
            r#"{ "version": 3, "libraries": {
                "Foo/1.0.0": { "type": "package" },
                "Lib/1.0.0": { "type": "project", "msbuildProject": "../Lib/Lib.csproj" }
            } }"#,
        );
        self.cached("foo", "1.0.0", 10);
        self.cached("foo", "2.0.0", 20);
        self.cached("bar", "1.0.0", 5);
    }
}

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let output = ctx
        .ntrim_cmd()
        .arg("--help")
        .output()
        .expect("failed to run ntrim");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
}

#[test]
fn test_version_command() {
    let ctx = TestContext::new();
    let output = ctx
        .ntrim_cmd()
        .arg("--version")
        .output()
        .expect("failed to run ntrim");
    assert!(output.status.success());
}

#[test]
fn test_scan_reports_summary_without_deleting() {
    let ctx = TestContext::new();
    ctx.standard_fixture();

    let output = ctx
        .ntrim_cmd()
        .arg("scan")
        .arg(&ctx.projects)
        .output()
        .expect("failed to run ntrim scan");

    assert!(output.status.success(), "scan should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 version of 1 package"), "{stdout}");
    assert!(stdout.contains("3 versions of 2 packages"), "{stdout}");
    assert!(stdout.contains("25.00 B (71.43%)"), "{stdout}");
    assert!(stdout.contains("foo/2.0.0"), "{stdout}");

    assert!(ctx.cache.join("bar").exists());
    assert!(ctx.cache.join("foo/2.0.0").exists());
}

#[test]
fn test_trim_yes_removes_unused_versions() {
    let ctx = TestContext::new();
    ctx.standard_fixture();

    let output = ctx
        .ntrim_cmd()
        .args(["trim", "--yes"])
        .arg(&ctx.projects)
        .output()
        .expect("failed to run ntrim trim");

    assert!(output.status.success(), "trim should succeed");
    assert!(!ctx.cache.join("bar").exists());
    assert!(!ctx.cache.join("foo/2.0.0").exists());
    assert!(ctx.cache.join("foo/1.0.0").exists());
}

#[test]
fn test_trim_declined_keeps_everything() {
    let ctx = TestContext::new();
    ctx.standard_fixture();

    // stdin is empty, so the confirmation sees end of input and declines
    let output = ctx
        .ntrim_cmd()
        .arg("trim")
        .arg(&ctx.projects)
        .stdin(std::process::Stdio::null())
        .output()
        .expect("failed to run ntrim trim");

    assert!(output.status.success());
    assert!(ctx.cache.join("bar").exists());
    assert!(ctx.cache.join("foo/2.0.0").exists());
}

#[test]
fn test_global_dry_run_flag() {
    let ctx = TestContext::new();
    ctx.standard_fixture();

    let output = ctx
        .ntrim_cmd()
        .args(["--dry-run", "trim", "--yes"])
        .arg(&ctx.projects)
        .output()
        .expect("failed to run ntrim");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Would remove 2 directories"), "{stdout}");
    assert!(ctx.cache.join("bar").exists());
}

#[test]
fn test_malformed_manifest_is_skipped() {
    let ctx = TestContext::new();
    ctx.standard_fixture();
    ctx.project_file("Broken/packages.lock.json", "{ nope");

    let output = ctx
        .ntrim_cmd()
        .arg("scan")
        .arg(&ctx.projects)
        .output()
        .expect("failed to run ntrim scan");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Failed parsing").count(), 1, "{stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("25.00 B (71.43%)"), "{stdout}");
}

#[test]
fn test_missing_root_fails() {
    let ctx = TestContext::new();
    let output = ctx
        .ntrim_cmd()
        .arg("scan")
        .arg(ctx.temp_dir.path().join("does-not-exist"))
        .output()
        .expect("failed to run ntrim scan");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "{stderr}");
}

#[test]
fn test_missing_cache_fails() {
    let ctx = TestContext::new();
    ctx.standard_fixture();
    ctx.project_file("Broken/packages.lock.json", "{ nope");
    let output = ctx
        .ntrim_cmd()
        .arg("scan")
        .arg(&ctx.projects)
        .arg("--cache")
        .arg(ctx.temp_dir.path().join("nowhere"))
        .output()
        .expect("failed to run ntrim scan");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Package cache not found"), "{stderr}");
    assert!(!stderr.contains("Failed parsing"), "{stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Collecting"), "{stdout}");
    assert!(!stdout.contains("manifests"), "{stdout}");
}

#[test]
fn test_completions_command() {
    let ctx = TestContext::new();
    let output = ctx
        .ntrim_cmd()
        .args(["completions", "bash"])
        .output()
        .expect("failed to run ntrim completions");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("ntrim"));
}
