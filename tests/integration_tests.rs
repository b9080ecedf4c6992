use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn codexport() -> Command {
    Command::cargo_bin("codexport").expect("binary builds")
}

/// The tree from the canonical scenario: two matching files, one
/// non-matching file, one matching file inside an excluded directory.
fn create_scenario_tree(root: &Path) {
    fs::write(root.join("a.py"), "x=1").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub").join("b.py"), "y=2").unwrap();
    fs::write(root.join("sub").join("README.md"), "# docs").unwrap();
    fs::create_dir(root.join("target")).unwrap();
    fs::write(root.join("target").join("ignored.py"), "z=3").unwrap();
}

#[test]
fn exports_matching_files_with_headers() {
    let source = TempDir::new().unwrap();
    create_scenario_tree(source.path());
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("out.txt");

    codexport()
        .arg(source.path())
        .arg("--output")
        .arg(&output)
        .args(["--suffixes", ".py", "--exclude", "target"])
        .args(["--output-format", "plain", "--quiet"])
        .assert()
        .success();

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("=== a.py ===\nx=1\n"));
    let sub_record = format!("=== {} ===\ny=2\n", Path::new("sub").join("b.py").display());
    assert!(content.contains(&sub_record));
    assert!(!content.contains("README.md"));
    assert!(!content.contains("ignored.py"));
}

#[test]
fn reports_processed_count() {
    let source = TempDir::new().unwrap();
    create_scenario_tree(source.path());
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("out.txt");

    codexport()
        .arg(source.path())
        .arg("--output")
        .arg(&output)
        .args(["--suffixes", ".py", "--exclude", "target"])
        .args(["--output-format", "plain", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files: 2"));
}

#[test]
fn empty_source_directory_produces_empty_output() {
    let source = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("out.txt");

    codexport()
        .arg(source.path())
        .arg("--output")
        .arg(&output)
        .args(["--suffixes", ".py"])
        .args(["--output-format", "plain", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files: 0"));

    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

#[test]
fn missing_source_directory_fails_without_touching_output() {
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("out.txt");

    codexport()
        .arg("/definitely/not/here")
        .arg("--output")
        .arg(&output)
        .args(["--suffixes", ".py"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("path does not exist"));

    assert!(!output.exists());
}

#[test]
fn empty_suffix_override_is_a_configuration_error() {
    let source = TempDir::new().unwrap();

    codexport()
        .arg(source.path())
        .args(["--suffixes", " , "])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn repeated_runs_are_byte_identical() {
    let source = TempDir::new().unwrap();
    create_scenario_tree(source.path());
    let out_dir = TempDir::new().unwrap();
    let first = out_dir.path().join("one.txt");
    let second = out_dir.path().join("two.txt");

    for output in [&first, &second] {
        codexport()
            .arg(source.path())
            .arg("--output")
            .arg(output)
            .args(["--suffixes", ".py", "--exclude", "target"])
            .arg("--quiet")
            .assert()
            .success();
    }

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn dry_run_writes_nothing() {
    let source = TempDir::new().unwrap();
    create_scenario_tree(source.path());
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("out.txt");

    codexport()
        .arg(source.path())
        .arg("--output")
        .arg(&output)
        .args(["--suffixes", ".py", "--exclude", "target"])
        .args(["--output-format", "plain"])
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Files that would be exported: 2"));

    assert!(!output.exists());
}

#[test]
fn json_output_format_emits_report() {
    let source = TempDir::new().unwrap();
    create_scenario_tree(source.path());
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("out.txt");

    codexport()
        .arg(source.path())
        .arg("--output")
        .arg(&output)
        .args(["--suffixes", ".py", "--exclude", "target"])
        .args(["--output-format", "json", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_files_processed\": 2"));
}

#[test]
fn generate_config_writes_sample_file() {
    let work_dir = TempDir::new().unwrap();
    let config_path = work_dir.path().join("sample.toml");

    codexport()
        .arg("--generate-config")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated sample configuration"));

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[filters]"));
    assert!(content.contains("[output]"));
}

#[test]
fn config_file_drives_defaults() {
    let source = TempDir::new().unwrap();
    fs::write(source.path().join("app.rs"), "fn main() {}").unwrap();
    fs::write(source.path().join("notes.txt"), "skip me").unwrap();

    let work_dir = TempDir::new().unwrap();
    let output = work_dir.path().join("bundle.txt");
    let config_path = work_dir.path().join("codexport.toml");
    fs::write(
        &config_path,
        format!(
            "[filters]\ninclude_suffixes = [\".rs\"]\nexclude_dirs = []\n\n\
             [output]\noutput_path = \"{}\"\n",
            output.display()
        ),
    )
    .unwrap();

    codexport()
        .arg(source.path())
        .arg("--config")
        .arg(&config_path)
        .arg("--quiet")
        .assert()
        .success();

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("=== app.rs ===\nfn main() {}\n"));
    assert!(!content.contains("notes.txt"));
}

#[test]
fn read_failure_is_tolerated_and_marked_inline() {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let source = TempDir::new().unwrap();
        fs::write(source.path().join("ok.py"), "fine").unwrap();
        let locked = source.path().join("locked.py");
        fs::write(&locked, "secret").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        if fs::read(&locked).is_ok() {
            // Running as root; the permission bits cannot make this fail.
            return;
        }

        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("out.txt");

        codexport()
            .arg(source.path())
            .arg("--output")
            .arg(&output)
            .args(["--suffixes", ".py"])
            .args(["--output-format", "plain", "--quiet"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Files: 2"));

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains("=== ok.py ===\nfine\n"));
        assert!(content.contains("=== locked.py ===\n[ERROR: Failed to read file: locked.py"));
    }
}
