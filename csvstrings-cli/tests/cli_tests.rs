use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CONFIG: &str = r#"
default_language = "en"
state_column = 1
excluded_states = ["Reviewed"]

[[languages]]
code = "en"
name = "English"

[[languages]]
code = "fr"
name = "French"
"#;

fn csvstrings(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("csvstrings").unwrap();
    cmd.current_dir(dir);
    cmd
}

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_help() {
    let temp_dir = TempDir::new().unwrap();
    let output = csvstrings(temp_dir.path()).arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--verbose"));
    assert!(stdout.contains("--logfile"));
}

#[test]
fn test_no_arguments_without_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = csvstrings(temp_dir.path()).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not enough arguments"));
    assert!(stderr.contains("Usage"));
}

#[test]
fn test_csv_without_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "m.csv", "Key,en,fr\ngreeting,Hello,Bonjour\n");

    let output = csvstrings(temp_dir.path()).arg("m.csv").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not enough arguments"));
    assert!(!temp_dir.path().join("en.lproj").exists());
}

#[test]
fn test_csv_without_language_columns_fails() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "csvstrings.toml", CONFIG);
    write(temp_dir.path(), "m.csv", "Key,State,Klingon\nhello,,nuqneH\n");

    let output = csvstrings(temp_dir.path()).arg("m.csv").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no configured language column"));
}

#[test]
fn test_unsupported_extension_is_usage_error() {
    let temp_dir = TempDir::new().unwrap();
    let output = csvstrings(temp_dir.path())
        .arg("strings.xml")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unsupported input"));
}

#[test]
fn test_csv_to_strings_with_config_file() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "csvstrings.toml", CONFIG);
    write(
        temp_dir.path(),
        "sheet.csv",
        "Key,State,English,French\nhello,,Hello,Bonjour\nlegal,Reviewed,Legal,Légal\nsame,,Same,\n",
    );

    let output = csvstrings(temp_dir.path()).arg("sheet.csv").output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Created 2 files"));

    let en = fs::read_to_string(temp_dir.path().join("en.lproj/Localizable.strings")).unwrap();
    let fr = fs::read_to_string(temp_dir.path().join("fr.lproj/Localizable.strings")).unwrap();
    assert_eq!(en, "\"hello\" = \"Hello\";\n\"same\" = \"Same\";\n");
    assert_eq!(fr, "\"hello\" = \"Bonjour\";\n\"same\" = \"Same\";\n");
}

#[test]
fn test_explicit_config_path() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "conf/custom.toml", CONFIG);
    write(temp_dir.path(), "sheet.csv", "Key,State,English\nhello,,Hello\n");

    let output = csvstrings(temp_dir.path())
        .args(["--config", "conf/custom.toml", "sheet.csv"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(temp_dir.path().join("en.lproj/Localizable.strings").exists());
}

#[test]
fn test_missing_explicit_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "sheet.csv", "Key,English\nhello,Hello\n");

    let output = csvstrings(temp_dir.path())
        .args(["-c", "absent.toml", "sheet.csv"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_strings_to_csv_without_config() {
    let temp_dir = TempDir::new().unwrap();
    write(
        temp_dir.path(),
        "en.lproj/Localizable.strings",
        "\"greeting\" = \"Hello\";\n\"ok\" = \"OK\";\n",
    );
    write(
        temp_dir.path(),
        "fr.lproj/Localizable.strings",
        "\"greeting\" = \"Bonjour\";\n\"ok\" = \"OK\";\n",
    );

    let output = csvstrings(temp_dir.path())
        .args(["en.lproj/Localizable.strings", "fr.lproj/Localizable.strings"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let csv = fs::read_to_string(temp_dir.path().join("Localizable.csv")).unwrap();
    assert_eq!(csv, "Key,en,fr\ngreeting,Hello,Bonjour\nok,OK,\n");
}

#[test]
fn test_strings_to_csv_expands_globs() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "csvstrings.toml", CONFIG);
    write(
        temp_dir.path(),
        "en.lproj/Localizable.strings",
        "\"greeting\" = \"Hello\";\n",
    );
    write(
        temp_dir.path(),
        "fr.lproj/Localizable.strings",
        "\"greeting\" = \"Bonjour\";\n",
    );

    let output = csvstrings(temp_dir.path())
        .arg("*.lproj/Localizable.strings")
        .output()
        .unwrap();
    assert!(output.status.success());

    let csv = fs::read_to_string(temp_dir.path().join("Localizable.csv")).unwrap();
    assert_eq!(csv, "Key,English,French\ngreeting,Hello,Bonjour\n");
}

#[test]
fn test_no_arguments_uses_configured_locales() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "csvstrings.toml", CONFIG);
    write(
        temp_dir.path(),
        "en.lproj/Localizable.strings",
        "\"greeting\" = \"Hello\";\n",
    );
    write(
        temp_dir.path(),
        "fr.lproj/Localizable.strings",
        "\"greeting\" = \"Salut\";\n",
    );

    let output = csvstrings(temp_dir.path()).output().unwrap();
    assert!(output.status.success());
    let csv = fs::read_to_string(temp_dir.path().join("Localizable.csv")).unwrap();
    assert_eq!(csv, "Key,English,French\ngreeting,Hello,Salut\n");
}

#[test]
fn test_missing_strings_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = csvstrings(temp_dir.path())
        .arg("de.lproj/Localizable.strings")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(!temp_dir.path().join("Localizable.csv").exists());
}

#[test]
fn test_logfile_and_verbose() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "csvstrings.toml", CONFIG);
    write(temp_dir.path(), "sheet.csv", "Key,State,English\nhello,,Hello\n");

    let output = csvstrings(temp_dir.path())
        .args(["-v", "-l", "run.log", "sheet.csv"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let log = fs::read_to_string(temp_dir.path().join("run.log")).unwrap();
    assert!(!log.is_empty());
    assert!(log.contains("DEBUG"));
}
