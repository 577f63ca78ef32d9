use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn cfgparser_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cfgparser"));
    cmd.env_remove("RUST_LOG").arg("--linebreak").arg("lf");
    cmd
}

// ===========================================
// get / set / dump / sanitize
// ===========================================

#[test]
fn test_get_prints_value() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("app.ini");
    fs::write(&file, "[db]\nhost: localhost\n").unwrap();

    let output = cfgparser_cmd()
        .args(["get", "host", "--section", "db"])
        .arg(&file)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "localhost\n");
}

#[test]
fn test_get_later_file_wins_per_section() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("base.ini");
    let local = dir.path().join("local.ini");
    fs::write(&base, "[db]\nhost = a\nport = 1\n").unwrap();
    fs::write(&local, "[db]\nhost = b\n").unwrap();

    let host = cfgparser_cmd()
        .args(["get", "host", "-s", "db"])
        .arg(&base)
        .arg(&local)
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&host.stdout), "b\n");

    // The whole [db] section was replaced, so port is gone
    let port = cfgparser_cmd()
        .args(["get", "port", "-s", "db"])
        .arg(&base)
        .arg(&local)
        .output()
        .unwrap();
    assert!(!port.status.success());
    assert!(String::from_utf8_lossy(&port.stderr).contains("no option 'port'"));
}

#[test]
fn test_get_flat_later_file_wins_per_key() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("base.conf");
    let local = dir.path().join("local.conf");
    fs::write(&base, "host = a\nport = 1\n").unwrap();
    fs::write(&local, "host = b\n").unwrap();

    let port = cfgparser_cmd()
        .args(["--no-sections", "get", "port"])
        .arg(&base)
        .arg(&local)
        .output()
        .unwrap();

    assert!(port.status.success());
    assert_eq!(String::from_utf8_lossy(&port.stdout), "1\n");
}

#[test]
fn test_get_typed_and_fallback() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("app.ini");
    fs::write(&file, "[s]\nenabled = Yes\nport = 8080/tcp\n").unwrap();

    let enabled = cfgparser_cmd()
        .args(["get", "enabled", "-s", "s", "--type", "bool"])
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&enabled.stdout), "true\n");

    let port = cfgparser_cmd()
        .args(["get", "port", "-s", "s", "--type", "int"])
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&port.stdout), "8080\n");

    let timeout = cfgparser_cmd()
        .args(["get", "timeout", "-s", "s", "--fallback", "30"])
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&timeout.stdout), "30\n");
}

#[test]
fn test_get_missing_with_no_throw_logs() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("app.ini");
    fs::write(&file, "[s]\na = 1\n").unwrap();

    let output = cfgparser_cmd()
        .args(["--no-throw", "get", "b", "-s", "s"])
        .arg(&file)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no option 'b'"));
}

#[test]
fn test_set_updates_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("app.ini");
    fs::write(&file, "[db]\nhost = a\n").unwrap();

    let output = cfgparser_cmd()
        .args(["set"])
        .arg(&file)
        .args(["user", "admin", "--section", "auth"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "[db]\nhost = \"a\"\n[auth]\nuser = \"admin\"\n"
    );
}

#[test]
fn test_set_into_existing_default_section() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("app.ini");
    fs::write(&file, "[default]\na = 1\n[s]\nb = 2\n").unwrap();

    let output = cfgparser_cmd()
        .arg("set")
        .arg(&file)
        .args(["k", "v", "--section", "DEFAULT"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "[default]\na = \"1\"\nk = \"v\"\n[s]\nb = \"2\"\n"
    );
}

#[test]
fn test_set_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("missing.ini");

    let output = cfgparser_cmd()
        .arg("set")
        .arg(&file)
        .args(["k", "v"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
    assert!(!file.exists());
}

#[test]
fn test_dump_prints_canonical_form() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("app.ini");
    fs::write(&file, "# comment\n[s]\n  a: 1\n").unwrap();

    let output = cfgparser_cmd()
        .args(["--delimiter", ":", "dump"])
        .arg(&file)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "[s]\na: \"1\"\n");
}

#[test]
fn test_sanitize_prints_normalized_text() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("app.ini");
    fs::write(&file, "# see http://x\n  key: \"value\"\n").unwrap();

    let output = cfgparser_cmd().arg("sanitize").arg(&file).output().unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "; see http://x\nkey = value\n"
    );
}

// ===========================================
// fmt
// ===========================================

#[test]
fn test_fmt_rewrites_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("app.ini");
    fs::write(&file, "[s]\nk: v\n").unwrap();

    let output = cfgparser_cmd().arg("fmt").arg(&file).output().unwrap();

    assert!(output.status.success());
    assert_eq!(fs::read_to_string(&file).unwrap(), "[s]\nk = \"v\"\n");
    assert!(String::from_utf8_lossy(&output.stdout).contains("Fixed:"));
}

#[test]
fn test_fmt_keeps_file_with_comments() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("app.ini");
    let original = "; keep me\n[db]\nhost = h ; primary\n";
    fs::write(&file, original).unwrap();

    let output = cfgparser_cmd().arg("fmt").arg(&file).output().unwrap();

    assert!(!output.status.success());
    assert_eq!(fs::read_to_string(&file).unwrap(), original);
    assert!(String::from_utf8_lossy(&output.stdout).contains("--strip-comments"));
}

#[test]
fn test_fmt_strip_comments_rewrites() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("app.ini");
    fs::write(&file, "; keep me\n[db]\nhost = h ; primary\n").unwrap();

    let output = cfgparser_cmd()
        .args(["fmt", "--strip-comments"])
        .arg(&file)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(fs::read_to_string(&file).unwrap(), "[db]\nhost = \"h\"\n");
}

#[test]
fn test_fmt_check_mode_no_modification() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("app.ini");
    fs::write(&file, "[s]\nk: v\n").unwrap();

    let output = cfgparser_cmd()
        .args(["fmt", "--check"])
        .arg(&file)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert_eq!(fs::read_to_string(&file).unwrap(), "[s]\nk: v\n");
}

#[test]
fn test_fmt_check_canonical_file_passes() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("app.ini");
    fs::write(&file, "[s]\nk = \"v\"\n").unwrap();

    let output = cfgparser_cmd()
        .args(["fmt", "--check"])
        .arg(&file)
        .output()
        .unwrap();

    assert!(output.status.success());
}

#[test]
fn test_fmt_diff_mode_shows_changes() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("app.ini");
    fs::write(&file, "[s]\nk: v\n").unwrap();

    let output = cfgparser_cmd()
        .args(["fmt", "--check", "--diff"])
        .arg(&file)
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("-k: v"));
    assert!(stdout.contains("+k = \"v\""));
}

#[test]
fn test_fmt_quiet_mode_output() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("app.ini");
    fs::write(&file, "[s]\nk: v\n").unwrap();

    let output = cfgparser_cmd()
        .args(["fmt", "--quiet"])
        .arg(&file)
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("app.ini"));
    assert!(!stdout.contains("Fixed:"));
}

#[test]
fn test_fmt_parse_error_fails() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("bad.ini");
    fs::write(&file, "[broken\n").unwrap();

    let output = cfgparser_cmd().arg("fmt").arg(&file).output().unwrap();

    assert!(!output.status.success());
    assert_eq!(fs::read_to_string(&file).unwrap(), "[broken\n");
    assert!(String::from_utf8_lossy(&output.stdout).contains("unterminated section header"));
}

#[test]
fn test_fmt_directory_recursive_only_ini_files() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.ini"), "x: 1\n").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/b.cfg"), "y: 2\n").unwrap();
    fs::write(dir.path().join("notes.txt"), "z: 3\n").unwrap();

    cfgparser_cmd()
        .args(["--no-sections", "fmt"])
        .arg(dir.path())
        .output()
        .unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("a.ini")).unwrap(),
        "x = \"1\"\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("sub/b.cfg")).unwrap(),
        "y = \"2\"\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("notes.txt")).unwrap(),
        "z: 3\n"
    );
}

#[test]
fn test_fmt_skips_binary_files() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("blob.ini");
    fs::write(&file, b"a = 1\x00").unwrap();

    let output = cfgparser_cmd().arg("fmt").arg(&file).output().unwrap();

    assert!(output.status.success());
    assert_eq!(fs::read(&file).unwrap(), b"a = 1\x00");
}

// ===========================================
// Settings file
// ===========================================

#[test]
fn test_init_creates_settings_file() {
    let dir = TempDir::new().unwrap();

    let output = cfgparser_cmd()
        .current_dir(dir.path())
        .arg("init")
        .output()
        .unwrap();

    assert!(output.status.success());
    let content = fs::read_to_string(dir.path().join("cfgparser.toml")).unwrap();
    assert!(content.contains("[settings]"));
}

#[test]
fn test_init_fails_if_settings_exist() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("cfgparser.toml"), "existing").unwrap();

    let output = cfgparser_cmd()
        .current_dir(dir.path())
        .arg("init")
        .output()
        .unwrap();

    assert!(!output.status.success());
}

#[test]
fn test_settings_file_changes_output() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("cfgparser.toml"),
        "[settings]\nspace_around_delimiters = false\n",
    )
    .unwrap();
    let file = dir.path().join("app.ini");
    fs::write(&file, "[s]\nk = v\n").unwrap();

    let output = cfgparser_cmd()
        .current_dir(dir.path())
        .arg("dump")
        .arg(&file)
        .output()
        .unwrap();

    assert_eq!(String::from_utf8_lossy(&output.stdout), "[s]\nk=\"v\"\n");
}

#[test]
fn test_cli_overrides_settings_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("cfgparser.toml"),
        "[settings]\ndelimiter = \":\"\n",
    )
    .unwrap();
    let file = dir.path().join("app.ini");
    fs::write(&file, "[s]\nk = v\n").unwrap();

    let from_file = cfgparser_cmd()
        .current_dir(dir.path())
        .arg("dump")
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&from_file.stdout), "[s]\nk: \"v\"\n");

    let overridden = cfgparser_cmd()
        .current_dir(dir.path())
        .args(["--delimiter", "=", "dump"])
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&overridden.stdout), "[s]\nk = \"v\"\n");
}
