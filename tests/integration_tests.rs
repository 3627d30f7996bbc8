//! Integration tests driving the compiled `tapewatch` binary end to end:
//! CLI surface, startup validation, config round trips, and the operator
//! test-email path with an unreachable mail server.

mod common;

use tapewatch::core::config::Config;

#[test]
fn help_command_prints_usage() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = common::run_cli_case(dir.path(), "help_command_prints_usage", &["--help"]);
    assert!(
        result.status.success(),
        "expected success; log: {}",
        result.log_path.display()
    );
    assert!(
        result.stdout.contains("Usage: tapewatch"),
        "missing help banner; log: {}",
        result.log_path.display()
    );
}

#[test]
fn version_command_prints_version() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = common::run_cli_case(dir.path(), "version_command_prints_version", &["--version"]);
    assert!(
        result.status.success(),
        "expected success; log: {}",
        result.log_path.display()
    );
    assert!(
        result.stdout.contains("tapewatch"),
        "missing version output; log: {}",
        result.log_path.display()
    );
}

#[test]
fn check_without_config_fails_before_any_cycle() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = common::run_cli_case(dir.path(), "check_without_config", &["check"]);
    assert!(
        !result.status.success(),
        "expected failure; log: {}",
        result.log_path.display()
    );
    assert!(
        result.stderr.contains("TPW-1002"),
        "expected missing-config code on stderr; log: {}",
        result.log_path.display()
    );
    // No cycle may run when startup validation fails.
    assert!(
        !result.stdout.contains("check starting") && !result.stderr.contains("check starting"),
        "cycle ran despite config error; log: {}",
        result.log_path.display()
    );
    let diag = std::fs::read_to_string(dir.path().join("tapewatch.log")).expect("diagnostic log");
    assert!(
        diag.contains("TPW-1002"),
        "config error missing from diagnostic log; log: {}",
        result.log_path.display()
    );
}

#[test]
fn test_email_without_config_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = common::run_cli_case(dir.path(), "test_email_without_config", &["test-email"]);
    assert!(
        !result.status.success(),
        "expected failure; log: {}",
        result.log_path.display()
    );
    assert!(
        result.stderr.contains("TPW-1002"),
        "expected missing-config code; log: {}",
        result.log_path.display()
    );
}

#[test]
fn config_init_writes_file_and_show_redacts_password() {
    let dir = tempfile::tempdir().expect("tempdir");
    let init = common::run_cli_case(
        dir.path(),
        "config_init",
        &[
            "config",
            "init",
            "--smtp-server",
            "smtp.example.com",
            "--smtp-user",
            "ops@example.com",
            "--smtp-password",
            "hunter2",
            "--to-email",
            "admin@example.com",
        ],
    );
    assert!(
        init.status.success(),
        "init failed; log: {}",
        init.log_path.display()
    );

    let config = Config::load(&dir.path().join("tapewatch.json")).expect("written config loads");
    assert_eq!(config.smtp_port, 587);
    assert_eq!(config.from_email, "ops@example.com");
    assert_eq!(config.check_time, "08:00");

    let show = common::run_cli_case(dir.path(), "config_show", &["config", "show"]);
    assert!(
        show.status.success(),
        "show failed; log: {}",
        show.log_path.display()
    );
    assert!(
        show.stdout.contains("smtp.example.com"),
        "server missing from show output; log: {}",
        show.log_path.display()
    );
    assert!(
        !show.stdout.contains("hunter2"),
        "password leaked by show; log: {}",
        show.log_path.display()
    );
}

#[test]
fn config_init_requires_the_mandatory_flags() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = common::run_cli_case(
        dir.path(),
        "config_init_missing_flags",
        &["config", "init", "--smtp-server", "smtp.example.com"],
    );
    assert!(
        !result.status.success(),
        "expected clap to reject missing flags; log: {}",
        result.log_path.display()
    );
    assert!(
        !dir.path().join("tapewatch.json").exists(),
        "no config may be written on failure; log: {}",
        result.log_path.display()
    );
}

#[test]
fn setup_wizard_writes_config_from_prompts() {
    let dir = tempfile::tempdir().expect("tempdir");
    // server, port (default), user, password, from (default), to, time (default)
    let input = "smtp.example.com\n\nops@example.com\nsecret\n\nadmin@example.com\n\n";
    let result = common::run_cli_case_with_stdin(
        dir.path(),
        "setup_wizard",
        &["setup"],
        Some(input),
    );
    assert!(
        result.status.success(),
        "setup failed; log: {}",
        result.log_path.display()
    );
    let config = Config::load(&dir.path().join("tapewatch.json")).expect("written config loads");
    assert_eq!(config.smtp_server, "smtp.example.com");
    assert_eq!(config.smtp_port, 587);
    assert_eq!(config.from_email, "ops@example.com");
    assert_eq!(config.to_email, "admin@example.com");
    assert_eq!(config.check_time, "08:00");
}

#[test]
fn setup_wizard_rejects_incomplete_answers() {
    let dir = tempfile::tempdir().expect("tempdir");
    // Missing password and admin address.
    let input = "smtp.example.com\n\nops@example.com\n\n\n\n\n";
    let result = common::run_cli_case_with_stdin(
        dir.path(),
        "setup_wizard_incomplete",
        &["setup"],
        Some(input),
    );
    assert!(
        !result.status.success(),
        "expected validation failure; log: {}",
        result.log_path.display()
    );
    assert!(
        !dir.path().join("tapewatch.json").exists(),
        "no config may be written on failure; log: {}",
        result.log_path.display()
    );
}

#[test]
fn test_email_transport_failure_is_nonfatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    Config {
        smtp_server: "127.0.0.1".to_string(),
        smtp_port: 1,
        smtp_user: "ops@example.com".to_string(),
        smtp_password: "hunter2".to_string(),
        from_email: "ops@example.com".to_string(),
        to_email: "admin@example.com".to_string(),
        check_time: "08:00".to_string(),
    }
    .save(&dir.path().join("tapewatch.json"))
    .expect("seed config");

    let result = common::run_cli_case(dir.path(), "test_email_unreachable", &["test-email"]);
    assert!(
        result.status.success(),
        "transport failure must not change the exit status; log: {}",
        result.log_path.display()
    );
    assert!(
        result.stdout.contains("Test email failed"),
        "missing failure notice; log: {}",
        result.log_path.display()
    );
    assert!(
        result.stderr.contains("email send failed"),
        "missing transport error; log: {}",
        result.log_path.display()
    );
}

#[test]
fn completions_command_generates_shell_script() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = common::run_cli_case(
        dir.path(),
        "completions_bash",
        &["completions", "bash"],
    );
    assert!(
        result.status.success(),
        "expected success; log: {}",
        result.log_path.display()
    );
    assert!(
        result.stdout.contains("tapewatch"),
        "expected completion script contents; log: {}",
        result.log_path.display()
    );
}
