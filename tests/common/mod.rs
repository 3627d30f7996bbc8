//! Shared helper for integration tests: run the compiled `tapewatch` binary
//! in a scratch working directory and capture a per-case transcript.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Captured outcome of one binary invocation.
pub struct CaseResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    /// Transcript of the invocation, for failure messages.
    pub log_path: PathBuf,
}

/// Run the binary with `args`, using `dir` as the working directory.
pub fn run_cli_case(dir: &Path, case_name: &str, args: &[&str]) -> CaseResult {
    run_cli_case_with_stdin(dir, case_name, args, None)
}

/// Run the binary with `args`, optionally piping `stdin` into it.
pub fn run_cli_case_with_stdin(
    dir: &Path,
    case_name: &str,
    args: &[&str],
    stdin: Option<&str>,
) -> CaseResult {
    let mut command = Command::new(env!("CARGO_BIN_EXE_tapewatch"));
    command
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });
    let mut child = command.spawn().expect("spawn tapewatch");
    if let Some(input) = stdin {
        child
            .stdin
            .take()
            .expect("stdin piped")
            .write_all(input.as_bytes())
            .expect("write stdin");
    }
    let output = child.wait_with_output().expect("wait for tapewatch");
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let log_path = dir.join(format!("{case_name}.transcript"));
    fs::write(
        &log_path,
        format!("args: {args:?}\n--- stdout ---\n{stdout}\n--- stderr ---\n{stderr}\n"),
    )
    .expect("write transcript");
    CaseResult {
        status: output.status,
        stdout,
        stderr,
        log_path,
    }
}
