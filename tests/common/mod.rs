use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run the binary in `cwd` with `args`, feeding `stdin_json` on stdin.
/// Returns `(exit code, stdout, stderr)`.
pub fn run_cli_in(cwd: &Path, args: &[&str], stdin_json: &str) -> (i32, String, String) {
    run_cli_env(cwd, args, &[], stdin_json)
}

/// Like `run_cli_in`, with extra environment variables. `MEDIQ_LOG` is
/// cleared unless `envs` sets it.
#[allow(dead_code)]
pub fn run_cli_env(
    cwd: &Path,
    args: &[&str],
    envs: &[(&str, &str)],
    stdin_json: &str,
) -> (i32, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_mediq-normalizer"))
        .args(args)
        .current_dir(cwd)
        .env_remove("MEDIQ_LOG")
        .envs(envs.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn binary");

    // The binary may exit before reading stdin (e.g. on a usage error), so a
    // broken pipe here is not a test failure.
    if let Err(e) = child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(stdin_json.as_bytes())
    {
        assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe, "{e}");
    }

    let output = child.wait_with_output().unwrap();
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

/// Run the binary with `args` in an empty temp dir, so no preferences file
/// is picked up.
#[allow(dead_code)]
pub fn run_cli(args: &[&str], stdin_json: &str) -> (i32, String, String) {
    let dir = tempfile::tempdir().unwrap();
    run_cli_in(dir.path(), args, stdin_json)
}

/// Parse stdout as JSON, failing with the raw output on error.
#[allow(dead_code)]
pub fn stdout_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).unwrap_or_else(|e| panic!("invalid JSON ({e}): {stdout}"))
}

/// A response whose first detail carries the given CSV summary and tests.
#[allow(dead_code)]
pub fn response_with(summary_csv: serde_json::Value, tests: serde_json::Value) -> String {
    serde_json::json!({
        "sql_command": "SELECT * FROM diseases",
        "details": [{
            "disease_name": "Anemia",
            "summary_csv": summary_csv,
            "tests_details": tests
        }]
    })
    .to_string()
}
