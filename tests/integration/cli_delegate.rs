//! End-to-end tests: run the td-import binary against a fake runtime.

#![cfg(unix)]

use super::test_utils::{process_lock, Sandbox};
use std::ffi::OsStr;
use std::process::{Command, Output};

fn run<S: AsRef<OsStr>>(
    sandbox: &Sandbox,
    config: &std::path::Path,
    args: &[S],
    envs: &[(&str, &str)],
) -> Output {
    let bin = env!("CARGO_BIN_EXE_td-import");
    let mut command = Command::new(bin);
    command
        .env_remove("HTTP_PROXY")
        .env_remove("TD_API_KEY")
        .env_remove("TD_API_SERVER")
        .env_remove("TD_IMPORT_LOG")
        .env("FAKE_ARGS_FILE", &sandbox.args_file)
        .arg("--config")
        .arg(config)
        .args(args);
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output().unwrap()
}

#[test]
fn test_delegate_receives_full_command_line() {
    let _guard = process_lock();
    let sandbox = Sandbox::new();
    let config = sandbox.write_config(
        "apikey = \"1/abc\"\nendpoint = \"api.example.com:8080\"\nsecure = false",
    );

    let output = run(
        &sandbox,
        &config,
        &["import:prepare", "--format", "csv", "data.csv"],
        &[("HTTP_PROXY", "proxyhost:3128")],
    );
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let jar = sandbox.delegate_home.join("td-import.jar");
    assert_eq!(
        sandbox.recorded_args().unwrap(),
        vec![
            "-Xmx1024m".to_string(),
            "-Dtd.api.server.scheme=http://".to_string(),
            "-Dtd.api.server.host=api.example.com".to_string(),
            "-Dtd.api.server.port=8080".to_string(),
            "-Dhttp.proxyHost=proxyhost".to_string(),
            "-Dhttp.proxyPort=3128".to_string(),
            "-Dtd.api.key=1/abc".to_string(),
            "-cp".to_string(),
            jar.to_string_lossy().into_owned(),
            "com.treasure_data.td_import.BulkImportCommand".to_string(),
            "prepare".to_string(),
            "--format".to_string(),
            "csv".to_string(),
            "data.csv".to_string(),
        ]
    );
}

#[test]
fn test_non_utf8_argument_reaches_delegate() {
    use std::os::unix::ffi::OsStrExt;

    let _guard = process_lock();
    let sandbox = Sandbox::new();
    let config = sandbox.write_config("apikey = \"k\"");

    let file = OsStr::from_bytes(b"caf\xe9.csv");
    let args = [OsStr::new("import:prepare"), OsStr::new("--format"), file];
    let output = run(&sandbox, &config, &args, &[]);
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let recorded = sandbox.recorded_raw_args().unwrap();
    assert_eq!(recorded.last().map(Vec::as_slice), Some(&b"caf\xe9.csv"[..]));
    assert!(!recorded.iter().any(|a| a.as_slice() == b"--help"));
}

#[test]
fn test_single_argument_selects_help() {
    let _guard = process_lock();
    let sandbox = Sandbox::new();
    let config = sandbox.write_config("apikey = \"k\"");

    let output = run(&sandbox, &config, &["import:upload", "part.msgpack.gz"], &[]);
    assert!(output.status.success());

    let args = sandbox.recorded_args().unwrap();
    assert_eq!(&args[args.len() - 2..], &["upload", "--help"]);
    assert!(!args.iter().any(|a| a == "part.msgpack.gz"));
}

#[test]
fn test_cli_flags_override_config() {
    let _guard = process_lock();
    let sandbox = Sandbox::new();
    let config = sandbox.write_config("apikey = \"file-key\"");

    let output = run(
        &sandbox,
        &config,
        &[
            "-k",
            "flag-key",
            "-e",
            "api.example.com",
            "--insecure",
            "import:auto",
            "a",
            "b",
        ],
        &[],
    );
    assert!(output.status.success());

    let args = sandbox.recorded_args().unwrap();
    assert!(args.contains(&"-Dtd.api.key=flag-key".to_string()));
    assert!(args.contains(&"-Dtd.api.server.scheme=http://".to_string()));
    assert!(args.contains(&"-Dtd.api.server.port=80".to_string()));
}

#[test]
fn test_delegate_failure_reports_status_and_log_file() {
    let _guard = process_lock();
    let sandbox = Sandbox::new();
    let config = sandbox.write_config("apikey = \"k\"");

    let output = run(
        &sandbox,
        &config,
        &["import:upload", "session", "part.gz"],
        &[("FAKE_RUN_EXIT", "7")],
    );
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Bulk Import returned error 7"), "stderr={stderr}");
    assert!(stderr.contains("td-bulk-import.log"), "stderr={stderr}");
}

#[test]
fn test_failed_preflight_prints_guidance_and_never_launches() {
    let _guard = process_lock();
    let sandbox = Sandbox::new();
    let config = sandbox.write_config("apikey = \"k\"");

    let output = run(
        &sandbox,
        &config,
        &["import:prepare", "a.csv", "b.csv"],
        &[("FAKE_PROBE_EXIT", "1")],
    );
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Java is not installed"), "stderr={stderr}");
    assert!(stderr.contains("bulk_import"), "stderr={stderr}");
    assert!(sandbox.recorded_args().is_none());
}

#[test]
fn test_missing_runtime_prints_guidance() {
    let _guard = process_lock();
    let sandbox = Sandbox::new();
    let config_path = sandbox.dir.path().join("missing-runtime.toml");
    std::fs::write(
        &config_path,
        format!(
            "[account]\napikey = \"k\"\n\n[import]\nruntime = \"/nonexistent/java\"\ndelegate_home = {:?}\n",
            sandbox.delegate_home.to_string_lossy()
        ),
    )
    .unwrap();

    let output = run(&sandbox, &config_path, &["import:auto", "a", "b"], &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Java is not installed"));
}

#[test]
fn test_https_proxy_is_rejected_before_launch() {
    let _guard = process_lock();
    let sandbox = Sandbox::new();
    let config = sandbox.write_config("apikey = \"k\"");

    let output = run(
        &sandbox,
        &config,
        &["import:prepare", "a.csv", "b.csv"],
        &[("HTTP_PROXY", "https://proxyhost:3128")],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("'http' protocol"));
    assert!(sandbox.recorded_args().is_none());
}

#[test]
fn test_missing_delegate_jar() {
    let _guard = process_lock();
    let sandbox = Sandbox::new();
    std::fs::remove_file(sandbox.delegate_home.join("td-import.jar")).unwrap();
    let config = sandbox.write_config("apikey = \"k\"");

    let output = run(&sandbox, &config, &["import:prepare", "a", "b"], &[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("delegate not found"));
    assert!(stderr.contains("Install td-import.jar"));
    assert!(sandbox.recorded_args().is_none());
}

#[test]
fn test_unreadable_config_is_reported_once() {
    let _guard = process_lock();
    let sandbox = Sandbox::new();
    let config = sandbox.dir.path().join("broken.toml");
    std::fs::write(&config, "[account\napikey = ").unwrap();

    let output = run(&sandbox, &config, &["import:prepare", "a", "b"], &[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Failed to load configuration").count(), 1, "stderr={stderr}");
    assert!(sandbox.recorded_args().is_none());
}
