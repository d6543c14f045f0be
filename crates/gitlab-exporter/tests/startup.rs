//! Process-level startup and shutdown of the exporter binary.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::process::{Child, Command, Output, Stdio};
use std::thread::sleep;
use std::time::{Duration, Instant};

const BIN: &str = env!("CARGO_BIN_EXE_gitlab-exporter");

/// Address nothing listens on.
fn free_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

fn exporter(vars: &[(&str, &str)], listen: SocketAddr) -> Command {
    let mut cmd = Command::new(BIN);
    cmd.env_clear()
        .env("GITLAB_EXPORTER_LISTEN", listen.to_string())
        .env("NO_COLOR", "1")
        .envs(vars.iter().copied())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

fn wait_with_deadline(child: &mut Child, deadline: Duration) -> Option<std::process::ExitStatus> {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if let Some(status) = child.try_wait().unwrap() {
            return Some(status);
        }
        sleep(Duration::from_millis(50));
    }
    None
}

fn run_to_exit(mut cmd: Command) -> Output {
    let mut child = cmd.spawn().unwrap();
    if wait_with_deadline(&mut child, Duration::from_secs(10)).is_none() {
        child.kill().unwrap();
        panic!("exporter kept running without required configuration");
    }
    child.wait_with_output().unwrap()
}

fn assert_refused_to_start(out: &Output, missing: &str, listen: SocketAddr) {
    let logs = format!(
        "{}{}",
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
    assert!(!out.status.success(), "exit status {:?}\n{logs}", out.status);
    assert!(logs.contains(&format!("environment variable {missing} is not set")), "{logs}");
    assert!(!logs.contains("gitlab-exporter starting"), "{logs}");
    assert!(TcpStream::connect(listen).is_err());
}

#[test]
fn missing_token_never_starts_server() {
    let listen = free_addr();
    let out = run_to_exit(exporter(&[("GITLAB_URL", "http://127.0.0.1:1")], listen));
    assert_refused_to_start(&out, "GITLAB_TOKEN", listen);
}

#[test]
fn missing_url_never_starts_server() {
    let listen = free_addr();
    let out = run_to_exit(exporter(&[("GITLAB_TOKEN", "t")], listen));
    assert_refused_to_start(&out, "GITLAB_URL", listen);
}

#[test]
fn empty_environment_never_starts_server() {
    let listen = free_addr();
    let out = run_to_exit(exporter(&[], listen));
    assert_refused_to_start(&out, "GITLAB_TOKEN", listen);
}

#[cfg(unix)]
#[test]
fn non_unicode_token_is_reported_as_invalid() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let listen = free_addr();
    let mut cmd = exporter(&[("GITLAB_URL", "http://127.0.0.1:1")], listen);
    cmd.env("GITLAB_TOKEN", OsStr::from_bytes(b"tok\xff"));
    let out = run_to_exit(cmd);

    let logs = String::from_utf8_lossy(&out.stdout).into_owned();
    assert!(!out.status.success());
    assert!(logs.contains("GITLAB_TOKEN is not valid unicode"), "{logs}");
    assert!(!logs.contains("is not set"), "{logs}");
}

#[cfg(unix)]
#[test]
fn sigterm_shuts_down_cleanly() {
    let listen = free_addr();
    let upstream = format!("http://{}", free_addr());
    let mut child = exporter(&[("GITLAB_TOKEN", "t"), ("GITLAB_URL", &upstream)], listen)
        .spawn()
        .unwrap();

    let start = Instant::now();
    let mut stream = loop {
        match TcpStream::connect(listen) {
            Ok(s) => break s,
            Err(_) if start.elapsed() < Duration::from_secs(10) => {
                sleep(Duration::from_millis(50))
            }
            Err(e) => {
                child.kill().unwrap();
                panic!("exporter never listened on {listen}: {e}");
            }
        }
    };

    write!(
        stream,
        "GET /metrics HTTP/1.1\r\nHost: {listen}\r\nConnection: close\r\n\r\n"
    )
    .unwrap();
    let mut resp = String::new();
    stream.read_to_string(&mut resp).unwrap();
    assert!(resp.starts_with("HTTP/1.1 200"), "{resp}");
    assert!(resp.contains("gitlab_scrape_status"), "{resp}");

    let kill = Command::new("kill")
        .args(["-TERM", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(kill.success());

    let status = wait_with_deadline(&mut child, Duration::from_secs(10));
    if status.is_none() {
        child.kill().unwrap();
    }
    assert_eq!(status.map(|s| s.code()), Some(Some(0)));
}
