//! End-to-end tests for the `blackhole` binary.
//!
//! Each test runs the real executable inside a scratch directory, so the
//! `hole` it creates never touches the source tree.

#![cfg(target_os = "linux")]

use std::fs;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::sleep;
use std::time::{Duration, Instant};

use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;

const TIMEOUT: Duration = Duration::from_secs(10);

fn spawn_in(dir: &Path) -> Child {
    Command::new(env!("CARGO_BIN_EXE_blackhole"))
        .current_dir(dir)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap()
}

fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + TIMEOUT;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        sleep(Duration::from_millis(20));
    }
    cond()
}

fn wait_for_exit(child: &mut Child) -> ExitStatus {
    let deadline = Instant::now() + TIMEOUT;
    loop {
        if let Some(status) = child.try_wait().unwrap() {
            return status;
        }
        if Instant::now() >= deadline {
            child.kill().ok();
            panic!("blackhole did not exit in time");
        }
        sleep(Duration::from_millis(20));
    }
}

/// Start the binary, feed it one file, then stop it with `signal`.
fn eat_then_stop(signal: Signal) {
    let tmp = tempfile::tempdir().unwrap();
    let hole = tmp.path().join("hole");
    let mut child = spawn_in(tmp.path());

    assert!(wait_until(|| hole.is_dir()), "hole was never created");

    let staged = tmp.path().join("snack");
    fs::write(&staged, vec![0u8; 4096]).unwrap();
    fs::rename(&staged, hole.join("snack")).unwrap();
    assert!(
        wait_until(|| !hole.join("snack").exists()),
        "snack was never eaten"
    );

    kill(Pid::from_raw(child.id() as i32), signal).unwrap();
    let status = wait_for_exit(&mut child);

    assert!(status.success(), "{signal:?} gave {status}");
    assert!(!hole.exists(), "hole survived {signal:?}");
}

#[test]
fn sigterm_removes_hole_and_exits_zero() {
    eat_then_stop(Signal::SIGTERM);
}

#[test]
fn sigint_removes_hole_and_exits_zero() {
    eat_then_stop(Signal::SIGINT);
}

#[test]
fn sighup_removes_hole_and_exits_zero() {
    eat_then_stop(Signal::SIGHUP);
}

#[test]
fn sigquit_removes_hole_and_exits_zero() {
    eat_then_stop(Signal::SIGQUIT);
}

#[test]
fn sigabrt_removes_hole_and_exits_zero() {
    eat_then_stop(Signal::SIGABRT);
}

#[test]
fn existing_contents_are_eaten_on_first_cycle() {
    let tmp = tempfile::tempdir().unwrap();
    let hole = tmp.path().join("hole");
    fs::create_dir_all(hole.join("leftovers/deep")).unwrap();
    fs::write(hole.join("leftovers/deep/crumb"), b"crumb").unwrap();

    let mut child = spawn_in(tmp.path());
    assert!(wait_until(|| hole.is_dir()
        && fs::read_dir(&hole).map(|mut d| d.next().is_none()).unwrap_or(false)));

    kill(Pid::from_raw(child.id() as i32), Signal::SIGTERM).unwrap();
    assert!(wait_for_exit(&mut child).success());
}

#[test]
fn unopenable_target_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("hole"), b"squatter").unwrap();

    let mut child = spawn_in(tmp.path());
    let status = wait_for_exit(&mut child);

    assert!(!status.success());
    assert!(tmp.path().join("hole").is_file());
}
