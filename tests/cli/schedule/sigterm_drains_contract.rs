#![cfg(unix)]

use crate::harness::TestContext;
use std::io::{BufRead, BufReader, Read};
use std::process::Command;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn sigterm_stops_scheduler_gracefully() {
    let ctx = TestContext::new();
    ctx.init();

    let mut child = ctx.spawn(&["schedule", "--drain-timeout", "2"]);
    let stderr = child.stderr.take().expect("stderr is piped");
    let (lines_tx, lines_rx) = mpsc::channel();
    let reader = thread::spawn(move || {
        for line in BufReader::new(stderr).lines().map_while(Result::ok) {
            let _ = lines_tx.send(line);
        }
    });

    let deadline = Instant::now() + Duration::from_secs(20);
    let mut running = false;
    while !running && Instant::now() < deadline {
        match lines_rx.recv_timeout(Duration::from_millis(200)) {
            Ok(line) => running = line.contains("scheduler running"),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }
    if !running {
        let _ = child.kill();
        panic!("scheduler did not report running");
    }
    // Give the signal listeners time to install after the runner starts.
    thread::sleep(Duration::from_millis(500));

    let kill = Command::new("kill")
        .args(["-TERM", &child.id().to_string()])
        .status()
        .expect("Failed to run kill");
    assert!(kill.success());

    let status = child.wait().expect("Failed to wait for dataflow");
    let mut stdout = String::new();
    child.stdout.take().expect("stdout is piped").read_to_string(&mut stdout).unwrap();
    reader.join().unwrap();

    assert!(status.success(), "expected clean exit, got {:?}", status);
    assert!(stdout.contains("Scheduler stopped"), "stdout: {}", stdout);
}
