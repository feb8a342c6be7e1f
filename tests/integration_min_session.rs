// Drives the compiled binary through a PTY, covering the real event loop
// and crossterm input handling.
//
// Unix-only and ignored by default since it needs a pseudo terminal.
// Run manually via: `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn minimal_session_completes_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config = dir.path().join("config.json");
    let log = dir.path().join("klava.log");

    let bin = assert_cmd::cargo::cargo_bin("klava");
    let cmd = format!(
        "{} --length 1 --alphabet digits --seed 3 --config {} --log-file {}",
        bin.display(),
        config.display(),
        log.display()
    );

    let mut p = spawn(cmd)?;
    std::thread::sleep(Duration::from_millis(200));

    // start, then every digit; only the expected one counts and later ones are ignored
    p.send("\r")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("0123456789")?;
    std::thread::sleep(Duration::from_millis(200));

    // dismiss the notice, then quit
    p.send("\x1b")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("\x1b")?;

    p.expect("Nice! Your speed")?;
    p.expect(Eof)?;

    assert!(config.exists(), "length should be saved on exit");
    Ok(())
}
