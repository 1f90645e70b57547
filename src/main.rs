//! Host-side helper: `cargo run` builds the WASM bundle into `static/pkg`
//! and serves `static/` locally for previewing the sky background.
//!
//! `SKY_PORT` overrides the port (default 8000); `SKY_SKIP_WASM=1` serves
//! whatever bundle is already there.

use std::env;
use std::io;
use std::process::{Command, ExitCode, Stdio};

const DEFAULT_PORT: u16 = 8000;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("preview failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> io::Result<()> {
    if env::var_os("SKY_SKIP_WASM").is_none() {
        build_bundle()?;
    }

    let port = env::var("SKY_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);

    println!("Serving static/ at http://127.0.0.1:{port} …");
    let status = Command::new("python3")
        .args(["-m", "http.server", &port.to_string(), "--directory", "static"])
        .stdout(Stdio::null())
        .status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("http server exited with {status}")))
    }
}

fn build_bundle() -> io::Result<()> {
    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => Ok(()),
        Ok(st) => Err(io::Error::other(format!("wasm-pack finished with {st}"))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            eprintln!(
                "wasm-pack not found in PATH (https://rustwasm.github.io/wasm-pack/); \
                 serving the existing bundle."
            );
            Ok(())
        }
        Err(e) => Err(e),
    }
}
