//! Host-side helper: `cargo run` builds the WASM bundle into `static/pkg`
//! with wasm-pack and serves `static/` on a local HTTP port.
//!
//! `FESTIVAL_VIZ_PORT` overrides the default port (8000).

use std::env;
use std::process::{Command, Stdio};

fn main() {
    // Only meaningful on non-wasm targets.
    if env::var("TARGET").unwrap_or_default() == "wasm32-unknown-unknown" {
        return;
    }

    let port = env::var("FESTIVAL_VIZ_PORT").unwrap_or_else(|_| "8000".to_string());

    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args([
            "build",
            "--release",
            "--target",
            "web",
            "--out-dir",
            "static/pkg",
        ])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/).");
            std::process::exit(1);
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH. Skipping wasm build; the site may serve stale artifacts.");
        }
    }

    println!("Serving static/ at http://127.0.0.1:{port} …");
    let status = Command::new("python3")
        .args(["-m", "http.server", &port, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .status();

    match status {
        Ok(st) if st.success() => {}
        Ok(st) => {
            eprintln!("http server exited with {st}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("failed to start http server (python3 required): {e}");
            std::process::exit(1);
        }
    }
}
