//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

use webui_launcher::config::{BackendConfig, LauncherConfig};

/// Ask the OS for a port that is free right now.
pub fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Write `backend/main.py` under `root`. Tests run it through `sh`.
pub fn write_script_backend(root: &Path, body: &str) {
    fs::create_dir_all(root.join("backend")).unwrap();
    fs::write(root.join("backend/main.py"), body).unwrap();
}

/// Minimal built frontend.
pub fn write_frontend(dir: &Path) {
    fs::create_dir_all(dir.join("assets")).unwrap();
    fs::write(dir.join("index.html"), "<!doctype html><div id=app></div>").unwrap();
    fs::write(dir.join("assets/main.js"), "boot()").unwrap();
}

/// Size of the asset written by [`write_large_asset`]. Far larger than the
/// loopback socket buffers, so an unread download keeps the server busy.
pub const LARGE_ASSET_LEN: usize = 32 * 1024 * 1024;

/// Write `assets/large.bin` under an asset directory.
pub fn write_large_asset(dir: &Path) {
    fs::create_dir_all(dir.join("assets")).unwrap();
    fs::write(dir.join("assets/large.bin"), vec![b'x'; LARGE_ASSET_LEN]).unwrap();
}

/// Backend script that records its pid next to itself, then idles.
pub const PID_RECORDING_BACKEND: &str = "echo $$ > \"$(dirname \"$0\")/pid\"\nexec sleep 30\n";

/// Pid written by [`PID_RECORDING_BACKEND`].
pub fn recorded_pid(root: &Path) -> u32 {
    fs::read_to_string(root.join("backend/pid"))
        .unwrap()
        .trim()
        .parse()
        .unwrap()
}

/// Whether a process with `pid` still exists.
pub fn process_alive(pid: u32) -> bool {
    Command::new("kill")
        .args(["-0", &pid.to_string()])
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

pub fn backend_config(root: &Path) -> BackendConfig {
    BackendConfig {
        root: root.to_path_buf(),
        interpreter: "sh".into(),
        port: free_port(),
        startup_grace_ms: 150,
        stop_timeout_secs: 5,
        ..BackendConfig::default()
    }
}

/// Launcher config with both sides on loopback and fresh ports.
pub fn launcher_config(root: &Path, assets: &Path) -> LauncherConfig {
    let mut config = LauncherConfig::default();
    config.frontend.host = "127.0.0.1".into();
    config.frontend.port = free_port();
    config.frontend.assets_dir = assets.to_path_buf();
    config.backend = backend_config(root);
    config.shutdown.grace_secs = 2;
    config
}

/// Poll until `check` holds or `timeout` passes.
pub async fn eventually<F>(timeout: Duration, mut check: F) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    check()
}

/// Poll a URL until it answers at all.
pub async fn wait_for_http(client: &reqwest::Client, url: &str) -> reqwest::Response {
    for _ in 0..100 {
        if let Ok(res) = client.get(url).send().await {
            return res;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("{url} never became reachable");
}
