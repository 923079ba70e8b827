//! Backend supervision against real child processes.

#![cfg(unix)]

use std::fs;
use std::time::{Duration, Instant};

use webui_launcher::backend::{BackendError, BackendManager, BackendStatus};

mod common;

#[tokio::test]
async fn backend_receives_port_and_host() {
    let root = tempfile::tempdir().unwrap();
    common::write_script_backend(
        root.path(),
        r#"echo "$PORT $HOST" > "$(dirname "$0")/env.out"
exec sleep 30
"#,
    );
    let config = common::backend_config(root.path());
    let port = config.port;

    let mut manager = BackendManager::new(config);
    manager.start().await.expect("backend should start");
    assert!(manager.is_healthy());
    assert!(manager.status().pid().is_some());

    let env_file = root.path().join("backend/env.out");
    assert!(common::eventually(Duration::from_secs(5), || env_file.exists()).await);
    let written = fs::read_to_string(&env_file).unwrap();
    assert_eq!(written.trim(), format!("{port} 127.0.0.1"));

    manager.stop().await;
    assert_eq!(manager.status(), BackendStatus::Stopped);
    assert!(!manager.is_healthy());
}

#[tokio::test]
async fn exit_within_grace_period_fails_start() {
    let root = tempfile::tempdir().unwrap();
    common::write_script_backend(root.path(), "exit 3\n");
    let mut config = common::backend_config(root.path());
    config.startup_grace_ms = 5_000;

    let mut manager = BackendManager::new(config);
    let started = Instant::now();
    let err = manager.start().await.unwrap_err();

    assert!(matches!(err, BackendError::ExitedDuringStartup { code: Some(3) }));
    assert!(started.elapsed() < Duration::from_secs(4), "failure should not wait out the grace period");
    assert_eq!(manager.status(), BackendStatus::Exited { code: Some(3) });
}

#[tokio::test]
async fn spawn_failure_is_reported() {
    let root = tempfile::tempdir().unwrap();
    common::write_script_backend(root.path(), "exec sleep 30\n");
    let mut config = common::backend_config(root.path());
    config.interpreter = "/nonexistent/interpreter".into();

    let mut manager = BackendManager::new(config);
    let err = manager.start().await.unwrap_err();
    assert!(matches!(err, BackendError::Spawn { .. }));
    assert_eq!(manager.status(), BackendStatus::NotStarted);
}

#[tokio::test]
async fn second_start_is_rejected_while_running() {
    let root = tempfile::tempdir().unwrap();
    common::write_script_backend(root.path(), "exec sleep 30\n");

    let mut manager = BackendManager::new(common::backend_config(root.path()));
    manager.start().await.unwrap();
    assert!(matches!(manager.start().await, Err(BackendError::AlreadyRunning)));

    manager.stop().await;
}

#[tokio::test]
async fn crash_after_startup_resolves_exited() {
    let root = tempfile::tempdir().unwrap();
    common::write_script_backend(root.path(), "sleep 0.5\nexit 7\n");

    let mut manager = BackendManager::new(common::backend_config(root.path()));
    manager.start().await.unwrap();
    assert!(manager.is_healthy());

    let status = tokio::time::timeout(Duration::from_secs(10), manager.exited())
        .await
        .expect("backend should exit on its own");
    assert_eq!(status, BackendStatus::Exited { code: Some(7) });
    assert!(!manager.is_healthy());

    // Stopping an already exited backend keeps the exit status.
    manager.stop().await;
    assert_eq!(manager.status(), BackendStatus::Exited { code: Some(7) });
}

#[tokio::test]
async fn stop_is_idempotent_and_restart_works() {
    let root = tempfile::tempdir().unwrap();
    common::write_script_backend(root.path(), "exec sleep 30\n");

    let mut manager = BackendManager::new(common::backend_config(root.path()));
    manager.start().await.unwrap();
    let first_pid = manager.status().pid();

    manager.stop().await;
    manager.stop().await;
    assert_eq!(manager.status(), BackendStatus::Stopped);

    manager.start().await.unwrap();
    assert!(manager.is_healthy());
    assert_ne!(manager.status().pid(), first_pid);
    manager.stop().await;
}

#[tokio::test]
async fn stop_does_not_count_as_exit() {
    let root = tempfile::tempdir().unwrap();
    common::write_script_backend(root.path(), "exec sleep 30\n");

    let mut manager = BackendManager::new(common::backend_config(root.path()));
    manager.start().await.unwrap();
    let exited = manager.exited();
    manager.stop().await;

    let waited = tokio::time::timeout(Duration::from_millis(200), exited).await;
    assert!(waited.is_err());
}
