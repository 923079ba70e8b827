//! Backend discovery.
//!
//! Two layouts are recognised, checked in order:
//! - `backend/main.py`: a script run through the configured interpreter
//! - `assets/backend/backend[.exe]`: a bundled executable run directly

use std::fmt;
use std::path::{Path, PathBuf};

/// How the backend is launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendLaunch {
    /// Source entry point handed to the interpreter.
    Script(PathBuf),
    /// Self-contained executable.
    Binary(PathBuf),
}

impl fmt::Display for BackendLaunch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendLaunch::Script(path) => write!(f, "script {}", path.display()),
            BackendLaunch::Binary(path) => write!(f, "binary {}", path.display()),
        }
    }
}

fn binary_name() -> &'static str {
    if cfg!(windows) {
        "backend.exe"
    } else {
        "backend"
    }
}

/// Every location searched under `root`, script first.
pub fn candidate_paths(root: &Path) -> [PathBuf; 2] {
    [
        root.join("backend").join("main.py"),
        root.join("assets").join("backend").join(binary_name()),
    ]
}

/// Find the backend under `root`, preferring the script layout.
pub fn locate_backend(root: &Path) -> Option<BackendLaunch> {
    let [script, binary] = candidate_paths(root);
    if script.is_file() {
        return Some(BackendLaunch::Script(script));
    }
    if binary.is_file() {
        return Some(BackendLaunch::Binary(binary));
    }
    None
}
