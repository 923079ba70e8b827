//! Backend process state.
//!
//! # State Transitions
//! ```text
//! NotStarted → Running → Exited   (process ended by itself)
//!                      → Stopped  (launcher killed it)
//! ```

use serde::Serialize;

/// Observable state of the supervised process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BackendStatus {
    NotStarted,
    Running { pid: Option<u32> },
    /// `code` is `None` when the process was terminated by a signal.
    Exited { code: Option<i32> },
    Stopped,
}

impl BackendStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, BackendStatus::Running { .. })
    }

    /// The process is gone and will not come back.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BackendStatus::Exited { .. } | BackendStatus::Stopped)
    }

    pub fn label(&self) -> &'static str {
        match self {
            BackendStatus::NotStarted => "not_started",
            BackendStatus::Running { .. } => "running",
            BackendStatus::Exited { .. } => "exited",
            BackendStatus::Stopped => "stopped",
        }
    }

    pub fn pid(&self) -> Option<u32> {
        match self {
            BackendStatus::Running { pid } => *pid,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(!BackendStatus::NotStarted.is_terminal());
        assert!(!BackendStatus::Running { pid: Some(1) }.is_terminal());
        assert!(BackendStatus::Exited { code: Some(0) }.is_terminal());
        assert!(BackendStatus::Stopped.is_terminal());
    }

    #[test]
    fn serializes_with_state_tag() {
        let json = serde_json::to_value(BackendStatus::Running { pid: Some(42) }).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "running", "pid": 42 }));

        let json = serde_json::to_value(BackendStatus::Stopped).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "stopped" }));
    }
}
