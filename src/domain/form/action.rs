use std::time::Instant;

use serde::Serialize;

/// Visible status of an action button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum ActionStatus {
    Idle,
    Running,
    Succeeded,
    Failed(String),
}

impl ActionStatus {
    /// Button text for this status, given the action's idle label.
    pub fn presentation(&self, idle_label: &str) -> String {
        match self {
            ActionStatus::Idle => idle_label.to_string(),
            ActionStatus::Running => "Working…".to_string(),
            ActionStatus::Succeeded => "Copied!".to_string(),
            ActionStatus::Failed(message) => format!("Error: {}", message),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ActionStatus::Idle)
    }
}

/// Per-action runtime state owned by the controller.
#[derive(Debug, Clone)]
pub struct ActionState {
    pub status: ActionStatus,
    /// Derived by validation; false while not idle.
    pub enabled: bool,
    pub correlation_id: Option<String>,
    /// When a Succeeded/Failed label reverts to Idle.
    pub revert_at: Option<Instant>,
    /// Re-invocation is refused until this instant.
    pub cooldown_until: Option<Instant>,
}

impl Default for ActionState {
    fn default() -> Self {
        Self {
            status: ActionStatus::Idle,
            enabled: false,
            correlation_id: None,
            revert_at: None,
            cooldown_until: None,
        }
    }
}

impl ActionState {
    pub fn cooling_down(&self, now: Instant) -> bool {
        self.cooldown_until.is_some_and(|until| now < until)
    }

    pub fn revert_due(&self, now: Instant) -> bool {
        self.revert_at.is_some_and(|at| now >= at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn presentation_per_status() {
        assert_eq!(ActionStatus::Idle.presentation("Go"), "Go");
        assert_eq!(ActionStatus::Running.presentation("Go"), "Working…");
        assert_eq!(ActionStatus::Succeeded.presentation("Go"), "Copied!");
        assert_eq!(ActionStatus::Failed("boom".into()).presentation("Go"), "Error: boom");
    }

    #[test]
    fn cooldown_window_is_exclusive_at_end() {
        let now = Instant::now();
        let state = ActionState {
            cooldown_until: Some(now + Duration::from_millis(10)),
            ..ActionState::default()
        };
        assert!(state.cooling_down(now));
        assert!(!state.cooling_down(now + Duration::from_millis(10)));
    }
}
