use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallState {
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

impl CallState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => CallState::InFlight,
            2 => CallState::Succeeded,
            3 => CallState::Failed,
            _ => CallState::Idle,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            CallState::Idle => 0,
            CallState::InFlight => 1,
            CallState::Succeeded => 2,
            CallState::Failed => 3,
        }
    }

    pub fn is_settled(self) -> bool {
        matches!(self, CallState::Succeeded | CallState::Failed)
    }
}

/// Shared view of where a call is in its lifecycle.
///
/// Clones observe the same call. Once settled the state no longer changes.
#[derive(Clone, Debug)]
pub struct CallStatus {
    state: Arc<AtomicU8>,
}

impl CallStatus {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(AtomicU8::new(CallState::Idle.as_u8())),
        }
    }

    pub fn state(&self) -> CallState {
        CallState::from_u8(self.state.load(Ordering::SeqCst))
    }

    pub fn is_settled(&self) -> bool {
        self.state().is_settled()
    }

    pub(crate) fn begin(&self) {
        self.transition(CallState::Idle, CallState::InFlight);
    }

    /// Returns false if the call had already settled.
    pub(crate) fn settle(&self, outcome: CallState) -> bool {
        debug_assert!(outcome.is_settled());
        let current = self.state();
        if current.is_settled() {
            return false;
        }
        self.transition(current, outcome)
    }

    fn transition(&self, from: CallState, to: CallState) -> bool {
        let moved = self
            .state
            .compare_exchange(from.as_u8(), to.as_u8(), Ordering::SeqCst, Ordering::SeqCst)
            .is_ok();
        if moved {
            log::debug!("Call {from:?} -> {to:?}");
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let status = CallStatus::new();
        assert_eq!(status.state(), CallState::Idle);
        assert!(!status.is_settled());
    }

    #[test]
    fn test_begin_then_settle() {
        let status = CallStatus::new();
        status.begin();
        assert_eq!(status.state(), CallState::InFlight);
        assert!(status.settle(CallState::Succeeded));
        assert_eq!(status.state(), CallState::Succeeded);
    }

    #[test]
    fn test_settles_once() {
        let status = CallStatus::new();
        status.begin();
        assert!(status.settle(CallState::Failed));
        assert!(!status.settle(CallState::Succeeded));
        assert_eq!(status.state(), CallState::Failed);
    }

    #[test]
    fn test_can_fail_before_starting() {
        let status = CallStatus::new();
        assert!(status.settle(CallState::Failed));
        status.begin();
        assert_eq!(status.state(), CallState::Failed);
    }

    #[test]
    fn test_clones_share_state() {
        let status = CallStatus::new();
        let observer = status.clone();
        status.begin();
        assert_eq!(observer.state(), CallState::InFlight);
    }
}
