/// Deferred, idempotent listener wiring
use log::debug;

/// When a wiring attempt happens relative to page load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The script is running while the document may still be parsing
    ScriptRun,
    /// The document has finished loading; this is the last chance
    DocumentLoaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireState {
    #[default]
    Unwired,
    /// Elements were missing; waiting for the document to load
    Deferred,
    Wired,
    /// Elements never showed up; the component stays off
    Inactive,
}

/// Guard that lets listeners be attached at most once
#[derive(Debug, Default)]
pub struct WireOnce {
    state: WireState,
}

impl WireOnce {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WireState {
        self.state
    }

    /// Look the elements up and wire them if this attempt is still allowed.
    ///
    /// `lookup` is not called once the guard has settled.
    pub fn attempt<T>(
        &mut self,
        phase: Phase,
        lookup: impl FnOnce() -> Option<T>,
        wire: impl FnOnce(T),
    ) -> WireState {
        match (self.state, phase) {
            (WireState::Wired | WireState::Inactive, _) => return self.state,
            (WireState::Deferred, Phase::ScriptRun) => return self.state,
            _ => {}
        }

        self.state = match (lookup(), phase) {
            (Some(elements), _) => {
                wire(elements);
                WireState::Wired
            }
            (None, Phase::ScriptRun) => WireState::Deferred,
            (None, Phase::DocumentLoaded) => WireState::Inactive,
        };
        debug!("Wiring attempt at {:?}: {:?}", phase, self.state);
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wires_immediately_when_present() {
        let mut guard = WireOnce::new();
        let mut wired = 0;
        let state = guard.attempt(Phase::ScriptRun, || Some(()), |_| wired += 1);
        assert_eq!(state, WireState::Wired);
        assert_eq!(wired, 1);

        // The load-time retry must not wire a second time
        let state = guard.attempt(Phase::DocumentLoaded, || Some(()), |_| wired += 1);
        assert_eq!(state, WireState::Wired);
        assert_eq!(wired, 1);
    }

    #[test]
    fn test_defers_then_wires_once_after_load() {
        let mut guard = WireOnce::new();
        let mut wired = Vec::new();

        let state = guard.attempt(Phase::ScriptRun, || None::<&str>, |el| wired.push(el));
        assert_eq!(state, WireState::Deferred);
        assert!(wired.is_empty());

        let state = guard.attempt(Phase::DocumentLoaded, || Some("overlay"), |el| wired.push(el));
        assert_eq!(state, WireState::Wired);

        let state = guard.attempt(Phase::DocumentLoaded, || Some("overlay"), |el| wired.push(el));
        assert_eq!(state, WireState::Wired);
        assert_eq!(wired, vec!["overlay"]);
    }

    #[test]
    fn test_inactive_when_still_missing_after_load() {
        let mut guard = WireOnce::new();
        guard.attempt(Phase::ScriptRun, || None::<()>, |_| {});
        let state = guard.attempt(Phase::DocumentLoaded, || None::<()>, |_| {});
        assert_eq!(state, WireState::Inactive);

        let mut looked_up = false;
        let state = guard.attempt(
            Phase::DocumentLoaded,
            || {
                looked_up = true;
                Some(())
            },
            |_| {},
        );
        assert_eq!(state, WireState::Inactive);
        assert!(!looked_up);
    }

    #[test]
    fn test_repeated_script_run_while_deferred() {
        let mut guard = WireOnce::new();
        guard.attempt(Phase::ScriptRun, || None::<()>, |_| {});
        let state = guard.attempt(Phase::ScriptRun, || Some(()), |_| {});
        assert_eq!(state, WireState::Deferred);
    }
}
