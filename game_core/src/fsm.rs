//! Match phase state machine
//!
//! Menu → Playing ⇄ Paused, Playing → Ended → Menu. Return-to-menu and
//! reset are accepted from every phase. Rejected actions leave the phase
//! untouched.

/// Match phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Menu,
    Playing,
    Paused,
    Ended,
}

/// Actions that trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchAction {
    Start,
    TogglePause,
    ReturnToMenu,
    ClockExpired,
    Reset,
}

/// Result of a phase transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    success: bool,
    from_phase: Phase,
    to_phase: Phase,
    action: MatchAction,
}

impl TransitionResult {
    pub fn success(&self) -> bool {
        self.success
    }

    #[allow(clippy::wrong_self_convention)]
    pub fn from_phase(&self) -> Phase {
        self.from_phase
    }

    pub fn to_phase(&self) -> Phase {
        self.to_phase
    }

    pub fn action(&self) -> MatchAction {
        self.action
    }
}

/// Match Finite State Machine
#[derive(Debug, Clone, Default)]
pub struct MatchFsm {
    phase: Phase,
}

impl MatchFsm {
    pub fn new() -> Self {
        Self { phase: Phase::Menu }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Check if a transition is valid
    pub fn can_transition(&self, action: MatchAction) -> bool {
        self.next_phase(action).is_some()
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: MatchAction) -> TransitionResult {
        let from_phase = self.phase;

        if let Some(next) = self.next_phase(action) {
            self.phase = next;
            log::debug!("Phase {:?} -> {:?} on {:?}", from_phase, next, action);
            TransitionResult {
                success: true,
                from_phase,
                to_phase: next,
                action,
            }
        } else {
            TransitionResult {
                success: false,
                from_phase,
                to_phase: from_phase,
                action,
            }
        }
    }

    fn next_phase(&self, action: MatchAction) -> Option<Phase> {
        match (self.phase, action) {
            (Phase::Menu, MatchAction::Start) => Some(Phase::Playing),

            (Phase::Playing, MatchAction::TogglePause) => Some(Phase::Paused),
            (Phase::Paused, MatchAction::TogglePause) => Some(Phase::Playing),

            (Phase::Playing, MatchAction::ClockExpired) => Some(Phase::Ended),

            // From anywhere
            (_, MatchAction::ReturnToMenu | MatchAction::Reset) => Some(Phase::Menu),

            // Invalid transition
            _ => None,
        }
    }

    /// Whether the simulation and clock should advance
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PHASES: [Phase; 4] = [Phase::Menu, Phase::Playing, Phase::Paused, Phase::Ended];
    const ALL_ACTIONS: [MatchAction; 5] = [
        MatchAction::Start,
        MatchAction::TogglePause,
        MatchAction::ReturnToMenu,
        MatchAction::ClockExpired,
        MatchAction::Reset,
    ];

    #[test]
    fn test_initial_phase() {
        let fsm = MatchFsm::new();
        assert_eq!(fsm.phase(), Phase::Menu);
        assert!(!fsm.is_running());
    }

    #[test]
    fn test_match_flow() {
        let mut fsm = MatchFsm::new();
        assert!(fsm.transition(MatchAction::Start).success());
        assert!(fsm.is_running());

        fsm.transition(MatchAction::TogglePause);
        assert_eq!(fsm.phase(), Phase::Paused);
        assert!(!fsm.is_running());

        fsm.transition(MatchAction::TogglePause);
        assert_eq!(fsm.phase(), Phase::Playing);

        fsm.transition(MatchAction::ClockExpired);
        assert!(fsm.is_ended());

        fsm.transition(MatchAction::ReturnToMenu);
        assert_eq!(fsm.phase(), Phase::Menu);
    }

    #[test]
    fn test_invalid_transition() {
        let mut fsm = MatchFsm::new();
        let result = fsm.transition(MatchAction::TogglePause);
        assert!(!result.success());
        assert_eq!(result.to_phase(), Phase::Menu);
        assert_eq!(fsm.phase(), Phase::Menu);
    }

    #[test]
    fn test_clock_does_not_end_a_paused_match() {
        let mut fsm = MatchFsm::new();
        fsm.transition(MatchAction::Start);
        fsm.transition(MatchAction::TogglePause);
        assert!(!fsm.can_transition(MatchAction::ClockExpired));
    }

    #[test]
    fn test_every_action_leaves_a_valid_phase() {
        for phase in ALL_PHASES {
            for action in ALL_ACTIONS {
                let mut fsm = MatchFsm { phase };
                let result = fsm.transition(action);
                assert_eq!(result.from_phase(), phase);
                assert_eq!(result.to_phase(), fsm.phase());
                if !result.success() {
                    assert_eq!(fsm.phase(), phase);
                }
            }
        }
    }

    #[test]
    fn test_return_to_menu_from_anywhere() {
        for phase in ALL_PHASES {
            let mut fsm = MatchFsm { phase };
            assert!(fsm.transition(MatchAction::ReturnToMenu).success());
            assert_eq!(fsm.phase(), Phase::Menu);

            let mut fsm = MatchFsm { phase };
            assert!(fsm.transition(MatchAction::Reset).success());
            assert_eq!(fsm.phase(), Phase::Menu);
        }
    }
}
