//! Pre-match settings chosen in the menu

use crate::components::Side;
use crate::control::ControlMode;
use crate::params::Params;

/// Display name with bounded length, edited one character at a time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(name: &str) -> Self {
        let mut player = Self::default();
        for c in name.chars() {
            player.push_char(c);
        }
        player
    }

    /// Append a printable character. Returns false when full or not printable.
    pub fn push_char(&mut self, c: char) -> bool {
        if c.is_control() || self.0.chars().count() >= Params::NAME_MAX_LEN {
            return false;
        }
        self.0.push(c);
        true
    }

    pub fn backspace(&mut self) {
        self.0.pop();
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Length of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchDuration {
    #[default]
    OneMinute,
    ThreeMinutes,
    FiveMinutes,
}

impl MatchDuration {
    pub const ALL: [MatchDuration; 3] = [
        MatchDuration::OneMinute,
        MatchDuration::ThreeMinutes,
        MatchDuration::FiveMinutes,
    ];

    pub fn seconds(self) -> u32 {
        match self {
            MatchDuration::OneMinute => Params::MATCH_DURATIONS[0],
            MatchDuration::ThreeMinutes => Params::MATCH_DURATIONS[1],
            MatchDuration::FiveMinutes => Params::MATCH_DURATIONS[2],
        }
    }
}

/// Names, duration and control schemes for the next match
#[derive(Debug, Clone, Default)]
pub struct MatchSettings {
    pub names: [PlayerName; 2],
    pub duration: MatchDuration,
    pub modes: [ControlMode; 2],
}

impl MatchSettings {
    /// Name shown for a side; blank names fall back to "Player 1"/"Player 2"
    pub fn display_name(&self, side: Side) -> String {
        let name = &self.names[side.index()];
        if name.is_blank() {
            format!("Player {}", side.index() + 1)
        } else {
            name.as_str().to_string()
        }
    }

    pub fn mode(&self, side: Side) -> ControlMode {
        self.modes[side.index()]
    }
}
