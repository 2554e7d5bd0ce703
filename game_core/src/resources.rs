use crate::components::Side;
use crate::params::Params;

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f32,  // Delta time for this step
    pub now: f32, // Total elapsed time
}

impl Time {
    pub fn new(dt: f32, now: f32) -> Self {
        Self { dt, now }
    }

    /// Multiplier applied to per-tick velocities
    pub fn tick_factor(&self) -> f32 {
        self.dt / Params::TICK_DT
    }
}

impl Default for Time {
    fn default() -> Self {
        Self {
            dt: Params::TICK_DT,
            now: 0.0,
        }
    }
}

/// A goal signalled by the scoring system: the side that scored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Goal {
    pub scorer: Side,
}

/// Final result of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Side),
    Draw,
}

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub left: u32,  // player 1
    pub right: u32, // player 2
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scores only move through a goal signal
    pub fn record(&mut self, goal: Goal) {
        match goal.scorer {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn outcome(&self) -> Outcome {
        if self.left > self.right {
            Outcome::Winner(Side::Left)
        } else if self.right > self.left {
            Outcome::Winner(Side::Right)
        } else {
            Outcome::Draw
        }
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::from_entropy())
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Named audio cues emitted by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    WallCollision,
    PaddleCollision,
    Goal,
    Start,
}

/// Events that occurred during this tick, in causal order
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub cues: Vec<Cue>,
    pub goal: Option<Goal>, // latest goal since the last clear
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cues.clear();
        self.goal = None;
    }

    pub fn push(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    pub fn ball_hit_wall(&self) -> bool {
        self.cues.contains(&Cue::WallCollision)
    }

    pub fn ball_hit_paddle(&self) -> bool {
        self.cues.contains(&Cue::PaddleCollision)
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, Cue> {
        self.cues.drain(..)
    }
}

/// Countdown clock, ticking once per real second independent of the tick rate
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchClock {
    pub remaining: u32, // whole seconds
    elapsed: f32,       // partial second carried between frames
}

impl MatchClock {
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            elapsed: 0.0,
        }
    }

    /// Feed real elapsed time. Returns true when the clock reaches zero.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.remaining == 0 {
            return true;
        }
        self.elapsed += dt.max(0.0);
        while self.elapsed >= 1.0 && self.remaining > 0 {
            self.elapsed -= 1.0;
            self.remaining -= 1;
        }
        self.remaining == 0
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_record() {
        let mut score = Score::new();
        score.record(Goal { scorer: Side::Left });
        score.record(Goal { scorer: Side::Right });
        score.record(Goal { scorer: Side::Right });
        assert_eq!(score.left, 1);
        assert_eq!(score.right, 2);
        assert_eq!(score.get(Side::Right), 2);
    }

    #[test]
    fn test_score_outcome() {
        let mut score = Score::new();
        assert_eq!(score.outcome(), Outcome::Draw);
        score.record(Goal { scorer: Side::Left });
        assert_eq!(score.outcome(), Outcome::Winner(Side::Left));
        score.record(Goal { scorer: Side::Right });
        score.record(Goal { scorer: Side::Right });
        assert_eq!(score.outcome(), Outcome::Winner(Side::Right));
    }

    #[test]
    fn test_events_clear() {
        let mut events = Events::new();
        events.push(Cue::WallCollision);
        events.push(Cue::PaddleCollision);
        events.goal = Some(Goal { scorer: Side::Left });

        events.clear();

        assert!(!events.ball_hit_wall());
        assert!(!events.ball_hit_paddle());
        assert!(events.goal.is_none());
    }

    #[test]
    fn test_events_drain_keeps_order() {
        let mut events = Events::new();
        events.push(Cue::PaddleCollision);
        events.push(Cue::Goal);
        let drained: Vec<Cue> = events.drain().collect();
        assert_eq!(drained, vec![Cue::PaddleCollision, Cue::Goal]);
        assert!(events.cues.is_empty());
    }

    #[test]
    fn test_clock_decrements_once_per_second() {
        let mut clock = MatchClock::new(60);
        for _ in 0..59 {
            assert!(!clock.advance(1.0 / 60.0));
        }
        assert_eq!(clock.remaining, 60);
        clock.advance(1.0 / 60.0 + 1e-4);
        assert_eq!(clock.remaining, 59);
    }

    #[test]
    fn test_clock_independent_of_frame_rate() {
        let mut fast = MatchClock::new(10);
        let mut slow = MatchClock::new(10);
        for _ in 0..16 {
            fast.advance(0.125);
        }
        for _ in 0..4 {
            slow.advance(0.5);
        }
        assert_eq!(fast.remaining, 8);
        assert_eq!(slow.remaining, 8);
    }

    #[test]
    fn test_clock_expires_at_zero() {
        let mut clock = MatchClock::new(2);
        assert!(!clock.advance(1.5));
        assert!(clock.advance(0.5));
        assert!(clock.is_expired());
        assert!(clock.advance(5.0));
        assert_eq!(clock.remaining, 0);
    }

    #[test]
    fn test_time_tick_factor() {
        assert!((Time::default().tick_factor() - 1.0).abs() < 1e-6);
        assert!((Time::new(Params::TICK_DT * 2.0, 0.0).tick_factor() - 2.0).abs() < 1e-6);
    }
}
