//! Boundaries to the presentation and sound collaborators

use glam::Vec2;

use crate::fsm::Phase;
use crate::resources::{Cue, Outcome, Score};

/// Fire-and-forget sound output
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Receives one snapshot per advanced frame. Nothing flows back into the simulation.
pub trait RenderTarget {
    fn present(&mut self, frame: &Frame<'_>);
}

/// Drawable state of one paddle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleView {
    pub pos: Vec2, // top-left
    pub size: Vec2,
}

/// Drawable state of the ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallView {
    pub pos: Vec2, // top-left
    pub size: f32,
    pub angle: f32,
}

/// Everything a presentation layer needs to draw one frame
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub phase: Phase,
    pub ball: Option<BallView>,
    pub paddles: [Option<PaddleView>; 2],
    pub score: Score,
    pub remaining_secs: u32,
    pub names: [&'a str; 2],
    pub is_calibrating: bool,
    /// Set once the clock has run out
    pub outcome: Option<Outcome>,
}

/// Discards every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: Cue) {}
}

/// Records cues in order, for tests and replays
#[derive(Debug, Clone, Default)]
pub struct CueLog(pub Vec<Cue>);

impl AudioSink for CueLog {
    fn play(&mut self, cue: Cue) {
        self.0.push(cue);
    }
}
