//! Keyboard-driven paddle control

use glam::Vec2;

use super::{ControlContext, PaddleInput};
use crate::components::Paddle;
use crate::resources::GameRng;

/// Which keys drive a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBindings {
    Wasd,
    Arrows,
}

/// Held directional keys for one paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl KeyState {
    /// Update from a key event. Returns false for keys outside `bindings`.
    pub fn apply(&mut self, bindings: KeyBindings, key: &str, pressed: bool) -> bool {
        let slot = match (bindings, key) {
            (KeyBindings::Wasd, "w" | "W") | (KeyBindings::Arrows, "ArrowUp") => &mut self.up,
            (KeyBindings::Wasd, "s" | "S") | (KeyBindings::Arrows, "ArrowDown") => &mut self.down,
            (KeyBindings::Wasd, "a" | "A") | (KeyBindings::Arrows, "ArrowLeft") => &mut self.left,
            (KeyBindings::Wasd, "d" | "D") | (KeyBindings::Arrows, "ArrowRight") => {
                &mut self.right
            }
            _ => return false,
        };
        *slot = pressed;
        true
    }

    /// Per-tick delta. Diagonals are not normalized.
    pub fn delta(&self, speed: f32) -> Vec2 {
        let mut delta = Vec2::ZERO;
        if self.up {
            delta.y -= speed;
        }
        if self.down {
            delta.y += speed;
        }
        if self.left {
            delta.x -= speed;
        }
        if self.right {
            delta.x += speed;
        }
        delta
    }
}

/// Direct key-state control
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualInput;

impl PaddleInput for ManualInput {
    fn compute_delta(
        &mut self,
        _paddle: &Paddle,
        ctx: &ControlContext<'_>,
        _rng: &mut GameRng,
    ) -> Vec2 {
        ctx.raw_delta()
    }
}
