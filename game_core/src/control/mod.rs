//! Paddle input sources.
//!
//! Every paddle is driven by exactly one [`Controller`]; the paddle itself
//! stays mode-agnostic and only ever sees the per-tick delta the controller
//! produces.

pub mod autonomous;
pub mod external;
pub mod manual;

pub use autonomous::*;
pub use external::*;
pub use manual::*;

use glam::Vec2;

use crate::components::{Ball, Paddle};
use crate::config::Config;
use crate::field::Field;
use crate::resources::GameRng;

/// Read-only view of the world handed to a controller each tick
pub struct ControlContext<'a> {
    pub ball: Option<&'a Ball>,
    pub field: &'a Field,
    pub config: &'a Config,
    pub keys: KeyState,
}

impl ControlContext<'_> {
    /// Delta requested directly by the held keys
    pub fn raw_delta(&self) -> Vec2 {
        self.keys.delta(self.config.player_speed)
    }
}

/// A source of paddle movement
pub trait PaddleInput {
    fn compute_delta(
        &mut self,
        paddle: &Paddle,
        ctx: &ControlContext<'_>,
        rng: &mut GameRng,
    ) -> Vec2;
}

/// Control scheme selected for a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlMode {
    #[default]
    Manual,
    Autonomous,
    ExternalSensor,
}

/// The active input source of one paddle
pub enum Controller {
    Manual(ManualInput),
    Autonomous(AutonomousInput),
    ExternalSensor(ExternalSensorInput),
}

impl Controller {
    pub fn mode(&self) -> ControlMode {
        match self {
            Controller::Manual(_) => ControlMode::Manual,
            Controller::Autonomous(_) => ControlMode::Autonomous,
            Controller::ExternalSensor(_) => ControlMode::ExternalSensor,
        }
    }

    pub fn sensor(&self) -> Option<&ExternalSensorInput> {
        match self {
            Controller::ExternalSensor(input) => Some(input),
            _ => None,
        }
    }

    pub fn sensor_mut(&mut self) -> Option<&mut ExternalSensorInput> {
        match self {
            Controller::ExternalSensor(input) => Some(input),
            _ => None,
        }
    }

    /// Release background resources. Safe to call on any controller, any number of times.
    pub fn shutdown(&mut self) {
        if let Controller::ExternalSensor(input) = self {
            input.stop();
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Controller::Manual(ManualInput)
    }
}

impl PaddleInput for Controller {
    fn compute_delta(
        &mut self,
        paddle: &Paddle,
        ctx: &ControlContext<'_>,
        rng: &mut GameRng,
    ) -> Vec2 {
        match self {
            Controller::Manual(input) => input.compute_delta(paddle, ctx, rng),
            Controller::Autonomous(input) => input.compute_delta(paddle, ctx, rng),
            Controller::ExternalSensor(input) => input.compute_delta(paddle, ctx, rng),
        }
    }
}
