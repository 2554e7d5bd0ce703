//! CPU opponent
//!
//! Strategy:
//! 1. Ball close to a side wall: hold the lane and back off upward.
//! 2. Otherwise chase a short extrapolation of the ball, with a prediction
//!    error that grows with the ball's vertical speed.
//! 3. Scale the chase by a small gain and a random momentum, cap it, and
//!    occasionally jitter or skip a tick entirely.
//!
//! The error terms are deliberate: the CPU is meant to be beatable.

use glam::Vec2;
use rand::Rng;

use super::{ControlContext, PaddleInput};
use crate::components::{Ball, Paddle};
use crate::config::Config;
use crate::field::Field;
use crate::resources::GameRng;

#[derive(Debug, Clone, Copy, Default)]
pub struct AutonomousInput;

impl AutonomousInput {
    /// Point the paddle center should head for this tick
    fn target(paddle: &Paddle, ball: &Ball, field: &Field, config: &Config, rng: &mut GameRng) -> Vec2 {
        let cpu = &config.cpu;
        let center = paddle.center();

        let near_wall = ball.left() <= field.rect.min.x + cpu.wall_margin
            || ball.right() >= field.rect.max.x - cpu.wall_margin;
        if near_wall {
            return Vec2::new(center.x, center.y - cpu.retreat_offset);
        }

        let speed_factor = ball.vel.x.abs() / config.ball_speed;
        let mut predicted = ball.center() + ball.vel * speed_factor * cpu.lookahead_ticks;
        predicted.y += rng.0.gen_range(-1.0..=1.0f32) * ball.vel.y.abs() * cpu.error_scale;
        predicted
    }
}

impl PaddleInput for AutonomousInput {
    fn compute_delta(
        &mut self,
        paddle: &Paddle,
        ctx: &ControlContext<'_>,
        rng: &mut GameRng,
    ) -> Vec2 {
        let Some(ball) = ctx.ball else {
            return Vec2::ZERO;
        };
        let cpu = &ctx.config.cpu;

        let target = Self::target(paddle, ball, ctx.field, ctx.config, rng);
        let momentum = rng.0.gen_range(cpu.momentum_min..=cpu.momentum_max);
        let max_speed = ctx.config.cpu_max_speed();
        let mut delta = ((target - paddle.center()) * cpu.gain * momentum)
            .clamp(Vec2::splat(-max_speed), Vec2::splat(max_speed));

        if rng.0.gen_bool(cpu.jitter_chance) {
            delta += Vec2::new(
                rng.0.gen_range(-cpu.jitter..=cpu.jitter),
                rng.0.gen_range(-cpu.jitter..=cpu.jitter),
            );
        }

        // Reaction delay
        if rng.0.gen_bool(cpu.skip_chance) {
            return Vec2::ZERO;
        }

        delta
    }
}
