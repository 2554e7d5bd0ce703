use hecs::World;

use crate::components::{Ball, Paddle, PaddleIntent};
use crate::config::Config;
use crate::control::{ControlContext, Controller, KeyState, PaddleInput};
use crate::field::Field;
use crate::resources::GameRng;

/// Ask each paddle's controller for this tick's movement and store it as the paddle's intent
pub fn apply_controllers(
    world: &mut World,
    controllers: &mut [Controller; 2],
    keys: &[KeyState; 2],
    field: &Field,
    config: &Config,
    rng: &mut GameRng,
) {
    let ball = world.query_mut::<&Ball>().into_iter().map(|(_e, b)| *b).next();

    // Deterministic order: left paddle draws from the RNG first
    let mut paddles: Vec<(hecs::Entity, Paddle)> = world
        .query_mut::<&Paddle>()
        .into_iter()
        .map(|(e, p)| (e, *p))
        .collect();
    paddles.sort_by_key(|(_, p)| p.side.index());

    for (entity, paddle) in paddles {
        let side = paddle.side.index();
        let ctx = ControlContext {
            ball: ball.as_ref(),
            field,
            config,
            keys: keys[side],
        };
        let delta = controllers[side].compute_delta(&paddle, &ctx, rng);
        if let Ok(mut intent) = world.get::<&mut PaddleIntent>(entity) {
            intent.delta = delta;
        }
    }
}
