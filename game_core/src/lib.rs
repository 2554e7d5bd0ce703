pub mod components;
pub mod config;
pub mod control;
pub mod error;
pub mod field;
pub mod fsm;
pub mod game;
pub mod params;
pub mod resources;
pub mod sensor;
pub mod settings;
pub mod sinks;
pub mod systems;

pub use components::*;
pub use config::*;
pub use control::{ControlMode, Controller, KeyBindings, KeyState};
pub use error::*;
pub use field::*;
pub use fsm::*;
pub use game::*;
pub use params::*;
pub use resources::*;
pub use settings::*;
pub use sinks::*;

use hecs::World;
use systems::*;

/// Run one fixed tick of the simulation.
///
/// Order: controller input, paddle movement, ball integration, wall and
/// paddle collisions, then side walls and goals. A goal is credited and the
/// ball re-served before returning it. Cues accumulate in `events` until the
/// caller drains them.
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    time: &mut Time,
    field: &Field,
    config: &Config,
    controllers: &mut [Controller; 2],
    keys: &[KeyState; 2],
    score: &mut Score,
    events: &mut Events,
    rng: &mut GameRng,
) -> Option<Goal> {
    // 1. Controllers produce paddle intents
    apply_controllers(world, controllers, keys, field, config, rng);

    // 2. Move paddles based on intents
    move_paddles(world, time);

    // 3. Move ball
    move_ball(world, time);

    // 4. Top/bottom walls, then every paddle
    check_collisions(world, field, config, events, rng);

    // 5. Side walls and goal mouths
    let goal = check_scoring(world, field, config, events, rng);
    if let Some(goal) = goal {
        award_goal(world, goal, field, config, score, rng);
    }

    time.now += time.dt;
    goal
}

/// Helper to create a paddle entity at its kick-off position
pub fn create_paddle(
    world: &mut World,
    side: Side,
    field: &Field,
    config: &Config,
) -> Result<hecs::Entity, ConfigError> {
    let size = glam::Vec2::new(config.paddle_width, config.paddle_height);
    let paddle = Paddle::new(
        side,
        field.paddle_spawn(side, size),
        size,
        field.paddle_bounds(side),
    )?;
    Ok(world.spawn((paddle, PaddleIntent::new())))
}

/// Helper to create the ball entity; `pos` is its top-left corner
pub fn create_ball(
    world: &mut World,
    pos: glam::Vec2,
    vel: glam::Vec2,
    config: &Config,
) -> hecs::Entity {
    world.spawn((Ball::new(pos, vel, config.ball_size),))
}
