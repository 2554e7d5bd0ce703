use crate::{Ball, Paddle, PaddleIntent, Time};
use hecs::World;

/// Apply paddle movement based on intents
pub fn move_paddles(world: &mut World, time: &Time) {
    let factor = time.tick_factor();
    for (_entity, (paddle, intent)) in world.query_mut::<(&mut Paddle, &PaddleIntent)>() {
        if intent.delta != glam::Vec2::ZERO {
            paddle.move_by(intent.delta * factor);
        }
    }
}

/// Move ball based on velocity
pub fn move_ball(world: &mut World, time: &Time) {
    let factor = time.tick_factor();
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.integrate(factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, create_paddle, Config, Field, Params, Side};
    use glam::Vec2;

    #[test]
    fn test_paddle_moves_by_intent() {
        let mut world = World::new();
        let field = Field::default();
        let config = Config::new();
        let entity = create_paddle(&mut world, Side::Left, &field, &config).unwrap();
        world.get::<&mut PaddleIntent>(entity).unwrap().delta = Vec2::new(7.0, -7.0);

        move_paddles(&mut world, &Time::default());

        let paddle = *world.get::<&Paddle>(entity).unwrap();
        assert_eq!(paddle.pos, Vec2::new(157.0, 453.0));
    }

    #[test]
    fn test_paddle_stays_in_bounds_under_long_push() {
        let mut world = World::new();
        let field = Field::default();
        let config = Config::new();
        let entity = create_paddle(&mut world, Side::Right, &field, &config).unwrap();
        world.get::<&mut PaddleIntent>(entity).unwrap().delta = Vec2::new(-7.0, 7.0);

        for _ in 0..500 {
            move_paddles(&mut world, &Time::default());
        }

        let paddle = *world.get::<&Paddle>(entity).unwrap();
        assert_eq!(paddle.pos, Vec2::new(800.0, 870.0));
    }

    #[test]
    fn test_ball_moves_scaled_by_tick_factor() {
        let mut world = World::new();
        let config = Config::new();
        let entity = create_ball(&mut world, Vec2::new(775.0, 475.0), Vec2::new(8.0, 4.0), &config);

        move_ball(&mut world, &Time::default());
        assert_eq!(world.get::<&Ball>(entity).unwrap().pos, Vec2::new(783.0, 479.0));

        // A double-length step covers twice the distance
        move_ball(&mut world, &Time::new(Params::TICK_DT * 2.0, 0.0));
        let pos = world.get::<&Ball>(entity).unwrap().pos;
        assert!((pos - Vec2::new(799.0, 487.0)).length() < 1e-3);
    }
}
