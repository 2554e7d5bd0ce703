use glam::Vec2;
use hecs::World;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::{Ball, Config, Cue, Events, Field, GameRng, Paddle, Params};

/// Resolve ball collisions with the top/bottom walls, then with every paddle
pub fn check_collisions(
    world: &mut World,
    field: &Field,
    config: &Config,
    events: &mut Events,
    rng: &mut GameRng,
) {
    // Collect paddle data without holding borrows, left side first
    let mut paddles: Vec<Paddle> = world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, p)| *p)
        .collect();
    paddles.sort_by_key(|p| p.side.index());

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        bounce_top_bottom(ball, field, config, events);
        for paddle in &paddles {
            deflect_off_paddle(ball, paddle, field, config, events, rng);
        }
    }
}

/// Keep the ball inside the top and bottom walls, amplifying its vertical speed on contact
pub fn bounce_top_bottom(ball: &mut Ball, field: &Field, config: &Config, events: &mut Events) {
    if ball.top() <= field.rect.min.y {
        ball.pos.y = field.rect.min.y + config.wall_push;
        ball.vel.y = ball.vel.y.abs() * config.wall_bounce_gain;
        events.push(Cue::WallCollision);
    } else if ball.bottom() >= field.rect.max.y {
        ball.pos.y = field.rect.max.y - config.wall_push - ball.size;
        ball.vel.y = -ball.vel.y.abs() * config.wall_bounce_gain;
        events.push(Cue::WallCollision);
    }
}

/// Circular-proximity paddle hit.
///
/// The new velocity points from the paddle center to the ball center at the
/// base ball speed; the incoming velocity is discarded. Returns whether the
/// paddle was hit.
pub fn deflect_off_paddle(
    ball: &mut Ball,
    paddle: &Paddle,
    field: &Field,
    config: &Config,
    events: &mut Events,
    rng: &mut GameRng,
) -> bool {
    let offset = ball.center() - paddle.center();
    let distance = offset.length();
    let reach = ball.radius() + paddle.size.max_element() / 2.0;
    if distance >= reach {
        return false;
    }

    let margin = config.paddle_near_wall_margin;
    let near_wall =
        ball.left() <= field.rect.min.x + margin || ball.right() >= field.rect.max.x - margin;
    let angle = if near_wall {
        // Steep escape so the ball cannot skim along the goal line
        Params::STEEP_ANGLES_DEG
            .choose(&mut rng.0)
            .copied()
            .unwrap_or(90.0)
            .to_radians()
    } else {
        offset.y.atan2(offset.x)
    };

    let direction = Vec2::from_angle(angle);
    ball.vel = direction * config.ball_speed;

    // Deep overlap: push the ball out along the new heading
    if distance < reach / 2.0 {
        let push = 1.0 + (reach - distance) / reach;
        ball.pos += direction * push;
    }

    ball.spin = rng.0.gen_range(-config.hit_spin..=config.hit_spin);
    events.push(Cue::PaddleCollision);
    true
}
