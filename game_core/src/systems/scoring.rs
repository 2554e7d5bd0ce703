use hecs::World;
use rand::Rng;

use crate::{Ball, Config, Cue, Events, Field, GameRng, Goal, Score, Side};

/// Resolve the ball against the side walls. Returns the goal, if one was scored this tick.
pub fn check_scoring(
    world: &mut World,
    field: &Field,
    config: &Config,
    events: &mut Events,
    rng: &mut GameRng,
) -> Option<Goal> {
    let mut goal = None;
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        goal = goal.or(resolve_side_walls(ball, field, config, events, rng));
    }
    if goal.is_some() {
        events.goal = goal;
    }
    goal
}

/// Side-wall contact: a goal when the ball center is inside the goal mouth,
/// otherwise a bounce back into the field.
pub fn resolve_side_walls(
    ball: &mut Ball,
    field: &Field,
    config: &Config,
    events: &mut Events,
    rng: &mut GameRng,
) -> Option<Goal> {
    let breached = if ball.left() <= field.rect.min.x {
        Side::Left
    } else if ball.right() >= field.rect.max.x {
        Side::Right
    } else {
        return None;
    };

    if field.in_goal_mouth(ball.center().y) {
        events.push(Cue::Goal);
        return Some(Goal {
            scorer: breached.opponent(),
        });
    }

    match breached {
        Side::Left => {
            ball.pos.x = field.rect.min.x + config.wall_push;
            ball.vel.x = ball.vel.x.abs();
        }
        Side::Right => {
            ball.pos.x = field.rect.max.x - config.wall_push - ball.size;
            ball.vel.x = -ball.vel.x.abs();
        }
    }
    unstick(ball, field, config, rng);
    events.push(Cue::WallCollision);
    None
}

/// Kick a ball crawling along a side wall back into play
fn unstick(ball: &mut Ball, field: &Field, config: &Config, rng: &mut GameRng) {
    let touching = ball.left() <= field.rect.min.x + config.stuck_margin
        || ball.right() >= field.rect.max.x - config.stuck_margin;
    if touching && ball.vel.x.abs() < config.stuck_speed {
        ball.vel *= config.stuck_gain;
        ball.vel.y += rng.0.gen_range(-1.0..=1.0f32) * config.ball_speed / 2.0;
    }
}

/// Credit the scorer and serve from the center toward the scorer's half
pub fn award_goal(
    world: &mut World,
    goal: Goal,
    field: &Field,
    config: &Config,
    score: &mut Score,
    rng: &mut GameRng,
) {
    score.record(goal);
    log::info!(
        "Goal for {:?}, score {}-{}",
        goal.scorer,
        score.left,
        score.right
    );

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.serve(
            goal.scorer,
            field.ball_spawn(),
            config.ball_speed,
            config.serve_spin,
            rng,
        );
    }
}
