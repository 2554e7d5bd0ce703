use glam::Vec2;
use rand::Rng;

use crate::error::ConfigError;
use crate::field::Aabb;
use crate::resources::GameRng;

/// Which half of the field a player defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,  // player 1
    Right, // player 2
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Horizontal direction pointing toward this side's half
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Ball component - square-bounded circular body, position is the top-left corner
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Cosmetic rotation in degrees
    pub angle: f32,
    pub spin: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, size: f32) -> Self {
        Self {
            pos,
            vel,
            size,
            angle: 0.0,
            spin: 0.0,
        }
    }

    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.radius())
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.pos = center - Vec2::splat(self.radius());
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size
    }

    /// Advance position and rotation; `factor` is dt over the nominal tick
    pub fn integrate(&mut self, factor: f32) {
        self.pos += self.vel * factor;
        self.angle += self.spin * factor;
    }

    /// Re-center and launch toward `toward` at `speed` with a random vertical component
    pub fn serve(&mut self, toward: Side, center: Vec2, speed: f32, spin: f32, rng: &mut GameRng) {
        self.set_center(center);
        self.vel = Vec2::new(
            speed * toward.sign(),
            speed * rng.0.gen_range(-1.0..=1.0f32),
        );
        self.angle = 0.0;
        self.spin = rng.0.gen_range(-spin..=spin);
    }
}

/// Paddle component - axis-aligned rectangle confined to its movement bounds
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
    pub pos: Vec2, // top-left
    pub size: Vec2,
    pub bounds: Aabb,
}

impl Paddle {
    pub fn new(side: Side, pos: Vec2, size: Vec2, bounds: Aabb) -> Result<Self, ConfigError> {
        if size.x <= 0.0 || size.y <= 0.0 {
            return Err(ConfigError::NonPositive {
                what: "paddle size",
                value: size.x.min(size.y),
            });
        }
        let max = bounds.max - size;
        if bounds.min.x > max.x {
            return Err(ConfigError::DegenerateBounds {
                axis: 'x',
                min: bounds.min.x,
                max: max.x,
            });
        }
        if bounds.min.y > max.y {
            return Err(ConfigError::DegenerateBounds {
                axis: 'y',
                min: bounds.min.y,
                max: max.y,
            });
        }

        let mut paddle = Self {
            side,
            pos,
            size,
            bounds,
        };
        paddle.clamp();
        Ok(paddle)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn rect(&self) -> Aabb {
        Aabb::from_origin_size(self.pos, self.size)
    }

    pub fn move_by(&mut self, delta: Vec2) {
        self.pos += delta;
        self.clamp();
    }

    fn clamp(&mut self) {
        let max = self.bounds.max - self.size;
        self.pos.x = self.pos.x.clamp(self.bounds.min.x, max.x);
        self.pos.y = self.pos.y.clamp(self.bounds.min.y, max.y);
    }
}

/// Movement intent for paddle, in units per nominal tick
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddleIntent {
    pub delta: Vec2,
}

impl PaddleIntent {
    pub fn new() -> Self {
        Self::default()
    }
}
