use glam::Vec2;

use crate::components::Side;
use crate::error::ConfigError;
use crate::params::Params;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Static field geometry: playable rectangle, goal mouths and the
/// (purely cosmetic) penalty areas.
#[derive(Debug, Clone)]
pub struct Field {
    pub rect: Aabb,
    /// Goal mouth vertical span, exclusive at both ends
    pub goal_top: f32,
    pub goal_bottom: f32,
    pub penalty_areas: [Aabb; 2],
}

impl Field {
    pub fn new(origin: Vec2, size: Vec2, goal_height: f32) -> Result<Self, ConfigError> {
        if size.x <= 0.0 || size.y <= 0.0 {
            return Err(ConfigError::NonPositive {
                what: "field size",
                value: size.x.min(size.y),
            });
        }
        if goal_height <= 0.0 {
            return Err(ConfigError::NonPositive {
                what: "goal height",
                value: goal_height,
            });
        }

        let rect = Aabb::from_origin_size(origin, size);
        let center_y = rect.center().y;
        let goal_top = center_y - goal_height / 2.0;
        let goal_bottom = center_y + goal_height / 2.0;
        if goal_top <= rect.min.y || goal_bottom >= rect.max.y {
            return Err(ConfigError::GoalOutsideField {
                top: goal_top,
                bottom: goal_bottom,
                field_top: rect.min.y,
                field_bottom: rect.max.y,
            });
        }

        Ok(Self::build(rect, goal_height))
    }

    fn build(rect: Aabb, goal_height: f32) -> Self {
        let center_y = rect.center().y;
        let area_size = Vec2::new(
            Params::PENALTY_AREA_WIDTH,
            goal_height + Params::PENALTY_AREA_EXTRA_HEIGHT,
        );
        let area_y = center_y - area_size.y / 2.0;

        Self {
            rect,
            goal_top: center_y - goal_height / 2.0,
            goal_bottom: center_y + goal_height / 2.0,
            penalty_areas: [
                Aabb::from_origin_size(Vec2::new(rect.min.x, area_y), area_size),
                Aabb::from_origin_size(Vec2::new(rect.max.x - area_size.x, area_y), area_size),
            ],
        }
    }

    /// Whether a ball center at `y` is inside the goal mouth
    pub fn in_goal_mouth(&self, y: f32) -> bool {
        self.goal_top < y && y < self.goal_bottom
    }

    /// Movement bounds for a side's paddle: its own half of the field
    pub fn paddle_bounds(&self, side: Side) -> Aabb {
        let mid_x = self.rect.min.x + self.rect.size().x / 2.0;
        match side {
            Side::Left => Aabb::new(self.rect.min, Vec2::new(mid_x, self.rect.max.y)),
            Side::Right => Aabb::new(Vec2::new(mid_x, self.rect.min.y), self.rect.max),
        }
    }

    /// Kick-off top-left position of a side's paddle
    pub fn paddle_spawn(&self, side: Side, paddle_size: Vec2) -> Vec2 {
        let y = self.rect.center().y - paddle_size.y / 2.0;
        match side {
            Side::Left => Vec2::new(self.rect.min.x + Params::PADDLE_START_INSET, y),
            Side::Right => Vec2::new(
                self.rect.max.x - Params::PADDLE_START_INSET - paddle_size.x,
                y,
            ),
        }
    }

    /// Center point the ball is served from
    pub fn ball_spawn(&self) -> Vec2 {
        self.rect.center()
    }
}

impl Default for Field {
    fn default() -> Self {
        let rect = Aabb::from_origin_size(
            Vec2::new(Params::FIELD_X, Params::FIELD_Y),
            Vec2::new(Params::FIELD_WIDTH, Params::FIELD_HEIGHT),
        );
        Self::build(rect, Params::GOAL_HEIGHT)
    }
}
