/// Game tuning parameters for the arcade football game
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Screen
    pub const SCREEN_WIDTH: f32 = 1600.0;
    pub const SCREEN_HEIGHT: f32 = 1000.0;

    // Field (playable rectangle, screen coordinates)
    pub const FIELD_X: f32 = 100.0;
    pub const FIELD_Y: f32 = 50.0;
    pub const FIELD_WIDTH: f32 = 1400.0;
    pub const FIELD_HEIGHT: f32 = 900.0;
    pub const GOAL_HEIGHT: f32 = 150.0;
    pub const PENALTY_AREA_WIDTH: f32 = 100.0;
    pub const PENALTY_AREA_EXTRA_HEIGHT: f32 = 100.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 65.0;
    pub const PADDLE_HEIGHT: f32 = 80.0;
    pub const PADDLE_START_INSET: f32 = 50.0; // distance from goal line at kick-off
    pub const PLAYER_SPEED: f32 = 7.0; // units per tick

    // Ball
    pub const BALL_SIZE: f32 = 50.0;
    pub const BALL_SPEED: f32 = 8.0; // units per tick
    pub const SERVE_SPIN: f32 = 5.0; // degrees per tick, symmetric range
    pub const HIT_SPIN: f32 = 8.0;

    // Collisions
    pub const WALL_PUSH: f32 = 1.0;
    pub const WALL_BOUNCE_GAIN: f32 = 1.1;
    pub const PADDLE_NEAR_WALL_MARGIN: f32 = 15.0;
    pub const STEEP_ANGLES_DEG: [f32; 4] = [75.0, 105.0, 255.0, 285.0];
    pub const STUCK_MARGIN: f32 = 5.0;
    pub const STUCK_SPEED: f32 = 2.0;
    pub const STUCK_GAIN_X: f32 = 1.5;
    pub const STUCK_GAIN_Y: f32 = 1.2;

    // CPU opponent
    pub const CPU_WALL_MARGIN: f32 = 50.0;
    pub const CPU_RETREAT_OFFSET: f32 = 50.0;
    pub const CPU_LOOKAHEAD_TICKS: f32 = 10.0;
    pub const CPU_ERROR_SCALE: f32 = 2.0;
    pub const CPU_GAIN: f32 = 0.1;
    pub const CPU_MOMENTUM_MIN: f32 = 0.7;
    pub const CPU_MOMENTUM_MAX: f32 = 1.3;
    pub const CPU_SPEED_RATIO: f32 = 0.75;
    pub const CPU_JITTER_CHANCE: f64 = 0.05;
    pub const CPU_JITTER: f32 = 2.0;
    pub const CPU_SKIP_CHANCE: f64 = 0.03;

    // External sensor
    pub const SENSOR_DEAD_ZONE: f32 = 0.02;
    pub const SENSOR_NEUTRAL_ZONE: f32 = 0.1;
    pub const SENSOR_SMOOTHING: f32 = 0.3;
    pub const SENSOR_EDGE_MARGIN: f32 = 50.0;
    pub const SENSOR_CENTER_PULL: f32 = 0.02;
    pub const SENSOR_WORKER_SMOOTHING: f32 = 0.7;
    pub const SENSOR_MIN_MOVEMENT: f32 = 0.005;

    // Match
    pub const MATCH_DURATIONS: [u32; 3] = [60, 180, 300];
    pub const NAME_MAX_LEN: usize = 15;

    // Physics
    pub const TICK_DT: f32 = 1.0 / 60.0; // 60 Hz
    pub const MAX_FRAME_DT: f32 = 0.25; // Clamp to prevent a catch-up spiral
}
