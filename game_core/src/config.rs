use glam::Vec2;

use crate::error::ConfigError;
use crate::params::Params;

/// Autonomous opponent tuning
#[derive(Debug, Clone)]
pub struct CpuTuning {
    pub wall_margin: f32,
    pub retreat_offset: f32,
    pub lookahead_ticks: f32,
    pub error_scale: f32,
    pub gain: f32,
    pub momentum_min: f32,
    pub momentum_max: f32,
    pub speed_ratio: f32,
    pub jitter_chance: f64,
    pub jitter: f32,
    pub skip_chance: f64,
}

impl Default for CpuTuning {
    fn default() -> Self {
        Self {
            wall_margin: Params::CPU_WALL_MARGIN,
            retreat_offset: Params::CPU_RETREAT_OFFSET,
            lookahead_ticks: Params::CPU_LOOKAHEAD_TICKS,
            error_scale: Params::CPU_ERROR_SCALE,
            gain: Params::CPU_GAIN,
            momentum_min: Params::CPU_MOMENTUM_MIN,
            momentum_max: Params::CPU_MOMENTUM_MAX,
            speed_ratio: Params::CPU_SPEED_RATIO,
            jitter_chance: Params::CPU_JITTER_CHANCE,
            jitter: Params::CPU_JITTER,
            skip_chance: Params::CPU_SKIP_CHANCE,
        }
    }
}

/// External-sensor controller tuning
#[derive(Debug, Clone)]
pub struct SensorTuning {
    pub dead_zone: f32,
    pub neutral_zone: f32,
    pub smoothing: f32,
    pub edge_margin: f32,
    pub center_pull: f32,
    pub worker_smoothing: f32,
    pub min_movement: f32,
}

impl Default for SensorTuning {
    fn default() -> Self {
        Self {
            dead_zone: Params::SENSOR_DEAD_ZONE,
            neutral_zone: Params::SENSOR_NEUTRAL_ZONE,
            smoothing: Params::SENSOR_SMOOTHING,
            edge_margin: Params::SENSOR_EDGE_MARGIN,
            center_pull: Params::SENSOR_CENTER_PULL,
            worker_smoothing: Params::SENSOR_WORKER_SMOOTHING,
            min_movement: Params::SENSOR_MIN_MOVEMENT,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub player_speed: f32,
    pub ball_size: f32,
    pub ball_speed: f32,
    pub serve_spin: f32,
    pub hit_spin: f32,
    pub wall_push: f32,
    pub wall_bounce_gain: f32,
    pub paddle_near_wall_margin: f32,
    pub stuck_margin: f32,
    pub stuck_speed: f32,
    pub stuck_gain: Vec2, // per-axis velocity boost for a ball crawling along a side wall
    pub cpu: CpuTuning,
    pub sensor: SensorTuning,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            player_speed: Params::PLAYER_SPEED,
            ball_size: Params::BALL_SIZE,
            ball_speed: Params::BALL_SPEED,
            serve_spin: Params::SERVE_SPIN,
            hit_spin: Params::HIT_SPIN,
            wall_push: Params::WALL_PUSH,
            wall_bounce_gain: Params::WALL_BOUNCE_GAIN,
            paddle_near_wall_margin: Params::PADDLE_NEAR_WALL_MARGIN,
            stuck_margin: Params::STUCK_MARGIN,
            stuck_speed: Params::STUCK_SPEED,
            stuck_gain: Vec2::new(Params::STUCK_GAIN_X, Params::STUCK_GAIN_Y),
            cpu: CpuTuning::default(),
            sensor: SensorTuning::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ball_radius(&self) -> f32 {
        self.ball_size / 2.0
    }

    /// Per-axis speed cap for the CPU paddle
    pub fn cpu_max_speed(&self) -> f32 {
        self.player_speed * self.cpu.speed_ratio
    }

    /// Reject configurations the simulation cannot run with. NaN fails every check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (cpu, sensor) = (&self.cpu, &self.sensor);

        let positive = [
            ("paddle width", self.paddle_width),
            ("paddle height", self.paddle_height),
            ("player speed", self.player_speed),
            ("ball size", self.ball_size),
            ("ball speed", self.ball_speed),
            ("wall bounce gain", self.wall_bounce_gain),
            ("stuck gain x", self.stuck_gain.x),
            ("stuck gain y", self.stuck_gain.y),
            ("CPU gain", cpu.gain),
            ("CPU speed ratio", cpu.speed_ratio),
            ("CPU momentum minimum", cpu.momentum_min),
            ("CPU momentum maximum", cpu.momentum_max),
            ("sensor smoothing", sensor.smoothing),
        ];
        for (what, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { what, value });
            }
        }

        let unit = [
            ("CPU jitter chance", cpu.jitter_chance as f32),
            ("CPU skip chance", cpu.skip_chance as f32),
            ("sensor smoothing", sensor.smoothing),
            ("sensor worker smoothing", sensor.worker_smoothing),
            ("sensor dead zone", sensor.dead_zone),
            ("sensor neutral zone", sensor.neutral_zone),
            ("sensor center pull", sensor.center_pull),
            ("sensor minimum movement", sensor.min_movement),
        ];
        for (what, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    what,
                    value,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }

        let non_negative = [
            ("serve spin", self.serve_spin),
            ("hit spin", self.hit_spin),
            ("wall push", self.wall_push),
            ("paddle near-wall margin", self.paddle_near_wall_margin),
            ("stuck margin", self.stuck_margin),
            ("stuck speed", self.stuck_speed),
            ("CPU wall margin", cpu.wall_margin),
            ("CPU retreat offset", cpu.retreat_offset),
            ("CPU lookahead ticks", cpu.lookahead_ticks),
            ("CPU error scale", cpu.error_scale),
            ("CPU jitter", cpu.jitter),
            ("sensor edge margin", sensor.edge_margin),
        ];
        for (what, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::OutOfRange {
                    what,
                    value,
                    min: 0.0,
                    max: f32::INFINITY,
                });
            }
        }

        if cpu.momentum_min > cpu.momentum_max {
            return Err(ConfigError::OutOfRange {
                what: "CPU momentum minimum",
                value: cpu.momentum_min,
                min: 0.0,
                max: cpu.momentum_max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(Config::new().validate(), Ok(()));
    }

    #[test]
    fn test_cpu_max_speed_is_fraction_of_player_speed() {
        let config = Config::new();
        assert!((config.cpu_max_speed() - 5.25).abs() < 1e-6);
    }

    #[test]
    fn test_zero_ball_speed_rejected() {
        let config = Config {
            ball_speed: 0.0,
            ..Config::new()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { what: "ball speed", .. })
        ));
    }

    #[test]
    fn test_chance_above_one_rejected() {
        let mut config = Config::new();
        config.cpu.skip_chance = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { what: "CPU skip chance", .. })
        ));
    }

    #[test]
    fn test_inverted_momentum_range_rejected() {
        let mut config = Config::new();
        config.cpu.momentum_min = 2.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_smoothing_above_one_is_out_of_range() {
        let mut config = Config::new();
        config.sensor.smoothing = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { what: "sensor smoothing", .. })
        ));
    }

    #[test]
    fn test_nan_momentum_rejected() {
        let mut config = Config::new();
        config.cpu.momentum_min = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { what: "CPU momentum minimum", .. })
        ));
    }

    #[test]
    fn test_out_of_range_tunables_rejected() {
        let broken: [fn(&mut Config); 6] = [
            |c| c.cpu.speed_ratio = 0.0,
            |c| c.cpu.gain = -0.1,
            |c| c.sensor.dead_zone = 2.0,
            |c| c.sensor.neutral_zone = f32::NAN,
            |c| c.sensor.edge_margin = -1.0,
            |c| c.wall_bounce_gain = 0.0,
        ];
        for breaker in broken {
            let mut config = Config::new();
            breaker(&mut config);
            assert!(config.validate().is_err(), "{config:?}");
        }
    }

    #[test]
    fn test_zero_smoothing_rejected() {
        let mut config = Config::new();
        config.sensor.smoothing = 0.0;
        assert!(config.validate().is_err());
    }
}
