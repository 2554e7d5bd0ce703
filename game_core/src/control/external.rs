//! Paddle driven by an asynchronous normalized position (e.g. head tracking)

use std::sync::Arc;

use glam::Vec2;

use super::{ControlContext, PaddleInput};
use crate::components::Paddle;
use crate::config::SensorTuning;
use crate::error::SensorError;
use crate::resources::GameRng;
use crate::sensor::{LatestPosition, PositionSource, SensorWorker};

const NEUTRAL: Vec2 = Vec2::splat(0.5);

/// Neutral-point calibration state
#[derive(Debug, Clone, Default)]
struct Calibration {
    neutral: Option<Vec2>,
    collecting: Option<(Vec2, u32)>, // running sum, sample count
}

pub struct ExternalSensorInput {
    cell: Arc<LatestPosition>,
    worker: Option<SensorWorker>,
    tuning: SensorTuning,
    smoothed: Option<Vec2>,
    calibration: Calibration,
}

impl ExternalSensorInput {
    /// Idle controller; it passes raw deltas through until a worker is started
    pub fn new(tuning: SensorTuning) -> Self {
        Self {
            cell: Arc::new(LatestPosition::new()),
            worker: None,
            tuning,
            smoothed: None,
            calibration: Calibration::default(),
        }
    }

    /// Acquire `source` on a background worker, replacing any running one
    pub fn start(&mut self, source: Box<dyn PositionSource>) -> Result<(), SensorError> {
        self.stop();
        let worker = SensorWorker::spawn(source, Arc::clone(&self.cell), &self.tuning)?;
        self.worker = Some(worker);
        Ok(())
    }

    /// Stop the worker, if any. Safe to call when never started.
    pub fn stop(&mut self) {
        if let Some(mut worker) = self.worker.take() {
            worker.stop();
        }
        self.cell.clear();
        self.smoothed = None;
    }

    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(SensorWorker::is_running)
    }

    /// Shared cell the worker writes into
    pub fn cell(&self) -> Arc<LatestPosition> {
        Arc::clone(&self.cell)
    }

    pub fn begin_calibration(&mut self) {
        self.calibration.collecting = Some((Vec2::ZERO, 0));
    }

    /// Adopt the mean reading since `begin_calibration` as the neutral point.
    /// Returns false, and keeps collecting, if no reading arrived yet.
    pub fn finish_calibration(&mut self) -> bool {
        match self.calibration.collecting {
            Some((sum, count)) if count > 0 => {
                let neutral = sum / count as f32;
                log::info!("Sensor calibrated, neutral point ({:.3}, {:.3})", neutral.x, neutral.y);
                self.calibration.neutral = Some(neutral);
                self.calibration.collecting = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_calibrating(&self) -> bool {
        self.calibration.collecting.is_some()
    }

    /// Latest reading, shifted so the calibrated neutral point maps to the center
    fn read(&mut self) -> Option<Vec2> {
        let raw = self.cell.load()?;
        if let Some((sum, count)) = self.calibration.collecting.as_mut() {
            *sum += raw;
            *count += 1;
        }
        let offset = self.calibration.neutral.map_or(Vec2::ZERO, |n| n - NEUTRAL);
        Some((raw - offset).clamp(Vec2::ZERO, Vec2::ONE))
    }
}

impl PaddleInput for ExternalSensorInput {
    fn compute_delta(
        &mut self,
        paddle: &Paddle,
        ctx: &ControlContext<'_>,
        _rng: &mut GameRng,
    ) -> Vec2 {
        let Some(input) = self.read() else {
            return ctx.raw_delta();
        };
        let tuning = &self.tuning;
        let bounds = paddle.bounds;
        let span = bounds.size() - paddle.size;

        let target = bounds.min + input * span;
        let smoothed = match self.smoothed {
            Some(prev) => prev + (target - prev) * tuning.smoothing,
            None => paddle.pos + (target - paddle.pos) * tuning.smoothing,
        };
        self.smoothed = Some(smoothed);

        let off_center = (input - NEUTRAL).abs();
        let speed = ctx.config.player_speed;
        let mut velocity = if off_center.max_element() < tuning.dead_zone {
            Vec2::ZERO
        } else {
            (smoothed - paddle.pos).clamp(Vec2::splat(-speed), Vec2::splat(speed))
        };

        let from_min = paddle.pos.x - bounds.min.x;
        let from_max = (bounds.max.x - paddle.size.x) - paddle.pos.x;
        if from_min < tuning.edge_margin || from_max < tuning.edge_margin {
            velocity.x *= 0.5;
        }

        if off_center.max_element() < tuning.neutral_zone {
            velocity.x += (bounds.center().x - paddle.center().x) * tuning.center_pull;
        }

        velocity
    }
}

impl Drop for ExternalSensorInput {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Side;
    use crate::config::Config;
    use crate::control::KeyState;
    use crate::field::Field;

    fn left_paddle(field: &Field, pos: Vec2) -> Paddle {
        Paddle::new(
            Side::Left,
            pos,
            Vec2::new(65.0, 80.0),
            field.paddle_bounds(Side::Left),
        )
        .unwrap()
    }

    fn ctx<'a>(field: &'a Field, config: &'a Config, keys: KeyState) -> ControlContext<'a> {
        ControlContext {
            ball: None,
            field,
            config,
            keys,
        }
    }

    #[test]
    fn test_without_reading_passes_raw_delta_through() {
        let field = Field::default();
        let config = Config::new();
        let paddle = left_paddle(&field, Vec2::new(150.0, 460.0));
        let keys = KeyState {
            up: true,
            ..Default::default()
        };
        let mut input = ExternalSensorInput::new(config.sensor.clone());

        let delta = input.compute_delta(&paddle, &ctx(&field, &config, keys), &mut GameRng::new(1));
        assert_eq!(delta, Vec2::new(0.0, -7.0));

        let idle = input.compute_delta(
            &paddle,
            &ctx(&field, &config, KeyState::default()),
            &mut GameRng::new(1),
        );
        assert_eq!(idle, Vec2::ZERO);
    }

    #[test]
    fn test_moves_toward_mapped_target_capped_at_player_speed() {
        let field = Field::default();
        let config = Config::new();
        let paddle = left_paddle(&field, Vec2::new(400.0, 460.0));
        let mut input = ExternalSensorInput::new(config.sensor.clone());
        input.cell().store(Vec2::new(1.0, 1.0));

        let delta = input.compute_delta(
            &paddle,
            &ctx(&field, &config, KeyState::default()),
            &mut GameRng::new(1),
        );
        assert_eq!(delta, Vec2::new(7.0, 7.0));
    }

    #[test]
    fn test_dead_zone_suppresses_tracking() {
        let field = Field::default();
        let mut config = Config::new();
        config.sensor.center_pull = 0.0;
        let paddle = left_paddle(&field, Vec2::new(400.0, 200.0));
        let mut input = ExternalSensorInput::new(config.sensor.clone());
        input.cell().store(Vec2::new(0.51, 0.49));

        let delta = input.compute_delta(
            &paddle,
            &ctx(&field, &config, KeyState::default()),
            &mut GameRng::new(1),
        );
        assert_eq!(delta, Vec2::ZERO);
    }

    #[test]
    fn test_neutral_zone_pulls_toward_horizontal_center() {
        let field = Field::default();
        let config = Config::new();
        // Left of the bounds' center (450), away from the edges
        let paddle = left_paddle(&field, Vec2::new(200.0, 460.0));
        let mut input = ExternalSensorInput::new(config.sensor.clone());
        input.cell().store(Vec2::splat(0.5));

        let delta = input.compute_delta(
            &paddle,
            &ctx(&field, &config, KeyState::default()),
            &mut GameRng::new(1),
        );
        let expected = (450.0 - 232.5) * config.sensor.center_pull;
        assert!((delta.x - expected).abs() < 1e-4);
        assert_eq!(delta.y, 0.0);
    }

    #[test]
    fn test_edge_margin_halves_horizontal_speed() {
        let field = Field::default();
        let config = Config::new();
        let paddle = left_paddle(&field, Vec2::new(110.0, 460.0));
        let mut input = ExternalSensorInput::new(config.sensor.clone());
        input.cell().store(Vec2::new(1.0, 0.5));

        let delta = input.compute_delta(
            &paddle,
            &ctx(&field, &config, KeyState::default()),
            &mut GameRng::new(1),
        );
        assert_eq!(delta.x, 3.5);
    }

    #[test]
    fn test_calibration_shifts_neutral_point() {
        let field = Field::default();
        let config = Config::new();
        let paddle = left_paddle(&field, Vec2::new(400.0, 460.0));
        let mut input = ExternalSensorInput::new(config.sensor.clone());
        let cell = input.cell();
        let context = ctx(&field, &config, KeyState::default());
        let mut rng = GameRng::new(1);

        input.begin_calibration();
        assert!(input.is_calibrating());
        assert!(!input.finish_calibration(), "no samples yet");

        cell.store(Vec2::new(0.7, 0.3));
        input.compute_delta(&paddle, &context, &mut rng);
        cell.store(Vec2::new(0.7, 0.5));
        input.compute_delta(&paddle, &context, &mut rng);
        assert!(input.finish_calibration());
        assert!(!input.is_calibrating());

        // The mean reading (0.7, 0.4) now maps to the center
        cell.store(Vec2::new(0.7, 0.4));
        let mapped = input.read().unwrap();
        assert!((mapped - Vec2::splat(0.5)).abs().max_element() < 1e-5);
    }

    #[test]
    fn test_stop_is_safe_when_never_started() {
        let mut input = ExternalSensorInput::new(SensorTuning::default());
        input.stop();
        input.stop();
        assert!(!input.is_running());
    }
}
