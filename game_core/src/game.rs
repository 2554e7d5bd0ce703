//! Match orchestration: owns the world, the clock, the phase machine and
//! both paddles' controllers, and drives them at a fixed tick from real
//! elapsed time.

use glam::Vec2;
use hecs::World;

use crate::components::{Ball, Paddle, PaddleIntent, Side};
use crate::config::Config;
use crate::control::{
    AutonomousInput, ControlMode, Controller, ExternalSensorInput, KeyBindings, KeyState,
    ManualInput,
};
use crate::error::{ConfigError, SensorError};
use crate::field::Field;
use crate::fsm::{MatchAction, MatchFsm, Phase, TransitionResult};
use crate::params::Params;
use crate::resources::{Cue, Events, GameRng, Goal, MatchClock, Outcome, Score, Time};
use crate::sensor::PositionSource;
use crate::settings::MatchSettings;
use crate::sinks::{AudioSink, BallView, Frame, PaddleView, RenderTarget};

/// Opens the position source for a side switched to sensor control
pub type SourceFactory = Box<dyn FnMut(Side) -> Result<Box<dyn PositionSource>, SensorError>>;

pub struct Game {
    pub world: World,
    pub time: Time,
    pub field: Field,
    pub config: Config,
    pub score: Score,
    pub events: Events,
    pub rng: GameRng,
    pub clock: MatchClock,
    pub settings: MatchSettings,
    fsm: MatchFsm,
    controllers: [Controller; 2],
    keys: [KeyState; 2],
    source_factory: Option<SourceFactory>,
    accumulator: f32,     // real time not yet simulated
    kickoff: [Paddle; 2], // validated kick-off paddles
    display_names: [String; 2],
}

impl Game {
    /// Build a game in the menu. Fails fast on an invalid configuration.
    pub fn new(config: Config, rng: GameRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let field = Field::default();

        let size = Vec2::new(config.paddle_width, config.paddle_height);
        let kickoff = [
            Paddle::new(
                Side::Left,
                field.paddle_spawn(Side::Left, size),
                size,
                field.paddle_bounds(Side::Left),
            )?,
            Paddle::new(
                Side::Right,
                field.paddle_spawn(Side::Right, size),
                size,
                field.paddle_bounds(Side::Right),
            )?,
        ];

        let settings = MatchSettings::default();
        let mut game = Self {
            world: World::new(),
            time: Time::default(),
            field,
            config,
            score: Score::new(),
            events: Events::new(),
            rng,
            clock: MatchClock::new(settings.duration.seconds()),
            display_names: [
                settings.display_name(Side::Left),
                settings.display_name(Side::Right),
            ],
            settings,
            fsm: MatchFsm::new(),
            controllers: [Controller::default(), Controller::default()],
            keys: [KeyState::default(); 2],
            source_factory: None,
            accumulator: 0.0,
            kickoff,
        };
        game.restart_match();
        Ok(game)
    }

    pub fn with_source_factory(mut self, factory: SourceFactory) -> Self {
        self.source_factory = Some(factory);
        self
    }

    pub fn phase(&self) -> Phase {
        self.fsm.phase()
    }

    /// Menu → Playing with fresh score, clock, paddles and ball
    pub fn start(&mut self) -> TransitionResult {
        let result = self.fsm.transition(MatchAction::Start);
        if result.success() {
            self.display_names = [
                self.settings.display_name(Side::Left),
                self.settings.display_name(Side::Right),
            ];
            self.restart_match();
            self.events.push(Cue::Start);
            log::info!(
                "Match started: {} vs {}, {}s",
                self.display_names[0],
                self.display_names[1],
                self.clock.remaining
            );
        }
        result
    }

    /// Playing ⇄ Paused. Pausing freezes the simulation and the clock.
    pub fn toggle_pause(&mut self) -> TransitionResult {
        let result = self.fsm.transition(MatchAction::TogglePause);
        if result.success() {
            self.events.push(Cue::Start);
            log::info!("Match {:?}", result.to_phase());
        }
        result
    }

    pub fn return_to_menu(&mut self) -> TransitionResult {
        self.accumulator = 0.0;
        self.fsm.transition(MatchAction::ReturnToMenu)
    }

    /// Back to the menu with a freshly rebuilt match
    pub fn reset(&mut self) -> TransitionResult {
        let result = self.fsm.transition(MatchAction::Reset);
        self.restart_match();
        result
    }

    /// Discard entities and match data and rebuild them from scratch
    fn restart_match(&mut self) {
        self.score = Score::new();
        self.events = Events::new();
        self.time = Time::default();
        self.clock = MatchClock::new(self.settings.duration.seconds());
        self.accumulator = 0.0;

        self.world.clear();
        for paddle in self.kickoff {
            self.world.spawn((paddle, PaddleIntent::new()));
        }
        let mut ball = Ball::new(Vec2::ZERO, Vec2::ZERO, self.config.ball_size);
        ball.serve(
            Side::Right,
            self.field.ball_spawn(),
            self.config.ball_speed,
            self.config.serve_spin,
            &mut self.rng,
        );
        self.world.spawn((ball,));
    }

    pub fn control_mode(&self, side: Side) -> ControlMode {
        self.controllers[side.index()].mode()
    }

    /// Swap a side's controller. A running sensor worker is stopped first;
    /// a sensor that cannot be opened leaves the paddle on pass-through.
    pub fn set_control_mode(&mut self, side: Side, mode: ControlMode) {
        let slot = side.index();
        if self.controllers[slot].mode() == mode {
            return;
        }
        self.controllers[slot].shutdown();

        self.controllers[slot] = match mode {
            ControlMode::Manual => Controller::Manual(ManualInput),
            ControlMode::Autonomous => Controller::Autonomous(AutonomousInput),
            ControlMode::ExternalSensor => {
                let mut input = ExternalSensorInput::new(self.config.sensor.clone());
                let started = match self.source_factory.as_mut() {
                    Some(factory) => factory(side).and_then(|source| input.start(source)),
                    None => Err(SensorError::Unavailable("no position source configured".to_string())),
                };
                if let Err(err) = started {
                    log::warn!("{:?} sensor unavailable, passing input through: {}", side, err);
                }
                Controller::ExternalSensor(input)
            }
        };
        self.settings.modes[slot] = mode;
        log::info!("{:?} paddle now {:?}", side, mode);
    }

    pub fn set_keys(&mut self, side: Side, keys: KeyState) {
        self.keys[side.index()] = keys;
    }

    /// Route a key event: WASD drives the left paddle, arrows the right.
    /// Returns false for keys that move neither.
    pub fn handle_key(&mut self, key: &str, pressed: bool) -> bool {
        self.keys[0].apply(KeyBindings::Wasd, key, pressed)
            || self.keys[1].apply(KeyBindings::Arrows, key, pressed)
    }

    /// Start collecting a side's neutral sensor position. False if the side is not sensor-driven.
    pub fn begin_calibration(&mut self, side: Side) -> bool {
        match self.controllers[side.index()].sensor_mut() {
            Some(sensor) => {
                sensor.begin_calibration();
                true
            }
            None => false,
        }
    }

    pub fn finish_calibration(&mut self, side: Side) -> bool {
        self.controllers[side.index()]
            .sensor_mut()
            .is_some_and(|sensor| sensor.finish_calibration())
    }

    pub fn is_calibrating(&self) -> bool {
        self.controllers
            .iter()
            .filter_map(Controller::sensor)
            .any(ExternalSensorInput::is_calibrating)
    }

    /// Feed real elapsed time: run whole fixed ticks, count the clock down,
    /// dispatch cues, then present one frame.
    pub fn advance(&mut self, dt: f32, audio: &mut dyn AudioSink, render: &mut dyn RenderTarget) {
        let dt = dt.max(0.0);

        if self.fsm.is_running() {
            // Only simulation catch-up is capped; the clock follows real time
            self.accumulator += dt.min(Params::MAX_FRAME_DT);
            while self.accumulator >= Params::TICK_DT {
                self.accumulator -= Params::TICK_DT;
                self.tick();
            }

            if self.clock.advance(dt) {
                self.fsm.transition(MatchAction::ClockExpired);
                self.accumulator = 0.0;
                log::info!(
                    "Match over {}-{}: {:?}",
                    self.score.left,
                    self.score.right,
                    self.score.outcome()
                );
            }
        }

        for cue in self.events.drain() {
            audio.play(cue);
        }
        self.events.clear();

        render.present(&self.frame());
    }

    /// One fixed simulation tick. Does nothing outside `Playing`.
    pub fn tick(&mut self) -> Option<Goal> {
        if !self.fsm.is_running() {
            return None;
        }
        self.time.dt = Params::TICK_DT;
        let goal = crate::step(
            &mut self.world,
            &mut self.time,
            &self.field,
            &self.config,
            &mut self.controllers,
            &self.keys,
            &mut self.score,
            &mut self.events,
            &mut self.rng,
        );
        if goal.is_some() {
            log::trace!("Tick {:.3}s: {:?}", self.time.now, goal);
        }
        goal
    }

    pub fn ball(&self) -> Option<Ball> {
        self.world.query::<&Ball>().iter().next().map(|(_e, b)| *b)
    }

    pub fn paddle(&self, side: Side) -> Option<Paddle> {
        self.world
            .query::<&Paddle>()
            .iter()
            .find(|(_e, p)| p.side == side)
            .map(|(_e, p)| *p)
    }

    /// Final result, once the clock has run out
    pub fn outcome(&self) -> Option<Outcome> {
        self.fsm.is_ended().then(|| self.score.outcome())
    }

    pub fn frame(&self) -> Frame<'_> {
        let paddle_view = |side| {
            self.paddle(side).map(|p| PaddleView {
                pos: p.pos,
                size: p.size,
            })
        };
        Frame {
            phase: self.phase(),
            ball: self.ball().map(|b| BallView {
                pos: b.pos,
                size: b.size,
                angle: b.angle,
            }),
            paddles: [paddle_view(Side::Left), paddle_view(Side::Right)],
            score: self.score,
            remaining_secs: self.clock.remaining,
            names: [self.display_names[0].as_str(), self.display_names[1].as_str()],
            is_calibrating: self.is_calibrating(),
            outcome: self.outcome(),
        }
    }

    /// Stop background sensor workers. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        for controller in &mut self.controllers {
            controller.shutdown();
        }
    }
}
