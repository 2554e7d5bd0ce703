use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use game_core::{ControlMode, Game, Phase, Side};

use crate::sinks::{LogAudioSink, LogRenderTarget};

const FRAME_TIME: Duration = Duration::from_micros(1_000_000 / 60);

/// Fixed-rate driver around a [`Game`]
pub struct App {
    game: Game,
    running: Arc<AtomicBool>,
    last_tick: Instant,
    audio: LogAudioSink,
    render: LogRenderTarget,
}

impl App {
    pub fn new(mut game: Game, running: Arc<AtomicBool>) -> Self {
        for side in Side::BOTH {
            game.set_control_mode(side, ControlMode::Autonomous);
        }
        Self {
            game,
            running,
            last_tick: Instant::now(),
            audio: LogAudioSink::default(),
            render: LogRenderTarget::default(),
        }
    }

    /// Play one match to the final whistle, or until interrupted
    pub fn run(&mut self) {
        self.game.start();
        self.last_tick = Instant::now();

        while self.running.load(Ordering::Acquire) && self.game.phase() != Phase::Ended {
            let now = Instant::now();
            let dt = now.duration_since(self.last_tick).as_secs_f32();
            self.last_tick = now;

            self.game.advance(dt, &mut self.audio, &mut self.render);

            // Target 60 FPS
            std::thread::sleep(FRAME_TIME.saturating_sub(now.elapsed()));
        }

        if self.game.phase() != Phase::Ended {
            log::info!("Interrupted");
        }
        log::debug!("{} sound cues played", self.audio.played);
        self.game.shutdown();
    }
}
