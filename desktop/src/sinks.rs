//! Log-backed stand-ins for the window and the mixer

use game_core::{AudioSink, Cue, Frame, Outcome, Phase, RenderTarget};

/// Writes a status line whenever the clock or score changes
#[derive(Debug, Default)]
pub struct LogRenderTarget {
    last: Option<(Phase, u32, u32, u32)>,
}

impl RenderTarget for LogRenderTarget {
    fn present(&mut self, frame: &Frame<'_>) {
        let key = (
            frame.phase,
            frame.remaining_secs,
            frame.score.left,
            frame.score.right,
        );
        if self.last == Some(key) {
            if let Some(ball) = frame.ball {
                log::trace!("ball at ({:.1}, {:.1})", ball.pos.x, ball.pos.y);
            }
            return;
        }
        self.last = Some(key);

        log::info!(
            "[{:?}] {:>3}s  {} {} - {} {}{}",
            frame.phase,
            frame.remaining_secs,
            frame.names[0],
            frame.score.left,
            frame.score.right,
            frame.names[1],
            if frame.is_calibrating { "  (calibrating)" } else { "" }
        );

        match frame.outcome {
            Some(Outcome::Winner(side)) => {
                log::info!("{} wins", frame.names[side.index()]);
            }
            Some(Outcome::Draw) => log::info!("Draw"),
            None => {}
        }
    }
}

/// Logs each cue in place of playing a sound
#[derive(Debug, Default)]
pub struct LogAudioSink {
    pub played: usize,
}

impl AudioSink for LogAudioSink {
    fn play(&mut self, cue: Cue) {
        self.played += 1;
        log::debug!("sound: {:?}", cue);
    }
}
