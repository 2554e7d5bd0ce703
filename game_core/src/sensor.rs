//! Background position sensor.
//!
//! A [`SensorWorker`] owns a [`PositionSource`] on its own thread and keeps
//! publishing the latest smoothed reading into a [`LatestPosition`] cell.
//! The simulation only ever loads from the cell: a read never blocks and
//! returns the latest known value, which may be a frame or two stale.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use glam::Vec2;

use crate::config::SensorTuning;
use crate::error::SensorError;

const EMPTY: u64 = u64::MAX;
const IDLE_BACKOFF: Duration = Duration::from_millis(2);

/// Single-slot, single-writer/single-reader cell holding a normalized 2D position
#[derive(Debug)]
pub struct LatestPosition(AtomicU64);

impl LatestPosition {
    pub fn new() -> Self {
        Self(AtomicU64::new(EMPTY))
    }

    /// Overwrite the slot. Non-finite readings empty it instead.
    pub fn store(&self, pos: Vec2) {
        if !pos.is_finite() {
            self.clear();
            return;
        }
        let bits = (u64::from(pos.x.to_bits()) << 32) | u64::from(pos.y.to_bits());
        self.0.store(bits, Ordering::Release);
    }

    pub fn clear(&self) {
        self.0.store(EMPTY, Ordering::Release);
    }

    pub fn load(&self) -> Option<Vec2> {
        let bits = self.0.load(Ordering::Acquire);
        if bits == EMPTY {
            return None;
        }
        Some(Vec2::new(
            f32::from_bits((bits >> 32) as u32),
            f32::from_bits(bits as u32),
        ))
    }
}

impl Default for LatestPosition {
    fn default() -> Self {
        Self::new()
    }
}

/// A device producing normalized positions in [0,1]², e.g. a face tracker.
///
/// `sample` may block until the device has a new frame.
pub trait PositionSource: Send + 'static {
    fn open(&mut self) -> Result<(), SensorError>;

    /// Next raw detection, or `None` when nothing was detected this frame
    fn sample(&mut self) -> Result<Option<Vec2>, SensorError>;

    fn close(&mut self) {}
}

/// Handle to the background thread feeding a [`LatestPosition`]
pub struct SensorWorker {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SensorWorker {
    /// Open `source` and start publishing into `cell`
    pub fn spawn(
        source: Box<dyn PositionSource>,
        cell: Arc<LatestPosition>,
        tuning: &SensorTuning,
    ) -> Result<Self, SensorError> {
        Self::spawn_with(source, cell, tuning, |body| {
            thread::Builder::new()
                .name("position-sensor".to_string())
                .spawn(body)
        })
    }

    /// Like [`SensorWorker::spawn`], with the thread launch supplied by the caller.
    /// A failed launch leaves `cell` untouched and closes `source`.
    fn spawn_with<L>(
        mut source: Box<dyn PositionSource>,
        cell: Arc<LatestPosition>,
        tuning: &SensorTuning,
        launch: L,
    ) -> Result<Self, SensorError>
    where
        L: FnOnce(Box<dyn FnOnce() + Send>) -> io::Result<JoinHandle<()>>,
    {
        source.open()?;
        let source = OpenSource(source);

        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let smoothing = tuning.worker_smoothing;
        let min_movement = tuning.min_movement;
        let handle = launch(Box::new(move || {
            run(source, cell, flag, smoothing, min_movement)
        }))?;

        log::info!("Position sensor worker started");
        Ok(Self {
            running,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the thread and wait for it to exit. Idempotent.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("Position sensor worker panicked");
            } else {
                log::info!("Position sensor worker stopped");
            }
        }
    }
}

impl Drop for SensorWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// An opened source, closed when dropped
struct OpenSource(Box<dyn PositionSource>);

impl Drop for OpenSource {
    fn drop(&mut self) {
        self.0.close();
    }
}

fn run(
    mut source: OpenSource,
    cell: Arc<LatestPosition>,
    running: Arc<AtomicBool>,
    smoothing: f32,
    min_movement: f32,
) {
    // Neutral until the first detection arrives
    let mut current = Vec2::splat(0.5);
    cell.store(current);

    while running.load(Ordering::Acquire) {
        match source.0.sample() {
            Ok(Some(raw)) => {
                current = smooth_toward(current, raw, smoothing, min_movement);
                // Mirror horizontally: the sensor faces the player
                cell.store(Vec2::new(1.0 - current.x, current.y));
            }
            Ok(None) => thread::sleep(IDLE_BACKOFF),
            Err(err) => {
                log::debug!("Position sample failed: {err}");
                cell.clear();
                thread::sleep(IDLE_BACKOFF);
            }
        }
    }
}

/// Per-axis exponential smoothing that ignores sub-threshold movement
pub fn smooth_toward(current: Vec2, raw: Vec2, smoothing: f32, min_movement: f32) -> Vec2 {
    let mut next = current;
    if (raw.x - current.x).abs() > min_movement {
        next.x += (raw.x - current.x) * smoothing;
    }
    if (raw.y - current.y).abs() > min_movement {
        next.y += (raw.y - current.y) * smoothing;
    }
    next
}
