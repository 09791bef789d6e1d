//! Background update thread for native hosts
//!
//! The host frame loop only advances a shared millisecond clock; a worker
//! thread turns clock deltas into `EffectSystem::update` calls. Rendering
//! stays on the host thread through `get_render_buffer`.

use std::any::Any;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, error};

use crate::error::Result;
use crate::simulation::EffectSystem;

pub const DEFAULT_MIN_PERIOD: Duration = Duration::from_millis(10);

struct DriverShared {
    system: Arc<EffectSystem>,
    clock_ms: AtomicU64,
    width_bits: AtomicU32,
    height_bits: AtomicU32,
    exit: AtomicBool,
    ticks: AtomicU64,
    min_period_ms: u64,
}

impl DriverShared {
    fn screen(&self) -> (f32, f32) {
        (
            f32::from_bits(self.width_bits.load(Ordering::Relaxed)),
            f32::from_bits(self.height_bits.load(Ordering::Relaxed)),
        )
    }
}

pub struct SimulationDriver {
    shared: Arc<DriverShared>,
    worker: Option<JoinHandle<()>>,
}

impl SimulationDriver {
    /// Start the worker thread for `system` on a `width` x `height` screen
    pub fn spawn(system: Arc<EffectSystem>, width: f32, height: f32, min_period: Duration) -> Result<Self> {
        let shared = Arc::new(DriverShared {
            system,
            clock_ms: AtomicU64::new(0),
            width_bits: AtomicU32::new(width.to_bits()),
            height_bits: AtomicU32::new(height.to_bits()),
            exit: AtomicBool::new(false),
            ticks: AtomicU64::new(0),
            min_period_ms: min_period.as_millis().max(1) as u64,
        });

        // Deltas count from the clock as it stood at spawn, not at thread start.
        let start_ms = shared.clock_ms.load(Ordering::Acquire);
        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name("fx-driver".to_string())
            .spawn(move || worker_loop(&worker_shared, start_ms))?;

        debug!(width, height, min_period_ms = shared.min_period_ms, "simulation driver started");
        Ok(SimulationDriver {
            shared,
            worker: Some(worker),
        })
    }

    pub fn system(&self) -> &Arc<EffectSystem> {
        &self.shared.system
    }

    /// Advance the host clock by `dt_ms` milliseconds
    pub fn advance(&self, dt_ms: u64) {
        self.shared.clock_ms.fetch_add(dt_ms, Ordering::AcqRel);
    }

    pub fn resize(&self, width: f32, height: f32) {
        self.shared.width_bits.store(width.to_bits(), Ordering::Relaxed);
        self.shared.height_bits.store(height.to_bits(), Ordering::Relaxed);
    }

    /// Updates run by the worker so far
    pub fn ticks(&self) -> u64 {
        self.shared.ticks.load(Ordering::Acquire)
    }

    /// Stop the worker and wait for it. Re-raises a worker panic.
    pub fn shutdown(mut self) {
        if let Some(panic) = self.stop() {
            std::panic::resume_unwind(panic);
        }
    }

    fn stop(&mut self) -> Option<Box<dyn Any + Send + 'static>> {
        self.shared.exit.store(true, Ordering::Release);
        let worker = self.worker.take()?;
        match worker.join() {
            Ok(()) => {
                debug!(ticks = self.ticks(), "simulation driver stopped");
                None
            }
            Err(panic) => {
                error!("simulation driver worker panicked");
                Some(panic)
            }
        }
    }
}

impl Drop for SimulationDriver {
    fn drop(&mut self) {
        if let Some(panic) = self.stop() {
            if !thread::panicking() {
                std::panic::resume_unwind(panic);
            }
        }
    }
}

fn worker_loop(shared: &DriverShared, start_ms: u64) {
    let mut last_ms = start_ms;

    while !shared.exit.load(Ordering::Acquire) {
        let now_ms = shared.clock_ms.load(Ordering::Acquire);
        let delta_ms = now_ms.saturating_sub(last_ms);
        last_ms = now_ms;

        if delta_ms > 0 {
            let (width, height) = shared.screen();
            shared.system.update(delta_ms as f32 / 1000.0, width, height);
            shared.ticks.fetch_add(1, Ordering::AcqRel);
        }

        if delta_ms < shared.min_period_ms {
            thread::sleep(Duration::from_millis(shared.min_period_ms - delta_ms));
        }
    }
}
