//! Cycle pacing for the main loop.
//!
//! The scheduler owns the engine and the output driver, runs one engine
//! cycle per tick and tells the caller how long it may sleep before the
//! next one. Falling far behind resets the schedule instead of bursting
//! catch-up cycles.

use crate::OutputDriver;
use crate::engine::Engine;

/// Default interval between engine cycles.
pub const DEFAULT_CYCLE_INTERVAL_MS: u16 = 1;

/// Result of one scheduler tick.
#[derive(Debug, Clone, Copy)]
pub struct CycleResult {
    /// When the next cycle is due (wrapping milliseconds).
    pub next_due: u16,
    /// How long the caller may sleep before the next cycle; zero when
    /// behind schedule.
    pub sleep_ms: u16,
}

/// Paces engine cycles and output writes against the millisecond clock.
pub struct CycleScheduler<'a, O: OutputDriver<N>, const N: usize> {
    output: O,
    engine: Engine<'a, N>,
    next_due: u16,
    interval_ms: u16,
}

impl<'a, O: OutputDriver<N>, const N: usize> CycleScheduler<'a, O, N> {
    /// Scheduler at the default cycle interval.
    pub fn new(engine: Engine<'a, N>, output: O) -> Self {
        Self::with_interval(engine, output, DEFAULT_CYCLE_INTERVAL_MS)
    }

    /// Scheduler with a custom cycle interval.
    pub fn with_interval(engine: Engine<'a, N>, output: O, interval_ms: u16) -> Self {
        Self {
            output,
            engine,
            next_due: 0,
            interval_ms,
        }
    }

    /// Run one cycle and report the next deadline.
    ///
    /// The caller is responsible for waiting `sleep_ms` before calling
    /// again; all timestamps wrap at 16 bits.
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn tick(&mut self, now_ms: u16) -> CycleResult {
        // Drift correction: when far behind, restart the schedule at the
        // present instead of replaying the backlog.
        let behind = now_ms.wrapping_sub(self.next_due) as i16;
        if behind > (self.interval_ms as i16) * 2 {
            self.next_due = now_ms;
        }

        self.engine.cycle(now_ms);
        self.output.write(self.engine.frame());

        self.next_due = self.next_due.wrapping_add(self.interval_ms);

        let remaining = self.next_due.wrapping_sub(now_ms) as i16;
        let sleep_ms = if remaining > 0 { remaining as u16 } else { 0 };
        CycleResult {
            next_due: self.next_due,
            sleep_ms,
        }
    }

    /// The paced engine.
    pub fn engine(&self) -> &Engine<'a, N> {
        &self.engine
    }

    /// Mutable access for selection and resynchronization.
    pub fn engine_mut(&mut self) -> &mut Engine<'a, N> {
        &mut self.engine
    }
}
