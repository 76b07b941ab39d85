#![no_std]

//! Core logic for a battery-powered, dual-channel LED ornament: a timed
//! instruction interpreter that animates a matrix of discrete LEDs plus a
//! three-element color accent, and a wear-leveled persistent store that
//! remembers the selected animation across power cycles.

#[macro_use]
mod macros;

pub mod catalog;
pub mod clock;
pub mod command;
pub mod engine;
pub mod frame;
pub mod presets;
pub mod scheduler;
pub mod step;
pub mod store;

pub use catalog::{Animation, Catalog, CatalogError};
pub use clock::{MillisClock, TICKS_PER_MS};
pub use command::{Command, CommandQueue, QueueFull, dispatch};
pub use engine::Engine;
pub use frame::{ACCENT_CHANNELS, Frame, MAX_LEVEL};
pub use scheduler::{CycleResult, CycleScheduler};
pub use step::{Opcode, Step};
pub use store::{Settings, SettingsStore, StoreError};

/// Abstract LED output driver.
///
/// Implement this for the hardware refresh path; the scheduler hands it
/// the frame after every engine cycle. Levels are always within
/// `0..=MAX_LEVEL` when observed.
pub trait OutputDriver<const N: usize> {
    /// Render the frame.
    fn write(&mut self, frame: &Frame<N>);
}
