//! Device command queue and foreground dispatcher.
//!
//! Producers (the button handler, the pairing link) enqueue from any
//! context; the main loop drains the queue and applies each command to
//! the engine and the settings store. Selection and persistence stay
//! separate operations: nothing persists unless the command asks for it.

use core::cell::RefCell;

use critical_section::Mutex;
use embedded_storage::nor_flash::NorFlash;
use heapless::Deque;

use crate::engine::Engine;
use crate::store::{Settings, SettingsStore};

/// Device-level commands accepted by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Select a catalog entry and persist the choice.
    Select(u8),
    /// Advance to the next entry, skipping the reserved all-off slot, and
    /// persist the choice.
    Next,
    /// Restart the active animation from phase zero (pairing link).
    Resync,
    /// Switch to the reserved all-off entry without persisting; issued
    /// right before power-down.
    Blackout,
}

/// Error returned when enqueueing into a full queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull(pub Command);

/// Bounded, interrupt-safe command queue.
pub struct CommandQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<Command, SIZE>>>,
}

impl<const SIZE: usize> CommandQueue<SIZE> {
    /// New empty queue.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Enqueue a command; fails when the queue is full.
    pub fn push(&self, command: Command) -> Result<(), QueueFull> {
        critical_section::with(|cs| {
            self.inner
                .borrow(cs)
                .borrow_mut()
                .push_back(command)
                .map_err(QueueFull)
        })
    }

    fn pop(&self) -> Option<Command> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }
}

impl<const SIZE: usize> Default for CommandQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Drain pending commands and apply them.
///
/// Foreground only. A persistence failure keeps the previous stored
/// record; the new selection still takes effect for this session.
#[allow(clippy::cast_possible_truncation)]
pub fn dispatch<F: NorFlash, const N: usize, const SIZE: usize>(
    queue: &CommandQueue<SIZE>,
    engine: &mut Engine<'_, N>,
    store: &mut SettingsStore<F>,
) {
    while let Some(command) = queue.pop() {
        match command {
            Command::Select(index) => {
                if engine.catalog().contains(index) {
                    engine.select(index);
                    persist(engine, store);
                }
            }
            Command::Next => {
                let reserved = engine.catalog().all_off();
                let mut next = engine.active() + 1;
                if next >= reserved {
                    next = 0;
                }
                engine.select(next as u8);
                persist(engine, store);
            }
            Command::Resync => engine.resync(),
            Command::Blackout => {
                engine.select(engine.catalog().all_off() as u8);
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn persist<F: NorFlash, const N: usize>(engine: &Engine<'_, N>, store: &mut SettingsStore<F>) {
    let settings = Settings {
        animation: engine.active() as u8,
    };
    if store.save(settings).is_err() {
        engine_debug!("settings: save failed, keeping previous record");
    }
}
