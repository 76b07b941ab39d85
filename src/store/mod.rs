//! Log-structured settings storage over NOR-style non-volatile memory.
//!
//! The medium programs bits one way (erased all-ones to any value) and
//! returns to the erased state only by erasing a whole page. The store
//! therefore only ever moves forward through erased space, erasing ahead
//! of itself and never rewriting in place, which spreads write wear
//! across the whole arena.
//!
//! The arena is the full capacity of the given flash, packed with
//! [`SLOT_SIZE`]-byte slots. Mounting scans every slot; the last record
//! in scan order with a valid CRC is the current one. When the cursor
//! passes the final slot, the whole arena is erased and writing restarts
//! at the base, so a scan never has to disambiguate records from
//! different passes.

mod crc16;
mod record;

pub use embedded_storage::nor_flash::{
    ErrorType, NorFlash, NorFlashError, NorFlashErrorKind, ReadNorFlash,
};
pub use record::{SLOT_SIZE, Settings};

/// Failure surfaced by [`SettingsStore::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError<E> {
    /// The underlying medium rejected a read, write or erase.
    Medium(E),
}

/// Wear-leveled settings log.
///
/// `F` must be byte-writable (`WRITE_SIZE == 1`); the slot packing
/// assumes it.
pub struct SettingsStore<F> {
    flash: F,
    settings: Settings,
    /// Next slot to write. Equal to the slot count when the arena is
    /// exhausted, in which case the next save erases and restarts it.
    next_slot: usize,
}

#[allow(clippy::cast_possible_truncation)]
impl<F: NorFlash> SettingsStore<F> {
    /// Scan the arena and mount the store.
    ///
    /// Corrupt records read as absent; with no valid record at all the
    /// settings default and the write cursor parks at the arena base.
    /// Never fails: a boot must reach a playable state regardless of
    /// what the flash holds.
    pub fn mount(mut flash: F) -> Self {
        debug_assert!(F::WRITE_SIZE == 1);
        let slots = flash.capacity() / SLOT_SIZE;
        let mut settings = None;
        let mut last_valid = None;
        let mut buf = [0u8; SLOT_SIZE];
        for slot in 0..slots {
            if flash.read(slot_addr(slot), &mut buf).is_err() {
                continue;
            }
            if let Some(decoded) = Settings::decode(&buf) {
                settings = Some(decoded);
                last_valid = Some(slot);
            }
        }

        let next_slot = match last_valid {
            None => 0,
            Some(valid) => {
                // First fully erased slot past the last valid record;
                // none found means the arena is exhausted.
                let mut found = slots;
                for slot in valid + 1..slots {
                    if flash.read(slot_addr(slot), &mut buf).is_err() {
                        continue;
                    }
                    if buf.iter().all(|&byte| byte == 0xFF) {
                        found = slot;
                        break;
                    }
                }
                found
            }
        };

        match settings {
            Some(loaded) => engine_debug!("settings: restored animation {}", loaded.animation),
            None => engine_debug!("settings: no valid record, using defaults"),
        }
        Self {
            flash,
            settings: settings.unwrap_or_default(),
            next_slot,
        }
    }

    /// Last loaded or saved settings.
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Give the underlying medium back (power-down, tests).
    pub fn into_flash(self) -> F {
        self.flash
    }

    /// Append `settings` to the log.
    ///
    /// Writes the CRC'd record at the tracked slot, then makes sure the
    /// following slot is erased so the next save can program immediately.
    /// On failure the previously stored record stays current.
    pub fn save(&mut self, settings: Settings) -> Result<(), StoreError<F::Error>> {
        let slots = self.flash.capacity() / SLOT_SIZE;
        if self.next_slot >= slots {
            self.restart_arena()?;
        }

        let addr = slot_addr(self.next_slot);
        self.flash
            .write(addr, &settings.encode())
            .map_err(StoreError::Medium)?;
        self.settings = settings;

        self.next_slot += 1;
        if self.next_slot < slots && !self.is_erased(self.next_slot)? {
            self.erase_ahead(addr)?;
        }
        Ok(())
    }

    /// Erase the page covering the next slot. When the page boundary
    /// falls inside the just-written slot, erasing starts just past it
    /// instead, so the fresh record survives.
    fn erase_ahead(&mut self, written: u32) -> Result<(), StoreError<F::Error>> {
        let page = F::ERASE_SIZE as u32;
        let next = slot_addr(self.next_slot);
        let target = if (next / page) * page < written {
            next + SLOT_SIZE as u32
        } else {
            next
        };
        let from = (target / page) * page;
        if from < written + SLOT_SIZE as u32 || from >= self.flash.capacity() as u32 {
            // The page still holds the fresh record, or lies past the
            // arena. Leave it: a dirty slot fails its CRC on the next
            // pass and reads as absent.
            return Ok(());
        }
        self.flash.erase(from, from + page).map_err(StoreError::Medium)
    }

    /// Whether every byte of `slot` is in the erased state.
    fn is_erased(&mut self, slot: usize) -> Result<bool, StoreError<F::Error>> {
        let mut buf = [0u8; SLOT_SIZE];
        self.flash
            .read(slot_addr(slot), &mut buf)
            .map_err(StoreError::Medium)?;
        Ok(buf.iter().all(|&byte| byte == 0xFF))
    }

    /// Arena exhausted: erase every page and restart at the base slot.
    fn restart_arena(&mut self) -> Result<(), StoreError<F::Error>> {
        engine_debug!("settings: arena exhausted, erasing and restarting");
        let end = self.flash.capacity() as u32;
        self.flash.erase(0, end).map_err(StoreError::Medium)?;
        self.next_slot = 0;
        Ok(())
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn slot_addr(slot: usize) -> u32 {
    (slot * SLOT_SIZE) as u32
}
