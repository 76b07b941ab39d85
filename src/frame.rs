//! Shared brightness state written by the engine and read by the output
//! driver.

use smart_leds::RGB8;

/// Number of elements in the color accent channel.
pub const ACCENT_CHANNELS: usize = 3;

/// Highest brightness level either channel can hold.
pub const MAX_LEVEL: u8 = 15;

/// Per-LED brightness state for both channels.
///
/// `N` is the matrix width. Every element stays within `0..=MAX_LEVEL`
/// whenever an output driver observes it; the levels are 4-bit by
/// contract with the multiplexed PWM hardware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<const N: usize> {
    /// Matrix LED levels.
    pub matrix: [u8; N],
    /// Accent color levels, one per color component.
    pub accent: [u8; ACCENT_CHANNELS],
}

impl<const N: usize> Frame<N> {
    /// All-dark frame.
    pub const fn new() -> Self {
        Self {
            matrix: [0; N],
            accent: [0; ACCENT_CHANNELS],
        }
    }

    /// Accent triple expanded to the 8-bit-per-channel wire type consumed
    /// by smart-LED drivers.
    pub fn accent_rgb(&self) -> RGB8 {
        RGB8::new(
            expand(self.accent[0]),
            expand(self.accent[1]),
            expand(self.accent[2]),
        )
    }
}

impl<const N: usize> Default for Frame<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand a 4-bit level to the full 8-bit range (15 maps to 255).
const fn expand(level: u8) -> u8 {
    level * 17
}
