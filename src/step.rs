//! Animation instructions.
//!
//! An animation is plain data: a sequence of timed instructions per
//! channel. Each instruction carries a duration, a per-element value
//! vector and an opcode, a set of independent effect flags the engine
//! applies to the channel state in a fixed order.

/// Set of effect flags carried by one instruction.
///
/// Flags combine (`Opcode::ADD.with(Opcode::REPEAT)`); the engine runs
/// them as a fixed pipeline regardless of how they were combined. The
/// empty set is the plain load instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode(u8);

impl Opcode {
    /// Plain load: copy the instruction vector into the channel verbatim.
    /// Terminal; no other flag applies.
    pub const LOAD: Self = Self(0);
    /// Add each delta to the current level; a result outside the level
    /// range resets to 0 rather than clamping.
    pub const ADD: Self = Self(1 << 0);
    /// Rotate the matrix one position clockwise. No-op on the accent
    /// channel.
    pub const ROTATE_RIGHT: Self = Self(1 << 1);
    /// Rotate the matrix one position anticlockwise. No-op on the accent
    /// channel.
    pub const ROTATE_LEFT: Self = Self(1 << 2);
    /// Divide each level by its non-zero delta; a zero delta leaves the
    /// element unchanged.
    pub const DIV: Self = Self(1 << 4);
    /// Pour deltas into the matrix and carry saturation excess toward the
    /// pivot. No-op on the accent channel.
    pub const SOURCE_UP: Self = Self(1 << 5);
    /// Pour deltas into the matrix and carry saturation excess away from
    /// the pivot. No-op on the accent channel.
    pub const SOURCE_DOWN: Self = Self(1 << 6);
    /// Rewind the channel clock so this instruction resolves `operand`
    /// more times before the cursor moves past it.
    pub const REPEAT: Self = Self(1 << 7);

    /// Combine two flag sets.
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether any flag of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether this is the plain load instruction.
    pub const fn is_load(self) -> bool {
        self.0 == 0
    }
}

/// One timed instruction for a channel of width `W`.
#[derive(Debug, Clone, Copy)]
pub struct Step<const W: usize> {
    /// How long this step holds before the cursor advances past it.
    pub duration_ms: u16,
    /// Per-element values; their meaning depends on the opcode.
    pub deltas: [i8; W],
    /// Effect flags.
    pub op: Opcode,
    /// Opcode-specific operand. Only the repeat flag reads it: the number
    /// of additional repetitions.
    pub operand: u8,
}

impl<const W: usize> Step<W> {
    /// Plain load step.
    pub const fn load(duration_ms: u16, levels: [i8; W]) -> Self {
        Self {
            duration_ms,
            deltas: levels,
            op: Opcode::LOAD,
            operand: 0,
        }
    }

    /// Step with an explicit opcode and operand.
    pub const fn new(duration_ms: u16, deltas: [i8; W], op: Opcode, operand: u8) -> Self {
        Self {
            duration_ms,
            deltas,
            op,
            operand,
        }
    }
}
