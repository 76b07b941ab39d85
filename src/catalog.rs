//! Animation catalog: a fixed, compiled-in collection validated at
//! construction time.

use crate::frame::{ACCENT_CHANNELS, MAX_LEVEL};
use crate::step::{Opcode, Step};

/// One named animation: independent instruction sequences for the matrix
/// and accent channels. The sequences may differ in length; each loops on
/// its own.
#[derive(Debug, Clone, Copy)]
pub struct Animation<const N: usize> {
    /// Display name.
    pub name: &'static str,
    /// Matrix channel instructions.
    pub matrix: &'static [Step<N>],
    /// Accent channel instructions.
    pub accent: &'static [Step<ACCENT_CHANNELS>],
}

/// Why a catalog failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog holds no animations.
    Empty,
    /// A channel sequence holds no steps.
    EmptySequence,
    /// A step holds a zero duration.
    ZeroDuration,
    /// A repeat step with operand 0 would rewind the clock forever.
    ZeroRepeat,
    /// A plain-load step carries a value outside the level range.
    LoadOutOfRange,
    /// The pivot does not split the matrix into two non-empty halves.
    BadPivot,
}

/// Fixed, ordered animation collection plus the matrix topology.
///
/// Only constructible through [`Catalog::new`], so every playable
/// animation is known to have non-empty sequences and non-zero step
/// durations. The last slot conventionally holds the all-off animation
/// selected right before power-down.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<const N: usize> {
    animations: &'static [Animation<N>],
    pivot: usize,
}

impl<const N: usize> Catalog<N> {
    /// Validate and build a catalog.
    ///
    /// `pivot` is the matrix index where the two cascade halves meet.
    /// Usable in `const` context, so a compiled-in catalog that fails
    /// validation fails the build.
    pub const fn new(
        animations: &'static [Animation<N>],
        pivot: usize,
    ) -> Result<Self, CatalogError> {
        if animations.is_empty() {
            return Err(CatalogError::Empty);
        }
        if pivot == 0 || pivot >= N {
            return Err(CatalogError::BadPivot);
        }
        let mut index = 0;
        while index < animations.len() {
            let animation = &animations[index];
            if let Err(error) = validate_steps(animation.matrix) {
                return Err(error);
            }
            if let Err(error) = validate_steps(animation.accent) {
                return Err(error);
            }
            index += 1;
        }
        Ok(Self { animations, pivot })
    }

    /// Number of animations.
    pub const fn len(&self) -> usize {
        self.animations.len()
    }

    /// Always `false`; kept for API completeness.
    pub const fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Whether `index` addresses an animation.
    pub const fn contains(&self, index: u8) -> bool {
        (index as usize) < self.animations.len()
    }

    /// Animation at `index`. Out-of-range indices fall back to entry 0 so
    /// a stale persisted selection can never read out of bounds.
    pub fn animation(&self, index: usize) -> &Animation<N> {
        if index < self.animations.len() {
            &self.animations[index]
        } else {
            &self.animations[0]
        }
    }

    /// Index of the reserved all-off entry (the last slot).
    pub const fn all_off(&self) -> usize {
        self.animations.len() - 1
    }

    /// Matrix index where the two cascade halves meet.
    pub const fn pivot(&self) -> usize {
        self.pivot
    }
}

const fn validate_steps<const W: usize>(steps: &[Step<W>]) -> Result<(), CatalogError> {
    if steps.is_empty() {
        return Err(CatalogError::EmptySequence);
    }
    let mut index = 0;
    while index < steps.len() {
        let step = &steps[index];
        if step.duration_ms == 0 {
            return Err(CatalogError::ZeroDuration);
        }
        if step.op.contains(Opcode::REPEAT) && step.operand == 0 {
            return Err(CatalogError::ZeroRepeat);
        }
        if step.op.is_load() {
            let mut element = 0;
            while element < W {
                if step.deltas[element] < 0 || step.deltas[element] > MAX_LEVEL as i8 {
                    return Err(CatalogError::LoadOutOfRange);
                }
                element += 1;
            }
        }
        index += 1;
    }
    Ok(())
}
