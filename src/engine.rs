//! Timed instruction interpreter for both brightness channels.
//!
//! Animations run on a small virtual machine whose opcodes operate on the
//! channel brightness state. Each channel advances its own cursor against
//! a shared millisecond clock: the active step is found by walking the
//! sequence until the accumulated duration exceeds the channel clock, and
//! its effects run once per resolution (edge-triggered). The repeat flag
//! rewinds the clock to resolve the same step again, which is how a small
//! delta becomes a multi-tick fade without floating-point math.

use crate::catalog::Catalog;
use crate::frame::{Frame, MAX_LEVEL};
use crate::step::{Opcode, Step};

/// Per-channel playback position.
#[derive(Debug, Clone, Copy, Default)]
struct Cursor {
    /// Channel-local elapsed milliseconds.
    elapsed_ms: u16,
    /// Last step whose effects ran; `None` forces execution on the first
    /// evaluation after a reset.
    last_executed: Option<usize>,
    /// Remaining re-executions of the current repeat step.
    repeat_remaining: u8,
}

/// How a channel participates in matrix-shaped opcodes.
#[derive(Clone, Copy)]
enum Topology {
    /// Matrix ring split at the pivot; rotation and cascades apply.
    Ring { pivot: usize },
    /// Fixed color triple; rotation and cascades are no-ops.
    Fixed,
}

/// Interprets one catalog entry, advancing both channel cursors and
/// writing the brightness frame.
///
/// All entry points are foreground-only and non-reentrant; none blocks,
/// and the step walk is bounded by the longest catalog sequence.
pub struct Engine<'a, const N: usize> {
    catalog: &'a Catalog<N>,
    active: usize,
    matrix: Cursor,
    accent: Cursor,
    frame: Frame<N>,
    last_call: Option<u16>,
}

impl<'a, const N: usize> Engine<'a, N> {
    /// Engine over `catalog`, starting dark on animation 0.
    pub fn new(catalog: &'a Catalog<N>) -> Self {
        Self {
            catalog,
            active: 0,
            matrix: Cursor::default(),
            accent: Cursor::default(),
            frame: Frame::new(),
            last_call: None,
        }
    }

    /// Currently active catalog index.
    pub fn active(&self) -> usize {
        self.active
    }

    /// The catalog this engine plays from.
    pub fn catalog(&self) -> &'a Catalog<N> {
        self.catalog
    }

    /// Shared brightness state for the output driver.
    pub fn frame(&self) -> &Frame<N> {
        &self.frame
    }

    /// Select a new animation.
    ///
    /// In-range indices activate with both cursors and channel clocks
    /// reset; out-of-range indices are silently ignored.
    pub fn select(&mut self, index: u8) {
        if self.catalog.contains(index) {
            engine_trace!("engine: animation {} selected", index);
            self.active = index as usize;
            self.reset_playback();
        }
    }

    /// Restart the active animation from phase zero.
    ///
    /// Equivalent to a fresh [`select`](Self::select) of the active
    /// index; the pairing link uses this to re-align two devices.
    pub fn resync(&mut self) {
        self.reset_playback();
    }

    /// Advance playback to `now_ms` and refresh the frame.
    ///
    /// Call at least once per distinguishable millisecond from the main
    /// loop. The elapsed delta uses wrapping 16-bit arithmetic, so clock
    /// wraparound is harmless; calls within the same millisecond are
    /// no-ops.
    pub fn cycle(&mut self, now_ms: u16) {
        let Some(last) = self.last_call else {
            self.last_call = Some(now_ms);
            return;
        };
        if now_ms == last {
            return;
        }
        let delta = now_ms.wrapping_sub(last);
        self.matrix.elapsed_ms = self.matrix.elapsed_ms.wrapping_add(delta);
        self.accent.elapsed_ms = self.accent.elapsed_ms.wrapping_add(delta);

        let catalog = self.catalog;
        let animation = catalog.animation(self.active);

        // Matrix first: its wraparound re-aligns the accent clock to the
        // start of the loop.
        let wrapped = run_channel(
            &mut self.matrix,
            animation.matrix,
            &mut self.frame.matrix,
            Topology::Ring {
                pivot: catalog.pivot(),
            },
        );
        if wrapped {
            self.accent.elapsed_ms = 0;
        }
        run_channel(
            &mut self.accent,
            animation.accent,
            &mut self.frame.accent,
            Topology::Fixed,
        );

        self.last_call = Some(now_ms);
    }

    fn reset_playback(&mut self) {
        self.matrix = Cursor::default();
        self.accent = Cursor::default();
    }
}

/// Resolve one channel's current step and run its effects if it has not
/// executed yet. Returns whether the sequence wrapped back to its start.
fn run_channel<const W: usize>(
    cursor: &mut Cursor,
    steps: &[Step<W>],
    levels: &mut [u8; W],
    topology: Topology,
) -> bool {
    let mut resolved = None;
    let mut sum: u16 = 0;
    for (index, step) in steps.iter().enumerate() {
        sum = sum.wrapping_add(step.duration_ms);
        if sum > cursor.elapsed_ms {
            resolved = Some(index);
            break;
        }
    }
    let mut wrapped = false;
    let resolved = match resolved {
        Some(index) => index,
        None => {
            // Walked past the end: restart the loop.
            cursor.elapsed_ms = 0;
            wrapped = true;
            0
        }
    };
    if cursor.last_executed != Some(resolved) {
        execute(cursor, &steps[resolved], resolved, levels, topology);
    }
    wrapped
}

/// Run one instruction's effect pipeline. The order is fixed and not
/// negotiable; reordering changes both the numeric and the visual result.
#[allow(clippy::cast_sign_loss)]
fn execute<const W: usize>(
    cursor: &mut Cursor,
    step: &Step<W>,
    index: usize,
    levels: &mut [u8; W],
    topology: Topology,
) {
    if step.op.is_load() {
        for (level, delta) in levels.iter_mut().zip(&step.deltas) {
            *level = *delta as u8;
        }
        cursor.last_executed = Some(index);
        return;
    }

    if step.op.contains(Opcode::ADD) {
        for (level, delta) in levels.iter_mut().zip(&step.deltas) {
            let next = level.wrapping_add(*delta as u8);
            // Leaving the level range resets to black, it does not clamp.
            *level = if next > MAX_LEVEL { 0 } else { next };
        }
    }
    if let Topology::Ring { pivot } = topology {
        if step.op.contains(Opcode::ROTATE_RIGHT) {
            levels.rotate_right(1);
        }
        if step.op.contains(Opcode::ROTATE_LEFT) {
            levels.rotate_left(1);
        }
        if step.op.contains(Opcode::SOURCE_UP) {
            source_up(levels, &step.deltas, pivot);
        }
        if step.op.contains(Opcode::SOURCE_DOWN) {
            source_down(levels, &step.deltas, pivot);
        }
    }
    if step.op.contains(Opcode::DIV) {
        for (level, delta) in levels.iter_mut().zip(&step.deltas) {
            let divisor = *delta as u8;
            if divisor != 0 {
                *level /= divisor;
            }
        }
    }

    if step.op.contains(Opcode::REPEAT) {
        if cursor.repeat_remaining == 0 {
            // First encounter: arm the counter and rewind the clock so
            // this step resolves again.
            cursor.repeat_remaining = step.operand;
            cursor.elapsed_ms = cursor.elapsed_ms.wrapping_sub(step.duration_ms);
        } else {
            cursor.repeat_remaining -= 1;
            if cursor.repeat_remaining != 0 {
                cursor.elapsed_ms = cursor.elapsed_ms.wrapping_sub(step.duration_ms);
            } else {
                cursor.last_executed = Some(index);
            }
        }
    } else {
        cursor.last_executed = Some(index);
    }
}

/// Saturate a level into the valid range; returns the signed excess.
#[allow(clippy::cast_possible_wrap)]
fn saturate(level: &mut u8) -> i8 {
    let value = *level as i8;
    if value < 0 {
        *level = 0;
        value
    } else if value > MAX_LEVEL as i8 {
        *level = MAX_LEVEL;
        value - MAX_LEVEL as i8
    } else {
        0
    }
}

/// Pour each delta into its element and carry saturation excess toward
/// the pivot, half by half. Carries clamp; they never wrap.
#[allow(clippy::cast_sign_loss, clippy::needless_range_loop)]
fn source_up<const W: usize>(levels: &mut [u8; W], deltas: &[i8; W], pivot: usize) {
    // Lower half: carries climb toward the pivot.
    for index in 0..pivot - 1 {
        levels[index] = levels[index].wrapping_add(deltas[index] as u8);
        for inner in index..pivot - 1 {
            let carry = saturate(&mut levels[inner]);
            levels[inner + 1] = levels[inner + 1].wrapping_add(carry as u8);
        }
    }
    levels[pivot - 1] = levels[pivot - 1].wrapping_add(deltas[pivot - 1] as u8);
    saturate(&mut levels[pivot - 1]);
    // Upper half: carries descend toward the pivot.
    for index in (pivot + 1..W).rev() {
        levels[index] = levels[index].wrapping_add(deltas[index] as u8);
        for inner in (pivot + 1..W).rev() {
            let carry = saturate(&mut levels[inner]);
            levels[inner - 1] = levels[inner - 1].wrapping_add(carry as u8);
        }
    }
    levels[pivot] = levels[pivot].wrapping_add(deltas[pivot] as u8);
    saturate(&mut levels[pivot]);
}

/// Pour each delta into its element and carry saturation excess away from
/// the pivot, half by half. Carries clamp; they never wrap.
#[allow(clippy::cast_sign_loss, clippy::needless_range_loop)]
fn source_down<const W: usize>(levels: &mut [u8; W], deltas: &[i8; W], pivot: usize) {
    // Lower half: carries descend toward the first element.
    for index in (1..pivot).rev() {
        levels[index] = levels[index].wrapping_add(deltas[index] as u8);
        for inner in (1..=index).rev() {
            let carry = saturate(&mut levels[inner]);
            levels[inner - 1] = levels[inner - 1].wrapping_add(carry as u8);
        }
    }
    levels[0] = levels[0].wrapping_add(deltas[0] as u8);
    saturate(&mut levels[0]);
    // Upper half: carries climb toward the last element.
    for index in pivot..W - 1 {
        levels[index] = levels[index].wrapping_add(deltas[index] as u8);
        for inner in pivot..W - 1 {
            let carry = saturate(&mut levels[inner]);
            levels[inner + 1] = levels[inner + 1].wrapping_add(carry as u8);
        }
    }
    levels[W - 1] = levels[W - 1].wrapping_add(deltas[W - 1] as u8);
    saturate(&mut levels[W - 1]);
}
