//! Row visitation schedules for the setup and wandering phases.
//!
//! During setup, each new row is mixed with an earlier row `row*` picked
//! deterministically: `row*` cycles through a window of earlier rows whose
//! size doubles every time the cycle closes, with a step that alternates
//! around the window size.
//!
//! During wandering, rows are visited with a fixed stride per pass (about
//! half the matrix on odd passes, `-1` on even passes) and `row*` is taken
//! from the sponge state.

/// Setup-phase selector for `row*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SetupSchedule {
    /// Row revisited by the next setup step.
    pub rowa: usize,
    /// Visitation step inside the current window.
    pub step: usize,
    /// Size of the revisitation window, always a power of two.
    pub window: usize,
    /// Correction applied to the step when the window grows; `1` or `-1`.
    pub gap: isize,
}

impl SetupSchedule {
    pub(crate) fn new() -> Self {
        Self {
            rowa: 0,
            step: 1,
            window: 2,
            gap: 1,
        }
    }

    /// Moves `row*` forward after a setup step.
    ///
    /// Returns `true` when every row of the window has been revisited, in
    /// which case the step and window are updated for the next cycle.
    pub(crate) fn advance(&mut self) -> bool {
        self.rowa = (self.rowa + self.step) & (self.window - 1);

        if self.rowa != 0 {
            return false;
        }

        self.step = self.window.wrapping_add_signed(self.gap);
        self.window *= 2;
        self.gap = -self.gap;
        true
    }
}

/// Stride of wandering pass `tau` (1-based), as an unsigned 64-bit value.
///
/// Odd passes move by `rows / 2 - 1`; even passes move by `-1`, encoded as
/// `u64::MAX` and applied with wrapping arithmetic.
pub(crate) fn wandering_step(tau: u64, rows: usize) -> u64 {
    if tau % 2 == 0 {
        u64::MAX
    } else {
        (rows / 2 - 1) as u64
    }
}

/// Next row visited during wandering: `(row + step) mod 2⁶⁴ mod rows`.
#[inline]
pub(crate) fn next_wandering_row(row: usize, step: u64, rows: usize) -> usize {
    ((row as u64).wrapping_add(step) % rows as u64) as usize
}

/// Pseudo-random `row*` drawn from the first state word, read as unsigned.
#[inline]
pub(crate) fn random_row(state_word: u64, rows: usize) -> usize {
    (state_word % rows as u64) as usize
}
