//! Interval state shared by the encoder and decoder.
//!
//! Both directions narrow and renormalize `[low, high]` with exactly the same
//! arithmetic; only what happens on each shift differs (emit bits vs. pull
//! bits). Keeping that arithmetic in one place is what makes them symmetric.

use crate::config::Precision;
use crate::cumulative::SymbolRange;

/// One renormalization step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shift {
    /// `high < half`: the next bit is 0.
    Lower,
    /// `low >= half`: the next bit is 1.
    Upper,
    /// `first_quarter <= low` and `high < third_quarter`: bit deferred.
    Middle,
}

/// The working interval `[low, high]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoderState {
    /// Inclusive lower bound.
    pub low: u32,
    /// Inclusive upper bound.
    pub high: u32,
    precision: Precision,
}

impl CoderState {
    /// The full interval `[0, top]`.
    pub fn new(precision: Precision) -> Self {
        Self {
            low: 0,
            high: precision.top(),
            precision,
        }
    }

    /// Precision this state runs at.
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Width of the interval, `high - low + 1`.
    pub fn range(&self) -> u64 {
        u64::from(self.high - self.low) + 1
    }

    /// Narrow to the sub-interval of `symbol` out of `total`.
    ///
    /// `total` must be nonzero and at most `precision.max_total()`.
    pub fn narrow(&mut self, symbol: SymbolRange, total: u32) {
        let range = self.range();
        let total = u64::from(total);
        let low = u64::from(self.low);
        self.high = (low + range * u64::from(symbol.high) / total - 1) as u32;
        self.low = (low + range * u64::from(symbol.low) / total) as u32;
    }

    /// The renormalization step that applies now, if any.
    pub fn next_shift(&self) -> Option<Shift> {
        let p = self.precision;
        if self.high < p.half() {
            Some(Shift::Lower)
        } else if self.low >= p.half() {
            Some(Shift::Upper)
        } else if self.low >= p.first_quarter() && self.high < p.third_quarter() {
            Some(Shift::Middle)
        } else {
            None
        }
    }

    /// Amount subtracted from the registers before shifting.
    pub fn offset(&self, shift: Shift) -> u32 {
        match shift {
            Shift::Lower => 0,
            Shift::Upper => self.precision.half(),
            Shift::Middle => self.precision.first_quarter(),
        }
    }

    /// Apply `shift`: subtract its offset and double, `high` gaining a 1 bit.
    pub fn apply(&mut self, shift: Shift) {
        let offset = self.offset(shift);
        self.low = (self.low - offset) << 1;
        self.high = ((self.high - offset) << 1) | 1;
    }
}
