//! Coder configuration.
//!
//! The coder's numeric range is a fixed-point binary fraction of `bits` bits.
//! Every threshold used by renormalization is derived from that one width.

use crate::error::{Error, Result};

/// Smallest supported coder width. At 12 bits the capacity (1023) still
/// leaves room for all 256 byte values.
pub const MIN_PRECISION_BITS: u32 = 12;

/// Largest supported coder width. `high << 1 | 1` must stay inside `u32`.
pub const MAX_PRECISION_BITS: u32 = 30;

/// Bit width of the coder's `low`/`high` registers and the values derived from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Precision {
    bits: u32,
}

impl Precision {
    /// The reference 16-bit coder.
    pub const DEFAULT: Precision = Precision { bits: 16 };

    /// Create a precision of `bits` bits.
    ///
    /// # Errors
    /// Returns `Error::InvalidPrecision` outside
    /// `MIN_PRECISION_BITS..=MAX_PRECISION_BITS`.
    pub fn new(bits: u32) -> Result<Self> {
        if !(MIN_PRECISION_BITS..=MAX_PRECISION_BITS).contains(&bits) {
            return Err(Error::InvalidPrecision(bits));
        }
        Ok(Self { bits })
    }

    /// Register width in bits.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Upper bound of the initial interval, `2^bits - 1`.
    pub const fn top(&self) -> u32 {
        (1 << self.bits) - 1
    }

    /// First quarter point.
    pub const fn first_quarter(&self) -> u32 {
        (self.top() + 1) / 4
    }

    /// Midpoint.
    pub const fn half(&self) -> u32 {
        2 * self.first_quarter()
    }

    /// Third quarter point.
    pub const fn third_quarter(&self) -> u32 {
        3 * self.first_quarter()
    }

    /// Largest frequency total the coder can represent.
    ///
    /// After renormalization the interval is always wider than a quarter, so
    /// any total below `first_quarter` gives every symbol a non-empty slice.
    pub const fn max_total(&self) -> u32 {
        self.first_quarter() - 1
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What to do when observed frequencies exceed the coder capacity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OverflowPolicy {
    /// Scale counts down proportionally and log a warning.
    #[default]
    Rescale,
    /// Fail with `Error::FrequencyOverflow`.
    Reject,
}

/// Settings shared by compression and decompression.
///
/// The container does not record these, so both sides must agree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CoderConfig {
    /// Coder register width.
    pub precision: Precision,
    /// Frequency overflow handling.
    pub overflow: OverflowPolicy,
}

impl CoderConfig {
    /// Replace the precision.
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Replace the overflow policy.
    pub fn with_overflow_policy(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }
}
