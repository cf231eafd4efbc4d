//! Arithmetic decoder.
//!
//! Mirrors [`ArithmeticEncoder`](crate::encoder::ArithmeticEncoder): a value
//! register tracks where the encoded number sits inside `[low, high]` and is
//! shifted exactly as the bounds are, pulling in the next stream bit (or 0
//! once the stream is exhausted).

use crate::bits::{BitSequence, BitSource};
use crate::cumulative::CumulativeRanges;
use crate::error::{Error, Result};
use crate::state::CoderState;

/// Upper bound on the output buffer reserved before decoding starts.
const INITIAL_RESERVE: usize = 1 << 20;

/// Arithmetic decoder over a static model.
pub struct ArithmeticDecoder<'a> {
    ranges: &'a CumulativeRanges,
    state: CoderState,
    value: u32,
    input: BitSource<'a>,
    position: usize,
}

impl<'a> ArithmeticDecoder<'a> {
    /// Create a decoder and prime its value register with the first
    /// `precision` bits of `bits`, at the precision `ranges` were built for.
    pub fn new(ranges: &'a CumulativeRanges, bits: &'a BitSequence) -> Result<Self> {
        let precision = ranges.precision();
        let mut input = BitSource::new(bits);
        let mut value = 0u32;
        for _ in 0..precision.bits() {
            value = (value << 1) | u32::from(input.next_bit()?.unwrap_or(false));
        }
        Ok(Self {
            ranges,
            state: CoderState::new(precision),
            value,
            input,
            position: 0,
        })
    }

    /// Decode the next symbol.
    ///
    /// # Errors
    /// Returns `Error::UnmatchedScaledValue` or `Error::Desynchronized` when
    /// the stream does not belong to this model.
    pub fn decode(&mut self) -> Result<u8> {
        let position = self.position;
        let total = self.ranges.total();
        let offset_in_range = self
            .value
            .checked_sub(self.state.low)
            .filter(|_| self.value <= self.state.high)
            .ok_or(Error::Desynchronized { position })?;

        let scaled =
            ((u64::from(offset_in_range) + 1) * u64::from(total) - 1) / self.state.range();
        let (symbol, range) = self
            .ranges
            .symbol_for(scaled)
            .ok_or(Error::UnmatchedScaledValue {
                position,
                scaled,
                total,
            })?;

        self.state.narrow(range, total);
        while let Some(shift) = self.state.next_shift() {
            let offset = self.state.offset(shift);
            self.state.apply(shift);
            let bit = u32::from(self.input.next_bit()?.unwrap_or(false));
            let rebased = self
                .value
                .checked_sub(offset)
                .ok_or(Error::Desynchronized { position })?;
            self.value = (rebased << 1) | bit;
        }

        self.position += 1;
        Ok(symbol)
    }

    /// Decode exactly `count` symbols.
    ///
    /// `count` usually comes from an untrusted container, so only a bounded
    /// buffer is reserved up front.
    pub fn decode_all(mut self, count: usize) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(count.min(INITIAL_RESERVE));
        for _ in 0..count {
            out.push(self.decode()?);
        }
        Ok(out)
    }

    /// Number of symbols decoded so far.
    pub fn position(&self) -> usize {
        self.position
    }
}
