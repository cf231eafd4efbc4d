//! Arithmetic encoder.
//!
//! Follows the classic Witten–Neal–Cleary scheme: settled leading bits are
//! shifted out as soon as the interval falls in one half, and straddling the
//! midpoint inside the middle half is deferred through a pending-bit counter.

use crate::bits::{BitSequence, BitSink};
use crate::cumulative::CumulativeRanges;
use crate::error::{Error, Result};
use crate::state::{CoderState, Shift};

/// Arithmetic encoder over a static model.
pub struct ArithmeticEncoder<'a> {
    ranges: &'a CumulativeRanges,
    state: CoderState,
    /// Bits whose value is the complement of the next settled bit.
    pending: u32,
    output: BitSink,
}

impl<'a> ArithmeticEncoder<'a> {
    /// Create an encoder for the model `ranges`, at the precision the
    /// ranges were built for.
    pub fn new(ranges: &'a CumulativeRanges) -> Self {
        Self {
            ranges,
            state: CoderState::new(ranges.precision()),
            pending: 0,
            output: BitSink::new(),
        }
    }

    /// Encode one symbol.
    ///
    /// # Errors
    /// Returns `Error::UnknownSymbol` if `symbol` is not in the model and
    /// `Error::BitCountOverflow` if the output outgrows the container.
    pub fn encode(&mut self, symbol: u8) -> Result<()> {
        let range = self
            .ranges
            .range(symbol)
            .ok_or(Error::UnknownSymbol(symbol))?;
        self.state.narrow(range, self.ranges.total());

        while let Some(shift) = self.state.next_shift() {
            match shift {
                Shift::Lower => self.emit(false)?,
                Shift::Upper => self.emit(true)?,
                Shift::Middle => self.pending += 1,
            }
            self.state.apply(shift);
        }
        Ok(())
    }

    /// Encode every symbol of `data`.
    pub fn encode_all(&mut self, data: &[u8]) -> Result<()> {
        for &symbol in data {
            self.encode(symbol)?;
        }
        Ok(())
    }

    /// Emit a settled bit followed by the deferred complementary bits.
    fn emit(&mut self, bit: bool) -> Result<()> {
        self.output.push(bit)?;
        self.output.push_repeated(!bit, self.pending)?;
        self.pending = 0;
        Ok(())
    }

    /// Number of deferred bits.
    pub fn pending(&self) -> u32 {
        self.pending
    }

    /// Current interval.
    pub fn state(&self) -> CoderState {
        self.state
    }

    /// Finish encoding and return the bit sequence.
    ///
    /// Two more bits (plus any pending ones) select a quarter of the final
    /// interval, so the decoder's zero-padded value lands inside it.
    pub fn finish(mut self) -> Result<BitSequence> {
        self.pending += 1;
        let bit = self.state.low >= self.state.precision().first_quarter();
        self.emit(bit)?;
        self.output.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Precision;
    use crate::frequency::FrequencyTable;

    fn ranges(entries: &[(u8, u32)]) -> CumulativeRanges {
        let table = FrequencyTable::from_entries(entries.iter().copied()).unwrap();
        CumulativeRanges::new(&table, Precision::DEFAULT).unwrap()
    }

    #[test]
    fn test_two_symbol_bits() {
        let r = ranges(&[(b'A', 1), (b'B', 1)]);
        let mut enc = ArithmeticEncoder::new(&r);
        enc.encode_all(b"AB").unwrap();
        let bits: Vec<bool> = enc.finish().unwrap().iter().collect();
        assert_eq!(bits, vec![false, true, false, true]);
    }

    #[test]
    fn test_single_symbol_emits_only_terminator() {
        let r = ranges(&[(b'x', 3)]);
        let mut enc = ArithmeticEncoder::new(&r);
        enc.encode_all(b"xxx").unwrap();
        let bits: Vec<bool> = enc.finish().unwrap().iter().collect();
        assert_eq!(bits, vec![false, true]);
    }

    #[test]
    fn test_middle_defers_bits() {
        let r = ranges(&[(0, 1), (1, 2), (2, 1)]);
        let mut enc = ArithmeticEncoder::new(&r);
        enc.encode(1).unwrap();
        assert_eq!(enc.pending(), 1);
        let bits: Vec<bool> = enc.finish().unwrap().iter().collect();
        // low == 0 after the middle shift: 0 then pending + 1 ones.
        assert_eq!(bits, vec![false, true, true]);
    }

    #[test]
    fn test_unknown_symbol() {
        let r = ranges(&[(b'a', 1)]);
        let mut enc = ArithmeticEncoder::new(&r);
        assert!(matches!(enc.encode(b'b'), Err(Error::UnknownSymbol(b'b'))));
    }
}
