//! Cumulative ranges over a frequency table.
//!
//! Each symbol owns the half-open slice `[low, high)` of `[0, total)`, laid out
//! in ascending symbol order. The layout is a pure function of the table, which
//! is what keeps encoder and decoder in step.

use crate::config::Precision;
use crate::error::{Error, Result};
use crate::frequency::{FrequencyTable, ALPHABET_SIZE};

/// A symbol's slice of the cumulative total.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymbolRange {
    /// Cumulative count of all smaller symbols.
    pub low: u32,
    /// `low` plus the symbol's own count.
    pub high: u32,
}

/// Cumulative ranges for every symbol of a table.
#[derive(Clone, Debug)]
pub struct CumulativeRanges {
    /// Present symbols in ascending order with their ranges.
    entries: Vec<(u8, SymbolRange)>,
    by_symbol: [Option<SymbolRange>; ALPHABET_SIZE],
    total: u32,
    precision: Precision,
}

impl CumulativeRanges {
    /// Lay out `table` for a coder of the given precision.
    ///
    /// # Errors
    /// Returns `Error::EmptyAlphabet` for an empty table and
    /// `Error::FrequencyOverflow` if the total exceeds
    /// [`Precision::max_total`].
    pub fn new(table: &FrequencyTable, precision: Precision) -> Result<Self> {
        if table.is_empty() {
            return Err(Error::EmptyAlphabet);
        }
        let limit = precision.max_total();
        let total = table.total();
        if total > u64::from(limit) {
            return Err(Error::FrequencyOverflow { total, limit });
        }

        let mut entries = Vec::with_capacity(table.len());
        let mut by_symbol = [None; ALPHABET_SIZE];
        let mut cumulative = 0u32;
        for (symbol, count) in table.entries() {
            let range = SymbolRange {
                low: cumulative,
                high: cumulative + count,
            };
            entries.push((symbol, range));
            by_symbol[symbol as usize] = Some(range);
            cumulative = range.high;
        }

        Ok(Self {
            entries,
            by_symbol,
            total: cumulative,
            precision,
        })
    }

    /// Sum of all counts.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Precision the layout was checked against.
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Number of symbols in the alphabet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Range of `symbol`, if it is in the alphabet.
    pub fn range(&self, symbol: u8) -> Option<SymbolRange> {
        self.by_symbol[symbol as usize]
    }

    /// The symbol whose range contains `scaled`.
    pub fn symbol_for(&self, scaled: u64) -> Option<(u8, SymbolRange)> {
        let idx = self
            .entries
            .partition_point(|(_, r)| u64::from(r.high) <= scaled);
        self.entries
            .get(idx)
            .copied()
            .filter(|(_, r)| u64::from(r.low) <= scaled)
    }

    /// Present symbols and their ranges, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, SymbolRange)> + '_ {
        self.entries.iter().copied()
    }
}
