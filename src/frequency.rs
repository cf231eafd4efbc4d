//! Order-0 frequency table.
//!
//! Counts are kept per byte value, so iteration is always in ascending symbol
//! order no matter how the table was built. Encoder and decoder rely on that
//! order to lay out identical cumulative ranges.

use tracing::warn;

use crate::config::{CoderConfig, OverflowPolicy};
use crate::error::{Error, Result};

/// Number of distinct symbols (byte values).
pub const ALPHABET_SIZE: usize = 256;

/// Symbol counts for one compression run.
///
/// Equality compares the stored counts only. How the table was built
/// ([`observed_total`](Self::observed_total), [`is_rescaled`](Self::is_rescaled))
/// is not part of the container: a parsed table reports its stored total as
/// observed and is never marked rescaled.
#[derive(Clone, Debug)]
pub struct FrequencyTable {
    counts: [u32; ALPHABET_SIZE],
    observed_total: u64,
    rescaled: bool,
}

impl FrequencyTable {
    /// Count the symbols of `data` and fit them to the coder capacity.
    ///
    /// Counts are stored verbatim when their total fits
    /// [`Precision::max_total`](crate::config::Precision::max_total).
    /// Otherwise the table is rescaled or rejected according to
    /// `config.overflow`.
    ///
    /// # Errors
    /// Returns `Error::FrequencyOverflow` under [`OverflowPolicy::Reject`]
    /// when the total exceeds the capacity.
    pub fn from_bytes(data: &[u8], config: &CoderConfig) -> Result<Self> {
        let mut observed = [0u64; ALPHABET_SIZE];
        for &b in data {
            observed[b as usize] += 1;
        }
        Self::fit(&observed, config)
    }

    /// A table with no symbols.
    pub fn empty() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
            observed_total: 0,
            rescaled: false,
        }
    }

    /// Build a table from explicit `(symbol, count)` entries in any order.
    ///
    /// The table is taken as-is; no capacity check happens here.
    ///
    /// # Errors
    /// Returns `Error::InvalidFrequency` for a zero count and
    /// `Error::DuplicateSymbol` if a symbol repeats.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u32)>,
    {
        let mut counts = [0u32; ALPHABET_SIZE];
        let mut total = 0u64;
        for (symbol, count) in entries {
            if count == 0 {
                return Err(Error::InvalidFrequency { symbol, count });
            }
            let slot = &mut counts[symbol as usize];
            if *slot != 0 {
                return Err(Error::DuplicateSymbol(symbol));
            }
            *slot = count;
            total += u64::from(count);
        }
        Ok(Self {
            counts,
            observed_total: total,
            rescaled: false,
        })
    }

    fn fit(observed: &[u64; ALPHABET_SIZE], config: &CoderConfig) -> Result<Self> {
        let total: u64 = observed.iter().sum();
        let limit = config.precision.max_total();

        if total <= u64::from(limit) {
            let mut counts = [0u32; ALPHABET_SIZE];
            for (c, &o) in counts.iter_mut().zip(observed) {
                // o <= total <= limit
                *c = o as u32;
            }
            return Ok(Self {
                counts,
                observed_total: total,
                rescaled: false,
            });
        }

        match config.overflow {
            OverflowPolicy::Reject => Err(Error::FrequencyOverflow { total, limit }),
            OverflowPolicy::Rescale => {
                let counts = rescale(observed, total, limit);
                let (symbol, count) = observed
                    .iter()
                    .enumerate()
                    .max_by_key(|&(_, &c)| c)
                    .map(|(s, &c)| (s, c))
                    .unwrap_or_default();
                warn!(
                    observed_total = total,
                    limit,
                    most_frequent = symbol,
                    most_frequent_count = count,
                    "symbol frequencies exceed coder capacity; rescaling"
                );
                Ok(Self {
                    counts,
                    observed_total: total,
                    rescaled: true,
                })
            }
        }
    }

    /// Stored count of `symbol` (0 if absent).
    pub fn count(&self, symbol: u8) -> u32 {
        self.counts[symbol as usize]
    }

    /// Present symbols and their counts, in ascending symbol order.
    pub fn entries(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(s, &c)| (s as u8, c))
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// True if no symbol is present.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Sum of the stored counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Sum of the counts before any rescaling.
    pub fn observed_total(&self) -> u64 {
        self.observed_total
    }

    /// True if the stored counts were scaled down from the observed ones.
    pub fn is_rescaled(&self) -> bool {
        self.rescaled
    }
}

impl PartialEq for FrequencyTable {
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl Eq for FrequencyTable {}

/// Scale `observed` so the total is at most `limit`, keeping every present
/// symbol at a count of at least 1.
fn rescale(observed: &[u64; ALPHABET_SIZE], total: u64, limit: u32) -> [u32; ALPHABET_SIZE] {
    let mut counts = [0u32; ALPHABET_SIZE];
    let mut sum = 0u64;
    for (c, &o) in counts.iter_mut().zip(observed) {
        if o > 0 {
            let scaled = u128::from(o) * u128::from(limit) / u128::from(total);
            *c = (scaled as u32).max(1);
            sum += u64::from(*c);
        }
    }

    // Floors sum to <= limit; only the symbols lifted to 1 can push us over.
    // Take the excess from the largest count, lowest symbol on ties.
    while sum > u64::from(limit) {
        let Some((idx, _)) = counts.iter().enumerate().rev().max_by_key(|&(_, &c)| c) else {
            break;
        };
        counts[idx] -= 1;
        sum -= 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Precision;
    use proptest::prelude::*;

    #[test]
    fn test_counts_in_ascending_order() {
        let table = FrequencyTable::from_bytes(b"DCCBBBAAAA", &CoderConfig::default()).unwrap();
        let entries: Vec<_> = table.entries().collect();
        assert_eq!(entries, vec![(b'A', 4), (b'B', 3), (b'C', 2), (b'D', 1)]);
        assert_eq!(table.len(), 4);
        assert_eq!(table.total(), 10);
        assert!(!table.is_rescaled());
    }

    #[test]
    fn test_empty_input() {
        let table = FrequencyTable::from_bytes(&[], &CoderConfig::default()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn test_single_symbol_at_capacity_is_kept() {
        let data = vec![7u8; Precision::DEFAULT.max_total() as usize];
        let table = FrequencyTable::from_bytes(&data, &CoderConfig::default()).unwrap();
        assert_eq!(table.count(7), 16383);
        assert!(!table.is_rescaled());
    }

    #[test]
    fn test_overflow_rescales() {
        let mut data = vec![b'a'; 40_000];
        data.extend(std::iter::repeat(b'b').take(3));
        let table = FrequencyTable::from_bytes(&data, &CoderConfig::default()).unwrap();
        assert!(table.is_rescaled());
        assert_eq!(table.observed_total(), 40_003);
        assert!(table.total() <= u64::from(Precision::DEFAULT.max_total()));
        assert_eq!(table.count(b'b'), 1);
        assert!(table.count(b'a') > 16_000);
    }

    #[test]
    fn test_overflow_rejected() {
        let data = vec![0u8; 20_000];
        let config = CoderConfig::default().with_overflow_policy(OverflowPolicy::Reject);
        let err = FrequencyTable::from_bytes(&data, &config).unwrap_err();
        assert!(matches!(
            err,
            Error::FrequencyOverflow {
                total: 20_000,
                limit: 16383
            }
        ));
    }

    #[test]
    fn test_from_entries_rejects_bad_input() {
        assert!(matches!(
            FrequencyTable::from_entries([(1, 3), (2, 0)]),
            Err(Error::InvalidFrequency { symbol: 2, count: 0 })
        ));
        assert!(matches!(
            FrequencyTable::from_entries([(1, 3), (1, 4)]),
            Err(Error::DuplicateSymbol(1))
        ));
    }

    #[test]
    fn test_from_entries_order_independent() {
        let a = FrequencyTable::from_entries([(b'z', 1), (b'a', 5), (b'm', 2)]).unwrap();
        let b = FrequencyTable::from_entries([(b'a', 5), (b'm', 2), (b'z', 1)]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_ignores_build_history() {
        let data = vec![b'q'; 50_000];
        let built = FrequencyTable::from_bytes(&data, &CoderConfig::default()).unwrap();
        let stored = FrequencyTable::from_entries(built.entries()).unwrap();
        assert!(built.is_rescaled());
        assert!(!stored.is_rescaled());
        assert_eq!(stored.observed_total(), stored.total());
        assert_eq!(built, stored);
    }

    proptest! {
        #[test]
        fn prop_rescale_fits_and_keeps_support(
            observed in prop::collection::vec(0u64..1_000_000, ALPHABET_SIZE),
        ) {
            let mut arr = [0u64; ALPHABET_SIZE];
            arr.copy_from_slice(&observed);
            let total: u64 = arr.iter().sum();
            prop_assume!(total > 16383);

            let counts = rescale(&arr, total, 16383);
            let sum: u64 = counts.iter().map(|&c| u64::from(c)).sum();
            let present = arr.iter().filter(|&&o| o > 0).count() as u64;
            prop_assert!(sum <= 16383);
            prop_assert!(sum + present > 16383);
            for (o, c) in arr.iter().zip(counts.iter()) {
                prop_assert_eq!(*o > 0, *c > 0);
            }
        }
    }
}
