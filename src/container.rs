//! Compressed container format.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! entry_count: u32
//! entry_count x { symbol: u8, count: u32 }   ascending symbol order
//! original_len: u32
//! bit_count: u32
//! ceil(bit_count / 8) packed bytes, MSB-first
//! ```

use crate::bits::BitSequence;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

/// Bytes per frequency entry.
const ENTRY_LEN: usize = 5;

/// Everything needed to reconstruct the input: the model, the symbol count
/// and the coded bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompressedContainer {
    frequencies: FrequencyTable,
    original_len: u32,
    bits: BitSequence,
}

impl CompressedContainer {
    /// Assemble a container from its parts.
    pub fn new(frequencies: FrequencyTable, original_len: u32, bits: BitSequence) -> Self {
        Self {
            frequencies,
            original_len,
            bits,
        }
    }

    /// The container for empty input.
    pub fn empty() -> Self {
        Self {
            frequencies: FrequencyTable::empty(),
            original_len: 0,
            bits: BitSequence::default(),
        }
    }

    /// The stored frequency table.
    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    /// Number of symbols in the original input.
    pub fn original_len(&self) -> usize {
        self.original_len as usize
    }

    /// The coded bits.
    pub fn bits(&self) -> &BitSequence {
        &self.bits
    }

    /// Size of [`CompressedContainer::to_bytes`] output.
    pub fn encoded_len(&self) -> usize {
        4 + self.frequencies.len() * ENTRY_LEN + 4 + self.bits.encoded_len()
    }

    /// Encoded size relative to the original (`encoded / original`).
    ///
    /// Returns `None` for empty input.
    pub fn compression_ratio(&self) -> Option<f64> {
        if self.original_len == 0 {
            return None;
        }
        Some(self.encoded_len() as f64 / f64::from(self.original_len))
    }

    /// Serialize to the container layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());

        out.extend_from_slice(&(self.frequencies.len() as u32).to_le_bytes());
        for (symbol, count) in self.frequencies.entries() {
            out.push(symbol);
            out.extend_from_slice(&count.to_le_bytes());
        }

        out.extend_from_slice(&self.original_len.to_le_bytes());
        self.bits.write_to(&mut out);
        out
    }

    /// Parse the container layout.
    ///
    /// # Errors
    /// Returns `Error::MalformedContainer` if a field is truncated, the
    /// frequency entries are invalid, the symbol count contradicts the
    /// table, or bytes follow the payload.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut off = 0usize;

        let mut take = |n: usize, what: &'static str| -> Result<&[u8]> {
            if bytes.len() - off < n {
                return Err(Error::MalformedContainer(format!(
                    "unexpected end of input reading {what}"
                )));
            }
            let slice = &bytes[off..off + n];
            off += n;
            Ok(slice)
        };

        let entry_count = read_u32(take(4, "entry count")?) as usize;
        if entry_count > 256 {
            return Err(Error::MalformedContainer(format!(
                "{entry_count} frequency entries declared, at most 256 possible"
            )));
        }
        let raw = take(entry_count * ENTRY_LEN, "frequency entries")?;
        let frequencies = FrequencyTable::from_entries(
            raw.chunks_exact(ENTRY_LEN)
                .map(|e| (e[0], read_u32(&e[1..]))),
        )
        .map_err(|e| Error::MalformedContainer(e.to_string()))?;

        let original_len = read_u32(take(4, "symbol count")?);

        let (bits, used) = BitSequence::read_from(&bytes[off..])?;
        if off + used != bytes.len() {
            return Err(Error::MalformedContainer(format!(
                "{} trailing bytes after payload",
                bytes.len() - off - used
            )));
        }

        let container = Self::new(frequencies, original_len, bits);
        container.validate()?;
        Ok(container)
    }

    /// Check that the symbol count agrees with the table.
    fn validate(&self) -> Result<()> {
        let total = self.frequencies.total();
        if self.original_len == 0 {
            if total != 0 || !self.bits.is_empty() {
                return Err(Error::MalformedContainer(
                    "zero symbols declared with a non-empty model or payload".to_string(),
                ));
            }
        } else if total == 0 {
            return Err(Error::MalformedContainer(format!(
                "{} symbols declared with an empty frequency table",
                self.original_len
            )));
        } else if total > u64::from(self.original_len) {
            return Err(Error::MalformedContainer(format!(
                "frequency total {total} exceeds declared symbol count {}",
                self.original_len
            )));
        }
        Ok(())
    }
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[..4]);
    u32::from_le_bytes(buf)
}
