//! Whole-buffer compression and decompression.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::CoderConfig;
use crate::container::CompressedContainer;
use crate::cumulative::CumulativeRanges;
use crate::decoder::ArithmeticDecoder;
use crate::encoder::ArithmeticEncoder;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

/// Compressor/decompressor bound to one [`CoderConfig`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Codec {
    config: CoderConfig,
}

impl Codec {
    /// Create a codec with the given configuration.
    pub fn new(config: CoderConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &CoderConfig {
        &self.config
    }

    /// Compress `data` into a container.
    ///
    /// Empty input yields [`CompressedContainer::empty`].
    ///
    /// # Errors
    /// Returns `Error::InputTooLarge` past `u32::MAX` bytes,
    /// `Error::FrequencyOverflow` under `OverflowPolicy::Reject`, and
    /// `Error::BitCountOverflow` if the payload outgrows the container.
    pub fn compress(&self, data: &[u8]) -> Result<CompressedContainer> {
        if data.is_empty() {
            debug!("empty input, emitting empty container");
            return Ok(CompressedContainer::empty());
        }
        let original_len =
            u32::try_from(data.len()).map_err(|_| Error::InputTooLarge(data.len()))?;
        let precision = self.config.precision;

        let table = FrequencyTable::from_bytes(data, &self.config)?;
        let ranges = CumulativeRanges::new(&table, precision)?;

        let mut encoder = ArithmeticEncoder::new(&ranges);
        encoder.encode_all(data)?;
        let bits = encoder.finish()?;

        let container = CompressedContainer::new(table, original_len, bits);
        debug!(
            input_len = data.len(),
            alphabet = ranges.len(),
            total = ranges.total(),
            bits = container.bits().len(),
            encoded_len = container.encoded_len(),
            "compressed"
        );
        Ok(container)
    }

    /// Reconstruct the original bytes from `container`.
    ///
    /// # Errors
    /// Returns `Error::MalformedContainer` for a non-empty container without a
    /// model or with a symbol count the model could not have produced.
    /// Returns `Error::FrequencyOverflow` if the stored table does not fit this
    /// codec's precision, and the decoder's errors for a corrupt payload.
    pub fn decompress(&self, container: &CompressedContainer) -> Result<Vec<u8>> {
        let len = container.original_len();
        if len == 0 {
            return Ok(Vec::new());
        }
        let precision = self.config.precision;
        let ranges =
            CumulativeRanges::new(container.frequencies(), precision).map_err(|e| match e {
                Error::EmptyAlphabet => Error::MalformedContainer(format!(
                    "{len} symbols declared with an empty frequency table"
                )),
                other => other,
            })?;
        check_symbol_count(&ranges, len)?;

        let out = ArithmeticDecoder::new(&ranges, container.bits())?.decode_all(len)?;
        debug!(
            output_len = out.len(),
            alphabet = ranges.len(),
            bits = container.bits().len(),
            "decompressed"
        );
        Ok(out)
    }

    /// Compress `data` straight to the serialized container.
    pub fn compress_to_vec(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(self.compress(data)?.to_bytes())
    }

    /// Parse a serialized container and decompress it.
    pub fn decompress_from_slice(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        self.decompress(&CompressedContainer::from_bytes(bytes)?)
    }

    /// Read all of `input`, compress it and write the container to `output`.
    pub fn compress_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<CompressedContainer> {
        let data = fs::read(input.as_ref())?;
        let container = self.compress(&data)?;
        fs::write(output.as_ref(), container.to_bytes())?;
        Ok(container)
    }

    /// Read a container from `input`, decompress it and write the bytes to
    /// `output`. Returns the number of bytes written.
    pub fn decompress_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<usize> {
        let bytes = fs::read(input.as_ref())?;
        let data = self.decompress_from_slice(&bytes)?;
        fs::write(output.as_ref(), &data)?;
        Ok(data.len())
    }
}

/// Reject a declared symbol count that the stored model could not have come
/// from.
///
/// Counts are kept verbatim up to the coder capacity, so the total then
/// equals the symbol count. Above it they are rescaled, which leaves a total
/// within one count per symbol of the capacity.
fn check_symbol_count(ranges: &CumulativeRanges, len: usize) -> Result<()> {
    let total = u64::from(ranges.total());
    let limit = u64::from(ranges.precision().max_total());
    let declared = len as u64;

    let consistent = if declared <= limit {
        total == declared
    } else {
        total + ranges.len() as u64 > limit
    };
    if consistent {
        Ok(())
    } else {
        Err(Error::MalformedContainer(format!(
            "{len} symbols declared but the frequency table totals {total}"
        )))
    }
}

/// Compress `data` with the default 16-bit coder.
pub fn compress(data: &[u8]) -> Result<CompressedContainer> {
    Codec::default().compress(data)
}

/// Decompress a container produced with the default 16-bit coder.
pub fn decompress(container: &CompressedContainer) -> Result<Vec<u8>> {
    Codec::default().decompress(container)
}

/// [`Codec::compress_file`] with the default configuration.
pub fn compress_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<CompressedContainer> {
    Codec::default().compress_file(input, output)
}

/// [`Codec::decompress_file`] with the default configuration.
pub fn decompress_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<usize> {
    Codec::default().decompress_file(input, output)
}
