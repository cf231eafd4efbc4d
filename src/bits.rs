//! Bit packing for the coder output.
//!
//! Bits are packed MSB-first. The persisted form is a little-endian `u32` bit
//! count followed by `ceil(count / 8)` bytes; the unused low bits of the final
//! byte are zero on write and ignored on read.

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::error::{Error, Result};

/// An ordered, packed sequence of bits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitSequence {
    len: u32,
    bytes: Vec<u8>,
}

impl BitSequence {
    /// Number of bytes needed to hold `bits` bits.
    pub fn packed_len(bits: u32) -> usize {
        (bits as usize).div_ceil(8)
    }

    /// Reassemble a sequence from its bit count and packed bytes.
    ///
    /// # Errors
    /// Returns `Error::MalformedContainer` if `bytes` is not exactly
    /// [`BitSequence::packed_len`] long.
    pub fn from_parts(len: u32, bytes: Vec<u8>) -> Result<Self> {
        let expected = Self::packed_len(len);
        if bytes.len() != expected {
            return Err(Error::MalformedContainer(format!(
                "bit payload holds {} bytes, {len} bits need {expected}",
                bytes.len()
            )));
        }
        Ok(Self { len, bytes })
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// True if the sequence holds no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Packed bytes, including padding in the final byte.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bit at index `i`.
    pub fn get(&self, i: usize) -> Option<bool> {
        if i >= self.len() {
            return None;
        }
        Some((self.bytes[i / 8] >> (7 - i % 8)) & 1 == 1)
    }

    /// Iterate over the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).map(move |i| (self.bytes[i / 8] >> (7 - i % 8)) & 1 == 1)
    }

    /// Size of the persisted form in bytes.
    pub fn encoded_len(&self) -> usize {
        4 + self.bytes.len()
    }

    /// Append the persisted form (count, then packed bytes) to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.len.to_le_bytes());
        out.extend_from_slice(&self.bytes);
    }

    /// Parse a persisted sequence from the front of `input`.
    ///
    /// Returns the sequence and the number of bytes consumed.
    ///
    /// # Errors
    /// Returns `Error::MalformedContainer` if `input` is shorter than the
    /// declared bit count requires.
    pub fn read_from(input: &[u8]) -> Result<(Self, usize)> {
        let Some((count, rest)) = input.split_first_chunk::<4>() else {
            return Err(Error::MalformedContainer("missing bit count".to_string()));
        };
        let len = u32::from_le_bytes(*count);
        let n = Self::packed_len(len);
        if rest.len() < n {
            return Err(Error::MalformedContainer(format!(
                "{len} bits declared but only {} payload bytes remain",
                rest.len()
            )));
        }
        let seq = Self::from_parts(len, rest[..n].to_vec())?;
        Ok((seq, 4 + n))
    }
}

/// Append-only bit writer producing a [`BitSequence`].
pub struct BitSink {
    writer: BitWriter<Vec<u8>, BigEndian>,
    len: u32,
}

impl BitSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self {
            writer: BitWriter::endian(Vec::new(), BigEndian),
            len: 0,
        }
    }

    /// Append one bit.
    ///
    /// # Errors
    /// Returns `Error::BitCountOverflow` once `u32::MAX` bits are written.
    pub fn push(&mut self, bit: bool) -> Result<()> {
        self.len = self.len.checked_add(1).ok_or(Error::BitCountOverflow)?;
        self.writer.write_bit(bit)?;
        Ok(())
    }

    /// Append `bit` `n` times.
    pub fn push_repeated(&mut self, bit: bool, n: u32) -> Result<()> {
        for _ in 0..n {
            self.push(bit)?;
        }
        Ok(())
    }

    /// Number of bits written so far.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// True if nothing was written.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Pad the final byte with zeros and return the sequence.
    pub fn finish(mut self) -> Result<BitSequence> {
        self.writer.byte_align()?;
        Ok(BitSequence {
            len: self.len,
            bytes: self.writer.into_writer(),
        })
    }
}

impl Default for BitSink {
    fn default() -> Self {
        Self::new()
    }
}

/// Front-to-back reader over a [`BitSequence`].
///
/// Stops at the declared bit count; padding bits are never returned.
pub struct BitSource<'a> {
    reader: BitReader<&'a [u8], BigEndian>,
    remaining: u32,
}

impl<'a> BitSource<'a> {
    /// Start reading at the first bit of `bits`.
    pub fn new(bits: &'a BitSequence) -> Self {
        Self {
            reader: BitReader::endian(bits.as_bytes(), BigEndian),
            remaining: bits.len,
        }
    }

    /// Next bit, or `None` once the sequence is exhausted.
    pub fn next_bit(&mut self) -> Result<Option<bool>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        Ok(Some(self.reader.read_bit()?))
    }

    /// Bits not yet read.
    pub fn remaining(&self) -> usize {
        self.remaining as usize
    }
}
