//! Error types for arithmetic coding.

use thiserror::Error;

/// Error variants for compression and decompression.
#[derive(Debug, Error)]
pub enum Error {
    /// Cumulative ranges were requested for a table with no symbols.
    #[error("empty alphabet: frequency total is zero")]
    EmptyAlphabet,

    /// The serialized container is truncated or internally inconsistent.
    #[error("malformed container: {0}")]
    MalformedContainer(String),

    /// The decoder's scaled value fell outside every symbol interval.
    #[error("scaled value {scaled} matches no symbol (total {total}) at symbol {position}")]
    UnmatchedScaledValue {
        /// Index of the symbol being decoded.
        position: usize,
        /// The scaled value that failed to match.
        scaled: u64,
        /// Frequency total of the model.
        total: u32,
    },

    /// The decoder's value register left the working interval.
    #[error("decoder desynchronized at symbol {position}")]
    Desynchronized {
        /// Index of the symbol being decoded.
        position: usize,
    },

    /// The frequency total cannot be represented at the coder's precision.
    #[error("frequency total {total} exceeds coder capacity {limit}")]
    FrequencyOverflow {
        /// Sum of all symbol counts.
        total: u64,
        /// Largest total the coder can handle.
        limit: u32,
    },

    /// A symbol outside the model's alphabet was passed to the encoder.
    #[error("symbol {0:#04x} is not in the alphabet")]
    UnknownSymbol(u8),

    /// A frequency entry carried an invalid count.
    #[error("invalid frequency {count} for symbol {symbol:#04x}")]
    InvalidFrequency {
        /// The offending symbol.
        symbol: u8,
        /// Its declared count.
        count: u32,
    },

    /// The same symbol appeared twice in a frequency table.
    #[error("duplicate frequency entry for symbol {0:#04x}")]
    DuplicateSymbol(u8),

    /// The input has more symbols than the container can count.
    #[error("input of {0} bytes exceeds the u32 symbol count")]
    InputTooLarge(usize),

    /// The encoded payload exceeds `u32::MAX` bits.
    #[error("encoded bit count overflows u32")]
    BitCountOverflow,

    /// Coder precision outside the supported range.
    #[error("unsupported precision: {0} bits")]
    InvalidPrecision(u32),

    /// An I/O error occurred while reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for arithmetic coding operations.
pub type Result<T> = std::result::Result<T, Error>;
