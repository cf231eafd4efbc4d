//! # Arithmetic Coding
//!
//! *Order-0 static arithmetic coding for byte streams.*
//!
//! ## Intuition First
//!
//! Picture the interval `[0, 1)` as a ruler. Each symbol of the alphabet gets a
//! stretch of that ruler proportional to how often it occurs. To encode a
//! message, zoom into the stretch of the first symbol, then into the stretch of
//! the second symbol *within* that, and so on. The whole message ends up as a
//! single tiny sub-interval, and any number inside it identifies the message.
//! Frequent symbols shrink the interval less, so they cost fewer bits.
//!
//! ## The Problem
//!
//! Prefix codes (Huffman, Shannon–Fano) must spend a whole number of bits per
//! symbol, which wastes up to a bit per symbol on skewed distributions.
//! Arithmetic coding spends fractional bits, reaching the order-0 entropy to
//! within a few bits per message, at the cost of a multiply and a divide per
//! symbol.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon     Entropy; the Shannon–Fano construction
//! 1963  Elias       Unpublished interval-coding idea (in Abramson's book)
//! 1976  Rissanen    Arithmetic coding with finite precision
//! 1976  Pasco       Independent finite-precision coder
//! 1987  Witten      Witten, Neal & Cleary: the practical integer coder
//! 1998  Moffat      Moffat, Neal & Witten: arithmetic coding revisited
//! ```
//!
//! The practical breakthrough was renormalization: once the leading bits of
//! `low` and `high` agree they can never change, so they are shifted out and
//! the registers stay a fixed width forever.
//!
//! ## Mathematical Formulation
//!
//! With counts $c_s$, total $T$ and cumulative counts $C_s = \sum_{t<s} c_t$,
//! encoding symbol $s$ maps the working interval $[L, H]$ of width
//! $R = H - L + 1$ to:
//!
//! ```text
//! H' = L + floor(R * (C_s + c_s) / T) - 1
//! L' = L + floor(R *  C_s        / T)
//! ```
//!
//! The decoder inverts this with `scaled = ((V - L + 1) * T - 1) / R`, which
//! lands in `[C_s, C_s + c_s)` for the encoded symbol.
//!
//! ## Complexity Analysis
//!
//! - **Time**: $O(1)$ per encoded symbol, $O(\log |A|)$ per decoded symbol.
//! - **Space**: $O(n)$; input and output are held in memory.
//!
//! ## Failure Modes
//!
//! 1. **Underflow**: if `T` exceeds a quarter of the coder range, rare symbols
//!    can get empty intervals. Tables are rescaled (or rejected) to prevent it.
//! 2. **Model mismatch**: encoder and decoder must lay out the same table in
//!    the same order at the same precision, or decoding produces garbage.
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - **[`compress`] / [`decompress`]**: whole-buffer entry points.
//! - **[`CompressedContainer`]**: frequency table, symbol count and coded bits
//!   in one binary blob.
//! - **[`ArithmeticEncoder`] / [`ArithmeticDecoder`]**: the coder itself over
//!   [`CumulativeRanges`], for custom pipelines.
//!
//! ```
//! let container = arcode::compress(b"AAAABBBCCD").unwrap();
//! let bytes = container.to_bytes();
//! let back = arcode::CompressedContainer::from_bytes(&bytes).unwrap();
//! assert_eq!(arcode::decompress(&back).unwrap(), b"AAAABBBCCD");
//! ```
//!
//! ## References
//!
//! - Witten, I. H., Neal, R. M., & Cleary, J. G. (1987). "Arithmetic coding for data compression."
//! - Moffat, A., Neal, R. M., & Witten, I. H. (1998). "Arithmetic coding revisited."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bits;
pub mod codec;
pub mod config;
pub mod container;
pub mod cumulative;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod state;

pub use bits::{BitSequence, BitSink, BitSource};
pub use codec::{compress, compress_file, decompress, decompress_file, Codec};
pub use config::{CoderConfig, OverflowPolicy, Precision};
pub use container::CompressedContainer;
pub use cumulative::{CumulativeRanges, SymbolRange};
pub use decoder::ArithmeticDecoder;
pub use encoder::ArithmeticEncoder;
pub use error::Error;
pub use frequency::FrequencyTable;

/// Upper bound of the default coder interval.
pub const TOP: u32 = Precision::DEFAULT.top();
/// First quarter point of the default coder.
pub const FIRST_QTR: u32 = Precision::DEFAULT.first_quarter();
/// Midpoint of the default coder.
pub const HALF: u32 = Precision::DEFAULT.half();
/// Third quarter point of the default coder.
pub const THIRD_QTR: u32 = Precision::DEFAULT.third_quarter();
/// Largest stored count (and frequency total) of the default coder.
pub const MAX_COUNT: u32 = Precision::DEFAULT.max_total();
