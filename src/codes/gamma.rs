/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Elias γ code.
//!
//! The γ code of a positive integer `n` is the concatenation of the unary code
//! of `e = ⌊log₂(n)⌋`, that is, `e` zeros followed by a one, and of the binary
//! representation of `n` with the most significant bit removed, written with
//! exactly `e` bits. The codeword is thus `2e + 1` bits long.
//!
//! The one terminating the unary code sits in the position of the most
//! significant bit of `n`, so the codeword, read as an unsigned binary integer,
//! is `n` itself: the leading zeros contribute only to the length. As a
//! consequence a codeword is fully described by the pair formed by `n` and the
//! codeword length, which is the representation used by [`GammaCode`] and by
//! [`GammaTable`](crate::codes::GammaTable).
//!
//! Since `n` is a `u64`, codewords are at most 127 bits long.

use core::error::Error;
use core::fmt::{Display, Formatter, Write};
use core::num::NonZeroU64;

use crate::traits::*;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// The error returned when trying to encode zero, as the γ code is defined
/// only for positive integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomainError;

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "The γ code is defined only for positive integers, got 0")
    }
}

impl Error for DomainError {}

/// The phases of γ decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodePhase {
    /// Reading the zeros of the unary prefix and its terminating one.
    Unary,
    /// Reading the bits following the unary prefix.
    Binary,
}

impl Display for DecodePhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodePhase::Unary => write!(f, "unary"),
            DecodePhase::Binary => write!(f, "binary"),
        }
    }
}

/// The error returned when decoding a γ code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError<E> {
    /// The stream ended before the end of the codeword.
    Truncated {
        /// The phase during which the stream ended.
        phase: DecodePhase,
        /// The number of bits of the codeword consumed before the stream ended.
        bits_consumed: usize,
        /// The error returned by the stream.
        source: E,
    },
    /// The unary prefix is too long for the value to fit in a `u64`, which
    /// means the stream does not contain a valid codeword at this position.
    /// The prefix and its terminating one have been consumed.
    Overflow {
        /// The length of the unary prefix.
        exponent: u64,
    },
}

impl<E: Display> Display for DecodeError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeError::Truncated {
                phase,
                bits_consumed,
                source,
            } => write!(
                f,
                "Truncated γ code: stream ended in the {} phase after {} bit(s): {}",
                phase, bits_consumed, source
            ),
            DecodeError::Overflow { exponent } => write!(
                f,
                "Malformed γ code: a unary prefix of length {} does not fit in 64 bits",
                exponent
            ),
        }
    }
}

impl<E: Error + 'static> Error for DecodeError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DecodeError::Truncated { source, .. } => Some(source),
            DecodeError::Overflow { .. } => None,
        }
    }
}

/// The error returned when writing a γ code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError<E> {
    /// The value to encode is zero.
    Domain(DomainError),
    /// The underlying stream returned an error.
    Write(E),
}

impl<E> From<DomainError> for EncodeError<E> {
    fn from(err: DomainError) -> Self {
        EncodeError::Domain(err)
    }
}

impl<E: Display> Display for EncodeError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            EncodeError::Domain(e) => write!(f, "Cannot encode: {}", e),
            EncodeError::Write(e) => write!(f, "Write error while encoding: {}", e),
        }
    }
}

impl<E: Error + 'static> Error for EncodeError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EncodeError::Domain(e) => Some(e),
            EncodeError::Write(e) => Some(e),
        }
    }
}

/// Return the length of the γ code for `n`.
#[inline]
pub fn len_gamma(n: u64) -> Result<usize, DomainError> {
    NonZeroU64::new(n)
        .map(|n| 2 * n.ilog2() as usize + 1)
        .ok_or(DomainError)
}

/// The γ codeword of a positive integer, stored as the integer and the
/// length of the codeword.
///
/// The actual bits are available through [`bits`](GammaCode::bits), and
/// the [`Display`] implementation prints them as a string of zeros and ones.
/// With the `serde` feature, a codeword is serialized as the encoded integer.
///
/// # Example
/// ```
/// use gamma_bitstream::prelude::*;
///
/// let code = encode(6)?;
/// assert_eq!(code.to_string(), "00110");
/// assert_eq!(code.bit_len(), 5);
/// assert_eq!(code.value(), 6);
/// assert_eq!(code.exponent(), 2);
/// assert_eq!(code.remainder(), 0b10);
/// # Ok::<(), DomainError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u64", into = "u64"))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
pub struct GammaCode {
    value: u64,
    bit_len: usize,
}

impl GammaCode {
    /// Return the codeword of `n`.
    #[must_use]
    #[inline]
    pub fn from_nonzero(n: NonZeroU64) -> Self {
        Self {
            value: n.get(),
            bit_len: 2 * n.ilog2() as usize + 1,
        }
    }

    /// Return the encoded integer, which is also the value of the codeword
    /// read as an unsigned binary integer.
    #[inline(always)]
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Return the length in bits of the codeword.
    #[inline(always)]
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Return `⌊log₂(n)⌋`, that is, the length of the unary prefix.
    #[inline(always)]
    pub fn exponent(&self) -> u32 {
        (self.bit_len / 2) as u32
    }

    /// Return the bits following the unary prefix, that is, the encoded
    /// integer with its most significant bit cleared.
    #[inline(always)]
    pub fn remainder(&self) -> u64 {
        self.value ^ (1 << self.exponent())
    }

    /// Return the bits of the codeword, most significant first.
    pub fn bits(&self) -> impl DoubleEndedIterator<Item = bool> + ExactSizeIterator {
        let value = self.value;
        (0..self.bit_len)
            .rev()
            .map(move |i| i < 64 && (value >> i) & 1 != 0)
    }

    /// Write the codeword to `backend`, returning the number of bits written.
    #[inline]
    pub fn write<B: BitWrite + ?Sized>(&self, backend: &mut B) -> Result<usize, B::Error> {
        let exponent = self.exponent();
        Ok(backend.write_unary(exponent as u64)?
            + backend.write_bits(self.remainder(), exponent as usize)?)
    }
}

impl TryFrom<u64> for GammaCode {
    type Error = DomainError;

    fn try_from(n: u64) -> Result<Self, Self::Error> {
        encode(n)
    }
}

impl From<GammaCode> for u64 {
    fn from(code: GammaCode) -> Self {
        code.value
    }
}

impl Display for GammaCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        for bit in self.bits() {
            f.write_char(if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Return the γ codeword of `n`, failing on zero.
#[inline]
pub fn encode(n: u64) -> Result<GammaCode, DomainError> {
    NonZeroU64::new(n)
        .map(GammaCode::from_nonzero)
        .ok_or(DomainError)
}

/// Decode a γ code from `backend`, returning the decoded integer and the
/// number of bits consumed.
///
/// Decoding is a single forward pass: first the zeros of the unary prefix are
/// counted up to the terminating one, then the remaining bits are read.
/// If the stream ends in the unary phase the zeros read are consumed; if it
/// ends in the binary phase the unary prefix is consumed, but the bits
/// following it are not.
///
/// # Example
/// ```
/// use gamma_bitstream::prelude::*;
///
/// let words: [u8; 1] = [0b0100_0000];
/// let mut reader = BitSliceReader::new(&words, 3);
/// assert_eq!(decode(&mut reader), Ok((2, 3)));
/// assert!(reader.at_end());
/// ```
pub fn decode<B: BitRead + ?Sized>(backend: &mut B) -> Result<(u64, usize), DecodeError<B::Error>> {
    let start = backend.bit_pos();
    let exponent = backend
        .read_unary()
        .map_err(|source| DecodeError::Truncated {
            phase: DecodePhase::Unary,
            bits_consumed: (backend.bit_pos() - start) as usize,
            source,
        })?;
    if exponent >= 64 {
        return Err(DecodeError::Overflow { exponent });
    }
    let remainder = backend
        .read_bits(exponent as usize)
        .map_err(|source| DecodeError::Truncated {
            phase: DecodePhase::Binary,
            bits_consumed: exponent as usize + 1,
            source,
        })?;
    Ok(((1 << exponent) | remainder, 2 * exponent as usize + 1))
}

/// Trait for reading γ codes.
///
/// This trait is implemented for every [`BitRead`].
pub trait GammaRead: BitRead {
    /// Read a γ code and return the decoded integer.
    fn read_gamma(&mut self) -> Result<u64, DecodeError<Self::Error>>;

    /// Skip a γ code and return the number of bits skipped.
    fn skip_gamma(&mut self) -> Result<usize, DecodeError<Self::Error>>;
}

impl<B: BitRead + ?Sized> GammaRead for B {
    #[inline]
    fn read_gamma(&mut self) -> Result<u64, DecodeError<Self::Error>> {
        decode(self).map(|(n, _)| n)
    }

    #[inline]
    fn skip_gamma(&mut self) -> Result<usize, DecodeError<Self::Error>> {
        let start = self.bit_pos();
        let exponent = self.read_unary().map_err(|source| DecodeError::Truncated {
            phase: DecodePhase::Unary,
            bits_consumed: (self.bit_pos() - start) as usize,
            source,
        })?;
        if exponent >= 64 {
            return Err(DecodeError::Overflow { exponent });
        }
        self.skip_bits(exponent as usize)
            .map_err(|source| DecodeError::Truncated {
                phase: DecodePhase::Binary,
                bits_consumed: exponent as usize + 1,
                source,
            })?;
        Ok(2 * exponent as usize + 1)
    }
}

/// Trait for writing γ codes.
///
/// This trait is implemented for every [`BitWrite`].
pub trait GammaWrite: BitWrite {
    /// Write the γ code of `n` and return the number of bits written.
    fn write_gamma(&mut self, n: u64) -> Result<usize, EncodeError<Self::Error>>;
}

impl<B: BitWrite + ?Sized> GammaWrite for B {
    #[inline]
    fn write_gamma(&mut self, n: u64) -> Result<usize, EncodeError<Self::Error>> {
        encode(n)?.write(self).map_err(EncodeError::Write)
    }
}
