/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::error::Error;
use core::fmt::{Display, Formatter};

/// The error returned by [`BitRead`] implementations of this crate when a
/// read asks for more bits than the stream has left.
///
/// Reads of several bits are atomic: when this error is returned, the
/// position of the stream has not changed. The only exception is
/// [`BitRead::read_unary`], which consumes the zeros it has seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndOfStreamError {
    /// The position, in bits, at which the read was attempted.
    pub bit_pos: u64,
    /// The number of bits requested.
    pub requested: u64,
    /// The number of bits left in the stream.
    pub available: u64,
}

impl Display for EndOfStreamError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Cannot read {} bit(s) at bit position {}: only {} bit(s) left in the stream",
            self.requested, self.bit_pos, self.available
        )
    }
}

impl Error for EndOfStreamError {}

/// Sequential, streaming bit-by-bit reads.
///
/// Bits are returned most significant first: the first bit read ends up in
/// the highest position of the result of [`read_bits`](BitRead::read_bits).
///
/// This trait specify basic operation over which codes can be implemented by
/// traits such as [`GammaRead`](crate::codes::GammaRead). An implementation
/// is a cursor: it is owned by a single reader, and advances as bits are
/// consumed.
pub trait BitRead {
    type Error: Error + Send + Sync + 'static;

    /// Read a single bit.
    fn read_bit(&mut self) -> Result<bool, Self::Error>;

    /// Read `n` bits and return them in the lowest bits.
    ///
    /// `n` must be at most 64. If fewer than `n` bits are left, an error is
    /// returned and no bit is consumed.
    fn read_bits(&mut self, n: usize) -> Result<u64, Self::Error>;

    /// Read a unary code, that is, count the zeros preceding the next one,
    /// consuming the one, too.
    ///
    /// If the stream ends before a one is found the zeros read are consumed
    /// and the error of the stream is returned.
    fn read_unary(&mut self) -> Result<u64, Self::Error> {
        let mut zeros = 0;
        while !self.read_bit()? {
            zeros += 1;
        }
        Ok(zeros)
    }

    /// Skip `n` bits from the stream.
    ///
    /// If fewer than `n` bits are left, an error is returned and no bit is
    /// skipped.
    fn skip_bits(&mut self, n: usize) -> Result<(), Self::Error>;

    /// Return the current position in bits from the start of the stream.
    fn bit_pos(&self) -> u64;

    /// Return whether all bits of the stream have been consumed.
    fn at_end(&self) -> bool;
}

/// Sequential, streaming bit-by-bit writes.
///
/// This trait specify basic operation over which codes can be implemented
/// by traits such as [`GammaWrite`](crate::codes::GammaWrite).
pub trait BitWrite {
    type Error: Error + Send + Sync + 'static;

    /// Write the lowest `n` bits of `value` to the stream, most significant
    /// first, and return the number of bits written, that is, `n`.
    ///
    /// `n` must be at most 64. The other bits of `value` are ignored, but if
    /// the feature `checks` is enabled implementations should check that
    /// they are zero.
    fn write_bits(&mut self, value: u64, n: usize) -> Result<usize, Self::Error>;

    /// Write a single bit and return the number of bits written, that is, one.
    #[inline(always)]
    fn write_bit(&mut self, bit: bool) -> Result<usize, Self::Error> {
        self.write_bits(bit as u64, 1)
    }

    /// Write a sequence of bits and return the number of bits written.
    fn write_bit_seq<I: IntoIterator<Item = bool>>(
        &mut self,
        bits: I,
    ) -> Result<usize, Self::Error>
    where
        Self: Sized,
    {
        let mut written = 0;
        for bit in bits {
            written += self.write_bit(bit)?;
        }
        Ok(written)
    }

    /// Write `value` as a unary code to the stream, that is, `value` zeros
    /// followed by a one, and return the number of bits written, that is,
    /// `value` plus one.
    fn write_unary(&mut self, mut value: u64) -> Result<usize, Self::Error> {
        let mut written = 0;
        while value >= 64 {
            written += self.write_bits(0, 64)?;
            value -= 64;
        }
        Ok(written + self.write_bits(1, value as usize + 1)?)
    }

    /// Return the number of bits written so far.
    fn bit_pos(&self) -> u64;

    /// Complete the current storage word with zero bits, which become part
    /// of the stream, and return the number of padding bits written.
    ///
    /// Subsequent writes will start at a word boundary.
    fn flush(&mut self) -> Result<usize, Self::Error>;
}
