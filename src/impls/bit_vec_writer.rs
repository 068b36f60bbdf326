/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use alloc::vec::Vec;
use core::convert::Infallible;

use crate::impls::BitBuf;
use crate::traits::*;

/// An implementation of [`BitWrite`] appending bits to a growable vector of
/// words.
///
/// Bits are accumulated in a bit buffer and moved to the vector one word at a
/// time. Writing to memory cannot fail, so the error type is [`Infallible`].
///
/// # Example
/// ```
/// use gamma_bitstream::prelude::*;
///
/// let mut writer = BitVecWriter::<u8>::new();
/// writer.write_bits(0b010, 3)?;
/// writer.write_unary(2)?;
/// assert_eq!(writer.bit_pos(), 6);
///
/// let buf = writer.into_bit_buf();
/// assert_eq!(buf.bit_len(), 6);
/// // The last word is padded with zeros
/// assert_eq!(buf.words(), &[0b0100_0100]);
/// # Ok::<(), core::convert::Infallible>(())
/// ```
#[derive(Debug, Clone)]
pub struct BitVecWriter<W: Word = u64> {
    /// The words filled so far.
    words: Vec<W>,
    /// Pending bits, right-aligned. Always less than a full word.
    buffer: u64,
    /// The number of valid bits in the buffer.
    bits_in_buffer: usize,
    /// The number of bits written so far.
    bit_len: u64,
}

impl<W: Word> BitVecWriter<W> {
    /// Create a new empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            words: Vec::new(),
            buffer: 0,
            bits_in_buffer: 0,
            bit_len: 0,
        }
    }

    /// Create a new writer with room for at least `bits` bits.
    #[must_use]
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            words: Vec::with_capacity(bits.div_ceil(W::BITS)),
            ..Self::new()
        }
    }

    /// Consume the writer and return the bits written, padding the last word
    /// with zeros.
    ///
    /// The padding is not part of the stream: the returned [`BitBuf`] carries
    /// the number of bits actually written.
    #[must_use]
    pub fn into_bit_buf(mut self) -> BitBuf<W> {
        if self.bits_in_buffer != 0 {
            let padding = W::BITS - self.bits_in_buffer;
            self.words.push(W::cast_from(self.buffer << padding));
        }
        BitBuf::from_parts(self.words, self.bit_len)
    }

    #[inline(always)]
    fn push_buffer(&mut self) {
        self.words.push(W::cast_from(self.buffer));
        self.buffer = 0;
        self.bits_in_buffer = 0;
    }
}

impl<W: Word> Default for BitVecWriter<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Word> BitWrite for BitVecWriter<W> {
    type Error = Infallible;

    #[inline]
    fn write_bits(&mut self, value: u64, n: usize) -> Result<usize, Self::Error> {
        debug_assert!(n <= 64);
        #[cfg(feature = "checks")]
        assert!(
            value & !low_mask(n) == 0,
            "Value {} does not fit in {} bits",
            value,
            n
        );

        let mut left = n;
        while left != 0 {
            // The buffer is never full here, so we take at least one bit
            let take = left.min(W::BITS - self.bits_in_buffer);
            let chunk = (value >> (left - take)) & low_mask(take);
            self.buffer = self.buffer.checked_shl(take as u32).unwrap_or(0) | chunk;
            self.bits_in_buffer += take;
            left -= take;
            if self.bits_in_buffer == W::BITS {
                self.push_buffer();
            }
        }
        self.bit_len += n as u64;
        Ok(n)
    }

    #[inline(always)]
    fn bit_pos(&self) -> u64 {
        self.bit_len
    }

    fn flush(&mut self) -> Result<usize, Self::Error> {
        if self.bits_in_buffer == 0 {
            return Ok(0);
        }
        let padding = W::BITS - self.bits_in_buffer;
        self.write_bits(0, padding)
    }
}
