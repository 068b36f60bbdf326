/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::*;

/// An implementation of [`BitRead`] for a slice of words with an explicit
/// bit length.
///
/// Bits are read most significant first within each word. The reader is a
/// cursor: it keeps the index of the next bit to read, and it is meant to be
/// owned by a single decoding operation at a time.
///
/// Bits past the end of the slice are not readable, even if the bit length
/// passed at construction time is larger.
///
/// # Example
/// ```
/// use gamma_bitstream::prelude::*;
///
/// let words: [u8; 2] = [0b0100_0110, 0b1000_0000];
/// let mut reader = BitSliceReader::new(&words, 9);
///
/// assert_eq!(reader.read_bits(3)?, 0b010);
/// assert_eq!(reader.read_unary()?, 2);
/// assert_eq!(reader.bit_pos(), 6);
/// assert!(reader.read_bits(4).is_err());
/// // errored reads do not change the current position
/// assert_eq!(reader.bit_pos(), 6);
/// assert_eq!(reader.read_bits(3)?, 0b101);
/// assert!(reader.at_end());
/// # Ok::<(), EndOfStreamError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitSliceReader<W: Word, B: AsRef<[W]>> {
    /// The words we read from.
    data: B,
    /// The number of readable bits.
    bit_len: u64,
    /// The index of the next bit to read.
    bit_index: u64,
    _marker: core::marker::PhantomData<W>,
}

impl<W: Word, B: AsRef<[W]>> BitSliceReader<W, B> {
    /// Create a new reader over the first `bit_len` bits of `data`.
    #[must_use]
    pub fn new(data: B, bit_len: u64) -> Self {
        let capacity = data.as_ref().len() as u64 * W::BITS as u64;
        Self {
            data,
            bit_len: bit_len.min(capacity),
            bit_index: 0,
            _marker: core::marker::PhantomData,
        }
    }

    /// Return the number of readable bits.
    #[inline(always)]
    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    /// Return the number of bits left to read.
    #[inline(always)]
    pub fn bits_left(&self) -> u64 {
        self.bit_len - self.bit_index
    }

    /// Move the cursor to `bit_pos`, which must not be past the end of the
    /// stream. On error the position does not change.
    pub fn set_bit_pos(&mut self, bit_pos: u64) -> Result<(), EndOfStreamError> {
        if bit_pos > self.bit_len {
            return Err(EndOfStreamError {
                bit_pos: self.bit_len,
                requested: bit_pos - self.bit_len,
                available: 0,
            });
        }
        self.bit_index = bit_pos;
        Ok(())
    }

    /// Move the cursor back to the start of the stream.
    pub fn reset(&mut self) {
        self.bit_index = 0;
    }

    pub fn into_inner(self) -> B {
        self.data
    }

    #[inline(always)]
    fn end_of_stream(&self, requested: u64) -> EndOfStreamError {
        EndOfStreamError {
            bit_pos: self.bit_index,
            requested,
            available: self.bits_left(),
        }
    }

    /// Return the word containing the next bit, as a `u64`, and the offset
    /// of the next bit from the most significant bit of the word.
    ///
    /// Must not be called at the end of the stream.
    #[inline(always)]
    fn current_word(&self) -> (u64, usize) {
        let word_index = (self.bit_index / W::BITS as u64) as usize;
        let offset = (self.bit_index % W::BITS as u64) as usize;
        (self.data.as_ref()[word_index].as_u64(), offset)
    }
}

impl<W: Word, B: AsRef<[W]>> BitRead for BitSliceReader<W, B> {
    type Error = EndOfStreamError;

    #[inline]
    fn read_bit(&mut self) -> Result<bool, Self::Error> {
        if self.bit_index >= self.bit_len {
            return Err(self.end_of_stream(1));
        }
        let (word, offset) = self.current_word();
        self.bit_index += 1;
        Ok((word >> (W::BITS - 1 - offset)) & 1 != 0)
    }

    #[inline]
    fn read_bits(&mut self, n: usize) -> Result<u64, Self::Error> {
        debug_assert!(n <= 64);
        if n as u64 > self.bits_left() {
            return Err(self.end_of_stream(n as u64));
        }

        let mut result = 0_u64;
        let mut left = n;
        while left != 0 {
            let (word, offset) = self.current_word();
            let in_word = W::BITS - offset;
            let take = left.min(in_word);
            let chunk = (word >> (in_word - take)) & low_mask(take);
            result = result.checked_shl(take as u32).unwrap_or(0) | chunk;
            self.bit_index += take as u64;
            left -= take;
        }
        Ok(result)
    }

    #[inline]
    fn read_unary(&mut self) -> Result<u64, Self::Error> {
        let mut total = 0;
        loop {
            if self.bit_index >= self.bit_len {
                return Err(self.end_of_stream(1));
            }
            let (word, offset) = self.current_word();
            let in_word = ((W::BITS - offset) as u64).min(self.bits_left());
            // Move the unread bits of the word to the top
            let word = word << (64 - W::BITS + offset);
            let zeros = word.leading_zeros() as u64;
            // the unary code ends in this word
            if zeros < in_word {
                self.bit_index += zeros + 1;
                return Ok(total + zeros);
            }
            total += in_word;
            self.bit_index += in_word;
        }
    }

    #[inline]
    fn skip_bits(&mut self, n: usize) -> Result<(), Self::Error> {
        if n as u64 > self.bits_left() {
            return Err(self.end_of_stream(n as u64));
        }
        self.bit_index += n as u64;
        Ok(())
    }

    #[inline(always)]
    fn bit_pos(&self) -> u64 {
        self.bit_index
    }

    #[inline(always)]
    fn at_end(&self) -> bool {
        self.bit_index >= self.bit_len
    }
}
