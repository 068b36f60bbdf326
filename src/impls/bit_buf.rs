/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use alloc::vec::Vec;
use core::fmt::{Display, Formatter, Write};

use crate::impls::BitSliceReader;
use crate::traits::*;

/// A sealed bit stream: words storing bits most significant first, and the
/// number of meaningful bits they contain.
///
/// The bits of the last word past [`bit_len`](BitBuf::bit_len) are padding,
/// and are zero when the buffer comes from a
/// [`BitVecWriter`](crate::impls::BitVecWriter). The end of the stream can
/// only be found through the bit length, never through word boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitBuf<W: Word = u64> {
    words: Vec<W>,
    bit_len: u64,
}

impl<W: Word> BitBuf<W> {
    pub(crate) fn from_parts(words: Vec<W>, bit_len: u64) -> Self {
        debug_assert!(bit_len <= words.len() as u64 * W::BITS as u64);
        Self { words, bit_len }
    }

    /// Wrap existing words containing `bit_len` meaningful bits.
    ///
    /// Returns `None` if the words cannot contain `bit_len` bits.
    pub fn from_words(words: Vec<W>, bit_len: u64) -> Option<Self> {
        if bit_len > words.len() as u64 * W::BITS as u64 {
            return None;
        }
        Some(Self { words, bit_len })
    }

    /// Return the number of meaningful bits.
    #[inline(always)]
    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Return the words storing the bits, padding included.
    #[inline(always)]
    pub fn words(&self) -> &[W] {
        &self.words
    }

    /// Consume this buffer and return the words storing the bits, padding
    /// included.
    pub fn into_words(self) -> Vec<W> {
        self.words
    }

    /// Return a reader over the bits of this buffer.
    pub fn reader(&self) -> BitSliceReader<W, &[W]> {
        BitSliceReader::new(&self.words, self.bit_len)
    }

    /// Consume this buffer and return a reader over its bits.
    pub fn into_reader(self) -> BitSliceReader<W, Vec<W>> {
        BitSliceReader::new(self.words, self.bit_len)
    }

    /// Return the meaningful bits, most significant first.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        // A deserialized buffer might claim more bits than it stores
        let bit_len = self.bit_len.min(self.words.len() as u64 * W::BITS as u64);
        (0..bit_len).map(move |i| {
            let word = self.words[(i / W::BITS as u64) as usize].as_u64();
            (word >> (W::BITS - 1 - (i % W::BITS as u64) as usize)) & 1 != 0
        })
    }
}

/// Prints the meaningful bits as a string of zeros and ones.
impl<W: Word> Display for BitBuf<W> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        for bit in self.bits() {
            f.write_char(if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::impls::BitVecWriter;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn test_display() {
        let mut writer = BitVecWriter::<u8>::new();
        writer.write_bits(0b0011_0101_1, 9).unwrap();
        let buf = writer.into_bit_buf();
        assert_eq!(buf.to_string(), "001101011");
        assert_eq!(buf.words(), &[0b0011_0101, 0b1000_0000]);
    }

    #[test]
    fn test_from_words() {
        assert!(BitBuf::<u16>::from_words(vec![0, 0], 33).is_none());
        let buf = BitBuf::<u16>::from_words(vec![0x8000, 0], 32).unwrap();
        assert_eq!(buf.bits().filter(|&bit| bit).count(), 1);
        assert!(BitBuf::<u64>::from_words(vec![], 0).unwrap().is_empty());
    }
}
