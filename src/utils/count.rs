/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::*;
use log::trace;

/// Wrapping struct that keeps track of written bits. Optionally, logs at
/// trace level information about methods called.
///
/// Counting starts when the wrapper is created, independently of the
/// position of the underlying stream.
#[derive(Debug, Clone)]
pub struct CountBitWriter<BW, const LOG: bool = false> {
    bit_write: BW,
    /// The number of bits written so far on the underlying [`BitWrite`],
    /// padding included.
    pub bits_written: usize,
}

impl<BW, const LOG: bool> CountBitWriter<BW, LOG> {
    pub fn new(bit_write: BW) -> Self {
        Self {
            bit_write,
            bits_written: 0,
        }
    }

    pub fn into_inner(self) -> BW {
        self.bit_write
    }
}

impl<BW: BitWrite, const LOG: bool> BitWrite for CountBitWriter<BW, LOG> {
    type Error = BW::Error;

    fn write_bits(&mut self, value: u64, n: usize) -> Result<usize, Self::Error> {
        self.bit_write.write_bits(value, n).map(|x| {
            self.bits_written += x;
            if LOG {
                trace!(
                    "write_bits({:#016x}, {}) = {} (total = {})",
                    value, n, x, self.bits_written
                );
            }
            x
        })
    }

    fn write_unary(&mut self, value: u64) -> Result<usize, Self::Error> {
        self.bit_write.write_unary(value).map(|x| {
            self.bits_written += x;
            if LOG {
                trace!(
                    "write_unary({}) = {} (total = {})",
                    value, x, self.bits_written
                );
            }
            x
        })
    }

    fn bit_pos(&self) -> u64 {
        self.bit_write.bit_pos()
    }

    fn flush(&mut self) -> Result<usize, Self::Error> {
        self.bit_write.flush().map(|x| {
            self.bits_written += x;
            if LOG {
                trace!("flush() = {} (total = {})", x, self.bits_written);
            }
            x
        })
    }
}

/// Wrapping struct that keeps track of read bits. Optionally, logs at
/// trace level information about methods called.
#[derive(Debug, Clone)]
pub struct CountBitReader<BR, const LOG: bool = false> {
    bit_read: BR,
    /// The number of bits read (or skipped) so far from the underlying
    /// [`BitRead`], including the zeros consumed by a failed unary read.
    pub bits_read: usize,
}

impl<BR, const LOG: bool> CountBitReader<BR, LOG> {
    pub fn new(bit_read: BR) -> Self {
        Self {
            bit_read,
            bits_read: 0,
        }
    }

    pub fn into_inner(self) -> BR {
        self.bit_read
    }
}

impl<BR: BitRead, const LOG: bool> BitRead for CountBitReader<BR, LOG> {
    type Error = BR::Error;

    fn read_bit(&mut self) -> Result<bool, Self::Error> {
        self.bit_read.read_bit().map(|x| {
            self.bits_read += 1;
            if LOG {
                trace!("read_bit() = {} (total = {})", x as u8, self.bits_read);
            }
            x
        })
    }

    fn read_bits(&mut self, n: usize) -> Result<u64, Self::Error> {
        self.bit_read.read_bits(n).map(|x| {
            self.bits_read += n;
            if LOG {
                trace!("read_bits({}) = {:#016x} (total = {})", n, x, self.bits_read);
            }
            x
        })
    }

    fn read_unary(&mut self) -> Result<u64, Self::Error> {
        let start = self.bit_read.bit_pos();
        let result = self.bit_read.read_unary();
        // On error the zeros seen are consumed anyway
        self.bits_read += (self.bit_read.bit_pos() - start) as usize;
        if LOG {
            if let Ok(x) = &result {
                trace!("read_unary() = {} (total = {})", x, self.bits_read);
            }
        }
        result
    }

    fn skip_bits(&mut self, n: usize) -> Result<(), Self::Error> {
        self.bit_read.skip_bits(n)?;
        self.bits_read += n;
        if LOG {
            trace!("skip_bits({}) (total = {})", n, self.bits_read);
        }
        Ok(())
    }

    fn bit_pos(&self) -> u64 {
        self.bit_read.bit_pos()
    }

    fn at_end(&self) -> bool {
        self.bit_read.at_end()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codes::{GammaRead, GammaWrite};
    use crate::impls::BitVecWriter;

    #[test]
    fn test_count() {
        let mut writer = CountBitWriter::<_, true>::new(BitVecWriter::<u64>::new());

        writer.write_unary(5).unwrap();
        assert_eq!(writer.bits_written, 6);
        writer.write_unary(100).unwrap();
        assert_eq!(writer.bits_written, 107);
        writer.write_bits(1, 20).unwrap();
        assert_eq!(writer.bits_written, 127);
        writer.write_gamma(1000).unwrap();
        assert_eq!(writer.bits_written, 146);
        writer.write_bit(true).unwrap();
        assert_eq!(writer.flush().unwrap(), 45);
        assert_eq!(writer.bits_written, 192);
        assert_eq!(writer.bit_pos(), 192);
        let buf = writer.into_inner().into_bit_buf();

        let mut reader = CountBitReader::<_, true>::new(buf.reader());
        assert_eq!(reader.read_unary().unwrap(), 5);
        assert_eq!(reader.bits_read, 6);
        assert_eq!(reader.read_unary().unwrap(), 100);
        assert_eq!(reader.bits_read, 107);
        assert_eq!(reader.read_bits(20).unwrap(), 1);
        assert_eq!(reader.bits_read, 127);
        assert_eq!(reader.read_gamma().unwrap(), 1000);
        assert_eq!(reader.bits_read, 146);
        assert!(reader.read_bit().unwrap());
        reader.skip_bits(45).unwrap();
        assert_eq!(reader.bits_read, 192);

        // Failed reads are not counted, except for the zeros of a unary code
        assert!(reader.skip_bits(1).is_err());
        assert!(reader.read_unary().is_err());
        assert_eq!(reader.bits_read, 192);
    }

    #[test]
    fn test_count_truncated_unary() {
        let words: [u8; 1] = [0];
        let mut reader = CountBitReader::<_>::new(crate::impls::BitSliceReader::new(&words, 8));
        reader.skip_bits(3).unwrap();
        assert!(reader.read_unary().is_err());
        assert_eq!(reader.bits_read, 8);
        assert!(reader.at_end());
    }
}
