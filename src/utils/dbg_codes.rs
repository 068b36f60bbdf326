/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::*;
use log::debug;

/// A wrapper over a [`BitRead`] that logs all operations performed,
/// including those performed by code reads.
#[derive(Debug, Clone)]
pub struct DbgBitReader<R> {
    reader: R,
}

impl<R> DbgBitReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BitRead> BitRead for DbgBitReader<R> {
    type Error = R::Error;

    fn read_bit(&mut self) -> Result<bool, Self::Error> {
        let bit = self.reader.read_bit()?;
        debug!("read_bit(): {}", bit as u8);
        Ok(bit)
    }

    fn read_bits(&mut self, n: usize) -> Result<u64, Self::Error> {
        let value = self.reader.read_bits(n)?;
        debug!("read_bits({}): {:#x}", n, value);
        Ok(value)
    }

    fn read_unary(&mut self) -> Result<u64, Self::Error> {
        let value = self.reader.read_unary()?;
        debug!("{{U:{}}}", value);
        Ok(value)
    }

    fn skip_bits(&mut self, n: usize) -> Result<(), Self::Error> {
        debug!("skip_bits({})", n);
        self.reader.skip_bits(n)
    }

    fn bit_pos(&self) -> u64 {
        self.reader.bit_pos()
    }

    fn at_end(&self) -> bool {
        self.reader.at_end()
    }
}

/// A wrapper over a [`BitWrite`] that logs all operations performed,
/// including those performed by code writes.
#[derive(Debug, Clone)]
pub struct DbgBitWriter<W> {
    writer: W,
}

impl<W> DbgBitWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: BitWrite> BitWrite for DbgBitWriter<W> {
    type Error = W::Error;

    fn write_bits(&mut self, value: u64, n: usize) -> Result<usize, Self::Error> {
        debug!("write_bits({:#x}, {})", value, n);
        self.writer.write_bits(value, n)
    }

    fn write_bit(&mut self, bit: bool) -> Result<usize, Self::Error> {
        debug!("write_bit({})", bit as u8);
        self.writer.write_bit(bit)
    }

    fn write_unary(&mut self, value: u64) -> Result<usize, Self::Error> {
        debug!("{{U:{}}}", value);
        self.writer.write_unary(value)
    }

    fn bit_pos(&self) -> u64 {
        self.writer.bit_pos()
    }

    fn flush(&mut self) -> Result<usize, Self::Error> {
        let padding = self.writer.flush()?;
        debug!("flush(): {} bit(s) of padding", padding);
        Ok(padding)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codes::{GammaRead, GammaWrite};
    use crate::impls::BitVecWriter;

    #[test]
    fn test_dbg() {
        let mut writer = DbgBitWriter::new(BitVecWriter::<u16>::new());
        assert_eq!(writer.write_gamma(10).unwrap(), 7);
        assert_eq!(writer.write_bit(true).unwrap(), 1);
        assert_eq!(writer.flush().unwrap(), 8);
        assert_eq!(writer.bit_pos(), 16);
        let buf = writer.into_inner().into_bit_buf();

        let mut reader = DbgBitReader::new(buf.reader());
        assert_eq!(reader.read_gamma().unwrap(), 10);
        assert!(reader.read_bit().unwrap());
        reader.skip_bits(8).unwrap();
        assert!(reader.at_end());
        assert!(reader.read_gamma().is_err());
    }
}
