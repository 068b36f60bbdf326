/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use gamma_bitstream::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::error::Error;

type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync + 'static>>;

macro_rules! test_stream {
    ($word: ty, $name: ident) => {
        #[test]
        fn $name() -> Result<()> {
            const N: usize = 50000;
            let mut r = SmallRng::seed_from_u64(0);
            let mut v = SmallRng::seed_from_u64(1);
            let mut write = BitVecWriter::<$word>::new();

            let mut pos = vec![];

            for _ in 0..N {
                let mut written_bits = 0;
                match r.random_range(0..5) {
                    0 => {
                        for _ in 0..r.random_range(1..10) {
                            written_bits += write.write_bit(v.random_bool(0.5))?;
                        }
                    }
                    1 => {
                        for _ in 0..r.random_range(1..10) {
                            let n = r.random_range(0..=64);
                            let value = v.random::<u64>() & mask(n);
                            written_bits += write.write_bits(value, n)?;
                        }
                    }
                    2 => {
                        for _ in 0..r.random_range(1..10) {
                            written_bits += write.write_unary(v.random_range(0..100))?;
                        }
                    }
                    3 => {
                        for _ in 0..r.random_range(1..10) {
                            written_bits += write.write_gamma(v.random_range(1..1000))?;
                        }
                    }
                    4 => {
                        for _ in 0..r.random_range(1..10) {
                            written_bits += write.write_gamma(v.random_range(1..=u64::MAX))?;
                        }
                    }
                    _ => unreachable!(),
                }
                pos.push(written_bits);
            }

            let total = pos.iter().sum::<usize>() as u64;
            assert_eq!(write.bit_pos(), total);
            let buf = write.into_bit_buf();
            assert_eq!(buf.bit_len(), total);
            assert_eq!(
                buf.words().len(),
                total.div_ceil(<$word>::BITS as u64) as usize
            );

            let mut read = buf.reader();

            let mut r = SmallRng::seed_from_u64(0);
            let mut v = SmallRng::seed_from_u64(1);

            for &bits in &pos {
                let start = read.bit_pos();
                match r.random_range(0..5) {
                    0 => {
                        for _ in 0..r.random_range(1..10) {
                            assert_eq!(v.random_bool(0.5), read.read_bit()?);
                        }
                    }
                    1 => {
                        for _ in 0..r.random_range(1..10) {
                            let n = r.random_range(0..=64);
                            let value = v.random::<u64>() & mask(n);
                            assert_eq!(value, read.read_bits(n)?);
                        }
                    }
                    2 => {
                        for _ in 0..r.random_range(1..10) {
                            assert_eq!(v.random_range(0..100), read.read_unary()?);
                        }
                    }
                    3 => {
                        for _ in 0..r.random_range(1..10) {
                            assert_eq!(v.random_range(1..1000), read.read_gamma()?);
                        }
                    }
                    4 => {
                        for _ in 0..r.random_range(1..10) {
                            assert_eq!(v.random_range(1..=u64::MAX), read.read_gamma()?);
                        }
                    }
                    _ => unreachable!(),
                }
                assert_eq!(read.bit_pos() - start, bits as u64);
            }
            assert!(read.at_end());

            Ok(())
        }
    };
}

fn mask(n: usize) -> u64 {
    if n == 64 { u64::MAX } else { (1 << n) - 1 }
}

test_stream!(u8, test_u8);
test_stream!(u16, test_u16);
test_stream!(u32, test_u32);
test_stream!(u64, test_u64);

#[test]
fn test_same_bits_any_word() -> Result<()> {
    fn write<W: Word>() -> Result<String> {
        let mut writer = BitVecWriter::<W>::new();
        for n in 1..=300 {
            writer.write_gamma(n)?;
        }
        Ok(writer.into_bit_buf().to_string())
    }
    let bits = write::<u64>()?;
    assert_eq!(write::<u8>()?, bits);
    assert_eq!(write::<u16>()?, bits);
    assert_eq!(write::<u32>()?, bits);
    Ok(())
}

#[test]
fn test_flush_alignment() -> Result<()> {
    let mut writer = BitVecWriter::<u32>::new();
    writer.write_gamma(5)?;
    assert_eq!(writer.flush()?, 27);
    writer.write_gamma(6)?;
    assert_eq!(writer.flush()?, 27);
    assert_eq!(writer.flush()?, 0);
    let buf = writer.into_bit_buf();
    assert_eq!(buf.words(), &[0b00101 << 27, 0b00110 << 27]);

    let mut reader = buf.reader();
    assert_eq!(reader.read_gamma()?, 5);
    reader.set_bit_pos(32)?;
    assert_eq!(reader.read_gamma()?, 6);
    Ok(())
}

#[test]
fn test_end_of_stream() -> Result<()> {
    let words: [u8; 2] = [0xFF, 0xFF];
    let mut reader = BitSliceReader::new(&words, 12);
    reader.skip_bits(10)?;
    let err = reader.read_bits(3).unwrap_err();
    assert_eq!(
        err,
        EndOfStreamError {
            bit_pos: 10,
            requested: 3,
            available: 2
        }
    );
    assert_eq!(reader.bit_pos(), 10);
    assert!(reader.skip_bits(3).is_err());
    assert_eq!(reader.read_bits(2)?, 0b11);
    assert!(reader.at_end());
    assert!(reader.read_bit().is_err());
    Ok(())
}
