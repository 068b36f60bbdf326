/*
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

#[test]
fn test_table_fidelity() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    for n_max in [1, 2, 255, 256, 257, 5000] {
        let table = GammaTable::build(n_max)?;
        assert_eq!(table.n_max(), n_max);
        assert_eq!(table.entries().len() as u64, n_max);
        for n in 1..=n_max {
            let code = encode(n)?;
            assert_eq!(
                table.entries()[(n - 1) as usize],
                LookupEntry {
                    n,
                    packed: code.value(),
                    bit_len: code.bit_len()
                }
            );
            assert_eq!(table.encode(n)?, code);
        }
    }
    Ok(())
}

#[test]
fn test_invalid_range() {
    let err = GammaTable::build(0).unwrap_err();
    assert_eq!(err, TableError::InvalidRange { n_max: 0 });
    assert!(err.to_string().contains("1..=0"));

    // The entries of this range cannot be allocated
    assert_eq!(
        GammaTable::build(1 << 60),
        Err(TableError::InvalidRange { n_max: 1 << 60 })
    );
}

#[test]
fn test_rows() -> Result<()> {
    let table = GammaTable::default();
    assert_eq!(table.rows().len(), 256);
    for (i, (packed, bit_len)) in table.rows().enumerate() {
        let n = i as u64 + 1;
        assert_eq!(packed, n);
        assert_eq!(bit_len, len_gamma(n)?);
    }
    let (last, last_len) = table.rows().last().unwrap();
    assert_eq!((last, last_len), (0x100, 17));
    Ok(())
}

#[test]
fn test_table_stream() -> Result<()> {
    let table = GammaTable::build(256)?;
    let mut r = SmallRng::seed_from_u64(0);
    let values = (0..100_000)
        .map(|_| {
            if r.random_bool(0.9) {
                r.random_range(1..=256)
            } else {
                r.random_range(1..u64::MAX)
            }
        })
        .collect::<Vec<u64>>();

    let mut writer = BitVecWriter::<u32>::new();
    let mut pos = vec![];
    for &n in &values {
        pos.push(writer.bit_pos());
        assert_eq!(table.write_gamma(&mut writer, n)?, table.len_gamma(n)?);
    }
    let buf = writer.into_bit_buf();

    let mut reader = buf.reader();
    for (&n, &p) in values.iter().zip(&pos) {
        assert_eq!(reader.bit_pos(), p);
        assert_eq!(reader.read_gamma()?, n);
    }
    assert!(reader.at_end());
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn test_serde() -> Result<()> {
    let table = GammaTable::build(300)?;
    let json = serde_json::to_string(&table)?;
    let back: GammaTable = serde_json::from_str(&json)?;
    assert_eq!(back, table);

    // A tampered table is rejected
    let tampered = json.replacen("\"bit_len\":5", "\"bit_len\":4", 1);
    assert!(serde_json::from_str::<GammaTable>(&tampered).is_err());

    let code = encode(1000)?;
    assert_eq!(serde_json::to_string(&code)?, "1000");
    assert_eq!(serde_json::from_str::<GammaCode>("1000")?, code);
    assert!(serde_json::from_str::<GammaCode>("0").is_err());

    let mut writer = BitVecWriter::<u8>::new();
    writer.write_gamma(1000)?;
    let buf = writer.into_bit_buf();
    let back: BitBuf<u8> = serde_json::from_str(&serde_json::to_string(&buf)?)?;
    assert_eq!(back.reader().read_gamma()?, 1000);
    Ok(())
}

#[cfg(feature = "std")]
#[test]
fn test_shared_table() -> Result<()> {
    use std::sync::Arc;
    use std::thread;

    let _ = env_logger::builder().is_test(true).try_init();
    let shared = Arc::new(SharedGammaTable::default());
    let readers = (0..4)
        .map(|seed| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || -> Result<()> {
                let mut r = SmallRng::seed_from_u64(seed);
                for _ in 0..1000 {
                    // A loaded table stays valid whatever is published meanwhile
                    let table = shared.load();
                    let n = r.random_range(1..=table.n_max());
                    let mut writer = BitVecWriter::<u64>::new();
                    table.write_gamma(&mut writer, n)?;
                    assert_eq!(writer.into_bit_buf().reader().read_gamma()?, n);
                }
                Ok(())
            })
        })
        .collect::<Vec<_>>();

    for n_max in [512, 1024, 128] {
        let old = shared.publish(GammaTable::build(n_max)?);
        assert!(old.n_max() >= 128);
    }
    for reader in readers {
        reader.join().expect("reader thread panicked")?;
    }
    assert_eq!(shared.load().n_max(), 128);
    Ok(())
}

#[cfg(feature = "mem_dbg")]
#[test]
fn test_mem_size() -> Result<()> {
    use mem_dbg::{MemSize, SizeFlags};

    let code = encode(1000)?;
    assert_eq!(
        code.mem_size(SizeFlags::default()),
        core::mem::size_of::<GammaCode>()
    );
    let table = GammaTable::build(300)?;
    assert!(table.mem_size(SizeFlags::default()) >= 300 * core::mem::size_of::<LookupEntry>());
    Ok(())
}
