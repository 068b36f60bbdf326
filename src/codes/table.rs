/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Precomputed γ codewords for small integers.

A [`GammaTable`] stores, for each integer `n` in `1..=n_max`, the γ codeword of
`n` in packed form, that is, the codeword read as an unsigned integer (which
is `n` itself) and its length. Writing a codeword from the table requires
a single [`write_bits`](crate::traits::BitWrite::write_bits), and integers
outside the table are written by the encoder.

Tables are generated by calling [`encode`], so they cannot diverge from
it. They are immutable once built: to change the range, build a new table.
When a table must be shared by concurrent threads and occasionally replaced,
[`SharedGammaTable`] publishes it behind an [`Arc`](std::sync::Arc).

The rows of a table, in order, form the usual `(codeword, length)` constant
array of size `n_max` in which row `i` corresponds to `n = i + 1`:

```
use gamma_bitstream::prelude::*;

let table = GammaTable::build(4)?;
let rows: Vec<_> = table.rows().collect();
assert_eq!(rows, [(0x1, 1), (0x2, 3), (0x3, 3), (0x4, 5)]);
# Ok::<(), TableError>(())
```

*/

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::error::Error;
use core::fmt::{Display, Formatter};
use core::num::NonZeroU64;

use super::gamma::{encode, DomainError, EncodeError, GammaCode, GammaWrite};
use crate::traits::*;
use log::debug;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// The error returned when building a [`GammaTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableError {
    /// The maximum of the range is zero, or the range does not fit in memory.
    InvalidRange { n_max: u64 },
    /// An integer in the range could not be encoded.
    Domain(DomainError),
    /// The given entry for `n` is not the γ codeword of `n`.
    Mismatch { n: u64 },
}

impl From<DomainError> for TableError {
    fn from(err: DomainError) -> Self {
        TableError::Domain(err)
    }
}

impl Display for TableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            TableError::InvalidRange { n_max } => write!(
                f,
                "Invalid γ table range 1..={}: the maximum must be positive and addressable",
                n_max
            ),
            TableError::Domain(e) => write!(f, "Cannot build γ table: {}", e),
            TableError::Mismatch { n } => {
                write!(f, "The γ table entry for {} is not its codeword", n)
            }
        }
    }
}

impl Error for TableError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TableError::InvalidRange { .. } | TableError::Mismatch { .. } => None,
            TableError::Domain(e) => Some(e),
        }
    }
}

/// An entry of a [`GammaTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
pub struct LookupEntry {
    /// The encoded integer.
    pub n: u64,
    /// The codeword, read as an unsigned integer.
    pub packed: u64,
    /// The length in bits of the codeword.
    pub bit_len: usize,
}

impl From<GammaCode> for LookupEntry {
    fn from(code: GammaCode) -> Self {
        Self {
            n: code.value(),
            packed: code.value(),
            bit_len: code.bit_len(),
        }
    }
}

/// The γ codewords of the integers in `1..=n_max`.
///
/// # Example
/// ```
/// use gamma_bitstream::prelude::*;
///
/// let table = GammaTable::default();
/// assert_eq!(table.n_max(), 256);
///
/// let entry = table.get(6).unwrap();
/// assert_eq!((entry.packed, entry.bit_len), (6, 5));
/// assert!(table.get(0).is_none());
/// assert!(table.get(257).is_none());
///
/// let mut writer = <BitVecWriter>::new();
/// // In the table
/// assert_eq!(table.write_gamma(&mut writer, 6)?, 5);
/// // Not in the table
/// assert_eq!(table.write_gamma(&mut writer, 1000)?, 19);
/// # Ok::<(), Box<dyn std::error::Error + Send + Sync + 'static>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Box<[LookupEntry]>", into = "Box<[LookupEntry]>")
)]
pub struct GammaTable {
    entries: Box<[LookupEntry]>,
}

impl GammaTable {
    /// The maximum of the range of the [default](GammaTable::default) table,
    /// which makes it possible to index the table with a byte.
    pub const DEFAULT_MAX: u64 = 256;

    /// Build the table of the γ codewords of the integers in `1..=n_max`.
    ///
    /// Returns [`TableError::InvalidRange`] if `n_max` is zero or if memory
    /// for the entries cannot be reserved, in which case no entry is computed.
    pub fn build(n_max: u64) -> Result<Self, TableError> {
        let invalid = TableError::InvalidRange { n_max };
        let range = NonZeroU64::new(n_max).ok_or(invalid)?;
        let len = usize::try_from(n_max).map_err(|_| invalid)?;
        // Fail here, rather than abort while filling, if memory is not enough
        let mut entries = Vec::new();
        entries.try_reserve_exact(len).map_err(|_| invalid)?;
        Ok(Self::fill(entries, range))
    }

    /// Append the codewords of `1..=n_max` to `entries`, which must be
    /// empty.
    fn fill(mut entries: Vec<LookupEntry>, n_max: NonZeroU64) -> Self {
        debug_assert!(entries.is_empty());
        entries.extend(
            core::iter::successors(Some(NonZeroU64::MIN), |n| n.checked_add(1))
                .take_while(|&n| n <= n_max)
                .map(|n| LookupEntry::from(GammaCode::from_nonzero(n))),
        );
        debug!("Built γ table for 1..={}", n_max);
        Self {
            entries: entries.into_boxed_slice(),
        }
    }

    /// Return the maximum integer in the table.
    #[inline(always)]
    pub fn n_max(&self) -> u64 {
        self.entries.len() as u64
    }

    /// Return the entries of the table, in increasing order of encoded integer.
    #[inline(always)]
    pub fn entries(&self) -> &[LookupEntry] {
        &self.entries
    }

    /// Return the entry of `n`, or `None` if `n` is not in the table.
    #[inline]
    pub fn get(&self, n: u64) -> Option<&LookupEntry> {
        let index = usize::try_from(n.checked_sub(1)?).ok()?;
        self.entries.get(index)
    }

    /// Return the rows of the table as `(codeword, length)` pairs; row `i`
    /// corresponds to `n = i + 1`.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = (u64, usize)> + '_ {
        self.entries.iter().map(|entry| (entry.packed, entry.bit_len))
    }

    /// Return the length of the γ code for `n`, looking it up in the table
    /// when possible.
    #[inline]
    pub fn len_gamma(&self, n: u64) -> Result<usize, DomainError> {
        match self.get(n) {
            Some(entry) => Ok(entry.bit_len),
            None => super::gamma::len_gamma(n),
        }
    }

    /// Return the γ codeword of `n`, looking it up in the table when possible.
    #[inline]
    pub fn encode(&self, n: u64) -> Result<GammaCode, DomainError> {
        match self.get(n) {
            Some(entry) => Ok(GammaCode::from_nonzero(
                NonZeroU64::new(entry.packed).ok_or(DomainError)?,
            )),
            None => encode(n),
        }
    }

    /// Write the γ code of `n` to `backend`, using the table when possible,
    /// and return the number of bits written.
    #[inline]
    pub fn write_gamma<B: BitWrite + ?Sized>(
        &self,
        backend: &mut B,
        n: u64,
    ) -> Result<usize, EncodeError<B::Error>> {
        let Some(entry) = self.get(n) else {
            return backend.write_gamma(n);
        };
        let mut len = entry.bit_len;
        let mut written = 0;
        // Only leading zeros past the lowest 64 bits
        if len > 64 {
            written += backend
                .write_bits(0, len - 64)
                .map_err(EncodeError::Write)?;
            len = 64;
        }
        Ok(written
            + backend
                .write_bits(entry.packed, len)
                .map_err(EncodeError::Write)?)
    }
}

/// Checks that the entries are exactly those built by [`GammaTable::build`].
impl TryFrom<Box<[LookupEntry]>> for GammaTable {
    type Error = TableError;

    fn try_from(entries: Box<[LookupEntry]>) -> Result<Self, Self::Error> {
        let n_max = entries.len() as u64;
        if n_max == 0 {
            return Err(TableError::InvalidRange { n_max });
        }
        for (n, entry) in (1..).zip(entries.iter()) {
            if *entry != LookupEntry::from(encode(n)?) {
                return Err(TableError::Mismatch { n });
            }
        }
        Ok(Self { entries })
    }
}

impl From<GammaTable> for Box<[LookupEntry]> {
    fn from(table: GammaTable) -> Self {
        table.entries
    }
}

/// Builds the table for `1..=`[`DEFAULT_MAX`](GammaTable::DEFAULT_MAX).
impl Default for GammaTable {
    fn default() -> Self {
        let n_max = NonZeroU64::MIN.saturating_add(Self::DEFAULT_MAX - 1);
        Self::fill(Vec::with_capacity(Self::DEFAULT_MAX as usize), n_max)
    }
}

#[cfg(feature = "std")]
mod shared {
    use super::GammaTable;
    use log::info;
    use std::sync::{Arc, PoisonError, RwLock};

    /// A published [`GammaTable`] that concurrent readers can load without
    /// copying, and that can be replaced atomically.
    ///
    /// Readers obtain an [`Arc`] to the current table; a reader holding the
    /// previous table is not affected by a replacement.
    ///
    /// # Example
    /// ```
    /// use gamma_bitstream::prelude::*;
    ///
    /// let shared = SharedGammaTable::default();
    /// let old = shared.load();
    /// shared.publish(GammaTable::build(1024)?);
    /// assert_eq!(old.n_max(), 256);
    /// assert_eq!(shared.load().n_max(), 1024);
    /// # Ok::<(), TableError>(())
    /// ```
    #[derive(Debug, Default)]
    pub struct SharedGammaTable {
        current: RwLock<Arc<GammaTable>>,
    }

    impl SharedGammaTable {
        /// Create a new shared table publishing `table`.
        pub fn new(table: GammaTable) -> Self {
            Self {
                current: RwLock::new(Arc::new(table)),
            }
        }

        /// Return the currently published table.
        pub fn load(&self) -> Arc<GammaTable> {
            // The lock is never held across a panic, so poisoning is harmless
            self.current
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Publish `table`, returning the table previously published.
        pub fn publish(&self, table: GammaTable) -> Arc<GammaTable> {
            let n_max = table.n_max();
            let mut current = self
                .current
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let old = core::mem::replace(&mut *current, Arc::new(table));
            drop(current);
            info!("Published γ table for 1..={}", n_max);
            old
        }
    }

    impl From<GammaTable> for SharedGammaTable {
        fn from(table: GammaTable) -> Self {
            Self::new(table)
        }
    }
}

#[cfg(feature = "std")]
pub use shared::SharedGammaTable;
