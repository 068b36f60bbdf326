/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::fmt::Debug;
use num_traits::{PrimInt, Unsigned};

/// Unsigned integer types that can be used as storage words of a bit stream.
///
/// Bits are stored in words starting from the most significant bit, so the
/// word type affects only the granularity of the storage, and never the
/// content of the stream.
pub trait Word: PrimInt + Unsigned + Debug + Send + Sync + 'static {
    /// The number of bits in a word.
    const BITS: usize;

    /// Truncating conversion: only the lowest [`Word::BITS`] bits of `value`
    /// are kept.
    fn cast_from(value: u64) -> Self;

    /// Lossless conversion to `u64`.
    fn as_u64(self) -> u64;
}

macro_rules! impl_word {
    ($($ty:ty),*) => {$(
        impl Word for $ty {
            const BITS: usize = <$ty>::BITS as usize;

            #[inline(always)]
            fn cast_from(value: u64) -> Self {
                value as $ty
            }

            #[inline(always)]
            fn as_u64(self) -> u64 {
                self as u64
            }
        }
    )*};
}

impl_word!(u8, u16, u32, u64);

/// Return a mask with the lowest `n` bits set, for `n` up to 64.
#[inline(always)]
pub(crate) const fn low_mask(n: usize) -> u64 {
    if n >= 64 { u64::MAX } else { (1 << n) - 1 }
}
