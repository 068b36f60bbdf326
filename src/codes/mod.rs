/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Traits and functions for reading and writing instantaneous codes.

The first few codewords of the [unary](crate::traits::BitRead::read_unary)
and [γ](gamma) codes are:

| Arg |  unary   |    γ    |
|-----|---------:|--------:|
| 0   |        1 |         |
| 1   |       01 |       1 |
| 2   |      001 |     010 |
| 3   |     0001 |     011 |
| 4   |    00001 |   00100 |
| 5   |   000001 |   00101 |
| 6   |  0000001 |   00110 |
| 7   | 00000001 |   00111 |

Note that the γ code is defined only for positive integers.

Codewords can be written and read through the [`GammaWrite`] and
[`GammaRead`] extension traits, which are implemented for every
[`BitWrite`](crate::traits::BitWrite) and
[`BitRead`](crate::traits::BitRead), or through the free functions
[`encode`] and [`decode`].

A [`GammaTable`] caches the codewords of a range of small integers.

*/

pub mod gamma;
pub use gamma::{
    decode, encode, len_gamma, DecodeError, DecodePhase, DomainError, EncodeError, GammaCode,
    GammaRead, GammaWrite,
};

pub mod unary;
pub use unary::len_unary;

pub mod table;
pub use table::{GammaTable, LookupEntry, TableError};
#[cfg(feature = "std")]
pub use table::SharedGammaTable;
