/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Debugging helpers.

[`DbgBitReader`] and [`DbgBitWriter`] log at debug level, through the
[`log`] facade, all operations performed on a
[`BitRead`](crate::traits::BitRead) or [`BitWrite`](crate::traits::BitWrite),
including those performed by code readers and writers.

[`CountBitReader`] and [`CountBitWriter`] keep track of the number of bits
read or written through them, and optionally log each operation at trace
level.

*/

mod count;
pub use count::*;

mod dbg_codes;
pub use dbg_codes::*;
