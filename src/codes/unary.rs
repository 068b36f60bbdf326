/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Unary code.
//!
//! The unary code of a natural number `n` is `n` zeros followed by a one.
//! It is read and written directly by
//! [`BitRead::read_unary`](crate::traits::BitRead::read_unary) and
//! [`BitWrite::write_unary`](crate::traits::BitWrite::write_unary), and it
//! is the prefix of γ codes.

/// Return the length of the unary code for `n`.
#[must_use]
#[inline(always)]
pub fn len_unary(n: u64) -> usize {
    n as usize + 1
}
