/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Implementations of bit streams stored in memory.

Bits are written with a [`BitVecWriter`], which appends them, most
significant first, to a growable vector of words. When writing is done,
[`BitVecWriter::into_bit_buf`] returns a [`BitBuf`], that is, the words
together with the number of meaningful bits they contain: the last word is
padded with zeros, and the padding is not part of the stream.

Bits are read with a [`BitSliceReader`], which can wrap a [`BitBuf`] or any
slice of words together with an explicit bit length.

In all cases, you must specify a word type, which is the type of the words
storing the bits. Since bits are stored most significant first, the content
of the stream does not depend on the word type, but streams must be read
using the same word type they were written with.

*/

mod bit_buf;
pub use bit_buf::BitBuf;

mod bit_vec_writer;
pub use bit_vec_writer::BitVecWriter;

mod bit_slice_reader;
pub use bit_slice_reader::BitSliceReader;
