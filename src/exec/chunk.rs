// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! The decoder boundary the array kernels consume.
//!
//! The row decoder itself lives on the other side of the ABI; this module
//! only defines the two records both sides agree on: the per-row decoded
//! view and the decode entry point packaged with its opaque state.

use crate::common::types::ElemWidth;

/// One decoded array value, produced by the row decoder for a
/// (column, row position) pair and valid only for the duration of the call
/// that requested it. Kernels never retain `data`.
///
/// A SQL NULL array is distinct from an empty one: `is_null` set with
/// `byte_len == 0`. Decoders must report a zero `byte_len` on null rows;
/// the distinct collector relies on it to make null rows a no-op.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct DecodedArrayView {
    data: *const u8,
    byte_len: u64,
    is_null: bool,
}

impl DecodedArrayView {
    pub fn new(data: *const u8, byte_len: u64) -> Self {
        Self {
            data,
            byte_len,
            is_null: false,
        }
    }

    pub fn null() -> Self {
        Self {
            data: std::ptr::null(),
            byte_len: 0,
            is_null: true,
        }
    }

    #[inline]
    pub fn data(&self) -> *const u8 {
        self.data
    }

    #[inline]
    pub fn byte_len(&self) -> u64 {
        self.byte_len
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.is_null
    }

    /// Element count for a given stored width; zero for null rows.
    #[inline]
    pub fn elem_count(&self, width: ElemWidth) -> u64 {
        if self.is_null {
            0
        } else {
            self.byte_len >> width.log2_bytes()
        }
    }
}

/// Signature of the decode entry point the decoder side exposes.
///
/// `state` is the decoder's own handle, opaque here; the implementation
/// writes the decoded view for `row_pos` through `out`.
pub type DecodeRowFn =
    unsafe extern "C" fn(state: *const u8, row_pos: u64, out: *mut DecodedArrayView);

/// ABI-stable handle to an external row decoder: its opaque state plus the
/// decode function to call through. Generated code passes a pointer to this
/// record into every array kernel.
#[repr(C)]
pub struct RowDecoder {
    state: *const u8,
    decode_row: DecodeRowFn,
}

impl RowDecoder {
    /// Packages a decoder state with its decode entry point.
    ///
    /// # Safety
    /// `decode_row` must be callable with `state` and any row position the
    /// kernels will be handed, must fill `out` before returning, and `state`
    /// must outlive every kernel call made through the returned handle.
    pub unsafe fn new(state: *const u8, decode_row: DecodeRowFn) -> Self {
        Self { state, decode_row }
    }

    /// Decodes one row. The returned view borrows decoder-owned memory and
    /// must not be held past the caller's own call frame.
    #[inline]
    pub fn view(&self, row_pos: u64) -> DecodedArrayView {
        let mut out = DecodedArrayView::null();
        unsafe { (self.decode_row)(self.state, row_pos, &mut out) };
        out
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{DecodedArrayView, RowDecoder};

    /// In-memory column of optional byte payloads, standing in for a real
    /// row decoder in unit tests.
    pub(crate) struct FixtureColumn {
        rows: Vec<Option<Vec<u8>>>,
    }

    unsafe extern "C" fn decode_fixture_row(
        state: *const u8,
        row_pos: u64,
        out: *mut DecodedArrayView,
    ) {
        let column = unsafe { &*(state as *const FixtureColumn) };
        let view = match column.rows.get(row_pos as usize) {
            Some(Some(bytes)) => DecodedArrayView::new(bytes.as_ptr(), bytes.len() as u64),
            _ => DecodedArrayView::null(),
        };
        unsafe { *out = view };
    }

    impl FixtureColumn {
        pub(crate) fn new() -> Self {
            Self { rows: Vec::new() }
        }

        pub(crate) fn push_null(&mut self) -> &mut Self {
            self.rows.push(None);
            self
        }

        pub(crate) fn push_bytes(&mut self, bytes: Vec<u8>) -> &mut Self {
            self.rows.push(Some(bytes));
            self
        }

        pub(crate) fn push_i8(&mut self, values: &[i8]) -> &mut Self {
            self.push_bytes(values.iter().map(|v| *v as u8).collect())
        }

        pub(crate) fn push_i16(&mut self, values: &[i16]) -> &mut Self {
            self.push_bytes(values.iter().flat_map(|v| v.to_ne_bytes()).collect())
        }

        pub(crate) fn push_i32(&mut self, values: &[i32]) -> &mut Self {
            self.push_bytes(values.iter().flat_map(|v| v.to_ne_bytes()).collect())
        }

        pub(crate) fn push_i64(&mut self, values: &[i64]) -> &mut Self {
            self.push_bytes(values.iter().flat_map(|v| v.to_ne_bytes()).collect())
        }

        /// The handle must not outlive `self`.
        pub(crate) fn decoder(&self) -> RowDecoder {
            unsafe { RowDecoder::new(self as *const FixtureColumn as *const u8, decode_fixture_row) }
        }
    }
}
