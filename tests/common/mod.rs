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
#![allow(dead_code)]

//! Shared fixtures: an in-memory array column playing the row decoder, and
//! an owned aggregate slot laid out the way the aggregation framework lays
//! out distinct-count slots (the slot word holds the set's address).

use rowkernel::{DecodedArrayView, DistinctValueSet, RowDecoder};

pub struct ArrayColumn {
    rows: Vec<Option<Vec<u8>>>,
}

unsafe extern "C" fn decode_column_row(state: *const u8, row_pos: u64, out: *mut DecodedArrayView) {
    let column = unsafe { &*(state as *const ArrayColumn) };
    let view = match column.rows.get(row_pos as usize) {
        Some(Some(bytes)) => DecodedArrayView::new(bytes.as_ptr(), bytes.len() as u64),
        _ => DecodedArrayView::null(),
    };
    unsafe { *out = view };
}

impl ArrayColumn {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn push_null(&mut self) -> &mut Self {
        self.rows.push(None);
        self
    }

    pub fn push_bytes(&mut self, bytes: Vec<u8>) -> &mut Self {
        self.rows.push(Some(bytes));
        self
    }

    pub fn push_i8(&mut self, values: &[i8]) -> &mut Self {
        self.push_bytes(values.iter().map(|v| *v as u8).collect())
    }

    pub fn push_i16(&mut self, values: &[i16]) -> &mut Self {
        self.push_bytes(values.iter().flat_map(|v| v.to_ne_bytes()).collect())
    }

    pub fn push_i32(&mut self, values: &[i32]) -> &mut Self {
        self.push_bytes(values.iter().flat_map(|v| v.to_ne_bytes()).collect())
    }

    pub fn push_i64(&mut self, values: &[i64]) -> &mut Self {
        self.push_bytes(values.iter().flat_map(|v| v.to_ne_bytes()).collect())
    }

    /// The handle must not outlive `self`.
    pub fn decoder(&self) -> RowDecoder {
        unsafe { RowDecoder::new(self as *const ArrayColumn as *const u8, decode_column_row) }
    }
}

/// Raw handle word generated code would pass for this decoder.
pub fn decoder_handle(decoder: &RowDecoder) -> *const u8 {
    decoder as *const RowDecoder as *const u8
}

/// One aggregate slot owning its distinct set, freed on drop the way the
/// aggregation framework frees slots after finalization.
pub struct OwnedDistinctSlot {
    word: i64,
}

impl OwnedDistinctSlot {
    pub fn new() -> Self {
        Self {
            word: Box::into_raw(Box::new(DistinctValueSet::new())) as i64,
        }
    }

    pub fn word_ptr(&mut self) -> *mut i64 {
        &mut self.word
    }

    pub fn set(&self) -> &DistinctValueSet {
        unsafe { &*(self.word as usize as *const DistinctValueSet) }
    }

    pub fn set_mut(&mut self) -> &mut DistinctValueSet {
        unsafe { &mut *(self.word as usize as *mut DistinctValueSet) }
    }
}

impl Drop for OwnedDistinctSlot {
    fn drop(&mut self) {
        drop(unsafe { Box::from_raw(self.word as usize as *mut DistinctValueSet) });
    }
}
