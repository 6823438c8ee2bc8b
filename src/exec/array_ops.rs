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

//! Per-row array accessor kernels.
//!
//! These run inside the innermost loop of compiled query plans, so they are
//! branch-minimal and never allocate. Each exists in an unchecked form that
//! trusts preconditions the query compiler has already proven, and a checked
//! form that folds null rows and out-of-range indexes into `None` the way
//! SQL array indexing folds both into "no value". The sentinel translation
//! for generated code happens in `codegen::kernel_ffi`, not here.

use crate::common::types::ArrayElem;
use crate::exec::chunk::RowDecoder;

/// Element count of the array at `row_pos`, zero for a null row.
///
/// `elem_log_sz` is log2 of the element byte size and must match the
/// column's stored width; a mismatch silently miscounts.
#[inline]
pub fn array_size(decoder: &RowDecoder, row_pos: u64, elem_log_sz: u32) -> u32 {
    let view = decoder.view(row_pos);
    if view.is_null() {
        0
    } else {
        (view.byte_len() >> elem_log_sz) as u32
    }
}

/// Whether the array at `row_pos` is SQL NULL. An empty array is not null.
#[inline]
pub fn array_is_null(decoder: &RowDecoder, row_pos: u64) -> bool {
    decoder.view(row_pos).is_null()
}

/// Unchecked element read.
///
/// # Safety
/// The row must not be null and `elem_idx` must be in range for the row's
/// byte length at width `T`. The query compiler only selects this kernel
/// after proving both; violating either is undefined behavior.
#[inline]
pub unsafe fn array_at<T: ArrayElem>(decoder: &RowDecoder, row_pos: u64, elem_idx: u32) -> T {
    let view = decoder.view(row_pos);
    unsafe { T::read_at(view.data(), elem_idx as usize) }
}

/// Checked element read: `None` for a negative index, a null row, or an
/// out-of-range index. Negative indexes never decode the row.
#[inline]
pub fn array_at_checked<T: ArrayElem>(
    decoder: &RowDecoder,
    row_pos: u64,
    elem_idx: i64,
) -> Option<T> {
    if elem_idx < 0 {
        return None;
    }
    let view = decoder.view(row_pos);
    if view.is_null() || elem_idx as u64 >= view.elem_count(T::WIDTH) {
        return None;
    }
    Some(unsafe { T::read_at(view.data(), elem_idx as usize) })
}

/// Raw payload pointer of the row, with no null check. Callers validate
/// nullness via [`array_is_null`] first, e.g. before a bulk copy of
/// [`array_size`] elements.
#[inline]
pub fn array_buff(decoder: &RowDecoder, row_pos: u64) -> *const u8 {
    decoder.view(row_pos).data()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::chunk::testing::FixtureColumn;

    #[test]
    fn array_size_shifts_byte_len_by_width() {
        let mut column = FixtureColumn::new();
        column
            .push_i16(&[3, 3, 5, -5])
            .push_null()
            .push_i64(&[1, 2]);
        let decoder = column.decoder();

        assert_eq!(array_size(&decoder, 0, 1), 4);
        assert_eq!(array_size(&decoder, 1, 1), 0);
        assert_eq!(array_size(&decoder, 2, 3), 2);
        // A lying elem_log_sz miscounts rather than failing; caller contract.
        assert_eq!(array_size(&decoder, 0, 0), 8);
    }

    #[test]
    fn array_is_null_tracks_the_stored_flag_only() {
        let mut column = FixtureColumn::new();
        column.push_bytes(Vec::new()).push_null();
        let decoder = column.decoder();
        assert!(!array_is_null(&decoder, 0));
        assert!(array_is_null(&decoder, 1));
    }

    #[test]
    fn unchecked_at_reads_every_width() {
        let mut column = FixtureColumn::new();
        column
            .push_i16(&[3, 3, 5, -5])
            .push_i32(&[i32::MIN, 9])
            .push_i64(&[i64::MAX]);
        let decoder = column.decoder();

        assert_eq!(unsafe { array_at::<i16>(&decoder, 0, 3) }, -5);
        assert_eq!(unsafe { array_at::<i32>(&decoder, 1, 0) }, i32::MIN);
        assert_eq!(unsafe { array_at::<i64>(&decoder, 2, 0) }, i64::MAX);
    }

    #[test]
    fn checked_at_folds_null_and_out_of_range_into_none() {
        let mut column = FixtureColumn::new();
        column.push_i16(&[3, 3, 5, -5]).push_null();
        let decoder = column.decoder();

        assert_eq!(array_at_checked::<i16>(&decoder, 0, 0), Some(3));
        assert_eq!(array_at_checked::<i16>(&decoder, 0, 3), Some(-5));
        assert_eq!(array_at_checked::<i16>(&decoder, 0, 4), None);
        assert_eq!(array_at_checked::<i16>(&decoder, 0, -1), None);
        assert_eq!(array_at_checked::<i16>(&decoder, 1, 0), None);
        // Negative index short-circuits even for rows the decoder has no
        // data for.
        assert_eq!(array_at_checked::<i16>(&decoder, 7, i64::MIN), None);
    }

    #[test]
    fn array_buff_exposes_the_payload_verbatim() {
        let mut column = FixtureColumn::new();
        column.push_i8(&[1, -2, 3]);
        let decoder = column.decoder();

        let buff = array_buff(&decoder, 0);
        let bytes = unsafe { std::slice::from_raw_parts(buff, 3) };
        assert_eq!(bytes, &[1u8, 0xFE, 3]);
    }
}
