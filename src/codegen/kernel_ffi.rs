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
#![allow(clippy::not_unsafe_ptr_arg_deref)]

//! The ABI the query compiler emits calls against.
//!
//! Every function here is a fixed, non-mangled symbol the generated
//! row-processing loop calls by address: primitive arguments, no panic may
//! escape, no allocation. Element width is encoded in the symbol name; each
//! symbol is a one-line instantiation of the generic kernel in
//! `exec::array_ops` or `exec::distinct`.
//!
//! Checked accessors take a caller-supplied sentinel because generated
//! machine code cannot consume a tagged optional across this boundary; the
//! `Option` from the generic kernel is collapsed to the sentinel here and
//! nowhere else.

use crate::exec::array_ops;
use crate::exec::chunk::RowDecoder;
use crate::exec::distinct::{self, DistinctValueSet};

#[inline]
unsafe fn decoder<'a>(decoder_: *const u8) -> &'a RowDecoder {
    debug_assert!(!decoder_.is_null());
    unsafe { &*(decoder_ as *const RowDecoder) }
}

/// The aggregate slot holds the address of the group's `DistinctValueSet`
/// as a machine word; the raw-word reinterpretation stays inside this
/// function.
#[inline]
unsafe fn distinct_set<'a>(agg: *mut i64) -> &'a mut DistinctValueSet {
    debug_assert!(!agg.is_null());
    unsafe { &mut *(*agg as usize as *mut DistinctValueSet) }
}

#[unsafe(no_mangle)]
pub extern "C" fn array_size(decoder_: *const u8, row_pos: u64, elem_log_sz: u32) -> u32 {
    array_ops::array_size(unsafe { decoder(decoder_) }, row_pos, elem_log_sz)
}

#[unsafe(no_mangle)]
pub extern "C" fn array_is_null(decoder_: *const u8, row_pos: u64) -> bool {
    array_ops::array_is_null(unsafe { decoder(decoder_) }, row_pos)
}

#[unsafe(no_mangle)]
pub extern "C" fn array_buff(decoder_: *const u8, row_pos: u64) -> *const u8 {
    array_ops::array_buff(unsafe { decoder(decoder_) }, row_pos)
}

macro_rules! array_at_abi {
    ($unchecked:ident, $checked:ident, $ty:ty) => {
        #[unsafe(no_mangle)]
        pub extern "C" fn $unchecked(decoder_: *const u8, row_pos: u64, elem_idx: u32) -> $ty {
            unsafe { array_ops::array_at::<$ty>(decoder(decoder_), row_pos, elem_idx) }
        }

        #[unsafe(no_mangle)]
        pub extern "C" fn $checked(
            decoder_: *const u8,
            row_pos: u64,
            elem_idx: i64,
            null_val: $ty,
        ) -> $ty {
            array_ops::array_at_checked::<$ty>(unsafe { decoder(decoder_) }, row_pos, elem_idx)
                .unwrap_or(null_val)
        }
    };
}

array_at_abi!(array_at_i16, array_at_i16_checked, i16);
array_at_abi!(array_at_i32, array_at_i32_checked, i32);
array_at_abi!(array_at_i64, array_at_i64_checked, i64);

macro_rules! agg_count_distinct_array_abi {
    ($name:ident, $ty:ty) => {
        /// `null_val` is part of the aggregate call convention the compiler
        /// emits for every width; insertion itself never consults it.
        #[unsafe(no_mangle)]
        pub extern "C" fn $name(
            agg: *mut i64,
            decoder_: *const u8,
            row_pos: u64,
            _null_val: $ty,
        ) {
            let set = unsafe { distinct_set(agg) };
            distinct::agg_count_distinct_array::<$ty>(set, unsafe { decoder(decoder_) }, row_pos);
        }
    };
}

agg_count_distinct_array_abi!(agg_count_distinct_array_i8, i8);
agg_count_distinct_array_abi!(agg_count_distinct_array_i16, i16);
agg_count_distinct_array_abi!(agg_count_distinct_array_i32, i32);
agg_count_distinct_array_abi!(agg_count_distinct_array_i64, i64);
