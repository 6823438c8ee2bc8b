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

/// Fixed element widths an array column can store. Array columns pack
/// signed integers of exactly one of these widths back to back, so a row's
/// element count is always `byte_len >> log2_bytes()`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ElemWidth {
    W8,
    W16,
    W32,
    W64,
}

impl ElemWidth {
    /// Maps the `elem_log_sz` word generated code passes over the ABI
    /// (log2 of the element byte size) back to a width.
    pub fn from_log2_bytes(elem_log_sz: u32) -> Option<ElemWidth> {
        match elem_log_sz {
            0 => Some(ElemWidth::W8),
            1 => Some(ElemWidth::W16),
            2 => Some(ElemWidth::W32),
            3 => Some(ElemWidth::W64),
            _ => None,
        }
    }

    pub fn log2_bytes(self) -> u32 {
        match self {
            ElemWidth::W8 => 0,
            ElemWidth::W16 => 1,
            ElemWidth::W32 => 2,
            ElemWidth::W64 => 3,
        }
    }

    pub fn byte_size(self) -> usize {
        1usize << self.log2_bytes()
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for i8 {}
    impl Sealed for i16 {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
}

/// The signed integer types an array column can hold, one per [`ElemWidth`].
/// Kernels are written once, generic over this trait, and instantiated per
/// width at the ABI edge.
pub trait ArrayElem: sealed::Sealed + Copy + Send + 'static {
    const WIDTH: ElemWidth;

    /// Reads element `idx` from a packed native-endian buffer.
    ///
    /// # Safety
    /// `data` must point to at least `(idx + 1) * size_of::<Self>()`
    /// readable bytes. No alignment requirement; the read is unaligned.
    unsafe fn read_at(data: *const u8, idx: usize) -> Self;

    /// Sign-extends to the common 64-bit width used by aggregation.
    fn widen(self) -> i64;
}

macro_rules! impl_array_elem {
    ($ty:ty, $width:expr) => {
        impl ArrayElem for $ty {
            const WIDTH: ElemWidth = $width;

            #[inline(always)]
            unsafe fn read_at(data: *const u8, idx: usize) -> Self {
                unsafe { (data as *const $ty).add(idx).read_unaligned() }
            }

            #[inline(always)]
            fn widen(self) -> i64 {
                self as i64
            }
        }
    };
}

impl_array_elem!(i8, ElemWidth::W8);
impl_array_elem!(i16, ElemWidth::W16);
impl_array_elem!(i32, ElemWidth::W32);
impl_array_elem!(i64, ElemWidth::W64);
