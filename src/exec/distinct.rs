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

//! Distinct-value accumulation for `COUNT(DISTINCT array_col)` aggregates.

use std::collections::BTreeSet;

use crate::common::types::ArrayElem;
use crate::exec::chunk::RowDecoder;

/// Ordered set of element values widened to 64 bits, one per aggregation
/// group. The aggregation framework allocates it, stores its address in the
/// group's aggregate slot, and frees it after finalization; the collector
/// only mutates it through that slot.
///
/// Not internally synchronized. When rows of one group are processed by
/// several workers, the caller must either serialize inserts into the
/// group's set or give each worker a private set and [`merge`] them during
/// finalization.
///
/// [`merge`]: DistinctValueSet::merge
#[derive(Debug, Default)]
pub struct DistinctValueSet {
    values: BTreeSet<i64>,
}

impl DistinctValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the value was not already present.
    #[inline]
    pub fn insert(&mut self, value: i64) -> bool {
        self.values.insert(value)
    }

    pub fn contains(&self, value: i64) -> bool {
        self.values.contains(&value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.values.iter().copied()
    }

    /// Absorbs another worker's set, leaving it empty.
    pub fn merge(&mut self, other: &mut DistinctValueSet) {
        self.values.append(&mut other.values);
    }
}

/// Decodes the array at `row_pos` and inserts every element, widened to
/// 64 bits, into `set`. Void and infallible: a null row decodes to a zero
/// byte length (see [`DecodedArrayView`]), so the loop body never runs and
/// the set is untouched.
///
/// [`DecodedArrayView`]: crate::exec::chunk::DecodedArrayView
#[inline]
pub fn agg_count_distinct_array<T: ArrayElem>(
    set: &mut DistinctValueSet,
    decoder: &RowDecoder,
    row_pos: u64,
) {
    let view = decoder.view(row_pos);
    let elem_count = view.byte_len() >> T::WIDTH.log2_bytes();
    for idx in 0..elem_count {
        let value = unsafe { T::read_at(view.data(), idx as usize) };
        set.insert(value.widen());
    }
}
