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

//! Runtime support kernels for a compiled query engine: per-row access into
//! variable-length integer-array column values, and distinct-value
//! accumulation for `COUNT(DISTINCT array_col)` aggregates. Generated code
//! calls the fixed symbols in [`codegen::kernel_ffi`]; everything else is
//! the typed implementation behind them.

pub mod codegen;
pub mod common;
pub mod exec;

pub use common::config as rowkernel_config;
pub use common::logging as rowkernel_logging;

pub use common::types::{ArrayElem, ElemWidth};
pub use exec::chunk::{DecodeRowFn, DecodedArrayView, RowDecoder};
pub use exec::distinct::DistinctValueSet;
