// Copyright 2023 Google Inc. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Spherical geometry primitives and space-filling curve indexing.
//!
//! The crate has two independent halves:
//!
//! - [`curve`] maps 2-D integer grid coordinates to and from Morton and
//!   Hilbert indexes, and [`range_set`] stores sets of such indexes;
//! - [`s2`] is a small geometric kernel on the unit sphere built around the
//!   [`Region`](s2::region::Region) trait and the convex spherical polygon.

pub mod consts;
pub mod curve;
pub mod r1;
pub mod r3;
pub mod range_set;
pub mod s1;
pub mod s2;

pub use s2::*;
