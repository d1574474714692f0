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

pub mod circle;
pub mod convex_polygon;
pub mod ellipse;
pub mod latlng;
pub mod point;
pub mod rect;

pub mod region;
pub mod relationship;

pub mod edgeutil;
pub mod predicates;

pub(crate) mod encoding;
pub mod error;
#[cfg(test)]
mod test_util;
