// Copyright 2024 OctoFHIR Team
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

//! Runtime type predicates
//!
//! Every predicate takes a single value through the [`Introspect`]
//! capability and answers with a plain `bool`. They are total: no input makes
//! them panic, and none of them touches the value beyond reading it.
//!
//! [`Introspect`]: crate::introspect::Introspect

mod object;
mod primitive;

pub use object::{MAX_PROTOTYPE_WALK, is_array, is_object, is_object_like, is_plain_object};
pub use primitive::{is_function, is_string, is_undefined};
