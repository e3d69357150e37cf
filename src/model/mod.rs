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

//! Value model for dynamically typed data
//!
//! Provides the JavaScript-style value type, the realm that owns objects,
//! and the classification tags the runtime reports.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod realm;
pub mod types;
pub mod value;

pub use config::RealmConfig;
pub use error::{RealmError, Result};
pub use realm::{FunctionData, Intrinsics, ObjectData, ObjectId, ObjectKind, Realm};
pub use types::TypeTag;
pub use value::JsValue;
