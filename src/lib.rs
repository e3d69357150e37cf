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

//! Runtime type predicates for JavaScript-style values
//!
//! Defensive checks for values whose type is only known at runtime:
//! `is_undefined`, `is_string`, `is_array`, `is_object`, `is_plain_object`,
//! `is_object_like` and `is_function`. Each predicate is written against the
//! [`Introspect`] capability, so it works the same on values held in a
//! [`Realm`], on parsed JSON, and on `Option`s where `None` means `undefined`.
//!
//! ```
//! use octofhir_typeguard::{JsValue, Realm, is_array, is_plain_object};
//! use serde_json::json;
//!
//! let mut realm = Realm::new();
//! let point = realm.class("Point");
//! let instance = JsValue::Object(realm.instance_of(point).unwrap());
//! assert!(!is_plain_object(&realm.bind(&instance)));
//!
//! assert!(is_plain_object(&json!({"x": 1})));
//! assert!(!is_array(&json!({"length": 0})));
//! ```

pub mod introspect;
pub mod model;
pub mod predicates;
pub mod registry;

// Re-export main types
pub use introspect::{Bound, Introspect, JsonProto};
pub use model::{JsValue, ObjectId, Realm, RealmConfig, RealmError, TypeTag};
pub use predicates::{
    is_array, is_function, is_object, is_object_like, is_plain_object, is_string, is_undefined,
};
pub use registry::{Classification, Predicate, RegistryError, classify};
