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

//! Name-keyed access to the predicates
//!
//! The registry lets callers that only have a predicate's name (a CLI
//! argument, a config entry) evaluate it, and lets tools list every
//! predicate with its documentation.

#![warn(missing_docs)]

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use crate::introspect::Introspect;
use crate::model::TypeTag;
use crate::predicates;

/// Errors raised by registry lookups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No predicate goes by this name
    #[error("Unknown predicate '{name}'")]
    UnknownPredicate {
        /// The name that failed to resolve
        name: String,
    },
}

impl RegistryError {
    /// Create an unknown predicate error
    pub fn unknown_predicate(name: impl Into<String>) -> Self {
        Self::UnknownPredicate { name: name.into() }
    }
}

/// Every predicate the crate provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// [`predicates::is_undefined`]
    IsUndefined,
    /// [`predicates::is_string`]
    IsString,
    /// [`predicates::is_array`]
    IsArray,
    /// [`predicates::is_object`]
    IsObject,
    /// [`predicates::is_plain_object`]
    IsPlainObject,
    /// [`predicates::is_object_like`]
    IsObjectLike,
    /// [`predicates::is_function`]
    IsFunction,
}

impl Predicate {
    /// All predicates in declaration order
    pub const ALL: [Predicate; 7] = [
        Predicate::IsUndefined,
        Predicate::IsString,
        Predicate::IsArray,
        Predicate::IsObject,
        Predicate::IsPlainObject,
        Predicate::IsObjectLike,
        Predicate::IsFunction,
    ];

    /// Conventional camelCase name
    pub fn name(&self) -> &'static str {
        match self {
            Predicate::IsUndefined => "isUndefined",
            Predicate::IsString => "isString",
            Predicate::IsArray => "isArray",
            Predicate::IsObject => "isObject",
            Predicate::IsPlainObject => "isPlainObject",
            Predicate::IsObjectLike => "isObjectLike",
            Predicate::IsFunction => "isFunction",
        }
    }

    /// Name of the Rust function implementing the predicate
    pub fn rust_name(&self) -> &'static str {
        match self {
            Predicate::IsUndefined => "is_undefined",
            Predicate::IsString => "is_string",
            Predicate::IsArray => "is_array",
            Predicate::IsObject => "is_object",
            Predicate::IsPlainObject => "is_plain_object",
            Predicate::IsObjectLike => "is_object_like",
            Predicate::IsFunction => "is_function",
        }
    }

    /// One-line description
    pub fn documentation(&self) -> &'static str {
        match self {
            Predicate::IsUndefined => {
                "Returns `true` when the value is NOT undefined (inverted from its name)."
            }
            Predicate::IsString => {
                "Returns `true` when Object.prototype.toString reports `[object String]`."
            }
            Predicate::IsArray => "Returns `true` when Array.isArray would.",
            Predicate::IsObject => {
                "Returns `true` for non-null values whose typeof is `object` or `function`."
            }
            Predicate::IsPlainObject => {
                "Returns `true` when the immediate prototype is the root of the prototype chain."
            }
            Predicate::IsObjectLike => {
                "Returns `true` for non-null values whose typeof is `object`."
            }
            Predicate::IsFunction => "Returns `true` when typeof is `function`.",
        }
    }

    /// Run the predicate against `value`
    pub fn evaluate<V: Introspect + ?Sized>(&self, value: &V) -> bool {
        match self {
            Predicate::IsUndefined => predicates::is_undefined(value),
            Predicate::IsString => predicates::is_string(value),
            Predicate::IsArray => predicates::is_array(value),
            Predicate::IsObject => predicates::is_object(value),
            Predicate::IsPlainObject => predicates::is_plain_object(value),
            Predicate::IsObjectLike => predicates::is_object_like(value),
            Predicate::IsFunction => predicates::is_function(value),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Predicate {
    type Err = RegistryError;

    /// Accepts both the camelCase and the snake_case name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Predicate::ALL
            .into_iter()
            .find(|p| p.name() == s || p.rust_name() == s)
            .ok_or_else(|| RegistryError::unknown_predicate(s))
    }
}

/// Every fact the crate can report about one value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// `typeof value`
    #[serde(rename = "typeof")]
    pub type_tag: TypeTag,
    /// `Object.prototype.toString.call(value)`
    pub to_string_tag: String,
    /// Result of each predicate, keyed by its conventional name
    pub predicates: IndexMap<&'static str, bool>,
}

impl Classification {
    /// Result of a single predicate
    pub fn get(&self, predicate: Predicate) -> bool {
        self.predicates
            .get(predicate.name())
            .copied()
            .unwrap_or(false)
    }
}

/// Evaluate every predicate against `value`
pub fn classify<V: Introspect + ?Sized>(value: &V) -> Classification {
    Classification {
        type_tag: value.type_tag(),
        to_string_tag: crate::model::types::format_string_tag(&value.to_string_tag()),
        predicates: Predicate::ALL
            .iter()
            .map(|p| (p.name(), p.evaluate(value)))
            .collect(),
    }
}
