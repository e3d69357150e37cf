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

//! Core value type for dynamically typed data

use std::fmt;

use super::realm::ObjectId;
use super::types::{TypeTag, string_tags};

/// A JavaScript-style runtime value
///
/// Primitives are stored inline. Objects live in a [`Realm`](super::Realm)
/// and are referenced by handle, so a value on its own cannot answer
/// questions about prototypes or callability.
#[derive(Clone, PartialEq, Default)]
pub enum JsValue {
    /// The `undefined` sentinel
    #[default]
    Undefined,

    /// The `null` value
    Null,

    /// Boolean primitive
    Boolean(bool),

    /// IEEE-754 double
    Number(f64),

    /// Arbitrary-precision integer, truncated to 128 bits
    BigInt(i128),

    /// String primitive
    String(String),

    /// Symbol with an optional description
    Symbol(Option<String>),

    /// Handle to an object owned by a realm
    Object(ObjectId),
}

impl JsValue {
    /// Create a string value
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Create a symbol with a description
    pub fn symbol(description: impl Into<String>) -> Self {
        Self::Symbol(Some(description.into()))
    }

    /// Check if the value is `undefined`
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Check if the value is `null`
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if the value is `null` or `undefined`
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// Get the object handle if this is an object
    pub fn as_object(&self) -> Option<ObjectId> {
        match self {
            Self::Object(id) => Some(*id),
            _ => None,
        }
    }

    /// Try to borrow the string primitive
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// `typeof` for primitives.
    ///
    /// Returns `None` for objects, whose tag depends on the realm that owns
    /// them.
    pub fn primitive_type_tag(&self) -> Option<TypeTag> {
        match self {
            Self::Undefined => Some(TypeTag::Undefined),
            Self::Null => Some(TypeTag::Object),
            Self::Boolean(_) => Some(TypeTag::Boolean),
            Self::Number(_) => Some(TypeTag::Number),
            Self::BigInt(_) => Some(TypeTag::BigInt),
            Self::String(_) => Some(TypeTag::String),
            Self::Symbol(_) => Some(TypeTag::Symbol),
            Self::Object(_) => None,
        }
    }

    /// `Object.prototype.toString` tag for primitives, `None` for objects
    pub fn primitive_string_tag(&self) -> Option<&'static str> {
        match self {
            Self::Undefined => Some(string_tags::UNDEFINED),
            Self::Null => Some(string_tags::NULL),
            Self::Boolean(_) => Some(string_tags::BOOLEAN),
            Self::Number(_) => Some(string_tags::NUMBER),
            Self::BigInt(_) => Some(string_tags::BIGINT),
            Self::String(_) => Some(string_tags::STRING),
            Self::Symbol(_) => Some(string_tags::SYMBOL),
            Self::Object(_) => None,
        }
    }
}

impl From<bool> for JsValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for JsValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for JsValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for JsValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for JsValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<ObjectId> for JsValue {
    fn from(value: ObjectId) -> Self {
        Self::Object(value)
    }
}

impl fmt::Debug for JsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::BigInt(n) => write!(f, "{n}n"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Symbol(Some(d)) => write!(f, "Symbol({d})"),
            Self::Symbol(None) => write!(f, "Symbol()"),
            Self::Object(id) => write!(f, "{id:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_reports_object() {
        assert_eq!(JsValue::Null.primitive_type_tag(), Some(TypeTag::Object));
        assert_eq!(JsValue::Null.primitive_string_tag(), Some("Null"));
    }

    #[test]
    fn test_nullish() {
        assert!(JsValue::Undefined.is_nullish());
        assert!(JsValue::Null.is_nullish());
        assert!(!JsValue::from(0).is_nullish());
        assert!(!JsValue::from("").is_nullish());
    }

    #[test]
    fn test_debug_rendering() {
        assert_eq!(format!("{:?}", JsValue::BigInt(7)), "7n");
        assert_eq!(format!("{:?}", JsValue::symbol("tag")), "Symbol(tag)");
        assert_eq!(format!("{:?}", JsValue::from("a")), "\"a\"");
    }
}
