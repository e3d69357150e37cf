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

//! Classification tags reported by the runtime

use serde::{Deserialize, Serialize};
use std::fmt;

/// The classification tag of a value, as reported by `typeof`.
///
/// Note that `null` reports [`TypeTag::Object`]; callers that care about the
/// difference must check for null separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    /// The `undefined` sentinel
    Undefined,
    /// Objects, arrays and `null`
    Object,
    /// Boolean primitive
    Boolean,
    /// Number primitive
    Number,
    /// BigInt primitive
    #[serde(rename = "bigint")]
    BigInt,
    /// String primitive
    String,
    /// Symbol primitive
    Symbol,
    /// Any callable object
    Function,
}

impl TypeTag {
    /// Every tag, in `typeof` specification order
    pub const ALL: [TypeTag; 8] = [
        TypeTag::Undefined,
        TypeTag::Object,
        TypeTag::Boolean,
        TypeTag::Number,
        TypeTag::BigInt,
        TypeTag::String,
        TypeTag::Symbol,
        TypeTag::Function,
    ];

    /// The string `typeof` would return
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Undefined => "undefined",
            TypeTag::Object => "object",
            TypeTag::Boolean => "boolean",
            TypeTag::Number => "number",
            TypeTag::BigInt => "bigint",
            TypeTag::String => "string",
            TypeTag::Symbol => "symbol",
            TypeTag::Function => "function",
        }
    }

    /// Check if this tag belongs to a primitive value
    pub fn is_primitive(&self) -> bool {
        !matches!(self, TypeTag::Object | TypeTag::Function)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builtin `Object.prototype.toString` tags for the primitive kinds.
pub mod string_tags {
    /// `[object Undefined]`
    pub const UNDEFINED: &str = "Undefined";
    /// `[object Null]`
    pub const NULL: &str = "Null";
    /// `[object Boolean]`
    pub const BOOLEAN: &str = "Boolean";
    /// `[object Number]`
    pub const NUMBER: &str = "Number";
    /// `[object BigInt]`
    pub const BIGINT: &str = "BigInt";
    /// `[object String]`
    pub const STRING: &str = "String";
    /// `[object Symbol]`
    pub const SYMBOL: &str = "Symbol";
    /// `[object Object]`
    pub const OBJECT: &str = "Object";
    /// `[object Array]`
    pub const ARRAY: &str = "Array";
    /// `[object Function]`
    pub const FUNCTION: &str = "Function";
    /// `[object Date]`
    pub const DATE: &str = "Date";
    /// `[object RegExp]`
    pub const REGEXP: &str = "RegExp";
    /// `[object Error]`
    pub const ERROR: &str = "Error";
    /// `[object Map]`
    pub const MAP: &str = "Map";
    /// `[object Set]`
    pub const SET: &str = "Set";
}

/// Render a tag the way `Object.prototype.toString` does
pub fn format_string_tag(tag: &str) -> String {
    format!("[object {tag}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typeof_strings() {
        let names: Vec<&str> = TypeTag::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "undefined", "object", "boolean", "number", "bigint", "string", "symbol",
                "function"
            ]
        );
    }

    #[test]
    fn test_serde_uses_typeof_names() {
        assert_eq!(serde_json::to_string(&TypeTag::BigInt).unwrap(), "\"bigint\"");
        assert_eq!(
            serde_json::from_str::<TypeTag>("\"function\"").unwrap(),
            TypeTag::Function
        );
    }

    #[test]
    fn test_primitive_tags() {
        assert!(TypeTag::Symbol.is_primitive());
        assert!(!TypeTag::Object.is_primitive());
        assert!(!TypeTag::Function.is_primitive());
    }

    #[test]
    fn test_format_string_tag() {
        assert_eq!(format_string_tag(string_tags::STRING), "[object String]");
    }
}
