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

//! Introspection capability shared by every value host
//!
//! The predicates never look at a concrete value type. They ask an
//! [`Introspect`] implementation for the handful of facts a JavaScript engine
//! exposes: the `typeof` tag, the `Object.prototype.toString` tag, whether the
//! value is an array exotic object, and how its prototype chain links up.

use std::borrow::Cow;
use std::fmt;

use crate::model::types::string_tags;
use crate::model::{JsValue, ObjectId, Realm, TypeTag};

/// Runtime type facts about a single value
pub trait Introspect {
    /// Identity of an object on the prototype chain
    type Proto: Copy + Eq + fmt::Debug;

    /// `typeof value`
    fn type_tag(&self) -> TypeTag;

    /// The `Tag` in `Object.prototype.toString.call(value)`
    fn to_string_tag(&self) -> Cow<'_, str>;

    /// `Array.isArray(value)`
    fn is_array_exotic(&self) -> bool;

    /// `Object.getPrototypeOf(value)`, `None` for a null prototype or for
    /// values that have none
    fn own_prototype(&self) -> Option<Self::Proto>;

    /// `Object.getPrototypeOf(proto)` for an object already on the chain
    fn prototype_of(&self, proto: Self::Proto) -> Option<Self::Proto>;

    /// Check if the value is `null`
    fn is_null(&self) -> bool;

    /// Check if the value is the `undefined` sentinel
    fn is_undefined_sentinel(&self) -> bool {
        self.type_tag() == TypeTag::Undefined
    }
}

impl<T: Introspect + ?Sized> Introspect for &T {
    type Proto = T::Proto;

    fn type_tag(&self) -> TypeTag {
        (**self).type_tag()
    }

    fn to_string_tag(&self) -> Cow<'_, str> {
        (**self).to_string_tag()
    }

    fn is_array_exotic(&self) -> bool {
        (**self).is_array_exotic()
    }

    fn own_prototype(&self) -> Option<Self::Proto> {
        (**self).own_prototype()
    }

    fn prototype_of(&self, proto: Self::Proto) -> Option<Self::Proto> {
        (**self).prototype_of(proto)
    }

    fn is_null(&self) -> bool {
        (**self).is_null()
    }

    fn is_undefined_sentinel(&self) -> bool {
        (**self).is_undefined_sentinel()
    }
}

/// `None` stands for `undefined`, typically a missing property
impl<T: Introspect> Introspect for Option<T> {
    type Proto = T::Proto;

    fn type_tag(&self) -> TypeTag {
        self.as_ref().map_or(TypeTag::Undefined, T::type_tag)
    }

    fn to_string_tag(&self) -> Cow<'_, str> {
        match self {
            Some(value) => value.to_string_tag(),
            None => Cow::Borrowed(string_tags::UNDEFINED),
        }
    }

    fn is_array_exotic(&self) -> bool {
        self.as_ref().is_some_and(T::is_array_exotic)
    }

    fn own_prototype(&self) -> Option<Self::Proto> {
        self.as_ref().and_then(T::own_prototype)
    }

    fn prototype_of(&self, proto: Self::Proto) -> Option<Self::Proto> {
        self.as_ref().and_then(|value| value.prototype_of(proto))
    }

    fn is_null(&self) -> bool {
        self.as_ref().is_some_and(T::is_null)
    }

    fn is_undefined_sentinel(&self) -> bool {
        self.as_ref().is_none_or(T::is_undefined_sentinel)
    }
}

/// A [`JsValue`] paired with the realm that owns its objects
#[derive(Clone, Copy)]
pub struct Bound<'a> {
    realm: &'a Realm,
    value: &'a JsValue,
}

impl<'a> Bound<'a> {
    /// Pair a value with its realm
    pub fn new(realm: &'a Realm, value: &'a JsValue) -> Self {
        Self { realm, value }
    }

    /// The realm objects are resolved against
    pub fn realm(&self) -> &'a Realm {
        self.realm
    }

    /// The wrapped value
    pub fn value(&self) -> &'a JsValue {
        self.value
    }
}

impl fmt::Debug for Bound<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.value.as_object().and_then(|id| self.realm.function_name(id));
        match name {
            Some("") => write!(f, "Bound(realm {}, [Function (anonymous)])", self.realm.id()),
            Some(name) => write!(f, "Bound(realm {}, [Function: {name}])", self.realm.id()),
            None => write!(f, "Bound(realm {}, {:?})", self.realm.id(), self.value),
        }
    }
}

impl Introspect for Bound<'_> {
    type Proto = ObjectId;

    fn type_tag(&self) -> TypeTag {
        self.realm.type_tag_of(self.value)
    }

    fn to_string_tag(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.realm.string_tag_of(self.value))
    }

    fn is_array_exotic(&self) -> bool {
        self.realm.is_array_exotic(self.value)
    }

    fn own_prototype(&self) -> Option<ObjectId> {
        self.realm.prototype_of_value(self.value)
    }

    fn prototype_of(&self, proto: ObjectId) -> Option<ObjectId> {
        self.realm.get(proto).and_then(|data| data.prototype)
    }

    fn is_null(&self) -> bool {
        self.value.is_null()
    }

    fn is_undefined_sentinel(&self) -> bool {
        self.value.is_undefined()
    }
}

/// Prototypes a JSON value can inherit from
///
/// JSON has no classes, so every chain is at most two links long and ends at
/// [`JsonProto::Object`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonProto {
    /// `Object.prototype`
    Object,
    /// `Array.prototype`
    Array,
    /// `String.prototype`
    String,
    /// `Number.prototype`
    Number,
    /// `Boolean.prototype`
    Boolean,
}

/// JSON documents as the engine would see them after `JSON.parse`
impl Introspect for serde_json::Value {
    type Proto = JsonProto;

    fn type_tag(&self) -> TypeTag {
        use serde_json::Value;

        match self {
            Value::Null | Value::Array(_) | Value::Object(_) => TypeTag::Object,
            Value::Bool(_) => TypeTag::Boolean,
            Value::Number(_) => TypeTag::Number,
            Value::String(_) => TypeTag::String,
        }
    }

    fn to_string_tag(&self) -> Cow<'_, str> {
        use serde_json::Value;

        Cow::Borrowed(match self {
            Value::Null => string_tags::NULL,
            Value::Bool(_) => string_tags::BOOLEAN,
            Value::Number(_) => string_tags::NUMBER,
            Value::String(_) => string_tags::STRING,
            Value::Array(_) => string_tags::ARRAY,
            Value::Object(_) => string_tags::OBJECT,
        })
    }

    fn is_array_exotic(&self) -> bool {
        self.is_array()
    }

    fn own_prototype(&self) -> Option<JsonProto> {
        use serde_json::Value;

        match self {
            Value::Null => None,
            Value::Bool(_) => Some(JsonProto::Boolean),
            Value::Number(_) => Some(JsonProto::Number),
            Value::String(_) => Some(JsonProto::String),
            Value::Array(_) => Some(JsonProto::Array),
            Value::Object(_) => Some(JsonProto::Object),
        }
    }

    fn prototype_of(&self, proto: JsonProto) -> Option<JsonProto> {
        match proto {
            JsonProto::Object => None,
            _ => Some(JsonProto::Object),
        }
    }

    fn is_null(&self) -> bool {
        serde_json::Value::is_null(self)
    }

    fn is_undefined_sentinel(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bound_debug_names_functions() {
        let mut realm = Realm::new();
        let named = JsValue::Object(realm.function("handler"));
        let anonymous = JsValue::Object(realm.function(""));
        let id = realm.id();

        assert_eq!(
            format!("{:?}", realm.bind(&named)),
            format!("Bound(realm {id}, [Function: handler])")
        );
        assert_eq!(
            format!("{:?}", realm.bind(&anonymous)),
            format!("Bound(realm {id}, [Function (anonymous)])")
        );
        assert_eq!(
            format!("{:?}", realm.bind(&JsValue::from("a"))),
            format!("Bound(realm {id}, \"a\")")
        );
    }

    #[test]
    fn test_option_none_is_undefined() {
        let missing: Option<serde_json::Value> = None;
        assert_eq!(missing.type_tag(), TypeTag::Undefined);
        assert_eq!(missing.to_string_tag(), "Undefined");
        assert!(missing.is_undefined_sentinel());
        assert!(!missing.is_null());
        assert_eq!(missing.own_prototype(), None);
    }

    #[test]
    fn test_option_some_delegates() {
        let present = Some(json!([1]));
        assert_eq!(present.type_tag(), TypeTag::Object);
        assert!(present.is_array_exotic());
        assert!(!present.is_undefined_sentinel());
    }

    #[test]
    fn test_json_chain_ends_at_object_prototype() {
        let value = json!([]);
        let proto = value.own_prototype().unwrap();
        assert_eq!(proto, JsonProto::Array);
        assert_eq!(value.prototype_of(proto), Some(JsonProto::Object));
        assert_eq!(value.prototype_of(JsonProto::Object), None);
    }

    #[test]
    fn test_json_null_reports_object() {
        let value = json!(null);
        assert_eq!(value.type_tag(), TypeTag::Object);
        assert!(Introspect::is_null(&value));
        assert_eq!(value.to_string_tag(), "Null");
    }

    #[test]
    fn test_bound_delegates_to_realm() {
        let mut realm = Realm::new();
        let f = JsValue::Object(realm.function("f"));
        let bound = realm.bind(&f);
        assert_eq!(bound.type_tag(), TypeTag::Function);
        assert_eq!(bound.to_string_tag(), "Function");
        assert_eq!(
            bound.own_prototype(),
            Some(realm.intrinsics().function_prototype)
        );
    }

    #[test]
    fn test_bound_stale_handle_is_total() {
        let mut other = Realm::new();
        let foreign = JsValue::Object(other.object());
        let realm = Realm::new();
        let bound = realm.bind(&foreign);
        assert_eq!(bound.type_tag(), TypeTag::Object);
        assert_eq!(bound.to_string_tag(), "Object");
        assert!(!bound.is_array_exotic());
        assert_eq!(bound.own_prototype(), None);
    }
}
