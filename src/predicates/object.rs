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

//! Predicates about objects and their prototype chains

use crate::introspect::Introspect;
use crate::model::TypeTag;

/// Upper bound on prototype links followed by [`is_plain_object`]
///
/// Realms refuse to build cycles, but other [`Introspect`] hosts might not.
pub const MAX_PROTOTYPE_WALK: usize = 1 << 16;

/// Checks if `value` is an array, as `Array.isArray` decides.
///
/// Array-like objects such as `{ length: 0 }` are not arrays.
pub fn is_array<V: Introspect + ?Sized>(value: &V) -> bool {
    value.is_array_exotic()
}

/// Checks if `value` is an object: non-null, and `typeof` is `"object"` or
/// `"function"`.
pub fn is_object<V: Introspect + ?Sized>(value: &V) -> bool {
    !value.is_null() && !value.type_tag().is_primitive()
}

/// Checks if `value` is object-like: non-null with `typeof` `"object"`.
///
/// Functions are objects but not object-like.
pub fn is_object_like<V: Introspect + ?Sized>(value: &V) -> bool {
    value.type_tag() == TypeTag::Object && !value.is_null()
}

/// Checks if `value` is a plain object.
///
/// The chain is walked to its last ancestor and the value counts as plain
/// when its immediate prototype is that ancestor. This accepts object
/// literals from any realm and rejects arrays, class instances, dates and
/// null-prototype objects.
pub fn is_plain_object<V: Introspect + ?Sized>(value: &V) -> bool {
    if value.type_tag() != TypeTag::Object || value.is_null() {
        return false;
    }

    // Object.create(null): the value is its own root, and its prototype
    // (null) is never the value itself.
    let Some(immediate) = value.own_prototype() else {
        return false;
    };

    let mut root = immediate;
    for _ in 0..MAX_PROTOTYPE_WALK {
        match value.prototype_of(root) {
            Some(next) => root = next,
            None => return root == immediate,
        }
    }

    log::debug!("prototype chain longer than {MAX_PROTOTYPE_WALK} links, treating as not plain");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{JsValue, Realm};
    use serde_json::json;
    use std::borrow::Cow;

    #[test]
    fn test_is_array() {
        let mut realm = Realm::new();
        let array = JsValue::Object(realm.array(vec![]));
        let array_like = realm.import_json(&json!({"length": 0}));

        assert!(is_array(&realm.bind(&array)));
        assert!(!is_array(&realm.bind(&array_like)));
        assert!(is_array(&json!([])));
        assert!(!is_array(&json!({"length": 0})));
    }

    #[test]
    fn test_is_object() {
        let mut realm = Realm::new();
        let function = JsValue::Object(realm.function("f"));
        let object = JsValue::Object(realm.object());

        assert!(is_object(&realm.bind(&function)));
        assert!(is_object(&realm.bind(&object)));
        assert!(!is_object(&realm.bind(&JsValue::Null)));
        assert!(!is_object(&realm.bind(&JsValue::from("a"))));
        for primitive in [
            JsValue::Undefined,
            JsValue::Boolean(true),
            JsValue::from(1),
            JsValue::BigInt(1),
            JsValue::symbol("s"),
        ] {
            assert!(!is_object(&realm.bind(&primitive)), "{primitive:?}");
        }
    }

    #[test]
    fn test_is_object_like() {
        let mut realm = Realm::new();
        let function = JsValue::Object(realm.function("f"));
        let object = JsValue::Object(realm.object());

        assert!(!is_object_like(&realm.bind(&JsValue::Null)));
        assert!(is_object_like(&realm.bind(&object)));
        assert!(!is_object_like(&realm.bind(&function)));
    }

    #[test]
    fn test_plain_object_chain_shapes() {
        let mut realm = Realm::new();
        let literal = JsValue::Object(realm.object());
        let array = JsValue::Object(realm.array(vec![]));
        let bare = JsValue::Object(realm.object_with_proto(None).unwrap());
        let point = realm.class("Point");
        let instance = JsValue::Object(realm.instance_of(point).unwrap());

        assert!(is_plain_object(&realm.bind(&literal)));
        assert!(!is_plain_object(&realm.bind(&array)));
        assert!(!is_plain_object(&realm.bind(&bare)));
        assert!(!is_plain_object(&realm.bind(&instance)));
    }

    #[test]
    fn test_plain_object_under_null_prototype_root() {
        // Object.create(Object.create(null)) has its parent as the root.
        let mut realm = Realm::new();
        let root = realm.object_with_proto(None).unwrap();
        let child = JsValue::Object(realm.object_with_proto(Some(root)).unwrap());
        assert!(is_plain_object(&realm.bind(&child)));
    }

    /// A host whose chain loops forever
    struct Ouroboros;

    impl Introspect for Ouroboros {
        type Proto = u8;

        fn type_tag(&self) -> TypeTag {
            TypeTag::Object
        }

        fn to_string_tag(&self) -> Cow<'_, str> {
            Cow::Borrowed("Object")
        }

        fn is_array_exotic(&self) -> bool {
            false
        }

        fn own_prototype(&self) -> Option<u8> {
            Some(0)
        }

        fn prototype_of(&self, proto: u8) -> Option<u8> {
            Some(proto ^ 1)
        }

        fn is_null(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_cyclic_host_is_not_plain() {
        assert!(!is_plain_object(&Ouroboros));
        assert!(is_object_like(&Ouroboros));
    }
}
