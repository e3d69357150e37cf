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

//! Object heap with intrinsic prototypes
//!
//! A [`Realm`] owns every object reachable from a [`JsValue::Object`] handle.
//! Objects carry a kind, an optional prototype link, ordered own properties
//! and an optional `Symbol.toStringTag` override. Every realm starts with its
//! own set of intrinsic prototypes, so two realms never share an
//! `Object.prototype`.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use indexmap::IndexMap;

use super::config::RealmConfig;
use super::error::{RealmError, Result};
use super::types::{TypeTag, string_tags};
use super::value::JsValue;
use crate::introspect::Bound;

static NEXT_REALM_ID: AtomicU32 = AtomicU32::new(1);

/// Handle to an object inside a specific realm
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId {
    realm: u32,
    index: usize,
}

impl ObjectId {
    /// Identifier of the realm that allocated this handle
    pub fn realm_id(&self) -> u32 {
        self.realm
    }

    fn restamp(self, realm: u32) -> Self {
        Self { realm, ..self }
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({}:{})", self.realm, self.index)
    }
}

/// Callable object data
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionData {
    /// Function name, empty for anonymous functions
    pub name: String,
    /// The `prototype` object handed to instances; `None` for non-constructors
    pub prototype: Option<ObjectId>,
}

/// Internal shape of an object
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    /// `{}` and anything created by `Object.create`
    Ordinary,
    /// Array exotic object
    Array(Vec<JsValue>),
    /// Callable object
    Function(FunctionData),
    /// Date with its time value in milliseconds
    Date(f64),
    /// Boxed primitive (`new String("a")`, `Object(1n)`, ...)
    Boxed(JsValue),
    /// Regular expression with its source
    RegExp(String),
    /// Error with its message
    Error(String),
    /// `new Map()`
    Map,
    /// `new Set()`
    Set,
}

impl ObjectKind {
    /// The builtin tag `Object.prototype.toString` falls back to
    fn builtin_tag(&self) -> &'static str {
        match self {
            ObjectKind::Array(_) => string_tags::ARRAY,
            ObjectKind::Function(_) => string_tags::FUNCTION,
            ObjectKind::Error(_) => string_tags::ERROR,
            ObjectKind::Date(_) => string_tags::DATE,
            ObjectKind::RegExp(_) => string_tags::REGEXP,
            ObjectKind::Boxed(JsValue::Boolean(_)) => string_tags::BOOLEAN,
            ObjectKind::Boxed(JsValue::Number(_)) => string_tags::NUMBER,
            ObjectKind::Boxed(JsValue::String(_)) => string_tags::STRING,
            _ => string_tags::OBJECT,
        }
    }
}

/// A single heap object
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectData {
    /// Internal shape
    pub kind: ObjectKind,
    /// `[[Prototype]]`
    pub prototype: Option<ObjectId>,
    /// Own string-keyed properties in insertion order
    pub properties: IndexMap<String, JsValue>,
    /// Own `Symbol.toStringTag` value
    pub to_string_tag: Option<String>,
}

impl ObjectData {
    fn new(kind: ObjectKind, prototype: Option<ObjectId>) -> Self {
        Self {
            kind,
            prototype,
            properties: IndexMap::new(),
            to_string_tag: None,
        }
    }

    fn tagged(mut self, tag: &str) -> Self {
        self.to_string_tag = Some(tag.to_string());
        self
    }
}

/// Well-known prototypes every realm starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intrinsics {
    /// `Object.prototype`, the root of ordinary chains
    pub object_prototype: ObjectId,
    /// `Function.prototype`
    pub function_prototype: ObjectId,
    /// `Array.prototype`
    pub array_prototype: ObjectId,
    /// `String.prototype`
    pub string_prototype: ObjectId,
    /// `Number.prototype`
    pub number_prototype: ObjectId,
    /// `Boolean.prototype`
    pub boolean_prototype: ObjectId,
    /// `BigInt.prototype`
    pub bigint_prototype: ObjectId,
    /// `Symbol.prototype`
    pub symbol_prototype: ObjectId,
    /// `Date.prototype`
    pub date_prototype: ObjectId,
    /// `RegExp.prototype`
    pub regexp_prototype: ObjectId,
    /// `Error.prototype`
    pub error_prototype: ObjectId,
    /// `Map.prototype`
    pub map_prototype: ObjectId,
    /// `Set.prototype`
    pub set_prototype: ObjectId,
}

/// An object heap with its own intrinsics
///
/// Cloning yields an independent realm with a fresh identity: every handle
/// inside the copy is re-stamped, and handles from one never resolve in the
/// other.
#[derive(Debug)]
pub struct Realm {
    id: u32,
    config: RealmConfig,
    objects: Vec<ObjectData>,
    intrinsics: Intrinsics,
}

impl Default for Realm {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Realm {
    fn clone(&self) -> Self {
        let id = NEXT_REALM_ID.fetch_add(1, Ordering::Relaxed);
        let restamp_value = |value: &JsValue| match value {
            JsValue::Object(handle) => JsValue::Object(handle.restamp(id)),
            other => other.clone(),
        };
        let objects = self
            .objects
            .iter()
            .map(|data| {
                let kind = match &data.kind {
                    ObjectKind::Array(items) => {
                        ObjectKind::Array(items.iter().map(restamp_value).collect())
                    }
                    ObjectKind::Function(function) => ObjectKind::Function(FunctionData {
                        name: function.name.clone(),
                        prototype: function.prototype.map(|p| p.restamp(id)),
                    }),
                    other => other.clone(),
                };
                ObjectData {
                    kind,
                    prototype: data.prototype.map(|p| p.restamp(id)),
                    properties: data
                        .properties
                        .iter()
                        .map(|(key, value)| (key.clone(), restamp_value(value)))
                        .collect(),
                    to_string_tag: data.to_string_tag.clone(),
                }
            })
            .collect();
        let i = &self.intrinsics;

        log::trace!("realm {id}: cloned from realm {}", self.id);

        Self {
            id,
            config: self.config.clone(),
            objects,
            intrinsics: Intrinsics {
                object_prototype: i.object_prototype.restamp(id),
                function_prototype: i.function_prototype.restamp(id),
                array_prototype: i.array_prototype.restamp(id),
                string_prototype: i.string_prototype.restamp(id),
                number_prototype: i.number_prototype.restamp(id),
                boolean_prototype: i.boolean_prototype.restamp(id),
                bigint_prototype: i.bigint_prototype.restamp(id),
                symbol_prototype: i.symbol_prototype.restamp(id),
                date_prototype: i.date_prototype.restamp(id),
                regexp_prototype: i.regexp_prototype.restamp(id),
                error_prototype: i.error_prototype.restamp(id),
                map_prototype: i.map_prototype.restamp(id),
                set_prototype: i.set_prototype.restamp(id),
            },
        }
    }
}

impl Realm {
    /// Create a realm with the default configuration
    pub fn new() -> Self {
        Self::with_config(RealmConfig::default())
    }

    /// Create a realm and allocate its intrinsics
    pub fn with_config(config: RealmConfig) -> Self {
        let id = NEXT_REALM_ID.fetch_add(1, Ordering::Relaxed);
        let mut objects = Vec::new();
        let mut push = |data: ObjectData| {
            let index = objects.len();
            objects.push(data);
            ObjectId { realm: id, index }
        };

        let object_prototype = push(ObjectData::new(ObjectKind::Ordinary, None));
        let root = Some(object_prototype);
        // The builtin prototypes have the same shape as their instances,
        // so Array.isArray(Array.prototype) holds.
        let function_prototype = push(ObjectData::new(
            ObjectKind::Function(FunctionData {
                name: String::new(),
                prototype: None,
            }),
            root,
        ));
        let array_prototype = push(ObjectData::new(ObjectKind::Array(Vec::new()), root));
        let string_prototype = push(ObjectData::new(
            ObjectKind::Boxed(JsValue::String(String::new())),
            root,
        ));
        let number_prototype = push(ObjectData::new(
            ObjectKind::Boxed(JsValue::Number(0.0)),
            root,
        ));
        let boolean_prototype = push(ObjectData::new(
            ObjectKind::Boxed(JsValue::Boolean(false)),
            root,
        ));
        let bigint_prototype =
            push(ObjectData::new(ObjectKind::Ordinary, root).tagged(string_tags::BIGINT));
        let symbol_prototype =
            push(ObjectData::new(ObjectKind::Ordinary, root).tagged(string_tags::SYMBOL));
        let date_prototype = push(ObjectData::new(ObjectKind::Ordinary, root));
        let regexp_prototype = push(ObjectData::new(ObjectKind::Ordinary, root));
        let error_prototype = push(ObjectData::new(ObjectKind::Ordinary, root));
        let map_prototype =
            push(ObjectData::new(ObjectKind::Ordinary, root).tagged(string_tags::MAP));
        let set_prototype =
            push(ObjectData::new(ObjectKind::Ordinary, root).tagged(string_tags::SET));

        log::trace!("realm {id}: allocated {} intrinsics", objects.len());

        Self {
            id,
            config,
            objects,
            intrinsics: Intrinsics {
                object_prototype,
                function_prototype,
                array_prototype,
                string_prototype,
                number_prototype,
                boolean_prototype,
                bigint_prototype,
                symbol_prototype,
                date_prototype,
                regexp_prototype,
                error_prototype,
                map_prototype,
                set_prototype,
            },
        }
    }

    /// Identifier shared by every handle this realm allocates
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Configuration the realm was created with
    pub fn config(&self) -> &RealmConfig {
        &self.config
    }

    /// The intrinsic prototypes
    pub fn intrinsics(&self) -> &Intrinsics {
        &self.intrinsics
    }

    /// Number of live objects, intrinsics included
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// A realm always holds its intrinsics, so this is never true
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Translate a handle from the realm this one was cloned from
    ///
    /// Returns `None` when the index does not exist here.
    pub fn adopt(&self, id: ObjectId) -> Option<ObjectId> {
        let adopted = id.restamp(self.id);
        self.get(adopted).map(|_| adopted)
    }

    /// Look up an object, returning `None` for foreign or stale handles
    pub fn get(&self, id: ObjectId) -> Option<&ObjectData> {
        if id.realm != self.id {
            return None;
        }
        self.objects.get(id.index)
    }

    fn data(&self, id: ObjectId) -> Result<&ObjectData> {
        self.get(id).ok_or_else(|| RealmError::unknown_object(id))
    }

    fn data_mut(&mut self, id: ObjectId) -> Result<&mut ObjectData> {
        if id.realm != self.id {
            return Err(RealmError::unknown_object(id));
        }
        self.objects
            .get_mut(id.index)
            .ok_or_else(|| RealmError::unknown_object(id))
    }

    fn alloc(&mut self, kind: ObjectKind, prototype: Option<ObjectId>) -> ObjectId {
        let id = ObjectId {
            realm: self.id,
            index: self.objects.len(),
        };
        self.objects.push(ObjectData::new(kind, prototype));
        id
    }

    /// Bind a value to this realm so it can be introspected
    pub fn bind<'a>(&'a self, value: &'a JsValue) -> Bound<'a> {
        Bound::new(self, value)
    }

    /// `{}`
    pub fn object(&mut self) -> ObjectId {
        self.alloc(ObjectKind::Ordinary, Some(self.intrinsics.object_prototype))
    }

    /// `Object.create(prototype)`
    pub fn object_with_proto(&mut self, prototype: Option<ObjectId>) -> Result<ObjectId> {
        if let Some(proto) = prototype {
            self.ensure_room_below(proto)?;
        }
        Ok(self.alloc(ObjectKind::Ordinary, prototype))
    }

    /// Number of links from `object` up to the end of its chain
    fn links_above(&self, object: ObjectId) -> Result<usize> {
        let mut links = 0;
        let mut cursor = self.data(object)?.prototype;
        while let Some(current) = cursor {
            links += 1;
            cursor = self.data(current)?.prototype;
        }
        Ok(links)
    }

    /// Longest chain of links from any descendant down to `object`
    fn links_below(&self, object: ObjectId) -> usize {
        self.objects
            .iter()
            .filter_map(|data| {
                let mut links = 1;
                let mut cursor = data.prototype;
                while let Some(current) = cursor {
                    if current == object {
                        return Some(links);
                    }
                    cursor = self.get(current).and_then(|d| d.prototype);
                    links += 1;
                }
                None
            })
            .max()
            .unwrap_or(0)
    }

    /// Check that a fresh object may link to `prototype`
    fn ensure_room_below(&self, prototype: ObjectId) -> Result<()> {
        let depth = self.links_above(prototype)? + 1;
        let limit = self.config.max_prototype_depth;
        if depth > limit {
            log::debug!("rejecting new object under {prototype:?}: depth {depth} > {limit}");
            return Err(RealmError::chain_too_deep(depth, limit));
        }
        Ok(())
    }

    /// An array literal
    pub fn array(&mut self, items: Vec<JsValue>) -> ObjectId {
        self.alloc(ObjectKind::Array(items), Some(self.intrinsics.array_prototype))
    }

    /// A callable that cannot be used with `new`, like an arrow function
    pub fn function(&mut self, name: impl Into<String>) -> ObjectId {
        let data = FunctionData {
            name: name.into(),
            prototype: None,
        };
        self.alloc(
            ObjectKind::Function(data),
            Some(self.intrinsics.function_prototype),
        )
    }

    /// `class Name {}`: a constructor and its `prototype` object
    pub fn class(&mut self, name: impl Into<String>) -> ObjectId {
        let prototype = self.object();
        let constructor = self.alloc(
            ObjectKind::Function(FunctionData {
                name: name.into(),
                prototype: Some(prototype),
            }),
            Some(self.intrinsics.function_prototype),
        );
        self.link_constructor(constructor, prototype);
        constructor
    }

    /// `class Name extends Parent {}`
    pub fn class_extends(&mut self, name: impl Into<String>, parent: ObjectId) -> Result<ObjectId> {
        let parent_prototype = self.constructor_prototype(parent)?;
        self.ensure_room_below(parent_prototype)?;
        self.ensure_room_below(parent)?;
        let prototype = self.alloc(ObjectKind::Ordinary, Some(parent_prototype));
        let constructor = self.alloc(
            ObjectKind::Function(FunctionData {
                name: name.into(),
                prototype: Some(prototype),
            }),
            Some(parent),
        );
        self.link_constructor(constructor, prototype);
        Ok(constructor)
    }

    fn link_constructor(&mut self, constructor: ObjectId, prototype: ObjectId) {
        if let Ok(data) = self.data_mut(prototype) {
            data.properties
                .insert("constructor".to_string(), JsValue::Object(constructor));
        }
    }

    fn constructor_prototype(&self, constructor: ObjectId) -> Result<ObjectId> {
        match &self.data(constructor)?.kind {
            ObjectKind::Function(FunctionData {
                prototype: Some(prototype),
                ..
            }) => Ok(*prototype),
            _ => Err(RealmError::not_a_constructor(constructor)),
        }
    }

    /// `new Constructor()`
    pub fn instance_of(&mut self, constructor: ObjectId) -> Result<ObjectId> {
        let prototype = self.constructor_prototype(constructor)?;
        self.ensure_room_below(prototype)?;
        Ok(self.alloc(ObjectKind::Ordinary, Some(prototype)))
    }

    /// `new Date(time)`
    pub fn date(&mut self, time: f64) -> ObjectId {
        self.alloc(ObjectKind::Date(time), Some(self.intrinsics.date_prototype))
    }

    /// `Object(value)`: wraps primitives, passes objects through and turns
    /// `null`/`undefined` into a fresh `{}`
    pub fn boxed(&mut self, value: JsValue) -> Result<ObjectId> {
        let prototype = match &value {
            JsValue::Undefined | JsValue::Null => return Ok(self.object()),
            JsValue::Object(id) => {
                self.data(*id)?;
                return Ok(*id);
            }
            JsValue::Boolean(_) => self.intrinsics.boolean_prototype,
            JsValue::Number(_) => self.intrinsics.number_prototype,
            JsValue::BigInt(_) => self.intrinsics.bigint_prototype,
            JsValue::String(_) => self.intrinsics.string_prototype,
            JsValue::Symbol(_) => self.intrinsics.symbol_prototype,
        };
        Ok(self.alloc(ObjectKind::Boxed(value), Some(prototype)))
    }

    /// `/source/`
    pub fn regexp(&mut self, source: impl Into<String>) -> ObjectId {
        self.alloc(
            ObjectKind::RegExp(source.into()),
            Some(self.intrinsics.regexp_prototype),
        )
    }

    /// `new Error(message)`
    pub fn error(&mut self, message: impl Into<String>) -> ObjectId {
        self.alloc(
            ObjectKind::Error(message.into()),
            Some(self.intrinsics.error_prototype),
        )
    }

    /// `new Map()`
    pub fn map(&mut self) -> ObjectId {
        self.alloc(ObjectKind::Map, Some(self.intrinsics.map_prototype))
    }

    /// `new Set()`
    pub fn set(&mut self) -> ObjectId {
        self.alloc(ObjectKind::Set, Some(self.intrinsics.set_prototype))
    }

    /// `Object.getPrototypeOf(object)`
    pub fn get_prototype_of(&self, object: ObjectId) -> Result<Option<ObjectId>> {
        Ok(self.data(object)?.prototype)
    }

    /// `Object.setPrototypeOf(object, prototype)`
    ///
    /// Rejects links that would close a cycle, or that would leave any chain
    /// through `object` (its descendants included) longer than
    /// [`RealmConfig::max_prototype_depth`].
    pub fn set_prototype_of(&mut self, object: ObjectId, prototype: Option<ObjectId>) -> Result<()> {
        self.data(object)?;
        if let Some(proto) = prototype {
            self.data(proto)?;
            let mut cursor = Some(proto);
            while let Some(current) = cursor {
                if current == object {
                    log::debug!("rejecting prototype cycle: {object:?} -> {proto:?}");
                    return Err(RealmError::prototype_cycle(object, proto));
                }
                cursor = self.data(current)?.prototype;
            }

            let limit = self.config.max_prototype_depth;
            let depth = self.links_below(object) + 1 + self.links_above(proto)?;
            if depth > limit {
                log::debug!("rejecting prototype chain deeper than {limit} at {object:?}");
                return Err(RealmError::chain_too_deep(depth, limit));
            }
        }
        self.data_mut(object)?.prototype = prototype;
        Ok(())
    }

    /// Name of a function object, `None` for non-functions
    pub fn function_name(&self, object: ObjectId) -> Option<&str> {
        match &self.get(object)?.kind {
            ObjectKind::Function(function) => Some(function.name.as_str()),
            _ => None,
        }
    }

    /// `object[Symbol.toStringTag] = tag`
    pub fn set_to_string_tag(&mut self, object: ObjectId, tag: impl Into<String>) -> Result<()> {
        self.data_mut(object)?.to_string_tag = Some(tag.into());
        Ok(())
    }

    /// Define or overwrite an own property
    pub fn set_property(
        &mut self,
        object: ObjectId,
        key: impl Into<String>,
        value: JsValue,
    ) -> Result<()> {
        self.data_mut(object)?.properties.insert(key.into(), value);
        Ok(())
    }

    /// Read an own property
    pub fn get_own_property(&self, object: ObjectId, key: &str) -> Option<&JsValue> {
        self.get(object)?.properties.get(key)
    }

    /// `typeof value`
    pub fn type_tag_of(&self, value: &JsValue) -> TypeTag {
        match value {
            JsValue::Object(id) => match self.get(*id).map(|data| &data.kind) {
                Some(ObjectKind::Function(_)) => TypeTag::Function,
                _ => TypeTag::Object,
            },
            primitive => primitive.primitive_type_tag().unwrap_or(TypeTag::Object),
        }
    }

    /// The `Tag` in `Object.prototype.toString.call(value)`
    ///
    /// An own or inherited `Symbol.toStringTag` wins over the builtin tag.
    pub fn string_tag_of(&self, value: &JsValue) -> &str {
        let id = match value {
            JsValue::Object(id) => *id,
            primitive => {
                return primitive
                    .primitive_string_tag()
                    .unwrap_or(string_tags::OBJECT);
            }
        };
        let Some(data) = self.get(id) else {
            return string_tags::OBJECT;
        };
        let mut cursor = Some(data);
        while let Some(current) = cursor {
            if let Some(tag) = &current.to_string_tag {
                return tag.as_str();
            }
            cursor = current.prototype.and_then(|proto| self.get(proto));
        }
        data.kind.builtin_tag()
    }

    /// `Array.isArray(value)`
    pub fn is_array_exotic(&self, value: &JsValue) -> bool {
        value
            .as_object()
            .and_then(|id| self.get(id))
            .is_some_and(|data| matches!(data.kind, ObjectKind::Array(_)))
    }

    /// `Object.getPrototypeOf(value)` with primitives boxed first.
    ///
    /// `undefined`, `null`, foreign handles and null-prototype objects all
    /// yield `None`.
    pub fn prototype_of_value(&self, value: &JsValue) -> Option<ObjectId> {
        match value {
            JsValue::Undefined | JsValue::Null => None,
            JsValue::Boolean(_) => Some(self.intrinsics.boolean_prototype),
            JsValue::Number(_) => Some(self.intrinsics.number_prototype),
            JsValue::BigInt(_) => Some(self.intrinsics.bigint_prototype),
            JsValue::String(_) => Some(self.intrinsics.string_prototype),
            JsValue::Symbol(_) => Some(self.intrinsics.symbol_prototype),
            JsValue::Object(id) => self.get(*id).and_then(|data| data.prototype),
        }
    }

    /// Materialise a JSON document as values in this realm
    pub fn import_json(&mut self, json: &serde_json::Value) -> JsValue {
        use serde_json::Value;

        match json {
            Value::Null => JsValue::Null,
            Value::Bool(b) => JsValue::Boolean(*b),
            Value::Number(n) => JsValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => JsValue::String(s.clone()),
            Value::Array(items) => {
                let items = items.iter().map(|item| self.import_json(item)).collect();
                JsValue::Object(self.array(items))
            }
            Value::Object(map) => {
                let object = self.object();
                for (key, value) in map {
                    let value = self.import_json(value);
                    if let Ok(data) = self.data_mut(object) {
                        data.properties.insert(key.clone(), value);
                    }
                }
                log::trace!("realm {}: materialised object with {} keys", self.id, map.len());
                JsValue::Object(object)
            }
        }
    }
}
