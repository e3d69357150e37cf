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

//! Error types for realm construction

use thiserror::Error;

use super::realm::ObjectId;

/// Result type alias for realm operations
pub type Result<T> = std::result::Result<T, RealmError>;

/// Errors raised while building or rewiring objects in a realm.
///
/// Predicates never produce these; they only surface when a caller asks the
/// realm to do something impossible.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RealmError {
    /// Handle does not belong to this realm or is out of range
    #[error("Object {id:?} does not belong to this realm")]
    UnknownObject {
        /// The rejected handle
        id: ObjectId,
    },

    /// Linking the prototype would make the chain circular
    #[error("Setting the prototype of {object:?} to {prototype:?} would create a cycle")]
    PrototypeCycle {
        /// Object being rewired
        object: ObjectId,
        /// Requested prototype
        prototype: ObjectId,
    },

    /// Linking the prototype would exceed the configured depth
    #[error("Prototype chain of depth {depth} exceeds the limit of {limit}")]
    PrototypeChainTooDeep {
        /// Depth the chain would reach
        depth: usize,
        /// Configured maximum
        limit: usize,
    },

    /// `new` was applied to something that cannot construct
    #[error("Object {id:?} is not a constructor")]
    NotAConstructor {
        /// The rejected handle
        id: ObjectId,
    },
}

impl RealmError {
    /// Create an unknown object error
    pub fn unknown_object(id: ObjectId) -> Self {
        Self::UnknownObject { id }
    }

    /// Create a prototype cycle error
    pub fn prototype_cycle(object: ObjectId, prototype: ObjectId) -> Self {
        Self::PrototypeCycle { object, prototype }
    }

    /// Create a chain depth error
    pub fn chain_too_deep(depth: usize, limit: usize) -> Self {
        Self::PrototypeChainTooDeep { depth, limit }
    }

    /// Create a not-a-constructor error
    pub fn not_a_constructor(id: ObjectId) -> Self {
        Self::NotAConstructor { id }
    }
}
