// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Named entity declarations for the host type model.
//!
//! A *named entity* is a class-, interface-, tag- or enumeration-like
//! declaration capable of declaring type parameters. Entities are stored
//! in a [`TypeRegistry`](crate::model::TypeRegistry) keyed by [`EntityId`]
//! and referenced everywhere else *by id*, never by pointer. Parameter
//! bounds are type expressions that also refer to entities by id, which is
//! what lets a bound mention its own enclosing entity
//! (`Scalar<T: Scalar<T>>`) without creating a reference cycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::expr::TypeExpr;
use crate::model::handle::EntityShape;

// ---------------------------------------------------------------------------
// EntityId
// ---------------------------------------------------------------------------

/// Opaque identity of a named entity.
///
/// The id is a fully-qualified `::`-separated name (e.g.
/// `"demo::Outer::Inner"`). Identity is plain string equality, so an id
/// survives any serialization boundary unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create an id from a qualified name.
    pub fn new(name: impl Into<String>) -> Self {
        EntityId(name.into())
    }

    /// Full qualified name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last `::` segment of the qualified name.
    pub fn simple_name(&self) -> &str {
        self.0.rsplit("::").next().unwrap_or(&self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(name: &str) -> Self {
        EntityId(name.to_string())
    }
}

impl From<String> for EntityId {
    fn from(name: String) -> Self {
        EntityId(name)
    }
}

// ---------------------------------------------------------------------------
// EntityKind / EnumEntry / ParamDef
// ---------------------------------------------------------------------------

/// Declaration form of a named entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKind {
    /// Ordinary (instantiable) class-like declaration.
    Class,
    /// Abstract contract: declares behavior, carries no implementation.
    Interface,
    /// Metadata tag: annotation-like marker contract.
    MetadataTag,
    /// Enumeration with a fixed entry list.
    Enumeration {
        /// Declared entries, in declaration order.
        entries: Vec<EnumEntry>,
    },
}

impl EntityKind {
    /// Structural shape copied into handles issued for this entity.
    pub fn shape(&self) -> EntityShape {
        match self {
            EntityKind::Class => EntityShape::Class,
            EntityKind::Interface => EntityShape::Interface,
            EntityKind::MetadataTag => EntityShape::MetadataTag,
            EntityKind::Enumeration { .. } => EntityShape::Enumeration,
        }
    }
}

/// A single enumeration entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumEntry {
    /// Entry name.
    pub name: String,
    /// Whether the entry overrides behavior. Overriding entries get a
    /// synthesized per-entry implementation subclass at runtime.
    pub overrides: bool,
}

impl EnumEntry {
    /// Plain entry without behavior overrides.
    pub fn new(name: impl Into<String>) -> Self {
        EnumEntry {
            name: name.into(),
            overrides: false,
        }
    }

    /// Entry that overrides behavior.
    pub fn overriding(name: impl Into<String>) -> Self {
        EnumEntry {
            name: name.into(),
            overrides: true,
        }
    }
}

/// A declared type parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDef {
    /// Source-declared parameter name (presentation only; references use
    /// the positional index).
    pub name: String,
    /// Upper-bound expressions, possibly mentioning the declaring entity.
    pub bounds: Vec<TypeExpr>,
}

impl ParamDef {
    /// Unbounded parameter.
    pub fn new(name: impl Into<String>) -> Self {
        ParamDef {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    /// Parameter with upper bounds.
    pub fn bounded(name: impl Into<String>, bounds: Vec<TypeExpr>) -> Self {
        ParamDef {
            name: name.into(),
            bounds,
        }
    }
}

// ---------------------------------------------------------------------------
// EntityDef
// ---------------------------------------------------------------------------

/// A complete named entity declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDef {
    /// Globally unique identity.
    pub id: EntityId,
    /// Declaration form.
    pub kind: EntityKind,
    /// Declared type parameters, in declaration order.
    pub params: Vec<ParamDef>,
    /// Owning entity for nested declarations.
    pub owner: Option<EntityId>,
    /// Whether a nested declaration is static (does not capture the
    /// owner's generic context).
    pub static_nested: bool,
}

impl EntityDef {
    /// Number of declared type parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

// ---------------------------------------------------------------------------
// ModelError
// ---------------------------------------------------------------------------

/// Errors produced by host-model mutation and resolution.
///
/// These belong to the registry layer; the classifier and the duality
/// table never error, and codec failures have their own taxonomy
/// ([`DescriptorError`](crate::descriptor::DescriptorError)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// An entity with the same id is already declared.
    DuplicateEntity(EntityId),
    /// The id collides with a canonical primitive name (`"int32"`,
    /// `"void"`, ...), which descriptors reserve for primitive kinds.
    ReservedName(EntityId),
    /// No entity with the given id is declared.
    UnknownEntity(EntityId),
    /// The entity exists but is not an enumeration.
    NotAnEnumeration(EntityId),
    /// The enumeration has no entry with the given name.
    UnknownEntry {
        /// Enumeration id.
        enumeration: EntityId,
        /// Requested entry name.
        entry: String,
    },
    /// The entry exists but declares no behavior override, so no
    /// per-entry implementation subclass is synthesized for it.
    NotOverridden {
        /// Enumeration id.
        enumeration: EntityId,
        /// Requested entry name.
        entry: String,
    },
    /// Proxy contract is neither an interface nor a metadata tag.
    NotAContract(EntityId),
    /// Proxy synthesis requires at least one contract.
    EmptyContractSet,
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::DuplicateEntity(id) => write!(f, "entity already declared: {}", id),
            ModelError::ReservedName(id) => {
                write!(f, "entity id is a reserved primitive name: {}", id)
            }
            ModelError::UnknownEntity(id) => write!(f, "unknown entity: {}", id),
            ModelError::NotAnEnumeration(id) => write!(f, "not an enumeration: {}", id),
            ModelError::UnknownEntry { enumeration, entry } => {
                write!(f, "enumeration {} has no entry {}", enumeration, entry)
            }
            ModelError::NotOverridden { enumeration, entry } => {
                write!(f, "entry {}::{} does not override behavior", enumeration, entry)
            }
            ModelError::NotAContract(id) => {
                write!(f, "proxy contract must be an interface or metadata tag: {}", id)
            }
            ModelError::EmptyContractSet => write!(f, "proxy requires at least one contract"),
        }
    }
}

impl std::error::Error for ModelError {}
