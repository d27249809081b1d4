// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Entity registry and fluent declaration builder.
//!
//! The registry is the authoritative store of named entity declarations.
//! All handle issuance goes through it, so every [`TypeHandle`] in
//! circulation refers to a declaration that existed at issue time.
//! Decode-side resolution of descriptor identities
//! ([`crate::descriptor::decode`]) also goes through the registry, which
//! is what makes parameter references re-derivable by position instead of
//! carrying bound expressions across the boundary.

use std::collections::HashMap;
use std::sync::Arc;

use crate::duality;
use crate::model::entity::{EntityDef, EntityId, EntityKind, EnumEntry, ModelError, ParamDef};
use crate::model::expr::TypeExpr;
use crate::model::handle::{PrimitiveKind, TypeHandle};

// ---------------------------------------------------------------------------
// TypeRegistry
// ---------------------------------------------------------------------------

/// In-memory store of named entity declarations keyed by [`EntityId`].
///
/// A fresh registry pre-declares the builtin boxed counterparts of the
/// primitive kinds (`builtin::Boolean`, `builtin::Int32`, ...) so that
/// descriptors produced by [`crate::duality::to_boxed`]-normalized
/// expressions always resolve.
#[derive(Debug)]
pub struct TypeRegistry {
    entities: HashMap<EntityId, Arc<EntityDef>>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a registry with the builtin entities pre-declared.
    pub fn new() -> Self {
        let mut registry = TypeRegistry {
            entities: HashMap::new(),
        };
        for entry in duality::entries() {
            let def = EntityBuilder::class(entry.boxed.clone()).build();
            // Builtins are fixed; duplicate ids cannot occur here.
            let _ = registry.declare(def);
        }
        registry
    }

    /// Declare a new entity and return a handle for it.
    ///
    /// Ids that spell a canonical primitive name (`"int32"`, `"void"`,
    /// ...) are rejected: descriptor resolution reads those names as
    /// primitive kinds, so such an entity could never be referred to
    /// across the serialization boundary. The builtin boxed counterparts
    /// live under `builtin::` for the same reason.
    pub fn declare(&mut self, def: EntityDef) -> Result<TypeHandle, ModelError> {
        if PrimitiveKind::from_name(def.id.as_str()).is_some() {
            return Err(ModelError::ReservedName(def.id));
        }
        if self.entities.contains_key(&def.id) {
            return Err(ModelError::DuplicateEntity(def.id));
        }
        let handle = TypeHandle::named(def.id.clone(), def.kind.shape());
        log::debug!("declared entity {} ({} params)", def.id, def.params.len());
        self.entities.insert(def.id.clone(), Arc::new(def));
        Ok(handle)
    }

    /// Look up a declaration.
    pub fn get(&self, id: &EntityId) -> Option<&EntityDef> {
        self.entities.get(id).map(Arc::as_ref)
    }

    /// Whether an entity is declared.
    pub fn contains(&self, id: &EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Number of declared entities (builtins included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if no entities are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Issue a handle for a declared entity.
    pub fn handle(&self, id: &EntityId) -> Option<TypeHandle> {
        self.get(id)
            .map(|def| TypeHandle::named(def.id.clone(), def.kind.shape()))
    }

    /// Issue the synthesized per-entry implementation subclass handle for
    /// an overriding enumeration entry.
    pub fn entry_impl(&self, enumeration: &EntityId, entry: &str) -> Result<TypeHandle, ModelError> {
        let def = self
            .get(enumeration)
            .ok_or_else(|| ModelError::UnknownEntity(enumeration.clone()))?;
        let entries = match &def.kind {
            EntityKind::Enumeration { entries } => entries,
            _ => return Err(ModelError::NotAnEnumeration(enumeration.clone())),
        };
        let found = entries
            .iter()
            .find(|e| e.name == entry)
            .ok_or_else(|| ModelError::UnknownEntry {
                enumeration: enumeration.clone(),
                entry: entry.to_string(),
            })?;
        if !found.overrides {
            return Err(ModelError::NotOverridden {
                enumeration: enumeration.clone(),
                entry: entry.to_string(),
            });
        }
        Ok(TypeHandle::EnumEntryImpl {
            enumeration: enumeration.clone(),
            entry: entry.to_string(),
        })
    }

    /// Synthesize a dynamic delegating implementation handle over a set of
    /// contract entities.
    ///
    /// Every contract must be a declared interface or metadata tag.
    pub fn synthesize_proxy(&self, contracts: &[EntityId]) -> Result<TypeHandle, ModelError> {
        if contracts.is_empty() {
            return Err(ModelError::EmptyContractSet);
        }
        for contract in contracts {
            let def = self
                .get(contract)
                .ok_or_else(|| ModelError::UnknownEntity(contract.clone()))?;
            match def.kind {
                EntityKind::Interface | EntityKind::MetadataTag => {}
                _ => return Err(ModelError::NotAContract(contract.clone())),
            }
        }
        log::debug!("synthesized delegating implementation over {} contract(s)", contracts.len());
        Ok(TypeHandle::Proxy {
            contracts: contracts.to_vec(),
        })
    }

    /// Re-derive the `index`-th declared parameter of an entity.
    pub fn param(&self, entity: &EntityId, index: u32) -> Option<&ParamDef> {
        self.get(entity)?.params.get(index as usize)
    }

    /// Re-derive the bound expressions of the `index`-th declared
    /// parameter. This is the decode-side counterpart of keeping bounds
    /// out of parameter references: a bound mentioning the declaring
    /// entity itself is only ever expanded here, against the current
    /// declaration.
    pub fn param_bounds(&self, entity: &EntityId, index: u32) -> Option<&[TypeExpr]> {
        self.param(entity, index).map(|p| p.bounds.as_slice())
    }
}

// ---------------------------------------------------------------------------
// EntityBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`EntityDef`].
///
/// # Example
///
/// ```rust
/// use tyspect::{EntityBuilder, TypeRegistry};
///
/// let mut registry = TypeRegistry::new();
/// let list = EntityBuilder::interface("demo::List").param("E").build();
/// let handle = registry.declare(list).unwrap();
/// assert_eq!(handle.to_string(), "demo::List");
/// ```
#[derive(Debug)]
pub struct EntityBuilder {
    id: EntityId,
    kind: EntityKind,
    params: Vec<ParamDef>,
    entries: Vec<EnumEntry>,
    owner: Option<EntityId>,
    static_nested: bool,
}

impl EntityBuilder {
    fn with_kind(id: impl Into<EntityId>, kind: EntityKind) -> Self {
        EntityBuilder {
            id: id.into(),
            kind,
            params: Vec::new(),
            entries: Vec::new(),
            owner: None,
            static_nested: false,
        }
    }

    /// Start a class declaration.
    pub fn class(id: impl Into<EntityId>) -> Self {
        Self::with_kind(id, EntityKind::Class)
    }

    /// Start an interface declaration.
    pub fn interface(id: impl Into<EntityId>) -> Self {
        Self::with_kind(id, EntityKind::Interface)
    }

    /// Start a metadata-tag declaration.
    pub fn metadata_tag(id: impl Into<EntityId>) -> Self {
        Self::with_kind(id, EntityKind::MetadataTag)
    }

    /// Start an enumeration declaration.
    pub fn enumeration(id: impl Into<EntityId>) -> Self {
        Self::with_kind(id, EntityKind::Enumeration { entries: Vec::new() })
    }

    /// Declare an unbounded type parameter.
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParamDef::new(name));
        self
    }

    /// Declare a type parameter with upper bounds. Bounds may reference
    /// the entity being declared, by id.
    pub fn bounded_param(mut self, name: impl Into<String>, bounds: Vec<TypeExpr>) -> Self {
        self.params.push(ParamDef::bounded(name, bounds));
        self
    }

    /// Add a plain enumeration entry.
    pub fn entry(mut self, name: impl Into<String>) -> Self {
        self.entries.push(EnumEntry::new(name));
        self
    }

    /// Add an enumeration entry that overrides behavior.
    pub fn overriding_entry(mut self, name: impl Into<String>) -> Self {
        self.entries.push(EnumEntry::overriding(name));
        self
    }

    /// Mark the entity as nested in an owner, capturing the owner's
    /// generic context.
    pub fn nested_in(mut self, owner: impl Into<EntityId>) -> Self {
        self.owner = Some(owner.into());
        self.static_nested = false;
        self
    }

    /// Mark the entity as a static nested declaration (no captured
    /// generic context).
    pub fn static_nested_in(mut self, owner: impl Into<EntityId>) -> Self {
        self.owner = Some(owner.into());
        self.static_nested = true;
        self
    }

    /// Finish the declaration.
    pub fn build(self) -> EntityDef {
        let kind = match self.kind {
            EntityKind::Enumeration { .. } => EntityKind::Enumeration {
                entries: self.entries,
            },
            other => {
                if !self.entries.is_empty() {
                    log::warn!("entries on non-enumeration {} are ignored", self.id);
                }
                other
            }
        };
        EntityDef {
            id: self.id,
            kind,
            params: self.params,
            owner: self.owner,
            static_nested: self.static_nested,
        }
    }
}
