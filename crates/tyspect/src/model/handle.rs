// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime type handles.
//!
//! A [`TypeHandle`] is the runtime identity of a single, fully-erased
//! type: a primitive, an array, a named entity, a synthesized per-entry
//! enumeration subclass, or a dynamically generated delegating
//! implementation (proxy). Handles are self-describing: the structural
//! facts the classifier needs (shape of the named entity, component of an
//! array) are carried in the handle itself, so classification is total
//! and registry-free.

use std::fmt;

use crate::model::entity::EntityId;

// ---------------------------------------------------------------------------
// PrimitiveKind
// ---------------------------------------------------------------------------

/// Value-type kinds, plus the zero-sized `void` pseudo-type.
///
/// The eight non-void kinds are the *strict* primitives; `void` needs
/// special-case handling wherever a value is expected (see
/// [`is_strict_primitive`](crate::duality::is_strict_primitive)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    Char,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    /// Zero-sized pseudo-type.
    Void,
}

impl PrimitiveKind {
    /// All kinds, in canonical order.
    pub const ALL: [PrimitiveKind; 9] = [
        PrimitiveKind::Bool,
        PrimitiveKind::Char,
        PrimitiveKind::Int8,
        PrimitiveKind::Int16,
        PrimitiveKind::Int32,
        PrimitiveKind::Int64,
        PrimitiveKind::Float32,
        PrimitiveKind::Float64,
        PrimitiveKind::Void,
    ];

    /// Canonical name, stable across the serialization boundary.
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Int8 => "int8",
            PrimitiveKind::Int16 => "int16",
            PrimitiveKind::Int32 => "int32",
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::Float32 => "float32",
            PrimitiveKind::Float64 => "float64",
            PrimitiveKind::Void => "void",
        }
    }

    /// Parse a canonical name back into a kind.
    pub fn from_name(name: &str) -> Option<Self> {
        PrimitiveKind::ALL.iter().copied().find(|k| k.name() == name)
    }

    /// Returns true for the `void` pseudo-type.
    pub const fn is_void(self) -> bool {
        matches!(self, PrimitiveKind::Void)
    }

    /// Value size in bytes (`void` is zero-sized).
    pub const fn size(self) -> usize {
        match self {
            PrimitiveKind::Bool | PrimitiveKind::Int8 => 1,
            PrimitiveKind::Int16 => 2,
            PrimitiveKind::Char | PrimitiveKind::Int32 | PrimitiveKind::Float32 => 4,
            PrimitiveKind::Int64 | PrimitiveKind::Float64 => 8,
            PrimitiveKind::Void => 0,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// EntityShape / TypeHandle
// ---------------------------------------------------------------------------

/// Structural shape of a named entity, copied from its declaration when a
/// handle is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityShape {
    Class,
    Interface,
    MetadataTag,
    Enumeration,
}

/// Runtime type handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeHandle {
    /// Primitive value type or `void`.
    Primitive(PrimitiveKind),
    /// Array over a component type.
    Array(Box<TypeHandle>),
    /// Named entity reference.
    Named {
        /// Entity identity.
        id: EntityId,
        /// Declaration shape at handle-issue time.
        shape: EntityShape,
    },
    /// Synthesized subclass backing an enumeration entry that overrides
    /// behavior. Assignable to its enumeration, but not itself reported
    /// as the enumeration type.
    EnumEntryImpl {
        /// Owning enumeration.
        enumeration: EntityId,
        /// Entry name.
        entry: String,
    },
    /// Dynamically generated delegating implementation over a set of
    /// contract entities. Has no natural source declaration.
    Proxy {
        /// Implemented contracts (interfaces or metadata tags).
        contracts: Vec<EntityId>,
    },
}

impl TypeHandle {
    /// Primitive handle.
    pub fn primitive(kind: PrimitiveKind) -> Self {
        TypeHandle::Primitive(kind)
    }

    /// Array handle over a component.
    pub fn array(component: TypeHandle) -> Self {
        TypeHandle::Array(Box::new(component))
    }

    /// Named entity handle.
    pub fn named(id: impl Into<EntityId>, shape: EntityShape) -> Self {
        TypeHandle::Named {
            id: id.into(),
            shape,
        }
    }

    /// Component handle for arrays, `None` otherwise.
    pub fn component(&self) -> Option<&TypeHandle> {
        match self {
            TypeHandle::Array(component) => Some(component),
            _ => None,
        }
    }

    /// Entity id for named handles, `None` otherwise.
    pub fn entity_id(&self) -> Option<&EntityId> {
        match self {
            TypeHandle::Named { id, .. } => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeHandle::Primitive(kind) => write!(f, "{}", kind),
            TypeHandle::Array(component) => write!(f, "{}[]", component),
            TypeHandle::Named { id, .. } => write!(f, "{}", id),
            TypeHandle::EnumEntryImpl { enumeration, entry } => {
                write!(f, "{}::{}$Impl", enumeration, entry)
            }
            TypeHandle::Proxy { contracts } => {
                write!(f, "$Proxy(")?;
                for (i, contract) in contracts.iter().enumerate() {
                    if i > 0 {
                        write!(f, " & ")?;
                    }
                    write!(f, "{}", contract)?;
                }
                write!(f, ")")
            }
        }
    }
}
