// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Serializable descriptor grammar.
//!
//! [`TypeDescriptor`] is the closed, five-variant snapshot form of a type
//! expression. It holds only opaque string identities, never handles or
//! bound expressions, so a snapshot survives any serialization boundary
//! and decodes against whatever declarations exist on the far side.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::EntityId;

// ---------------------------------------------------------------------------
// TypeDescriptor
// ---------------------------------------------------------------------------

/// Snapshot of a type expression. Closed variant set: the codec fails
/// loudly on anything it cannot express in these five shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TypeDescriptor {
    /// Concrete named type or primitive/void, by canonical name.
    Named {
        /// Entity id, or a canonical primitive name (`"int32"`, `"void"`).
        name: String,
    },
    /// Generic instantiation with an optional owner chain.
    Generic(GenericDescriptor),
    /// Array over a component descriptor.
    Array {
        /// Component snapshot.
        component: Box<TypeDescriptor>,
    },
    /// Positional reference to a type parameter declared by a named
    /// entity. Deliberately carries no bound expressions: the parameter is
    /// re-derived by indexing into the declaring entity's current
    /// parameter list at decode time, which sidesteps identity-unstable
    /// parameter comparison and the structural cycles of
    /// self-referential bounds.
    ParamRef {
        /// Declaring entity.
        declaring: EntityId,
        /// Position in the declaring entity's parameter list.
        index: u32,
    },
    /// Wildcard with upper and lower bound sets.
    Wildcard {
        /// Upper bounds.
        upper: Vec<TypeDescriptor>,
        /// Lower bounds.
        lower: Vec<TypeDescriptor>,
    },
}

/// Generic instantiation snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericDescriptor {
    /// Raw generic entity.
    pub entity: EntityId,
    /// Argument snapshots, order preserved exactly (order carries
    /// substitution meaning).
    pub args: Vec<TypeDescriptor>,
    /// Captured enclosing instantiation for non-static nested entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Box<GenericDescriptor>>,
}

impl GenericDescriptor {
    /// Instantiation snapshot without an owner.
    pub fn new(entity: impl Into<EntityId>, args: Vec<TypeDescriptor>) -> Self {
        GenericDescriptor {
            entity: entity.into(),
            args,
            owner: None,
        }
    }

    /// Attach the owner instantiation snapshot.
    pub fn owned_by(mut self, owner: GenericDescriptor) -> Self {
        self.owner = Some(Box::new(owner));
        self
    }

    /// Structural equality, positional over arguments.
    pub fn structurally_eq(&self, other: &GenericDescriptor) -> bool {
        self.entity == other.entity
            && self.args.len() == other.args.len()
            && self
                .args
                .iter()
                .zip(&other.args)
                .all(|(a, b)| a.structurally_eq(b))
            && match (&self.owner, &other.owner) {
                (None, None) => true,
                (Some(a), Some(b)) => a.structurally_eq(b),
                _ => false,
            }
    }
}

impl TypeDescriptor {
    /// Named snapshot.
    pub fn named(name: impl Into<String>) -> Self {
        TypeDescriptor::Named { name: name.into() }
    }

    /// Array snapshot.
    pub fn array(component: TypeDescriptor) -> Self {
        TypeDescriptor::Array {
            component: Box::new(component),
        }
    }

    /// Parameter reference snapshot.
    pub fn param_ref(declaring: impl Into<EntityId>, index: u32) -> Self {
        TypeDescriptor::ParamRef {
            declaring: declaring.into(),
            index,
        }
    }

    /// Structural equality: positional over generic arguments, unordered
    /// over wildcard bound sets.
    pub fn structurally_eq(&self, other: &TypeDescriptor) -> bool {
        match (self, other) {
            (TypeDescriptor::Named { name: a }, TypeDescriptor::Named { name: b }) => a == b,
            (TypeDescriptor::Generic(a), TypeDescriptor::Generic(b)) => a.structurally_eq(b),
            (TypeDescriptor::Array { component: a }, TypeDescriptor::Array { component: b }) => {
                a.structurally_eq(b)
            }
            (
                TypeDescriptor::ParamRef {
                    declaring: da,
                    index: ia,
                },
                TypeDescriptor::ParamRef {
                    declaring: db,
                    index: ib,
                },
            ) => da == db && ia == ib,
            (
                TypeDescriptor::Wildcard {
                    upper: ua,
                    lower: la,
                },
                TypeDescriptor::Wildcard {
                    upper: ub,
                    lower: lb,
                },
            ) => set_eq(ua, ub) && set_eq(la, lb),
            _ => false,
        }
    }
}

/// Unordered set equality under `structurally_eq`.
fn set_eq(a: &[TypeDescriptor], b: &[TypeDescriptor]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut used = vec![false; b.len()];
    for x in a {
        let mut matched = false;
        for (i, y) in b.iter().enumerate() {
            if !used[i] && x.structurally_eq(y) {
                used[i] = true;
                matched = true;
                break;
            }
        }
        if !matched {
            return false;
        }
    }
    true
}

impl fmt::Display for GenericDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.owner {
            Some(owner) => write!(f, "{}::{}", owner, self.entity.simple_name())?,
            None => write!(f, "{}", self.entity)?,
        }
        if !self.args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Named { name } => f.write_str(name),
            TypeDescriptor::Generic(generic) => write!(f, "{}", generic),
            TypeDescriptor::Array { component } => write!(f, "{}[]", component),
            TypeDescriptor::ParamRef { declaring, index } => {
                write!(f, "param#{}@{}", index, declaring)
            }
            TypeDescriptor::Wildcard { upper, lower } => {
                if upper.is_empty() && lower.is_empty() {
                    return write!(f, "?");
                }
                let (keyword, bounds) = if lower.is_empty() {
                    ("extends", upper)
                } else {
                    ("super", lower)
                };
                write!(f, "? {} ", keyword)?;
                for (i, bound) in bounds.iter().enumerate() {
                    if i > 0 {
                        write!(f, " & ")?;
                    }
                    write!(f, "{}", bound)?;
                }
                Ok(())
            }
        }
    }
}
