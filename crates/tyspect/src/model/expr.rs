// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type expressions.
//!
//! [`TypeExpr`] is the recursive grammar describing a type at use sites:
//! a plain handle, an array over a further expression, a generic
//! instantiation with an optional owner chain, a positional reference to a
//! declared type parameter, or a wildcard with variance bounds.
//!
//! Arrays exist in two forms (an array *handle* when the component is
//! itself a handle, an array *expression* otherwise); [`TypeExpr::array`]
//! canonicalizes to the handle form whenever possible so that structural
//! equality does not depend on which constructor a caller reached for.

use std::fmt;

use crate::model::entity::EntityId;
use crate::model::handle::TypeHandle;

// ---------------------------------------------------------------------------
// ParamRef
// ---------------------------------------------------------------------------

/// Declaring context of a type parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamDeclarer {
    /// Declared directly by a named entity.
    Entity(EntityId),
    /// Declared by a function-like construct, identified only by its
    /// (non-unique) name. Such parameters have no identity that is stable
    /// across a serialization boundary.
    Function(String),
}

/// Positional reference to a declared type parameter.
///
/// The reference carries no bound expressions: bounds may mention the
/// declaring entity itself, and inlining them would recurse forever. They
/// are re-derived from the declaring entity's current declaration when
/// needed (see [`TypeRegistry::param_bounds`](crate::model::TypeRegistry::param_bounds)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamRef {
    /// Where the parameter is declared.
    pub declarer: ParamDeclarer,
    /// Position in the declarer's parameter list.
    pub index: u32,
}

impl ParamRef {
    /// Reference to the `index`-th parameter of a named entity.
    pub fn of_entity(entity: impl Into<EntityId>, index: u32) -> Self {
        ParamRef {
            declarer: ParamDeclarer::Entity(entity.into()),
            index,
        }
    }

    /// Reference to the `index`-th parameter of a function-like construct.
    pub fn of_function(function: impl Into<String>, index: u32) -> Self {
        ParamRef {
            declarer: ParamDeclarer::Function(function.into()),
            index,
        }
    }
}

impl fmt::Display for ParamRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.declarer {
            ParamDeclarer::Entity(id) => write!(f, "param#{}@{}", self.index, id),
            ParamDeclarer::Function(name) => write!(f, "param#{}@fn:{}", self.index, name),
        }
    }
}

// ---------------------------------------------------------------------------
// GenericInstance
// ---------------------------------------------------------------------------

/// A named entity applied to type arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericInstance {
    /// The raw generic entity.
    pub entity: EntityId,
    /// Type arguments, in declaration order. Order carries substitution
    /// meaning and is preserved exactly.
    pub args: Vec<TypeExpr>,
    /// Enclosing instantiation captured by a non-static nested entity.
    pub owner: Option<Box<GenericInstance>>,
}

impl GenericInstance {
    /// Instantiation without an owner.
    pub fn new(entity: impl Into<EntityId>, args: Vec<TypeExpr>) -> Self {
        GenericInstance {
            entity: entity.into(),
            args,
            owner: None,
        }
    }

    /// Attach the captured enclosing instantiation.
    pub fn owned_by(mut self, owner: GenericInstance) -> Self {
        self.owner = Some(Box::new(owner));
        self
    }

    /// Structural equality: positional over arguments, recursive over the
    /// owner chain.
    pub fn structurally_eq(&self, other: &GenericInstance) -> bool {
        self.entity == other.entity
            && seq_eq(&self.args, &other.args)
            && match (&self.owner, &other.owner) {
                (None, None) => true,
                (Some(a), Some(b)) => a.structurally_eq(b),
                _ => false,
            }
    }
}

impl fmt::Display for GenericInstance {
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

// ---------------------------------------------------------------------------
// WildcardExpr
// ---------------------------------------------------------------------------

/// Variance expression with upper and lower bound sets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WildcardExpr {
    /// Upper bounds (`extends` direction).
    pub upper: Vec<TypeExpr>,
    /// Lower bounds (`super` direction).
    pub lower: Vec<TypeExpr>,
}

impl WildcardExpr {
    /// Unbounded wildcard.
    pub fn unbounded() -> Self {
        WildcardExpr::default()
    }

    /// Upper-bounded wildcard.
    pub fn extending(upper: Vec<TypeExpr>) -> Self {
        WildcardExpr {
            upper,
            lower: Vec::new(),
        }
    }

    /// Lower-bounded wildcard.
    pub fn super_of(lower: Vec<TypeExpr>) -> Self {
        WildcardExpr {
            upper: Vec::new(),
            lower,
        }
    }

    /// Structural equality: bound lists compare as unordered sets.
    pub fn structurally_eq(&self, other: &WildcardExpr) -> bool {
        set_eq(&self.upper, &other.upper) && set_eq(&self.lower, &other.lower)
    }
}

impl fmt::Display for WildcardExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.upper.is_empty() && self.lower.is_empty() {
            return write!(f, "?");
        }
        let (keyword, bounds) = if self.lower.is_empty() {
            ("extends", &self.upper)
        } else {
            ("super", &self.lower)
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

// ---------------------------------------------------------------------------
// TypeExpr
// ---------------------------------------------------------------------------

/// A node in the recursive type-expression grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A fully-erased runtime type.
    Handle(TypeHandle),
    /// Array whose component is itself a non-trivial expression
    /// (e.g. `List<T>[]`). Use [`TypeExpr::array`] to construct arrays;
    /// it collapses handle components into [`TypeHandle::Array`].
    Array(Box<TypeExpr>),
    /// Generic instantiation.
    Instantiation(GenericInstance),
    /// Positional type-parameter reference.
    Param(ParamRef),
    /// Wildcard with variance bounds.
    Wildcard(WildcardExpr),
}

impl TypeExpr {
    /// Expression over a plain handle.
    pub fn handle(handle: TypeHandle) -> Self {
        TypeExpr::Handle(handle)
    }

    /// Expression over a primitive kind.
    pub fn primitive(kind: crate::model::handle::PrimitiveKind) -> Self {
        TypeExpr::Handle(TypeHandle::Primitive(kind))
    }

    /// Canonicalizing array constructor.
    ///
    /// An array of a plain handle is itself a plain handle; only arrays of
    /// generic expressions need an expression node.
    pub fn array(component: TypeExpr) -> Self {
        match component {
            TypeExpr::Handle(handle) => TypeExpr::Handle(TypeHandle::array(handle)),
            other => TypeExpr::Array(Box::new(other)),
        }
    }

    /// Structural equality.
    ///
    /// Positional over generic arguments, recursive over owners and array
    /// components, and unordered over wildcard bound sets. The two array
    /// forms compare by component: a hand-built `Array` node over a plain
    /// handle is the same type as the corresponding array handle, so
    /// canonicalization never affects equality.
    pub fn structurally_eq(&self, other: &TypeExpr) -> bool {
        match (self, other) {
            (TypeExpr::Handle(a), TypeExpr::Handle(b)) => a == b,
            (TypeExpr::Array(a), TypeExpr::Array(b)) => a.structurally_eq(b),
            (TypeExpr::Array(a), TypeExpr::Handle(TypeHandle::Array(b)))
            | (TypeExpr::Handle(TypeHandle::Array(b)), TypeExpr::Array(a)) => {
                a.structurally_eq(&TypeExpr::Handle((**b).clone()))
            }
            (TypeExpr::Instantiation(a), TypeExpr::Instantiation(b)) => a.structurally_eq(b),
            (TypeExpr::Param(a), TypeExpr::Param(b)) => a == b,
            (TypeExpr::Wildcard(a), TypeExpr::Wildcard(b)) => a.structurally_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Handle(handle) => write!(f, "{}", handle),
            TypeExpr::Array(component) => write!(f, "{}[]", component),
            TypeExpr::Instantiation(instance) => write!(f, "{}", instance),
            TypeExpr::Param(param) => write!(f, "{}", param),
            TypeExpr::Wildcard(wildcard) => write!(f, "{}", wildcard),
        }
    }
}

/// Positional sequence equality under `structurally_eq`.
fn seq_eq(a: &[TypeExpr], b: &[TypeExpr]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.structurally_eq(y))
}

/// Unordered set equality under `structurally_eq`.
fn set_eq(a: &[TypeExpr], b: &[TypeExpr]) -> bool {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::handle::{EntityShape, PrimitiveKind};

    fn named(name: &str) -> TypeExpr {
        TypeExpr::Handle(TypeHandle::named(name, EntityShape::Class))
    }

    #[test]
    fn test_array_canonicalization() {
        // Array of a handle collapses into an array handle.
        let of_handle = TypeExpr::array(TypeExpr::primitive(PrimitiveKind::Int32));
        assert_eq!(
            of_handle,
            TypeExpr::Handle(TypeHandle::array(TypeHandle::Primitive(PrimitiveKind::Int32)))
        );

        // Array of an instantiation stays an expression node.
        let of_generic = TypeExpr::array(TypeExpr::Instantiation(GenericInstance::new(
            "demo::List",
            vec![named("demo::String")],
        )));
        assert!(matches!(of_generic, TypeExpr::Array(_)));
    }

    #[test]
    fn test_array_forms_compare_equal() {
        // A hand-built Array node over a plain handle and the array
        // handle it canonicalizes to denote the same type.
        let spelled_out = TypeExpr::Array(Box::new(TypeExpr::primitive(PrimitiveKind::Int32)));
        let collapsed =
            TypeExpr::Handle(TypeHandle::array(TypeHandle::Primitive(PrimitiveKind::Int32)));
        assert!(spelled_out.structurally_eq(&collapsed));
        assert!(collapsed.structurally_eq(&spelled_out));
        assert_ne!(spelled_out, collapsed);

        // Nested: Array(Array(handle)) vs the fully collapsed handle.
        let nested = TypeExpr::Array(Box::new(spelled_out));
        let flat = TypeExpr::Handle(TypeHandle::array(TypeHandle::array(
            TypeHandle::Primitive(PrimitiveKind::Int32),
        )));
        assert!(nested.structurally_eq(&flat));

        // Different components still differ.
        let other = TypeExpr::Array(Box::new(TypeExpr::primitive(PrimitiveKind::Int64)));
        assert!(!other.structurally_eq(&collapsed));
    }

    #[test]
    fn test_wildcard_bounds_compare_unordered() {
        let a = TypeExpr::Wildcard(WildcardExpr::extending(vec![
            named("demo::Readable"),
            named("demo::Closeable"),
        ]));
        let b = TypeExpr::Wildcard(WildcardExpr::extending(vec![
            named("demo::Closeable"),
            named("demo::Readable"),
        ]));
        assert!(a.structurally_eq(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_argument_order_is_positional() {
        let ab = TypeExpr::Instantiation(GenericInstance::new(
            "demo::Map",
            vec![named("demo::A"), named("demo::B")],
        ));
        let ba = TypeExpr::Instantiation(GenericInstance::new(
            "demo::Map",
            vec![named("demo::B"), named("demo::A")],
        ));
        assert!(!ab.structurally_eq(&ba));
    }

    #[test]
    fn test_display_owner_chain() {
        let outer = GenericInstance::new("demo::Outer", vec![TypeExpr::primitive(PrimitiveKind::Float32)]);
        let inner = GenericInstance::new("demo::Outer::Inner", vec![TypeExpr::primitive(PrimitiveKind::Float64)])
            .owned_by(outer);
        assert_eq!(
            TypeExpr::Instantiation(inner).to_string(),
            "demo::Outer<float32>::Inner<float64>"
        );
    }

    #[test]
    fn test_display_wildcards_and_params() {
        assert_eq!(TypeExpr::Wildcard(WildcardExpr::unbounded()).to_string(), "?");
        assert_eq!(
            TypeExpr::Wildcard(WildcardExpr::super_of(vec![named("demo::A")])).to_string(),
            "? super demo::A"
        );
        assert_eq!(
            TypeExpr::Param(ParamRef::of_entity("demo::List", 0)).to_string(),
            "param#0@demo::List"
        );
    }
}
