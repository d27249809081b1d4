// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural classification of runtime type handles.
//!
//! Every handle falls into exactly one of eight [`TypeCategory`] values.
//! The categories are not mutually exclusive under naive property checks
//! (a per-entry enumeration subclass is assignable to its enumeration, a
//! proxy is assignable to the metadata tags it implements), so the match
//! arms below are ordered by the priority chain that resolves those
//! overlaps: enumeration assignability, then primitive-or-void, then
//! dynamic delegating implementation, then metadata tag, then abstract
//! contract, then array. Anything left is [`TypeCategory::Concrete`] by
//! exclusion, a closed-world default rather than a positive match.
//!
//! [`visit`] dispatches a handle to exactly one callback of a
//! [`CategoryVisitor`], with arguments narrowed per category; all
//! callbacks default to `None`, so visitors implement only the categories
//! they care about.

use std::fmt;

use crate::model::{EntityId, EntityShape, PrimitiveKind, TypeHandle};

// ---------------------------------------------------------------------------
// TypeCategory
// ---------------------------------------------------------------------------

/// Structural category of a runtime type handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    /// Enumeration type itself.
    Enumeration,
    /// Synthesized subclass backing an overriding enumeration entry.
    EnumerationValueImpl,
    /// Metadata-tag (annotation-like) contract.
    MetadataTag,
    /// Primitive value type or `void`.
    PrimitiveOrVoid,
    /// Array type.
    Array,
    /// Abstract contract (interface).
    AbstractContract,
    /// Dynamically generated delegating implementation.
    DynamicDelegatingImpl,
    /// Instantiable named type; the closed-world default.
    Concrete,
}

impl TypeCategory {
    /// All categories.
    pub const ALL: [TypeCategory; 8] = [
        TypeCategory::Enumeration,
        TypeCategory::EnumerationValueImpl,
        TypeCategory::MetadataTag,
        TypeCategory::PrimitiveOrVoid,
        TypeCategory::Array,
        TypeCategory::AbstractContract,
        TypeCategory::DynamicDelegatingImpl,
        TypeCategory::Concrete,
    ];

    /// Human-readable category name.
    pub const fn description(self) -> &'static str {
        match self {
            TypeCategory::Enumeration => "enumeration",
            TypeCategory::EnumerationValueImpl => "enumeration value implementation",
            TypeCategory::MetadataTag => "metadata tag",
            TypeCategory::PrimitiveOrVoid => "primitive or void",
            TypeCategory::Array => "array",
            TypeCategory::AbstractContract => "abstract contract",
            TypeCategory::DynamicDelegatingImpl => "dynamic delegating implementation",
            TypeCategory::Concrete => "concrete type",
        }
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

// ---------------------------------------------------------------------------
// classify
// ---------------------------------------------------------------------------

/// Classify a handle into exactly one category.
///
/// Total and never-failing: an absent handle yields no category (not an
/// error), every present handle yields exactly one.
pub fn classify(handle: Option<&TypeHandle>) -> Option<TypeCategory> {
    let handle = handle?;
    Some(match handle {
        // Enumeration assignability first: the enumeration itself, and the
        // per-entry subclass that is assignable to it without being it.
        TypeHandle::Named {
            shape: EntityShape::Enumeration,
            ..
        } => TypeCategory::Enumeration,
        TypeHandle::EnumEntryImpl { .. } => TypeCategory::EnumerationValueImpl,
        TypeHandle::Primitive(_) => TypeCategory::PrimitiveOrVoid,
        // Before the tag arm: a proxy implements tag contracts.
        TypeHandle::Proxy { .. } => TypeCategory::DynamicDelegatingImpl,
        TypeHandle::Named {
            shape: EntityShape::MetadataTag,
            ..
        } => TypeCategory::MetadataTag,
        TypeHandle::Named {
            shape: EntityShape::Interface,
            ..
        } => TypeCategory::AbstractContract,
        TypeHandle::Array(_) => TypeCategory::Array,
        TypeHandle::Named {
            shape: EntityShape::Class,
            ..
        } => TypeCategory::Concrete,
    })
}

// ---------------------------------------------------------------------------
// CategoryVisitor
// ---------------------------------------------------------------------------

/// Partial visitor over the eight categories.
///
/// Each callback defaults to `None`; implement only the categories you
/// care about and let the rest fall through.
pub trait CategoryVisitor<R> {
    /// Enumeration type.
    fn enumeration(&mut self, handle: &TypeHandle) -> Option<R> {
        let _ = handle;
        None
    }

    /// Per-entry subclass, with a handle for its owning enumeration.
    fn enumeration_value_impl(&mut self, entry: &TypeHandle, enumeration: &TypeHandle) -> Option<R> {
        let _ = (entry, enumeration);
        None
    }

    /// Metadata-tag contract.
    fn metadata_tag(&mut self, handle: &TypeHandle) -> Option<R> {
        let _ = handle;
        None
    }

    /// Primitive value type or `void`.
    fn primitive_or_void(&mut self, kind: PrimitiveKind) -> Option<R> {
        let _ = kind;
        None
    }

    /// Array type, narrowed to its component.
    fn array(&mut self, component: &TypeHandle) -> Option<R> {
        let _ = component;
        None
    }

    /// Abstract contract (interface).
    fn abstract_contract(&mut self, handle: &TypeHandle) -> Option<R> {
        let _ = handle;
        None
    }

    /// Dynamic delegating implementation, narrowed to its contracts.
    fn dynamic_delegating_impl(&mut self, contracts: &[EntityId]) -> Option<R> {
        let _ = contracts;
        None
    }

    /// Concrete named type.
    fn concrete(&mut self, handle: &TypeHandle) -> Option<R> {
        let _ = handle;
        None
    }
}

/// Dispatch a handle to exactly one visitor callback.
///
/// Absent handles and unimplemented callbacks both yield `None`.
pub fn visit<R, V: CategoryVisitor<R>>(handle: Option<&TypeHandle>, visitor: &mut V) -> Option<R> {
    let handle = handle?;
    match handle {
        TypeHandle::Named {
            shape: EntityShape::Enumeration,
            ..
        } => visitor.enumeration(handle),
        TypeHandle::EnumEntryImpl { enumeration, .. } => {
            let owner = TypeHandle::named(enumeration.clone(), EntityShape::Enumeration);
            visitor.enumeration_value_impl(handle, &owner)
        }
        TypeHandle::Primitive(kind) => visitor.primitive_or_void(*kind),
        TypeHandle::Proxy { contracts } => visitor.dynamic_delegating_impl(contracts),
        TypeHandle::Named {
            shape: EntityShape::MetadataTag,
            ..
        } => visitor.metadata_tag(handle),
        TypeHandle::Named {
            shape: EntityShape::Interface,
            ..
        } => visitor.abstract_contract(handle),
        TypeHandle::Array(component) => visitor.array(component),
        TypeHandle::Named {
            shape: EntityShape::Class,
            ..
        } => visitor.concrete(handle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityBuilder, TypeRegistry};

    fn sample_registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry
            .declare(
                EntityBuilder::enumeration("demo::Op")
                    .entry("MINUS")
                    .overriding_entry("PLUS")
                    .build(),
            )
            .unwrap();
        registry
            .declare(EntityBuilder::metadata_tag("demo::Audited").build())
            .unwrap();
        registry
            .declare(EntityBuilder::interface("demo::Closeable").build())
            .unwrap();
        registry
            .declare(EntityBuilder::class("demo::Point").build())
            .unwrap();
        registry
    }

    #[test]
    fn test_all_eight_categories() {
        let registry = sample_registry();
        let op = registry.handle(&"demo::Op".into()).unwrap();
        let plus_impl = registry.entry_impl(&"demo::Op".into(), "PLUS").unwrap();
        let audited = registry.handle(&"demo::Audited".into()).unwrap();
        let closeable = registry.handle(&"demo::Closeable".into()).unwrap();
        let point = registry.handle(&"demo::Point".into()).unwrap();
        let proxy = registry.synthesize_proxy(&["demo::Audited".into()]).unwrap();
        let int32 = TypeHandle::Primitive(PrimitiveKind::Int32);
        let array = TypeHandle::array(point.clone());

        assert_eq!(classify(Some(&op)), Some(TypeCategory::Enumeration));
        assert_eq!(classify(Some(&plus_impl)), Some(TypeCategory::EnumerationValueImpl));
        assert_eq!(classify(Some(&audited)), Some(TypeCategory::MetadataTag));
        assert_eq!(classify(Some(&int32)), Some(TypeCategory::PrimitiveOrVoid));
        assert_eq!(classify(Some(&array)), Some(TypeCategory::Array));
        assert_eq!(classify(Some(&closeable)), Some(TypeCategory::AbstractContract));
        assert_eq!(classify(Some(&proxy)), Some(TypeCategory::DynamicDelegatingImpl));
        assert_eq!(classify(Some(&point)), Some(TypeCategory::Concrete));
    }

    #[test]
    fn test_absent_handle_has_no_category() {
        assert_eq!(classify(None), None);
    }

    #[test]
    fn test_proxy_over_tag_is_not_a_tag() {
        let registry = sample_registry();
        let proxy = registry.synthesize_proxy(&["demo::Audited".into()]).unwrap();
        assert_eq!(classify(Some(&proxy)), Some(TypeCategory::DynamicDelegatingImpl));
    }

    #[test]
    fn test_void_is_primitive_or_void() {
        let void = TypeHandle::Primitive(PrimitiveKind::Void);
        assert_eq!(classify(Some(&void)), Some(TypeCategory::PrimitiveOrVoid));
    }

    /// Visitor that only cares about two categories.
    struct PartialNamer;

    impl CategoryVisitor<String> for PartialNamer {
        fn primitive_or_void(&mut self, kind: PrimitiveKind) -> Option<String> {
            Some(format!("primitive {}", kind))
        }

        fn enumeration_value_impl(
            &mut self,
            entry: &TypeHandle,
            enumeration: &TypeHandle,
        ) -> Option<String> {
            Some(format!("{} of {}", entry, enumeration))
        }
    }

    #[test]
    fn test_partial_visitor_dispatch() {
        let registry = sample_registry();
        let mut namer = PartialNamer;

        let int64 = TypeHandle::Primitive(PrimitiveKind::Int64);
        assert_eq!(
            visit(Some(&int64), &mut namer),
            Some("primitive int64".to_string())
        );

        let plus_impl = registry.entry_impl(&"demo::Op".into(), "PLUS").unwrap();
        assert_eq!(
            visit(Some(&plus_impl), &mut namer),
            Some("demo::Op::PLUS$Impl of demo::Op".to_string())
        );

        // Unimplemented callbacks fall through to None.
        let point = registry.handle(&"demo::Point".into()).unwrap();
        assert_eq!(visit(Some(&point), &mut namer), None);
        assert_eq!(visit(None, &mut namer), None);
    }

    #[test]
    fn test_visitor_narrows_array_and_proxy() {
        struct Narrowing;
        impl CategoryVisitor<String> for Narrowing {
            fn array(&mut self, component: &TypeHandle) -> Option<String> {
                Some(format!("array of {}", component))
            }
            fn dynamic_delegating_impl(&mut self, contracts: &[EntityId]) -> Option<String> {
                Some(format!("{} contract(s)", contracts.len()))
            }
        }

        let registry = sample_registry();
        let mut narrowing = Narrowing;

        let array = TypeHandle::array(TypeHandle::Primitive(PrimitiveKind::Bool));
        assert_eq!(
            visit(Some(&array), &mut narrowing),
            Some("array of bool".to_string())
        );

        let proxy = registry
            .synthesize_proxy(&["demo::Audited".into(), "demo::Closeable".into()])
            .unwrap();
        assert_eq!(visit(Some(&proxy), &mut narrowing), Some("2 contract(s)".to_string()));
    }
}
