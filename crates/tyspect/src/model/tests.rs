// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Integration tests for the host type model.

use super::*;
use crate::duality;

#[test]
fn test_builtins_are_pre_declared() {
    let registry = TypeRegistry::new();
    for entry in duality::entries() {
        assert!(registry.contains(&entry.boxed), "missing builtin {}", entry.boxed);
    }
    assert_eq!(registry.len(), duality::entries().len());
}

#[test]
fn test_declare_and_duplicate() {
    let mut registry = TypeRegistry::new();
    let handle = registry
        .declare(EntityBuilder::class("demo::Point").build())
        .expect("declare");
    assert_eq!(handle, TypeHandle::named("demo::Point", EntityShape::Class));

    let err = registry
        .declare(EntityBuilder::interface("demo::Point").build())
        .unwrap_err();
    assert_eq!(err, ModelError::DuplicateEntity("demo::Point".into()));
}

#[test]
fn test_primitive_names_are_reserved() {
    // Descriptor resolution reads canonical primitive names as primitive
    // kinds, so an entity declared under such an id would come back as
    // the primitive after a round trip.
    let mut registry = TypeRegistry::new();
    for kind in PrimitiveKind::ALL {
        let err = registry
            .declare(EntityBuilder::class(kind.name()).build())
            .unwrap_err();
        assert_eq!(err, ModelError::ReservedName(kind.name().into()));
        assert!(!registry.contains(&kind.name().into()));
    }
    assert_eq!(
        ModelError::ReservedName("int32".into()).to_string(),
        "entity id is a reserved primitive name: int32"
    );
}

#[test]
fn test_handle_reflects_declaration_shape() {
    let mut registry = TypeRegistry::new();
    registry
        .declare(EntityBuilder::metadata_tag("demo::Audited").build())
        .unwrap();
    let handle = registry.handle(&"demo::Audited".into()).unwrap();
    assert_eq!(handle, TypeHandle::named("demo::Audited", EntityShape::MetadataTag));
    assert!(registry.handle(&"demo::Absent".into()).is_none());
}

#[test]
fn test_entry_impl_issuance() {
    let mut registry = TypeRegistry::new();
    registry
        .declare(
            EntityBuilder::enumeration("demo::Op")
                .entry("MINUS")
                .overriding_entry("PLUS")
                .build(),
        )
        .unwrap();

    let plus = registry.entry_impl(&"demo::Op".into(), "PLUS").expect("PLUS impl");
    assert_eq!(
        plus,
        TypeHandle::EnumEntryImpl {
            enumeration: "demo::Op".into(),
            entry: "PLUS".to_string(),
        }
    );

    // Non-overriding entries get no synthesized subclass.
    assert_eq!(
        registry.entry_impl(&"demo::Op".into(), "MINUS").unwrap_err(),
        ModelError::NotOverridden {
            enumeration: "demo::Op".into(),
            entry: "MINUS".to_string(),
        }
    );
    assert_eq!(
        registry.entry_impl(&"demo::Op".into(), "TIMES").unwrap_err(),
        ModelError::UnknownEntry {
            enumeration: "demo::Op".into(),
            entry: "TIMES".to_string(),
        }
    );
    assert_eq!(
        registry.entry_impl(&"demo::Absent".into(), "PLUS").unwrap_err(),
        ModelError::UnknownEntity("demo::Absent".into())
    );

    registry
        .declare(EntityBuilder::class("demo::Point").build())
        .unwrap();
    assert_eq!(
        registry.entry_impl(&"demo::Point".into(), "PLUS").unwrap_err(),
        ModelError::NotAnEnumeration("demo::Point".into())
    );
}

#[test]
fn test_proxy_synthesis_rules() {
    let mut registry = TypeRegistry::new();
    registry
        .declare(EntityBuilder::interface("demo::Closeable").build())
        .unwrap();
    registry
        .declare(EntityBuilder::metadata_tag("demo::Audited").build())
        .unwrap();
    registry
        .declare(EntityBuilder::class("demo::Point").build())
        .unwrap();

    let proxy = registry
        .synthesize_proxy(&["demo::Closeable".into(), "demo::Audited".into()])
        .expect("proxy");
    assert_eq!(
        proxy,
        TypeHandle::Proxy {
            contracts: vec!["demo::Closeable".into(), "demo::Audited".into()],
        }
    );

    assert_eq!(
        registry.synthesize_proxy(&[]).unwrap_err(),
        ModelError::EmptyContractSet
    );
    assert_eq!(
        registry.synthesize_proxy(&["demo::Point".into()]).unwrap_err(),
        ModelError::NotAContract("demo::Point".into())
    );
    assert_eq!(
        registry.synthesize_proxy(&["demo::Absent".into()]).unwrap_err(),
        ModelError::UnknownEntity("demo::Absent".into())
    );
}

#[test]
fn test_self_referential_bound_is_re_derivable() {
    // Scalar<T> where T's bound is Scalar<T> itself: representable as
    // plain data because bounds refer to the declaring entity by id.
    let bound = TypeExpr::Instantiation(GenericInstance::new(
        "demo::Scalar",
        vec![TypeExpr::Param(ParamRef::of_entity("demo::Scalar", 0))],
    ));
    let mut registry = TypeRegistry::new();
    registry
        .declare(
            EntityBuilder::interface("demo::Scalar")
                .bounded_param("T", vec![bound.clone()])
                .build(),
        )
        .unwrap();

    let bounds = registry
        .param_bounds(&"demo::Scalar".into(), 0)
        .expect("bounds of T");
    assert_eq!(bounds.len(), 1);
    assert!(bounds[0].structurally_eq(&bound));

    let param = registry.param(&"demo::Scalar".into(), 0).expect("param T");
    assert_eq!(param.name, "T");
    assert!(registry.param(&"demo::Scalar".into(), 1).is_none());
}

#[test]
fn test_nested_declarations() {
    let mut registry = TypeRegistry::new();
    registry
        .declare(EntityBuilder::class("demo::Outer").param("A").build())
        .unwrap();
    registry
        .declare(
            EntityBuilder::class("demo::Outer::Inner")
                .param("B")
                .nested_in("demo::Outer")
                .build(),
        )
        .unwrap();
    registry
        .declare(
            EntityBuilder::class("demo::Outer::Helper")
                .static_nested_in("demo::Outer")
                .build(),
        )
        .unwrap();

    let inner = registry.get(&"demo::Outer::Inner".into()).unwrap();
    assert_eq!(inner.owner, Some("demo::Outer".into()));
    assert!(!inner.static_nested);

    let helper = registry.get(&"demo::Outer::Helper".into()).unwrap();
    assert!(helper.static_nested);
    assert_eq!(EntityId::new("demo::Outer::Inner").simple_name(), "Inner");
}

#[test]
fn test_model_error_display() {
    assert_eq!(
        ModelError::UnknownEntity("demo::Absent".into()).to_string(),
        "unknown entity: demo::Absent"
    );
    assert_eq!(
        ModelError::EmptyContractSet.to_string(),
        "proxy requires at least one contract"
    );
}
