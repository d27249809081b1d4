// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime type-model introspection.
//!
//! tyspect maintains a registry of named type declarations (classes,
//! interfaces, metadata tags, enumerations, with generics, arrays and
//! runtime-synthesized delegating implementations) and provides three
//! things on top of it:
//!
//! - **Classification** ([`classify`], [`visit`]): every runtime
//!   [`TypeHandle`] falls into exactly one of eight structural
//!   [`TypeCategory`] values, with a partial visitor for
//!   category-narrowed dispatch.
//! - **Primitive duality** ([`duality`]): a total bidirectional table
//!   between primitive kinds and their builtin boxed counterparts, with
//!   identity fallback for everything unpaired.
//! - **Descriptors** ([`encode`], [`decode`]): a closed, serializable
//!   five-variant snapshot grammar that round-trips arbitrarily nested
//!   generic type expressions, including parameters whose bounds mention
//!   their own declaring entity, without depending on host identity
//!   semantics.
//!
//! # Example
//!
//! ```rust
//! use tyspect::{classify, decode, encode, EntityBuilder, GenericInstance,
//!     TypeCategory, TypeExpr, TypeRegistry};
//!
//! let mut registry = TypeRegistry::new();
//! registry
//!     .declare(EntityBuilder::interface("demo::List").param("E").build())
//!     .unwrap();
//! let string = registry
//!     .declare(EntityBuilder::class("demo::String").build())
//!     .unwrap();
//!
//! assert_eq!(classify(Some(&string)), Some(TypeCategory::Concrete));
//!
//! // List<String> survives the serialization boundary structurally intact.
//! let expr = TypeExpr::Instantiation(GenericInstance::new(
//!     "demo::List",
//!     vec![TypeExpr::Handle(string)],
//! ));
//! let snapshot = encode(&expr).unwrap();
//! let rebuilt = decode(&snapshot, &registry).unwrap();
//! assert!(expr.structurally_eq(&rebuilt));
//! ```
//!
//! All operations are synchronous, pure functions over immutable inputs;
//! the only process-wide state is the lazily built, read-only duality
//! table. Logging goes through the `log` facade; the library binds no
//! backend.

pub mod classify;
pub mod descriptor;
pub mod duality;
pub mod model;

pub use classify::{classify, visit, CategoryVisitor, TypeCategory};
pub use descriptor::{decode, encode, DescriptorError, GenericDescriptor, TypeDescriptor};
pub use duality::{
    entry_for, entry_matches, is_strict_primitive, to_boxed, to_unboxed, DualityEntry,
};
pub use model::{
    EntityBuilder, EntityDef, EntityId, EntityKind, EntityShape, EnumEntry, GenericInstance,
    ModelError, ParamDeclarer, ParamDef, ParamRef, PrimitiveKind, TypeExpr, TypeHandle,
    TypeRegistry, WildcardExpr,
};
