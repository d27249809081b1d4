// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Host type model.
//!
//! Declarations ([`EntityDef`]) live in a [`TypeRegistry`]; the registry
//! issues runtime [`TypeHandle`]s, and use sites are described by
//! recursive [`TypeExpr`] values. Everything references entities by
//! [`EntityId`] (an opaque qualified name), never by pointer, so
//! self-referential parameter bounds are plain data.
//!
//! # Example
//!
//! ```rust
//! use tyspect::{EntityBuilder, GenericInstance, TypeExpr, TypeRegistry};
//!
//! let mut registry = TypeRegistry::new();
//! registry
//!     .declare(EntityBuilder::interface("demo::List").param("E").build())
//!     .unwrap();
//! let string = registry
//!     .declare(EntityBuilder::class("demo::String").build())
//!     .unwrap();
//!
//! let list_of_string = TypeExpr::Instantiation(GenericInstance::new(
//!     "demo::List",
//!     vec![TypeExpr::Handle(string)],
//! ));
//! assert_eq!(list_of_string.to_string(), "demo::List<demo::String>");
//! ```

mod entity;
mod expr;
mod handle;
mod registry;

pub use entity::{EntityDef, EntityId, EntityKind, EnumEntry, ModelError, ParamDef};
pub use expr::{GenericInstance, ParamDeclarer, ParamRef, TypeExpr, WildcardExpr};
pub use handle::{EntityShape, PrimitiveKind, TypeHandle};
pub use registry::{EntityBuilder, TypeRegistry};

#[cfg(test)]
mod tests;
