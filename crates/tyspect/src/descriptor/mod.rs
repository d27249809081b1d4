// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Serializable type descriptors and their codec.
//!
//! This is the transport surface of the crate: [`encode`] turns a
//! [`TypeExpr`](crate::model::TypeExpr) into a closed five-variant
//! [`TypeDescriptor`] snapshot, [`decode`] reconstructs a structurally
//! equal expression against a registry's current declarations, and
//! [`persistence`] gives the snapshots a JSON rendition.
//!
//! # Example
//!
//! ```rust
//! use tyspect::{decode, encode, EntityBuilder, GenericInstance, TypeExpr, TypeRegistry};
//!
//! let mut registry = TypeRegistry::new();
//! registry
//!     .declare(EntityBuilder::interface("demo::List").param("E").build())
//!     .unwrap();
//! let string = registry
//!     .declare(EntityBuilder::class("demo::String").build())
//!     .unwrap();
//!
//! let expr = TypeExpr::Instantiation(GenericInstance::new(
//!     "demo::List",
//!     vec![TypeExpr::Handle(string)],
//! ));
//!
//! let snapshot = encode(&expr).unwrap();
//! let rebuilt = decode(&snapshot, &registry).unwrap();
//! assert!(expr.structurally_eq(&rebuilt));
//! ```

mod codec;
mod model;
pub mod persistence;

pub use codec::{decode, encode, DescriptorError};
pub use model::{GenericDescriptor, TypeDescriptor};
pub use persistence::{from_json, load_snapshot, save_snapshot, to_json, SnapshotError};
