// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Primitive/reference duality table.
//!
//! Every primitive kind (including the `void` pseudo-type) has a builtin
//! boxed reference counterpart; this module owns the bidirectional table
//! and the total, never-failing conversions over it. When no pair applies
//! the conversions return their input unchanged, so callers never have to
//! branch on "was this actually a primitive".
//!
//! The table is built lazily once and never mutated afterwards; concurrent
//! unsynchronized reads are safe.

use std::sync::OnceLock;

use crate::model::{EntityId, EntityShape, PrimitiveKind, TypeHandle};

/// One primitive/boxed pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualityEntry {
    /// Value half.
    pub primitive: PrimitiveKind,
    /// Reference half: id of the builtin boxed entity.
    pub boxed: EntityId,
}

const BOXED_NAMES: [(PrimitiveKind, &str); 9] = [
    (PrimitiveKind::Bool, "builtin::Boolean"),
    (PrimitiveKind::Char, "builtin::Char"),
    (PrimitiveKind::Int8, "builtin::Int8"),
    (PrimitiveKind::Int16, "builtin::Int16"),
    (PrimitiveKind::Int32, "builtin::Int32"),
    (PrimitiveKind::Int64, "builtin::Int64"),
    (PrimitiveKind::Float32, "builtin::Float32"),
    (PrimitiveKind::Float64, "builtin::Float64"),
    (PrimitiveKind::Void, "builtin::Unit"),
];

static TABLE: OnceLock<Vec<DualityEntry>> = OnceLock::new();

/// The full duality table, one entry per primitive kind.
pub fn entries() -> &'static [DualityEntry] {
    TABLE.get_or_init(|| {
        BOXED_NAMES
            .iter()
            .map(|(primitive, boxed)| DualityEntry {
                primitive: *primitive,
                boxed: EntityId::new(*boxed),
            })
            .collect()
    })
}

/// Membership check against either half of a pair.
pub fn entry_matches(entry: &DualityEntry, handle: &TypeHandle) -> bool {
    match handle {
        TypeHandle::Primitive(kind) => *kind == entry.primitive,
        TypeHandle::Named { id, .. } => *id == entry.boxed,
        _ => false,
    }
}

/// Find the pair owning a handle, if any.
pub fn entry_for(handle: &TypeHandle) -> Option<&'static DualityEntry> {
    entries().iter().find(|entry| entry_matches(entry, handle))
}

/// Boxed counterpart of a primitive handle; identity for everything else.
pub fn to_boxed(handle: &TypeHandle) -> TypeHandle {
    if let TypeHandle::Primitive(kind) = handle {
        if let Some(entry) = entries().iter().find(|e| e.primitive == *kind) {
            return TypeHandle::named(entry.boxed.clone(), EntityShape::Class);
        }
    }
    handle.clone()
}

/// Primitive counterpart of a boxed handle; identity for everything else.
pub fn to_unboxed(handle: &TypeHandle) -> TypeHandle {
    if let TypeHandle::Named { id, .. } = handle {
        if let Some(entry) = entries().iter().find(|e| e.boxed == *id) {
            return TypeHandle::Primitive(entry.primitive);
        }
    }
    handle.clone()
}

/// True for primitive handles other than the zero-sized `void`
/// pseudo-type, which needs special-case handling elsewhere.
pub fn is_strict_primitive(handle: &TypeHandle) -> bool {
    matches!(handle, TypeHandle::Primitive(kind) if !kind.is_void())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_kind() {
        assert_eq!(entries().len(), PrimitiveKind::ALL.len());
        for kind in PrimitiveKind::ALL {
            assert!(entries().iter().any(|e| e.primitive == kind));
        }
    }

    #[test]
    fn test_box_unbox_round_trip() {
        for kind in PrimitiveKind::ALL {
            let primitive = TypeHandle::Primitive(kind);
            let boxed = to_boxed(&primitive);
            assert!(matches!(boxed, TypeHandle::Named { .. }));
            assert_eq!(to_unboxed(&boxed), primitive);
        }
    }

    #[test]
    fn test_idempotence() {
        let primitive = TypeHandle::Primitive(PrimitiveKind::Int32);
        let boxed = to_boxed(&primitive);
        assert_eq!(to_boxed(&boxed), boxed);
        assert_eq!(to_unboxed(&primitive), primitive);
        assert_eq!(to_unboxed(&to_unboxed(&boxed)), to_unboxed(&boxed));
    }

    #[test]
    fn test_identity_fallback() {
        let unrelated = TypeHandle::named("demo::Point", EntityShape::Class);
        assert_eq!(to_boxed(&unrelated), unrelated);
        assert_eq!(to_unboxed(&unrelated), unrelated);

        let array = TypeHandle::array(TypeHandle::Primitive(PrimitiveKind::Int32));
        assert_eq!(to_boxed(&array), array);
        assert_eq!(to_unboxed(&array), array);
    }

    #[test]
    fn test_entry_matches_both_halves() {
        let entry = entry_for(&TypeHandle::Primitive(PrimitiveKind::Bool)).unwrap();
        assert!(entry_matches(entry, &TypeHandle::Primitive(PrimitiveKind::Bool)));
        assert!(entry_matches(
            entry,
            &TypeHandle::named("builtin::Boolean", EntityShape::Class)
        ));
        assert!(!entry_matches(entry, &TypeHandle::Primitive(PrimitiveKind::Char)));
    }

    #[test]
    fn test_entry_for_unpaired_handle() {
        let unrelated = TypeHandle::named("demo::Point", EntityShape::Class);
        assert!(entry_for(&unrelated).is_none());
    }

    #[test]
    fn test_void_is_not_strict() {
        assert!(is_strict_primitive(&TypeHandle::Primitive(PrimitiveKind::Float64)));
        assert!(!is_strict_primitive(&TypeHandle::Primitive(PrimitiveKind::Void)));
        assert!(!is_strict_primitive(&TypeHandle::named(
            "builtin::Int32",
            EntityShape::Class
        )));
    }
}
