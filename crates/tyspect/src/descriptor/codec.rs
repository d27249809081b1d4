// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Encode/decode engine between type expressions and snapshots.
//!
//! `encode` is a pure structural recursion from [`TypeExpr`] into the
//! closed descriptor grammar; it consults the classifier to pick the
//! snapshot variant for handles and the canonical primitive names for
//! value types. `decode` is the inverse recursion, re-resolving every
//! identity against the supplied registry's *current* declarations.
//!
//! Round-trip law: for every encodable expression `E`,
//! `decode(&encode(&E)?, &registry)` is structurally equal to `E`.
//!
//! Recursion depth equals the nesting depth of the input, which is
//! bounded by source-authored declarations in the intended use. Callers
//! feeding externally supplied type graphs should bound them first; no
//! depth ceiling is enforced here.

use std::fmt;

use crate::classify::{classify, TypeCategory};
use crate::descriptor::model::{GenericDescriptor, TypeDescriptor};
use crate::model::{
    EntityId, GenericInstance, ParamDeclarer, ParamRef, PrimitiveKind, TypeExpr, TypeHandle,
    TypeRegistry, WildcardExpr,
};

// ---------------------------------------------------------------------------
// DescriptorError
// ---------------------------------------------------------------------------

/// Codec failure modes. All are non-recoverable for the failing call and
/// never retried or swallowed internally; callers decide whether to retry
/// with a corrected graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    /// Encode saw a shape the closed snapshot grammar cannot express.
    UnrecognizedDescriptorKind {
        /// What was encountered.
        detail: String,
    },
    /// A type parameter is declared by a function-like construct, which
    /// has no identity that is stable across the serialization boundary.
    UnsupportedDeclarationContext {
        /// Declaring function name.
        function: String,
    },
    /// A decoded parameter index no longer fits the declaring entity's
    /// current parameter list (definition drift since encode time).
    ParameterIndexOutOfRange {
        /// Declaring entity.
        entity: EntityId,
        /// Requested position.
        index: u32,
        /// Current declared parameter count.
        arity: usize,
    },
    /// Decode could not resolve a referenced entity or owner identity.
    MissingDeclaringEntity {
        /// Unresolvable entity.
        entity: EntityId,
    },
}

impl fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescriptorError::UnrecognizedDescriptorKind { detail } => {
                write!(f, "shape outside the descriptor grammar: {}", detail)
            }
            DescriptorError::UnsupportedDeclarationContext { function } => {
                write!(
                    f,
                    "type parameter declared by function {} has no stable identity",
                    function
                )
            }
            DescriptorError::ParameterIndexOutOfRange { entity, index, arity } => {
                write!(
                    f,
                    "parameter index {} out of range for {} (current arity {})",
                    index, entity, arity
                )
            }
            DescriptorError::MissingDeclaringEntity { entity } => {
                write!(f, "cannot resolve entity: {}", entity)
            }
        }
    }
}

impl std::error::Error for DescriptorError {}

// ---------------------------------------------------------------------------
// encode
// ---------------------------------------------------------------------------

/// Encode a type expression into its snapshot form.
///
/// Registry-free: every identity the snapshot needs is already carried by
/// the expression itself.
pub fn encode(expr: &TypeExpr) -> Result<TypeDescriptor, DescriptorError> {
    match expr {
        TypeExpr::Handle(handle) => encode_handle(handle),
        TypeExpr::Array(component) => Ok(TypeDescriptor::array(encode(component)?)),
        TypeExpr::Instantiation(instance) => {
            Ok(TypeDescriptor::Generic(encode_instance(instance)?))
        }
        TypeExpr::Param(param) => encode_param(param),
        TypeExpr::Wildcard(wildcard) => Ok(TypeDescriptor::Wildcard {
            upper: encode_all(&wildcard.upper)?,
            lower: encode_all(&wildcard.lower)?,
        }),
    }
}

/// Variant selection for handles goes through the classifier.
fn encode_handle(handle: &TypeHandle) -> Result<TypeDescriptor, DescriptorError> {
    match classify(Some(handle)) {
        Some(TypeCategory::PrimitiveOrVoid) => match handle {
            TypeHandle::Primitive(kind) => Ok(TypeDescriptor::named(kind.name())),
            _ => Err(unrecognized(handle)),
        },
        Some(TypeCategory::Array) => match handle {
            TypeHandle::Array(component) => Ok(TypeDescriptor::array(encode_handle(component)?)),
            _ => Err(unrecognized(handle)),
        },
        // Synthesized at runtime; neither has a source-declared identity
        // that means anything on the far side of the boundary.
        Some(TypeCategory::DynamicDelegatingImpl) | Some(TypeCategory::EnumerationValueImpl) => {
            Err(unrecognized(handle))
        }
        Some(
            TypeCategory::Enumeration
            | TypeCategory::MetadataTag
            | TypeCategory::AbstractContract
            | TypeCategory::Concrete,
        ) => match handle {
            TypeHandle::Named { id, .. } => Ok(TypeDescriptor::named(id.as_str())),
            _ => Err(unrecognized(handle)),
        },
        None => Err(unrecognized(handle)),
    }
}

fn encode_param(param: &ParamRef) -> Result<TypeDescriptor, DescriptorError> {
    match &param.declarer {
        ParamDeclarer::Entity(id) => Ok(TypeDescriptor::ParamRef {
            declaring: id.clone(),
            index: param.index,
        }),
        ParamDeclarer::Function(name) => Err(DescriptorError::UnsupportedDeclarationContext {
            function: name.clone(),
        }),
    }
}

fn encode_instance(instance: &GenericInstance) -> Result<GenericDescriptor, DescriptorError> {
    let args = encode_all(&instance.args)?;
    let owner = match &instance.owner {
        Some(owner) => Some(Box::new(encode_instance(owner)?)),
        None => None,
    };
    Ok(GenericDescriptor {
        entity: instance.entity.clone(),
        args,
        owner,
    })
}

fn encode_all(exprs: &[TypeExpr]) -> Result<Vec<TypeDescriptor>, DescriptorError> {
    exprs.iter().map(encode).collect()
}

fn unrecognized(handle: &TypeHandle) -> DescriptorError {
    let detail = match classify(Some(handle)) {
        Some(category) => format!("{} ({})", handle, category),
        None => handle.to_string(),
    };
    DescriptorError::UnrecognizedDescriptorKind { detail }
}

// ---------------------------------------------------------------------------
// decode
// ---------------------------------------------------------------------------

/// Decode a snapshot back into a type expression, resolving every
/// identity against the registry's current declarations.
pub fn decode(
    descriptor: &TypeDescriptor,
    registry: &TypeRegistry,
) -> Result<TypeExpr, DescriptorError> {
    match descriptor {
        TypeDescriptor::Named { name } => decode_named(name, registry),
        TypeDescriptor::Generic(generic) => {
            Ok(TypeExpr::Instantiation(decode_instance(generic, registry)?))
        }
        TypeDescriptor::Array { component } => {
            Ok(TypeExpr::array(decode(component, registry)?))
        }
        TypeDescriptor::ParamRef { declaring, index } => {
            decode_param(declaring, *index, registry)
        }
        TypeDescriptor::Wildcard { upper, lower } => Ok(TypeExpr::Wildcard(WildcardExpr {
            upper: decode_all(upper, registry)?,
            lower: decode_all(lower, registry)?,
        })),
    }
}

fn decode_named(name: &str, registry: &TypeRegistry) -> Result<TypeExpr, DescriptorError> {
    if let Some(kind) = PrimitiveKind::from_name(name) {
        return Ok(TypeExpr::Handle(TypeHandle::Primitive(kind)));
    }
    let id = EntityId::new(name);
    registry
        .handle(&id)
        .map(TypeExpr::Handle)
        .ok_or(DescriptorError::MissingDeclaringEntity { entity: id })
}

fn decode_instance(
    generic: &GenericDescriptor,
    registry: &TypeRegistry,
) -> Result<GenericInstance, DescriptorError> {
    let def = registry
        .get(&generic.entity)
        .ok_or_else(|| DescriptorError::MissingDeclaringEntity {
            entity: generic.entity.clone(),
        })?;
    if def.arity() != generic.args.len() {
        // Definition drift is the caller's concern; reapply as-is.
        log::warn!(
            "argument count {} differs from current arity {} of {}",
            generic.args.len(),
            def.arity(),
            generic.entity
        );
    }
    let args = decode_all(&generic.args, registry)?;
    let owner = match &generic.owner {
        Some(owner) => Some(Box::new(decode_instance(owner, registry)?)),
        None => None,
    };
    Ok(GenericInstance {
        entity: generic.entity.clone(),
        args,
        owner,
    })
}

fn decode_param(
    declaring: &EntityId,
    index: u32,
    registry: &TypeRegistry,
) -> Result<TypeExpr, DescriptorError> {
    let def = registry
        .get(declaring)
        .ok_or_else(|| DescriptorError::MissingDeclaringEntity {
            entity: declaring.clone(),
        })?;
    let arity = def.arity();
    if index as usize >= arity {
        return Err(DescriptorError::ParameterIndexOutOfRange {
            entity: declaring.clone(),
            index,
            arity,
        });
    }
    Ok(TypeExpr::Param(ParamRef::of_entity(declaring.clone(), index)))
}

fn decode_all(
    descriptors: &[TypeDescriptor],
    registry: &TypeRegistry,
) -> Result<Vec<TypeExpr>, DescriptorError> {
    descriptors.iter().map(|d| decode(d, registry)).collect()
}
