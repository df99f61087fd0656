//! Type resolver - reduces declared type references to dynamic payload shapes.
//!
//! This is the heart of the extraction core: a recursive classification of
//! every declared parameter and return type into the closed [`DynamicType`]
//! vocabulary. The mapping is intentionally narrow — just enough structure
//! for client-schema generation, not general type inference.

use crate::declaration::{PrimitiveKind, TypeRef};
use crate::error::{Error, Result};
use crate::model::{DynamicType, DynamicTypeId};
use lazy_static::lazy_static;
use log::trace;
use std::collections::HashMap;

lazy_static! {
    /// Nominal types that collapse to a scalar kind, looked up by simple name.
    ///
    /// The lookup is deliberately simple-name-only: a user-defined type that
    /// happens to be called `String` is classified as the well-known scalar.
    /// That is an accepted approximation of this tool, not an oversight.
    static ref WELL_KNOWN_SCALARS: HashMap<&'static str, DynamicTypeId> = {
        let mut table = HashMap::new();
        table.insert("Object", DynamicTypeId::Any);
        table.insert("Character", DynamicTypeId::Char);
        table.insert("Byte", DynamicTypeId::Char);
        table.insert("String", DynamicTypeId::String);
        table.insert("str", DynamicTypeId::String);
        table.insert("Short", DynamicTypeId::Integer);
        table.insert("Integer", DynamicTypeId::Integer);
        table.insert("Long", DynamicTypeId::Integer);
        table.insert("Float", DynamicTypeId::Float);
        table.insert("Double", DynamicTypeId::Float);
        table
    };

    /// Sequence-like containers whose identity is erased to `array`.
    static ref WELL_KNOWN_SEQUENCES: HashMap<&'static str, DynamicTypeId> = {
        let mut table = HashMap::new();
        table.insert("List", DynamicTypeId::Array);
        table.insert("Set", DynamicTypeId::Array);
        table.insert("Vec", DynamicTypeId::Array);
        table.insert("VecDeque", DynamicTypeId::Array);
        table.insert("HashSet", DynamicTypeId::Array);
        table.insert("BTreeSet", DynamicTypeId::Array);
        table
    };
}

/// Resolve a declared type reference into exactly one payload shape.
///
/// Pure and context-free: the same reference resolves to the same shape no
/// matter where it is nested. Unrepresentable categories (function types,
/// the never type, opaque types, unresolved types) fail with
/// [`Error::UnsupportedType`] rather than degrading to a placeholder.
pub fn resolve(ty: &TypeRef) -> Result<DynamicType> {
    trace!("resolving {:?}", ty);

    match ty {
        TypeRef::Primitive(kind) => Ok(DynamicType::scalar(resolve_primitive(*kind))),

        TypeRef::Array(element) => {
            let element_type = resolve(element)?;
            Ok(DynamicType::array(element_type))
        }

        TypeRef::Named { name, args } if args.is_empty() => {
            if let Some(&scalar) = WELL_KNOWN_SCALARS.get(name.as_str()) {
                return Ok(DynamicType::scalar(scalar));
            }
            Ok(DynamicType::user(name.clone()))
        }

        TypeRef::Named { name, args } => {
            if let Some(&sequence) = WELL_KNOWN_SEQUENCES.get(name.as_str()) {
                // container identity is erased; only the element type survives
                let element_type = resolve(&args[0])?;
                return Ok(DynamicType {
                    kind: sequence,
                    reference: None,
                    nested: vec![element_type],
                });
            }

            let arguments = args.iter().map(resolve).collect::<Result<Vec<_>>>()?;
            Ok(DynamicType::generic(name.clone(), arguments))
        }

        TypeRef::Variable { bound, .. } => match bound {
            // only the first declared upper bound is modeled
            Some(bound) => resolve(bound),
            None => Ok(DynamicType::scalar(DynamicTypeId::Any)),
        },

        // no attempt to inspect bounds; a coarse approximation
        TypeRef::Wildcard => Ok(DynamicType::scalar(DynamicTypeId::Any)),

        unsupported => Err(Error::UnsupportedType {
            declaration: String::new(),
            category: unsupported.category().to_string(),
        }),
    }
}

fn resolve_primitive(kind: PrimitiveKind) -> DynamicTypeId {
    match kind {
        PrimitiveKind::Bool => DynamicTypeId::Boolean,
        PrimitiveKind::Char | PrimitiveKind::I8 | PrimitiveKind::U8 => DynamicTypeId::Char,
        PrimitiveKind::I16
        | PrimitiveKind::I32
        | PrimitiveKind::I64
        | PrimitiveKind::I128
        | PrimitiveKind::U16
        | PrimitiveKind::U32
        | PrimitiveKind::U64
        | PrimitiveKind::U128
        | PrimitiveKind::Isize
        | PrimitiveKind::Usize => DynamicTypeId::Integer,
        PrimitiveKind::F32 | PrimitiveKind::F64 => DynamicTypeId::Float,
        PrimitiveKind::Unit => DynamicTypeId::Void,
    }
}
