//! Type predicates.
//!
//! Pure queries over `(&TypeTable, TypeId)`. Ids missing from the table
//! answer `false` (or `0` for sizes) everywhere.

use crate::types::{LegacyType, SpecialType, TypeData, TypeId, TypeKind, TypeTable};
use xbase_common::limits::MAX_BASE_TYPE_DEPTH;

#[inline]
fn data(types: &TypeTable, id: TypeId) -> Option<&TypeData> {
    types.get(id)
}

#[inline]
fn special(types: &TypeTable, id: TypeId) -> SpecialType {
    data(types, id).map_or(SpecialType::None, |d| d.special)
}

#[inline]
fn legacy(types: &TypeTable, id: TypeId) -> LegacyType {
    data(types, id).map_or(LegacyType::None, |d| d.legacy)
}

// =============================================================================
// Numeric
// =============================================================================

/// Integral framework types, including the native-sized integers.
/// `CHAR` and `LOGIC` are not integral.
pub fn is_integral(types: &TypeTable, id: TypeId) -> bool {
    matches!(
        special(types, id),
        SpecialType::SByte
            | SpecialType::Byte
            | SpecialType::Int16
            | SpecialType::UInt16
            | SpecialType::Int32
            | SpecialType::UInt32
            | SpecialType::Int64
            | SpecialType::UInt64
            | SpecialType::IntPtr
            | SpecialType::UIntPtr
    )
}

pub fn is_signed_integral(types: &TypeTable, id: TypeId) -> bool {
    matches!(
        special(types, id),
        SpecialType::SByte
            | SpecialType::Int16
            | SpecialType::Int32
            | SpecialType::Int64
            | SpecialType::IntPtr
    )
}

pub fn is_floating(types: &TypeTable, id: TypeId) -> bool {
    matches!(special(types, id), SpecialType::Single | SpecialType::Double)
}

/// Integral, floating or `DECIMAL`.
pub fn is_numeric(types: &TypeTable, id: TypeId) -> bool {
    is_integral(types, id) || is_floating(types, id) || special(types, id) == SpecialType::Decimal
}

pub fn is_native_integer(types: &TypeTable, id: TypeId) -> bool {
    matches!(special(types, id), SpecialType::IntPtr | SpecialType::UIntPtr)
}

#[inline]
pub fn is_char(types: &TypeTable, id: TypeId) -> bool {
    special(types, id) == SpecialType::Char
}

#[inline]
pub fn is_boolean(types: &TypeTable, id: TypeId) -> bool {
    special(types, id) == SpecialType::Boolean
}

#[inline]
pub fn is_decimal(types: &TypeTable, id: TypeId) -> bool {
    special(types, id) == SpecialType::Decimal
}

// =============================================================================
// Pointers
// =============================================================================

pub fn is_pointer_like(types: &TypeTable, id: TypeId) -> bool {
    matches!(data(types, id), Some(d) if matches!(d.kind, TypeKind::Pointer { .. }))
}

pub fn is_void_pointer(types: &TypeTable, id: TypeId) -> bool {
    matches!(
        data(types, id),
        Some(TypeData {
            kind: TypeKind::Pointer { pointee },
            ..
        }) if *pointee == TypeId::VOID
    )
}

// =============================================================================
// Legacy runtime types
// =============================================================================

#[inline]
pub fn is_usual(types: &TypeTable, id: TypeId) -> bool {
    legacy(types, id) == LegacyType::Usual
}

#[inline]
pub fn is_psz(types: &TypeTable, id: TypeId) -> bool {
    legacy(types, id) == LegacyType::Psz
}

#[inline]
pub fn is_legacy_float(types: &TypeTable, id: TypeId) -> bool {
    legacy(types, id) == LegacyType::Float
}

#[inline]
pub fn is_legacy_date(types: &TypeTable, id: TypeId) -> bool {
    legacy(types, id) == LegacyType::Date
}

#[inline]
pub fn is_legacy_symbol(types: &TypeTable, id: TypeId) -> bool {
    legacy(types, id) == LegacyType::Symbol
}

#[inline]
pub fn is_currency(types: &TypeTable, id: TypeId) -> bool {
    legacy(types, id) == LegacyType::Currency
}

/// `CODEBLOCK` or a class derived from it.
pub fn is_codeblock_like(types: &TypeTable, id: TypeId) -> bool {
    derives_from(types, id, TypeId::CODEBLOCK)
}

/// The legacy `ARRAY` class or a class derived from it.
pub fn is_legacy_array_like(types: &TypeTable, id: TypeId) -> bool {
    derives_from(types, id, TypeId::ARRAY)
}

// =============================================================================
// Shapes
// =============================================================================

pub fn is_enum(types: &TypeTable, id: TypeId) -> bool {
    matches!(data(types, id), Some(d) if matches!(d.kind, TypeKind::Enum { .. }))
}

pub fn enum_underlying(types: &TypeTable, id: TypeId) -> Option<TypeId> {
    match data(types, id)?.kind {
        TypeKind::Enum { underlying } => Some(underlying),
        _ => None,
    }
}

pub fn is_interface(types: &TypeTable, id: TypeId) -> bool {
    matches!(data(types, id), Some(d) if d.kind == TypeKind::Interface)
}

pub fn is_class(types: &TypeTable, id: TypeId) -> bool {
    matches!(data(types, id), Some(d) if d.kind == TypeKind::Class)
}

pub fn is_delegate(types: &TypeTable, id: TypeId) -> bool {
    matches!(data(types, id), Some(d) if matches!(d.kind, TypeKind::Delegate { .. }))
}

pub fn delegate_param_count(types: &TypeTable, id: TypeId) -> Option<u32> {
    match data(types, id)?.kind {
        TypeKind::Delegate { params } => Some(params),
        _ => None,
    }
}

pub fn is_array(types: &TypeTable, id: TypeId) -> bool {
    matches!(data(types, id), Some(d) if matches!(d.kind, TypeKind::Array { .. }))
}

/// Framework array whose element type is `element`.
pub fn is_array_of(types: &TypeTable, id: TypeId, element: TypeId) -> bool {
    matches!(
        data(types, id),
        Some(TypeData {
            kind: TypeKind::Array { element: e },
            ..
        }) if *e == element
    )
}

pub fn array_element(types: &TypeTable, id: TypeId) -> Option<TypeId> {
    match data(types, id)?.kind {
        TypeKind::Array { element } => Some(element),
        _ => None,
    }
}

pub fn is_value_type(types: &TypeTable, id: TypeId) -> bool {
    data(types, id).is_some_and(TypeData::is_value_type)
}

pub fn is_reference_type(types: &TypeTable, id: TypeId) -> bool {
    data(types, id).is_some_and(TypeData::is_reference_type)
}

pub fn is_raw_layout_value_type(types: &TypeTable, id: TypeId) -> bool {
    data(types, id).is_some_and(|d| d.is_value_type() && d.raw_layout)
}

#[inline]
pub fn is_string(types: &TypeTable, id: TypeId) -> bool {
    special(types, id) == SpecialType::String
}

#[inline]
pub fn is_object(types: &TypeTable, id: TypeId) -> bool {
    special(types, id) == SpecialType::Object
}

#[inline]
pub fn is_null(types: &TypeTable, id: TypeId) -> bool {
    matches!(data(types, id), Some(d) if d.kind == TypeKind::Null)
}

/// Byte size; enums report their underlying type's size.
pub fn size_in_bytes(types: &TypeTable, id: TypeId) -> u32 {
    match data(types, id) {
        Some(TypeData {
            kind: TypeKind::Enum { underlying },
            ..
        }) => data(types, *underlying).map_or(0, |d| d.size),
        Some(d) => d.size,
        None => 0,
    }
}

/// Operand of the legacy cast syntax: integral, pointer, native int or any
/// value type.
pub fn can_participate_in_legacy_cast(types: &TypeTable, id: TypeId) -> bool {
    is_integral(types, id)
        || is_pointer_like(types, id)
        || is_native_integer(types, id)
        || is_value_type(types, id)
}

// =============================================================================
// Hierarchy
// =============================================================================

/// Whether `derived` is `base` or has it in its base chain.
pub fn derives_from(types: &TypeTable, derived: TypeId, base: TypeId) -> bool {
    let mut current = Some(derived);
    let mut depth = 0;
    while let Some(id) = current {
        let Some(d) = data(types, id) else {
            return false;
        };
        if id == base {
            return true;
        }
        depth += 1;
        if depth > MAX_BASE_TYPE_DEPTH {
            return false;
        }
        current = d.base;
    }
    false
}

/// Whether `id`, one of its bases, or one of their interfaces implements
/// `interface`.
pub fn implements_interface(types: &TypeTable, id: TypeId, interface: TypeId) -> bool {
    let mut current = Some(id);
    let mut depth = 0;
    while let Some(type_id) = current {
        let Some(d) = data(types, type_id) else {
            return false;
        };
        if d.interfaces
            .iter()
            .any(|&i| i == interface || interface_extends(types, i, interface, depth))
        {
            return true;
        }
        depth += 1;
        if depth > MAX_BASE_TYPE_DEPTH {
            return false;
        }
        current = d.base;
    }
    false
}

fn interface_extends(types: &TypeTable, interface: TypeId, target: TypeId, depth: u32) -> bool {
    if depth > MAX_BASE_TYPE_DEPTH {
        return false;
    }
    data(types, interface).is_some_and(|d| {
        d.interfaces
            .iter()
            .any(|&i| i == target || interface_extends(types, i, target, depth + 1))
    })
}

#[cfg(test)]
#[path = "tests/type_queries_tests.rs"]
mod tests;
