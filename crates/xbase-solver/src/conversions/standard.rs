//! Core-language conversion rules.
//!
//! This is the pipeline the dialect rules sit on. It knows nothing about the
//! legacy runtime beyond what the type table describes.

use crate::conversions::Conversion;
use crate::type_queries::{
    array_element, derives_from, implements_interface, is_array, is_interface, is_null, is_object,
    is_pointer_like, is_reference_type, is_value_type,
};
use crate::types::{SpecialType, TypeData, TypeId, TypeKind, TypeTable};
use xbase_binder::SymbolId;

/// Standard conversion rules consulted after the dialect rules.
pub trait StandardConversions: Send + Sync {
    fn classify_implicit(&self, types: &TypeTable, source: TypeId, target: TypeId) -> Conversion;

    fn classify_explicit(&self, types: &TypeTable, source: TypeId, target: TypeId) -> Conversion;

    /// Value type to `OBJECT` or to an interface it implements.
    fn has_boxing_conversion(&self, types: &TypeTable, source: TypeId, target: TypeId) -> bool;
}

#[derive(Copy, Clone, Debug, Default)]
pub struct CoreConversions;

impl StandardConversions for CoreConversions {
    fn classify_implicit(&self, types: &TypeTable, source: TypeId, target: TypeId) -> Conversion {
        if source == target {
            return Conversion::Identity;
        }
        if types.get(source).is_none() || types.get(target).is_none() {
            return Conversion::NoConversion;
        }
        if is_implicit_numeric(types, source, target) {
            return Conversion::ImplicitNumeric;
        }
        if is_null(types, source) && (is_reference_type(types, target) || is_pointer_like(types, target)) {
            return Conversion::ImplicitReference;
        }
        if is_implicit_reference(types, source, target) {
            return Conversion::ImplicitReference;
        }
        if self.has_boxing_conversion(types, source, target) {
            return Conversion::Boxing;
        }
        find_operator(types, source, target, true).map_or(Conversion::NoConversion, Conversion::UserDefined)
    }

    fn classify_explicit(&self, types: &TypeTable, source: TypeId, target: TypeId) -> Conversion {
        let implicit = self.classify_implicit(types, source, target);
        if implicit.exists() {
            return implicit;
        }
        if is_numeric_like(types, source) && is_numeric_like(types, target) {
            return Conversion::ImplicitNumeric;
        }
        // Downcast or cast from an interface.
        if is_reference_type(types, source)
            && is_reference_type(types, target)
            && (derives_from(types, target, source) || is_interface(types, source) || is_interface(types, target))
        {
            return Conversion::ImplicitReference;
        }
        // Unboxing.
        if is_value_type(types, target)
            && (is_object(types, source)
                || (is_interface(types, source) && implements_interface(types, target, source)))
        {
            return Conversion::Boxing;
        }
        find_operator(types, source, target, false).map_or(Conversion::NoConversion, Conversion::UserDefined)
    }

    fn has_boxing_conversion(&self, types: &TypeTable, source: TypeId, target: TypeId) -> bool {
        is_value_type(types, source)
            && (is_object(types, target)
                || (is_interface(types, target) && implements_interface(types, source, target)))
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn special(types: &TypeTable, id: TypeId) -> SpecialType {
    types.get(id).map_or(SpecialType::None, |d| d.special)
}

/// Numeric, `CHAR` or enum: the operands of explicit numeric conversions.
fn is_numeric_like(types: &TypeTable, id: TypeId) -> bool {
    match types.get(id) {
        Some(TypeData {
            kind: TypeKind::Enum { .. },
            ..
        }) => true,
        Some(d) => matches!(
            d.special,
            SpecialType::Char
                | SpecialType::SByte
                | SpecialType::Byte
                | SpecialType::Int16
                | SpecialType::UInt16
                | SpecialType::Int32
                | SpecialType::UInt32
                | SpecialType::Int64
                | SpecialType::UInt64
                | SpecialType::IntPtr
                | SpecialType::UIntPtr
                | SpecialType::Single
                | SpecialType::Double
                | SpecialType::Decimal
        ),
        None => false,
    }
}

/// Implicit numeric widening of the core language.
pub(crate) fn is_implicit_numeric(types: &TypeTable, source: TypeId, target: TypeId) -> bool {
    use SpecialType::{
        Byte, Char, Decimal, Double, Int16, Int32, Int64, SByte, Single, UInt16, UInt32, UInt64,
    };
    let to = special(types, target);
    match special(types, source) {
        SByte => matches!(to, Int16 | Int32 | Int64 | Single | Double | Decimal),
        Byte => matches!(
            to,
            Int16 | UInt16 | Int32 | UInt32 | Int64 | UInt64 | Single | Double | Decimal
        ),
        Int16 => matches!(to, Int32 | Int64 | Single | Double | Decimal),
        UInt16 | Char => matches!(to, Int32 | UInt32 | Int64 | UInt64 | Single | Double | Decimal),
        Int32 => matches!(to, Int64 | Single | Double | Decimal),
        UInt32 => matches!(to, Int64 | UInt64 | Single | Double | Decimal),
        Int64 | UInt64 => matches!(to, Single | Double | Decimal),
        Single => to == Double,
        _ => false,
    }
}

fn is_implicit_reference(types: &TypeTable, source: TypeId, target: TypeId) -> bool {
    if !is_reference_type(types, source) {
        return false;
    }
    if is_object(types, target) {
        return true;
    }
    if is_interface(types, target) {
        return implements_interface(types, source, target);
    }
    if derives_from(types, source, target) {
        return true;
    }
    // Array covariance for reference elements.
    if is_array(types, source) && is_array(types, target) {
        let (Some(s), Some(t)) = (array_element(types, source), array_element(types, target)) else {
            return false;
        };
        return s == t || is_implicit_reference(types, s, t);
    }
    false
}

/// User-defined conversion operator declared on the source or the target.
/// Among the operators whose parameter the source reaches, the closest wins:
/// exact match, then numeric widening, then reference conversion, then
/// boxing; declaration order breaks ties.
fn find_operator(types: &TypeTable, source: TypeId, target: TypeId, implicit_only: bool) -> Option<SymbolId> {
    [source, target]
        .into_iter()
        .filter_map(|owner| types.get(owner))
        .flat_map(|data| data.operators.iter())
        .filter(|op| op.result == target && (op.is_implicit || !implicit_only))
        .filter_map(|op| parameter_distance(types, source, op.parameter).map(|d| (d, op.symbol)))
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, symbol)| symbol)
}

fn parameter_distance(types: &TypeTable, source: TypeId, parameter: TypeId) -> Option<u8> {
    if source == parameter {
        Some(0)
    } else if is_implicit_numeric(types, source, parameter) {
        Some(1)
    } else if is_implicit_reference(types, source, parameter) {
        Some(2)
    } else if is_value_type(types, source) && is_object(types, parameter) {
        Some(3)
    } else {
        None
    }
}
