//! Operand widening for integral binary expressions.
//!
//! The dialects type `b1 + b2` (two `BYTE`s) the way the core language does,
//! as `LONG`, but accept assigning it back to `BYTE`. What matters is the
//! largest operand that went into the expression, not its static type.

use xbase_common::limits::MAX_OPERAND_WIDENING_DEPTH;

use crate::conversions::{Conversion, ConversionClassifier, RuleInput, RuleOutcome};
use crate::expr::{ConstantValue, ExprArena, ExprIndex, ExprKind};
use crate::type_queries::{is_integral, is_signed_integral, size_in_bytes};
use crate::types::{TypeId, TypeTable};

/// Smallest integral type holding a literal value. Non-negative values
/// prefer the unsigned types.
pub fn natural_literal_type(value: &ConstantValue) -> Option<TypeId> {
    match *value {
        ConstantValue::Int(v) if v >= 0 => Some(natural_unsigned(v.unsigned_abs())),
        ConstantValue::Int(v) => Some(if v >= i64::from(i8::MIN) {
            TypeId::SBYTE
        } else if v >= i64::from(i16::MIN) {
            TypeId::INT16
        } else if v >= i64::from(i32::MIN) {
            TypeId::INT32
        } else {
            TypeId::INT64
        }),
        ConstantValue::UInt(v) => Some(natural_unsigned(v)),
        _ => None,
    }
}

fn natural_unsigned(v: u64) -> TypeId {
    if v <= u64::from(u8::MAX) {
        TypeId::BYTE
    } else if v <= u64::from(u16::MAX) {
        TypeId::UINT16
    } else if v <= u64::from(u32::MAX) {
        TypeId::UINT32
    } else {
        TypeId::UINT64
    }
}

/// Widest operand type of an arithmetic or bitwise expression tree.
///
/// Nested operators recurse, implicit conversions are looked through and
/// literals take their natural type. On equal widths the left operand wins.
pub fn largest_operand_type(types: &TypeTable, exprs: &ExprArena, expr: ExprIndex) -> TypeId {
    largest_operand_inner(types, exprs, expr, 0)
}

fn largest_operand_inner(types: &TypeTable, exprs: &ExprArena, expr: ExprIndex, depth: u32) -> TypeId {
    if depth >= MAX_OPERAND_WIDENING_DEPTH {
        return exprs.type_of(expr);
    }
    match exprs.kind(expr) {
        Some(ExprKind::Binary { op, left, right }) if op.is_arithmetic_or_bitwise() => {
            let left = largest_operand_inner(types, exprs, *left, depth + 1);
            let right = largest_operand_inner(types, exprs, *right, depth + 1);
            if size_in_bytes(types, right) > size_in_bytes(types, left) {
                right
            } else {
                left
            }
        }
        Some(ExprKind::Literal(value)) => {
            natural_literal_type(value).unwrap_or_else(|| exprs.type_of(expr))
        }
        Some(ExprKind::Conversion {
            operand,
            explicit: false,
        }) => largest_operand_inner(types, exprs, *operand, depth + 1),
        _ => exprs.type_of(expr),
    }
}

/// Integral binary expression converted to another integral type.
pub(super) fn binary_operand_widening(
    classifier: &ConversionClassifier<'_>,
    input: &RuleInput,
) -> Option<RuleOutcome> {
    let types = classifier.types;
    let exprs = classifier.exprs;
    let expr = input.expr?;
    let Some(ExprKind::Binary { op, .. }) = exprs.kind(expr) else {
        return None;
    };
    if !op.is_arithmetic_or_bitwise()
        || !input.source_class.is_integral()
        || !input.target_class.is_integral()
    {
        return None;
    }

    let largest = largest_operand_type(types, exprs, expr);
    if !is_integral(types, largest) {
        return None;
    }
    let target = input.target;
    let (from, to) = (size_in_bytes(types, largest), size_in_bytes(types, target));
    let conversion = if largest == target || from < to {
        Conversion::ImplicitNumeric
    } else if from > to {
        Conversion::NoConversion
    } else if is_signed_integral(types, largest) == is_signed_integral(types, target)
        || classifier.options.signed_unsigned_conversion
    {
        Conversion::ImplicitNumeric
    } else {
        Conversion::NoConversion
    };
    Some(RuleOutcome::plain(conversion))
}
