//! Conversions performed by the dialect cast syntax `TYPE(expr)`.
//!
//! The legacy cast reinterprets bits rather than converting values, so it
//! accepts integral/pointer pairs the standard cast rejects.

use crate::conversions::{Conversion, ConversionClassifier, RuleInput, RuleOutcome};
use crate::type_classifier::TypeClassification;
use crate::type_queries::{can_participate_in_legacy_cast, is_void_pointer, size_in_bytes};

pub(super) fn legacy_cast(classifier: &ConversionClassifier<'_>, input: &RuleInput) -> Option<RuleOutcome> {
    let types = classifier.types;
    let expr = input.expr?;
    if !classifier.exprs.is_legacy_cast_operand(expr)
        || input.source_class == TypeClassification::Usual
        || !can_participate_in_legacy_cast(types, input.source)
        || !can_participate_in_legacy_cast(types, input.target)
    {
        return None;
    }

    // Platform width comes from the dialect options, not the type table.
    let pointer_size = u32::from(classifier.options.pointer_size);
    let source = input.source_class;
    let conversion = match input.target_class {
        TypeClassification::Boolean if source.is_integral() => Conversion::Identity,
        target if target.is_integral() => match source {
            TypeClassification::Boolean => Conversion::Identity,
            s if s.is_numeric() => Conversion::ImplicitNumeric,
            TypeClassification::Pointer { .. }
                if is_void_pointer(types, input.source)
                    && size_in_bytes(types, input.target) == pointer_size =>
            {
                Conversion::Identity
            }
            _ => return None,
        },
        TypeClassification::Pointer { .. } => match source {
            TypeClassification::Integral { size, .. } if size == pointer_size => Conversion::Identity,
            TypeClassification::Integral { .. } => Conversion::IntegerToPointer,
            TypeClassification::Pointer { .. } | TypeClassification::Psz => Conversion::Identity,
            // Native integers never get here: `native-int` runs first.
            _ => return None,
        },
        TypeClassification::Psz => Conversion::Identity,
        _ => return None,
    };
    Some(RuleOutcome::plain(conversion))
}
