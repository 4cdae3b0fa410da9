//! Ordered implicit-conversion rules of the legacy dialects.
//!
//! Each rule either decides (`Some`) or passes (`None`). A decision may be
//! `NoConversion`, which stops the cascade before the standard rules run.

use crate::annotations::ExprAnnotations;
use crate::conversions::legacy_cast::legacy_cast;
use crate::conversions::widening::binary_operand_widening;
use crate::conversions::{Conversion, ConversionClassifier, RuleInput, RuleOutcome};
use crate::type_classifier::TypeClassification as TC;
use crate::type_queries::{derives_from, is_reference_type, size_in_bytes};
use crate::types::TypeId;

type Rule = fn(&ConversionClassifier<'_>, &RuleInput) -> Option<RuleOutcome>;

pub(crate) const IMPLICIT_RULES: &[(&str, Rule)] = &[
    ("null-to-usual", null_to_usual),
    ("char-aliasing", char_aliasing),
    ("native-int", native_int),
    ("pointer-to-object", pointer_to_object),
    ("cross-width-numeric", cross_width_numeric),
    ("binary-widening", binary_operand_widening),
    ("legacy-cast", legacy_cast),
    ("usual-source", usual_source),
    ("object-bridging", object_bridging),
    ("numeric-fallback", numeric_fallback),
];

// =============================================================================
// Rules
// =============================================================================

fn null_to_usual(classifier: &ConversionClassifier<'_>, input: &RuleInput) -> Option<RuleOutcome> {
    if input.target_class != TC::Usual {
        return None;
    }
    let is_null = input.source_class == TC::Null
        || input
            .expr
            .is_some_and(|expr| classifier.exprs.is_null_literal(expr));
    if !is_null {
        return None;
    }
    classifier
        .types
        .get(input.target)?
        .operators
        .iter()
        .find(|op| op.is_implicit && op.parameter == TypeId::OBJECT && op.result == input.target)
        .map(|op| RuleOutcome::plain(Conversion::UserDefined(op.symbol)))
}

fn char_aliasing(classifier: &ConversionClassifier<'_>, input: &RuleInput) -> Option<RuleOutcome> {
    let word = TC::Integral {
        signed: false,
        size: 2,
    };
    match (input.source_class, input.target_class) {
        (TC::Char, t) if t == word => Some(RuleOutcome::plain(Conversion::Identity)),
        (s, TC::Char) if s == word => Some(RuleOutcome::plain(Conversion::Identity)),
        (TC::Char, TC::Integral { size: 1, .. }) | (TC::Integral { size: 1, .. }, TC::Char)
            if classifier.options.arithmetic_conversions =>
        {
            Some(RuleOutcome::plain(Conversion::ImplicitNumeric))
        }
        _ => None,
    }
}

fn native_int(_: &ConversionClassifier<'_>, input: &RuleInput) -> Option<RuleOutcome> {
    let conversion = match (input.source_class, input.target_class) {
        (TC::NativeInteger { .. }, TC::Pointer { .. }) => Conversion::IntegerToPointer,
        (TC::NativeInteger { .. }, TC::Struct { raw_layout: true }) => Conversion::Identity,
        (TC::NativeInteger { .. }, t) if t.is_integral() => Conversion::Identity,
        (TC::NativeInteger { .. }, TC::Object) => {
            return Some(RuleOutcome::annotated(
                Conversion::Boxing,
                ExprAnnotations::SPECIAL_UNBOX,
            ));
        }
        (TC::Struct { raw_layout: true } | TC::Pointer { .. }, TC::NativeInteger { .. }) => {
            Conversion::Identity
        }
        (s, TC::NativeInteger { .. }) if s.is_integral() => Conversion::Identity,
        _ => return None,
    };
    Some(RuleOutcome::plain(conversion))
}

fn pointer_to_object(classifier: &ConversionClassifier<'_>, input: &RuleInput) -> Option<RuleOutcome> {
    match (input.source_class, input.target_class) {
        (TC::Pointer { .. } | TC::Psz, TC::Object) if classifier.options.pointer_magic => {
            Some(RuleOutcome::plain(Conversion::Boxing))
        }
        _ => None,
    }
}

fn cross_width_numeric(classifier: &ConversionClassifier<'_>, input: &RuleInput) -> Option<RuleOutcome> {
    let options = classifier.options;
    if !options.any_numeric_compat() {
        return None;
    }
    let (source, target) = (input.source_class, input.target_class);
    if matches!(source, TC::LegacyFloat | TC::Currency) && target.is_numeric() {
        return options
            .arithmetic_conversions
            .then_some(RuleOutcome::plain(Conversion::Boxing));
    }
    if !source.is_numeric() || !target.is_numeric() {
        return None;
    }

    let types = classifier.types;
    let suppressed = input
        .expr
        .is_some_and(|expr| classifier.exprs.suppresses_warnings(expr));
    let warn = |flag: ExprAnnotations| {
        if suppressed {
            ExprAnnotations::empty()
        } else {
            flag
        }
    };
    let (from, to) = (
        size_in_bytes(types, input.source),
        size_in_bytes(types, input.target),
    );

    if source.is_integral() && target.is_integral() && from == to {
        return Some(RuleOutcome::annotated(
            Conversion::Identity,
            warn(ExprAnnotations::SIGNED_UNSIGNED_WARNING),
        ));
    }
    if !options.arithmetic_conversions {
        return None;
    }
    let narrowing = to < from || (!source.is_integral() && target.is_integral());
    let annotations = if narrowing {
        warn(ExprAnnotations::NARROWING_WARNING)
    } else {
        ExprAnnotations::empty()
    };
    Some(RuleOutcome::annotated(Conversion::ImplicitNumeric, annotations))
}

fn usual_source(_: &ConversionClassifier<'_>, input: &RuleInput) -> Option<RuleOutcome> {
    if input.source_class != TC::Usual {
        return None;
    }
    match input.target_class {
        TC::Decimal => Some(RuleOutcome::annotated(
            Conversion::Boxing,
            ExprAnnotations::SPECIAL_HANDLING,
        )),
        TC::Object | TC::Pointer { .. } => Some(RuleOutcome::plain(Conversion::Boxing)),
        TC::String => None,
        TC::Class | TC::Interface | TC::Array { .. } | TC::Delegate { .. }
            if input.target != TypeId::USUAL_ARRAY && input.target != TypeId::FORMAT_PROVIDER =>
        {
            Some(RuleOutcome::plain(Conversion::Boxing))
        }
        _ => None,
    }
}

fn object_bridging(classifier: &ConversionClassifier<'_>, input: &RuleInput) -> Option<RuleOutcome> {
    let options = classifier.options;
    let types = classifier.types;
    let (source, target) = (input.source_class, input.target_class);

    if source == TC::Object
        && target == TC::Usual
        && input
            .expr
            .is_some_and(|expr| classifier.exprs.is_legacy_cast_operand(expr))
    {
        return Some(RuleOutcome::plain(Conversion::Boxing));
    }
    if (options.late_binding || options.implicit_cast_and_conversion)
        && source == TC::Object
        && target != TC::Object
        && is_reference_type(types, input.target)
    {
        return Some(RuleOutcome::plain(Conversion::ImplicitReference));
    }
    if !options.implicit_cast_and_conversion {
        return None;
    }
    match (source, target) {
        (TC::Object, TC::Pointer { .. }) | (TC::Pointer { .. }, TC::Object) => {
            Some(RuleOutcome::plain(Conversion::Boxing))
        }
        (TC::Interface, TC::Class) => Some(RuleOutcome::plain(Conversion::ImplicitReference)),
        (TC::Class, TC::Class) if derives_from(types, input.target, input.source) => {
            Some(RuleOutcome::plain(Conversion::ImplicitReference))
        }
        _ => None,
    }
}

fn numeric_fallback(classifier: &ConversionClassifier<'_>, input: &RuleInput) -> Option<RuleOutcome> {
    if !input.source_class.is_integral() || !input.target_class.is_integral() {
        return None;
    }
    let types = classifier.types;
    let conditional = input
        .expr
        .is_some_and(|expr| classifier.exprs.is_conditional(expr));
    if conditional || size_in_bytes(types, input.source) < size_in_bytes(types, input.target) {
        return Some(RuleOutcome::plain(Conversion::ImplicitNumeric));
    }
    None
}
