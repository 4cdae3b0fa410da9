//! Conversion classification.
//!
//! `ConversionClassifier` answers "how does a value of type S (optionally the
//! bound expression E) convert to type T" under the active dialect options.
//!
//! Classification is layered:
//!
//! 1. Lambdas go through the anonymous-function override.
//! 2. Identical types are `Identity`.
//! 3. For dialects with the legacy runtime, the ordered rule table in
//!    [`rules`] is evaluated first-match-wins.
//! 4. Everything else is delegated to a [`StandardConversions`]
//!    implementation (by default [`CoreConversions`]).
//!
//! Rules never write to the annotation table themselves; they return the
//! annotations they want and the classifier commits them only in
//! [`ConversionMode::Commit`]. A probe and a commit of the same query return
//! the same `Conversion`.

mod boxing;
mod lambda;
mod legacy_cast;
mod rules;
mod standard;
mod widening;

pub use standard::{CoreConversions, StandardConversions};
pub use widening::{largest_operand_type, natural_literal_type};

use tracing::trace;
use xbase_binder::SymbolId;
use xbase_common::DialectOptions;

use crate::annotations::{AnnotationTable, ExprAnnotations};
use crate::expr::{ExprArena, ExprIndex, ExprKind};
use crate::type_classifier::{TypeClassification, classify_type};
use crate::types::{TypeId, TypeTable};

// =============================================================================
// Results
// =============================================================================

/// How a conversion is performed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Conversion {
    NoConversion,
    Identity,
    ImplicitNumeric,
    Boxing,
    IntegerToPointer,
    ImplicitReference,
    UserDefined(SymbolId),
}

impl Conversion {
    #[inline]
    pub const fn exists(self) -> bool {
        !matches!(self, Conversion::NoConversion)
    }

    /// Betterness rank used by overload resolution; lower is better.
    pub const fn rank(self) -> u8 {
        match self {
            Conversion::Identity => 0,
            Conversion::ImplicitNumeric | Conversion::ImplicitReference => 1,
            Conversion::IntegerToPointer => 2,
            Conversion::Boxing => 3,
            Conversion::UserDefined(_) => 4,
            Conversion::NoConversion => u8::MAX,
        }
    }
}

/// Whether classification may write annotations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConversionMode {
    /// Compute only; used while probing overload candidates.
    Probe,
    /// Compute and record annotations for the source expression.
    Commit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConversionQuery {
    /// Bound source expression, when classifying an expression rather than a
    /// bare type.
    pub expr: Option<ExprIndex>,
    pub source: TypeId,
    pub target: TypeId,
}

impl ConversionQuery {
    pub const fn types(source: TypeId, target: TypeId) -> Self {
        Self {
            expr: None,
            source,
            target,
        }
    }

    /// Query for `expr` with its static type as the source.
    pub fn expr(exprs: &ExprArena, expr: ExprIndex, target: TypeId) -> Self {
        Self {
            expr: Some(expr),
            source: exprs.type_of(expr),
            target,
        }
    }
}

/// What a matching rule decided.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RuleOutcome {
    pub conversion: Conversion,
    pub annotations: ExprAnnotations,
}

impl RuleOutcome {
    pub const fn plain(conversion: Conversion) -> Self {
        Self {
            conversion,
            annotations: ExprAnnotations::empty(),
        }
    }

    pub const fn annotated(conversion: Conversion, annotations: ExprAnnotations) -> Self {
        Self {
            conversion,
            annotations,
        }
    }
}

/// A conversion together with the annotations a commit would record.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    pub conversion: Conversion,
    pub annotations: ExprAnnotations,
    /// Name of the rule that decided.
    pub rule: &'static str,
}

/// Classified query passed to each rule.
pub(crate) struct RuleInput {
    pub expr: Option<ExprIndex>,
    pub source: TypeId,
    pub target: TypeId,
    pub source_class: TypeClassification,
    pub target_class: TypeClassification,
}

// =============================================================================
// ConversionClassifier
// =============================================================================

pub struct ConversionClassifier<'a> {
    pub(crate) types: &'a TypeTable,
    pub(crate) exprs: &'a ExprArena,
    pub(crate) options: &'a DialectOptions,
    annotations: &'a AnnotationTable,
    pub(crate) standard: &'a dyn StandardConversions,
}

impl<'a> ConversionClassifier<'a> {
    pub fn new(
        types: &'a TypeTable,
        exprs: &'a ExprArena,
        options: &'a DialectOptions,
        annotations: &'a AnnotationTable,
    ) -> Self {
        Self {
            types,
            exprs,
            options,
            annotations,
            standard: &CoreConversions,
        }
    }

    /// Replace the standard (core-language) conversion rules.
    #[must_use]
    pub fn with_standard(mut self, standard: &'a dyn StandardConversions) -> Self {
        self.standard = standard;
        self
    }

    pub fn options(&self) -> &'a DialectOptions {
        self.options
    }

    /// Classify an implicit conversion.
    pub fn classify_implicit(&self, query: ConversionQuery, mode: ConversionMode) -> Conversion {
        let classification = self.classify_with_annotations(query);
        if mode == ConversionMode::Commit {
            self.commit(query.expr, classification.annotations);
        }
        classification.conversion
    }

    /// Classify an explicit conversion: the implicit rules, then boxing and
    /// unboxing, then the standard explicit rules.
    pub fn classify_explicit(&self, query: ConversionQuery, mode: ConversionMode) -> Conversion {
        let classification = self.classify_with_annotations(query);
        if classification.conversion.exists() {
            if mode == ConversionMode::Commit {
                self.commit(query.expr, classification.annotations);
            }
            return classification.conversion;
        }
        if self.options.vo_rules() && self.has_boxing_conversion(query.source, query.target) {
            trace!(
                source = %self.types.name(query.source),
                target = %self.types.name(query.target),
                "explicit conversion by boxing"
            );
            return Conversion::Boxing;
        }
        self.standard
            .classify_explicit(self.types, query.source, query.target)
    }

    /// Classify without committing and report the pending annotations.
    pub fn classify_with_annotations(&self, query: ConversionQuery) -> Classification {
        if let Some(expr) = query.expr
            && matches!(self.exprs.kind(expr), Some(ExprKind::Lambda { .. }))
        {
            return Classification {
                conversion: self.classify_anonymous_function(expr, query.target),
                annotations: ExprAnnotations::empty(),
                rule: "anonymous-function",
            };
        }

        if query.source == query.target {
            return Classification {
                conversion: Conversion::Identity,
                annotations: ExprAnnotations::empty(),
                rule: "identity",
            };
        }

        if self.options.vo_rules() {
            let input = RuleInput {
                expr: query.expr,
                source: query.source,
                target: query.target,
                source_class: classify_type(self.types, query.source),
                target_class: classify_type(self.types, query.target),
            };
            for &(name, rule) in rules::IMPLICIT_RULES {
                if let Some(outcome) = rule(self, &input) {
                    trace!(
                        rule = name,
                        source = %self.types.name(query.source),
                        target = %self.types.name(query.target),
                        conversion = ?outcome.conversion,
                        "conversion rule matched"
                    );
                    return Classification {
                        conversion: outcome.conversion,
                        annotations: outcome.annotations,
                        rule: name,
                    };
                }
            }
        }

        Classification {
            conversion: self
                .standard
                .classify_implicit(self.types, query.source, query.target),
            annotations: ExprAnnotations::empty(),
            rule: "standard",
        }
    }

    /// Record annotations for `expr`; warning flags also go to the enclosing
    /// assignment.
    fn commit(&self, expr: Option<ExprIndex>, annotations: ExprAnnotations) {
        let Some(expr) = expr else {
            return;
        };
        if annotations.is_empty() {
            return;
        }
        self.annotations.set(expr, annotations);
        let warnings = annotations & ExprAnnotations::WARNINGS;
        if !warnings.is_empty()
            && let Some(assignment) = self.exprs.enclosing_assignment(expr)
        {
            self.annotations.set(assignment, warnings);
        }
    }
}

#[cfg(test)]
#[path = "../tests/conversion_rule_tests.rs"]
mod tests;
