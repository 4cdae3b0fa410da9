//! Error reporting (`report_*` build a diagnostic from the message table and
//! push it to the context's bag).

use xbase_binder::{LookupDiagnostic, LookupResult};
use xbase_common::diagnostics::diagnostic_codes;
use xbase_common::{Diagnostic, Span};
use xbase_solver::{CandidateMember, ExprAnnotations, ExprIndex, RefKind, TypeId};

use crate::state::CheckerState;

impl<'a> CheckerState<'a> {
    // =========================================================================
    // Lookup
    // =========================================================================

    /// Report error 104: `name` binds to unrelated symbols.
    pub(crate) fn report_ambiguous_reference(&mut self, name: &str, result: &LookupResult, span: Span) {
        let pair = match result.diagnostic {
            Some(LookupDiagnostic::Ambiguous { first, second }) => Some((first, second)),
            _ => match result.symbols.as_slice() {
                [first, second, ..] => Some((*first, *second)),
                _ => None,
            },
        };
        let Some((first, second)) = pair else {
            return;
        };
        let symbols = self.ctx.symbols;
        let diagnostic = Diagnostic::from_code(
            self.ctx.file,
            span,
            diagnostic_codes::AMBIGUOUS_REFERENCE,
            &[
                name,
                &symbols.qualified_name(first),
                &symbols.qualified_name(second),
            ],
        );
        self.ctx.diagnostics.push(diagnostic);
    }

    /// Report error 122 for the first inaccessible symbol. Lookup reports
    /// fields the same way, so the bag keeps a single copy.
    pub(crate) fn report_inaccessible_symbol(&mut self, result: &LookupResult, span: Span) {
        let symbol_id = match result.diagnostic {
            Some(LookupDiagnostic::Inaccessible { symbol }) => symbol,
            _ => match result.symbols.first() {
                Some(&symbol) => symbol,
                None => return,
            },
        };
        let symbols = self.ctx.symbols;
        let Some(symbol) = symbols.get(symbol_id) else {
            return;
        };
        let qualified = symbols.qualified_name(symbol_id);
        let diagnostic = Diagnostic::from_code(
            self.ctx.file,
            span,
            diagnostic_codes::INACCESSIBLE_SYMBOL,
            &[&qualified, symbol.accessibility.as_str()],
        )
        .with_related(self.ctx.file, symbol.span, format!("'{qualified}' is declared here."));
        self.ctx.diagnostics.push(diagnostic);
    }

    // =========================================================================
    // Overload resolution
    // =========================================================================

    pub(crate) fn report_ambiguous_call(&mut self, first: &CandidateMember, second: &CandidateMember, span: Span) {
        let diagnostic = Diagnostic::from_code(
            self.ctx.file,
            span,
            diagnostic_codes::AMBIGUOUS_CALL,
            &[&self.signature_text(first), &self.signature_text(second)],
        );
        self.ctx.diagnostics.push(diagnostic);
    }

    pub(crate) fn report_no_applicable_overload(&mut self, name: &str, span: Span) {
        let diagnostic = Diagnostic::from_code(
            self.ctx.file,
            span,
            diagnostic_codes::NO_APPLICABLE_OVERLOAD,
            &[name],
        );
        self.ctx.diagnostics.push(diagnostic);
    }

    /// Warning 9044: the tie-breaker chose between same-named functions from
    /// different assemblies.
    pub(crate) fn report_function_chosen(&mut self, member: &CandidateMember, span: Span) {
        let assembly = self.ctx.assemblies.name(member.assembly);
        let diagnostic = Diagnostic::from_code(
            self.ctx.file,
            span,
            diagnostic_codes::FUNCTION_CHOSEN_FROM_ASSEMBLY,
            &[&member.name, assembly],
        );
        self.ctx.diagnostics.push(diagnostic);
    }

    // =========================================================================
    // Conversions
    // =========================================================================

    pub(crate) fn report_cannot_convert(&mut self, source: TypeId, target: TypeId, span: Span) {
        let diagnostic = Diagnostic::from_code(
            self.ctx.file,
            span,
            diagnostic_codes::CANNOT_CONVERT_TYPE,
            &[self.ctx.type_name(source), self.ctx.type_name(target)],
        );
        self.ctx.diagnostics.push(diagnostic);
    }

    /// Turn the committed warning annotations of `expr` into warnings 9020
    /// and 9021.
    pub(crate) fn report_conversion_warnings(
        &mut self,
        expr: ExprIndex,
        source: TypeId,
        target: TypeId,
        fallback: Span,
    ) {
        let annotations = self.ctx.annotations.get(expr);
        if !annotations.intersects(ExprAnnotations::WARNINGS) {
            return;
        }
        let span = match self.expr_span(expr) {
            span if span.is_dummy() => fallback,
            span => span,
        };
        let (source_name, target_name) = (self.ctx.type_name(source), self.ctx.type_name(target));
        for (flag, code) in [
            (
                ExprAnnotations::SIGNED_UNSIGNED_WARNING,
                diagnostic_codes::SIGNED_UNSIGNED_CONVERSION,
            ),
            (
                ExprAnnotations::NARROWING_WARNING,
                diagnostic_codes::NARROWING_CONVERSION,
            ),
        ] {
            if annotations.contains(flag) {
                let diagnostic =
                    Diagnostic::from_code(self.ctx.file, span, code, &[source_name, target_name]);
                self.ctx.diagnostics.push(diagnostic);
            }
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    pub(crate) fn expr_span(&self, expr: ExprIndex) -> Span {
        self.ctx
            .exprs
            .get(expr)
            .map_or(Span::DUMMY, |node| node.span)
    }

    /// `Container.Name(T1, REF T2)` for messages.
    pub(crate) fn signature_text(&self, member: &CandidateMember) -> String {
        let params: Vec<String> = member
            .params
            .iter()
            .map(|param| {
                let name = self.ctx.type_name(param.type_id);
                match param.ref_kind {
                    RefKind::None => name.to_string(),
                    RefKind::Ref => format!("REF {name}"),
                    RefKind::Out => format!("OUT {name}"),
                    RefKind::In => format!("IN {name}"),
                }
            })
            .collect();
        format!("{}.{}({})", member.container, member.name, params.join(", "))
    }
}
