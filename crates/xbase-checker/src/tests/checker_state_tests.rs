use crate::context::CheckerContext;
use crate::state::CheckerState;
use xbase_binder::{AssemblyTable, ScopeArena, SymbolArena, SymbolId};
use xbase_common::{DialectOptions, Span};
use xbase_solver::{
    AnnotationTable, CandidateMember, ExprAnnotations, ExprArena, ExprKind, RefKind,
    SignatureTable, TypeId, TypeTable,
};

struct Tables {
    types: TypeTable,
    symbols: SymbolArena,
    scopes: ScopeArena,
    assemblies: AssemblyTable,
    exprs: ExprArena,
    signatures: SignatureTable,
    options: DialectOptions,
    annotations: AnnotationTable,
}

impl Tables {
    fn new() -> Self {
        Self {
            types: TypeTable::new(),
            symbols: SymbolArena::new(),
            scopes: ScopeArena::new(),
            assemblies: AssemblyTable::new("App"),
            exprs: ExprArena::new(),
            signatures: SignatureTable::new(),
            options: DialectOptions::default(),
            annotations: AnnotationTable::new(),
        }
    }

    fn checker(&self) -> CheckerState<'_> {
        CheckerState::new(CheckerContext::new(
            &self.types,
            &self.symbols,
            &self.scopes,
            &self.assemblies,
            &self.exprs,
            &self.signatures,
            &self.options,
            &self.annotations,
            "unit.prg",
        ))
    }
}

#[test]
fn test_signature_text_marks_by_reference_parameters() {
    let tables = Tables::new();
    let checker = tables.checker();
    let member = CandidateMember::method(SymbolId(0), "Read", "Stream")
        .param(TypeId::STRING)
        .ref_param(TypeId::INT32, RefKind::Out);
    assert_eq!(checker.signature_text(&member), "Stream.Read(STRING, OUT LONG)");
    let empty = CandidateMember::method(SymbolId(1), "Close", "Stream");
    assert_eq!(checker.signature_text(&empty), "Stream.Close()");
}

#[test]
fn test_warnings_use_expression_span_when_known() {
    let mut tables = Tables::new();
    let located = tables.exprs.add(
        ExprKind::Variable { symbol: None },
        TypeId::INT64,
        Span::new(40, 3),
    );
    let synthetic = tables.exprs.variable(TypeId::INT64);
    tables
        .annotations
        .set(located, ExprAnnotations::NARROWING_WARNING);
    tables
        .annotations
        .set(synthetic, ExprAnnotations::NARROWING_WARNING | ExprAnnotations::SIGNED_UNSIGNED_WARNING);
    let mut checker = tables.checker();

    checker.report_conversion_warnings(located, TypeId::INT64, TypeId::INT16, Span::new(1, 1));
    checker.report_conversion_warnings(synthetic, TypeId::INT64, TypeId::INT16, Span::new(7, 2));

    let spans: Vec<(u32, u32, u32)> = checker
        .diagnostics()
        .map(|d| (d.code, d.start, d.length))
        .collect();
    assert_eq!(spans, vec![(9021, 40, 3), (9020, 7, 2), (9021, 7, 2)]);
    assert!(!checker.ctx.has_errors());
}

#[test]
fn test_special_handling_alone_is_not_a_warning() {
    let mut tables = Tables::new();
    let expr = tables.exprs.variable(TypeId::USUAL);
    tables.annotations.set(expr, ExprAnnotations::SPECIAL_HANDLING);
    let mut checker = tables.checker();

    checker.report_conversion_warnings(expr, TypeId::USUAL, TypeId::DECIMAL, Span::DUMMY);

    assert!(checker.diagnostic_codes().is_empty());
    assert!(checker.into_diagnostics().is_empty());
}
