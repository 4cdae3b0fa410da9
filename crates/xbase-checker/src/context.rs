//! Shared binding state for one compilation unit.
//!
//! `CheckerContext` owns the diagnostics of the unit and borrows everything
//! else. The borrowed tables are frozen before binding starts, so several
//! contexts over the same tables may bind on different threads; the
//! annotation side-table is the only shared structure written to.

use xbase_binder::{AssemblyTable, ScopeArena, SymbolArena, SymbolLookup};
use xbase_common::{Diagnostic, DiagnosticBag, DialectOptions};
use xbase_solver::{
    AnnotationTable, ConversionClassifier, ExprArena, SignatureTable, TieBreakContext, TieBreaker,
    TypeId, TypeTable,
};

use crate::overload::OverloadResolver;

pub struct CheckerContext<'a> {
    pub types: &'a TypeTable,
    pub symbols: &'a SymbolArena,
    pub scopes: &'a ScopeArena,
    pub assemblies: &'a AssemblyTable,
    pub exprs: &'a ExprArena,
    pub signatures: &'a SignatureTable,
    pub options: &'a DialectOptions,
    pub annotations: &'a AnnotationTable,
    /// File name stamped on every diagnostic.
    pub file: &'a str,
    pub diagnostics: DiagnosticBag,
}

impl<'a> CheckerContext<'a> {
    pub fn new(
        types: &'a TypeTable,
        symbols: &'a SymbolArena,
        scopes: &'a ScopeArena,
        assemblies: &'a AssemblyTable,
        exprs: &'a ExprArena,
        signatures: &'a SignatureTable,
        options: &'a DialectOptions,
        annotations: &'a AnnotationTable,
        file: &'a str,
    ) -> Self {
        Self {
            types,
            symbols,
            scopes,
            assemblies,
            exprs,
            signatures,
            options,
            annotations,
            file,
            diagnostics: DiagnosticBag::new(),
        }
    }

    // =========================================================================
    // Solver and binder handles
    // =========================================================================

    pub fn lookup(&self) -> SymbolLookup<'a> {
        SymbolLookup::new(self.symbols, self.scopes, self.options, self.file)
    }

    pub fn classifier(&self) -> ConversionClassifier<'a> {
        ConversionClassifier::new(self.types, self.exprs, self.options, self.annotations)
    }

    pub fn tie_breaker(&self) -> TieBreaker<'a> {
        TieBreaker::new(TieBreakContext {
            types: self.types,
            exprs: self.exprs,
            options: self.options,
            assemblies: self.assemblies,
        })
    }

    pub fn overload_resolver(&self) -> OverloadResolver<'a> {
        OverloadResolver::new(self.types, self.classifier(), self.tie_breaker())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn type_name(&self, id: TypeId) -> &'a str {
        self.types.name(id)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// Hand the collected diagnostics to the caller.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics).into_vec()
    }
}
