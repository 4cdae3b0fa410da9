//! Dialect-aware name lookup.
//!
//! Lookup runs in up to three passes over the scope chain:
//!
//! 1. **Function pre-pass** (when `prefer_functions_outside_class_scope` is
//!    on): the first namespace-level scope that yields invocable members
//!    supplies the candidate free functions, i.e. static methods of
//!    `*Functions` containers.
//! 2. **Regular walk**: innermost to outermost, merging outer results into
//!    the result of the binding scope until it is viable.
//! 3. **Reconciliation**: free functions replace a same-sized, disjoint set of
//!    methods, or shadow the static methods of other containers found next
//!    to them; otherwise a function-vs-method warning is reported.
//!
//! Lookup never mutates the arenas. Diagnostics go to the caller's
//! `DiagnosticBag`, which de-duplicates, so a retry with `DIAGNOSE` is safe.

use bitflags::bitflags;
use smallvec::SmallVec;
use tracing::{debug, trace};
use xbase_common::diagnostics::diagnostic_codes;
use xbase_common::{Diagnostic, DiagnosticBag, DialectOptions, Span};

use crate::lookup_result::{LookupResult, LookupResultKind};
use crate::scopes::{ScopeArena, ScopeId, ScopeKind};
use crate::symbols::{Accessibility, Symbol, SymbolArena, SymbolId, symbol_flags};

/// Name suffix of the synthesized containers hosting free functions.
pub const FUNCTIONS_CONTAINER_SUFFIX: &str = "Functions";

bitflags! {
    /// Filters applied by a lookup.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct LookupOptions: u32 {
        const MUST_BE_INVOCABLE = 1 << 0;
        const MUST_BE_INSTANCE = 1 << 1;
        const MUST_NOT_BE_INSTANCE = 1 << 2;
        const MUST_NOT_BE_METHOD = 1 << 3;
        const NAMESPACES_OR_TYPES_ONLY = 1 << 4;
        /// Report diagnostics to the sink.
        const DIAGNOSE = 1 << 5;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupOutcome {
    pub result: LookupResult,
    /// Innermost scope that produced a non-empty result.
    pub binding_scope: Option<ScopeId>,
}

/// Lookup resolver over frozen symbol and scope arenas.
pub struct SymbolLookup<'a> {
    symbols: &'a SymbolArena,
    scopes: &'a ScopeArena,
    options: &'a DialectOptions,
    file: &'a str,
}

impl<'a> SymbolLookup<'a> {
    pub fn new(
        symbols: &'a SymbolArena,
        scopes: &'a ScopeArena,
        options: &'a DialectOptions,
        file: &'a str,
    ) -> Self {
        Self {
            symbols,
            scopes,
            options,
            file,
        }
    }

    /// Resolve `name` with generic `arity` from `scope`.
    pub fn lookup(
        &self,
        name: &str,
        arity: u32,
        scope: ScopeId,
        options: LookupOptions,
        span: Span,
        sink: &mut DiagnosticBag,
    ) -> LookupOutcome {
        let chain = self.scopes.chain(scope);
        let function_results = self.collect_function_results(name, arity, scope, &chain, options);

        let mut result = LookupResult::empty();
        let mut binding_scope = None;
        for &scope_id in &chain {
            let local = self.lookup_in_scope(scope_id, name, arity, options, scope);
            if local.is_empty() {
                continue;
            }
            if binding_scope.is_none() {
                binding_scope = Some(scope_id);
            }
            result.merge_equal(self.symbols, local);
            // An ambiguity keeps walking so outer ambiguous symbols join it.
            if result.is_multi_viable() {
                break;
            }
        }
        trace!(
            name,
            kind = ?result.kind,
            count = result.symbols.len(),
            functions = function_results.len(),
            "lookup: scope walk finished"
        );

        if !function_results.is_empty() {
            self.reconcile_functions(name, &mut result, function_results, options, span, sink);
        }

        if options.contains(LookupOptions::DIAGNOSE) {
            self.report_inaccessible_field(&result, span, sink);
        }

        result.validate();
        LookupOutcome {
            result,
            binding_scope,
        }
    }

    // =========================================================================
    // Function pre-pass
    // =========================================================================

    fn collect_function_results(
        &self,
        name: &str,
        arity: u32,
        origin: ScopeId,
        chain: &[ScopeId],
        options: LookupOptions,
    ) -> SmallVec<[SymbolId; 4]> {
        let mut functions = SmallVec::new();
        if !self.options.prefer_functions_outside_class_scope
            || options.intersects(LookupOptions::MUST_BE_INSTANCE | LookupOptions::MUST_NOT_BE_METHOD)
        {
            return functions;
        }

        let invocable = options | LookupOptions::MUST_BE_INVOCABLE;
        for &scope_id in chain {
            let Some(scope) = self.scopes.get(scope_id) else {
                continue;
            };
            if !scope.is_outside_type() {
                continue;
            }
            let found = self.lookup_in_scope(scope_id, name, arity, invocable, origin);
            if found.is_empty() {
                continue;
            }
            if found.kind != LookupResultKind::Inaccessible {
                functions.extend(
                    found
                        .symbols
                        .iter()
                        .copied()
                        .filter(|&id| self.is_free_function(id)),
                );
            }
            break;
        }
        functions
    }

    /// Static method declared in a `*Functions` container.
    fn is_free_function(&self, id: SymbolId) -> bool {
        let Some(symbol) = self.symbols.get(id) else {
            return false;
        };
        symbol.is_method()
            && symbol.is_static()
            && self
                .symbols
                .container_name(id)
                .is_some_and(is_functions_container)
    }

    fn is_static_method(&self, id: SymbolId) -> bool {
        self.symbols
            .get(id)
            .is_some_and(|symbol| symbol.is_method() && symbol.is_static())
    }

    fn reconcile_functions(
        &self,
        name: &str,
        result: &mut LookupResult,
        functions: SmallVec<[SymbolId; 4]>,
        options: LookupOptions,
        span: Span,
        sink: &mut DiagnosticBag,
    ) {
        let overlaps = functions.iter().any(|&f| result.contains(f));
        // The pre-pass flag is not consulted again here: equal counts with no
        // overlap swap whenever the dialect prefers free functions.
        if functions.len() == result.symbols.len()
            && !overlaps
            && self.options.dialect.prefers_free_functions()
        {
            debug!(name, count = functions.len(), "lookup: free functions replace methods");
            result.replace_with(self.symbols, functions);
            return;
        }
        // Free functions and static methods of other imported containers
        // reached in the same walk: the functions win.
        if self.options.dialect.prefers_free_functions()
            && result.symbols.len() > functions.len()
            && functions.iter().all(|&f| result.contains(f))
            && result
                .symbols
                .iter()
                .all(|&id| functions.contains(&id) || self.is_static_method(id))
        {
            debug!(
                name,
                dropped = result.symbols.len() - functions.len(),
                "lookup: free functions shadow imported static methods"
            );
            result.replace_with(self.symbols, functions);
            return;
        }

        if !options.contains(LookupOptions::DIAGNOSE) {
            return;
        }
        for &function in &functions {
            if result.contains(function)
                || !self.symbols.get(function).is_some_and(Symbol::is_method)
            {
                continue;
            }
            for &member in &result.symbols {
                if !self.symbols.get(member).is_some_and(Symbol::is_method) {
                    continue;
                }
                let function_name = self.symbols.qualified_name(function);
                let member_name = self.symbols.qualified_name(member);
                sink.push(Diagnostic::from_code(
                    self.file,
                    span,
                    diagnostic_codes::AMBIGUOUS_FUNCTION_AND_METHOD,
                    &[name, &function_name, &member_name],
                ));
            }
        }
    }

    fn report_inaccessible_field(&self, result: &LookupResult, span: Span, sink: &mut DiagnosticBag) {
        if result.kind != LookupResultKind::Inaccessible {
            return;
        }
        let [symbol_id] = result.symbols.as_slice() else {
            return;
        };
        let Some(symbol) = self.symbols.get(*symbol_id) else {
            return;
        };
        if !symbol.is_field() {
            return;
        }
        let qualified = self.symbols.qualified_name(*symbol_id);
        let diagnostic = Diagnostic::from_code(
            self.file,
            span,
            diagnostic_codes::INACCESSIBLE_SYMBOL,
            &[&qualified, symbol.accessibility.as_str()],
        )
        .with_related(self.file, symbol.span, format!("'{qualified}' is declared here."));
        sink.push(diagnostic);
    }

    // =========================================================================
    // Single-scope lookup
    // =========================================================================

    fn lookup_in_scope(
        &self,
        scope_id: ScopeId,
        name: &str,
        arity: u32,
        options: LookupOptions,
        origin: ScopeId,
    ) -> LookupResult {
        let Some(scope) = self.scopes.get(scope_id) else {
            return LookupResult::empty();
        };

        let mut found: SmallVec<[SymbolId; 8]> = SmallVec::new();
        found.extend_from_slice(scope.locals_named(name));
        match scope.kind {
            ScopeKind::Block | ScopeKind::Method => {}
            ScopeKind::Type => {
                if let Some(type_symbol) = scope.container {
                    self.collect_type_members(type_symbol, name, &mut found);
                }
            }
            ScopeKind::Namespace => {
                if let Some(namespace) = scope.container
                    && let Some(symbol) = self.symbols.get(namespace)
                {
                    found.extend_from_slice(symbol.members_named(name));
                }
                for &container in scope.imports() {
                    let Some(symbol) = self.symbols.get(container) else {
                        continue;
                    };
                    found.extend(symbol.members_named(name).iter().copied().filter(|&id| {
                        self.symbols.get(id).is_some_and(|member| member.is_static() || member.is_type())
                    }));
                }
            }
        }

        let mut viable = SmallVec::new();
        let mut inaccessible = SmallVec::new();
        for id in found {
            if viable.contains(&id) || inaccessible.contains(&id) {
                continue;
            }
            let Some(symbol) = self.symbols.get(id) else {
                continue;
            };
            if !self.options.names_equal(&symbol.name, name)
                || !matches_options(symbol, arity, options)
            {
                continue;
            }
            if self.is_accessible(symbol, origin) {
                viable.push(id);
            } else {
                inaccessible.push(id);
            }
        }
        LookupResult::from_candidates(self.symbols, viable, inaccessible)
    }

    /// Members of a type and its bases. Method groups continue into the base
    /// chain; any other member hides the bases.
    fn collect_type_members(&self, type_symbol: SymbolId, name: &str, found: &mut SmallVec<[SymbolId; 8]>) {
        let mut current = Some(type_symbol);
        let mut depth = 0;
        while let Some(id) = current {
            depth += 1;
            if depth > xbase_common::limits::MAX_BASE_TYPE_DEPTH {
                break;
            }
            let Some(symbol) = self.symbols.get(id) else {
                break;
            };
            let members = symbol.members_named(name);
            found.extend_from_slice(members);
            let hides_bases = members
                .iter()
                .any(|&m| self.symbols.get(m).is_some_and(|member| !member.is_method()));
            if hides_bases {
                break;
            }
            current = symbol.base;
        }
    }

    fn is_accessible(&self, symbol: &Symbol, origin: ScopeId) -> bool {
        match symbol.accessibility {
            Accessibility::Public => true,
            Accessibility::Internal => symbol.assembly.is_current(),
            Accessibility::Private => match symbol.parent {
                Some(parent) if self.is_type_symbol(parent) => {
                    self.scopes.enclosing_types(origin).contains(&parent)
                }
                _ => symbol.assembly.is_current(),
            },
            Accessibility::Protected => match symbol.parent {
                Some(parent) if self.is_type_symbol(parent) => self
                    .scopes
                    .enclosing_types(origin)
                    .iter()
                    .any(|&enclosing| self.symbols.derives_from(enclosing, parent)),
                _ => symbol.assembly.is_current(),
            },
        }
    }

    fn is_type_symbol(&self, id: SymbolId) -> bool {
        self.symbols.get(id).is_some_and(Symbol::is_type)
    }
}

fn matches_options(symbol: &Symbol, arity: u32, options: LookupOptions) -> bool {
    if options.contains(LookupOptions::NAMESPACES_OR_TYPES_ONLY)
        && !symbol.has_flags(symbol_flags::NAMESPACE_OR_TYPE)
    {
        return false;
    }
    if options.contains(LookupOptions::MUST_BE_INVOCABLE) && !symbol.is_invocable() {
        return false;
    }
    if options.contains(LookupOptions::MUST_BE_INSTANCE) && !symbol.is_instance_member() {
        return false;
    }
    if options.contains(LookupOptions::MUST_NOT_BE_INSTANCE) && symbol.is_instance_member() {
        return false;
    }
    if options.contains(LookupOptions::MUST_NOT_BE_METHOD) && symbol.is_method() {
        return false;
    }
    // Generic methods stay candidates for non-generic call syntax (inference).
    if symbol.is_method() {
        arity == 0 || symbol.arity == arity
    } else {
        symbol.arity == arity
    }
}

/// Whether `container` names a free-function container (`*Functions`).
pub fn is_functions_container(container: &str) -> bool {
    let suffix_len = FUNCTIONS_CONTAINER_SUFFIX.len();
    container.len() >= suffix_len
        && container
            .get(container.len() - suffix_len..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(FUNCTIONS_CONTAINER_SUFFIX))
}

#[cfg(test)]
#[path = "tests/lookup_unit_tests.rs"]
mod tests;
