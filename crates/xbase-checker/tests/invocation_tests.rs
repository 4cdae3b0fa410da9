//! End-to-end invocation and assignment binding through `CheckerState`.

use xbase_binder::{
    Accessibility, AssemblyId, AssemblyTable, ScopeArena, ScopeId, Symbol, SymbolArena, SymbolId,
    symbol_flags,
};
use xbase_checker::{CheckerContext, CheckerState, OverloadResolution};
use xbase_common::diagnostics::diagnostic_codes;
use xbase_common::{Dialect, DialectOptions, Pragma, Span};
use xbase_solver::{
    AnnotationTable, CallArgument, CandidateMember, Conversion, ExprAnnotations, ExprArena,
    RefKind, SignatureTable, TypeBuilder, TypeId, TypeTable,
};

const CALL_SPAN: Span = Span::new(20, 6);

/// Global namespace importing `Functions`, with a class `C` whose method
/// `Bar` is where calls are bound from.
struct World {
    types: TypeTable,
    symbols: SymbolArena,
    scopes: ScopeArena,
    assemblies: AssemblyTable,
    exprs: ExprArena,
    signatures: SignatureTable,
    options: DialectOptions,
    annotations: AnnotationTable,
    functions: SymbolId,
    class_c: SymbolId,
    global: ScopeId,
    method_scope: ScopeId,
}

impl World {
    fn new(options: DialectOptions) -> Self {
        let mut symbols = SymbolArena::new();
        let functions = symbols.alloc(Symbol::new(
            "Functions",
            symbol_flags::CLASS | symbol_flags::STATIC,
        ));
        let class_c = symbols.alloc(Symbol::new("C", symbol_flags::CLASS));
        let bar = symbols.declare_member(class_c, Symbol::new("Bar", symbol_flags::METHOD));

        let mut scopes = ScopeArena::new();
        let global = scopes.add_namespace(None, None);
        scopes.declare(global, "C", class_c);
        scopes.import_static(global, functions);
        let type_scope = scopes.add_type_scope(global, class_c);
        let method_scope = scopes.add_method_scope(type_scope, bar);

        Self {
            types: TypeTable::new(),
            symbols,
            scopes,
            assemblies: AssemblyTable::new("App"),
            exprs: ExprArena::new(),
            signatures: SignatureTable::new(),
            options,
            annotations: AnnotationTable::new(),
            functions,
            class_c,
            global,
            method_scope,
        }
    }

    fn vo() -> Self {
        Self::new(DialectOptions::for_dialect(Dialect::Vo))
    }

    fn declare(&mut self, container: SymbolId, name: &str, params: &[TypeId]) -> SymbolId {
        let symbol = self.symbols.declare_member(
            container,
            Symbol::new(name, symbol_flags::METHOD | symbol_flags::STATIC),
        );
        let container_name = self.symbols.name(container).to_string();
        let member = params.iter().fold(
            CandidateMember::method(symbol, name, &container_name).static_member(),
            |m, &t| m.param(t),
        );
        self.signatures.insert(member);
        symbol
    }

    fn function(&mut self, name: &str, params: &[TypeId]) -> SymbolId {
        self.declare(self.functions, name, params)
    }

    fn static_method(&mut self, name: &str, params: &[TypeId]) -> SymbolId {
        self.declare(self.class_c, name, params)
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
            "test.prg",
        ))
    }
}

fn args(types: &[TypeId]) -> Vec<CallArgument> {
    types.iter().map(|&t| CallArgument::of_type(t)).collect()
}

// =============================================================================
// Lookup and resolution
// =============================================================================

#[test]
fn test_free_function_beats_static_method() {
    let mut world = World::vo();
    let function = world.function("Foo", &[TypeId::INT32]);
    let _method = world.static_method("Foo", &[TypeId::INT32]);
    let mut checker = world.checker();

    let bound = checker.bind_invocation("Foo", world.method_scope, &args(&[TypeId::INT32]), CALL_SPAN);

    assert_eq!(bound.symbol, Some(function));
    assert_eq!(bound.conversions.as_slice(), &[Conversion::Identity]);
    assert!(checker.diagnostic_codes().is_empty());
}

#[test]
fn test_core_dialect_binds_static_method() {
    let mut world = World::new(DialectOptions::default());
    let _function = world.function("Foo", &[TypeId::INT32]);
    let method = world.static_method("Foo", &[TypeId::INT32]);
    let mut checker = world.checker();

    let bound = checker.bind_invocation("Foo", world.method_scope, &args(&[TypeId::INT32]), CALL_SPAN);

    assert_eq!(bound.symbol, Some(method));
}

#[test]
fn test_best_overload_by_conversion_rank() {
    let mut world = World::vo();
    let _wide = world.function("Str", &[TypeId::INT64]);
    let exact = world.function("Str", &[TypeId::INT32]);
    let mut checker = world.checker();

    let bound = checker.bind_invocation("Str", world.global, &args(&[TypeId::INT32]), CALL_SPAN);

    assert_eq!(bound.symbol, Some(exact));
    assert_eq!(
        bound.resolution,
        OverloadResolution::Success {
            index: 1,
            decided_by_tie_break: false,
            ambiguous: false,
        }
    );
}

#[test]
fn test_enum_argument_binds_enum_overload() {
    let mut world = World::vo();
    let color = world
        .types
        .register(TypeBuilder::enumeration("Color", TypeId::INT32));
    let _plain = world.function("Show", &[TypeId::INT32]);
    let with_enum = world.function("Show", &[color]);
    let mut checker = world.checker();

    let bound = checker.bind_invocation("Show", world.global, &args(&[color]), CALL_SPAN);

    assert_eq!(bound.symbol, Some(with_enum));
    assert!(!checker.ctx.has_errors());
}

#[test]
fn test_string_argument_prefers_string_parameter_over_usual() {
    let mut world = World::vo();
    let _usual = world.function("Trim", &[TypeId::USUAL]);
    let string = world.function("Trim", &[TypeId::STRING]);
    let mut checker = world.checker();

    let bound = checker.bind_invocation("Trim", world.global, &args(&[TypeId::STRING]), CALL_SPAN);

    assert_eq!(bound.symbol, Some(string));
}

#[test]
fn test_no_applicable_overload_is_reported() {
    let mut world = World::vo();
    world.function("Foo", &[TypeId::STRING]);
    let mut checker = world.checker();

    let bound = checker.bind_invocation("Foo", world.global, &args(&[TypeId::INT16]), CALL_SPAN);

    assert!(!bound.is_bound());
    assert_eq!(bound.resolution, OverloadResolution::NoApplicable);
    assert_eq!(
        checker.diagnostic_codes(),
        vec![diagnostic_codes::NO_APPLICABLE_OVERLOAD]
    );
    let diagnostic = checker.diagnostics().next().cloned().expect("one diagnostic");
    assert_eq!((diagnostic.start, diagnostic.length), (20, 6));
    assert!(diagnostic.message_text.contains("'Foo'"));
}

#[test]
fn test_ambiguous_call_recovers_with_first_candidate() {
    let mut world = World::vo();
    let first = world.function("Foo", &[TypeId::INT32]);
    let _second = world.function("Foo", &[TypeId::INT32]);
    let mut checker = world.checker();

    let bound = checker.bind_invocation("Foo", world.global, &args(&[TypeId::INT16]), CALL_SPAN);

    assert_eq!(bound.symbol, Some(first));
    assert_eq!(
        bound.resolution,
        OverloadResolution::Ambiguous { first: 0, second: 1 }
    );
    assert_eq!(checker.diagnostic_codes(), vec![diagnostic_codes::AMBIGUOUS_CALL]);
    let message = checker
        .diagnostics()
        .next()
        .map(|d| d.message_text.clone())
        .unwrap_or_default();
    assert!(message.contains("Functions.Foo(LONG)"), "{message}");
}

#[test]
fn test_unknown_name_stays_unbound_silently() {
    let world = World::vo();
    let mut checker = world.checker();

    let bound = checker.bind_invocation("Missing", world.global, &[], CALL_SPAN);

    assert!(!bound.is_bound());
    assert!(checker.diagnostic_codes().is_empty());
}

#[test]
fn test_inaccessible_method_is_reported() {
    let mut world = World::vo();
    let class_d = world.symbols.alloc(Symbol::new("D", symbol_flags::CLASS));
    let hidden = world.symbols.declare_member(
        class_d,
        Symbol::new("Hidden", symbol_flags::METHOD | symbol_flags::STATIC)
            .with_accessibility(Accessibility::Private),
    );
    world
        .signatures
        .insert(CandidateMember::method(hidden, "Hidden", "D").static_member());
    world.scopes.import_static(world.global, class_d);
    let mut checker = world.checker();

    let bound = checker.bind_invocation("Hidden", world.method_scope, &[], CALL_SPAN);

    assert!(!bound.is_bound());
    assert_eq!(
        checker.diagnostic_codes(),
        vec![diagnostic_codes::INACCESSIBLE_SYMBOL]
    );
}

#[test]
fn test_ambiguous_reference_is_reported() {
    let mut world = World::vo();
    let first = world.symbols.alloc(Symbol::new(
        "Handler",
        symbol_flags::LOCAL | symbol_flags::INVOCABLE_VALUE,
    ));
    let second = world.symbols.alloc(Symbol::new(
        "Handler",
        symbol_flags::LOCAL | symbol_flags::INVOCABLE_VALUE,
    ));
    world.scopes.declare(world.global, "Handler", first);
    world.scopes.declare(world.global, "Handler", second);
    let mut checker = world.checker();

    let bound = checker.bind_invocation("Handler", world.global, &[], CALL_SPAN);

    assert!(!bound.is_bound());
    assert_eq!(
        checker.diagnostic_codes(),
        vec![diagnostic_codes::AMBIGUOUS_REFERENCE]
    );
}

#[test]
fn test_same_function_in_two_assemblies_warns() {
    let mut world = World::vo();
    let first = world.assemblies.add_reference("First", false);
    let second = world.assemblies.add_reference("Second", false);
    let mut container_in = |assembly: AssemblyId| {
        let container = world.symbols.alloc(
            Symbol::new("Functions", symbol_flags::CLASS | symbol_flags::STATIC)
                .with_assembly(assembly),
        );
        world.scopes.import_static(world.global, container);
        let symbol = world.symbols.declare_member(
            container,
            Symbol::new("Left", symbol_flags::METHOD | symbol_flags::STATIC).with_assembly(assembly),
        );
        world.signatures.insert(
            CandidateMember::method(symbol, "Left", "Functions")
                .param(TypeId::USUAL)
                .static_member()
                .in_assembly(assembly),
        );
        symbol
    };
    let _from_second = container_in(second);
    let from_first = container_in(first);
    let mut checker = world.checker();

    let bound = checker.bind_invocation("Left", world.method_scope, &args(&[TypeId::USUAL]), CALL_SPAN);

    assert_eq!(bound.symbol, Some(from_first));
    assert!(matches!(
        bound.resolution,
        OverloadResolution::Success {
            decided_by_tie_break: true,
            ambiguous: true,
            ..
        }
    ));
    assert_eq!(
        checker.diagnostic_codes(),
        vec![diagnostic_codes::FUNCTION_CHOSEN_FROM_ASSEMBLY]
    );
    assert!(!checker.ctx.has_errors());
}

#[test]
fn test_plain_variable_binds_to_ref_parameter_in_vo() {
    let mut world = World::vo();
    let swap = world.symbols.declare_member(
        world.functions,
        Symbol::new("Swap", symbol_flags::METHOD | symbol_flags::STATIC),
    );
    world.signatures.insert(
        CandidateMember::method(swap, "Swap", "Functions")
            .ref_param(TypeId::INT32, RefKind::Ref)
            .static_member(),
    );
    let var = world.exprs.variable(TypeId::INT32);
    let mut checker = world.checker();

    let arg = CallArgument::from_expr(&world.exprs, var);
    let bound = checker.bind_invocation("Swap", world.global, &[arg], CALL_SPAN);

    assert_eq!(bound.symbol, Some(swap));
    assert_eq!(bound.conversions.as_slice(), &[Conversion::Identity]);
}

// =============================================================================
// Committed conversions
// =============================================================================

#[test]
fn test_signed_unsigned_argument_warns() {
    let mut world = World::new(
        DialectOptions::for_dialect(Dialect::Vo).with_pragma(Pragma::SignedUnsignedConversion, true),
    );
    let put = world.function("Put", &[TypeId::UINT16]);
    let value = world.exprs.variable(TypeId::INT16);
    let mut checker = world.checker();

    let arg = CallArgument::from_expr(&world.exprs, value);
    let bound = checker.bind_invocation("Put", world.global, &[arg], CALL_SPAN);

    assert_eq!(bound.symbol, Some(put));
    assert_eq!(bound.conversions.as_slice(), &[Conversion::Identity]);
    assert!(
        world
            .annotations
            .contains(value, ExprAnnotations::SIGNED_UNSIGNED_WARNING)
    );
    assert_eq!(
        checker.diagnostic_codes(),
        vec![diagnostic_codes::SIGNED_UNSIGNED_CONVERSION]
    );
    assert!(!checker.ctx.has_errors());
}

#[test]
fn test_narrowing_argument_warns_once_per_call() {
    let mut world = World::new(
        DialectOptions::for_dialect(Dialect::Vo).with_pragma(Pragma::ArithmeticConversions, true),
    );
    world.function("Put", &[TypeId::INT16]);
    let value = world.exprs.variable(TypeId::INT64);
    let mut checker = world.checker();

    let arg = CallArgument::from_expr(&world.exprs, value);
    checker.bind_invocation("Put", world.global, &[arg], CALL_SPAN);
    checker.bind_invocation("Put", world.global, &[arg], CALL_SPAN);

    assert_eq!(
        checker.diagnostic_codes(),
        vec![diagnostic_codes::NARROWING_CONVERSION]
    );
}

#[test]
fn test_assignment_without_conversion_is_an_error() {
    let mut world = World::new(DialectOptions::default());
    let value = world.exprs.variable(TypeId::INT16);
    let broken = world.exprs.variable(TypeId::ERROR);
    let mut checker = world.checker();

    assert_eq!(
        checker.bind_assignment(value, TypeId::STRING),
        Conversion::NoConversion
    );
    assert_eq!(
        checker.bind_assignment(broken, TypeId::STRING),
        Conversion::NoConversion
    );
    assert_eq!(
        checker.diagnostic_codes(),
        vec![diagnostic_codes::CANNOT_CONVERT_TYPE]
    );
    let diagnostics = checker.into_diagnostics();
    assert!(diagnostics[0].message_text.contains("'SHORT'"), "{}", diagnostics[0].message_text);
}

#[test]
fn test_signed_unsigned_assignment_warns_and_marks_assignment() {
    let mut world = World::new(
        DialectOptions::for_dialect(Dialect::Vo).with_pragma(Pragma::SignedUnsignedConversion, true),
    );
    let target = world.exprs.variable(TypeId::UINT16);
    let value = world.exprs.variable(TypeId::INT16);
    let assignment = world.exprs.assignment(target, value);
    let mut checker = world.checker();

    assert_eq!(
        checker.bind_assignment(value, TypeId::UINT16),
        Conversion::Identity
    );
    assert_eq!(
        checker.diagnostic_codes(),
        vec![diagnostic_codes::SIGNED_UNSIGNED_CONVERSION]
    );
    assert!(
        world
            .annotations
            .contains(assignment, ExprAnnotations::SIGNED_UNSIGNED_WARNING)
    );
}
