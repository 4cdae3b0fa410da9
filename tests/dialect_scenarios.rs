//! Cross-crate scenarios: the same call or conversion bound under different
//! dialects through the `xbase` facade.

use xbase::binder::{ScopeArena, ScopeId, Symbol, SymbolArena, SymbolId, symbol_flags};
use xbase::common::diagnostics::diagnostic_codes;
use xbase::solver::{
    AnnotationTable, BinaryOp, CallArgument, CandidateMember, ConstantValue, ConversionQuery,
    ExprArena, SignatureTable, TieBreakContext,
};
use xbase::{
    BetterResult, CheckerContext, CheckerState, Conversion, ConversionClassifier, ConversionMode,
    Dialect, DialectOptions, LookupOptions, Pragma, Span, SymbolLookup, TieBreaker, TypeId,
    TypeTable, tracing_config,
};

/// A program with a `Functions` container and a class `Form` whose method
/// `Init` is the call site.
struct Program {
    types: TypeTable,
    symbols: SymbolArena,
    scopes: ScopeArena,
    assemblies: xbase::binder::AssemblyTable,
    exprs: ExprArena,
    signatures: SignatureTable,
    annotations: AnnotationTable,
    functions: SymbolId,
    form: SymbolId,
    global: ScopeId,
    call_site: ScopeId,
}

impl Program {
    fn new() -> Self {
        tracing_config::init_tracing();
        let mut symbols = SymbolArena::new();
        let functions = symbols.alloc(Symbol::new(
            "Functions",
            symbol_flags::CLASS | symbol_flags::STATIC,
        ));
        let form = symbols.alloc(Symbol::new("Form", symbol_flags::CLASS));
        let init = symbols.declare_member(form, Symbol::new("Init", symbol_flags::METHOD));
        let mut scopes = ScopeArena::new();
        let global = scopes.add_namespace(None, None);
        scopes.declare(global, "Form", form);
        scopes.import_static(global, functions);
        let type_scope = scopes.add_type_scope(global, form);
        let call_site = scopes.add_method_scope(type_scope, init);
        Self {
            types: TypeTable::new(),
            symbols,
            scopes,
            assemblies: xbase::binder::AssemblyTable::new("App"),
            exprs: ExprArena::new(),
            signatures: SignatureTable::new(),
            annotations: AnnotationTable::new(),
            functions,
            form,
            global,
            call_site,
        }
    }

    fn declare(&mut self, container: SymbolId, name: &str, param: TypeId) -> SymbolId {
        let symbol = self.symbols.declare_member(
            container,
            Symbol::new(name, symbol_flags::METHOD | symbol_flags::STATIC),
        );
        let container_name = self.symbols.name(container).to_string();
        self.signatures.insert(
            CandidateMember::method(symbol, name, &container_name)
                .static_member()
                .param(param),
        );
        symbol
    }

    fn checker<'a>(&'a self, options: &'a DialectOptions) -> CheckerState<'a> {
        CheckerState::new(CheckerContext::new(
            &self.types,
            &self.symbols,
            &self.scopes,
            &self.assemblies,
            &self.exprs,
            &self.signatures,
            options,
            &self.annotations,
            "scenario.prg",
        ))
    }
}

#[test]
fn test_free_function_versus_static_method_per_dialect() {
    let mut program = Program::new();
    let function = program.declare(program.functions, "Alert", TypeId::STRING);
    let method = program.declare(program.form, "Alert", TypeId::STRING);
    let args = [CallArgument::of_type(TypeId::STRING)];

    let expectations = [
        (DialectOptions::default(), method),
        (DialectOptions::for_dialect(Dialect::Vo), function),
        (DialectOptions::for_dialect(Dialect::Vulcan), function),
        (DialectOptions::for_dialect(Dialect::Harbour), function),
        (
            DialectOptions::for_dialect(Dialect::Vo).with_pragma(Pragma::PreferFunctions, false),
            method,
        ),
    ];
    for (options, expected) in expectations {
        let mut checker = program.checker(&options);
        let bound = checker.bind_invocation("Alert", program.call_site, &args, Span::new(0, 5));
        assert_eq!(bound.symbol, Some(expected), "dialect {}", options.dialect);
        assert!(checker.diagnostic_codes().is_empty());
    }
}

/// `Foo()` in `Functions` and a static `Foo()` on an unrelated class, both
/// imported at namespace level.
#[test]
fn test_free_function_versus_unrelated_imported_static_method() {
    let mut program = Program::new();
    let function = program.declare(program.functions, "Foo", TypeId::INT32);
    let helpers = program.symbols.alloc(Symbol::new("Helpers", symbol_flags::CLASS));
    let unrelated = program.declare(helpers, "Foo", TypeId::INT32);
    program.scopes.import_static(program.global, helpers);
    let args = [CallArgument::of_type(TypeId::INT32)];

    let options = DialectOptions::for_dialect(Dialect::Vo);
    let mut checker = program.checker(&options);
    let bound = checker.bind_invocation("Foo", program.call_site, &args, Span::new(0, 3));
    assert_eq!(bound.symbol, Some(function));
    assert!(checker.diagnostic_codes().is_empty());

    let core = DialectOptions::default();
    let mut checker = program.checker(&core);
    let bound = checker.bind_invocation("Foo", program.call_site, &args, Span::new(0, 3));
    assert_eq!(bound.symbol, Some(function));
    assert_ne!(bound.symbol, Some(unrelated));
    assert_eq!(
        checker.diagnostic_codes(),
        vec![diagnostic_codes::AMBIGUOUS_CALL]
    );
}

#[test]
fn test_lookup_is_deterministic() {
    let mut program = Program::new();
    program.declare(program.functions, "Left", TypeId::STRING);
    program.declare(program.form, "Left", TypeId::USUAL);
    let options = DialectOptions::for_dialect(Dialect::Vo);
    let lookup = SymbolLookup::new(&program.symbols, &program.scopes, &options, "scenario.prg");
    let call = LookupOptions::MUST_BE_INVOCABLE | LookupOptions::DIAGNOSE;

    let mut first_sink = xbase::DiagnosticBag::new();
    let first = lookup.lookup("LEFT", 0, program.call_site, call, Span::DUMMY, &mut first_sink);
    for _ in 0..8 {
        let mut sink = xbase::DiagnosticBag::new();
        let again = lookup.lookup("left", 0, program.call_site, call, Span::DUMMY, &mut sink);
        assert_eq!(again, first);
        assert_eq!(sink.codes(), first_sink.codes());
    }
}

/// A class whose own and inherited `Foo` both survive next to a free
/// function: each pair is reported and overload resolution picks among the
/// methods.
#[test]
fn test_unequal_function_and_method_counts_warn_then_resolve() {
    let mut program = Program::new();
    let _function = program.declare(program.functions, "Foo", TypeId::INT32);
    let base = program.symbols.alloc(Symbol::new("B", symbol_flags::CLASS));
    let inherited = program.declare(base, "Foo", TypeId::INT32);
    let derived = program
        .symbols
        .alloc(Symbol::new("D", symbol_flags::CLASS).with_base(base));
    let own = program.declare(derived, "Foo", TypeId::STRING);
    let d_scope = program.scopes.add_type_scope(program.global, derived);
    let options = DialectOptions::for_dialect(Dialect::Vo);
    let mut checker = program.checker(&options);

    let bound = checker.bind_invocation(
        "Foo",
        d_scope,
        &[CallArgument::of_type(TypeId::STRING)],
        Span::new(4, 3),
    );

    assert_eq!(bound.symbol, Some(own));
    assert_ne!(bound.symbol, Some(inherited));
    assert_eq!(
        checker.diagnostic_codes(),
        vec![
            diagnostic_codes::AMBIGUOUS_FUNCTION_AND_METHOD,
            diagnostic_codes::AMBIGUOUS_FUNCTION_AND_METHOD
        ]
    );
}

#[test]
fn test_char_word_round_trip_and_native_int_pointer() {
    let mut program = Program::new();
    let long_ptr = program.types.pointer_to(TypeId::INT32);
    let options = DialectOptions::for_dialect(Dialect::Vulcan);
    let classifier =
        ConversionClassifier::new(&program.types, &program.exprs, &options, &program.annotations);
    let implicit = |source, target| {
        classifier.classify_implicit(ConversionQuery::types(source, target), ConversionMode::Probe)
    };

    assert_eq!(implicit(TypeId::CHAR, TypeId::UINT16), Conversion::Identity);
    assert_eq!(implicit(TypeId::UINT16, TypeId::CHAR), Conversion::Identity);
    assert_eq!(implicit(TypeId::INTPTR, long_ptr), Conversion::IntegerToPointer);
    assert_eq!(implicit(TypeId::USUAL, TypeId::STRING), Conversion::NoConversion);
    assert!(program.annotations.is_empty());
}

#[test]
fn test_non_negative_literal_prefers_unsigned_operator() {
    let mut program = Program::new();
    let x = program.exprs.variable(TypeId::UINT32);
    let five = program.exprs.literal(ConstantValue::Int(5), TypeId::INT32);
    let options = DialectOptions::for_dialect(Dialect::Vo);
    let unsigned = CandidateMember::binary_operator(
        SymbolId(100),
        BinaryOp::Add,
        "DWORD",
        TypeId::UINT32,
        TypeId::UINT32,
        TypeId::UINT32,
    );
    let widened = CandidateMember::binary_operator(
        SymbolId(101),
        BinaryOp::Add,
        "DWORD",
        TypeId::UINT32,
        TypeId::INT64,
        TypeId::INT64,
    );
    let breaker = TieBreaker::new(TieBreakContext {
        types: &program.types,
        exprs: &program.exprs,
        options: &options,
        assemblies: &program.assemblies,
    });
    let args = [
        CallArgument::from_expr(&program.exprs, x),
        CallArgument::from_expr(&program.exprs, five),
    ];

    assert_eq!(breaker.pick_better(&unsigned, &widened, &args).winner, BetterResult::Left);
    assert_eq!(breaker.pick_better(&widened, &unsigned, &args).winner, BetterResult::Right);
}
