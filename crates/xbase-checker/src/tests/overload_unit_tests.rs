use super::*;
use xbase_binder::{AssemblyTable, SymbolId};
use xbase_common::{Dialect, DialectOptions, Pragma};
use xbase_solver::{
    AnnotationTable, ExprAnnotations, ExprArena, TieBreakContext, TypeId,
};

struct Fixture {
    types: TypeTable,
    exprs: ExprArena,
    options: DialectOptions,
    annotations: AnnotationTable,
    assemblies: AssemblyTable,
}

impl Fixture {
    fn new(options: DialectOptions) -> Self {
        Self {
            types: TypeTable::new(),
            exprs: ExprArena::new(),
            options,
            annotations: AnnotationTable::new(),
            assemblies: AssemblyTable::new("App"),
        }
    }

    fn core() -> Self {
        Self::new(DialectOptions::default())
    }

    fn vo() -> Self {
        Self::new(DialectOptions::for_dialect(Dialect::Vo))
    }

    fn resolver(&self) -> OverloadResolver<'_> {
        let classifier =
            ConversionClassifier::new(&self.types, &self.exprs, &self.options, &self.annotations);
        let breaker = TieBreaker::new(TieBreakContext {
            types: &self.types,
            exprs: &self.exprs,
            options: &self.options,
            assemblies: &self.assemblies,
        });
        OverloadResolver::new(&self.types, classifier, breaker)
    }

    fn resolve(&self, candidates: &[CandidateMember], args: &[CallArgument]) -> OverloadResolution {
        let refs: Vec<&CandidateMember> = candidates.iter().collect();
        self.resolver().resolve(&refs, args)
    }
}

fn foo(id: u32, params: &[TypeId]) -> CandidateMember {
    params
        .iter()
        .fold(CandidateMember::method(SymbolId(id), "Foo", "Host"), |m, &t| m.param(t))
}

fn binding(conversion: Conversion) -> ArgumentBinding {
    ArgumentBinding {
        param: ParamInfo::value(TypeId::INT32),
        conversion,
    }
}

#[test]
fn test_dominance_needs_strictly_better_somewhere() {
    let identity = binding(Conversion::Identity);
    let numeric = binding(Conversion::ImplicitNumeric);
    let boxing = binding(Conversion::Boxing);
    assert_eq!(dominance(&[identity, numeric], &[numeric, numeric]), BetterResult::Left);
    assert_eq!(dominance(&[boxing], &[numeric]), BetterResult::Right);
    assert_eq!(dominance(&[identity, boxing], &[numeric, numeric]), BetterResult::Neither);
    assert_eq!(dominance(&[numeric], &[numeric]), BetterResult::Neither);
}

#[test]
fn test_exact_match_wins_without_tie_break() {
    let fx = Fixture::core();
    let candidates = [foo(1, &[TypeId::INT64]), foo(2, &[TypeId::INT32])];
    let resolution = fx.resolve(&candidates, &[CallArgument::of_type(TypeId::INT32)]);
    assert_eq!(
        resolution,
        OverloadResolution::Success {
            index: 1,
            decided_by_tie_break: false,
            ambiguous: false,
        }
    );
}

#[test]
fn test_arity_mismatch_is_not_applicable() {
    let fx = Fixture::core();
    let candidates = [foo(1, &[TypeId::INT32, TypeId::INT32])];
    assert_eq!(
        fx.resolve(&candidates, &[CallArgument::of_type(TypeId::INT32)]),
        OverloadResolution::NoApplicable
    );
    assert_eq!(fx.resolve(&[], &[]), OverloadResolution::NoApplicable);
}

#[test]
fn test_missing_conversion_is_not_applicable() {
    let fx = Fixture::core();
    let candidates = [foo(1, &[TypeId::STRING]), foo(2, &[TypeId::INT64])];
    let resolution = fx.resolve(&candidates, &[CallArgument::of_type(TypeId::INT16)]);
    assert_eq!(
        resolution,
        OverloadResolution::Success {
            index: 1,
            decided_by_tie_break: false,
            ambiguous: false,
        }
    );
}

#[test]
fn test_variadic_tail_in_expanded_and_normal_form() {
    let fx = Fixture::core();
    let format = CandidateMember::method(SymbolId(1), "Format", "Text")
        .param(TypeId::STRING)
        .variadic(TypeId::OBJECT_ARRAY);
    let resolver = fx.resolver();

    let expanded = [
        CallArgument::of_type(TypeId::STRING),
        CallArgument::of_type(TypeId::INT32),
        CallArgument::of_type(TypeId::STRING),
    ];
    let bindings = resolver.commit_arguments(&format, &expanded);
    let conversions: Vec<Conversion> = bindings.iter().map(|b| b.conversion).collect();
    assert_eq!(
        conversions,
        vec![Conversion::Identity, Conversion::Boxing, Conversion::ImplicitReference]
    );
    assert!(bindings.iter().skip(1).all(|b| b.param.type_id == TypeId::OBJECT));

    assert!(resolver.is_applicable(&format, &[CallArgument::of_type(TypeId::STRING)]));
    assert!(!resolver.is_applicable(&format, &[]));

    let normal = [
        CallArgument::of_type(TypeId::STRING),
        CallArgument::of_type(TypeId::OBJECT_ARRAY),
    ];
    let bindings = resolver.commit_arguments(&format, &normal);
    assert_eq!(bindings.len(), 2);
    assert_eq!(bindings[1].param.type_id, TypeId::OBJECT_ARRAY);
    assert_eq!(bindings[1].conversion, Conversion::Identity);
}

#[test]
fn test_by_reference_arguments_need_identical_types() {
    let mut fx = Fixture::core();
    let var = fx.exprs.variable(TypeId::INT32);
    let swap = CandidateMember::method(SymbolId(1), "Swap", "Host").ref_param(TypeId::INT32, RefKind::Ref);
    let resolver = fx.resolver();

    let by_ref = CallArgument::from_expr(&fx.exprs, var).by_ref(RefKind::Ref);
    assert!(resolver.is_applicable(&swap, &[by_ref]));
    let wrong_type = CallArgument::of_type(TypeId::INT16).by_ref(RefKind::Ref);
    assert!(!resolver.is_applicable(&swap, &[wrong_type]));
    let out = CallArgument::from_expr(&fx.exprs, var).by_ref(RefKind::Out);
    assert!(!resolver.is_applicable(&swap, &[out]));

    // By-value variable: only the legacy dialects take its address.
    let plain = CallArgument::from_expr(&fx.exprs, var);
    assert!(!resolver.is_applicable(&swap, &[plain]));
    fx.options = DialectOptions::for_dialect(Dialect::Vo);
    assert!(fx.resolver().is_applicable(&swap, &[plain]));
}

#[test]
fn test_tie_break_decides_equal_ranks() {
    let mut fx = Fixture::core();
    let legacy = fx.assemblies.add_reference("VulcanRTFuncs", true);
    let candidates = [
        foo(1, &[TypeId::INT32]).in_assembly(legacy),
        foo(2, &[TypeId::INT32]),
    ];
    let resolution = fx.resolve(&candidates, &[CallArgument::of_type(TypeId::INT32)]);
    assert_eq!(
        resolution,
        OverloadResolution::Success {
            index: 1,
            decided_by_tie_break: true,
            ambiguous: false,
        }
    );
}

#[test]
fn test_functions_container_pick_is_flagged() {
    let mut fx = Fixture::vo();
    let first = fx.assemblies.add_reference("First", false);
    let second = fx.assemblies.add_reference("Second", false);
    let str_in = |id, assembly| {
        CandidateMember::method(SymbolId(id), "Str", "Functions")
            .param(TypeId::USUAL)
            .static_member()
            .in_assembly(assembly)
    };
    let candidates = [str_in(1, second), str_in(2, first)];
    let resolution = fx.resolve(&candidates, &[CallArgument::of_type(TypeId::USUAL)]);
    assert_eq!(
        resolution,
        OverloadResolution::Success {
            index: 1,
            decided_by_tie_break: true,
            ambiguous: true,
        }
    );
}

#[test]
fn test_indistinguishable_candidates_are_ambiguous() {
    let fx = Fixture::vo();
    let candidates = [
        foo(1, &[TypeId::INT32]),
        foo(2, &[TypeId::INT32]),
        foo(3, &[TypeId::STRING]),
    ];
    let resolution = fx.resolve(&candidates, &[CallArgument::of_type(TypeId::INT16)]);
    assert_eq!(resolution, OverloadResolution::Ambiguous { first: 0, second: 1 });
}

#[test]
fn test_probe_leaves_annotations_untouched() {
    let mut fx = Fixture::vo();
    fx.options = fx.options.with_pragma(Pragma::ArithmeticConversions, true);
    let wide = fx.exprs.variable(TypeId::INT64);
    let candidates = [foo(1, &[TypeId::INT16])];
    let args = [CallArgument::from_expr(&fx.exprs, wide)];

    let resolution = fx.resolve(&candidates, &args);
    assert!(matches!(resolution, OverloadResolution::Success { index: 0, .. }));
    assert!(fx.annotations.is_empty());

    let bindings = fx.resolver().commit_arguments(&candidates[0], &args);
    assert_eq!(bindings[0].conversion, Conversion::ImplicitNumeric);
    assert!(fx.annotations.contains(wide, ExprAnnotations::NARROWING_WARNING));
}
