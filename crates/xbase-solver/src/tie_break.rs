//! Overload tie-breaking.
//!
//! The standard best-match algorithm asks [`TieBreaker::pick_better`] when it
//! cannot order two applicable candidates. The rules below form an ordered
//! cascade; the first rule that prefers one side decides.
//!
//! Every rule is written as a comparison of a per-candidate property, so
//! swapping the candidates swaps the answer.

use tracing::debug;
use xbase_binder::AssemblyTable;
use xbase_binder::lookup::is_functions_container;
use xbase_common::DialectOptions;

use crate::expr::{ExprArena, ExprIndex};
use crate::signatures::{CandidateMember, RefKind};
use crate::type_queries::{
    enum_underlying, is_array, is_array_of, is_enum, is_integral, is_legacy_float,
    is_signed_integral, is_usual, size_in_bytes,
};
use crate::types::{TypeId, TypeTable};

// =============================================================================
// Results
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BetterResult {
    Left,
    Right,
    Neither,
}

impl BetterResult {
    /// The answer for the swapped pair.
    #[must_use]
    pub const fn swap(self) -> Self {
        match self {
            BetterResult::Left => BetterResult::Right,
            BetterResult::Right => BetterResult::Left,
            BetterResult::Neither => BetterResult::Neither,
        }
    }

    /// `Left` when only `left` holds, `Right` when only `right` holds.
    #[inline]
    const fn prefer(left: bool, right: bool) -> Option<Self> {
        match (left, right) {
            (true, false) => Some(BetterResult::Left),
            (false, true) => Some(BetterResult::Right),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TieBreakResult {
    pub winner: BetterResult,
    /// Decided, but by a rule the caller may want to warn about.
    pub ambiguous: bool,
    /// Rule that decided, `None` for `Neither`.
    pub rule: Option<&'static str>,
}

impl TieBreakResult {
    pub const NEITHER: TieBreakResult = TieBreakResult {
        winner: BetterResult::Neither,
        ambiguous: false,
        rule: None,
    };
}

/// One argument of the call being resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CallArgument {
    pub expr: Option<ExprIndex>,
    pub type_id: TypeId,
    pub ref_kind: RefKind,
    /// The argument denotes storage and may be passed by address.
    pub addressable: bool,
}

impl CallArgument {
    /// Argument of type `type_id` with no bound expression.
    pub const fn of_type(type_id: TypeId) -> Self {
        Self {
            expr: None,
            type_id,
            ref_kind: RefKind::None,
            addressable: false,
        }
    }

    pub fn from_expr(exprs: &ExprArena, expr: ExprIndex) -> Self {
        Self {
            expr: Some(expr),
            type_id: exprs.type_of(expr),
            ref_kind: RefKind::None,
            addressable: exprs.is_addressable(expr),
        }
    }

    #[must_use]
    pub const fn by_ref(mut self, ref_kind: RefKind) -> Self {
        self.ref_kind = ref_kind;
        self
    }
}

// =============================================================================
// TieBreaker
// =============================================================================

#[derive(Clone, Copy)]
pub struct TieBreakContext<'a> {
    pub types: &'a TypeTable,
    pub exprs: &'a ExprArena,
    pub options: &'a DialectOptions,
    pub assemblies: &'a AssemblyTable,
}

type TieRule = fn(&TieBreakContext<'_>, &CandidateMember, &CandidateMember, &[CallArgument]) -> Option<TieBreakResult>;

const TIE_BREAK_RULES: &[(&str, TieRule)] = &[
    ("origin", origin),
    ("parameter-shape", parameter_shape),
    ("functions-container", functions_container),
    ("binary-operator", binary_operator),
    ("literal-operand", literal_operand),
    ("usual-operand", usual_operand),
];

pub struct TieBreaker<'a> {
    ctx: TieBreakContext<'a>,
}

impl<'a> TieBreaker<'a> {
    pub const fn new(ctx: TieBreakContext<'a>) -> Self {
        Self { ctx }
    }

    /// Decide between two candidates the standard rules could not order.
    pub fn pick_better(
        &self,
        left: &CandidateMember,
        right: &CandidateMember,
        args: &[CallArgument],
    ) -> TieBreakResult {
        for &(name, rule) in TIE_BREAK_RULES {
            if let Some(result) = rule(&self.ctx, left, right, args) {
                debug!(
                    rule = name,
                    left = %left.container,
                    right = %right.container,
                    winner = ?result.winner,
                    ambiguous = result.ambiguous,
                    "tie-break decided"
                );
                return TieBreakResult {
                    rule: Some(name),
                    ..result
                };
            }
        }
        TieBreakResult::NEITHER
    }
}

fn decided(winner: BetterResult) -> TieBreakResult {
    TieBreakResult {
        winner,
        ambiguous: false,
        rule: None,
    }
}

// =============================================================================
// Rules
// =============================================================================

fn origin(
    ctx: &TieBreakContext<'_>,
    left: &CandidateMember,
    right: &CandidateMember,
    _: &[CallArgument],
) -> Option<TieBreakResult> {
    let assemblies = ctx.assemblies;
    let (legacy_left, legacy_right) = (
        assemblies.is_legacy_runtime(left.assembly),
        assemblies.is_legacy_runtime(right.assembly),
    );
    if let Some(winner) = BetterResult::prefer(!legacy_left, !legacy_right) {
        return Some(decided(winner));
    }
    if legacy_left {
        return None;
    }
    BetterResult::prefer(left.assembly.is_current(), right.assembly.is_current()).map(decided)
}

fn parameter_shape(
    ctx: &TieBreakContext<'_>,
    left: &CandidateMember,
    right: &CandidateMember,
    args: &[CallArgument],
) -> Option<TieBreakResult> {
    if left.params.len() != right.params.len() {
        return None;
    }
    let types = ctx.types;
    left.params
        .iter()
        .zip(right.params.iter())
        .zip(args)
        .find_map(|((lp, rp), arg)| {
            let (l, r, a) = (lp.type_id, rp.type_id, arg.type_id);

            // USUAL loses to a specific, non-array parameter.
            if !is_usual(types, a) && l != r {
                let specific = |t: TypeId| !is_usual(types, t) && !is_array(types, t);
                if let Some(w) = BetterResult::prefer(
                    specific(l) && is_usual(types, r),
                    is_usual(types, l) && specific(r),
                ) {
                    return Some(w);
                }
            }
            // OBJECT loses to OBJECT[].
            let object_array = |t: TypeId| is_array_of(types, t, TypeId::OBJECT);
            if let Some(w) = BetterResult::prefer(
                object_array(l) && r == TypeId::OBJECT,
                l == TypeId::OBJECT && object_array(r),
            ) {
                return Some(w);
            }
            if arg.addressable
                && lp.ref_kind != rp.ref_kind
                && let Some(w) =
                    BetterResult::prefer(lp.ref_kind == RefKind::Ref, rp.ref_kind == RefKind::Ref)
            {
                return Some(w);
            }
            if is_enum(types, a) {
                if let Some(w) = BetterResult::prefer(l == a, r == a) {
                    return Some(w);
                }
                if let Some(underlying) = enum_underlying(types, a)
                    && let Some(w) = BetterResult::prefer(l == underlying, r == underlying)
                {
                    return Some(w);
                }
            }
            if let Some(w) = BetterResult::prefer(l == a, r == a) {
                return Some(w);
            }
            if is_legacy_float(types, a) {
                return BetterResult::prefer(l == TypeId::DOUBLE, r == TypeId::DOUBLE);
            }
            None
        })
        .map(decided)
}

/// Both candidates come from `*Functions` containers of the same name in
/// different assemblies. The earlier reference wins, reported as ambiguous.
fn functions_container(
    ctx: &TieBreakContext<'_>,
    left: &CandidateMember,
    right: &CandidateMember,
    _: &[CallArgument],
) -> Option<TieBreakResult> {
    if left.assembly == right.assembly
        || !is_functions_container(&left.container)
        || !left.container.eq_ignore_ascii_case(&right.container)
    {
        return None;
    }
    let order = |c: &CandidateMember| ctx.assemblies.reference_order(c.assembly);
    let winner = BetterResult::prefer(order(left) < order(right), order(right) < order(left))?;
    Some(TieBreakResult {
        winner,
        ambiguous: true,
        rule: None,
    })
}

fn binary_operator(
    ctx: &TieBreakContext<'_>,
    left: &CandidateMember,
    right: &CandidateMember,
    args: &[CallArgument],
) -> Option<TieBreakResult> {
    if !left.is_binary_operator() || !right.is_binary_operator() || args.len() != 2 {
        return None;
    }
    let types = ctx.types;
    let (lp, rp) = (
        [left.params[0].type_id, left.params[1].type_id],
        [right.params[0].type_id, right.params[1].type_id],
    );

    // REAL8 over REAL4 when that is the only difference.
    let differing: Vec<usize> = (0..2).filter(|&i| lp[i] != rp[i]).collect();
    if let [i] = differing[..]
        && let Some(w) = BetterResult::prefer(
            lp[i] == TypeId::DOUBLE && rp[i] == TypeId::SINGLE,
            lp[i] == TypeId::SINGLE && rp[i] == TypeId::DOUBLE,
        )
    {
        return Some(decided(w));
    }

    if args.iter().any(|a| is_legacy_float(types, a.type_id))
        && let Some(w) =
            BetterResult::prefer(lp.contains(&TypeId::DOUBLE), rp.contains(&TypeId::DOUBLE))
    {
        return Some(decided(w));
    }

    let enums = |p: &[TypeId; 2]| p.iter().filter(|&&t| is_enum(types, t)).count();
    if enums(&lp) != enums(&rp)
        && let Some(w) = BetterResult::prefer(enums(&lp) == 2, enums(&rp) == 2)
    {
        return Some(decided(w));
    }

    let all_integral = |p: &[TypeId; 2]| p.iter().all(|&t| is_integral(types, t));
    if ctx.options.signed_unsigned_conversion
        && all_integral(&lp)
        && all_integral(&rp)
        && args.iter().all(|a| is_integral(types, a.type_id))
    {
        let same_sign = |param: TypeId, arg: TypeId| {
            is_signed_integral(types, param) == is_signed_integral(types, arg)
        };
        let same_shape = |param: TypeId, arg: TypeId| {
            same_sign(param, arg) && size_in_bytes(types, param) == size_in_bytes(types, arg)
        };
        let (a0, a1) = (args[0].type_id, args[1].type_id);
        let checks = [
            (same_shape(lp[0], a0), same_shape(rp[0], a0)),
            (same_shape(lp[1], a1), same_shape(rp[1], a1)),
            (same_sign(lp[0], a0), same_sign(rp[0], a0)),
            (same_sign(lp[1], a1), same_sign(rp[1], a1)),
        ];
        if let Some(w) = checks.into_iter().find_map(|(l, r)| BetterResult::prefer(l, r)) {
            return Some(decided(w));
        }
    }
    None
}

fn literal_operand(
    ctx: &TieBreakContext<'_>,
    left: &CandidateMember,
    right: &CandidateMember,
    args: &[CallArgument],
) -> Option<TieBreakResult> {
    if !left.is_binary_operator() || !right.is_binary_operator() || args.len() != 2 {
        return None;
    }
    let is_literal = |arg: &CallArgument| arg.expr.is_some_and(|e| ctx.exprs.is_literal(e));
    match (is_literal(&args[0]), is_literal(&args[1])) {
        (true, false) => prefer_literal_position(ctx, left, right, args, 0),
        (false, true) => prefer_literal_position(ctx, left, right, args, 1),
        _ => None,
    }
    .map(decided)
}

/// The literal sits at `literal`; the other operand has type T. A candidate
/// taking T at the literal's position wins when it is the only one to do so
/// and the literal fits in T.
fn prefer_literal_position(
    ctx: &TieBreakContext<'_>,
    left: &CandidateMember,
    right: &CandidateMember,
    args: &[CallArgument],
    literal: usize,
) -> Option<BetterResult> {
    let types = ctx.types;
    let operand_type = args[1 - literal].type_id;
    let takes = |c: &CandidateMember| c.param_type(literal) == Some(operand_type);
    let winner = BetterResult::prefer(takes(left), takes(right))?;

    let value = args[literal]
        .expr
        .and_then(|e| ctx.exprs.constant_value(e))
        .and_then(|v| v.as_i128());
    let fits = match value {
        Some(v) if is_integral(types, operand_type) && !is_signed_integral(types, operand_type) => {
            v >= 0
        }
        _ => true,
    };
    fits.then_some(winner)
}

fn usual_operand(
    ctx: &TieBreakContext<'_>,
    left: &CandidateMember,
    right: &CandidateMember,
    args: &[CallArgument],
) -> Option<TieBreakResult> {
    let types = ctx.types;
    if !left.is_binary_operator()
        || !right.is_binary_operator()
        || args.len() != 2
        || args.iter().any(|a| is_usual(types, a.type_id))
    {
        return None;
    }
    let avoids = |c: &CandidateMember, i: usize| c.param_type(i).is_some_and(|t| !is_usual(types, t));
    (0..2)
        .find_map(|i| BetterResult::prefer(avoids(left, i), avoids(right, i)))
        .map(decided)
}

#[cfg(test)]
#[path = "tests/tie_break_unit_tests.rs"]
mod tests;
