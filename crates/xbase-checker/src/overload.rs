//! Standard overload resolution.
//!
//! A candidate is applicable when the arguments fit its parameter list,
//! either as written or, for a trailing parameter array, in expanded form
//! with one element per extra argument. Applicable candidates are ordered by
//! per-argument conversion rank; a pair neither side dominates goes to the
//! dialect tie-breaker. The best candidate is the one that beats every other
//! applicable candidate.

use smallvec::SmallVec;
use tracing::{debug, trace};
use xbase_solver::type_queries::array_element;
use xbase_solver::{
    BetterResult, CallArgument, CandidateMember, Conversion, ConversionClassifier, ConversionMode,
    ConversionQuery, ParamInfo, RefKind, TieBreaker, TypeTable,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OverloadResolution {
    /// `index` into the candidate slice.
    Success {
        index: usize,
        /// The conversion ranks alone did not pick the winner.
        decided_by_tie_break: bool,
        /// A tie-break rule picked the winner but flagged the pick.
        ambiguous: bool,
    },
    /// No single best candidate; `first` and `second` are two of the best.
    Ambiguous { first: usize, second: usize },
    NoApplicable,
}

/// Parameter each argument binds to, and how it converts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ArgumentBinding {
    pub param: ParamInfo,
    pub conversion: Conversion,
}

struct Applicable {
    index: usize,
    bindings: SmallVec<[ArgumentBinding; 4]>,
}

#[derive(Copy, Clone, Debug)]
struct Comparison {
    winner: BetterResult,
    by_tie_break: bool,
    ambiguous: bool,
}

pub struct OverloadResolver<'a> {
    types: &'a TypeTable,
    classifier: ConversionClassifier<'a>,
    breaker: TieBreaker<'a>,
}

impl<'a> OverloadResolver<'a> {
    pub fn new(types: &'a TypeTable, classifier: ConversionClassifier<'a>, breaker: TieBreaker<'a>) -> Self {
        Self {
            types,
            classifier,
            breaker,
        }
    }

    /// Pick the best of `candidates` for `args`. Classification runs in
    /// probe mode, so resolving never touches the annotation table.
    pub fn resolve(&self, candidates: &[&CandidateMember], args: &[CallArgument]) -> OverloadResolution {
        let applicable: SmallVec<[Applicable; 4]> = candidates
            .iter()
            .enumerate()
            .filter_map(|(index, candidate)| {
                self.bind_arguments(candidate, args, ConversionMode::Probe)
                    .map(|bindings| Applicable { index, bindings })
            })
            .collect();
        trace!(
            candidates = candidates.len(),
            applicable = applicable.len(),
            arguments = args.len(),
            "overload: applicability filtered"
        );

        match applicable.as_slice() {
            [] => OverloadResolution::NoApplicable,
            [only] => OverloadResolution::Success {
                index: only.index,
                decided_by_tie_break: false,
                ambiguous: false,
            },
            _ => self.pick_best(candidates, &applicable, args),
        }
    }

    /// Bind `args` to `candidate` and record the argument conversions.
    /// Empty when the candidate is not applicable.
    pub fn commit_arguments(
        &self,
        candidate: &CandidateMember,
        args: &[CallArgument],
    ) -> SmallVec<[ArgumentBinding; 4]> {
        self.bind_arguments(candidate, args, ConversionMode::Commit)
            .unwrap_or_default()
    }

    pub fn is_applicable(&self, candidate: &CandidateMember, args: &[CallArgument]) -> bool {
        self.bind_arguments(candidate, args, ConversionMode::Probe)
            .is_some()
    }

    // =========================================================================
    // Applicability
    // =========================================================================

    fn bind_arguments(
        &self,
        candidate: &CandidateMember,
        args: &[CallArgument],
        mode: ConversionMode,
    ) -> Option<SmallVec<[ArgumentBinding; 4]>> {
        // A probe of the normal form has no side effects, so the commit
        // path can test it before writing anything.
        if let Some(params) = self.normal_form(candidate, args)
            && self.bind_form(&params, args, ConversionMode::Probe).is_some()
        {
            return self.bind_form(&params, args, mode);
        }
        let params = self.expanded_form(candidate, args)?;
        self.bind_form(&params, args, mode)
    }

    fn normal_form(&self, candidate: &CandidateMember, args: &[CallArgument]) -> Option<SmallVec<[ParamInfo; 4]>> {
        (candidate.params.len() == args.len()).then(|| candidate.params.clone())
    }

    /// Fixed parameters followed by one element parameter per remaining
    /// argument.
    fn expanded_form(&self, candidate: &CandidateMember, args: &[CallArgument]) -> Option<SmallVec<[ParamInfo; 4]>> {
        if !candidate.has_variadic_tail() {
            return None;
        }
        let (tail, fixed) = candidate.params.split_last()?;
        if args.len() < fixed.len() {
            return None;
        }
        let element = ParamInfo::value(array_element(self.types, tail.type_id)?);
        let mut params: SmallVec<[ParamInfo; 4]> = fixed.iter().copied().collect();
        params.resize(args.len(), element);
        Some(params)
    }

    fn bind_form(
        &self,
        params: &[ParamInfo],
        args: &[CallArgument],
        mode: ConversionMode,
    ) -> Option<SmallVec<[ArgumentBinding; 4]>> {
        args.iter()
            .zip(params)
            .map(|(arg, &param)| {
                self.argument_conversion(arg, param, mode)
                    .map(|conversion| ArgumentBinding { param, conversion })
            })
            .collect()
    }

    fn argument_conversion(&self, arg: &CallArgument, param: ParamInfo, mode: ConversionMode) -> Option<Conversion> {
        if param.ref_kind.is_by_reference() || arg.ref_kind.is_by_reference() {
            return (self.ref_kinds_agree(arg, param) && arg.type_id == param.type_id)
                .then_some(Conversion::Identity);
        }
        let query = ConversionQuery {
            expr: arg.expr,
            source: arg.type_id,
            target: param.type_id,
        };
        let conversion = self.classifier.classify_implicit(query, mode);
        conversion.exists().then_some(conversion)
    }

    /// Legacy dialects take the address of a plain variable passed to a
    /// `REF` parameter.
    fn ref_kinds_agree(&self, arg: &CallArgument, param: ParamInfo) -> bool {
        if arg.ref_kind == param.ref_kind {
            return true;
        }
        match (arg.ref_kind, param.ref_kind) {
            (RefKind::None, RefKind::In) => true,
            (RefKind::None, RefKind::Ref) => arg.addressable && self.classifier.options().vo_rules(),
            _ => false,
        }
    }

    // =========================================================================
    // Betterness
    // =========================================================================

    fn pick_best(
        &self,
        candidates: &[&CandidateMember],
        applicable: &[Applicable],
        args: &[CallArgument],
    ) -> OverloadResolution {
        'candidates: for candidate in applicable {
            let mut decided_by_tie_break = false;
            let mut ambiguous = false;
            for other in applicable {
                if other.index == candidate.index {
                    continue;
                }
                let comparison = self.compare(candidates, candidate, other, args);
                if comparison.winner != BetterResult::Left {
                    continue 'candidates;
                }
                decided_by_tie_break |= comparison.by_tie_break;
                ambiguous |= comparison.ambiguous;
            }
            debug!(
                index = candidate.index,
                decided_by_tie_break,
                ambiguous,
                "overload: best candidate"
            );
            return OverloadResolution::Success {
                index: candidate.index,
                decided_by_tie_break,
                ambiguous,
            };
        }

        // Report two candidates nothing beats, if there are two.
        let unbeaten: SmallVec<[usize; 4]> = applicable
            .iter()
            .filter(|candidate| {
                !applicable.iter().any(|other| {
                    other.index != candidate.index
                        && self.compare(candidates, other, candidate, args).winner == BetterResult::Left
                })
            })
            .map(|candidate| candidate.index)
            .collect();
        let pool: SmallVec<[usize; 4]> = if unbeaten.len() >= 2 {
            unbeaten
        } else {
            applicable.iter().map(|candidate| candidate.index).collect()
        };
        match pool.as_slice() {
            [first, second, ..] => {
                debug!(first, second, "overload: ambiguous");
                OverloadResolution::Ambiguous {
                    first: *first,
                    second: *second,
                }
            }
            _ => OverloadResolution::NoApplicable,
        }
    }

    fn compare(
        &self,
        candidates: &[&CandidateMember],
        left: &Applicable,
        right: &Applicable,
        args: &[CallArgument],
    ) -> Comparison {
        let winner = dominance(&left.bindings, &right.bindings);
        if winner != BetterResult::Neither {
            return Comparison {
                winner,
                by_tie_break: false,
                ambiguous: false,
            };
        }
        let (Some(l), Some(r)) = (candidates.get(left.index), candidates.get(right.index)) else {
            return Comparison {
                winner,
                by_tie_break: false,
                ambiguous: false,
            };
        };
        let result = self.breaker.pick_better(l, r, args);
        Comparison {
            winner: result.winner,
            by_tie_break: true,
            ambiguous: result.ambiguous,
        }
    }
}

/// `Left` when `left` converts no argument worse and at least one better.
fn dominance(left: &[ArgumentBinding], right: &[ArgumentBinding]) -> BetterResult {
    let mut left_better = false;
    let mut right_better = false;
    for (l, r) in left.iter().zip(right) {
        match l.conversion.rank().cmp(&r.conversion.rank()) {
            std::cmp::Ordering::Less => left_better = true,
            std::cmp::Ordering::Greater => right_better = true,
            std::cmp::Ordering::Equal => {}
        }
    }
    match (left_better, right_better) {
        (true, false) => BetterResult::Left,
        (false, true) => BetterResult::Right,
        _ => BetterResult::Neither,
    }
}

#[cfg(test)]
#[path = "tests/overload_unit_tests.rs"]
mod tests;
