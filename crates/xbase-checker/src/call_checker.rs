//! Invocation binding: name lookup, overload resolution, argument commit.

use tracing::{debug, trace};
use xbase_binder::{LookupOptions, LookupResultKind, ScopeId};
use xbase_common::Span;
use xbase_solver::CallArgument;

use crate::overload::OverloadResolution;
use crate::state::{BoundInvocation, CheckerState};

impl<'a> CheckerState<'a> {
    /// Bind a call of `name` from `scope` with `args`.
    ///
    /// Lookup problems and a missing applicable overload leave the call
    /// unbound. An ambiguous call is reported and then bound to the first of
    /// the tied candidates so later phases see a target.
    pub fn bind_invocation(
        &mut self,
        name: &str,
        scope: ScopeId,
        args: &[CallArgument],
        span: Span,
    ) -> BoundInvocation {
        let outcome = self.ctx.lookup().lookup(
            name,
            0,
            scope,
            LookupOptions::MUST_BE_INVOCABLE | LookupOptions::DIAGNOSE,
            span,
            &mut self.ctx.diagnostics,
        );
        let result = outcome.result;
        match result.kind {
            LookupResultKind::Empty => {
                debug!(name, "bind_invocation: no invocable symbol");
                return BoundInvocation::unbound();
            }
            LookupResultKind::Inaccessible => {
                self.report_inaccessible_symbol(&result, span);
                return BoundInvocation::unbound();
            }
            LookupResultKind::Ambiguous => {
                self.report_ambiguous_reference(name, &result, span);
                return BoundInvocation::unbound();
            }
            LookupResultKind::Viable | LookupResultKind::MultiViable => {}
        }

        let signatures = self.ctx.signatures;
        let candidates = signatures.candidates(&result.symbols);
        let resolver = self.ctx.overload_resolver();
        let resolution = resolver.resolve(&candidates, args);
        trace!(name, ?resolution, "bind_invocation: resolved");

        let chosen = match resolution {
            OverloadResolution::Success {
                index, ambiguous, ..
            } => {
                if ambiguous && let Some(member) = candidates.get(index) {
                    self.report_function_chosen(member, span);
                }
                index
            }
            OverloadResolution::Ambiguous { first, second } => {
                if let (Some(a), Some(b)) = (candidates.get(first), candidates.get(second)) {
                    self.report_ambiguous_call(a, b, span);
                }
                first
            }
            OverloadResolution::NoApplicable => {
                self.report_no_applicable_overload(name, span);
                return BoundInvocation {
                    resolution,
                    ..BoundInvocation::unbound()
                };
            }
        };
        let Some(member) = candidates.get(chosen) else {
            return BoundInvocation::unbound();
        };

        let bindings = resolver.commit_arguments(member, args);
        for (arg, binding) in args.iter().zip(&bindings) {
            if let Some(expr) = arg.expr {
                self.report_conversion_warnings(expr, arg.type_id, binding.param.type_id, span);
            }
        }
        BoundInvocation {
            symbol: Some(member.symbol),
            resolution,
            conversions: bindings.iter().map(|binding| binding.conversion).collect(),
        }
    }
}
