//! `CheckerState`, the entry point for binding invocations and assignments.
//!
//! The binding operations themselves live next to the concern they handle:
//! - `call_checker` - `bind_invocation`
//! - `assignment_checker` - `bind_assignment`
//! - `error_reporter` - diagnostic emission

use smallvec::SmallVec;
use xbase_binder::SymbolId;
use xbase_common::Diagnostic;
use xbase_solver::Conversion;

use crate::context::CheckerContext;
use crate::overload::OverloadResolution;

pub struct CheckerState<'a> {
    pub ctx: CheckerContext<'a>,
}

/// Result of binding one invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundInvocation {
    /// Method the call binds to; also set when recovering from an ambiguous
    /// call.
    pub symbol: Option<SymbolId>,
    pub resolution: OverloadResolution,
    /// Conversion of each argument to its parameter.
    pub conversions: SmallVec<[Conversion; 4]>,
}

impl BoundInvocation {
    pub(crate) fn unbound() -> Self {
        Self {
            symbol: None,
            resolution: OverloadResolution::NoApplicable,
            conversions: SmallVec::new(),
        }
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.symbol.is_some()
    }
}

impl<'a> CheckerState<'a> {
    pub fn new(ctx: CheckerContext<'a>) -> Self {
        Self { ctx }
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.ctx.diagnostics.iter()
    }

    pub fn diagnostic_codes(&self) -> Vec<u32> {
        self.ctx.diagnostics.codes()
    }

    pub fn into_diagnostics(mut self) -> Vec<Diagnostic> {
        self.ctx.take_diagnostics()
    }
}
