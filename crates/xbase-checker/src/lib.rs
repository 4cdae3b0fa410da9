//! Invocation and assignment binding for the xbase compiler core.
//!
//! This crate drives the binder and solver for the surrounding pipeline:
//! - `context` - `CheckerContext`, the frozen tables plus the diagnostic bag
//! - `overload` - standard overload resolution with the dialect tie-breaker
//! - `state` - `CheckerState` and `BoundInvocation`
//! - `call_checker` - invocation binding
//! - `assignment_checker` - assignment conversion binding
//! - `error_reporter` - diagnostic emission

pub mod assignment_checker;
pub mod call_checker;
pub mod context;
pub mod error_reporter;
pub mod overload;
pub mod state;

pub use context::CheckerContext;
pub use overload::{ArgumentBinding, OverloadResolution, OverloadResolver};
pub use state::{BoundInvocation, CheckerState};

#[cfg(test)]
#[path = "tests/checker_state_tests.rs"]
mod checker_state_tests;
