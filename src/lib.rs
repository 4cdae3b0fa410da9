//! xbase: a dialect-aware binder core for xBase-family compilers.
//!
//! The work is split across the workspace crates, re-exported here:
//! - `common` - spans, dialect options and diagnostics
//! - `binder` - symbols, scopes and name lookup
//! - `solver` - types, conversion classification and overload tie-breaking
//! - `checker` - overload resolution and invocation binding
//!
//! `tracing_config` installs a `tracing` subscriber from the environment.

pub use xbase_binder as binder;
pub use xbase_checker as checker;
pub use xbase_common as common;
pub use xbase_solver as solver;

pub mod tracing_config;

pub use xbase_binder::{LookupOptions, LookupResult, LookupResultKind, SymbolLookup};
pub use xbase_checker::{BoundInvocation, CheckerContext, CheckerState, OverloadResolution};
pub use xbase_common::{Diagnostic, DiagnosticBag, Dialect, DialectOptions, Pragma, Span};
pub use xbase_solver::{
    BetterResult, Conversion, ConversionClassifier, ConversionMode, TieBreaker, TypeId, TypeTable,
};
