//! Name binding for the xbase compiler core.
//!
//! - `symbols` - `SymbolId`, `Symbol`, `SymbolArena` and `symbol_flags`
//! - `assemblies` - assembly identities and reference order
//! - `scopes` - lexical scope chains
//! - `lookup_result` - `LookupResult` and its merge rules
//! - `lookup` - the dialect-aware lookup resolver

pub mod assemblies;
pub mod lookup;
pub mod lookup_result;
pub mod scopes;
pub mod symbols;

pub use assemblies::{AssemblyId, AssemblyInfo, AssemblyTable};
pub use lookup::{
    FUNCTIONS_CONTAINER_SUFFIX, LookupOptions, LookupOutcome, SymbolLookup, is_functions_container,
};
pub use lookup_result::{LookupDiagnostic, LookupResult, LookupResultKind};
pub use scopes::{Scope, ScopeArena, ScopeId, ScopeKind};
pub use symbols::{Accessibility, Symbol, SymbolArena, SymbolId, symbol_flags};
