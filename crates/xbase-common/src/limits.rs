//! Centralized limits and thresholds for the binder core.
//!
//! Recursive helpers (operand-type widening, parent-chain walks, base-type
//! walks) are bounded so a malformed tree or a cyclic type graph degrades to a
//! conservative answer instead of overflowing the stack.

/// Maximum nesting depth for the binary-operand widening analysis.
///
/// Past this depth the analysis stops descending and uses the static type of
/// the operand it reached.
pub const MAX_OPERAND_WIDENING_DEPTH: u32 = 256;

/// Maximum number of parent links followed when looking for an enclosing node
/// (assignment, legacy cast) of a bound expression.
pub const MAX_PARENT_WALK: u32 = 64;

/// Maximum length of a base-type chain followed by `derives_from` and the
/// member lookup of type scopes.
pub const MAX_BASE_TYPE_DEPTH: u32 = 128;

/// Maximum number of scopes walked by a single lookup.
pub const MAX_SCOPE_CHAIN_DEPTH: u32 = 1024;
