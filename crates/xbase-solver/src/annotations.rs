//! Expression annotation side-table.
//!
//! Conversion classification records advisory warnings and lowering hints
//! here instead of on the expression nodes. Writes OR flags in, so committing
//! the same classification twice leaves the table unchanged.

use bitflags::bitflags;
use dashmap::DashMap;
use tracing::trace;

use crate::expr::ExprIndex;

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ExprAnnotations: u8 {
        /// Same-width signed/unsigned reinterpretation.
        const SIGNED_UNSIGNED_WARNING = 1 << 0;
        /// Conversion to a narrower numeric type.
        const NARROWING_WARNING = 1 << 1;
        /// Native integer boxed to OBJECT; unboxing needs the runtime helper.
        const SPECIAL_UNBOX = 1 << 2;
        /// USUAL to DECIMAL goes through the runtime conversion.
        const SPECIAL_HANDLING = 1 << 3;

        const WARNINGS = Self::SIGNED_UNSIGNED_WARNING.bits() | Self::NARROWING_WARNING.bits();
    }
}

/// Thread-safe `ExprIndex -> ExprAnnotations` map.
///
/// Each expression is bound by one thread, so entries never race; the map
/// itself is shared by every worker binding the same arena.
#[derive(Debug, Default)]
pub struct AnnotationTable {
    entries: DashMap<ExprIndex, ExprAnnotations>,
}

impl AnnotationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// OR `flags` into the annotations of `expr`.
    pub fn set(&self, expr: ExprIndex, flags: ExprAnnotations) {
        if flags.is_empty() {
            return;
        }
        trace!(expr = expr.0, ?flags, "AnnotationTable::set");
        *self.entries.entry(expr).or_default() |= flags;
    }

    pub fn get(&self, expr: ExprIndex) -> ExprAnnotations {
        self.entries
            .get(&expr)
            .map_or(ExprAnnotations::empty(), |entry| *entry.value())
    }

    pub fn contains(&self, expr: ExprIndex, flags: ExprAnnotations) -> bool {
        self.get(expr).contains(flags)
    }

    /// All entries ordered by expression index.
    pub fn snapshot(&self) -> Vec<(ExprIndex, ExprAnnotations)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect();
        entries.sort_unstable_by_key(|(expr, _)| *expr);
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
