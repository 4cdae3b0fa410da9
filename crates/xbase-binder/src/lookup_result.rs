//! Lookup results and their merge rules.

use smallvec::SmallVec;

use crate::symbols::{SymbolArena, SymbolId};

/// Outcome category of a lookup.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LookupResultKind {
    #[default]
    Empty,
    /// Found only symbols the lookup site cannot access.
    Inaccessible,
    /// Several viable symbols that do not form a method group.
    Ambiguous,
    /// Exactly one viable symbol.
    Viable,
    /// A method group of several viable symbols.
    MultiViable,
}

impl LookupResultKind {
    /// Merge rank: a higher rank replaces a lower one, equal ranks combine.
    /// An inner ambiguity outranks an outer viable result so it cannot be
    /// hidden by it.
    pub const fn rank(self) -> u8 {
        match self {
            LookupResultKind::Empty => 0,
            LookupResultKind::Inaccessible => 1,
            LookupResultKind::Viable | LookupResultKind::MultiViable => 2,
            LookupResultKind::Ambiguous => 3,
        }
    }
}

/// Payload for the caller's diagnostic formatting.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LookupDiagnostic {
    Ambiguous { first: SymbolId, second: SymbolId },
    Inaccessible { symbol: SymbolId },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LookupResult {
    pub kind: LookupResultKind,
    pub symbols: SmallVec<[SymbolId; 4]>,
    pub diagnostic: Option<LookupDiagnostic>,
}

impl LookupResult {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a result from the viable and inaccessible candidates of one scope.
    pub fn from_candidates(
        arena: &SymbolArena,
        viable: SmallVec<[SymbolId; 4]>,
        inaccessible: SmallVec<[SymbolId; 4]>,
    ) -> Self {
        if viable.is_empty() {
            if inaccessible.is_empty() {
                return Self::empty();
            }
            let symbol = inaccessible[0];
            return Self {
                kind: LookupResultKind::Inaccessible,
                symbols: inaccessible,
                diagnostic: Some(LookupDiagnostic::Inaccessible { symbol }),
            };
        }
        Self::from_viable(arena, viable)
    }

    fn from_viable(arena: &SymbolArena, symbols: SmallVec<[SymbolId; 4]>) -> Self {
        let (kind, diagnostic) = classify_viable(arena, &symbols);
        Self {
            kind,
            symbols,
            diagnostic,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kind == LookupResultKind::Empty
    }

    /// Saturated with at least one unambiguous viable candidate.
    #[inline]
    pub fn is_multi_viable(&self) -> bool {
        matches!(
            self.kind,
            LookupResultKind::Viable | LookupResultKind::MultiViable
        )
    }

    pub fn contains(&self, symbol: SymbolId) -> bool {
        self.symbols.contains(&symbol)
    }

    pub fn clear(&mut self) {
        *self = Self::empty();
    }

    /// Merge a result from an outer scope.
    pub fn merge_equal(&mut self, arena: &SymbolArena, other: LookupResult) {
        let (own, theirs) = (self.kind.rank(), other.kind.rank());
        if theirs > own {
            *self = other;
        } else if theirs == own && !other.is_empty() {
            for symbol in other.symbols {
                if !self.symbols.contains(&symbol) {
                    self.symbols.push(symbol);
                }
            }
            if self.is_multi_viable() {
                let symbols = std::mem::take(&mut self.symbols);
                *self = Self::from_viable(arena, symbols);
            }
        }
    }

    /// Replace the contents with a set of viable symbols.
    pub fn replace_with(&mut self, arena: &SymbolArena, symbols: SmallVec<[SymbolId; 4]>) {
        *self = if symbols.is_empty() {
            Self::empty()
        } else {
            Self::from_viable(arena, symbols)
        };
    }

    /// A non-empty kind must carry symbols.
    pub fn validate(&self) {
        debug_assert!(
            self.is_empty() == self.symbols.is_empty(),
            "lookup result kind {:?} inconsistent with {} symbols",
            self.kind,
            self.symbols.len()
        );
    }
}

fn classify_viable(
    arena: &SymbolArena,
    symbols: &[SymbolId],
) -> (LookupResultKind, Option<LookupDiagnostic>) {
    match symbols {
        [] => (LookupResultKind::Empty, None),
        [_] => (LookupResultKind::Viable, None),
        [first, second, ..] => {
            let all_methods = symbols
                .iter()
                .all(|&id| arena.get(id).is_some_and(|symbol| symbol.is_method()));
            if all_methods {
                (LookupResultKind::MultiViable, None)
            } else {
                (
                    LookupResultKind::Ambiguous,
                    Some(LookupDiagnostic::Ambiguous {
                        first: *first,
                        second: *second,
                    }),
                )
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/lookup_result_tests.rs"]
mod tests;
