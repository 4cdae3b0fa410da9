use super::*;
use crate::symbols::{Symbol, symbol_flags};
use smallvec::smallvec;

fn arena_with(flags: &[u32]) -> (SymbolArena, Vec<SymbolId>) {
    let mut arena = SymbolArena::new();
    let ids = flags
        .iter()
        .enumerate()
        .map(|(i, &f)| arena.alloc(Symbol::new(&format!("s{i}"), f)))
        .collect();
    (arena, ids)
}

#[test]
fn test_single_viable_symbol() {
    let (arena, ids) = arena_with(&[symbol_flags::FIELD]);
    let result = LookupResult::from_candidates(&arena, smallvec![ids[0]], smallvec![]);
    assert_eq!(result.kind, LookupResultKind::Viable);
    assert!(result.is_multi_viable());
    result.validate();
}

#[test]
fn test_methods_form_multi_viable_group() {
    let (arena, ids) = arena_with(&[symbol_flags::METHOD, symbol_flags::METHOD]);
    let result = LookupResult::from_candidates(&arena, smallvec![ids[0], ids[1]], smallvec![]);
    assert_eq!(result.kind, LookupResultKind::MultiViable);
    assert_eq!(result.diagnostic, None);
}

#[test]
fn test_mixed_symbols_are_ambiguous() {
    let (arena, ids) = arena_with(&[symbol_flags::FIELD, symbol_flags::CLASS]);
    let result = LookupResult::from_candidates(&arena, smallvec![ids[0], ids[1]], smallvec![]);
    assert_eq!(result.kind, LookupResultKind::Ambiguous);
    assert_eq!(
        result.diagnostic,
        Some(LookupDiagnostic::Ambiguous {
            first: ids[0],
            second: ids[1]
        })
    );
    assert!(!result.is_multi_viable());
}

#[test]
fn test_inaccessible_only() {
    let (arena, ids) = arena_with(&[symbol_flags::FIELD]);
    let result = LookupResult::from_candidates(&arena, smallvec![], smallvec![ids[0]]);
    assert_eq!(result.kind, LookupResultKind::Inaccessible);
    assert_eq!(
        result.diagnostic,
        Some(LookupDiagnostic::Inaccessible { symbol: ids[0] })
    );
}

#[test]
fn test_merge_higher_rank_replaces() {
    let (arena, ids) = arena_with(&[symbol_flags::FIELD, symbol_flags::METHOD]);
    let mut result = LookupResult::from_candidates(&arena, smallvec![], smallvec![ids[0]]);
    let viable = LookupResult::from_candidates(&arena, smallvec![ids[1]], smallvec![]);
    result.merge_equal(&arena, viable);
    assert_eq!(result.kind, LookupResultKind::Viable);
    assert_eq!(result.symbols.as_slice(), &[ids[1]]);
}

#[test]
fn test_merge_lower_rank_is_ignored() {
    let (arena, ids) = arena_with(&[symbol_flags::METHOD, symbol_flags::FIELD]);
    let mut result = LookupResult::from_candidates(&arena, smallvec![ids[0]], smallvec![]);
    let inaccessible = LookupResult::from_candidates(&arena, smallvec![], smallvec![ids[1]]);
    result.merge_equal(&arena, inaccessible);
    assert_eq!(result.symbols.as_slice(), &[ids[0]]);
}

#[test]
fn test_merge_equal_rank_unions_without_duplicates() {
    let (arena, ids) = arena_with(&[symbol_flags::FIELD, symbol_flags::FIELD]);
    let mut result = LookupResult::from_candidates(&arena, smallvec![], smallvec![ids[0]]);
    result.merge_equal(
        &arena,
        LookupResult::from_candidates(&arena, smallvec![], smallvec![ids[0], ids[1]]),
    );
    assert_eq!(result.kind, LookupResultKind::Inaccessible);
    assert_eq!(result.symbols.as_slice(), &[ids[0], ids[1]]);
}

#[test]
fn test_replace_with_empty_clears() {
    let (arena, ids) = arena_with(&[symbol_flags::METHOD]);
    let mut result = LookupResult::from_candidates(&arena, smallvec![ids[0]], smallvec![]);
    result.replace_with(&arena, smallvec![]);
    assert!(result.is_empty());
    result.validate();
}
