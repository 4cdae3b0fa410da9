//! Candidate member signatures.
//!
//! Overload resolution and the tie-breaker compare `CandidateMember`s, the
//! callable view of a method, constructor or operator symbol.

use indexmap::IndexMap;
use smallvec::SmallVec;
use xbase_binder::{AssemblyId, SymbolId};

use crate::expr::BinaryOp;
use crate::types::TypeId;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RefKind {
    #[default]
    None,
    Ref,
    Out,
    In,
}

impl RefKind {
    /// Passed by address.
    #[inline]
    pub const fn is_by_reference(self) -> bool {
        !matches!(self, RefKind::None)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParamInfo {
    pub type_id: TypeId,
    pub ref_kind: RefKind,
    /// Trailing parameter array accepting any number of arguments.
    pub is_variadic: bool,
}

impl ParamInfo {
    pub const fn value(type_id: TypeId) -> Self {
        Self {
            type_id,
            ref_kind: RefKind::None,
            is_variadic: false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Method,
    Constructor,
    BinaryOperator(BinaryOp),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateMember {
    pub symbol: SymbolId,
    pub name: String,
    pub params: SmallVec<[ParamInfo; 4]>,
    pub return_type: TypeId,
    pub kind: MemberKind,
    /// Name of the declaring type.
    pub container: String,
    pub assembly: AssemblyId,
    pub is_static: bool,
}

impl CandidateMember {
    /// Instance method of `container` in the current assembly returning `VOID`.
    pub fn method(symbol: SymbolId, name: &str, container: &str) -> Self {
        Self {
            symbol,
            name: name.to_string(),
            params: SmallVec::new(),
            return_type: TypeId::VOID,
            kind: MemberKind::Method,
            container: container.to_string(),
            assembly: AssemblyId::CURRENT,
            is_static: false,
        }
    }

    /// Static binary operator `left op right`.
    pub fn binary_operator(
        symbol: SymbolId,
        op: BinaryOp,
        container: &str,
        left: TypeId,
        right: TypeId,
        result: TypeId,
    ) -> Self {
        Self {
            name: format!("operator {}", op.symbol()),
            kind: MemberKind::BinaryOperator(op),
            return_type: result,
            is_static: true,
            ..Self::method(symbol, "", container)
        }
        .param(left)
        .param(right)
    }

    #[must_use]
    pub fn param(self, type_id: TypeId) -> Self {
        self.param_info(ParamInfo::value(type_id))
    }

    #[must_use]
    pub fn ref_param(self, type_id: TypeId, ref_kind: RefKind) -> Self {
        self.param_info(ParamInfo {
            type_id,
            ref_kind,
            is_variadic: false,
        })
    }

    /// Trailing `params` array; `array_type` is the array type itself.
    #[must_use]
    pub fn variadic(self, array_type: TypeId) -> Self {
        self.param_info(ParamInfo {
            type_id: array_type,
            ref_kind: RefKind::None,
            is_variadic: true,
        })
    }

    #[must_use]
    pub fn param_info(mut self, param: ParamInfo) -> Self {
        debug_assert!(
            !self.params.last().is_some_and(|p| p.is_variadic),
            "parameter after variadic tail"
        );
        self.params.push(param);
        self
    }

    #[must_use]
    pub fn returns(mut self, type_id: TypeId) -> Self {
        self.return_type = type_id;
        self
    }

    #[must_use]
    pub fn in_assembly(mut self, assembly: AssemblyId) -> Self {
        self.assembly = assembly;
        self
    }

    #[must_use]
    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[must_use]
    pub fn constructor(mut self) -> Self {
        self.kind = MemberKind::Constructor;
        self
    }

    #[inline]
    pub fn param_type(&self, index: usize) -> Option<TypeId> {
        self.params.get(index).map(|p| p.type_id)
    }

    pub fn is_binary_operator(&self) -> bool {
        matches!(self.kind, MemberKind::BinaryOperator(_)) && self.params.len() == 2
    }

    pub fn has_variadic_tail(&self) -> bool {
        self.params.last().is_some_and(|p| p.is_variadic)
    }
}

/// Signatures of the invocable symbols, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct SignatureTable {
    members: IndexMap<SymbolId, CandidateMember>,
}

impl SignatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `member`; a later signature for the same symbol replaces the
    /// earlier one in place.
    pub fn insert(&mut self, member: CandidateMember) {
        self.members.insert(member.symbol, member);
    }

    pub fn get(&self, symbol: SymbolId) -> Option<&CandidateMember> {
        self.members.get(&symbol)
    }

    /// Signatures for `symbols` in the given order, skipping symbols with no
    /// signature.
    pub fn candidates<'a>(&'a self, symbols: &[SymbolId]) -> Vec<&'a CandidateMember> {
        symbols.iter().filter_map(|symbol| self.get(*symbol)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateMember> {
        self.members.values()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
