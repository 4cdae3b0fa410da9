//! Bound-expression arena.
//!
//! Expressions are appended bottom-up; adding a node records it as the
//! parent of its children. Nodes never change after they are added.

use smallvec::SmallVec;
use xbase_binder::SymbolId;
use xbase_common::Span;
use xbase_common::limits::MAX_PARENT_WALK;

use crate::types::TypeId;

/// Index of a bound expression in its [`ExprArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprIndex(pub u32);

#[derive(Clone, Debug, PartialEq)]
pub enum ConstantValue {
    Null,
    Bool(bool),
    Char(char),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
}

impl ConstantValue {
    /// Integral value, for the literal-fit checks.
    pub fn as_i128(&self) -> Option<i128> {
        match *self {
            ConstantValue::Int(v) => Some(i128::from(v)),
            ConstantValue::UInt(v) => Some(i128::from(v)),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    And,
    Or,
}

impl BinaryOp {
    /// Operators whose result type follows their operand types.
    pub const fn is_arithmetic_or_bitwise(self) -> bool {
        matches!(
            self,
            BinaryOp::Add
                | BinaryOp::Subtract
                | BinaryOp::Multiply
                | BinaryOp::Divide
                | BinaryOp::Modulo
                | BinaryOp::BitAnd
                | BinaryOp::BitOr
                | BinaryOp::BitXor
                | BinaryOp::ShiftLeft
                | BinaryOp::ShiftRight
        )
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "~",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::And => ".AND.",
            BinaryOp::Or => ".OR.",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Negate,
    Not,
    BitNot,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Literal(ConstantValue),
    /// Addressable storage: local, parameter, field or global.
    Variable { symbol: Option<SymbolId> },
    Binary {
        op: BinaryOp,
        left: ExprIndex,
        right: ExprIndex,
    },
    Unary { op: UnaryOp, operand: ExprIndex },
    Conditional {
        condition: ExprIndex,
        when_true: ExprIndex,
        when_false: ExprIndex,
    },
    Conversion { operand: ExprIndex, explicit: bool },
    /// Dialect cast syntax `TYPE(expr)`, distinct from a standard cast.
    LegacyCast { operand: ExprIndex },
    Assignment { target: ExprIndex, value: ExprIndex },
    Call { arguments: SmallVec<[ExprIndex; 4]> },
    Lambda { params: u32, typed: bool },
}

impl ExprKind {
    fn children(&self) -> SmallVec<[ExprIndex; 4]> {
        match self {
            ExprKind::Literal(_) | ExprKind::Variable { .. } | ExprKind::Lambda { .. } => {
                SmallVec::new()
            }
            ExprKind::Binary { left, right, .. } => SmallVec::from_slice(&[*left, *right]),
            ExprKind::Unary { operand, .. }
            | ExprKind::Conversion { operand, .. }
            | ExprKind::LegacyCast { operand } => SmallVec::from_slice(&[*operand]),
            ExprKind::Conditional {
                condition,
                when_true,
                when_false,
            } => SmallVec::from_slice(&[*condition, *when_true, *when_false]),
            ExprKind::Assignment { target, value } => SmallVec::from_slice(&[*target, *value]),
            ExprKind::Call { arguments } => arguments.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprNode {
    pub kind: ExprKind,
    pub type_id: TypeId,
    pub span: Span,
    pub parent: Option<ExprIndex>,
    /// Synthesized by the compiler; advisory warnings are suppressed.
    pub compiler_generated: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ExprArena {
    nodes: Vec<ExprNode>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and adopt its children.
    pub fn add(&mut self, kind: ExprKind, type_id: TypeId, span: Span) -> ExprIndex {
        self.add_node(kind, type_id, span, false)
    }

    /// Append a compiler-synthesized node.
    pub fn add_generated(&mut self, kind: ExprKind, type_id: TypeId, span: Span) -> ExprIndex {
        self.add_node(kind, type_id, span, true)
    }

    fn add_node(
        &mut self,
        kind: ExprKind,
        type_id: TypeId,
        span: Span,
        compiler_generated: bool,
    ) -> ExprIndex {
        let index = ExprIndex(self.nodes.len() as u32);
        for child in kind.children() {
            if let Some(node) = self.nodes.get_mut(child.0 as usize) {
                debug_assert!(node.parent.is_none(), "expression {child:?} adopted twice");
                node.parent = Some(index);
            }
        }
        self.nodes.push(ExprNode {
            kind,
            type_id,
            span,
            parent: None,
            compiler_generated,
        });
        index
    }

    // =========================================================================
    // Builders
    // =========================================================================

    pub fn literal(&mut self, value: ConstantValue, type_id: TypeId) -> ExprIndex {
        self.add(ExprKind::Literal(value), type_id, Span::DUMMY)
    }

    pub fn variable(&mut self, type_id: TypeId) -> ExprIndex {
        self.add(ExprKind::Variable { symbol: None }, type_id, Span::DUMMY)
    }

    pub fn binary(
        &mut self,
        op: BinaryOp,
        left: ExprIndex,
        right: ExprIndex,
        type_id: TypeId,
    ) -> ExprIndex {
        self.add(ExprKind::Binary { op, left, right }, type_id, Span::DUMMY)
    }

    pub fn legacy_cast(&mut self, operand: ExprIndex, type_id: TypeId) -> ExprIndex {
        self.add(ExprKind::LegacyCast { operand }, type_id, Span::DUMMY)
    }

    pub fn assignment(&mut self, target: ExprIndex, value: ExprIndex) -> ExprIndex {
        let type_id = self.type_of(target);
        self.add(ExprKind::Assignment { target, value }, type_id, Span::DUMMY)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[inline]
    pub fn get(&self, index: ExprIndex) -> Option<&ExprNode> {
        self.nodes.get(index.0 as usize)
    }

    pub fn kind(&self, index: ExprIndex) -> Option<&ExprKind> {
        self.get(index).map(|node| &node.kind)
    }

    /// Static type; `TypeId::ERROR` for unknown indices.
    pub fn type_of(&self, index: ExprIndex) -> TypeId {
        self.get(index).map_or(TypeId::ERROR, |node| node.type_id)
    }

    pub fn parent(&self, index: ExprIndex) -> Option<ExprIndex> {
        self.get(index).and_then(|node| node.parent)
    }

    pub fn is_literal(&self, index: ExprIndex) -> bool {
        matches!(self.kind(index), Some(ExprKind::Literal(_)))
    }

    pub fn is_null_literal(&self, index: ExprIndex) -> bool {
        matches!(self.kind(index), Some(ExprKind::Literal(ConstantValue::Null)))
    }

    pub fn is_addressable(&self, index: ExprIndex) -> bool {
        matches!(self.kind(index), Some(ExprKind::Variable { .. }))
    }

    pub fn is_conditional(&self, index: ExprIndex) -> bool {
        matches!(self.kind(index), Some(ExprKind::Conditional { .. }))
    }

    /// Whether `index` is the operand of a legacy cast.
    pub fn is_legacy_cast_operand(&self, index: ExprIndex) -> bool {
        self.parent(index)
            .is_some_and(|parent| matches!(self.kind(parent), Some(ExprKind::LegacyCast { .. })))
    }

    /// Constant value of a literal, looking through implicit conversions.
    pub fn constant_value(&self, index: ExprIndex) -> Option<&ConstantValue> {
        let mut current = index;
        for _ in 0..MAX_PARENT_WALK {
            match self.kind(current)? {
                ExprKind::Literal(value) => return Some(value),
                ExprKind::Conversion {
                    operand,
                    explicit: false,
                } => current = *operand,
                _ => return None,
            }
        }
        None
    }

    /// Whether warnings for this expression are suppressed: the node, or a
    /// node it wraps through conversions, is compiler-generated.
    pub fn suppresses_warnings(&self, index: ExprIndex) -> bool {
        let mut current = index;
        for _ in 0..MAX_PARENT_WALK {
            let Some(node) = self.get(current) else {
                return false;
            };
            if node.compiler_generated {
                return true;
            }
            match node.kind {
                ExprKind::Conversion { operand, .. } => current = operand,
                _ => return false,
            }
        }
        false
    }

    /// Assignment whose value is `index`, seen through enclosing conversions.
    pub fn enclosing_assignment(&self, index: ExprIndex) -> Option<ExprIndex> {
        let mut current = index;
        for _ in 0..MAX_PARENT_WALK {
            let parent = self.parent(current)?;
            match self.kind(parent)? {
                ExprKind::Conversion { .. } => current = parent,
                ExprKind::Assignment { value, .. } if *value == current => return Some(parent),
                _ => return None,
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/expr_tests.rs"]
mod tests;
