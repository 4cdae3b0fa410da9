//! Types, conversions and overload tie-breaking for the xbase compiler core.
//!
//! - `types` - `TypeId`, `TypeData` and the deduplicating `TypeTable`
//! - `type_queries` - predicates over types
//! - `type_classifier` - single-lookup `TypeClassification`
//! - `expr` - the bound-expression arena
//! - `annotations` - the expression annotation side-table
//! - `conversions` - `ConversionClassifier` and its dialect rules
//! - `signatures` - candidate member signatures
//! - `tie_break` - the overload tie-breaker cascade

pub mod annotations;
pub mod conversions;
pub mod expr;
pub mod signatures;
pub mod tie_break;
pub mod type_classifier;
pub mod type_queries;
pub mod types;

pub use annotations::{AnnotationTable, ExprAnnotations};
pub use conversions::{
    Classification, Conversion, ConversionClassifier, ConversionMode, ConversionQuery,
    CoreConversions, RuleOutcome, StandardConversions, largest_operand_type, natural_literal_type,
};
pub use expr::{BinaryOp, ConstantValue, ExprArena, ExprIndex, ExprKind, ExprNode, UnaryOp};
pub use signatures::{CandidateMember, MemberKind, ParamInfo, RefKind, SignatureTable};
pub use tie_break::{BetterResult, CallArgument, TieBreakContext, TieBreakResult, TieBreaker};
pub use type_classifier::{TypeClassification, classify_type};
pub use types::{
    ConversionOperator, LegacyType, SpecialType, TypeBuilder, TypeData, TypeId, TypeKind,
    TypeTable, well_known_operators,
};
