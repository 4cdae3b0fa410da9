//! Single-lookup type classification.
//!
//! The conversion rules ask several questions about the same pair of types.
//! `classify_type` answers the coarse category once; the rule tables match
//! on the pair of classifications before falling back to the finer
//! predicates in [`crate::type_queries`].

use crate::types::{LegacyType, SpecialType, TypeData, TypeId, TypeKind, TypeTable};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeClassification {
    // =========================================================================
    // Framework primitives
    // =========================================================================
    Boolean,
    Char,
    /// Fixed-size integral with its signedness and width in bytes.
    Integral { signed: bool, size: u32 },
    /// `IntPtr` / `UIntPtr`.
    NativeInteger { signed: bool },
    Floating { size: u32 },
    Decimal,
    String,
    Object,
    Void,

    // =========================================================================
    // Legacy runtime
    // =========================================================================
    Usual,
    Psz,
    LegacyFloat,
    LegacyDate,
    LegacySymbol,
    Currency,

    // =========================================================================
    // Shapes
    // =========================================================================
    Enum { underlying: TypeId },
    Pointer { pointee: TypeId },
    Array { element: TypeId },
    Delegate { params: u32 },
    Interface,
    /// Any other class, including `CODEBLOCK` and `ARRAY`.
    Class,
    /// Any other struct.
    Struct { raw_layout: bool },
    Null,
    Error,
    /// Id missing from the table.
    Unknown,
}

impl TypeClassification {
    pub const fn is_integral(self) -> bool {
        matches!(
            self,
            TypeClassification::Integral { .. } | TypeClassification::NativeInteger { .. }
        )
    }

    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            TypeClassification::Integral { .. }
                | TypeClassification::NativeInteger { .. }
                | TypeClassification::Floating { .. }
                | TypeClassification::Decimal
        )
    }

    /// Legacy value wrappers that only convert through their operators.
    pub const fn is_legacy_value(self) -> bool {
        matches!(
            self,
            TypeClassification::Usual
                | TypeClassification::Psz
                | TypeClassification::LegacyFloat
                | TypeClassification::LegacyDate
                | TypeClassification::LegacySymbol
                | TypeClassification::Currency
        )
    }
}

/// Classify `id` with a single table lookup.
pub fn classify_type(types: &TypeTable, id: TypeId) -> TypeClassification {
    let Some(data) = types.get(id) else {
        return TypeClassification::Unknown;
    };
    match data.legacy {
        LegacyType::Usual => return TypeClassification::Usual,
        LegacyType::Psz => return TypeClassification::Psz,
        LegacyType::Float => return TypeClassification::LegacyFloat,
        LegacyType::Date => return TypeClassification::LegacyDate,
        LegacyType::Symbol => return TypeClassification::LegacySymbol,
        LegacyType::Currency => return TypeClassification::Currency,
        LegacyType::None | LegacyType::Codeblock | LegacyType::Array => {}
    }
    match data.special {
        SpecialType::Boolean => TypeClassification::Boolean,
        SpecialType::Char => TypeClassification::Char,
        SpecialType::SByte | SpecialType::Int16 | SpecialType::Int32 | SpecialType::Int64 => {
            TypeClassification::Integral {
                signed: true,
                size: data.size,
            }
        }
        SpecialType::Byte | SpecialType::UInt16 | SpecialType::UInt32 | SpecialType::UInt64 => {
            TypeClassification::Integral {
                signed: false,
                size: data.size,
            }
        }
        SpecialType::IntPtr => TypeClassification::NativeInteger { signed: true },
        SpecialType::UIntPtr => TypeClassification::NativeInteger { signed: false },
        SpecialType::Single | SpecialType::Double => TypeClassification::Floating { size: data.size },
        SpecialType::Decimal => TypeClassification::Decimal,
        SpecialType::String => TypeClassification::String,
        SpecialType::Object => TypeClassification::Object,
        SpecialType::Void => TypeClassification::Void,
        SpecialType::DateTime | SpecialType::None => classify_shape(data),
    }
}

fn classify_shape(data: &TypeData) -> TypeClassification {
    match data.kind {
        TypeKind::Class => TypeClassification::Class,
        TypeKind::Struct => TypeClassification::Struct {
            raw_layout: data.raw_layout,
        },
        TypeKind::Enum { underlying } => TypeClassification::Enum { underlying },
        TypeKind::Interface => TypeClassification::Interface,
        TypeKind::Pointer { pointee } => TypeClassification::Pointer { pointee },
        TypeKind::Array { element } => TypeClassification::Array { element },
        TypeKind::Delegate { params } => TypeClassification::Delegate { params },
        TypeKind::Null => TypeClassification::Null,
        TypeKind::Error => TypeClassification::Error,
    }
}
