//! Type table.
//!
//! Types are registered once and never change afterwards. Registration is
//! deduplicated on name and shape, so `TypeId` equality is type identity.
//! Well-known types occupy fixed ids below [`TypeId::FIRST_USER`].

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;
use xbase_binder::SymbolId;
use xbase_common::DialectOptions;

// =============================================================================
// TypeId
// =============================================================================

/// Identity of a registered type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const ERROR: TypeId = TypeId(0);
    pub const OBJECT: TypeId = TypeId(1);
    pub const BOOLEAN: TypeId = TypeId(2);
    pub const CHAR: TypeId = TypeId(3);
    pub const SBYTE: TypeId = TypeId(4);
    pub const BYTE: TypeId = TypeId(5);
    pub const INT16: TypeId = TypeId(6);
    pub const UINT16: TypeId = TypeId(7);
    pub const INT32: TypeId = TypeId(8);
    pub const UINT32: TypeId = TypeId(9);
    pub const INT64: TypeId = TypeId(10);
    pub const UINT64: TypeId = TypeId(11);
    pub const INTPTR: TypeId = TypeId(12);
    pub const UINTPTR: TypeId = TypeId(13);
    pub const SINGLE: TypeId = TypeId(14);
    pub const DOUBLE: TypeId = TypeId(15);
    pub const DECIMAL: TypeId = TypeId(16);
    pub const STRING: TypeId = TypeId(17);
    pub const VOID: TypeId = TypeId(18);
    pub const DATETIME: TypeId = TypeId(19);

    // Legacy runtime types
    pub const USUAL: TypeId = TypeId(20);
    pub const PSZ: TypeId = TypeId(21);
    pub const FLOAT: TypeId = TypeId(22);
    pub const DATE: TypeId = TypeId(23);
    pub const SYMBOL: TypeId = TypeId(24);
    pub const CURRENCY: TypeId = TypeId(25);
    pub const CODEBLOCK: TypeId = TypeId(26);
    pub const ARRAY: TypeId = TypeId(27);

    /// `void*`
    pub const VOID_POINTER: TypeId = TypeId(28);
    /// `USUAL[]`, the variadic-arguments array of clipper calling convention.
    pub const USUAL_ARRAY: TypeId = TypeId(29);
    /// `OBJECT[]`
    pub const OBJECT_ARRAY: TypeId = TypeId(30);
    pub const FORMAT_PROVIDER: TypeId = TypeId(31);
    /// Type of the `NULL` literal.
    pub const NULL: TypeId = TypeId(32);

    pub const FIRST_USER: u32 = 33;

    #[inline]
    pub const fn is_well_known(self) -> bool {
        self.0 < Self::FIRST_USER
    }
}

/// Synthesized symbols of the runtime's implicit operators into `USUAL`.
pub mod well_known_operators {
    use xbase_binder::SymbolId;

    /// `USUAL.op_Implicit(OBJECT) AS USUAL`
    pub const USUAL_FROM_OBJECT: SymbolId = SymbolId(u32::MAX - 1);
    pub const USUAL_FROM_LOGIC: SymbolId = SymbolId(u32::MAX - 2);
    pub const USUAL_FROM_LONG: SymbolId = SymbolId(u32::MAX - 3);
    pub const USUAL_FROM_INT64: SymbolId = SymbolId(u32::MAX - 4);
    pub const USUAL_FROM_REAL8: SymbolId = SymbolId(u32::MAX - 5);
    pub const USUAL_FROM_STRING: SymbolId = SymbolId(u32::MAX - 6);
    pub const USUAL_FROM_DATE: SymbolId = SymbolId(u32::MAX - 7);
    pub const USUAL_FROM_FLOAT: SymbolId = SymbolId(u32::MAX - 8);
    pub const USUAL_FROM_SYMBOL: SymbolId = SymbolId(u32::MAX - 9);
}

// =============================================================================
// Type Data
// =============================================================================

/// Framework type tag.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SpecialType {
    #[default]
    None,
    Object,
    Boolean,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    IntPtr,
    UIntPtr,
    Single,
    Double,
    Decimal,
    String,
    Void,
    DateTime,
}

/// Legacy runtime type tag.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LegacyType {
    #[default]
    None,
    Usual,
    Psz,
    Float,
    Date,
    Symbol,
    Currency,
    Codeblock,
    Array,
}

/// Shape of a type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Enum { underlying: TypeId },
    Interface,
    Pointer { pointee: TypeId },
    Array { element: TypeId },
    Delegate { params: u32 },
    Null,
    Error,
}

impl TypeKind {
    #[inline]
    pub const fn is_value_type(self) -> bool {
        matches!(self, TypeKind::Struct | TypeKind::Enum { .. })
    }

    #[inline]
    pub const fn is_reference_type(self) -> bool {
        matches!(
            self,
            TypeKind::Class | TypeKind::Interface | TypeKind::Array { .. } | TypeKind::Delegate { .. }
        )
    }
}

/// A user-defined conversion operator declared on a type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConversionOperator {
    pub symbol: SymbolId,
    pub parameter: TypeId,
    pub result: TypeId,
    pub is_implicit: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeData {
    pub name: String,
    pub kind: TypeKind,
    pub special: SpecialType,
    pub legacy: LegacyType,
    /// Size in bytes, 0 when not meaningful.
    pub size: u32,
    /// Value type whose layout is a plain block of bytes (`VOSTRUCT`, unions).
    pub raw_layout: bool,
    pub base: Option<TypeId>,
    pub interfaces: SmallVec<[TypeId; 2]>,
    pub operators: Vec<ConversionOperator>,
}

impl TypeData {
    #[inline]
    pub const fn is_value_type(&self) -> bool {
        self.kind.is_value_type()
    }

    #[inline]
    pub const fn is_reference_type(&self) -> bool {
        self.kind.is_reference_type()
    }
}

// =============================================================================
// TypeBuilder
// =============================================================================

/// Description of a user type to register.
#[derive(Clone, Debug)]
pub struct TypeBuilder {
    data: TypeData,
}

impl TypeBuilder {
    fn with_kind(name: &str, kind: TypeKind) -> Self {
        Self {
            data: TypeData {
                name: name.to_string(),
                kind,
                special: SpecialType::None,
                legacy: LegacyType::None,
                size: 0,
                raw_layout: false,
                base: None,
                interfaces: SmallVec::new(),
                operators: Vec::new(),
            },
        }
    }

    /// Class deriving from `OBJECT` unless [`TypeBuilder::base`] says otherwise.
    pub fn class(name: &str) -> Self {
        Self::with_kind(name, TypeKind::Class).base(TypeId::OBJECT)
    }

    pub fn structure(name: &str, size: u32) -> Self {
        let mut builder = Self::with_kind(name, TypeKind::Struct);
        builder.data.size = size;
        builder
    }

    pub fn enumeration(name: &str, underlying: TypeId) -> Self {
        Self::with_kind(name, TypeKind::Enum { underlying })
    }

    pub fn interface(name: &str) -> Self {
        Self::with_kind(name, TypeKind::Interface)
    }

    pub fn delegate(name: &str, params: u32) -> Self {
        Self::with_kind(name, TypeKind::Delegate { params }).base(TypeId::OBJECT)
    }

    #[must_use]
    pub fn base(mut self, base: TypeId) -> Self {
        self.data.base = Some(base);
        self
    }

    #[must_use]
    pub fn implements(mut self, interface: TypeId) -> Self {
        if !self.data.interfaces.contains(&interface) {
            self.data.interfaces.push(interface);
        }
        self
    }

    #[must_use]
    pub fn raw_layout(mut self) -> Self {
        self.data.raw_layout = true;
        self
    }

    #[must_use]
    pub fn operator(mut self, operator: ConversionOperator) -> Self {
        self.data.operators.push(operator);
        self
    }

    #[must_use]
    fn special(mut self, special: SpecialType, size: u32) -> Self {
        self.data.special = special;
        self.data.size = size;
        self
    }

    #[must_use]
    fn legacy(mut self, legacy: LegacyType) -> Self {
        self.data.legacy = legacy;
        self
    }
}

// =============================================================================
// TypeTable
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct TypeKey {
    name: String,
    kind: TypeKind,
}

/// Immutable-after-construction registry of types.
#[derive(Clone, Debug)]
pub struct TypeTable {
    types: Vec<TypeData>,
    by_key: FxHashMap<TypeKey, TypeId>,
    pointer_size: u32,
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeTable {
    /// Table with the well-known types for 64-bit targets.
    pub fn new() -> Self {
        Self::with_pointer_size(8)
    }

    /// Table sized for the platform named by `options.pointer_size`.
    pub fn for_options(options: &DialectOptions) -> Self {
        Self::with_pointer_size(options.pointer_size)
    }

    pub fn with_pointer_size(pointer_size: u8) -> Self {
        let mut table = Self {
            types: Vec::with_capacity(TypeId::FIRST_USER as usize + 16),
            by_key: FxHashMap::default(),
            pointer_size: u32::from(pointer_size),
        };
        table.register_well_known();
        debug_assert_eq!(table.types.len(), TypeId::FIRST_USER as usize);
        table
    }

    fn register_well_known(&mut self) {
        let ptr = self.pointer_size;
        let primitive = |name: &str, special: SpecialType, size: u32| {
            TypeBuilder::structure(name, size).special(special, size)
        };

        self.push(TypeBuilder::with_kind("<error>", TypeKind::Error));
        self.push(TypeBuilder::with_kind("OBJECT", TypeKind::Class).special(SpecialType::Object, 0));
        self.push(primitive("LOGIC", SpecialType::Boolean, 1));
        self.push(primitive("CHAR", SpecialType::Char, 2));
        self.push(primitive("SBYTE", SpecialType::SByte, 1));
        self.push(primitive("BYTE", SpecialType::Byte, 1));
        self.push(primitive("SHORT", SpecialType::Int16, 2));
        self.push(primitive("WORD", SpecialType::UInt16, 2));
        self.push(primitive("LONG", SpecialType::Int32, 4));
        self.push(primitive("DWORD", SpecialType::UInt32, 4));
        self.push(primitive("INT64", SpecialType::Int64, 8));
        self.push(primitive("UINT64", SpecialType::UInt64, 8));
        self.push(primitive("IntPtr", SpecialType::IntPtr, ptr));
        self.push(primitive("UIntPtr", SpecialType::UIntPtr, ptr));
        self.push(primitive("REAL4", SpecialType::Single, 4));
        self.push(primitive("REAL8", SpecialType::Double, 8));
        self.push(primitive("DECIMAL", SpecialType::Decimal, 16));
        self.push(TypeBuilder::class("STRING").special(SpecialType::String, 0));
        self.push(primitive("VOID", SpecialType::Void, 0));
        self.push(primitive("DateTime", SpecialType::DateTime, 8));

        let usual = [
            (well_known_operators::USUAL_FROM_OBJECT, TypeId::OBJECT),
            (well_known_operators::USUAL_FROM_LOGIC, TypeId::BOOLEAN),
            (well_known_operators::USUAL_FROM_LONG, TypeId::INT32),
            (well_known_operators::USUAL_FROM_INT64, TypeId::INT64),
            (well_known_operators::USUAL_FROM_REAL8, TypeId::DOUBLE),
            (well_known_operators::USUAL_FROM_STRING, TypeId::STRING),
            (well_known_operators::USUAL_FROM_DATE, TypeId::DATE),
            (well_known_operators::USUAL_FROM_FLOAT, TypeId::FLOAT),
            (well_known_operators::USUAL_FROM_SYMBOL, TypeId::SYMBOL),
        ]
        .into_iter()
        .fold(
            TypeBuilder::structure("USUAL", 16).legacy(LegacyType::Usual),
            |builder, (symbol, parameter)| {
                builder.operator(ConversionOperator {
                    symbol,
                    parameter,
                    result: TypeId::USUAL,
                    is_implicit: true,
                })
            },
        );
        self.push(usual);
        self.push(TypeBuilder::structure("PSZ", ptr).legacy(LegacyType::Psz));
        self.push(TypeBuilder::structure("FLOAT", 16).legacy(LegacyType::Float));
        self.push(TypeBuilder::structure("DATE", 4).legacy(LegacyType::Date));
        self.push(TypeBuilder::structure("SYMBOL", 4).legacy(LegacyType::Symbol));
        self.push(TypeBuilder::structure("CURRENCY", 8).legacy(LegacyType::Currency));
        self.push(TypeBuilder::class("CODEBLOCK").legacy(LegacyType::Codeblock));
        self.push(TypeBuilder::class("ARRAY").legacy(LegacyType::Array));

        self.push(
            TypeBuilder::with_kind("VOID*", TypeKind::Pointer { pointee: TypeId::VOID })
                .special(SpecialType::None, ptr),
        );
        self.push(
            TypeBuilder::with_kind(
                "USUAL[]",
                TypeKind::Array {
                    element: TypeId::USUAL,
                },
            )
            .base(TypeId::OBJECT),
        );
        self.push(
            TypeBuilder::with_kind(
                "OBJECT[]",
                TypeKind::Array {
                    element: TypeId::OBJECT,
                },
            )
            .base(TypeId::OBJECT),
        );
        self.push(TypeBuilder::interface("IFormatProvider"));
        self.push(TypeBuilder::with_kind("NULL", TypeKind::Null));
    }

    fn push(&mut self, builder: TypeBuilder) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        let key = TypeKey {
            name: builder.data.name.clone(),
            kind: builder.data.kind,
        };
        self.by_key.insert(key, id);
        self.types.push(builder.data);
        id
    }

    /// Register a user type. Registering the same name and shape again
    /// returns the existing id.
    pub fn register(&mut self, builder: TypeBuilder) -> TypeId {
        let key = TypeKey {
            name: builder.data.name.clone(),
            kind: builder.data.kind,
        };
        if let Some(&existing) = self.by_key.get(&key) {
            return existing;
        }
        let id = self.push(builder);
        trace!(type_id = id.0, name = %self.name(id), "TypeTable::register");
        id
    }

    /// `pointee*`
    pub fn pointer_to(&mut self, pointee: TypeId) -> TypeId {
        let name = format!("{}*", self.name(pointee));
        self.register(TypeBuilder::with_kind(&name, TypeKind::Pointer { pointee }).special(
            SpecialType::None,
            self.pointer_size,
        ))
    }

    /// `element[]`
    pub fn array_of(&mut self, element: TypeId) -> TypeId {
        let name = format!("{}[]", self.name(element));
        self.register(TypeBuilder::with_kind(&name, TypeKind::Array { element }).base(TypeId::OBJECT))
    }

    #[inline]
    pub fn get(&self, id: TypeId) -> Option<&TypeData> {
        self.types.get(id.0 as usize)
    }

    pub fn name(&self, id: TypeId) -> &str {
        self.get(id).map_or("<unknown>", |data| data.name.as_str())
    }

    pub fn lookup(&self, name: &str, kind: TypeKind) -> Option<TypeId> {
        self.by_key
            .get(&TypeKey {
                name: name.to_string(),
                kind,
            })
            .copied()
    }

    /// Platform pointer width in bytes.
    #[inline]
    pub const fn pointer_size(&self) -> u32 {
        self.pointer_size
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
