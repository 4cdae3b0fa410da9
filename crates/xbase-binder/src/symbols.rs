//! Symbols and the symbol arena.
//!
//! The arena is built by the declaration pass and frozen before binding
//! starts. Member tables are insertion-ordered so every query that walks them
//! is deterministic.

use indexmap::IndexMap;
use smallvec::SmallVec;
use xbase_common::Span;

use crate::assemblies::AssemblyId;

/// Index of a symbol in its [`SymbolArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub const NONE: SymbolId = SymbolId(u32::MAX);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

/// Symbol flag bits.
pub mod symbol_flags {
    pub const NONE: u32 = 0;
    pub const NAMESPACE: u32 = 1 << 0;
    pub const CLASS: u32 = 1 << 1;
    pub const STRUCT: u32 = 1 << 2;
    pub const INTERFACE: u32 = 1 << 3;
    pub const ENUM: u32 = 1 << 4;
    pub const DELEGATE: u32 = 1 << 5;
    pub const METHOD: u32 = 1 << 6;
    pub const CONSTRUCTOR: u32 = 1 << 7;
    pub const OPERATOR: u32 = 1 << 8;
    pub const FIELD: u32 = 1 << 9;
    pub const PROPERTY: u32 = 1 << 10;
    pub const LOCAL: u32 = 1 << 11;
    pub const PARAMETER: u32 = 1 << 12;
    pub const STATIC: u32 = 1 << 13;
    /// A field, property, local or parameter whose value can be invoked
    /// (delegate or codeblock typed).
    pub const INVOCABLE_VALUE: u32 = 1 << 14;

    pub const TYPE: u32 = CLASS | STRUCT | INTERFACE | ENUM | DELEGATE;
    pub const NAMESPACE_OR_TYPE: u32 = NAMESPACE | TYPE;
    pub const MEMBER: u32 = METHOD | CONSTRUCTOR | OPERATOR | FIELD | PROPERTY;
    pub const VARIABLE: u32 = LOCAL | PARAMETER;
}

/// Declared accessibility.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Accessibility {
    #[default]
    Public,
    Internal,
    Protected,
    Private,
}

impl Accessibility {
    pub const fn as_str(self) -> &'static str {
        match self {
            Accessibility::Public => "public",
            Accessibility::Internal => "internal",
            Accessibility::Protected => "protected",
            Accessibility::Private => "private",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Symbol {
    pub name: String,
    pub flags: u32,
    pub accessibility: Accessibility,
    /// Declaring container (type or namespace).
    pub parent: Option<SymbolId>,
    pub assembly: AssemblyId,
    /// Generic type-parameter arity.
    pub arity: u32,
    /// Base type, for type symbols.
    pub base: Option<SymbolId>,
    pub span: Span,
    members: IndexMap<String, SmallVec<[SymbolId; 2]>>,
}

impl Symbol {
    pub fn new(name: &str, flags: u32) -> Self {
        Self {
            name: name.to_string(),
            flags,
            accessibility: Accessibility::Public,
            parent: None,
            assembly: AssemblyId::CURRENT,
            arity: 0,
            base: None,
            span: Span::DUMMY,
            members: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    #[must_use]
    pub fn with_assembly(mut self, assembly: AssemblyId) -> Self {
        self.assembly = assembly;
        self
    }

    #[must_use]
    pub fn with_arity(mut self, arity: u32) -> Self {
        self.arity = arity;
        self
    }

    #[must_use]
    pub fn with_base(mut self, base: SymbolId) -> Self {
        self.base = Some(base);
        self
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    #[inline]
    pub const fn has_flags(&self, flags: u32) -> bool {
        (self.flags & flags) != 0
    }

    #[inline]
    pub const fn is_method(&self) -> bool {
        self.has_flags(symbol_flags::METHOD)
    }

    #[inline]
    pub const fn is_static(&self) -> bool {
        self.has_flags(symbol_flags::STATIC)
    }

    #[inline]
    pub const fn is_field(&self) -> bool {
        self.has_flags(symbol_flags::FIELD)
    }

    #[inline]
    pub const fn is_type(&self) -> bool {
        self.has_flags(symbol_flags::TYPE)
    }

    #[inline]
    pub const fn is_invocable(&self) -> bool {
        self.has_flags(symbol_flags::METHOD | symbol_flags::INVOCABLE_VALUE)
    }

    /// Instance member: a member symbol without the static flag.
    #[inline]
    pub const fn is_instance_member(&self) -> bool {
        self.has_flags(symbol_flags::MEMBER) && !self.is_static()
    }

    /// Members declared under `name`, in declaration order.
    pub fn members_named(&self, name: &str) -> &[SymbolId] {
        self.members
            .get(&member_key(name))
            .map_or(&[], |ids| ids.as_slice())
    }

    /// All member ids, in declaration order.
    pub fn members(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.members.values().flat_map(|ids| ids.iter().copied())
    }
}

/// Member tables are keyed case-insensitively; case-sensitive dialects filter
/// on the exact name afterwards.
pub(crate) fn member_key(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Owner of every symbol of a compilation.
#[derive(Debug, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    /// Allocate `symbol` as a member of `parent`.
    pub fn declare_member(&mut self, parent: SymbolId, mut symbol: Symbol) -> SymbolId {
        symbol.parent = Some(parent);
        let key = member_key(&symbol.name);
        let id = self.alloc(symbol);
        if let Some(container) = self.symbols.get_mut(parent.0 as usize) {
            container.members.entry(key).or_default().push(id);
        }
        id
    }

    #[inline]
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    pub fn name(&self, id: SymbolId) -> &str {
        self.get(id).map_or("<unknown>", |symbol| symbol.name.as_str())
    }

    /// `Container.Name` for members, the plain name otherwise.
    pub fn qualified_name(&self, id: SymbolId) -> String {
        let Some(symbol) = self.get(id) else {
            return "<unknown>".to_string();
        };
        match symbol.parent.and_then(|parent| self.get(parent)) {
            Some(parent) if !parent.has_flags(symbol_flags::NAMESPACE) => {
                format!("{}.{}", parent.name, symbol.name)
            }
            _ => symbol.name.clone(),
        }
    }

    /// Name of the declaring container, if any.
    pub fn container_name(&self, id: SymbolId) -> Option<&str> {
        let parent = self.get(id)?.parent?;
        self.get(parent).map(|p| p.name.as_str())
    }

    /// Whether type symbol `derived` is `base` or inherits from it.
    pub fn derives_from(&self, derived: SymbolId, base: SymbolId) -> bool {
        let mut current = Some(derived);
        let mut depth = 0;
        while let Some(id) = current {
            if id == base {
                return true;
            }
            depth += 1;
            if depth > xbase_common::limits::MAX_BASE_TYPE_DEPTH {
                return false;
            }
            current = self.get(id).and_then(|symbol| symbol.base);
        }
        false
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
