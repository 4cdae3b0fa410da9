//! Lexical scope chains.

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::symbols::{SymbolId, member_key};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// Outside any type: compilation unit or namespace body.
    Namespace,
    /// Body of a type; members come from the container symbol.
    Type,
    Method,
    Block,
}

#[derive(Clone, Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    /// Namespace, type or method symbol owning this scope.
    pub container: Option<SymbolId>,
    locals: IndexMap<String, SmallVec<[SymbolId; 2]>>,
    /// Containers whose static members are visible in this scope.
    imports: Vec<SymbolId>,
}

impl Scope {
    #[inline]
    pub const fn is_outside_type(&self) -> bool {
        matches!(self.kind, ScopeKind::Namespace)
    }

    pub fn locals_named(&self, name: &str) -> &[SymbolId] {
        self.locals
            .get(&member_key(name))
            .map_or(&[], |ids| ids.as_slice())
    }

    pub fn imports(&self) -> &[SymbolId] {
        &self.imports
    }
}

#[derive(Debug, Default)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

impl ScopeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_scope(
        &mut self,
        kind: ScopeKind,
        parent: Option<ScopeId>,
        container: Option<SymbolId>,
    ) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            kind,
            parent,
            container,
            locals: IndexMap::new(),
            imports: Vec::new(),
        });
        id
    }

    pub fn add_namespace(&mut self, parent: Option<ScopeId>, namespace: Option<SymbolId>) -> ScopeId {
        self.add_scope(ScopeKind::Namespace, parent, namespace)
    }

    pub fn add_type_scope(&mut self, parent: ScopeId, type_symbol: SymbolId) -> ScopeId {
        self.add_scope(ScopeKind::Type, Some(parent), Some(type_symbol))
    }

    pub fn add_method_scope(&mut self, parent: ScopeId, method: SymbolId) -> ScopeId {
        self.add_scope(ScopeKind::Method, Some(parent), Some(method))
    }

    pub fn add_block(&mut self, parent: ScopeId) -> ScopeId {
        self.add_scope(ScopeKind::Block, Some(parent), None)
    }

    /// Declare `symbol` directly in `scope` under `name`.
    pub fn declare(&mut self, scope: ScopeId, name: &str, symbol: SymbolId) {
        if let Some(scope) = self.scopes.get_mut(scope.0 as usize) {
            scope.locals.entry(member_key(name)).or_default().push(symbol);
        }
    }

    /// Make the static members of `container` visible in `scope`.
    pub fn import_static(&mut self, scope: ScopeId, container: SymbolId) {
        if let Some(scope) = self.scopes.get_mut(scope.0 as usize)
            && !scope.imports.contains(&container)
        {
            scope.imports.push(container);
        }
    }

    #[inline]
    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0 as usize)
    }

    /// Scopes from `innermost` outward, bounded by the chain-depth limit.
    pub fn chain(&self, innermost: ScopeId) -> SmallVec<[ScopeId; 8]> {
        let mut chain = SmallVec::new();
        let mut current = Some(innermost);
        while let Some(id) = current {
            if chain.len() as u32 >= xbase_common::limits::MAX_SCOPE_CHAIN_DEPTH {
                break;
            }
            let Some(scope) = self.get(id) else {
                break;
            };
            chain.push(id);
            current = scope.parent;
        }
        chain
    }

    /// Type symbols of every type scope enclosing `scope`, innermost first.
    pub fn enclosing_types(&self, scope: ScopeId) -> SmallVec<[SymbolId; 4]> {
        self.chain(scope)
            .into_iter()
            .filter_map(|id| {
                let scope = self.get(id)?;
                match scope.kind {
                    ScopeKind::Type => scope.container,
                    _ => None,
                }
            })
            .collect()
    }
}
