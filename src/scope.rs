use std::fmt;

use indexmap::IndexMap;

use crate::symbol::SymbolId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Module,
    MainProgram,
    Subprogram,
    DerivedType,
    Block,
    ImpliedDos,
}

impl ScopeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeKind::Global => "Global",
            ScopeKind::Module => "Module",
            ScopeKind::MainProgram => "MainProgram",
            ScopeKind::Subprogram => "Subprogram",
            ScopeKind::DerivedType => "DerivedType",
            ScopeKind::Block => "Block",
            ScopeKind::ImpliedDos => "ImpliedDos",
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A node in the declaration-nesting tree. Owns the symbols declared
/// directly in it (by id, in declaration order) and its child scopes.
/// Identity is positional: anonymous scopes are named only at dump time.
#[derive(Debug, Clone)]
pub struct Scope {
    id: ScopeId,
    kind: ScopeKind,
    parent: Option<ScopeId>,
    children: Vec<ScopeId>,
    symbols: IndexMap<String, SymbolId>,
    symbol: Option<SymbolId>,
}

impl Scope {
    pub(crate) fn new(id: ScopeId, kind: ScopeKind, parent: Option<ScopeId>) -> Self {
        Self {
            id,
            kind,
            parent,
            children: Vec::new(),
            symbols: IndexMap::new(),
            symbol: None,
        }
    }

    pub fn id(&self) -> ScopeId {
        self.id
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }

    pub fn children(&self) -> &[ScopeId] {
        &self.children
    }

    /// The symbol that introduced this scope (module, subprogram, or
    /// derived type), if any. Non-owning back-reference.
    pub fn symbol(&self) -> Option<SymbolId> {
        self.symbol
    }

    pub fn find(&self, name: &str) -> Option<SymbolId> {
        self.symbols.get(name).copied()
    }

    /// Symbols declared directly in this scope, in declaration order.
    pub fn symbols(&self) -> impl Iterator<Item = (&str, SymbolId)> {
        self.symbols.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub(crate) fn add_child(&mut self, child: ScopeId) {
        self.children.push(child);
    }

    pub(crate) fn insert(&mut self, name: String, symbol: SymbolId) {
        self.symbols.insert(name, symbol);
    }

    pub(crate) fn set_symbol(&mut self, symbol: SymbolId) {
        self.symbol = Some(symbol);
    }
}

#[cfg(test)]
#[path = "tests/t_scope.rs"]
mod tests;
