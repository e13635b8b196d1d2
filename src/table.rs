//! The symbol table proper: one arena owning the scope tree and every
//! symbol, plus the refinement policy that serializes what a symbol may
//! become across repeated analysis passes.

use crate::details::Details;
use crate::diag::SourceName;
use crate::error::SymbolError;
use crate::scope::{Scope, ScopeId, ScopeKind};
use crate::symbol::{Flag, Symbol, SymbolId};
use crate::value::{ArraySpec, TypeRef};

pub struct SymbolTable {
    scopes: Vec<Scope>,
    symbols: Vec<Symbol>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new(ScopeId(0), ScopeKind::Global, None)],
            symbols: Vec::new(),
        }
    }

    pub fn global_scope(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0 as usize]
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0 as usize]
    }

    pub fn symbol_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.0 as usize]
    }

    pub fn push_scope(&mut self, parent: ScopeId, kind: ScopeKind) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(id, kind, Some(parent)));
        self.scopes[parent.0 as usize].add_child(id);
        id
    }

    /// Links a scope with the symbol that introduced it (both directions).
    /// A scope gets at most one introducing symbol.
    pub fn set_scope_symbol(
        &mut self,
        scope: ScopeId,
        symbol: SymbolId,
    ) -> Result<(), SymbolError> {
        if self.scope(scope).symbol().is_some() {
            return Err(SymbolError::ScopeSymbolAlreadySet);
        }
        self.scopes[scope.0 as usize].set_symbol(symbol);
        self.symbol_mut(symbol).set_scope(scope);
        Ok(())
    }

    /// Creates a symbol with `Unknown` details the first time `name` is
    /// declared in `scope`; later calls with the same name return the
    /// existing symbol unchanged.
    pub fn make_symbol(&mut self, scope: ScopeId, name: SourceName) -> SymbolId {
        if let Some(existing) = self.scope(scope).find(name.text()) {
            return existing;
        }
        let id = SymbolId(self.symbols.len() as u32);
        let text = name.text().to_string();
        self.symbols.push(Symbol::new(id, scope, name));
        self.scopes[scope.0 as usize].insert(text, id);
        id
    }

    pub fn find(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        self.scope(scope).find(name)
    }

    /// The refinement policy: may `proposed` replace the symbol's current
    /// details? Every proposed kind has an explicit arm so that adding a
    /// kind forces this table to be revisited.
    pub fn can_replace_details(&self, id: SymbolId, proposed: &Details) -> bool {
        let current = self.symbol(id).details();
        if matches!(current, Details::Unknown) {
            return true;
        }
        match proposed {
            // An ambiguous-import diagnosis always wins.
            Details::UseError(_) => true,
            Details::ObjectEntity(_) | Details::ProcEntity(_) => {
                matches!(current, Details::Entity(_))
            }
            Details::Subprogram(_) => {
                matches!(current, Details::SubprogramName(_) | Details::Entity(_))
            }
            Details::DerivedType(_) => {
                matches!(current, Details::DerivedType(derived) if derived.is_forward_referenced)
            }
            Details::Use(incoming) => match current {
                Details::Use(existing) => {
                    self.ultimate(existing.symbol) == self.ultimate(incoming.symbol)
                }
                _ => false,
            },
            Details::HostAssoc(_) => matches!(current, Details::HostAssoc(_)),
            Details::UserReduction(_) => matches!(current, Details::UserReduction(_)),
            Details::Unknown
            | Details::MainProgram(_)
            | Details::Module(_)
            | Details::SubprogramName(_)
            | Details::Entity(_)
            | Details::Generic(_)
            | Details::ProcBinding(_)
            | Details::Namelist(_)
            | Details::CommonBlock(_)
            | Details::TypeParam(_)
            | Details::Misc(_)
            | Details::AssocEntity(_) => false,
        }
    }

    /// Replaces the symbol's details, subject to the refinement policy and
    /// to use-association acyclicity.
    pub fn set_details(&mut self, id: SymbolId, details: Details) -> Result<(), SymbolError> {
        if !self.can_replace_details(id, &details) {
            return Err(SymbolError::CannotReplaceDetails {
                name: self.symbol(id).name().to_string(),
                current: self.symbol(id).kind_name(),
                proposed: details.kind_name(),
            });
        }
        let target = match &details {
            Details::Use(use_details) => Some(use_details.symbol),
            Details::HostAssoc(host_assoc) => Some(host_assoc.symbol),
            _ => None,
        };
        if let Some(target) = target
            && self.chain_reaches(target, id)
        {
            return Err(SymbolError::UseAssociationCycle(
                self.symbol(id).name().to_string(),
            ));
        }
        self.symbol_mut(id).assign_details(details);
        Ok(())
    }

    pub fn replace_name(&mut self, id: SymbolId, name: SourceName) -> Result<(), SymbolError> {
        self.symbol_mut(id).replace_name(name)
    }

    /// The final non-import symbol reached by following use- and
    /// host-association links. Chains are acyclic by construction
    /// (`set_details` refuses a link whose chain leads back), so this
    /// terminates in O(chain length).
    pub fn ultimate(&self, id: SymbolId) -> SymbolId {
        let mut current = id;
        loop {
            match self.symbol(current).details() {
                Details::Use(use_details) => current = use_details.symbol,
                Details::HostAssoc(host_assoc) => current = host_assoc.symbol,
                _ => return current,
            }
        }
    }

    fn chain_reaches(&self, start: SymbolId, target: SymbolId) -> bool {
        let mut current = start;
        loop {
            if current == target {
                return true;
            }
            match self.symbol(current).details() {
                Details::Use(use_details) => current = use_details.symbol,
                Details::HostAssoc(host_assoc) => current = host_assoc.symbol,
                _ => return false,
            }
        }
    }

    /// Assigns the declared type on the kinds that carry one; silently does
    /// nothing on kinds that don't (the type belongs to the entity the
    /// symbol will eventually become).
    pub fn set_type(&mut self, id: SymbolId, ty: TypeRef) -> Result<(), SymbolError> {
        match self.symbol_mut(id).details_mut() {
            Details::Entity(entity) => entity.set_type(ty),
            Details::ObjectEntity(object) => object.entity.set_type(ty),
            Details::AssocEntity(assoc) => assoc.entity.set_type(ty),
            Details::ProcEntity(proc) => proc.entity.set_type(ty),
            Details::TypeParam(type_param) => type_param.set_type(ty),
            _ => Ok(()),
        }
    }

    pub fn ty(&self, id: SymbolId) -> Option<TypeRef> {
        match self.symbol(id).details() {
            Details::Entity(entity) => entity.ty(),
            Details::ObjectEntity(object) => object.entity.ty(),
            Details::AssocEntity(assoc) => assoc.entity.ty(),
            Details::ProcEntity(proc) => proc.entity.ty(),
            Details::TypeParam(type_param) => type_param.ty(),
            _ => None,
        }
    }

    // --- bind-name capability, gated on the kinds that carry it ---

    fn bind_name_denied(&self, id: SymbolId) -> SymbolError {
        SymbolError::BindNameNotAllowed {
            name: self.symbol(id).name().to_string(),
            kind: self.symbol(id).kind_name(),
        }
    }

    pub fn bind_name(&self, id: SymbolId) -> Result<Option<&str>, SymbolError> {
        match self.symbol(id).details().with_bind_name() {
            Some(capability) => Ok(capability.bind_name()),
            None => Err(self.bind_name_denied(id)),
        }
    }

    pub fn set_bind_name(&mut self, id: SymbolId, name: String) -> Result<(), SymbolError> {
        let denied = self.bind_name_denied(id);
        match self.symbol_mut(id).details_mut().with_bind_name_mut() {
            Some(capability) => {
                capability.set_bind_name(name);
                Ok(())
            }
            None => Err(denied),
        }
    }

    pub fn is_explicit_bind_name(&self, id: SymbolId) -> Result<bool, SymbolError> {
        match self.symbol(id).details().with_bind_name() {
            Some(capability) => Ok(capability.is_explicit_bind_name()),
            None => Err(self.bind_name_denied(id)),
        }
    }

    pub fn set_is_explicit_bind_name(&mut self, id: SymbolId, yes: bool) -> Result<(), SymbolError> {
        let denied = self.bind_name_denied(id);
        match self.symbol_mut(id).details_mut().with_bind_name_mut() {
            Some(capability) => {
                capability.set_is_explicit_bind_name(yes);
                Ok(())
            }
            None => Err(denied),
        }
    }

    pub fn set_is_c_defined(&mut self, id: SymbolId, yes: bool) -> Result<(), SymbolError> {
        let denied = self.bind_name_denied(id);
        match self.symbol_mut(id).details_mut().with_bind_name_mut() {
            Some(capability) => {
                capability.set_is_c_defined(yes);
                Ok(())
            }
            None => Err(denied),
        }
    }

    // --- queries ---

    pub fn is_subprogram(&self, id: SymbolId) -> bool {
        match self.symbol(id).details() {
            Details::Subprogram(_) | Details::SubprogramName(_) | Details::Generic(_) => true,
            Details::Use(use_details) => self.is_subprogram(use_details.symbol),
            _ => false,
        }
    }

    pub fn is_func_result(&self, id: SymbolId) -> bool {
        match self.symbol(id).details() {
            Details::Entity(entity) => entity.is_func_result,
            Details::ObjectEntity(object) => object.entity.is_func_result,
            Details::ProcEntity(proc) => proc.entity.is_func_result,
            Details::HostAssoc(host_assoc) => self.is_func_result(host_assoc.symbol),
            _ => false,
        }
    }

    /// True when the symbol came from a module file: flagged directly, or
    /// declared anywhere under a symbol that is.
    pub fn is_from_mod_file(&self, id: SymbolId) -> bool {
        if self.symbol(id).test(Flag::ModFile) {
            return true;
        }
        let owner = self.scope(self.symbol(id).owner());
        if owner.is_top_level() {
            return false;
        }
        owner
            .symbol()
            .is_some_and(|introducer| self.is_from_mod_file(introducer))
    }

    pub fn shape(&self, id: SymbolId) -> Option<&ArraySpec> {
        self.symbol(id).shape()
    }

    pub fn rank(&self, id: SymbolId) -> Option<u32> {
        self.symbol(id).rank()
    }

    /// The common block an object was placed in, if any.
    pub fn common_block_containing(&self, id: SymbolId) -> Option<SymbolId> {
        match self.symbol(id).details() {
            Details::ObjectEntity(object) => object.common_block,
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/t_refine.rs"]
mod t_refine;

#[cfg(test)]
#[path = "tests/t_table.rs"]
mod t_table;
