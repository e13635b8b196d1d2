//! Generic names and the overload merge engine.

use std::fmt;

use crate::details::Details;
use crate::diag::SourceName;
use crate::error::SymbolError;
use crate::symbol::SymbolId;
use crate::table::SymbolTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenericKind {
    Name,
    DefinedOperator(String),
    Assignment,
}

impl fmt::Display for GenericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenericKind::Name => write!(f, "Name"),
            GenericKind::DefinedOperator(op) => write!(f, "OPERATOR({op})"),
            GenericKind::Assignment => write!(f, "ASSIGNMENT(=)"),
        }
    }
}

/// A name denoting an overload set of candidate specific procedures.
///
/// The candidate list and the binding-name list are index-aligned at all
/// times; both grow only through `add_specific_proc` (or the table's merge
/// operation), which keeps them in lockstep.
#[derive(Debug, Clone)]
pub struct GenericDetails {
    pub kind: GenericKind,
    specific: Option<SymbolId>,
    derived_type: Option<SymbolId>,
    uses: Vec<SymbolId>,
    specific_procs: Vec<SymbolId>,
    binding_names: Vec<SourceName>,
}

impl GenericDetails {
    pub fn new(kind: GenericKind) -> Self {
        Self {
            kind,
            specific: None,
            derived_type: None,
            uses: Vec::new(),
            specific_procs: Vec::new(),
            binding_names: Vec::new(),
        }
    }

    pub fn specific(&self) -> Option<SymbolId> {
        self.specific
    }

    pub fn clear_specific(&mut self) {
        self.specific = None;
    }

    pub fn derived_type(&self) -> Option<SymbolId> {
        self.derived_type
    }

    pub fn clear_derived_type(&mut self) {
        self.derived_type = None;
    }

    /// Use-associated generics merged into this one, in merge order.
    pub fn uses(&self) -> &[SymbolId] {
        &self.uses
    }

    pub fn specific_procs(&self) -> &[SymbolId] {
        &self.specific_procs
    }

    pub fn binding_names(&self) -> &[SourceName] {
        &self.binding_names
    }

    pub fn add_specific_proc(&mut self, proc: SymbolId, binding_name: SourceName) {
        self.specific_procs.push(proc);
        self.binding_names.push(binding_name);
    }

    pub(crate) fn set_specific_unchecked(&mut self, specific: SymbolId) {
        self.specific = Some(specific);
    }

    pub(crate) fn set_derived_type_unchecked(&mut self, derived_type: SymbolId) {
        self.derived_type = Some(derived_type);
    }

    pub(crate) fn push_use(&mut self, use_symbol: SymbolId) {
        self.uses.push(use_symbol);
    }
}

impl SymbolTable {
    fn generic(&self, id: SymbolId) -> Result<&GenericDetails, SymbolError> {
        match self.symbol(id).details() {
            Details::Generic(generic) => Ok(generic),
            _ => Err(SymbolError::NotAGeneric(self.symbol(id).name().to_string())),
        }
    }

    fn generic_mut(&mut self, id: SymbolId) -> Result<&mut GenericDetails, SymbolError> {
        let name = self.symbol(id).name().to_string();
        match self.symbol_mut(id).details_mut() {
            Details::Generic(generic) => Ok(generic),
            _ => Err(SymbolError::NotAGeneric(name)),
        }
    }

    /// Binds the distinguished non-generic procedure that shares the
    /// generic's name. At most one may ever be bound.
    pub fn set_generic_specific(
        &mut self,
        id: SymbolId,
        specific: SymbolId,
    ) -> Result<(), SymbolError> {
        let name = self.symbol(id).name().to_string();
        let generic = self.generic_mut(id)?;
        if generic.specific().is_some() {
            return Err(SymbolError::SpecificAlreadySet(name));
        }
        generic.set_specific_unchecked(specific);
        Ok(())
    }

    pub fn clear_generic_specific(&mut self, id: SymbolId) -> Result<(), SymbolError> {
        self.generic_mut(id)?.clear_specific();
        Ok(())
    }

    /// Binds the derived type that shares the generic's name. Re-binding to
    /// the same type is a no-op; binding a different one is fatal.
    pub fn set_generic_derived_type(
        &mut self,
        id: SymbolId,
        derived_type: SymbolId,
    ) -> Result<(), SymbolError> {
        let name = self.symbol(id).name().to_string();
        let generic = self.generic_mut(id)?;
        match generic.derived_type() {
            Some(existing) if existing != derived_type => {
                Err(SymbolError::InconsistentGenericType(name))
            }
            _ => {
                generic.set_derived_type_unchecked(derived_type);
                Ok(())
            }
        }
    }

    /// Records the use-associated symbol a merge came through. The recorded
    /// symbol must itself be use-associated.
    pub fn add_generic_use(
        &mut self,
        id: SymbolId,
        use_symbol: SymbolId,
    ) -> Result<(), SymbolError> {
        if !matches!(self.symbol(use_symbol).details(), Details::Use(_)) {
            return Err(SymbolError::NotUseAssociated(
                self.symbol(use_symbol).name().to_string(),
            ));
        }
        self.generic_mut(id)?.push_use(use_symbol);
        Ok(())
    }

    /// Merges the candidate set of `src` into `dst`, deduplicating by
    /// ultimate-symbol identity and preserving first-seen order. Merging
    /// the same source twice leaves `dst` unchanged. The source's kind is
    /// adopted; its derived-type binding must be consistent with any
    /// already on `dst`.
    pub fn copy_generic(&mut self, dst: SymbolId, src: SymbolId) -> Result<(), SymbolError> {
        let src_generic = self.generic(src)?.clone();
        let dst_name = self.symbol(dst).name().to_string();
        let dst_generic = self.generic(dst)?;

        let merged_derived_type = match (dst_generic.derived_type(), src_generic.derived_type()) {
            (Some(existing), Some(incoming)) if existing != incoming => {
                return Err(SymbolError::InconsistentGenericType(dst_name));
            }
            (existing, incoming) => incoming.or(existing),
        };

        let mut seen: Vec<SymbolId> = dst_generic
            .specific_procs()
            .iter()
            .map(|proc| self.ultimate(*proc))
            .collect();
        let mut additions = Vec::new();
        for (proc, binding_name) in src_generic
            .specific_procs()
            .iter()
            .zip(src_generic.binding_names())
        {
            let ultimate = self.ultimate(*proc);
            if !seen.contains(&ultimate) {
                seen.push(ultimate);
                additions.push((*proc, binding_name.clone()));
            }
        }

        let generic = self.generic_mut(dst)?;
        generic.kind = src_generic.kind.clone();
        if let Some(derived_type) = merged_derived_type {
            generic.set_derived_type_unchecked(derived_type);
        }
        for (proc, binding_name) in additions {
            generic.add_specific_proc(proc, binding_name);
        }
        Ok(())
    }

    /// The bound specific procedure, unless the generic's candidate list
    /// already covers its ultimate symbol (returning it then would invite
    /// duplicate resolution) or the binding is an unresolved-import error.
    pub fn check_specific(&self, id: SymbolId) -> Result<Option<SymbolId>, SymbolError> {
        let generic = self.generic(id)?;
        let Some(specific) = generic.specific() else {
            return Ok(None);
        };
        if matches!(self.symbol(specific).details(), Details::UseError(_)) {
            return Ok(None);
        }
        let ultimate = self.ultimate(specific);
        let covered = generic
            .specific_procs()
            .iter()
            .any(|proc| self.ultimate(*proc) == ultimate);
        Ok(if covered { None } else { Some(specific) })
    }
}

#[cfg(test)]
#[path = "tests/t_generic.rs"]
mod tests;
