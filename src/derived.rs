//! Derived types: component order, parent-component rules, and finalizer
//! selection.

use indexmap::IndexMap;

use crate::details::Details;
use crate::error::SymbolError;
use crate::scope::ScopeId;
use crate::symbol::{Flag, SymbolId};
use crate::table::SymbolTable;

#[derive(Debug, Clone, Default)]
pub struct DerivedTypeDetails {
    pub sequence: bool,
    /// Still awaiting its full definition; a forward-referenced type may be
    /// replaced by a completed one, a complete type may not.
    pub is_forward_referenced: bool,
    component_names: Vec<String>,
    finals: IndexMap<String, SymbolId>,
}

impl DerivedTypeDetails {
    pub fn new() -> Self {
        Self::default()
    }

    /// Component names in declaration order. The parent component, when
    /// present, is always first.
    pub fn component_names(&self) -> &[String] {
        &self.component_names
    }

    /// The extends-component name: the first component, if any. Whether it
    /// really is a parent component is decided by the symbol's flag.
    pub fn parent_component_name(&self) -> Option<&str> {
        self.component_names.first().map(String::as_str)
    }

    /// FINAL procedures in registration order. Selection scans this in
    /// order, so registration order is observable behavior.
    pub fn finals(&self) -> &IndexMap<String, SymbolId> {
        &self.finals
    }

    pub fn add_final(&mut self, name: impl Into<String>, proc: SymbolId) {
        self.finals.insert(name.into(), proc);
    }

    pub(crate) fn push_component(&mut self, name: String) {
        self.component_names.push(name);
    }
}

impl SymbolTable {
    fn derived(&self, id: SymbolId) -> Result<&DerivedTypeDetails, SymbolError> {
        match self.symbol(id).details() {
            Details::DerivedType(derived) => Ok(derived),
            _ => Err(SymbolError::NotADerivedType(
                self.symbol(id).name().to_string(),
            )),
        }
    }

    /// Records a component of `derived_type` in declaration order. A
    /// component flagged `ParentComp` must be the first one recorded, and
    /// only one may ever exist.
    pub fn add_derived_component(
        &mut self,
        derived_type: SymbolId,
        component: SymbolId,
    ) -> Result<(), SymbolError> {
        let component_symbol = self.symbol(component);
        let component_name = component_symbol.name().to_string();
        let is_parent = component_symbol.test(Flag::ParentComp);

        if is_parent && !self.derived(derived_type)?.component_names().is_empty() {
            if self.parent_component(derived_type, None).is_some() {
                return Err(SymbolError::DuplicateParentComponent(component_name));
            }
            return Err(SymbolError::LateParentComponent(component_name));
        }

        let name = self.symbol(derived_type).name().to_string();
        match self.symbol_mut(derived_type).details_mut() {
            Details::DerivedType(derived) => {
                derived.push_component(component_name);
                Ok(())
            }
            _ => Err(SymbolError::NotADerivedType(name)),
        }
    }

    /// The parent (extends) component of a derived type, looked up in the
    /// type's own scope unless another scope is supplied.
    pub fn parent_component(&self, id: SymbolId, scope: Option<ScopeId>) -> Option<SymbolId> {
        let derived = self.derived(id).ok()?;
        let scope = scope.or(self.symbol(id).scope())?;
        let name = derived.parent_component_name()?;
        let candidate = self.scope(scope).find(name)?;
        if self.symbol(candidate).test(Flag::ParentComp) {
            Some(candidate)
        } else {
            None
        }
    }

    /// The FINAL procedure applicable to an object of rank `rank`: the
    /// first registered finalizer whose single dummy argument has that
    /// exact declared rank, is assumed-rank, or belongs to an elemental
    /// procedure. First match wins; later exact matches are not preferred.
    pub fn final_for_rank(&self, id: SymbolId, rank: u32) -> Option<SymbolId> {
        let derived = self.derived(id).ok()?;
        for proc in derived.finals().values() {
            if let Details::Subprogram(subprogram) = self.symbol(*proc).details()
                && let [Some(arg)] = subprogram.dummy_args()
                && let Details::ObjectEntity(object) = self.symbol(*arg).details()
            {
                if rank == object.shape().rank()
                    || object.shape().is_assumed_rank()
                    || self.symbol(*proc).test(Flag::Elemental)
                {
                    return Some(*proc);
                }
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "tests/t_derived.rs"]
mod tests;
