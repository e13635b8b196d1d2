//! Stable textual rendering of symbols and scope paths. Test suites compare
//! this text verbatim, so changes here are observable; the format follows
//! the shape `name (flags) size=N offset=M: Kind <kind-specific fields>`.

use std::fmt::{self, Display, Formatter};

use crate::details::{Details, EntityDetails, WithBindName};
use crate::scope::ScopeId;
use crate::symbol::SymbolId;
use crate::table::SymbolTable;

impl SymbolTable {
    pub fn dump(&self, id: SymbolId) -> SymbolDump<'_> {
        SymbolDump { table: self, id }
    }

    /// Owner-qualified unique path of a scope, e.g. `/m/Block1`. Anonymous
    /// scopes get a deterministic ordinal counted among same-kind siblings
    /// at render time, so the path always reflects the current tree.
    pub fn scope_path(&self, id: ScopeId) -> ScopePath<'_> {
        ScopePath { table: self, id }
    }

    /// Canonical owner-qualified name of a symbol, e.g. `/m/Block1/x`.
    pub fn qualified_name(&self, id: SymbolId) -> QualifiedName<'_> {
        QualifiedName { table: self, id }
    }
}

pub struct SymbolDump<'a> {
    table: &'a SymbolTable,
    id: SymbolId,
}

pub struct ScopePath<'a> {
    table: &'a SymbolTable,
    id: ScopeId,
}

pub struct QualifiedName<'a> {
    table: &'a SymbolTable,
    id: SymbolId,
}

impl Display for ScopePath<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_scope_path(f, self.table, self.id)
    }
}

impl Display for QualifiedName<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let symbol = self.table.symbol(self.id);
        fmt_scope_path(f, self.table, symbol.owner())?;
        write!(f, "/{}", symbol.name())
    }
}

fn fmt_scope_path(f: &mut Formatter<'_>, table: &SymbolTable, id: ScopeId) -> fmt::Result {
    let scope = table.scope(id);
    let Some(parent) = scope.parent() else {
        return Ok(());
    };
    fmt_scope_path(f, table, parent)?;
    write!(f, "/")?;
    fmt_scope_name(f, table, id)
}

fn fmt_scope_name(f: &mut Formatter<'_>, table: &SymbolTable, id: ScopeId) -> fmt::Result {
    let scope = table.scope(id);
    if let Some(introducer) = scope.symbol()
        && !table.symbol(introducer).name().is_empty()
    {
        return write!(f, "{}", table.symbol(introducer).name());
    }
    // Anonymous scope: ordinal among same-kind siblings, 1-based.
    let mut index = 1;
    if let Some(parent) = scope.parent() {
        for sibling in table.scope(parent).children() {
            if *sibling == id {
                break;
            }
            if table.scope(*sibling).kind() == scope.kind() {
                index += 1;
            }
        }
    }
    write!(f, "{}{}", scope.kind(), index)
}

impl Display for SymbolDump<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let symbol = self.table.symbol(self.id);
        write!(f, "{}", symbol.name())?;
        if !symbol.flags().is_empty() {
            write!(f, " ({})", symbol.flags())?;
        }
        if let Some(size) = symbol.size() {
            write!(f, " size={} offset={}", size, symbol.offset().unwrap_or(0))?;
        }
        write!(f, ": ")?;
        fmt_details(f, self.table, symbol.details())
    }
}

fn symbol_name(table: &SymbolTable, id: SymbolId) -> &str {
    table.symbol(id).name()
}

/// ` a,b` — space before the first element, commas between.
fn fmt_symbol_list(
    f: &mut Formatter<'_>,
    table: &SymbolTable,
    list: impl IntoIterator<Item = SymbolId>,
) -> fmt::Result {
    let mut sep = ' ';
    for id in list {
        write!(f, "{sep}{}", symbol_name(table, id))?;
        sep = ',';
    }
    Ok(())
}

fn fmt_list(f: &mut Formatter<'_>, label: &str, list: &[impl Display]) -> fmt::Result {
    if !list.is_empty() {
        write!(f, " {label}:")?;
        let mut sep = ' ';
        for item in list {
            write!(f, "{sep}{item}")?;
            sep = ',';
        }
    }
    Ok(())
}

fn fmt_entity(f: &mut Formatter<'_>, entity: &EntityDetails) -> fmt::Result {
    if entity.is_dummy {
        write!(f, " dummy")?;
    }
    if entity.is_func_result {
        write!(f, " funcResult")?;
    }
    if let Some(ty) = entity.ty() {
        write!(f, " type: {ty}")?;
    }
    if let Some(bind_name) = entity.bind_name() {
        write!(f, " bindName:{bind_name}")?;
    }
    if entity.is_c_defined() {
        write!(f, " CDEFINED")?;
    }
    Ok(())
}

fn fmt_details(f: &mut Formatter<'_>, table: &SymbolTable, details: &Details) -> fmt::Result {
    write!(f, "{}", details.kind_name())?;
    match details {
        Details::Unknown | Details::MainProgram(_) | Details::HostAssoc(_) => Ok(()),
        Details::Module(module) => {
            if module.is_submodule {
                write!(f, " (submodule)")?;
            }
            if module.is_default_private {
                write!(f, " isDefaultPrivate")?;
            }
            Ok(())
        }
        Details::Subprogram(subprogram) => {
            if subprogram.is_interface {
                write!(f, " isInterface")?;
            }
            if subprogram.is_dummy {
                write!(f, " dummy")?;
            }
            if let Some(bind_name) = subprogram.bind_name() {
                write!(f, " bindName:{bind_name}")?;
            }
            if let Some(result) = subprogram.result() {
                write!(f, " result:{}", symbol_name(table, result))?;
            }
            if subprogram.entry_scope.is_some() {
                write!(f, " entry")?;
            }
            write!(f, " (")?;
            let mut sep = "";
            for arg in subprogram.dummy_args() {
                match arg {
                    Some(arg) => write!(f, "{sep}{}", symbol_name(table, *arg))?,
                    None => write!(f, "{sep}*")?,
                }
                sep = ",";
            }
            write!(f, ")")
        }
        Details::SubprogramName(name_details) => write!(f, " {}", name_details.kind.as_str()),
        Details::Entity(entity) => fmt_entity(f, entity),
        Details::ObjectEntity(object) => {
            fmt_entity(f, &object.entity)?;
            fmt_list(f, "shape", object.shape().specs())?;
            fmt_list(f, "coshape", object.coshape().specs())?;
            if let Some(init) = &object.init {
                write!(f, " init:{init}")?;
            }
            Ok(())
        }
        Details::ProcEntity(proc) => {
            if let Some(interface) = proc.interface {
                write!(f, " {}", symbol_name(table, interface))?;
            } else if let Some(ty) = proc.entity.ty() {
                write!(f, " {ty}")?;
            }
            if let Some(bind_name) = proc.entity.bind_name() {
                write!(f, " bindName:{bind_name}")?;
            }
            if let Some(pass_name) = &proc.pass_name {
                write!(f, " passName:{pass_name}")?;
            }
            match proc.init {
                Some(Some(target)) => write!(f, " => {}", symbol_name(table, target))?,
                Some(None) => write!(f, " => NULL()")?,
                None => {}
            }
            Ok(())
        }
        Details::DerivedType(derived) => {
            if derived.sequence {
                write!(f, " sequence")?;
            }
            fmt_list(f, "components", derived.component_names())
        }
        Details::Use(use_details) => {
            let used = table.symbol(use_details.symbol);
            write!(f, " from {} in ", used.name())?;
            fmt_scope_name(f, table, used.owner())
        }
        Details::UseError(use_error) => {
            write!(f, " uses:")?;
            let mut sep = "";
            for (location, symbol) in use_error.occurrences() {
                write!(
                    f,
                    "{sep} from {} at {}",
                    symbol_name(table, *symbol),
                    location.span()
                )?;
                sep = ",";
            }
            Ok(())
        }
        Details::Generic(generic) => {
            write!(f, " {}", generic.kind)?;
            if generic.specific().is_some() {
                write!(f, " (specific)")?;
            }
            if generic.derived_type().is_some() {
                write!(f, " (derivedType)")?;
            }
            if !generic.uses().is_empty() {
                write!(f, " (uses:")?;
                let mut sep = ' ';
                for use_symbol in generic.uses() {
                    let ultimate = table.ultimate(*use_symbol);
                    write!(f, "{sep}{}->", symbol_name(table, ultimate))?;
                    fmt_scope_name(f, table, table.symbol(ultimate).owner())?;
                    sep = ',';
                }
                write!(f, ")")?;
            }
            write!(f, " procs:")?;
            fmt_symbol_list(f, table, generic.specific_procs().iter().copied())
        }
        Details::ProcBinding(binding) => {
            write!(f, " => {}", symbol_name(table, binding.symbol))?;
            if let Some(pass_name) = &binding.pass_name {
                write!(f, " passName:{pass_name}")?;
            }
            if binding.num_privates_not_overridden > 0 {
                write!(
                    f,
                    " numPrivatesNotOverridden: {}",
                    binding.num_privates_not_overridden
                )?;
            }
            Ok(())
        }
        Details::Namelist(namelist) => {
            write!(f, ":")?;
            fmt_symbol_list(f, table, namelist.objects.iter().copied())
        }
        Details::CommonBlock(common) => {
            if let Some(bind_name) = common.bind_name() {
                write!(f, " bindName:{bind_name}")?;
            }
            if common.alignment != 0 {
                write!(f, " alignment={}", common.alignment)?;
            }
            write!(f, ":")?;
            for object in &common.objects {
                write!(f, " {}", symbol_name(table, *object))?;
            }
            Ok(())
        }
        Details::TypeParam(type_param) => {
            if let Some(ty) = type_param.ty() {
                write!(f, " type:{ty}")?;
            }
            match type_param.attr() {
                Some(attr) => write!(f, " {}", attr.as_str())?,
                None => write!(f, " (no attr)")?,
            }
            if let Some(init) = &type_param.init {
                write!(f, " init:{init}")?;
            }
            Ok(())
        }
        Details::Misc(misc) => write!(f, " {}", misc.kind.as_str()),
        Details::AssocEntity(assoc) => {
            fmt_entity(f, &assoc.entity)?;
            match assoc.rank() {
                Some(crate::value::AssocRank::AssumedSize) => write!(f, " RANK(*)")?,
                Some(crate::value::AssocRank::AssumedRank) => write!(f, " RANK DEFAULT")?,
                Some(crate::value::AssocRank::Exact(rank)) => write!(f, " RANK({rank})")?,
                None => {}
            }
            if let Some(expr) = &assoc.expr {
                write!(f, " expr:{expr}")?;
            }
            Ok(())
        }
        Details::UserReduction(reduction) => {
            for ty in &reduction.type_list {
                write!(f, " {ty}")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "tests/t_dump.rs"]
mod tests;
