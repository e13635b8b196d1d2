use std::fmt;

use crate::details::Details;
use crate::diag::SourceName;
use crate::error::SymbolError;
use crate::scope::ScopeId;
use crate::value::ArraySpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Semantic tags accumulated on a symbol across analysis passes. Setting,
/// testing, and clearing are idempotent and order-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Dummy,
    ParentComp,
    ModFile,
    Elemental,
    Function,
    Subroutine,
    Implicit,
    InCommonBlock,
    Error,
    OmpShared,
    OmpPrivate,
    OmpFirstPrivate,
    OmpLastPrivate,
    OmpMapTo,
    OmpMapFrom,
}

impl Flag {
    pub const ALL: [Flag; 15] = [
        Flag::Dummy,
        Flag::ParentComp,
        Flag::ModFile,
        Flag::Elemental,
        Flag::Function,
        Flag::Subroutine,
        Flag::Implicit,
        Flag::InCommonBlock,
        Flag::Error,
        Flag::OmpShared,
        Flag::OmpPrivate,
        Flag::OmpFirstPrivate,
        Flag::OmpLastPrivate,
        Flag::OmpMapTo,
        Flag::OmpMapFrom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Flag::Dummy => "Dummy",
            Flag::ParentComp => "ParentComp",
            Flag::ModFile => "ModFile",
            Flag::Elemental => "Elemental",
            Flag::Function => "Function",
            Flag::Subroutine => "Subroutine",
            Flag::Implicit => "Implicit",
            Flag::InCommonBlock => "InCommonBlock",
            Flag::Error => "Error",
            Flag::OmpShared => "OmpShared",
            Flag::OmpPrivate => "OmpPrivate",
            Flag::OmpFirstPrivate => "OmpFirstPrivate",
            Flag::OmpLastPrivate => "OmpLastPrivate",
            Flag::OmpMapTo => "OmpMapTo",
            Flag::OmpMapFrom => "OmpMapFrom",
        }
    }

    /// The OpenMP clause keyword a data-sharing flag corresponds to, for
    /// clause-attribution diagnostics.
    pub fn omp_clause_name(&self) -> Option<&'static str> {
        match self {
            Flag::OmpShared => Some("SHARED"),
            Flag::OmpPrivate => Some("PRIVATE"),
            Flag::OmpFirstPrivate => Some("FIRSTPRIVATE"),
            Flag::OmpLastPrivate => Some("LASTPRIVATE"),
            Flag::OmpMapTo | Flag::OmpMapFrom => Some("MAP"),
            _ => None,
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fixed-size set of `Flag`s backed by a bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags(u32);

impl Flags {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn set(&mut self, flag: Flag) {
        self.0 |= 1 << flag as u32;
    }

    pub fn clear(&mut self, flag: Flag) {
        self.0 &= !(1 << flag as u32);
    }

    pub fn test(&self, flag: Flag) -> bool {
        self.0 & (1 << flag as u32) != 0
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        for flag in Flag::ALL {
            if self.test(flag) {
                write!(f, "{sep}{flag}")?;
                sep = ", ";
            }
        }
        Ok(())
    }
}

/// A named entity's semantic record. Owned by exactly one scope; mutated in
/// place as analysis refines what the name means. Cross-symbol references
/// are ids into the owning `SymbolTable`, never owning handles.
#[derive(Debug, Clone)]
pub struct Symbol {
    id: SymbolId,
    owner: ScopeId,
    name: SourceName,
    flags: Flags,
    size: Option<u64>,
    offset: Option<u64>,
    scope: Option<ScopeId>,
    details: Details,
}

impl Symbol {
    pub(crate) fn new(id: SymbolId, owner: ScopeId, name: SourceName) -> Self {
        Self {
            id,
            owner,
            name,
            flags: Flags::new(),
            size: None,
            offset: None,
            scope: None,
            details: Details::Unknown,
        }
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn owner(&self) -> ScopeId {
        self.owner
    }

    pub fn name(&self) -> &str {
        self.name.text()
    }

    pub fn source_name(&self) -> &SourceName {
        &self.name
    }

    /// Re-points the symbol's name to a different source occurrence. The
    /// replacement must carry identical characters; renaming to different
    /// text is an internal-consistency failure.
    pub fn replace_name(&mut self, name: SourceName) -> Result<(), SymbolError> {
        if name.text() != self.name.text() {
            return Err(SymbolError::RenamedToDifferentText {
                current: self.name.text().to_string(),
                replacement: name.text().to_string(),
            });
        }
        self.name = name;
        Ok(())
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn set_flag(&mut self, flag: Flag) {
        self.flags.set(flag);
    }

    pub fn clear_flag(&mut self, flag: Flag) {
        self.flags.clear(flag);
    }

    pub fn test(&self, flag: Flag) -> bool {
        self.flags.test(flag)
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn set_size(&mut self, size: u64) {
        self.size = Some(size);
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub fn set_offset(&mut self, offset: u64) {
        self.offset = Some(offset);
    }

    /// The scope this symbol introduced (module, subprogram, derived type).
    pub fn scope(&self) -> Option<ScopeId> {
        self.scope
    }

    pub(crate) fn set_scope(&mut self, scope: ScopeId) {
        self.scope = Some(scope);
    }

    pub fn details(&self) -> &Details {
        &self.details
    }

    /// In-place mutation of the current payload. Replacing the payload with
    /// a different kind must go through `SymbolTable::set_details`, which
    /// enforces the refinement policy.
    pub fn details_mut(&mut self) -> &mut Details {
        &mut self.details
    }

    pub(crate) fn assign_details(&mut self, details: Details) {
        self.details = details;
    }

    pub fn kind_name(&self) -> &'static str {
        self.details.kind_name()
    }

    /// Declared shape, for object entities only.
    pub fn shape(&self) -> Option<&ArraySpec> {
        match &self.details {
            Details::ObjectEntity(object) => Some(object.shape()),
            _ => None,
        }
    }

    pub fn rank(&self) -> Option<u32> {
        self.shape().map(ArraySpec::rank)
    }

    pub fn is_object_array(&self) -> bool {
        self.shape().is_some_and(|shape| !shape.is_empty())
    }
}

#[cfg(test)]
#[path = "tests/t_symbol.rs"]
mod tests;
