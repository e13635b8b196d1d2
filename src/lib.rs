//! Semantic symbol table for a Fortran-style compiler front end.
//!
//! The table accumulates what every declared name *means* as analysis
//! progresses: a symbol starts out unclassified and is refined, never
//! reset, as more declarations and contexts are examined. Scopes own their
//! symbols and child scopes; every cross-symbol reference is an id into the
//! owning [`SymbolTable`].

pub mod derived;
pub mod details;
pub mod diag;
pub mod dump;
pub mod error;
pub mod generic;
pub mod order;
pub mod scope;
pub mod symbol;
pub mod table;
pub mod value;

pub use derived::DerivedTypeDetails;
pub use details::{
    AssocEntityDetails, CommonBlockDetails, Details, EntityDetails, HostAssocDetails,
    MainProgramDetails, MiscDetails, MiscKind, ModuleDetails, NamelistDetails,
    ObjectEntityDetails, ProcBindingDetails, ProcEntityDetails, SubprogramDetails,
    SubprogramKind, SubprogramNameDetails, TypeParamAttr, TypeParamDetails, UseDetails,
    UseErrorDetails, UserReductionDetails, WithBindName,
};
pub use diag::{Position, SourceName, Span};
pub use error::SymbolError;
pub use generic::{GenericDetails, GenericKind};
pub use order::{offset_cmp, source_position_cmp};
pub use scope::{Scope, ScopeId, ScopeKind};
pub use symbol::{Flag, Flags, Symbol, SymbolId};
pub use table::SymbolTable;
pub use value::{ArraySpec, AssocRank, InitValue, ShapeSpec, TypeRef};
