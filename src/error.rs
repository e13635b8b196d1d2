use thiserror::Error;

/// Internal-consistency failures of the symbol table.
///
/// These indicate a bug in the analysis driving the table, not an error in
/// the user's program. Callers propagate them with `?` up to the driver,
/// which abandons the compilation unit. Ambiguous use-association is *not*
/// one of these; it flows through the data model as `UseErrorDetails`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SymbolError {
    #[error("cannot replace {current} details of symbol '{name}' with {proposed}")]
    CannotReplaceDetails {
        name: String,
        current: &'static str,
        proposed: &'static str,
    },

    #[error("cannot re-point symbol '{current}' to different text '{replacement}'")]
    RenamedToDifferentText { current: String, replacement: String },

    #[error("bind name is not allowed on {kind} symbol '{name}'")]
    BindNameNotAllowed { name: String, kind: &'static str },

    #[error("use association for '{0}' would form a cycle")]
    UseAssociationCycle(String),

    #[error("symbol '{0}' does not have generic details")]
    NotAGeneric(String),

    #[error("symbol '{0}' does not have derived type details")]
    NotADerivedType(String),

    #[error("generic use trail entry '{0}' is not use-associated")]
    NotUseAssociated(String),

    #[error("generic '{0}' already has a distinguished specific procedure")]
    SpecificAlreadySet(String),

    #[error("generic '{0}' is already bound to a different derived type")]
    InconsistentGenericType(String),

    #[error("derived type already has a parent component; cannot add '{0}'")]
    DuplicateParentComponent(String),

    #[error("parent component '{0}' must be the first component of its derived type")]
    LateParentComponent(String),

    #[error("type already set")]
    TypeAlreadySet,

    #[error("shape already set")]
    ShapeAlreadySet,

    #[error("coshape already set")]
    CoshapeAlreadySet,

    #[error("result symbol already set")]
    ResultAlreadySet,

    #[error("type parameter attribute already set")]
    TypeParamAttrAlreadySet,

    #[error("module scope already set")]
    ModuleScopeAlreadySet,

    #[error("scope already has an owning symbol")]
    ScopeSymbolAlreadySet,
}
