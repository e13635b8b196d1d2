//! The closed variant family of symbol payloads. Every symbol holds exactly
//! one `Details` value; `Unknown` is the universal initial state, refined by
//! `SymbolTable::set_details` under the replacement policy.

use crate::derived::DerivedTypeDetails;
use crate::diag::SourceName;
use crate::error::SymbolError;
use crate::generic::GenericDetails;
use crate::scope::ScopeId;
use crate::symbol::SymbolId;
use crate::value::{ArraySpec, AssocRank, InitValue, TypeRef};

/// External binding metadata shared by the kinds that can interoperate with
/// companion-processor code.
#[derive(Debug, Clone, Default)]
pub(crate) struct BindName {
    name: Option<String>,
    explicit: bool,
    c_defined: bool,
}

/// Capability carried by exactly the payload kinds that may have an external
/// binding name: entities (and their object/proc/assoc refinements),
/// subprograms, and common blocks. Querying or setting the capability on
/// any other kind fails; see `Details::with_bind_name`.
pub trait WithBindName {
    fn bind_name(&self) -> Option<&str>;
    fn set_bind_name(&mut self, name: String);
    fn is_explicit_bind_name(&self) -> bool;
    fn set_is_explicit_bind_name(&mut self, yes: bool);
    fn is_c_defined(&self) -> bool;
    fn set_is_c_defined(&mut self, yes: bool);
}

macro_rules! impl_with_bind_name {
    ($type:ty) => {
        impl WithBindName for $type {
            fn bind_name(&self) -> Option<&str> {
                self.bind.name.as_deref()
            }
            fn set_bind_name(&mut self, name: String) {
                self.bind.name = Some(name);
            }
            fn is_explicit_bind_name(&self) -> bool {
                self.bind.explicit
            }
            fn set_is_explicit_bind_name(&mut self, yes: bool) {
                self.bind.explicit = yes;
            }
            fn is_c_defined(&self) -> bool {
                self.bind.c_defined
            }
            fn set_is_c_defined(&mut self, yes: bool) {
                self.bind.c_defined = yes;
            }
        }
    };
}

impl_with_bind_name!(EntityDetails);
impl_with_bind_name!(SubprogramDetails);
impl_with_bind_name!(CommonBlockDetails);

#[derive(Debug, Clone, Default)]
pub struct MainProgramDetails;

#[derive(Debug, Clone, Default)]
pub struct ModuleDetails {
    pub is_submodule: bool,
    pub is_default_private: bool,
    scope: Option<ScopeId>,
}

impl ModuleDetails {
    pub fn scope(&self) -> Option<ScopeId> {
        self.scope
    }

    pub fn set_scope(&mut self, scope: ScopeId) -> Result<(), SymbolError> {
        if self.scope.is_some() {
            return Err(SymbolError::ModuleScopeAlreadySet);
        }
        self.scope = Some(scope);
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubprogramDetails {
    pub is_interface: bool,
    pub is_dummy: bool,
    dummy_args: Vec<Option<SymbolId>>,
    result: Option<SymbolId>,
    pub entry_scope: Option<ScopeId>,
    bind: BindName,
}

impl SubprogramDetails {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dummy arguments in declaration order; `None` is an alternate-return
    /// placeholder.
    pub fn dummy_args(&self) -> &[Option<SymbolId>] {
        &self.dummy_args
    }

    pub fn add_dummy_arg(&mut self, arg: SymbolId) {
        self.dummy_args.push(Some(arg));
    }

    pub fn add_alternate_return(&mut self) {
        self.dummy_args.push(None);
    }

    pub fn result(&self) -> Option<SymbolId> {
        self.result
    }

    pub fn set_result(&mut self, result: SymbolId) -> Result<(), SymbolError> {
        if self.result.is_some() {
            return Err(SymbolError::ResultAlreadySet);
        }
        self.result = Some(result);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubprogramKind {
    Module,
    Internal,
}

impl SubprogramKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubprogramKind::Module => "Module",
            SubprogramKind::Internal => "Internal",
        }
    }
}

/// Forward name-only stub for a subprogram whose full definition has not
/// been analyzed yet.
#[derive(Debug, Clone)]
pub struct SubprogramNameDetails {
    pub kind: SubprogramKind,
}

#[derive(Debug, Clone, Default)]
pub struct EntityDetails {
    ty: Option<TypeRef>,
    pub is_dummy: bool,
    pub is_func_result: bool,
    bind: BindName,
}

impl EntityDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ty(&self) -> Option<TypeRef> {
        self.ty
    }

    pub fn set_type(&mut self, ty: TypeRef) -> Result<(), SymbolError> {
        if self.ty.is_some() {
            return Err(SymbolError::TypeAlreadySet);
        }
        self.ty = Some(ty);
        Ok(())
    }

    pub fn replace_type(&mut self, ty: TypeRef) {
        self.ty = Some(ty);
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObjectEntityDetails {
    pub entity: EntityDetails,
    shape: ArraySpec,
    coshape: ArraySpec,
    pub init: Option<InitValue>,
    /// The common block this object was placed in, if any.
    pub common_block: Option<SymbolId>,
}

impl ObjectEntityDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shape(&self) -> &ArraySpec {
        &self.shape
    }

    pub fn set_shape(&mut self, shape: ArraySpec) -> Result<(), SymbolError> {
        if !self.shape.is_empty() {
            return Err(SymbolError::ShapeAlreadySet);
        }
        self.shape = shape;
        Ok(())
    }

    pub fn coshape(&self) -> &ArraySpec {
        &self.coshape
    }

    pub fn set_coshape(&mut self, coshape: ArraySpec) -> Result<(), SymbolError> {
        if !self.coshape.is_empty() {
            return Err(SymbolError::CoshapeAlreadySet);
        }
        self.coshape = coshape;
        Ok(())
    }
}

impl From<EntityDetails> for ObjectEntityDetails {
    fn from(entity: EntityDetails) -> Self {
        Self {
            entity,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProcEntityDetails {
    pub entity: EntityDetails,
    /// Explicit procedure interface, when declared with one.
    pub interface: Option<SymbolId>,
    pub pass_name: Option<String>,
    /// Pointer initialization: `Some(Some(s))` associates with `s`,
    /// `Some(None)` is an explicit NULL().
    pub init: Option<Option<SymbolId>>,
}

impl From<EntityDetails> for ProcEntityDetails {
    fn from(entity: EntityDetails) -> Self {
        Self {
            entity,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssocEntityDetails {
    pub entity: EntityDetails,
    /// Selector expression of the association, opaque to the table.
    pub expr: Option<InitValue>,
    rank: Option<AssocRank>,
    pub is_type_guard: bool,
}

impl AssocEntityDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rank(&self) -> Option<AssocRank> {
        self.rank
    }

    pub fn set_rank(&mut self, rank: u32) {
        self.rank = Some(AssocRank::Exact(rank));
    }

    pub fn set_is_assumed_size(&mut self) {
        self.rank = Some(AssocRank::AssumedSize);
    }

    pub fn set_is_assumed_rank(&mut self) {
        self.rank = Some(AssocRank::AssumedRank);
    }
}

impl From<EntityDetails> for AssocEntityDetails {
    fn from(entity: EntityDetails) -> Self {
        Self {
            entity,
            ..Self::default()
        }
    }
}

/// Import of a symbol from another module through a USE statement.
#[derive(Debug, Clone)]
pub struct UseDetails {
    /// The local occurrence of the imported name.
    pub location: SourceName,
    /// The symbol in the source module. Always points toward an
    /// already-resolved symbol, so use chains cannot cycle.
    pub symbol: SymbolId,
}

/// Diagnosis of an ambiguous or failed import: every conflicting source
/// occurrence with its target. Flows through the data model as a normal
/// payload and may replace any prior details for the name.
#[derive(Debug, Clone, Default)]
pub struct UseErrorDetails {
    occurrences: Vec<(SourceName, SymbolId)>,
}

impl UseErrorDetails {
    pub fn new(use_details: &UseDetails) -> Self {
        let mut details = Self::default();
        details.add_occurrence(use_details.location.clone(), use_details.symbol);
        details
    }

    pub fn add_occurrence(&mut self, location: SourceName, symbol: SymbolId) -> &mut Self {
        self.occurrences.push((location, symbol));
        self
    }

    pub fn occurrences(&self) -> &[(SourceName, SymbolId)] {
        &self.occurrences
    }
}

/// Association to a symbol of the host scope.
#[derive(Debug, Clone)]
pub struct HostAssocDetails {
    pub symbol: SymbolId,
}

/// Type-bound procedure binding.
#[derive(Debug, Clone)]
pub struct ProcBindingDetails {
    pub symbol: SymbolId,
    pub pass_name: Option<String>,
    pub num_privates_not_overridden: u32,
}

impl ProcBindingDetails {
    pub fn new(symbol: SymbolId) -> Self {
        Self {
            symbol,
            pass_name: None,
            num_privates_not_overridden: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NamelistDetails {
    pub objects: Vec<SymbolId>,
}

#[derive(Debug, Clone, Default)]
pub struct CommonBlockDetails {
    pub objects: Vec<SymbolId>,
    pub alignment: u64,
    bind: BindName,
}

impl CommonBlockDetails {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeParamAttr {
    Kind,
    Len,
}

impl TypeParamAttr {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeParamAttr::Kind => "Kind",
            TypeParamAttr::Len => "Len",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TypeParamDetails {
    ty: Option<TypeRef>,
    attr: Option<TypeParamAttr>,
    pub init: Option<InitValue>,
}

impl TypeParamDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ty(&self) -> Option<TypeRef> {
        self.ty
    }

    pub fn set_type(&mut self, ty: TypeRef) -> Result<(), SymbolError> {
        if self.ty.is_some() {
            return Err(SymbolError::TypeAlreadySet);
        }
        self.ty = Some(ty);
        Ok(())
    }

    pub fn attr(&self) -> Option<TypeParamAttr> {
        self.attr
    }

    pub fn set_attr(&mut self, attr: TypeParamAttr) -> Result<(), SymbolError> {
        if self.attr.is_some() {
            return Err(SymbolError::TypeParamAttrAlreadySet);
        }
        self.attr = Some(attr);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiscKind {
    ConstructName,
    ScopeName,
    PassName,
    ComplexPartRe,
    ComplexPartIm,
    KindParamInquiry,
    LenParamInquiry,
    SelectTypeAssociateName,
}

impl MiscKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MiscKind::ConstructName => "ConstructName",
            MiscKind::ScopeName => "ScopeName",
            MiscKind::PassName => "PassName",
            MiscKind::ComplexPartRe => "ComplexPartRe",
            MiscKind::ComplexPartIm => "ComplexPartIm",
            MiscKind::KindParamInquiry => "KindParamInquiry",
            MiscKind::LenParamInquiry => "LenParamInquiry",
            MiscKind::SelectTypeAssociateName => "SelectTypeAssociateName",
        }
    }
}

/// Transient classification for names that are not first-class entities.
#[derive(Debug, Clone)]
pub struct MiscDetails {
    pub kind: MiscKind,
}

#[derive(Debug, Clone, Default)]
pub struct UserReductionDetails {
    pub type_list: Vec<TypeRef>,
}

impl UserReductionDetails {
    pub fn add_type(&mut self, ty: TypeRef) {
        self.type_list.push(ty);
    }
}

#[derive(Debug, Clone)]
pub enum Details {
    Unknown,
    MainProgram(MainProgramDetails),
    Module(ModuleDetails),
    Subprogram(SubprogramDetails),
    SubprogramName(SubprogramNameDetails),
    Entity(EntityDetails),
    ObjectEntity(ObjectEntityDetails),
    ProcEntity(ProcEntityDetails),
    DerivedType(DerivedTypeDetails),
    Use(UseDetails),
    UseError(UseErrorDetails),
    HostAssoc(HostAssocDetails),
    Generic(GenericDetails),
    ProcBinding(ProcBindingDetails),
    Namelist(NamelistDetails),
    CommonBlock(CommonBlockDetails),
    TypeParam(TypeParamDetails),
    Misc(MiscDetails),
    AssocEntity(AssocEntityDetails),
    UserReduction(UserReductionDetails),
}

impl Details {
    /// Stable kind name used by dumps and internal-error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Details::Unknown => "Unknown",
            Details::MainProgram(_) => "MainProgram",
            Details::Module(_) => "Module",
            Details::Subprogram(_) => "Subprogram",
            Details::SubprogramName(_) => "SubprogramName",
            Details::Entity(_) => "Entity",
            Details::ObjectEntity(_) => "ObjectEntity",
            Details::ProcEntity(_) => "ProcEntity",
            Details::DerivedType(_) => "DerivedType",
            Details::Use(_) => "Use",
            Details::UseError(_) => "UseError",
            Details::HostAssoc(_) => "HostAssoc",
            Details::Generic(_) => "Generic",
            Details::ProcBinding(_) => "ProcBinding",
            Details::Namelist(_) => "Namelist",
            Details::CommonBlock(_) => "CommonBlock",
            Details::TypeParam(_) => "TypeParam",
            Details::Misc(_) => "Misc",
            Details::AssocEntity(_) => "AssocEntity",
            Details::UserReduction(_) => "UserReduction",
        }
    }

    /// Try-as-capability accessor for the bind-name capability. `None`
    /// means the kind does not carry the capability at all; callers that
    /// require it turn that into an internal error.
    pub fn with_bind_name(&self) -> Option<&dyn WithBindName> {
        match self {
            Details::Entity(x) => Some(x),
            Details::ObjectEntity(x) => Some(&x.entity),
            Details::ProcEntity(x) => Some(&x.entity),
            Details::AssocEntity(x) => Some(&x.entity),
            Details::Subprogram(x) => Some(x),
            Details::CommonBlock(x) => Some(x),
            _ => None,
        }
    }

    pub fn with_bind_name_mut(&mut self) -> Option<&mut dyn WithBindName> {
        match self {
            Details::Entity(x) => Some(x),
            Details::ObjectEntity(x) => Some(&mut x.entity),
            Details::ProcEntity(x) => Some(&mut x.entity),
            Details::AssocEntity(x) => Some(&mut x.entity),
            Details::Subprogram(x) => Some(x),
            Details::CommonBlock(x) => Some(x),
            _ => None,
        }
    }
}
