//! Opaque stand-ins for external collaborators: the type table and the
//! expression/initializer provider. The symbol table stores these values
//! but never interprets them beyond rank queries and dumping.

use std::fmt;

/// Non-owning reference into the externally owned type table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeRef(pub u32);

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Opaque typed value supplied by the expression provider, carried as its
/// stable textual form for dumping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitValue(String);

impl InitValue {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl fmt::Display for InitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeSpec {
    Explicit { lower: i64, upper: i64 },
    AssumedShape,
    DeferredShape,
    AssumedSize,
    AssumedRank,
}

impl fmt::Display for ShapeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeSpec::Explicit { lower, upper } => write!(f, "{lower}:{upper}"),
            ShapeSpec::AssumedShape => write!(f, "1:"),
            ShapeSpec::DeferredShape => write!(f, ":"),
            ShapeSpec::AssumedSize => write!(f, "*"),
            ShapeSpec::AssumedRank => write!(f, ".."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArraySpec(Vec<ShapeSpec>);

impl ArraySpec {
    pub fn new(specs: Vec<ShapeSpec>) -> Self {
        Self(specs)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn rank(&self) -> u32 {
        self.0.len() as u32
    }

    pub fn is_assumed_rank(&self) -> bool {
        matches!(self.0.first(), Some(ShapeSpec::AssumedRank))
    }

    pub fn specs(&self) -> &[ShapeSpec] {
        &self.0
    }
}

/// Rank of an ASSOCIATE/SELECT construct entity, when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssocRank {
    Exact(u32),
    AssumedSize,
    AssumedRank,
}
