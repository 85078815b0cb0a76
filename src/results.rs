//! Result variants produced by profiling algorithms.

use crate::types::{ColumnCombination, ColumnIdentifier, ColumnPermutation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag naming a result variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    FunctionalDependency,
    InclusionDependency,
    UniqueColumnCombination,
}

impl ResultKind {
    pub const ALL: [ResultKind; 3] = [
        ResultKind::FunctionalDependency,
        ResultKind::InclusionDependency,
        ResultKind::UniqueColumnCombination,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResultKind::FunctionalDependency => "functional_dependency",
            ResultKind::InclusionDependency => "inclusion_dependency",
            ResultKind::UniqueColumnCombination => "unique_column_combination",
        }
    }

    /// Short suffix used for per-kind result files
    pub fn file_suffix(self) -> &'static str {
        match self {
            ResultKind::FunctionalDependency => "fds",
            ResultKind::InclusionDependency => "inds",
            ResultKind::UniqueColumnCombination => "uccs",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `determinant -> dependant`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionalDependency {
    pub determinant: ColumnCombination,
    pub dependant: ColumnIdentifier,
}

impl FunctionalDependency {
    pub fn new(determinant: ColumnCombination, dependant: ColumnIdentifier) -> Self {
        Self {
            determinant,
            dependant,
        }
    }
}

impl fmt::Display for FunctionalDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.determinant, self.dependant)
    }
}

/// Values of `dependant` are contained in the values of `referenced`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InclusionDependency {
    pub dependant: ColumnPermutation,
    pub referenced: ColumnPermutation,
}

impl InclusionDependency {
    pub fn new(dependant: ColumnPermutation, referenced: ColumnPermutation) -> Self {
        Self {
            dependant,
            referenced,
        }
    }
}

impl fmt::Display for InclusionDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[={}", self.dependant, self.referenced)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UniqueColumnCombination {
    pub column_combination: ColumnCombination,
}

impl UniqueColumnCombination {
    pub fn new(column_combination: ColumnCombination) -> Self {
        Self { column_combination }
    }
}

impl fmt::Display for UniqueColumnCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_combination)
    }
}

/// A single result, tagged by its variant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DependencyResult {
    FunctionalDependency(FunctionalDependency),
    InclusionDependency(InclusionDependency),
    UniqueColumnCombination(UniqueColumnCombination),
}

impl DependencyResult {
    pub fn kind(&self) -> ResultKind {
        match self {
            DependencyResult::FunctionalDependency(_) => ResultKind::FunctionalDependency,
            DependencyResult::InclusionDependency(_) => ResultKind::InclusionDependency,
            DependencyResult::UniqueColumnCombination(_) => ResultKind::UniqueColumnCombination,
        }
    }
}

impl fmt::Display for DependencyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyResult::FunctionalDependency(fd) => fd.fmt(f),
            DependencyResult::InclusionDependency(ind) => ind.fmt(f),
            DependencyResult::UniqueColumnCombination(ucc) => ucc.fmt(f),
        }
    }
}

impl From<FunctionalDependency> for DependencyResult {
    fn from(fd: FunctionalDependency) -> Self {
        DependencyResult::FunctionalDependency(fd)
    }
}

impl From<InclusionDependency> for DependencyResult {
    fn from(ind: InclusionDependency) -> Self {
        DependencyResult::InclusionDependency(ind)
    }
}

impl From<UniqueColumnCombination> for DependencyResult {
    fn from(ucc: UniqueColumnCombination) -> Self {
        DependencyResult::UniqueColumnCombination(ucc)
    }
}
