//! Column addressing types shared by all result kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A column qualified by the relation (table) it belongs to
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColumnIdentifier {
    pub table_identifier: String,
    pub column_identifier: String,
}

impl ColumnIdentifier {
    pub fn new(table_identifier: impl Into<String>, column_identifier: impl Into<String>) -> Self {
        Self {
            table_identifier: table_identifier.into(),
            column_identifier: column_identifier.into(),
        }
    }
}

impl fmt::Display for ColumnIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table_identifier, self.column_identifier)
    }
}

/// An unordered set of columns
///
/// Columns are kept sorted and deduplicated so equal sets compare and print equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<ColumnIdentifier>", into = "Vec<ColumnIdentifier>")]
pub struct ColumnCombination {
    columns: Vec<ColumnIdentifier>,
}

impl ColumnCombination {
    pub fn new(columns: impl IntoIterator<Item = ColumnIdentifier>) -> Self {
        let mut columns: Vec<ColumnIdentifier> = columns.into_iter().collect();
        columns.sort();
        columns.dedup();
        Self { columns }
    }

    pub fn columns(&self) -> &[ColumnIdentifier] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, column: &ColumnIdentifier) -> bool {
        self.columns.binary_search(column).is_ok()
    }
}

impl From<Vec<ColumnIdentifier>> for ColumnCombination {
    fn from(columns: Vec<ColumnIdentifier>) -> Self {
        Self::new(columns)
    }
}

impl From<ColumnCombination> for Vec<ColumnIdentifier> {
    fn from(combination: ColumnCombination) -> Self {
        combination.columns
    }
}

impl FromIterator<ColumnIdentifier> for ColumnCombination {
    fn from_iter<I: IntoIterator<Item = ColumnIdentifier>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for ColumnCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_column_list(f, &self.columns)
    }
}

/// An ordered list of columns; position matters (inclusion dependencies)
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColumnPermutation {
    columns: Vec<ColumnIdentifier>,
}

impl ColumnPermutation {
    pub fn new(columns: impl IntoIterator<Item = ColumnIdentifier>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
        }
    }

    pub fn columns(&self) -> &[ColumnIdentifier] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<ColumnIdentifier> for ColumnPermutation {
    fn from_iter<I: IntoIterator<Item = ColumnIdentifier>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for ColumnPermutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_column_list(f, &self.columns)
    }
}

fn write_column_list(f: &mut fmt::Formatter<'_>, columns: &[ColumnIdentifier]) -> fmt::Result {
    write!(f, "[")?;
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", column)?;
    }
    write!(f, "]")
}
