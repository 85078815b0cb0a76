//! Configuration requirements declared by algorithms and the values callers supply.
//!
//! Every value carries an explicit [`ConfigurationKind`] tag; the injector uses that
//! tag to pick the setter, so no overload resolution is involved.

use crate::input::{FileInputGenerator, RelationalInputGenerator};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Payload kind of a configuration value or requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigurationKind {
    Text,
    Boolean,
    Integer,
    RelationalInput,
    FileInput,
}

impl ConfigurationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigurationKind::Text => "text",
            ConfigurationKind::Boolean => "boolean",
            ConfigurationKind::Integer => "integer",
            ConfigurationKind::RelationalInput => "relational input",
            ConfigurationKind::FileInput => "file input",
        }
    }
}

impl fmt::Display for ConfigurationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive bounds on the number of values for one requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arity {
    pub min: usize,
    /// `None` means unbounded
    pub max: Option<usize>,
}

impl Arity {
    pub const fn exactly(count: usize) -> Self {
        Self {
            min: count,
            max: Some(count),
        }
    }

    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }
}

impl Default for Arity {
    fn default() -> Self {
        Self::exactly(1)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{}", max),
            Some(max) => write!(f, "{}..={}", self.min, max),
            None => write!(f, "at least {}", self.min),
        }
    }
}

/// One configuration slot an algorithm declares
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationRequirement {
    pub identifier: String,
    pub kind: ConfigurationKind,
    #[serde(default)]
    pub arity: Arity,
}

impl ConfigurationRequirement {
    pub fn new(identifier: impl Into<String>, kind: ConfigurationKind) -> Self {
        Self {
            identifier: identifier.into(),
            kind,
            arity: Arity::default(),
        }
    }

    pub fn text(identifier: impl Into<String>) -> Self {
        Self::new(identifier, ConfigurationKind::Text)
    }

    pub fn boolean(identifier: impl Into<String>) -> Self {
        Self::new(identifier, ConfigurationKind::Boolean)
    }

    pub fn integer(identifier: impl Into<String>) -> Self {
        Self::new(identifier, ConfigurationKind::Integer)
    }

    pub fn relational_input(identifier: impl Into<String>) -> Self {
        Self::new(identifier, ConfigurationKind::RelationalInput)
    }

    pub fn file_input(identifier: impl Into<String>) -> Self {
        Self::new(identifier, ConfigurationKind::FileInput)
    }

    pub fn with_arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }
}

/// Values of a single kind
#[derive(Clone)]
pub enum ConfigurationPayload {
    Text(Vec<String>),
    Boolean(Vec<bool>),
    Integer(Vec<i64>),
    RelationalInput(Vec<Arc<dyn RelationalInputGenerator>>),
    FileInput(Vec<Arc<dyn FileInputGenerator>>),
}

impl ConfigurationPayload {
    pub fn kind(&self) -> ConfigurationKind {
        match self {
            ConfigurationPayload::Text(_) => ConfigurationKind::Text,
            ConfigurationPayload::Boolean(_) => ConfigurationKind::Boolean,
            ConfigurationPayload::Integer(_) => ConfigurationKind::Integer,
            ConfigurationPayload::RelationalInput(_) => ConfigurationKind::RelationalInput,
            ConfigurationPayload::FileInput(_) => ConfigurationKind::FileInput,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ConfigurationPayload::Text(values) => values.len(),
            ConfigurationPayload::Boolean(values) => values.len(),
            ConfigurationPayload::Integer(values) => values.len(),
            ConfigurationPayload::RelationalInput(values) => values.len(),
            ConfigurationPayload::FileInput(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for ConfigurationPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationPayload::Text(values) => f.debug_tuple("Text").field(values).finish(),
            ConfigurationPayload::Boolean(values) => {
                f.debug_tuple("Boolean").field(values).finish()
            }
            ConfigurationPayload::Integer(values) => {
                f.debug_tuple("Integer").field(values).finish()
            }
            ConfigurationPayload::RelationalInput(values) => {
                let names: Vec<String> = values.iter().map(|g| g.describe()).collect();
                f.debug_tuple("RelationalInput").field(&names).finish()
            }
            ConfigurationPayload::FileInput(values) => {
                let paths: Vec<_> = values.iter().map(|g| g.input_file().to_path_buf()).collect();
                f.debug_tuple("FileInput").field(&paths).finish()
            }
        }
    }
}

/// A caller-supplied, identifier-tagged configuration value
#[derive(Debug, Clone)]
pub struct ConfigurationValue {
    pub identifier: String,
    pub payload: ConfigurationPayload,
}

impl ConfigurationValue {
    pub fn new(identifier: impl Into<String>, payload: ConfigurationPayload) -> Self {
        Self {
            identifier: identifier.into(),
            payload,
        }
    }

    pub fn text<I, S>(identifier: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            identifier,
            ConfigurationPayload::Text(values.into_iter().map(Into::into).collect()),
        )
    }

    pub fn boolean(identifier: impl Into<String>, values: impl IntoIterator<Item = bool>) -> Self {
        Self::new(
            identifier,
            ConfigurationPayload::Boolean(values.into_iter().collect()),
        )
    }

    pub fn integer(identifier: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        Self::new(
            identifier,
            ConfigurationPayload::Integer(values.into_iter().collect()),
        )
    }

    pub fn relational_input(
        identifier: impl Into<String>,
        values: impl IntoIterator<Item = Arc<dyn RelationalInputGenerator>>,
    ) -> Self {
        Self::new(
            identifier,
            ConfigurationPayload::RelationalInput(values.into_iter().collect()),
        )
    }

    pub fn file_input(
        identifier: impl Into<String>,
        values: impl IntoIterator<Item = Arc<dyn FileInputGenerator>>,
    ) -> Self {
        Self::new(
            identifier,
            ConfigurationPayload::FileInput(values.into_iter().collect()),
        )
    }

    pub fn kind(&self) -> ConfigurationKind {
        self.payload.kind()
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
