use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter};

use crate::core::error::MenuError;

/// Transform actions the menu can offer for a selection
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TransformKind {
    Extract,
    Replace,
    Split,
    KeepOnly,
    Exclude,
}

impl FromStr for TransformKind {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "extract" => Ok(Self::Extract),
            "replace" => Ok(Self::Replace),
            "split" => Ok(Self::Split),
            "keeponly" | "keep_only" | "keep-only" => Ok(Self::KeepOnly),
            "exclude" => Ok(Self::Exclude),
            _ => Err(MenuError::UnknownTransform(s.to_string())),
        }
    }
}

/// A single entry of the transform catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionItem {
    pub transform: TransformKind,
    /// Display name, also used as the translation key
    pub name: &'static str,
}

impl ActionItem {
    pub const fn new(transform: TransformKind, name: &'static str) -> Self {
        Self { transform, name }
    }
}

/// The fixed transform catalog. Order is menu order.
pub const ACTION_CATALOG: [ActionItem; 5] = [
    ActionItem::new(TransformKind::Extract, "Extract"),
    ActionItem::new(TransformKind::Replace, "Replace"),
    ActionItem::new(TransformKind::Split, "Split"),
    ActionItem::new(TransformKind::KeepOnly, "Keep Only"),
    ActionItem::new(TransformKind::Exclude, "Exclude"),
];

/// Look up the catalog entry for a transform kind
pub fn catalog_item(kind: TransformKind) -> ActionItem {
    // Variants are declared in catalog order
    ACTION_CATALOG[kind as usize]
}

/// Parse a comma separated list of transform names (e.g. "extract,split")
pub fn parse_transform_list(s: &str) -> Result<Vec<TransformKind>, MenuError> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(TransformKind::from_str)
        .collect()
}

/// Data type of a column as reported by the data viewer.
///
/// Parsing never fails: tags this crate does not know about are kept
/// verbatim in `Unknown` and treated like any other scalar type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnDataType {
    Text,
    Binary,
    Boolean,
    Float,
    Decimal,
    Integer,
    BigInt,
    Mixed,
    Date,
    Time,
    DateTime,
    List,
    Map,
    Geo,
    Other,
    Any,
    Unknown(String),
}

impl ColumnDataType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "TEXT",
            Self::Binary => "BINARY",
            Self::Boolean => "BOOLEAN",
            Self::Float => "FLOAT",
            Self::Decimal => "DECIMAL",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Mixed => "MIXED",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::DateTime => "DATETIME",
            Self::List => "LIST",
            Self::Map => "MAP",
            Self::Geo => "GEO",
            Self::Other => "OTHER",
            Self::Any => "ANY",
            Self::Unknown(tag) => tag.as_str(),
        }
    }

    /// Types whose values can be addressed below the whole-value level
    pub fn is_structured_or_text(&self) -> bool {
        matches!(self, Self::Text | Self::List | Self::Map)
    }

    /// Heterogeneous or opaque types that have no text-level actions
    pub fn is_opaque(&self) -> bool {
        matches!(self, Self::Mixed | Self::Binary)
    }
}

impl From<&str> for ColumnDataType {
    fn from(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "TEXT" => Self::Text,
            "BINARY" => Self::Binary,
            "BOOLEAN" => Self::Boolean,
            "FLOAT" => Self::Float,
            "DECIMAL" => Self::Decimal,
            "INTEGER" => Self::Integer,
            "BIGINT" => Self::BigInt,
            "MIXED" => Self::Mixed,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "DATETIME" => Self::DateTime,
            "LIST" => Self::List,
            "MAP" => Self::Map,
            "GEO" => Self::Geo,
            "OTHER" => Self::Other,
            "ANY" => Self::Any,
            _ => Self::Unknown(s.to_string()),
        }
    }
}

impl From<String> for ColumnDataType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<ColumnDataType> for String {
    fn from(t: ColumnDataType) -> Self {
        t.as_str().to_string()
    }
}

impl FromStr for ColumnDataType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for ColumnDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
