// ABOUTME: Typed model of the host calculator's saved state snapshot
// Mirrors the documented { expressions: { list: [...] } } JSON shape

use serde::{Deserialize, Serialize};

use crate::utils::error::Result;

/// A full saved graph state as written by the host calculator.
///
/// Only the parts this tool consumes are modeled; everything else in the
/// snapshot is ignored by serde. The host owns the data and its schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphState {
    pub version: Option<u32>,
    pub expressions: ExpressionList,
}

/// The ordered expression list inside a snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpressionList {
    #[serde(default)]
    pub list: Vec<Expression>,
}

/// One entry in the host's expression list, tagged by its `type` field
///
/// The host knows more variants than we do (`expression`, `text`, `image`,
/// and whatever future versions add). Everything that is not a folder or a
/// table lands in `Other` and is skipped by the exporter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Expression {
    Folder(Folder),
    Table(Table),
    #[serde(other)]
    Other,
}

/// A folder entry grouping the expressions that follow it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Folder {
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
}

/// A table entry holding an ordered set of columns
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    pub id: Option<String>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

/// One table column: a display expression paired with its value list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Column {
    #[serde(default)]
    pub latex: String,
    #[serde(default)]
    pub values: Vec<CellValue>,
}

/// A single table cell as stored by the host: a number, a text fragment,
/// or an empty slot (JSON null)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
}

impl GraphState {
    /// Parse a snapshot from its JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The ordered expression sequence of this snapshot
    pub fn expressions(&self) -> &[Expression] {
        &self.expressions.list
    }
}

impl Table {
    /// The ordered columns of this table
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
            || matches!(self, CellValue::Text(t) if t.is_empty())
    }
}
