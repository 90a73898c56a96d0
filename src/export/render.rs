// ABOUTME: Value-list rendering strategies for exported table columns
// Default output matches the host's own list-to-text conversion

use serde::{Deserialize, Serialize};

use crate::data::model::CellValue;

/// Strategy for turning a column's ordered value list into text.
///
/// The exporter never inspects values itself; swapping the renderer changes
/// the value text without touching iteration logic.
pub trait ValueRenderer: Send + Sync {
    fn render(&self, values: &[CellValue]) -> String;
}

/// Selects which [`ValueRenderer`] the exporter uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    Plain,
    Bracketed,
    Json,
}

impl ValueFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "plain" | "host" | "default" => Some(Self::Plain),
            "bracketed" | "list" => Some(Self::Bracketed),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain => "plain",
            Self::Bracketed => "bracketed",
            Self::Json => "json",
        }
    }

    /// Build the renderer this format selects
    pub fn renderer(&self) -> Box<dyn ValueRenderer> {
        match self {
            Self::Plain => Box::new(PlainRenderer),
            Self::Bracketed => Box::new(BracketedRenderer),
            Self::Json => Box::new(JsonRenderer),
        }
    }
}

impl Default for ValueFormat {
    fn default() -> Self {
        Self::Plain
    }
}

impl std::fmt::Display for ValueFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Host-compatible rendering: comma-joined, no brackets, no spaces.
/// Empty cells become empty segments, so `[1, null, 3]` renders as `1,,3`.
pub struct PlainRenderer;

impl ValueRenderer for PlainRenderer {
    fn render(&self, values: &[CellValue]) -> String {
        values
            .iter()
            .map(render_cell)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Calculator list-literal rendering: `[1, 2, 3]`
pub struct BracketedRenderer;

impl ValueRenderer for BracketedRenderer {
    fn render(&self, values: &[CellValue]) -> String {
        let joined = values
            .iter()
            .map(render_cell)
            .collect::<Vec<_>>()
            .join(", ");
        format!("[{}]", joined)
    }
}

/// Verbatim JSON rendering of the value array
pub struct JsonRenderer;

impl ValueRenderer for JsonRenderer {
    fn render(&self, values: &[CellValue]) -> String {
        serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
    }
}

fn render_cell(value: &CellValue) -> String {
    match value {
        CellValue::Empty => String::new(),
        CellValue::Number(n) => format_number(*n),
        CellValue::Text(t) => t.clone(),
    }
}

/// Format a cell number the way the host's string conversion does:
/// integral values drop the decimal point, infinities spell out.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
