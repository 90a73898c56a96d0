// ABOUTME: Main library module that exports the public API
// Central module for the desmos-tables exporter

pub mod app;
pub mod data;
pub mod export;
pub mod utils;

// Re-export commonly used types
pub use app::{AppConfig, WatchEvent, WatchState};
pub use data::{Expression, GraphState, SourceKind, StateSource, StateSourceFactory};
pub use export::{OutputTarget, TableExporter, ValueFormat};
pub use utils::{ExportError, Result};
