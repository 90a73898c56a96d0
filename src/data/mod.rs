pub mod factory;
pub mod file_source;
pub mod model;
pub mod source;
pub mod watcher;

#[cfg(test)]
mod model_test;
#[cfg(test)]
mod source_test;

pub use factory::{SourceKind, StateSourceFactory};
pub use file_source::{FileStateSource, SaveDirSource, StdinStateSource};
pub use model::{CellValue, Column, Expression, ExpressionList, Folder, GraphState, Table};
pub use source::StateSource;
pub use watcher::{watch_path_for, ExportWatcher};
