pub mod error;

pub use error::{ExportError, Result};
