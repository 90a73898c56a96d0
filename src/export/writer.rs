// ABOUTME: Output target handling for export passes
// Streams lines to stdout by default or rewrites a file when requested

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use tracing::info;

use crate::data::model::GraphState;
use crate::export::exporter::TableExporter;
use crate::utils::error::Result;

/// Where an export pass writes its lines
#[derive(Debug, Clone)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    pub fn from_arg(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::File(PathBuf::from(p)),
            None => Self::Stdout,
        }
    }

    /// Open a writer for this target. A file target is truncated, so each
    /// pass leaves a complete export behind.
    pub fn open(&self) -> Result<Box<dyn Write>> {
        match self {
            Self::Stdout => Ok(Box::new(io::stdout())),
            Self::File(path) => {
                let file = File::create(path)?;
                Ok(Box::new(BufWriter::new(file)))
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Stdout => "stdout".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// Run one export pass against `target`, returning the line count
pub fn write_export(
    exporter: &TableExporter,
    state: &GraphState,
    target: &OutputTarget,
) -> Result<u64> {
    let mut writer = target.open()?;
    let count = exporter.export_to(state, &mut writer)?;
    writer.flush()?;
    info!(lines = count, dest = %target.describe(), "exported table data");
    Ok(count)
}
