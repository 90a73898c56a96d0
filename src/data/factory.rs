// ABOUTME: Factory for creating the different snapshot source implementations
// Resolves an explicit file, a snapshot directory, or piped stdin into a StateSource

use super::file_source::{FileStateSource, SaveDirSource, StdinStateSource};
use super::source::StateSource;
use crate::app::config::AppConfig;
use crate::utils::error::{ExportError, Result};
use std::path::PathBuf;

/// Where the snapshot for an export run comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// An explicit saved state file
    File(PathBuf),
    /// The newest snapshot in a directory; None means the default lookup
    SaveDir(Option<PathBuf>),
    /// A snapshot piped through stdin
    Stdin,
}

impl SourceKind {
    pub fn display_name(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::SaveDir(Some(dir)) => format!("latest in {}", dir.display()),
            Self::SaveDir(None) => "latest in default snapshot directory".to_string(),
            Self::Stdin => "stdin".to_string(),
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

pub struct StateSourceFactory;

impl StateSourceFactory {
    /// Create a state source of the specified kind
    pub fn create(kind: &SourceKind, config: &AppConfig) -> Result<Box<dyn StateSource>> {
        match kind {
            SourceKind::File(path) => {
                let source = FileStateSource::new(path.clone())?;
                Ok(Box::new(source))
            }
            SourceKind::SaveDir(Some(dir)) => {
                let source = SaveDirSource::new(dir.clone())?;
                Ok(Box::new(source))
            }
            SourceKind::SaveDir(None) => {
                let source = SaveDirSource::resolve_default(config)?;
                Ok(Box::new(source))
            }
            SourceKind::Stdin => Ok(Box::new(StdinStateSource::new())),
        }
    }

    /// Pick a source from the command line: an explicit file wins, then an
    /// explicit snapshot directory, then piped stdin, then the default
    /// snapshot directory lookup.
    pub fn resolve(
        file: Option<&str>,
        latest_dir: Option<&str>,
        stdin_piped: bool,
        config: &AppConfig,
    ) -> Result<(Box<dyn StateSource>, SourceKind)> {
        let kind = if let Some(path) = file {
            SourceKind::File(PathBuf::from(path))
        } else if let Some(dir) = latest_dir {
            SourceKind::SaveDir(Some(PathBuf::from(dir)))
        } else if stdin_piped {
            SourceKind::Stdin
        } else {
            SourceKind::SaveDir(None)
        };

        match Self::create(&kind, config) {
            Ok(source) => Ok((source, kind)),
            Err(ExportError::StateNotFound) => Err(ExportError::Config(
                "No snapshot available. Pass a saved state file, pipe one on stdin, \
                 or point DESMOS_TABLES_STATE_DIR at your snapshot directory."
                    .to_string(),
            )),
            Err(e) => Err(e),
        }
    }
}
