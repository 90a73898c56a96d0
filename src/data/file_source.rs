// ABOUTME: File-backed StateSource implementations for saved snapshots
// Covers a single state file, a snapshot directory, and piped stdin

use crate::app::config::AppConfig;
use crate::data::model::GraphState;
use crate::data::source::StateSource;
use crate::utils::error::{ExportError, Result};
use async_trait::async_trait;
use directories::ProjectDirs;
use glob::glob;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;
use tracing::debug;

/// Reads one saved state file; change detection via modification time
pub struct FileStateSource {
    path: PathBuf,
    last_seen: Mutex<Option<SystemTime>>,
}

impl FileStateSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(ExportError::Config(format!(
                "Saved state file not found: {}. Export your graph state from the calculator first.",
                path.display()
            )));
        }
        Ok(Self {
            path,
            last_seen: Mutex::new(None),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn modified(&self) -> Result<SystemTime> {
        Ok(fs::metadata(&self.path)?.modified()?)
    }
}

#[async_trait]
impl StateSource for FileStateSource {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    async fn has_changed(&mut self) -> Result<bool> {
        let modified = self.modified()?;
        let last_seen = *self.last_seen.lock().unwrap();
        match last_seen {
            None => Ok(true),
            Some(seen) => Ok(modified > seen),
        }
    }

    async fn load_state(&self) -> Result<GraphState> {
        let modified = self.modified()?;
        let content = fs::read_to_string(&self.path)?;
        let state = GraphState::from_json(&content)?;
        *self.last_seen.lock().unwrap() = Some(modified);
        debug!(path = %self.path.display(), expressions = state.expressions().len(), "loaded snapshot");
        Ok(state)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Reads the most recently modified `*.json` snapshot in a directory
pub struct SaveDirSource {
    dir: PathBuf,
    // Path and mtime of the snapshot served by the last load
    last_seen: Mutex<Option<(PathBuf, SystemTime)>>,
}

impl SaveDirSource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(ExportError::Config(format!(
                "Snapshot directory not found: {}",
                dir.display()
            )));
        }
        Ok(Self {
            dir,
            last_seen: Mutex::new(None),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve a snapshot directory without an explicit path.
    ///
    /// Checks, in order: the DESMOS_TABLES_STATE_DIR environment variable
    /// (comma-separated candidates), the configured state directories, and
    /// the platform data directory for this tool.
    pub fn resolve_default(config: &AppConfig) -> Result<Self> {
        if let Ok(env_dirs) = std::env::var("DESMOS_TABLES_STATE_DIR") {
            for candidate in env_dirs.split(',') {
                let dir = expand_tilde(candidate.trim());
                if dir.is_dir() {
                    return Self::new(dir);
                }
            }
        }

        for candidate in &config.state_dirs {
            let dir = expand_tilde(candidate);
            if dir.is_dir() {
                return Self::new(dir);
            }
        }

        if let Some(proj_dirs) = ProjectDirs::from("com", "desmos-tables", "desmos-tables") {
            let dir = proj_dirs.data_dir().to_path_buf();
            if dir.is_dir() {
                return Self::new(dir);
            }
        }

        Err(ExportError::StateNotFound)
    }

    /// Newest snapshot file in the directory by modification time
    fn latest_snapshot(&self) -> Result<(PathBuf, SystemTime)> {
        let pattern = self.dir.join("*.json");
        let pattern = pattern.to_string_lossy();

        let mut latest: Option<(PathBuf, SystemTime)> = None;
        for entry in
            glob(&pattern).map_err(|e| ExportError::Config(format!("Glob pattern error: {}", e)))?
        {
            let path = entry.map_err(|e| ExportError::Config(format!("Glob error: {}", e)))?;
            let modified = fs::metadata(&path)?.modified()?;
            let newer = match &latest {
                None => true,
                Some((_, current)) => modified > *current,
            };
            if newer {
                latest = Some((path, modified));
            }
        }

        latest.ok_or(ExportError::StateNotFound)
    }
}

#[async_trait]
impl StateSource for SaveDirSource {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    async fn has_changed(&mut self) -> Result<bool> {
        let (path, modified) = self.latest_snapshot()?;
        let last_seen = self.last_seen.lock().unwrap().clone();
        match last_seen {
            None => Ok(true),
            Some((seen_path, seen_time)) => Ok(path != seen_path || modified > seen_time),
        }
    }

    async fn load_state(&self) -> Result<GraphState> {
        let (path, modified) = self.latest_snapshot()?;
        let content = fs::read_to_string(&path)?;
        let state = GraphState::from_json(&content)?;
        debug!(path = %path.display(), "loaded latest snapshot");
        *self.last_seen.lock().unwrap() = Some((path, modified));
        Ok(state)
    }

    fn describe(&self) -> String {
        format!("latest snapshot in {}", self.dir.display())
    }
}

/// One-shot snapshot piped through stdin; never reports changes
pub struct StdinStateSource {
    cached: Mutex<Option<GraphState>>,
}

impl StdinStateSource {
    pub fn new() -> Self {
        Self {
            cached: Mutex::new(None),
        }
    }
}

impl Default for StdinStateSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StateSource for StdinStateSource {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    async fn has_changed(&mut self) -> Result<bool> {
        // stdin cannot be re-read; the first load is the only one
        Ok(false)
    }

    async fn load_state(&self) -> Result<GraphState> {
        if let Some(state) = self.cached.lock().unwrap().clone() {
            return Ok(state);
        }
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        let state = GraphState::from_json(&content)?;
        *self.cached.lock().unwrap() = Some(state.clone());
        Ok(state)
    }

    fn describe(&self) -> String {
        "stdin".to_string()
    }
}

/// Expand a leading `~` to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
