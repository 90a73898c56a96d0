// ABOUTME: Shared runtime state for watch mode
// Tracks export passes and snapshot availability across the watch loop

use chrono::{DateTime, Local};
use std::sync::{Arc, Mutex};

#[derive(Debug)]
pub struct WatchState {
    pub export_count: Arc<Mutex<u64>>,
    pub last_export: Arc<Mutex<Option<DateTime<Local>>>>,
    pub last_line_count: Arc<Mutex<u64>>,
    pub source_available: Arc<Mutex<bool>>,
}

impl WatchState {
    pub fn new() -> Self {
        Self {
            export_count: Arc::new(Mutex::new(0)),
            last_export: Arc::new(Mutex::new(None)),
            last_line_count: Arc::new(Mutex::new(0)),
            source_available: Arc::new(Mutex::new(false)),
        }
    }

    pub fn record_export(&self, lines: u64) {
        *self.export_count.lock().unwrap() += 1;
        *self.last_export.lock().unwrap() = Some(Local::now());
        *self.last_line_count.lock().unwrap() = lines;
        *self.source_available.lock().unwrap() = true;
    }

    pub fn record_failure(&self) {
        *self.source_available.lock().unwrap() = false;
    }
}

impl Default for WatchState {
    fn default() -> Self {
        Self::new()
    }
}

/// Events feeding the watch loop
#[derive(Debug, Clone)]
pub enum WatchEvent {
    /// The filesystem watcher saw the snapshot change
    FileChanged,
    /// Stop watching and exit cleanly
    Quit,
}
