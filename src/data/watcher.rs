// ABOUTME: Watch mode re-exporting whenever the snapshot changes
// Combines an interval poll with filesystem events from notify

use crate::app::state::{WatchEvent, WatchState};
use crate::data::factory::SourceKind;
use crate::data::file_source::SaveDirSource;
use crate::data::source::StateSource;
use crate::export::exporter::TableExporter;
use crate::export::writer::{write_export, OutputTarget};
use crate::utils::error::Result;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use notify::Watcher;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct ExportWatcher {
    source: Box<dyn StateSource>,
    exporter: TableExporter,
    target: OutputTarget,
    state: Arc<WatchState>,
    event_rx: Receiver<WatchEvent>,
    poll_interval: Duration,
    _file_watcher: Option<notify::RecommendedWatcher>,
}

impl ExportWatcher {
    pub fn new(
        source: Box<dyn StateSource>,
        exporter: TableExporter,
        target: OutputTarget,
        state: Arc<WatchState>,
        event_rx: Receiver<WatchEvent>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            source,
            exporter,
            target,
            state,
            event_rx,
            poll_interval,
            _file_watcher: None,
        }
    }

    /// Attach a filesystem watcher on the snapshot path so changes are
    /// picked up before the next poll tick
    pub fn start_file_watching(&mut self, path: PathBuf, event_tx: Sender<WatchEvent>) -> Result<()> {
        let mut watcher =
            notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
                if let Ok(event) = res {
                    if event.kind.is_modify() || event.kind.is_create() {
                        let _ = event_tx.send(WatchEvent::FileChanged);
                    }
                }
            })?;
        watcher.watch(&path, notify::RecursiveMode::NonRecursive)?;
        debug!(path = %path.display(), "file watcher started");
        self._file_watcher = Some(watcher);
        Ok(())
    }

    pub async fn run(mut self) {
        // First pass happens right away; later passes wait for changes
        if let Err(e) = self.export_pass().await {
            eprintln!("Export error: {}", e);
            self.state.record_failure();
        }

        loop {
            match self.event_rx.recv_timeout(self.poll_interval) {
                Ok(WatchEvent::Quit) => break,
                Ok(WatchEvent::FileChanged) => {
                    debug!("snapshot change event");
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    // No event senders left; fall back to pure polling
                    tokio::time::sleep(self.poll_interval).await;
                }
            }

            match self.source.has_changed().await {
                Ok(true) => {
                    if let Err(e) = self.export_pass().await {
                        eprintln!("Export error: {}", e);
                        self.state.record_failure();
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    eprintln!("Snapshot check error: {}", e);
                    self.state.record_failure();
                }
            }
        }
    }

    async fn export_pass(&mut self) -> Result<()> {
        let state = self.source.load_state().await?;
        let count = write_export(&self.exporter, &state, &self.target)?;
        self.state.record_export(count);
        Ok(())
    }
}

/// The filesystem path watch mode should observe for a given source
pub fn watch_path_for(source: &dyn StateSource, kind: &SourceKind) -> Option<PathBuf> {
    match kind {
        SourceKind::File(path) => Some(path.clone()),
        SourceKind::SaveDir(Some(dir)) => Some(dir.clone()),
        SourceKind::SaveDir(None) => source
            .as_any()
            .downcast_ref::<SaveDirSource>()
            .map(|s| s.dir().to_path_buf()),
        SourceKind::Stdin => None,
    }
}
