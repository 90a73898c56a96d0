// ABOUTME: Entry point for the desmos-tables exporter
// Parses arguments, resolves the snapshot source, and runs a single export or watch mode

use anyhow::{anyhow, bail, Result};
use clap::{Arg, Command};
use crossbeam_channel::bounded;
use desmos_tables::{
    app::{
        config::AppConfig,
        state::{WatchEvent, WatchState},
    },
    data::{
        factory::{SourceKind, StateSourceFactory},
        source::StateSource,
        watcher::{watch_path_for, ExportWatcher},
    },
    export::{
        exporter::TableExporter,
        render::ValueFormat,
        writer::{write_export, OutputTarget},
    },
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = parse_args();

    // Layer config: file, then environment, then flags
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => AppConfig::load_from(Path::new(path))?,
        None => AppConfig::load(),
    };

    if let Some(format) = matches.get_one::<String>("format") {
        config.value_format = ValueFormat::from_str(format)
            .ok_or_else(|| anyhow!("Unknown value format: {}", format))?;
    }

    if let Some(interval) = matches.get_one::<String>("interval") {
        let parsed = humantime::parse_duration(interval)
            .map_err(|e| anyhow!("Invalid interval '{}': {}", interval, e))?;
        config.poll_interval_ms = parsed.as_millis() as u64;
    }

    if matches.get_flag("no-folders") {
        config.include_folders = false;
    }

    config.debug = matches.get_flag("debug");

    // Initialize logging if debug mode; logs go to stderr so the export
    // stream on stdout stays clean
    if config.debug {
        tracing_subscriber::fmt()
            .with_env_filter("desmos_tables=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let stdin_piped = !atty::is(atty::Stream::Stdin);
    let (source, kind) = StateSourceFactory::resolve(
        matches.get_one::<String>("state-file").map(String::as_str),
        matches.get_one::<String>("latest").map(String::as_str),
        stdin_piped,
        &config,
    )?;

    let exporter =
        TableExporter::new(config.value_format).include_folders(config.include_folders);
    let target = OutputTarget::from_arg(matches.get_one::<String>("output").map(String::as_str));

    if matches.get_flag("watch") {
        run_watch(source, kind, exporter, target, &config).await
    } else {
        let state = source.load_state().await?;
        write_export(&exporter, &state, &target)?;
        Ok(())
    }
}

fn parse_args() -> clap::ArgMatches {
    Command::new("desmos-tables")
        .version("0.3.0")
        .about("Exports folder headers and table columns from saved graph state snapshots")
        .arg(
            Arg::new("state-file")
                .value_name("FILE")
                .help("Saved graph state JSON file (reads stdin when piped)")
                .index(1),
        )
        .arg(
            Arg::new("latest")
                .long("latest")
                .value_name("DIR")
                .help("Export the most recently saved snapshot in DIR"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write the export to FILE instead of stdout"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Value list format: plain, bracketed or json"),
        )
        .arg(
            Arg::new("watch")
                .short('w')
                .long("watch")
                .help("Keep running and re-export whenever the snapshot changes")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("interval")
                .short('i')
                .long("interval")
                .value_name("DURATION")
                .help("Watch poll interval, e.g. 2s or 500ms"),
        )
        .arg(
            Arg::new("no-folders")
                .long("no-folders")
                .help("Skip folder header lines")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to configuration file"),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Enable debug logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches()
}

async fn run_watch(
    source: Box<dyn StateSource>,
    kind: SourceKind,
    exporter: TableExporter,
    target: OutputTarget,
    config: &AppConfig,
) -> Result<()> {
    if kind == SourceKind::Stdin {
        bail!("A piped snapshot cannot be watched; pass a state file or --latest directory");
    }

    let watch_path = watch_path_for(source.as_ref(), &kind);
    let state = Arc::new(WatchState::new());
    let (event_tx, event_rx) = bounded::<WatchEvent>(100);

    let mut watcher = ExportWatcher::new(
        source,
        exporter,
        target,
        state.clone(),
        event_rx,
        Duration::from_millis(config.poll_interval_ms),
    );

    // Filesystem events short-circuit the poll wait; polling still covers
    // editors that replace files in ways the watcher misses
    if let Some(path) = watch_path {
        if let Err(e) = watcher.start_file_watching(path, event_tx.clone()) {
            eprintln!("Warning: could not start file watcher: {}", e);
        }
    }

    let quit_tx = event_tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = quit_tx.send(WatchEvent::Quit);
        }
    });

    watcher.run().await;
    Ok(())
}
