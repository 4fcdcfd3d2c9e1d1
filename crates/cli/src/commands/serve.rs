//! Serve command implementation.
//!
//! Starts a dev session and forwards filesystem changes to the plugins.

use std::path::{Component, Path, PathBuf};
use std::time::{Duration, Instant};

use console::style;
use miette::{Result, miette};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::debug;
use vite_info_core::ChangeEvent;
use vite_info_engine::{Engine, EngineConfig};
use vite_info_plugin::ViteInfoPlugin;

use crate::output;

/// Window in which a repeated event for the same file is dropped.
const DEBOUNCE_MS: u64 = 100;

/// Directories whose changes are never forwarded.
const IGNORED_DIRS: &[&str] = &["node_modules", ".git"];

/// Runs a dev session until interrupted.
pub async fn execute(root: &Path, mode: Option<String>) -> Result<()> {
    let mut config =
        EngineConfig::load(root).map_err(|e| miette!("Failed to load config: {}", e))?;

    if let Some(mode) = mode {
        config = config.with_mode(mode);
    }

    let inputs = config.input.clone();
    let out_path = config.out_path();

    let mut engine = Engine::new(config).with_plugin(Box::new(ViteInfoPlugin::new()));
    engine
        .serve()
        .map_err(|e| miette!("Failed to start dev session: {}", e))?;

    // Warm the module graph so hot updates know which modules are affected.
    for input in &inputs {
        if let Err(e) = engine.request(&format!("/{}", input)) {
            output::warning(&format!("Failed to load {}: {}", input, e));
        }
    }

    println!(
        "\n{} Watching {} for changes...\n",
        style("👁").cyan(),
        style(root.display()).cyan().bold()
    );

    let (tx, mut rx) = mpsc::channel::<(PathBuf, ChangeEvent)>(100);

    let mut watcher = RecommendedWatcher::new(
        move |res: std::result::Result<Event, notify::Error>| {
            if let Ok(event) = res {
                if let Some(change) = change_event(&event.kind) {
                    for path in event.paths {
                        forward(&tx, path, change);
                    }
                }
            }
        },
        Config::default().with_poll_interval(Duration::from_millis(200)),
    )
    .map_err(|e| miette!("Failed to create file watcher: {}", e))?;

    watcher
        .watch(root, RecursiveMode::Recursive)
        .map_err(|e| miette!("Failed to watch {}: {}", root.display(), e))?;

    let spinner = output::create_spinner("Waiting for changes...");
    let mut last: Option<(PathBuf, ChangeEvent, Instant)> = None;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            received = rx.recv() => {
                let Some((path, event)) = received else {
                    break;
                };

                if is_ignored(&path, &out_path) || is_repeat(&last, &path, event) {
                    debug!(path = %path.display(), %event, "skipping change");
                    continue;
                }

                spinner.suspend(|| {
                    if let Err(e) = engine.file_changed(&path, event) {
                        output::warning(&format!("Failed to process change: {}", e));
                    }
                });

                last = Some((path, event, Instant::now()));
            }
            _ = &mut shutdown => break,
        }
    }

    spinner.finish_and_clear();
    engine
        .close()
        .map_err(|e| miette!("Failed to close dev session: {}", e))?;
    output::info("Dev session closed");

    Ok(())
}

/// Sends a change to the session loop. Returns false once the loop is gone.
fn forward(tx: &mpsc::Sender<(PathBuf, ChangeEvent)>, path: PathBuf, change: ChangeEvent) -> bool {
    match tx.blocking_send((path, change)) {
        Ok(()) => true,
        Err(e) => {
            let (path, change) = e.0;
            debug!(path = %path.display(), %change, "watch channel closed, dropping change");
            false
        }
    }
}

/// Maps a notify event to a watch change; access and metadata-only events
/// are dropped.
fn change_event(kind: &EventKind) -> Option<ChangeEvent> {
    match kind {
        EventKind::Create(_) => Some(ChangeEvent::Create),
        EventKind::Modify(notify::event::ModifyKind::Metadata(_)) => None,
        EventKind::Modify(_) => Some(ChangeEvent::Update),
        EventKind::Remove(_) => Some(ChangeEvent::Delete),
        _ => None,
    }
}

fn is_ignored(path: &Path, out_path: &Path) -> bool {
    path.starts_with(out_path)
        || path.components().any(|component| match component {
            Component::Normal(name) => IGNORED_DIRS.iter().any(|dir| name == *dir),
            _ => false,
        })
}

fn is_repeat(last: &Option<(PathBuf, ChangeEvent, Instant)>, path: &Path, event: ChangeEvent) -> bool {
    match last {
        Some((last_path, last_event, at)) => {
            last_path == path
                && *last_event == event
                && at.elapsed() < Duration::from_millis(DEBOUNCE_MS)
        }
        None => false,
    }
}
