//! Hot reload of the session file
//!
//! Each parsed revision is handed to the host as an external mutation of the
//! Live set (a device removed, a track armed, ...). A revision that fails to
//! parse or validate is logged and the running set is left as it was.

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::SessionConfig;

/// Editors save in several steps; wait for the last one before reading
const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Pending revisions not yet picked up by the main loop
const REVISION_BACKLOG: usize = 10;

/// Streams revisions of one session file
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    revisions: mpsc::Receiver<SessionConfig>,
}

impl ConfigWatcher {
    /// Load `session_path` and start watching it. Returns the watcher with
    /// the revision that was on disk at startup.
    pub async fn new(session_path: String) -> Result<(Self, Arc<SessionConfig>)> {
        let initial = SessionConfig::load(&session_path)
            .await
            .context("Failed to load initial session")?;

        let (tx, revisions) = mpsc::channel(REVISION_BACKLOG);
        // notify calls back on its own thread, so reloads go through the runtime
        let runtime = Handle::current();
        let reload_path = session_path.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    error!("Session watch error: {}", e);
                    return;
                }
            };
            if !touches_contents(&event.kind) {
                return;
            }
            debug!("Session file touched: {:?}", event.paths);
            runtime.spawn(reload(reload_path.clone(), tx.clone()));
        })?;

        watcher
            .watch(Path::new(&session_path), RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch session file: {}", session_path))?;
        info!("Watching session file: {}", session_path);

        Ok((
            Self {
                _watcher: watcher,
                revisions,
            },
            Arc::new(initial),
        ))
    }

    /// Wait for the next session revision. `None` once the watcher is closed.
    pub async fn next_session(&mut self) -> Option<SessionConfig> {
        self.revisions.recv().await
    }
}

fn touches_contents(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Modify(_) | EventKind::Create(_))
}

async fn reload(session_path: String, tx: mpsc::Sender<SessionConfig>) {
    tokio::time::sleep(SETTLE_DELAY).await;

    let session = match SessionConfig::load(&session_path).await {
        Ok(session) => session,
        Err(e) => {
            warn!("Session revision rejected, keeping current set: {:#}", e);
            return;
        }
    };
    info!("Session revision loaded from {}", session_path);
    if tx.send(session).await.is_err() {
        debug!("Session revision dropped: main loop has stopped");
    }
}
