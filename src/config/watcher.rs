//! Definition file watcher for hot reload.

use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::registry::RawDefinition;
use crate::source::{DefinitionSource, FileSource};

/// Monitors a definition file and re-reads it on change.
pub struct DefinitionWatcher {
    source: FileSource,
    poll_interval: Duration,
    update_tx: mpsc::UnboundedSender<Vec<RawDefinition>>,
}

impl DefinitionWatcher {
    /// Create a new DefinitionWatcher.
    ///
    /// Returns the watcher and a receiver for freshly loaded definitions.
    pub fn new(
        source: FileSource,
        poll_interval: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<Vec<RawDefinition>>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                source,
                poll_interval,
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for as long as updates are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let source = self.source.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Definition file change detected, reloading...");
                        match source.load() {
                            Ok(definitions) => {
                                let _ = tx.send(definitions);
                            }
                            Err(e) => {
                                tracing::error!(
                                    "Failed to reload definitions: {}. Keeping current configuration.",
                                    e
                                );
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(self.poll_interval),
        )?;

        watcher.watch(self.source.path(), RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.source.path(), "Definition watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DefinitionKeys;
    use std::io::Write;

    #[tokio::test]
    async fn test_reload_on_modify() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"[{"names": ["default"]}]"#).unwrap();
        file.flush().unwrap();

        let source = FileSource::new(file.path(), DefinitionKeys::default());
        let (watcher, mut rx) = DefinitionWatcher::new(source, Duration::from_millis(50));
        let _guard = watcher.run().unwrap();

        std::fs::write(file.path(), br#"[{"names": ["default"]}, {"names": ["extra"]}]"#).unwrap();

        let definitions = tokio::time::timeout(Duration::from_secs(10), async {
            loop {
                match rx.recv().await {
                    Some(defs) if defs.len() == 2 => break defs,
                    Some(_) => continue,
                    None => panic!("watcher channel closed"),
                }
            }
        })
        .await
        .expect("no reload within timeout");

        assert_eq!(definitions[1].primary_name(), "extra");
    }
}
