use kanban_core::{AppConfig, Frozen};
use kanban_domain::{Action, BoardState, BoardStore, FilterPatch, FilterProjection, Priority};
use kanban_persistence::{DebouncedWriter, FileStore, PersistenceGateway, SaveReport};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// One CLI invocation's view of the board: hydrated from disk on load,
/// saved through the debounced writer, flushed by [`CliContext::finish`].
pub struct CliContext {
    pub config: AppConfig,
    store: BoardStore,
    worker: JoinHandle<SaveReport>,
}

impl CliContext {
    pub async fn load(dir: Option<PathBuf>, config_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let config = match config_path {
            Some(path) => AppConfig::load_from(&path),
            None => AppConfig::load(),
        };
        let data_dir = dir.unwrap_or_else(|| config.effective_data_dir());
        tracing::debug!("Using board directory {}", data_dir.display());

        let gateway = PersistenceGateway::new(
            Arc::new(FileStore::new(&data_dir)),
            config.storage_key.clone(),
        );
        let payload = gateway.load().await;

        // Hydrate before attaching the writer so an unchanged board is not rewritten
        let mut store = BoardStore::new();
        store.hydrate(payload);

        let (handle, worker) = DebouncedWriter::spawn(gateway, config.save_debounce());
        let store = store.with_sink(Box::new(handle));

        Ok(Self {
            config,
            store,
            worker,
        })
    }

    pub fn state(&self) -> &Frozen<BoardState> {
        self.store.state()
    }

    pub fn dispatch(&mut self, action: Action) -> &Frozen<BoardState> {
        self.store.apply(action)
    }

    /// Replace the view filters and return the resulting projection.
    pub fn filtered(
        &mut self,
        text: Option<String>,
        priority: Option<Priority>,
    ) -> Frozen<FilterProjection> {
        self.store.apply(Action::set_filter(FilterPatch {
            text: Some(text.unwrap_or_default()),
            priority: priority.into(),
        }));
        self.store.projection()
    }

    /// Flush pending saves and wait for the writer to exit.
    pub async fn finish(self) -> anyhow::Result<SaveReport> {
        let Self { store, worker, .. } = self;
        drop(store);
        let report = worker.await?;
        if report.failed > 0 {
            anyhow::bail!("Failed to save board ({} write(s) failed)", report.failed);
        }
        Ok(report)
    }
}
