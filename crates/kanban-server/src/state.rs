use std::sync::Arc;

use kanban_core::{AppConfig, KanbanError, KanbanResult, MissingTargetPolicy};
use kanban_persistence::{JsonFileStore, PersistenceStore};
use tokio::sync::{Mutex, OwnedMutexGuard};

pub struct AppState {
    pub store: Arc<dyn PersistenceStore>,
    /// Held across one load → mutate → save cycle when writes are
    /// serialized. `None` leaves concurrent requests free to race.
    write_lock: Option<Arc<Mutex<()>>>,
    pub missing_target: MissingTargetPolicy,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(store: Arc<dyn PersistenceStore>) -> Self {
        Self {
            store,
            write_lock: None,
            missing_target: MissingTargetPolicy::default(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let store = JsonFileStore::with_write_mode(
            &config.storage.data_file,
            config.storage.write_mode,
        );
        Self::new(Arc::new(store))
            .serialize_writes(config.storage.serialize_writes)
            .with_missing_target(config.behavior.missing_target)
    }

    pub fn serialize_writes(mut self, enabled: bool) -> Self {
        self.write_lock = enabled.then(|| Arc::new(Mutex::new(())));
        self
    }

    pub fn with_missing_target(mut self, policy: MissingTargetPolicy) -> Self {
        self.missing_target = policy;
        self
    }

    pub async fn write_guard(&self) -> Option<OwnedMutexGuard<()>> {
        match &self.write_lock {
            Some(lock) => Some(Arc::clone(lock).lock_owned().await),
            None => None,
        }
    }

    /// Decide what a create/edit lookup failure means. Silent mode swallows
    /// it so the request still saves and redirects.
    pub fn absorb_missing_target(&self, err: KanbanError) -> KanbanResult<()> {
        match self.missing_target {
            MissingTargetPolicy::Silent => {
                tracing::warn!("Ignoring mutation on missing target: {}", err);
                Ok(())
            }
            MissingTargetPolicy::Reported => Err(err),
        }
    }
}
