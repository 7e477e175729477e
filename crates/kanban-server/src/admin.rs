//! `check` and `init`: offline maintenance of the board document.

use std::path::PathBuf;

use kanban_core::AppConfig;
use kanban_domain::{Document, Violation};
use kanban_persistence::{JsonFileStore, PersistenceStore};
use serde::Serialize;

use crate::output;

#[derive(Debug, Serialize)]
pub struct DocumentSummary {
    pub data_file: PathBuf,
    pub boards: usize,
    pub lists: usize,
    pub cards: usize,
    pub max_card_id: i64,
    pub violations: Vec<Violation>,
}

impl DocumentSummary {
    fn of(data_file: PathBuf, document: &Document) -> Self {
        Self {
            data_file,
            boards: document.boards.len(),
            lists: document.list_count(),
            cards: document.card_count(),
            max_card_id: document.max_card_id(),
            violations: document.violations(),
        }
    }
}

fn store(config: &AppConfig) -> JsonFileStore {
    JsonFileStore::with_write_mode(&config.storage.data_file, config.storage.write_mode)
}

pub async fn check(config: &AppConfig) {
    let store = store(config);
    let document = match store.load().await {
        Ok(document) => document,
        Err(e) => output::output_error(&format!(
            "Failed to load {}: {}",
            store.path().display(),
            e
        )),
    };

    let summary = DocumentSummary::of(store.path().to_path_buf(), &document);
    if !summary.violations.is_empty() {
        let details = serde_json::to_string(&summary.violations).unwrap_or_default();
        output::output_error(&format!(
            "{} has {} invariant violation(s): {}",
            store.path().display(),
            summary.violations.len(),
            details
        ));
    }
    output::output_success(summary);
}

pub async fn init(config: &AppConfig, force: bool) {
    let store = store(config);
    if store.exists().await && !force {
        output::output_error(&format!(
            "{} already exists; pass --force to overwrite it",
            store.path().display()
        ));
    }

    let document = Document::seed();
    if let Err(e) = store.save(&document).await {
        output::output_error(&format!("Failed to write {}: {}", store.path().display(), e));
    }
    tracing::info!("Seeded {}", store.path().display());
    output::output_success(DocumentSummary::of(store.path().to_path_buf(), &document));
}
