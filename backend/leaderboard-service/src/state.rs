use std::sync::Arc;

use crate::config::{Config, ViewsConfig};
use crate::services::{ExportWriter, ReportGenerator, SharedRankedStore, UserRegistry};

/// Everything a handler may touch, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedRankedStore,
    pub registry: Arc<UserRegistry>,
    pub reports: ReportGenerator,
    pub exporter: ExportWriter,
    pub views: ViewsConfig,
    pub export_top_n: usize,
}

impl AppState {
    pub fn new(config: &Config, store: SharedRankedStore) -> Self {
        Self {
            registry: Arc::new(UserRegistry::from_config(&config.registry)),
            reports: ReportGenerator::new(store.clone()),
            exporter: ExportWriter::from_config(store.clone(), &config.export),
            views: config.views.clone(),
            export_top_n: config.export.top_n,
            store,
        }
    }
}
