//! Application state.

use std::sync::Arc;
use workbee_config::WorkBeeConfig;
use workbee_core::{IdentityProvider, RecordStore};
use workbee_dispatch::{LifecycleEngine, MatchingSimulator};
use workbee_store::{MemoryIdentityProvider, MemoryRecordStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<LifecycleEngine>,
    pub simulator: MatchingSimulator,
    pub identity: Arc<dyn IdentityProvider>,
    pub records: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(
        config: &WorkBeeConfig,
        identity: Arc<dyn IdentityProvider>,
        records: Arc<dyn RecordStore>,
    ) -> Self {
        let engine = Arc::new(LifecycleEngine::from_config(&config.engine));
        let simulator = MatchingSimulator::from_config(engine.clone(), config);

        Self {
            engine,
            simulator,
            identity,
            records,
        }
    }

    /// State backed entirely by in-memory stores.
    pub fn in_memory(config: &WorkBeeConfig) -> Self {
        Self::new(
            config,
            Arc::new(MemoryIdentityProvider::new()),
            Arc::new(MemoryRecordStore::new()),
        )
    }
}
