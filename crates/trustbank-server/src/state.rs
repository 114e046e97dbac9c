//! Shared application state.

use trustbank_consent::ConsentManager;
use trustbank_core::TrustBankConfig;
use trustbank_lending::DecisionEngine;
use trustbank_store::SqliteStore;

/// Shared state accessible from all route handlers.
pub struct AppState {
    pub config: TrustBankConfig,
    pub store: SqliteStore,
    pub consent: ConsentManager,
    pub engine: DecisionEngine,
}

impl AppState {
    pub fn new(config: TrustBankConfig, store: SqliteStore) -> Self {
        let consent = ConsentManager::open(&config.data_paths.consent_file);
        let engine = DecisionEngine::with_baseline_model();

        Self {
            config,
            store,
            consent,
            engine,
        }
    }
}
