//! Shared consent state — one evaluator instance per process.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::info;

use trustbank_core::Result;

use crate::impact::ConsentImpact;
use crate::settings::{ConsentCategory, ConsentSettings};

/// Owns the live [`ConsentSettings`] and their persistence location.
///
/// Callers hold the manager (typically inside shared server state) instead
/// of reaching for a global settings object; evaluation itself stays a pure
/// function of the settings value.
pub struct ConsentManager {
    settings: RwLock<ConsentSettings>,
    settings_path: PathBuf,
}

impl ConsentManager {
    /// Create a manager backed by `settings_path`, loading any persisted
    /// snapshot (defaults when absent or unreadable).
    pub fn open(settings_path: impl AsRef<Path>) -> Self {
        let settings_path = settings_path.as_ref().to_path_buf();
        let settings = ConsentSettings::load(&settings_path);
        info!(
            "Consent settings loaded: {} of {} categories enabled",
            settings.enabled_count(),
            ConsentCategory::all().len()
        );
        Self {
            settings: RwLock::new(settings),
            settings_path,
        }
    }

    /// Current settings snapshot.
    pub fn settings(&self) -> ConsentSettings {
        *self.settings.read()
    }

    /// Enable or disable a single category, returning the updated settings.
    pub fn set_category(&self, category: ConsentCategory, enabled: bool) -> ConsentSettings {
        let mut settings = self.settings.write();
        settings.set(category, enabled);
        *settings
    }

    /// Evaluate the impact of the current settings.
    pub fn impact(&self) -> ConsentImpact {
        self.settings.read().impact()
    }

    /// Persist the current settings snapshot.
    pub fn save(&self) -> Result<()> {
        let settings = *self.settings.read();
        settings.save(&self.settings_path)
    }

    /// Re-read the persisted snapshot, replacing in-memory state.
    pub fn reload(&self) -> ConsentSettings {
        let loaded = ConsentSettings::load(&self.settings_path);
        *self.settings.write() = loaded;
        loaded
    }
}
