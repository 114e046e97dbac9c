//! Consent settings — the five data categories and their persisted state.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use trustbank_core::{Error, Result};

/// Data categories a customer can opt in or out of for automated decisioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentCategory {
    Income,
    Location,
    Demographics,
    Spending,
    Credit,
}

impl ConsentCategory {
    /// All five categories, in display order.
    pub fn all() -> &'static [ConsentCategory] {
        &[
            Self::Income,
            Self::Location,
            Self::Demographics,
            Self::Spending,
            Self::Credit,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Location => "location",
            Self::Demographics => "demographics",
            Self::Spending => "spending",
            Self::Credit => "credit",
        }
    }
}

impl fmt::Display for ConsentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsentCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "income" => Ok(Self::Income),
            "location" => Ok(Self::Location),
            "demographics" => Ok(Self::Demographics),
            "spending" => Ok(Self::Spending),
            "credit" => Ok(Self::Credit),
            other => Err(Error::InvalidCategory(other.to_string())),
        }
    }
}

/// Per-category consent flags.
///
/// The field set is fixed: snapshots carrying unknown fields do not
/// deserialize, and [`ConsentSettings::load`] falls back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsentSettings {
    pub income: bool,
    pub location: bool,
    pub demographics: bool,
    pub spending: bool,
    pub credit: bool,
}

impl Default for ConsentSettings {
    fn default() -> Self {
        Self {
            income: true,
            location: true,
            demographics: true,
            spending: true,
            credit: true,
        }
    }
}

impl ConsentSettings {
    /// Whether a category is currently enabled.
    pub fn enabled(&self, category: ConsentCategory) -> bool {
        match category {
            ConsentCategory::Income => self.income,
            ConsentCategory::Location => self.location,
            ConsentCategory::Demographics => self.demographics,
            ConsentCategory::Spending => self.spending,
            ConsentCategory::Credit => self.credit,
        }
    }

    /// Enable or disable a single category. Other categories are untouched.
    pub fn set(&mut self, category: ConsentCategory, enabled: bool) {
        match category {
            ConsentCategory::Income => self.income = enabled,
            ConsentCategory::Location => self.location = enabled,
            ConsentCategory::Demographics => self.demographics = enabled,
            ConsentCategory::Spending => self.spending = enabled,
            ConsentCategory::Credit => self.credit = enabled,
        }
    }

    /// Number of enabled categories, out of [`ConsentCategory::all`].
    pub fn enabled_count(&self) -> usize {
        ConsentCategory::all()
            .iter()
            .filter(|c| self.enabled(**c))
            .count()
    }

    pub fn disabled_count(&self) -> usize {
        ConsentCategory::all().len() - self.enabled_count()
    }

    /// Load a persisted snapshot, falling back to the all-enabled defaults
    /// when it is missing or unreadable. Never fails.
    pub fn load(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Persist the current settings, overwriting any previous snapshot.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!("Saved consent settings to {}", path.display());
        Ok(())
    }
}
