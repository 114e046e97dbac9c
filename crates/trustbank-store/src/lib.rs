//! SQLite-backed persistence for applications and governance records.

pub mod schema;
pub mod sqlite;
pub mod types;

pub use sqlite::SqliteStore;
pub use types::{
    ApplicationRecord, CorrectionRequest, CorrectionStatus, ReviewOutcome, StoreStats,
};
