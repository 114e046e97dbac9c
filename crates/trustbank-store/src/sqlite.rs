//! SQLite store for loan applications, reviews, and correction requests.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::schema::SCHEMA_SQL;
use crate::types::{
    ApplicationRecord, CorrectionRequest, CorrectionStatus, ReviewOutcome, StoreStats,
};
use trustbank_core::{Error, Result};
use trustbank_lending::{Decision, LoanDecision, LoanRequest};

const APPLICATION_COLUMNS: &str = "id, applicant, amount, income, credit_score, \
     employment_years, debt_to_income, decision, confidence, explanation, \
     review_outcome, review_notes, submitted_at, reviewed_at";

/// SQLite-backed store. Thread-safe behind an internal connection lock.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open or create the store.
    ///
    /// `db_dir` is the directory (e.g., `data/db/`). The file will be
    /// `db_dir/trustbank.db`.
    pub fn open(db_dir: impl AsRef<Path>) -> Result<Self> {
        let db_dir = db_dir.as_ref();
        std::fs::create_dir_all(db_dir).map_err(|e| Error::Storage(e.to_string()))?;
        let db_path = db_dir.join("trustbank.db");

        let conn = Self::create_connection(&db_path)?;
        Self::init_schema(&conn)?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };

        let count = store.count_applications()?;
        info!(
            "SqliteStore initialized: {} applications, path={}",
            count,
            store.db_path.display()
        );

        Ok(store)
    }

    fn create_connection(db_path: &Path) -> Result<Connection> {
        let conn = Connection::open(db_path).map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::Database(e.to_string()))?;
        Ok(conn)
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))
    }

    // ---------------------------------------------------------------
    // Applications
    // ---------------------------------------------------------------

    /// Insert a decided application. Returns the new row ID.
    pub fn add_application(
        &self,
        request: &LoanRequest,
        decision: &LoanDecision,
    ) -> Result<i64> {
        let now = now_millis();
        let conn = self.conn.lock();
        let id = conn
            .prepare_cached(
                "INSERT INTO applications (applicant, amount, income, credit_score, \
                 employment_years, debt_to_income, decision, confidence, explanation, \
                 submitted_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![
                request.applicant,
                request.amount,
                request.income,
                request.credit_score,
                request.employment_years,
                request.debt_to_income,
                decision.decision.as_str(),
                decision.confidence,
                decision.explanation,
                now,
            ])
            .map_err(|e| Error::Database(e.to_string()))?;

        debug!("Application {} stored ({})", id, decision.decision);
        Ok(id)
    }

    /// All applications, newest first.
    pub fn list_applications(&self) -> Result<Vec<ApplicationRecord>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(&format!(
                "SELECT {} FROM applications ORDER BY submitted_at DESC, id DESC",
                APPLICATION_COLUMNS
            ))
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], map_application)
            .map_err(|e| Error::Database(e.to_string()))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Most recently submitted application, if any.
    pub fn latest_application(&self) -> Result<Option<ApplicationRecord>> {
        let conn = self.conn.lock();
        let result = conn
            .prepare_cached(&format!(
                "SELECT {} FROM applications ORDER BY submitted_at DESC, id DESC LIMIT 1",
                APPLICATION_COLUMNS
            ))
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row([], map_application)
            .optional()
            .map_err(|e| Error::Database(e.to_string()));
        result
    }

    /// Fetch one application by ID.
    pub fn get_application(&self, id: i64) -> Result<ApplicationRecord> {
        let conn = self.conn.lock();
        let result = conn
            .prepare_cached(&format!(
                "SELECT {} FROM applications WHERE id = ?1",
                APPLICATION_COLUMNS
            ))
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![id], map_application)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?
            .ok_or_else(|| Error::NotFound(format!("application {}", id)));
        result
    }

    /// Applications awaiting human review, oldest first.
    pub fn pending_reviews(&self) -> Result<Vec<ApplicationRecord>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(&format!(
                "SELECT {} FROM applications WHERE review_outcome IS NULL \
                 ORDER BY submitted_at ASC, id ASC",
                APPLICATION_COLUMNS
            ))
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], map_application)
            .map_err(|e| Error::Database(e.to_string()))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Record the outcome of a human review. Only pending applications can
    /// be resolved; resolving twice is an error.
    pub fn resolve_review(
        &self,
        id: i64,
        outcome: ReviewOutcome,
        notes: Option<&str>,
    ) -> Result<ApplicationRecord> {
        let existing = self.get_application(id)?;
        if existing.review_outcome.is_some() {
            return Err(Error::Review(format!(
                "application {} has already been reviewed",
                id
            )));
        }

        let now = now_millis();
        {
            let conn = self.conn.lock();
            conn.prepare_cached(
                "UPDATE applications SET review_outcome = ?1, review_notes = ?2, \
                 reviewed_at = ?3 WHERE id = ?4",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .execute(params![outcome.as_str(), notes, now, id])
            .map_err(|e| Error::Database(e.to_string()))?;
        }

        info!("Application {} reviewed: {}", id, outcome.as_str());
        self.get_application(id)
    }

    // ---------------------------------------------------------------
    // Correction requests
    // ---------------------------------------------------------------

    /// File a profile correction ticket.
    pub fn add_correction_request(
        &self,
        field: &str,
        requested_by: &str,
    ) -> Result<CorrectionRequest> {
        let request = CorrectionRequest {
            id: uuid::Uuid::new_v4().to_string(),
            field: field.to_string(),
            requested_by: requested_by.to_string(),
            status: CorrectionStatus::Pending,
            submitted_at: now_millis(),
            resolved_at: None,
        };

        let conn = self.conn.lock();
        conn.prepare_cached(
            "INSERT INTO correction_requests (id, field, requested_by, status, submitted_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .map_err(|e| Error::Database(e.to_string()))?
        .execute(params![
            request.id,
            request.field,
            request.requested_by,
            request.status.as_str(),
            request.submitted_at,
        ])
        .map_err(|e| Error::Database(e.to_string()))?;

        info!("Correction request {} filed for field '{}'", request.id, field);
        Ok(request)
    }

    /// All correction tickets, newest first.
    pub fn list_correction_requests(&self) -> Result<Vec<CorrectionRequest>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(
                "SELECT id, field, requested_by, status, submitted_at, resolved_at \
                 FROM correction_requests ORDER BY submitted_at DESC",
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], map_correction)
            .map_err(|e| Error::Database(e.to_string()))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Mark a correction ticket resolved.
    pub fn resolve_correction_request(&self, id: &str) -> Result<CorrectionRequest> {
        let now = now_millis();
        let updated = {
            let conn = self.conn.lock();
            let n = conn
                .prepare_cached(
                    "UPDATE correction_requests SET status = 'resolved', resolved_at = ?1 \
                     WHERE id = ?2 AND status = 'pending'",
                )
                .map_err(|e| Error::Database(e.to_string()))?
                .execute(params![now, id])
                .map_err(|e| Error::Database(e.to_string()))?;
            n
        };

        if updated == 0 {
            return Err(Error::NotFound(format!("pending correction request {}", id)));
        }

        let conn = self.conn.lock();
        let result = conn
            .prepare_cached(
                "SELECT id, field, requested_by, status, submitted_at, resolved_at \
                 FROM correction_requests WHERE id = ?1",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![id], map_correction)
            .map_err(|e| Error::Database(e.to_string()));
        result
    }

    // ---------------------------------------------------------------
    // Stats
    // ---------------------------------------------------------------

    pub fn count_applications(&self) -> Result<i64> {
        let conn = self.conn.lock();
        conn.query_row("SELECT COUNT(*) FROM applications", [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))
    }

    pub fn get_stats(&self) -> Result<StoreStats> {
        let conn = self.conn.lock();
        let (total, approved, rejected, pending_reviews): (i64, i64, i64, i64) = conn
            .query_row(
                "SELECT COUNT(*), \
                 COALESCE(SUM(decision = 'APPROVE'), 0), \
                 COALESCE(SUM(decision = 'REJECT'), 0), \
                 COALESCE(SUM(review_outcome IS NULL), 0) \
                 FROM applications",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        let pending_corrections: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM correction_requests WHERE status = 'pending'",
                [],
                |row| row.get(0),
            )
            .map_err(|e| Error::Database(e.to_string()))?;

        let db_size_mb = std::fs::metadata(&self.db_path)
            .map(|m| m.len() as f64 / (1024.0 * 1024.0))
            .unwrap_or(0.0);

        Ok(StoreStats {
            total_applications: total,
            approved,
            rejected,
            pending_reviews,
            pending_corrections,
            db_path: self.db_path.display().to_string(),
            db_size_mb,
        })
    }
}

fn map_application(row: &rusqlite::Row<'_>) -> rusqlite::Result<ApplicationRecord> {
    let decision_text: String = row.get(7)?;
    let decision = Decision::parse(&decision_text).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            7,
            rusqlite::types::Type::Text,
            format!("unknown decision: {decision_text}").into(),
        )
    })?;

    let outcome_text: Option<String> = row.get(10)?;
    let review_outcome = match outcome_text {
        Some(s) => Some(ReviewOutcome::parse(&s).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                10,
                rusqlite::types::Type::Text,
                format!("unknown review outcome: {s}").into(),
            )
        })?),
        None => None,
    };

    Ok(ApplicationRecord {
        id: row.get(0)?,
        applicant: row.get(1)?,
        amount: row.get(2)?,
        income: row.get(3)?,
        credit_score: row.get(4)?,
        employment_years: row.get(5)?,
        debt_to_income: row.get(6)?,
        decision,
        confidence: row.get(8)?,
        explanation: row.get(9)?,
        review_outcome,
        review_notes: row.get(11)?,
        submitted_at: row.get(12)?,
        reviewed_at: row.get(13)?,
    })
}

fn map_correction(row: &rusqlite::Row<'_>) -> rusqlite::Result<CorrectionRequest> {
    let status_text: String = row.get(3)?;
    let status = CorrectionStatus::parse(&status_text).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("unknown correction status: {status_text}").into(),
        )
    })?;

    Ok(CorrectionRequest {
        id: row.get(0)?,
        field: row.get(1)?,
        requested_by: row.get(2)?,
        status,
        submitted_at: row.get(4)?,
        resolved_at: row.get(5)?,
    })
}

fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use trustbank_lending::DecisionEngine;

    fn test_store() -> (SqliteStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(dir.path().join("db")).unwrap();
        (store, dir)
    }

    fn decided(
        applicant: &str,
        credit_score: i64,
        debt_to_income: f64,
    ) -> (LoanRequest, LoanDecision) {
        let request = LoanRequest {
            applicant: applicant.to_string(),
            amount: 50_000.0,
            income: 60_000.0,
            credit_score,
            employment_years: 3.0,
            debt_to_income,
        };
        let decision = DecisionEngine::rules_only().decide(&request);
        (request, decision)
    }

    #[test]
    fn test_add_and_get_application() {
        let (store, _dir) = test_store();
        let (request, decision) = decided("John Smith", 700, 0.25);

        let id = store.add_application(&request, &decision).unwrap();
        let record = store.get_application(id).unwrap();

        assert_eq!(record.applicant, "John Smith");
        assert_eq!(record.credit_score, 700);
        assert_eq!(record.decision, Decision::Approve);
        assert!(record.review_outcome.is_none());
        assert!(record.submitted_at > 0);
    }

    #[test]
    fn test_get_missing_application() {
        let (store, _dir) = test_store();
        assert!(matches!(
            store.get_application(42),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_list_newest_first() {
        let (store, _dir) = test_store();
        let (req_a, dec_a) = decided("First Applicant", 700, 0.25);
        let (req_b, dec_b) = decided("Second Applicant", 450, 0.45);

        let a = store.add_application(&req_a, &dec_a).unwrap();
        let b = store.add_application(&req_b, &dec_b).unwrap();

        let all = store.list_applications().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, b);
        assert_eq!(all[1].id, a);

        let latest = store.latest_application().unwrap().unwrap();
        assert_eq!(latest.id, b);
        assert_eq!(latest.decision, Decision::Reject);
    }

    #[test]
    fn test_latest_on_empty_store() {
        let (store, _dir) = test_store();
        assert!(store.latest_application().unwrap().is_none());
    }

    #[test]
    fn test_review_lifecycle() {
        let (store, _dir) = test_store();
        let (request, decision) = decided("John Smith", 700, 0.25);
        let id = store.add_application(&request, &decision).unwrap();

        assert_eq!(store.pending_reviews().unwrap().len(), 1);

        let reviewed = store
            .resolve_review(id, ReviewOutcome::Approved, Some("Looks sound"))
            .unwrap();
        assert_eq!(reviewed.review_outcome, Some(ReviewOutcome::Approved));
        assert_eq!(reviewed.review_notes.as_deref(), Some("Looks sound"));
        assert!(reviewed.reviewed_at.is_some());

        assert!(store.pending_reviews().unwrap().is_empty());

        // A second resolution is rejected.
        assert!(matches!(
            store.resolve_review(id, ReviewOutcome::Overridden, Some("changed my mind")),
            Err(Error::Review(_))
        ));
    }

    #[test]
    fn test_correction_lifecycle() {
        let (store, _dir) = test_store();

        let filed = store
            .add_correction_request("employment_years", "John Smith")
            .unwrap();
        assert_eq!(filed.status, CorrectionStatus::Pending);

        let listed = store.list_correction_requests().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, filed.id);

        let resolved = store.resolve_correction_request(&filed.id).unwrap();
        assert_eq!(resolved.status, CorrectionStatus::Resolved);
        assert!(resolved.resolved_at.is_some());

        // Already resolved: no longer a pending ticket.
        assert!(matches!(
            store.resolve_correction_request(&filed.id),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_stats() {
        let (store, _dir) = test_store();
        let (req_a, dec_a) = decided("First Applicant", 700, 0.25);
        let (req_b, dec_b) = decided("Second Applicant", 450, 0.45);

        let id = store.add_application(&req_a, &dec_a).unwrap();
        store.add_application(&req_b, &dec_b).unwrap();
        store
            .resolve_review(id, ReviewOutcome::Approved, Some("ok"))
            .unwrap();
        store.add_correction_request("income", "John Smith").unwrap();

        let stats = store.get_stats().unwrap();
        assert_eq!(stats.total_applications, 2);
        assert_eq!(stats.approved, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.pending_reviews, 1);
        assert_eq!(stats.pending_corrections, 1);
    }
}
