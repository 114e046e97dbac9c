//! Database schema SQL.

/// Core tables: loan applications and profile correction requests.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS applications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    applicant TEXT NOT NULL,
    amount REAL NOT NULL,
    income REAL NOT NULL,
    credit_score INTEGER NOT NULL,
    employment_years REAL NOT NULL,
    debt_to_income REAL NOT NULL,
    decision TEXT NOT NULL,
    confidence REAL NOT NULL,
    explanation TEXT,
    review_outcome TEXT,
    review_notes TEXT,
    submitted_at INTEGER NOT NULL,
    reviewed_at INTEGER
);

CREATE INDEX IF NOT EXISTS idx_applications_submitted ON applications(submitted_at DESC);
CREATE INDEX IF NOT EXISTS idx_applications_review ON applications(review_outcome);

CREATE TABLE IF NOT EXISTS correction_requests (
    id TEXT PRIMARY KEY,
    field TEXT NOT NULL,
    requested_by TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    submitted_at INTEGER NOT NULL,
    resolved_at INTEGER
);

CREATE INDEX IF NOT EXISTS idx_corrections_status ON correction_requests(status);
"#;
