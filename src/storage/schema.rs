//! Database schema definitions

/// SQL to create the reviews table
pub const CREATE_REVIEWS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    date TEXT NOT NULL,
    review TEXT NOT NULL,
    sentiment TEXT NOT NULL CHECK (sentiment IN ('positiva', 'negativa', 'neutra'))
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_reviews_name ON reviews(name)",
    "CREATE INDEX IF NOT EXISTS idx_reviews_date ON reviews(date)",
];

/// Tables dropped by an administrative reset
pub const DROP_TABLES: &[&str] = &["DROP TABLE IF EXISTS reviews"];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_REVIEWS_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
