/// ===============================
/// Name filter shared by list queries
/// ===============================
///
/// Holds the `WHERE` fragment and the bound `LIKE` pattern for an optional
/// name substring. The fragment is constant text; the user's input only ever
/// travels through the binding.
#[derive(Debug, PartialEq, Eq)]
pub struct NameFilter {
    pub where_clause: &'static str,
    pub pattern: Option<String>,
}

impl NameFilter {
    pub fn new(name: &str) -> Self {
        if name.is_empty() {
            Self {
                where_clause: "",
                pattern: None,
            }
        } else {
            Self {
                where_clause: "WHERE name LIKE ?",
                pattern: Some(contains_pattern(name)),
            }
        }
    }
}

/// `LIKE` pattern matching `name` anywhere in the column.
pub fn contains_pattern(name: &str) -> String {
    format!("%{}%", name)
}

/// ===============================
/// Duplicate key detection
/// ===============================
///
/// MySQL reports integrity constraint violations (duplicate primary keys
/// included) under SQLSTATE `23000`.
pub fn is_duplicate_key(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23000"),
        _ => false,
    }
}
