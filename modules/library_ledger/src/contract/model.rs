use chrono::{DateTime, Utc};

/// Pure user model for inter-module communication (no serde)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub created_at: DateTime<Utc>,
    /// Session references; not touched by any ledger operation.
    pub session_ids: Vec<String>,
    /// Ids of the books this user currently holds.
    pub borrowed_book_ids: Vec<String>,
    pub name: String,
}

/// Pure book model for inter-module communication (no serde)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub name: String,
    /// True iff exactly one user lists this book in `borrowed_book_ids`.
    pub borrowed: bool,
}

impl User {
    pub fn holds(&self, book_id: &str) -> bool {
        self.borrowed_book_ids.iter().any(|b| b == book_id)
    }
}
