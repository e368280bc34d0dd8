use chrono::{DateTime, Utc};

/// Transport-agnostic domain event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    UserCreated {
        id: String,
        at: DateTime<Utc>,
    },
    BookCreated {
        id: String,
        at: DateTime<Utc>,
    },
    BookBorrowed {
        book_id: String,
        user_id: String,
        at: DateTime<Utc>,
    },
    BookReturned {
        book_id: String,
        user_id: String,
        at: DateTime<Utc>,
    },
}
