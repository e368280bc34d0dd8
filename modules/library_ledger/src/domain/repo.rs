use crate::contract::model::{Book, User};

/// Port for the domain layer: persistence operations the domain needs.
///
/// Implementations must be internally synchronized. The service serializes
/// mutations itself; the repository only has to make `save_loan` a single
/// step for concurrent readers.
pub trait LedgerRepository: Send + Sync {
    /// Load a user by id.
    fn find_user(&self, id: &str) -> anyhow::Result<Option<User>>;
    /// Load a book by id.
    fn find_book(&self, id: &str) -> anyhow::Result<Option<Book>>;
    /// Insert or replace a fully-formed user.
    ///
    /// Service computes id/timestamps/validation; repo persists.
    fn insert_user(&self, u: User) -> anyhow::Result<()>;
    /// Insert or replace a fully-formed book.
    fn insert_book(&self, b: Book) -> anyhow::Result<()>;
    /// Write back a user and a book together; readers see both or neither.
    fn save_loan(&self, u: User, b: Book) -> anyhow::Result<()>;
    /// All users in key order.
    fn all_users(&self) -> anyhow::Result<Vec<User>>;
    /// All books in key order.
    fn all_books(&self) -> anyhow::Result<Vec<Book>>;
}
