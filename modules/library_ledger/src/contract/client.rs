use async_trait::async_trait;

use crate::contract::{
    error::LibraryError,
    model::{Book, User},
};

/// Public API trait for the library ledger that other modules can use
#[async_trait]
pub trait LibraryApi: Send + Sync {
    /// Register a new user with an empty borrow list
    async fn create_user(&self, name: &str) -> Result<User, LibraryError>;

    /// Register a new, not yet borrowed book
    async fn create_book(&self, name: &str) -> Result<Book, LibraryError>;

    /// Lend a book to a user
    async fn borrow_book(&self, book_id: &str, user_id: &str) -> Result<Book, LibraryError>;

    /// Take a borrowed book back from a user
    async fn return_book(&self, book_id: &str, user_id: &str) -> Result<Book, LibraryError>;

    /// Get a book by ID
    async fn get_book(&self, id: &str) -> Result<Book, LibraryError>;

    /// Get a user by ID
    async fn get_user(&self, id: &str) -> Result<User, LibraryError>;

    /// List every user; empty on storage faults
    async fn list_users(&self) -> Vec<User>;

    /// List every book; empty on storage faults
    async fn list_books(&self) -> Vec<Book>;
}
