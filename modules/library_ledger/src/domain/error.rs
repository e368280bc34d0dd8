use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid parameter '{field}': {message}")]
    InvalidParameter { field: String, message: String },

    #[error("User not found: {id}")]
    UserNotFound { id: String },

    #[error("Book not found: {id}")]
    BookNotFound { id: String },

    #[error("Book {book_id} is already borrowed")]
    AlreadyBorrowed { book_id: String },

    #[error("Book {book_id} is not currently borrowed")]
    NotBorrowed { book_id: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn invalid_parameter(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn empty_parameter(field: impl Into<String>) -> Self {
        Self::invalid_parameter(field, "must not be empty")
    }

    pub fn user_not_found(id: impl Into<String>) -> Self {
        Self::UserNotFound { id: id.into() }
    }

    pub fn book_not_found(id: impl Into<String>) -> Self {
        Self::BookNotFound { id: id.into() }
    }

    pub fn already_borrowed(book_id: impl Into<String>) -> Self {
        Self::AlreadyBorrowed {
            book_id: book_id.into(),
        }
    }

    pub fn not_borrowed(book_id: impl Into<String>) -> Self {
        Self::NotBorrowed {
            book_id: book_id.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
