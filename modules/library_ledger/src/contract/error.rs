use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
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

    #[error("Internal error")]
    Internal,
}

impl LibraryError {
    pub fn invalid_parameter(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            message: message.into(),
        }
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

    pub fn internal() -> Self {
        Self::Internal
    }

    /// Stable machine-readable code for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidParameter { .. } => "InvalidParameter",
            Self::UserNotFound { .. } => "UserNotFound",
            Self::BookNotFound { .. } => "BookNotFound",
            Self::AlreadyBorrowed { .. } => "AlreadyBorrowed",
            Self::NotBorrowed { .. } => "NotBorrowed",
            Self::Internal => "Internal",
        }
    }
}
