use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contract::error::LibraryError;
use crate::contract::model::{Book, User};

/// One ledger call. Missing string arguments decode as empty strings and are
/// rejected by the service as invalid parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Request {
    CreateUser {
        #[serde(default)]
        name: String,
    },
    CreateBook {
        #[serde(default)]
        name: String,
    },
    #[serde(rename_all = "camelCase")]
    BorrowBook {
        #[serde(default)]
        book_id: String,
        #[serde(default)]
        user_id: String,
    },
    #[serde(rename_all = "camelCase")]
    ReturnBook {
        #[serde(default)]
        book_id: String,
        #[serde(default)]
        user_id: String,
    },
    GetBookById {
        #[serde(default)]
        id: String,
    },
    GetUserById {
        #[serde(default)]
        id: String,
    },
    GetAllUsers,
    GetAllBook,
}

impl Request {
    /// Wire name of the operation, for logging.
    pub fn op(&self) -> &'static str {
        match self {
            Self::CreateUser { .. } => "createUser",
            Self::CreateBook { .. } => "createBook",
            Self::BorrowBook { .. } => "borrowBook",
            Self::ReturnBook { .. } => "returnBook",
            Self::GetBookById { .. } => "getBookById",
            Self::GetUserById { .. } => "getUserById",
            Self::GetAllUsers => "getAllUsers",
            Self::GetAllBook => "getAllBook",
        }
    }
}

/// DTO for user representation with serde
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub session_ids: Vec<String>,
    pub borrowed_book_ids: Vec<String>,
    pub name: String,
}

/// DTO for book representation with serde
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub borrowed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    User(UserDto),
    Book(BookDto),
    Users(Vec<UserDto>),
    Books(Vec<BookDto>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDto {
    pub kind: String,
    pub message: String,
}

/// `{"ok": ...}` on success, `{"err": {"kind", "message"}}` on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Response {
    Ok(Payload),
    Err(ErrorDto),
}

impl Response {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::Err(ErrorDto {
            kind: "InvalidRequest".to_string(),
            message: message.into(),
        })
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

// Conversion implementations between DTOs and contract models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            created_at: user.created_at,
            session_ids: user.session_ids,
            borrowed_book_ids: user.borrowed_book_ids,
            name: user.name,
        }
    }
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            created_at: book.created_at,
            name: book.name,
            borrowed: book.borrowed,
        }
    }
}

impl From<LibraryError> for ErrorDto {
    fn from(err: LibraryError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<Result<User, LibraryError>> for Response {
    fn from(res: Result<User, LibraryError>) -> Self {
        match res {
            Ok(user) => Self::Ok(Payload::User(user.into())),
            Err(e) => Self::Err(e.into()),
        }
    }
}

impl From<Result<Book, LibraryError>> for Response {
    fn from(res: Result<Book, LibraryError>) -> Self {
        match res {
            Ok(book) => Self::Ok(Payload::Book(book.into())),
            Err(e) => Self::Err(e.into()),
        }
    }
}
