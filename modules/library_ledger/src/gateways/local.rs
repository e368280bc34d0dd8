use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::LibraryApi,
    error::LibraryError,
    model::{Book, User},
};
use crate::domain::{error::DomainError, service::Service};

/// Local implementation of the LibraryApi trait that delegates to the domain service
pub struct LibraryLocalClient {
    service: Arc<Service>,
}

impl LibraryLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl LibraryApi for LibraryLocalClient {
    async fn create_user(&self, name: &str) -> Result<User, LibraryError> {
        self.service.create_user(name).map_err(map_domain_error)
    }

    async fn create_book(&self, name: &str) -> Result<Book, LibraryError> {
        self.service.create_book(name).map_err(map_domain_error)
    }

    async fn borrow_book(&self, book_id: &str, user_id: &str) -> Result<Book, LibraryError> {
        self.service
            .borrow_book(book_id, user_id)
            .map_err(map_domain_error)
    }

    async fn return_book(&self, book_id: &str, user_id: &str) -> Result<Book, LibraryError> {
        self.service
            .return_book(book_id, user_id)
            .map_err(map_domain_error)
    }

    async fn get_book(&self, id: &str) -> Result<Book, LibraryError> {
        self.service.get_book(id).map_err(map_domain_error)
    }

    async fn get_user(&self, id: &str) -> Result<User, LibraryError> {
        self.service.get_user(id).map_err(map_domain_error)
    }

    async fn list_users(&self) -> Vec<User> {
        self.service.list_users()
    }

    async fn list_books(&self) -> Vec<Book> {
        self.service.list_books()
    }
}

/// Map domain errors to contract errors
pub fn map_domain_error(domain_error: DomainError) -> LibraryError {
    match domain_error {
        DomainError::InvalidParameter { field, message } => {
            LibraryError::invalid_parameter(field, message)
        }
        DomainError::UserNotFound { id } => LibraryError::user_not_found(id),
        DomainError::BookNotFound { id } => LibraryError::book_not_found(id),
        DomainError::AlreadyBorrowed { book_id } => LibraryError::already_borrowed(book_id),
        DomainError::NotBorrowed { book_id } => LibraryError::not_borrowed(book_id),
        DomainError::Storage { .. } => LibraryError::internal(),
    }
}
