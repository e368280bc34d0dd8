use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info, instrument, warn};

use crate::contract::model::{Book, User};
use crate::domain::error::DomainError;
use crate::domain::events::LedgerEvent;
use crate::domain::ports::{Clock, EventPublisher, IdGenerator, SystemClock, UuidV4Generator};
use crate::domain::repo::LedgerRepository;

/// Domain service with the lending rules.
/// Depends only on the repository and the other ports, not on infra types.
///
/// Every mutating operation runs under `write_gate`, so the lookups and the
/// write-back of a borrow or return form one unit no other mutation can
/// interleave with. Queries skip the gate; the repository keeps paired
/// writes atomic for them.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn LedgerRepository>,
    events: Arc<dyn EventPublisher<LedgerEvent>>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    config: ServiceConfig,
    write_gate: Arc<Mutex<()>>,
}

/// Configuration for the domain service
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Optional upper bound on names, in characters. `None` means unbounded.
    pub max_name_length: Option<usize>,
}

impl Service {
    /// Create a service with random UUID ids and the system clock.
    pub fn new(
        repo: Arc<dyn LedgerRepository>,
        events: Arc<dyn EventPublisher<LedgerEvent>>,
        config: ServiceConfig,
    ) -> Self {
        Self::with_ports(
            repo,
            events,
            Arc::new(UuidV4Generator),
            Arc::new(SystemClock),
            config,
        )
    }

    /// Create a service with explicit id and clock sources.
    pub fn with_ports(
        repo: Arc<dyn LedgerRepository>,
        events: Arc<dyn EventPublisher<LedgerEvent>>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            events,
            ids,
            clock,
            config,
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    #[instrument(name = "library_ledger.service.create_user", skip_all, fields(name = %name))]
    pub fn create_user(&self, name: &str) -> Result<User, DomainError> {
        info!("Creating new user");
        self.validate_name(name)?;

        let user = User {
            id: self.ids.next_id(),
            created_at: self.clock.now(),
            session_ids: Vec::new(),
            borrowed_book_ids: Vec::new(),
            name: name.to_owned(),
        };

        {
            let _gate = self.write_gate.lock();
            self.repo
                .insert_user(user.clone())
                .map_err(|e| DomainError::storage(e.to_string()))?;
        }

        self.events.publish(&LedgerEvent::UserCreated {
            id: user.id.clone(),
            at: user.created_at,
        });

        info!("Successfully created user with id={}", user.id);
        Ok(user)
    }

    #[instrument(name = "library_ledger.service.create_book", skip_all, fields(name = %name))]
    pub fn create_book(&self, name: &str) -> Result<Book, DomainError> {
        info!("Creating new book");
        self.validate_name(name)?;

        let book = Book {
            id: self.ids.next_id(),
            created_at: self.clock.now(),
            name: name.to_owned(),
            borrowed: false,
        };

        {
            let _gate = self.write_gate.lock();
            self.repo
                .insert_book(book.clone())
                .map_err(|e| DomainError::storage(e.to_string()))?;
        }

        self.events.publish(&LedgerEvent::BookCreated {
            id: book.id.clone(),
            at: book.created_at,
        });

        info!("Successfully created book with id={}", book.id);
        Ok(book)
    }

    #[instrument(
        name = "library_ledger.service.borrow_book",
        skip_all,
        fields(book_id = %book_id, user_id = %user_id)
    )]
    pub fn borrow_book(&self, book_id: &str, user_id: &str) -> Result<Book, DomainError> {
        info!("Borrowing book");
        require_id("book_id", book_id)?;
        require_id("user_id", user_id)?;

        let book = {
            let _gate = self.write_gate.lock();

            let mut user = self.load_user(user_id)?;
            let mut book = self.load_book(book_id)?;

            if book.borrowed {
                warn!("Book is already borrowed");
                return Err(DomainError::already_borrowed(book_id));
            }

            book.borrowed = true;
            user.borrowed_book_ids.push(book.id.clone());

            self.repo
                .save_loan(user, book.clone())
                .map_err(|e| DomainError::storage(e.to_string()))?;
            book
        };

        self.events.publish(&LedgerEvent::BookBorrowed {
            book_id: book.id.clone(),
            user_id: user_id.to_owned(),
            at: self.clock.now(),
        });

        info!("Successfully borrowed book");
        Ok(book)
    }

    #[instrument(
        name = "library_ledger.service.return_book",
        skip_all,
        fields(book_id = %book_id, user_id = %user_id)
    )]
    pub fn return_book(&self, book_id: &str, user_id: &str) -> Result<Book, DomainError> {
        info!("Returning book");
        require_id("book_id", book_id)?;
        require_id("user_id", user_id)?;

        let book = {
            let _gate = self.write_gate.lock();

            let mut user = self.load_user(user_id)?;
            let mut book = self.load_book(book_id)?;

            if !book.borrowed {
                warn!("Book is not currently borrowed");
                return Err(DomainError::not_borrowed(book_id));
            }
            if !user.holds(&book.id) {
                warn!("Book is not borrowed by this user");
                return Err(DomainError::not_borrowed(book_id));
            }

            book.borrowed = false;
            user.borrowed_book_ids.retain(|b| b != &book.id);

            self.repo
                .save_loan(user, book.clone())
                .map_err(|e| DomainError::storage(e.to_string()))?;
            book
        };

        self.events.publish(&LedgerEvent::BookReturned {
            book_id: book.id.clone(),
            user_id: user_id.to_owned(),
            at: self.clock.now(),
        });

        info!("Successfully returned book");
        Ok(book)
    }

    #[instrument(name = "library_ledger.service.get_book", skip_all, fields(book_id = %id))]
    pub fn get_book(&self, id: &str) -> Result<Book, DomainError> {
        debug!("Getting book by id");
        require_id("id", id)?;
        let book = self.load_book(id)?;
        debug!("Successfully retrieved book");
        Ok(book)
    }

    #[instrument(name = "library_ledger.service.get_user", skip_all, fields(user_id = %id))]
    pub fn get_user(&self, id: &str) -> Result<User, DomainError> {
        debug!("Getting user by id");
        require_id("id", id)?;
        let user = self.load_user(id)?;
        debug!("Successfully retrieved user");
        Ok(user)
    }

    /// List every user. Storage faults are logged and yield an empty list.
    #[instrument(name = "library_ledger.service.list_users", skip_all)]
    pub fn list_users(&self) -> Vec<User> {
        match self.repo.all_users() {
            Ok(users) => {
                debug!("Successfully listed {} users", users.len());
                users
            }
            Err(e) => {
                error!("Error getting all users: {:#}", e);
                Vec::new()
            }
        }
    }

    /// List every book. Storage faults are logged and yield an empty list.
    #[instrument(name = "library_ledger.service.list_books", skip_all)]
    pub fn list_books(&self) -> Vec<Book> {
        match self.repo.all_books() {
            Ok(books) => {
                debug!("Successfully listed {} books", books.len());
                books
            }
            Err(e) => {
                error!("Error getting all books: {:#}", e);
                Vec::new()
            }
        }
    }

    // --- lookup helpers ---

    fn load_user(&self, id: &str) -> Result<User, DomainError> {
        self.repo
            .find_user(id)
            .map_err(|e| DomainError::storage(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    fn load_book(&self, id: &str) -> Result<Book, DomainError> {
        self.repo
            .find_book(id)
            .map_err(|e| DomainError::storage(e.to_string()))?
            .ok_or_else(|| DomainError::book_not_found(id))
    }

    // --- validation helpers ---

    fn validate_name(&self, name: &str) -> Result<(), DomainError> {
        if name.is_empty() {
            return Err(DomainError::empty_parameter("name"));
        }
        if let Some(max) = self.config.max_name_length {
            let len = name.chars().count();
            if len > max {
                return Err(DomainError::invalid_parameter(
                    "name",
                    format!("too long: {len} characters (max: {max})"),
                ));
            }
        }
        Ok(())
    }
}

fn require_id(field: &str, value: &str) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(DomainError::empty_parameter(field));
    }
    Ok(())
}
