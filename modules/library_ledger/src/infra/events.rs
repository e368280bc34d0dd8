use tracing::info;

use crate::domain::events::LedgerEvent;
use crate::domain::ports::EventPublisher;

/// Event publisher that only records events in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventPublisher;

impl EventPublisher<LedgerEvent> for TracingEventPublisher {
    fn publish(&self, event: &LedgerEvent) {
        match event {
            LedgerEvent::UserCreated { id, at } => {
                info!(target: "library_ledger::events", user_id = %id, %at, "user created");
            }
            LedgerEvent::BookCreated { id, at } => {
                info!(target: "library_ledger::events", book_id = %id, %at, "book created");
            }
            LedgerEvent::BookBorrowed {
                book_id,
                user_id,
                at,
            } => {
                info!(target: "library_ledger::events", %book_id, %user_id, %at, "book borrowed");
            }
            LedgerEvent::BookReturned {
                book_id,
                user_id,
                at,
            } => {
                info!(target: "library_ledger::events", %book_id, %user_id, %at, "book returned");
            }
        }
    }
}
