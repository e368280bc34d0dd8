use parking_lot::RwLock;
use tracing::trace;

use crate::contract::model::{Book, User};
use crate::domain::repo::LedgerRepository;
use crate::infra::storage::record_map::RecordMap;

#[derive(Debug, Default)]
struct Tables {
    users: RecordMap<User>,
    books: RecordMap<Book>,
}

/// Record store holding both tables behind one lock.
///
/// A single `RwLock` covers users and books so a paired write lands in one
/// critical section.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    tables: RwLock<Tables>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.tables.read().users.len()
    }

    pub fn book_count(&self) -> usize {
        self.tables.read().books.len()
    }
}

impl LedgerRepository for InMemoryLedgerStore {
    fn find_user(&self, id: &str) -> anyhow::Result<Option<User>> {
        Ok(self.tables.read().users.get(id))
    }

    fn find_book(&self, id: &str) -> anyhow::Result<Option<Book>> {
        Ok(self.tables.read().books.get(id))
    }

    fn insert_user(&self, u: User) -> anyhow::Result<()> {
        trace!(user_id = %u.id, "insert user");
        self.tables.write().users.insert(u.id.clone(), u);
        Ok(())
    }

    fn insert_book(&self, b: Book) -> anyhow::Result<()> {
        trace!(book_id = %b.id, "insert book");
        self.tables.write().books.insert(b.id.clone(), b);
        Ok(())
    }

    fn save_loan(&self, u: User, b: Book) -> anyhow::Result<()> {
        trace!(user_id = %u.id, book_id = %b.id, borrowed = b.borrowed, "save loan");
        let mut tables = self.tables.write();
        tables.users.insert(u.id.clone(), u);
        tables.books.insert(b.id.clone(), b);
        Ok(())
    }

    fn all_users(&self) -> anyhow::Result<Vec<User>> {
        Ok(self.tables.read().users.values())
    }

    fn all_books(&self) -> anyhow::Result<Vec<Book>> {
        Ok(self.tables.read().books.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            created_at: Utc::now(),
            session_ids: vec![],
            borrowed_book_ids: vec![],
            name: "Alice".to_string(),
        }
    }

    fn book(id: &str) -> Book {
        Book {
            id: id.to_string(),
            created_at: Utc::now(),
            name: "Dune".to_string(),
            borrowed: false,
        }
    }

    #[test]
    fn tables_are_independent() {
        let store = InMemoryLedgerStore::new();
        store.insert_user(user("x")).unwrap();

        assert!(store.find_user("x").unwrap().is_some());
        assert!(store.find_book("x").unwrap().is_none());
        assert_eq!(store.user_count(), 1);
        assert_eq!(store.book_count(), 0);
    }

    #[test]
    fn save_loan_replaces_both_records() {
        let store = InMemoryLedgerStore::new();
        store.insert_user(user("u1")).unwrap();
        store.insert_book(book("b1")).unwrap();

        let mut u = user("u1");
        u.borrowed_book_ids.push("b1".into());
        let mut b = book("b1");
        b.borrowed = true;
        store.save_loan(u, b).unwrap();

        assert_eq!(
            store.find_user("u1").unwrap().unwrap().borrowed_book_ids,
            vec!["b1".to_string()]
        );
        assert!(store.find_book("b1").unwrap().unwrap().borrowed);
        assert_eq!(store.user_count(), 1);
        assert_eq!(store.book_count(), 1);
    }

    #[test]
    fn listing_returns_key_order() {
        let store = InMemoryLedgerStore::new();
        store.insert_book(book("b2")).unwrap();
        store.insert_book(book("b1")).unwrap();

        let ids: Vec<String> = store.all_books().unwrap().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["b1", "b2"]);
        assert!(store.all_users().unwrap().is_empty());
    }
}
