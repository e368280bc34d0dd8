pub mod memory;
pub mod record_map;

pub use memory::InMemoryLedgerStore;
pub use record_map::RecordMap;
