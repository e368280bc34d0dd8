//! Line-oriented JSON command surface.
//!
//! One request object in, one response object out. Operation names and field
//! casing match the ledger's public operation table (`createUser`,
//! `borrowBook`, `bookId`, ...).

pub mod dto;
pub mod handlers;

pub use handlers::{dispatch, handle_line};
