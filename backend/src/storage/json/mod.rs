//! # JSON Storage Module
//!
//! File-based storage keeping one JSON array per collection per user. The
//! domain layer reads collections wholesale into memory and hands back the
//! full updated collection for persistence; there are no partial writes.
//!
//! ## File layout
//!
//! ```text
//! {base}/{user_id}/clients.json
//! {base}/{user_id}/procedures.json
//! {base}/{user_id}/expenses.json
//! ```
//!
//! Each file is a single JSON array. A missing file reads as an empty
//! collection; every mutation replaces the whole file (last writer wins).

pub mod client_repository;
pub mod connection;
pub mod expense_repository;
pub mod procedure_repository;

pub use client_repository::ClientRepository;
pub use connection::JsonConnection;
pub use expense_repository::ExpenseRepository;
pub use procedure_repository::ProcedureRepository;
