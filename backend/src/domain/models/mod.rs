//! Domain models for the studio manager.

pub mod appointment;
pub mod client;
pub mod expense;
pub mod procedure;
