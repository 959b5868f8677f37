//! # Storage Traits
//!
//! Storage abstraction for the domain layer. Collections are owned per user:
//! every operation takes the owning user's id and works against that user's
//! collection as a whole. Reads load the full collection into memory; writes
//! replace it wholesale (last writer wins, no partial updates).

use anyhow::Result;

use crate::domain::models::client::Client;
use crate::domain::models::expense::Expense;
use crate::domain::models::procedure::Procedure;

/// Interface for client collection storage.
pub trait ClientStorage: Send + Sync + Clone {
    /// Load the user's full client collection; missing storage reads as empty
    fn load_clients(&self, user_id: &str) -> Result<Vec<Client>>;

    /// Replace the user's full client collection
    fn save_clients(&self, user_id: &str, clients: &[Client]) -> Result<()>;

    /// Retrieve a single client by id
    fn get_client(&self, user_id: &str, client_id: &str) -> Result<Option<Client>>;

    /// Append a new client to the collection
    fn store_client(&self, user_id: &str, client: &Client) -> Result<()>;

    /// Replace an existing client wholesale, keyed by id.
    /// Returns false when no client with that id exists.
    fn update_client(&self, user_id: &str, client: &Client) -> Result<bool>;

    /// Remove a client by id. Returns false when it was not present.
    fn delete_client(&self, user_id: &str, client_id: &str) -> Result<bool>;
}

/// Interface for procedure catalog storage.
pub trait ProcedureStorage: Send + Sync + Clone {
    fn load_procedures(&self, user_id: &str) -> Result<Vec<Procedure>>;

    fn save_procedures(&self, user_id: &str, procedures: &[Procedure]) -> Result<()>;

    fn get_procedure(&self, user_id: &str, procedure_id: &str) -> Result<Option<Procedure>>;

    fn store_procedure(&self, user_id: &str, procedure: &Procedure) -> Result<()>;

    fn update_procedure(&self, user_id: &str, procedure: &Procedure) -> Result<bool>;

    fn delete_procedure(&self, user_id: &str, procedure_id: &str) -> Result<bool>;
}

/// Interface for expense ledger storage.
pub trait ExpenseStorage: Send + Sync + Clone {
    fn load_expenses(&self, user_id: &str) -> Result<Vec<Expense>>;

    fn save_expenses(&self, user_id: &str, expenses: &[Expense]) -> Result<()>;

    fn store_expense(&self, user_id: &str, expense: &Expense) -> Result<()>;

    fn update_expense(&self, user_id: &str, expense: &Expense) -> Result<bool>;

    fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<bool>;
}

/// Interface for storage connections.
///
/// Abstracts the concrete backing store and provides factory methods for the
/// per-collection repositories, so the domain layer never names a storage
/// implementation directly.
pub trait Connection: Send + Sync + Clone {
    type ClientRepository: ClientStorage;
    type ProcedureRepository: ProcedureStorage;
    type ExpenseRepository: ExpenseStorage;

    fn create_client_repository(&self) -> Self::ClientRepository;

    fn create_procedure_repository(&self) -> Self::ProcedureRepository;

    fn create_expense_repository(&self) -> Self::ExpenseRepository;
}
