//! Domain layer: models, commands and the studio services.

pub mod client_service;
pub mod commands;
pub mod dashboard_service;
pub mod expense_service;
pub mod finance_service;
pub mod models;
pub mod procedure_service;
pub mod scheduling;
pub mod session;

pub use client_service::ClientService;
pub use dashboard_service::DashboardService;
pub use expense_service::ExpenseService;
pub use finance_service::{FinanceService, Period};
pub use procedure_service::ProcedureService;
pub use session::Session;
