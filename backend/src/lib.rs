//! # Studio Manager Backend
//!
//! Domain and storage layers for a single-tenant beauty-studio management
//! dashboard: client records with their appointment histories, the procedure
//! catalog, slot availability over the working day, dashboard statistics and
//! the unified financial ledger.
//!
//! All interfaces are in-process function calls; persistence is one JSON
//! array per collection per user, read and replaced wholesale. Callers embed
//! this crate and wire a [`Backend`] over a storage connection.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub mod domain;
pub mod storage;

use domain::{ClientService, DashboardService, ExpenseService, FinanceService, ProcedureService, Session};
use storage::traits::Connection;

pub use storage::JsonConnection;

/// All services wired over one storage connection and session.
pub struct Backend<C: Connection> {
    pub client_service: ClientService<C>,
    pub procedure_service: ProcedureService<C>,
    pub expense_service: ExpenseService<C>,
    pub dashboard_service: DashboardService<C>,
    pub finance_service: FinanceService<C>,
}

impl<C: Connection> Backend<C> {
    pub fn new(connection: Arc<C>, session: Session) -> Self {
        Self {
            client_service: ClientService::new(connection.clone(), session.clone()),
            procedure_service: ProcedureService::new(connection.clone(), session.clone()),
            expense_service: ExpenseService::new(connection.clone(), session.clone()),
            dashboard_service: DashboardService::new(connection.clone(), session.clone()),
            finance_service: FinanceService::new(connection, session),
        }
    }
}

impl Backend<JsonConnection> {
    /// Open a backend over JSON-file storage rooted at `base_directory`.
    pub fn open<P: AsRef<Path>>(base_directory: P, session: Session) -> Result<Self> {
        let connection = Arc::new(JsonConnection::new(base_directory)?);
        Ok(Self::new(connection, session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::domain::commands::appointments::CreateAppointmentCommand;
    use crate::domain::commands::clients::CreateClientCommand;
    use crate::domain::commands::expenses::CreateExpenseCommand;
    use crate::domain::commands::procedures::CreateProcedureCommand;
    use crate::domain::models::appointment::AppointmentStatus;
    use crate::domain::models::expense::ExpenseCategory;
    use crate::domain::Period;

    #[test]
    fn test_backend_end_to_end() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let backend = Backend::open(temp_dir.path(), Session::new("studio-owner")).unwrap();
        let day = NaiveDate::from_ymd_opt(2026, 8, 12).unwrap();

        backend
            .procedure_service
            .create_procedure(CreateProcedureCommand {
                name: "Limpeza de pele".to_string(),
                default_price: 200.0,
                default_cost: 50.0,
                default_duration_minutes: 60,
                ..Default::default()
            })
            .unwrap();

        let client = backend
            .client_service
            .create_client(CreateClientCommand { name: "Ana".to_string(), ..Default::default() })
            .unwrap();

        backend
            .client_service
            .add_appointment(CreateAppointmentCommand {
                client_id: client.id.clone(),
                date: day,
                start_time: "09:00".to_string(),
                duration_minutes: None,
                procedure_name: Some("Limpeza de pele".to_string()),
                value: None,
                discount: 0.0,
                status: AppointmentStatus::Pago,
                materials: Vec::new(),
            })
            .unwrap();

        backend
            .expense_service
            .create_expense(CreateExpenseCommand {
                date: day,
                description: "Materiais".to_string(),
                category: ExpenseCategory::Material,
                amount: 80.0,
            })
            .unwrap();

        // The 09:00 booking blocks its two slots for the day.
        let slots = backend.client_service.available_slots(day, 30).unwrap();
        assert!(!slots.contains(&"09:00".to_string()));
        assert!(!slots.contains(&"09:30".to_string()));

        let dashboard = backend.dashboard_service.summary(day).unwrap();
        assert_eq!(dashboard.total_clients, 1);
        assert_eq!(dashboard.total_revenue, 200.0);
        assert_eq!(dashboard.appointments_today, 1);

        let finances = backend.finance_service.summary(Period::Month, day).unwrap();
        assert_eq!(finances.total_revenue, 200.0);
        assert_eq!(finances.total_expenses, 80.0);
        assert_eq!(finances.net_profit, 120.0);
    }
}
