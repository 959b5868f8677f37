//! Procedure catalog service.
use anyhow::{anyhow, Result};
use log::info;
use std::sync::Arc;

use crate::domain::commands::procedures::CreateProcedureCommand;
use crate::domain::models::procedure::Procedure;
use crate::domain::session::Session;
use crate::storage::traits::{Connection, ProcedureStorage};

#[derive(Clone)]
pub struct ProcedureService<C: Connection> {
    procedure_repository: C::ProcedureRepository,
    session: Session,
}

impl<C: Connection> ProcedureService<C> {
    pub fn new(connection: Arc<C>, session: Session) -> Self {
        Self {
            procedure_repository: connection.create_procedure_repository(),
            session,
        }
    }

    pub fn create_procedure(&self, command: CreateProcedureCommand) -> Result<Procedure> {
        if command.name.trim().is_empty() {
            return Err(anyhow!("Procedure name must not be empty"));
        }

        let mut procedure = Procedure::new(
            command.name,
            command.default_price,
            command.default_duration_minutes,
        );
        procedure.category = command.category;
        procedure.default_cost = command.default_cost;
        procedure.post_care = command.post_care;

        self.procedure_repository.store_procedure(&self.session.user_id, &procedure)?;
        info!("Added procedure {} to the catalog", procedure.name);
        Ok(procedure)
    }

    pub fn list_procedures(&self) -> Result<Vec<Procedure>> {
        self.procedure_repository.load_procedures(&self.session.user_id)
    }

    /// Catalog entries currently offered for booking.
    pub fn list_active_procedures(&self) -> Result<Vec<Procedure>> {
        let procedures = self.list_procedures()?;
        Ok(procedures.into_iter().filter(|p| p.is_active).collect())
    }

    pub fn get_procedure(&self, procedure_id: &str) -> Result<Option<Procedure>> {
        self.procedure_repository.get_procedure(&self.session.user_id, procedure_id)
    }

    /// Lookup by exact name, used when seeding an appointment from its
    /// selected procedure. Names are unique by convention only; the first
    /// match wins.
    pub fn find_by_name(&self, name: &str) -> Result<Option<Procedure>> {
        let procedures = self.list_procedures()?;
        Ok(procedures.into_iter().find(|p| p.name == name))
    }

    pub fn update_procedure(&self, procedure: Procedure) -> Result<Procedure> {
        let updated = self.procedure_repository.update_procedure(&self.session.user_id, &procedure)?;
        if !updated {
            return Err(anyhow!("No procedure with id {}", procedure.id));
        }
        Ok(procedure)
    }

    pub fn delete_procedure(&self, procedure_id: &str) -> Result<bool> {
        self.procedure_repository.delete_procedure(&self.session.user_id, procedure_id)
    }
}
