use anyhow::Result;

use super::connection::JsonConnection;
use crate::domain::models::procedure::Procedure;
use crate::storage::traits::ProcedureStorage;

const COLLECTION: &str = "procedures";

/// JSON-file procedure catalog repository.
#[derive(Clone)]
pub struct ProcedureRepository {
    connection: JsonConnection,
}

impl ProcedureRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl ProcedureStorage for ProcedureRepository {
    fn load_procedures(&self, user_id: &str) -> Result<Vec<Procedure>> {
        self.connection.read_collection(user_id, COLLECTION)
    }

    fn save_procedures(&self, user_id: &str, procedures: &[Procedure]) -> Result<()> {
        self.connection.write_collection(user_id, COLLECTION, procedures)
    }

    fn get_procedure(&self, user_id: &str, procedure_id: &str) -> Result<Option<Procedure>> {
        let procedures = self.load_procedures(user_id)?;
        Ok(procedures.into_iter().find(|p| p.id == procedure_id))
    }

    fn store_procedure(&self, user_id: &str, procedure: &Procedure) -> Result<()> {
        let mut procedures = self.load_procedures(user_id)?;
        procedures.push(procedure.clone());
        self.save_procedures(user_id, &procedures)
    }

    fn update_procedure(&self, user_id: &str, procedure: &Procedure) -> Result<bool> {
        let mut procedures = self.load_procedures(user_id)?;
        match procedures.iter_mut().find(|p| p.id == procedure.id) {
            Some(existing) => {
                *existing = procedure.clone();
                self.save_procedures(user_id, &procedures)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_procedure(&self, user_id: &str, procedure_id: &str) -> Result<bool> {
        let mut procedures = self.load_procedures(user_id)?;
        let before = procedures.len();
        procedures.retain(|p| p.id != procedure_id);
        if procedures.len() == before {
            return Ok(false);
        }
        self.save_procedures(user_id, &procedures)?;
        Ok(true)
    }
}
