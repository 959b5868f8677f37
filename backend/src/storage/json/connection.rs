use anyhow::{Context, Result};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::json::{ClientRepository, ExpenseRepository, ProcedureRepository};
use crate::storage::traits::Connection;

/// JsonConnection manages file paths and whole-collection reads and writes.
///
/// Each user owns one directory under the base directory, holding one JSON
/// array per collection. Collections are always read and written wholesale.
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a new JSON connection with a base data directory, creating the
    /// directory if it does not exist yet.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            info!("Created data directory {}", base_path.display());
        }

        Ok(Self { base_directory: base_path })
    }

    /// Path of one user's collection file, e.g. `{base}/{user}/clients.json`.
    pub fn collection_path(&self, user_id: &str, collection: &str) -> PathBuf {
        self.base_directory.join(user_id).join(format!("{}.json", collection))
    }

    /// Read a full collection. A missing file is an empty collection.
    pub fn read_collection<T: DeserializeOwned>(&self, user_id: &str, collection: &str) -> Result<Vec<T>> {
        let path = self.collection_path(user_id, collection);
        if !path.exists() {
            debug!("Collection file {} does not exist, treating as empty", path.display());
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let records = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(records)
    }

    /// Replace a full collection. Writes go to a temp file first and are
    /// renamed into place, so an interrupted write never truncates the
    /// existing collection.
    pub fn write_collection<T: Serialize>(
        &self,
        user_id: &str,
        collection: &str,
        records: &[T],
    ) -> Result<()> {
        let path = self.collection_path(user_id, collection);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(records)?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        debug!("Saved {} records to {}", records.len(), path.display());
        Ok(())
    }
}

impl Connection for JsonConnection {
    type ClientRepository = ClientRepository;
    type ProcedureRepository = ProcedureRepository;
    type ExpenseRepository = ExpenseRepository;

    fn create_client_repository(&self) -> Self::ClientRepository {
        ClientRepository::new(self.clone())
    }

    fn create_procedure_repository(&self) -> Self::ProcedureRepository {
        ProcedureRepository::new(self.clone())
    }

    fn create_expense_repository(&self) -> Self::ExpenseRepository {
        ExpenseRepository::new(self.clone())
    }
}
