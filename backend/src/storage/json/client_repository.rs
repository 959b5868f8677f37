use anyhow::Result;
use log::info;

use super::connection::JsonConnection;
use crate::domain::models::client::Client;
use crate::storage::traits::ClientStorage;

const COLLECTION: &str = "clients";

/// JSON-file client repository. Every mutation rewrites the user's full
/// client collection.
#[derive(Clone)]
pub struct ClientRepository {
    connection: JsonConnection,
}

impl ClientRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl ClientStorage for ClientRepository {
    fn load_clients(&self, user_id: &str) -> Result<Vec<Client>> {
        self.connection.read_collection(user_id, COLLECTION)
    }

    fn save_clients(&self, user_id: &str, clients: &[Client]) -> Result<()> {
        self.connection.write_collection(user_id, COLLECTION, clients)
    }

    fn get_client(&self, user_id: &str, client_id: &str) -> Result<Option<Client>> {
        let clients = self.load_clients(user_id)?;
        Ok(clients.into_iter().find(|c| c.id == client_id))
    }

    fn store_client(&self, user_id: &str, client: &Client) -> Result<()> {
        let mut clients = self.load_clients(user_id)?;
        clients.push(client.clone());
        self.save_clients(user_id, &clients)?;
        info!("Stored client {} for user {}", client.id, user_id);
        Ok(())
    }

    fn update_client(&self, user_id: &str, client: &Client) -> Result<bool> {
        let mut clients = self.load_clients(user_id)?;
        match clients.iter_mut().find(|c| c.id == client.id) {
            Some(existing) => {
                *existing = client.clone();
                self.save_clients(user_id, &clients)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_client(&self, user_id: &str, client_id: &str) -> Result<bool> {
        let mut clients = self.load_clients(user_id)?;
        let before = clients.len();
        clients.retain(|c| c.id != client_id);
        if clients.len() == before {
            return Ok(false);
        }
        self.save_clients(user_id, &clients)?;
        info!("Deleted client {} for user {}", client_id, user_id);
        Ok(true)
    }
}
