//! Client service: client CRUD and the appointment lifecycle.
//!
//! Appointments are reached only through their owning client; every
//! appointment mutation re-runs the derivations before the whole client
//! record is persisted, so `final_value`, `cost` and `end_time` are always
//! consistent on disk.
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use log::info;
use std::sync::Arc;

use crate::domain::commands::appointments::CreateAppointmentCommand;
use crate::domain::commands::clients::CreateClientCommand;
use crate::domain::models::appointment::Appointment;
use crate::domain::models::client::Client;
use crate::domain::scheduling::{self, BusyInterval};
use crate::domain::session::Session;
use crate::storage::traits::{ClientStorage, Connection, ProcedureStorage};

#[derive(Clone)]
pub struct ClientService<C: Connection> {
    client_repository: C::ClientRepository,
    procedure_repository: C::ProcedureRepository,
    session: Session,
}

impl<C: Connection> ClientService<C> {
    pub fn new(connection: Arc<C>, session: Session) -> Self {
        Self {
            client_repository: connection.create_client_repository(),
            procedure_repository: connection.create_procedure_repository(),
            session,
        }
    }

    pub fn create_client(&self, command: CreateClientCommand) -> Result<Client> {
        if command.name.trim().is_empty() {
            return Err(anyhow!("Client name must not be empty"));
        }

        let mut client = Client::new(command.name);
        client.phone = command.phone;
        client.email = command.email;
        client.birth_date = command.birth_date;
        client.notes = command.notes;
        client.anamnesis = command.anamnesis;

        self.client_repository.store_client(&self.session.user_id, &client)?;
        info!("Created client {} ({})", client.name, client.id);
        Ok(client)
    }

    pub fn list_clients(&self) -> Result<Vec<Client>> {
        self.client_repository.load_clients(&self.session.user_id)
    }

    pub fn get_client(&self, client_id: &str) -> Result<Option<Client>> {
        self.client_repository.get_client(&self.session.user_id, client_id)
    }

    /// Whole-object replace keyed by id. Embedded appointments are
    /// re-derived so a hand-edited record cannot persist stale fields; the
    /// material cost is recomputed for every appointment whose material list
    /// differs from the stored record.
    pub fn update_client(&self, mut client: Client) -> Result<Client> {
        let existing = self
            .get_client(&client.id)?
            .ok_or_else(|| anyhow!("No client with id {}", client.id))?;

        for appointment in &mut client.appointments {
            let stored = existing.appointments.iter().find(|a| a.id == appointment.id);
            let materials_changed = match stored {
                Some(stored) => stored.materials != appointment.materials,
                None => !appointment.materials.is_empty(),
            };
            if materials_changed {
                appointment.recompute_material_cost();
            }
            appointment.recompute_derived();
        }

        self.client_repository.update_client(&self.session.user_id, &client)?;
        Ok(client)
    }

    pub fn delete_client(&self, client_id: &str) -> Result<bool> {
        self.client_repository.delete_client(&self.session.user_id, client_id)
    }

    /// Book a new appointment for a client.
    ///
    /// A named procedure seeds the template defaults first; explicit value
    /// and duration in the command override the seeded ones.
    pub fn add_appointment(&self, command: CreateAppointmentCommand) -> Result<Appointment> {
        let mut client = self
            .get_client(&command.client_id)?
            .ok_or_else(|| anyhow!("No client with id {}", command.client_id))?;

        let mut appointment = Appointment::new(command.date);
        appointment.start_time = command.start_time;
        appointment.discount = command.discount;
        appointment.status = command.status;

        if let Some(name) = &command.procedure_name {
            if let Some(procedure) = self.find_procedure_by_name(name)? {
                appointment.seed_from_procedure(&procedure);
            } else {
                appointment.procedure_name = name.clone();
            }
        }
        if let Some(value) = command.value {
            appointment.value = value;
        }
        if let Some(duration) = command.duration_minutes {
            appointment.duration_minutes = duration;
        }
        if !command.materials.is_empty() {
            appointment.materials = command.materials;
            appointment.recompute_material_cost();
        }
        appointment.recompute_derived();

        client.appointments.push(appointment.clone());
        self.client_repository.update_client(&self.session.user_id, &client)?;
        info!(
            "Booked appointment {} on {} at {} for client {}",
            appointment.id, appointment.date, appointment.start_time, client.id
        );
        Ok(appointment)
    }

    /// Replace an appointment wholesale on its owning client. The material
    /// cost is recomputed whenever the material list changed, and the other
    /// derived fields on every edit.
    pub fn update_appointment(&self, client_id: &str, mut appointment: Appointment) -> Result<Appointment> {
        let mut client = self
            .get_client(client_id)?
            .ok_or_else(|| anyhow!("No client with id {}", client_id))?;

        let existing = client
            .appointments
            .iter_mut()
            .find(|a| a.id == appointment.id)
            .ok_or_else(|| anyhow!("No appointment with id {} for client {}", appointment.id, client_id))?;

        if existing.materials != appointment.materials {
            appointment.recompute_material_cost();
        }
        appointment.recompute_derived();
        *existing = appointment.clone();

        self.client_repository.update_client(&self.session.user_id, &client)?;
        Ok(appointment)
    }

    /// Explicit one-shot template seeding for an existing appointment,
    /// triggered when the user picks a procedure for it.
    pub fn seed_appointment_from_template(
        &self,
        client_id: &str,
        appointment_id: &str,
        procedure_name: &str,
    ) -> Result<Appointment> {
        let mut client = self
            .get_client(client_id)?
            .ok_or_else(|| anyhow!("No client with id {}", client_id))?;
        let procedure = self
            .find_procedure_by_name(procedure_name)?
            .ok_or_else(|| anyhow!("No procedure named {}", procedure_name))?;

        let appointment = client
            .appointments
            .iter_mut()
            .find(|a| a.id == appointment_id)
            .ok_or_else(|| anyhow!("No appointment with id {} for client {}", appointment_id, client_id))?;

        appointment.seed_from_procedure(&procedure);
        appointment.recompute_derived();
        let seeded = appointment.clone();

        self.client_repository.update_client(&self.session.user_id, &client)?;
        Ok(seeded)
    }

    pub fn delete_appointment(&self, client_id: &str, appointment_id: &str) -> Result<bool> {
        let mut client = self
            .get_client(client_id)?
            .ok_or_else(|| anyhow!("No client with id {}", client_id))?;

        let before = client.appointments.len();
        client.appointments.retain(|a| a.id != appointment_id);
        if client.appointments.len() == before {
            return Ok(false);
        }
        self.client_repository.update_client(&self.session.user_id, &client)?;
        Ok(true)
    }

    /// All appointments on a calendar day, across every client.
    pub fn appointments_on(&self, date: NaiveDate) -> Result<Vec<Appointment>> {
        let clients = self.list_clients()?;
        let mut appointments: Vec<Appointment> = clients
            .into_iter()
            .flat_map(|c| c.appointments)
            .filter(|a| a.date == date)
            .collect();
        appointments.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        Ok(appointments)
    }

    /// Free "HH:MM" start times on a day for the requested duration.
    pub fn available_slots(&self, date: NaiveDate, requested_duration: i64) -> Result<Vec<String>> {
        let busy: Vec<BusyInterval> = self
            .appointments_on(date)?
            .iter()
            .map(BusyInterval::from)
            .collect();
        Ok(scheduling::available_start_times(&busy, requested_duration))
    }

    fn find_procedure_by_name(&self, name: &str) -> Result<Option<crate::domain::models::procedure::Procedure>> {
        let procedures = self.procedure_repository.load_procedures(&self.session.user_id)?;
        Ok(procedures.into_iter().find(|p| p.name == name))
    }
}
