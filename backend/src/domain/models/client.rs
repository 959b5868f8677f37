//! Domain model for a client and her appointment history.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::domain::models::appointment::Appointment;

/// A studio client.
///
/// A client exclusively owns her appointments: they are created, edited and
/// deleted only through the owning client's `appointments` list, and the whole
/// client record is replaced on every mutation. Appointment order in the list
/// is not meaningful; consumers re-sort by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    /// Health/allergy questionnaire answers, keyed by question. Typed map
    /// access replaces free-form nested field paths.
    #[serde(default)]
    pub anamnesis: BTreeMap<String, String>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
}

impl Client {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            phone: String::new(),
            email: String::new(),
            birth_date: None,
            notes: String::new(),
            anamnesis: BTreeMap::new(),
            appointments: Vec::new(),
        }
    }

    /// Calendar day of the client's most recent appointment, if any.
    pub fn last_appointment_date(&self) -> Option<NaiveDate> {
        self.appointments.iter().map(|a| a.date).max()
    }

    /// Whether the client has more than one appointment on record.
    pub fn is_recurring(&self) -> bool {
        self.appointments.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::appointment::Appointment;

    #[test]
    fn test_last_appointment_date_picks_latest() {
        let mut client = Client::new("Ana");
        assert_eq!(client.last_appointment_date(), None);

        let mut first = Appointment::new(NaiveDate::from_ymd_opt(2026, 1, 10).unwrap());
        first.start_time = "09:00".to_string();
        let mut second = Appointment::new(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        second.start_time = "14:00".to_string();
        client.appointments.push(second.clone());
        client.appointments.push(first);

        assert_eq!(client.last_appointment_date(), Some(second.date));
    }

    #[test]
    fn test_is_recurring_needs_more_than_one_appointment() {
        let mut client = Client::new("Bia");
        assert!(!client.is_recurring());
        client
            .appointments
            .push(Appointment::new(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()));
        assert!(!client.is_recurring());
        client
            .appointments
            .push(Appointment::new(NaiveDate::from_ymd_opt(2026, 2, 5).unwrap()));
        assert!(client.is_recurring());
    }
}
