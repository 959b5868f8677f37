//! Dashboard aggregation over the full client store.
//!
//! Every statistic is a pure scan of the client collection against an
//! injected reference day, so the numbers are reproducible in tests and do
//! not depend on the machine clock.
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

use shared::{DashboardSummary, MonthlyRevenue};

use crate::domain::models::appointment::AppointmentStatus;
use crate::domain::models::client::Client;
use crate::domain::session::Session;
use crate::storage::traits::{ClientStorage, Connection};

/// Portuguese three-letter month abbreviations, indexed by month - 1.
pub const MONTH_ABBREV: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Days without an appointment after which a client counts as inactive.
const INACTIVITY_DAYS: i64 = 60;
/// Look-ahead window for upcoming birthdays.
const BIRTHDAY_WINDOW_DAYS: i64 = 30;

#[derive(Clone)]
pub struct DashboardService<C: Connection> {
    client_repository: C::ClientRepository,
    session: Session,
}

impl<C: Connection> DashboardService<C> {
    pub fn new(connection: Arc<C>, session: Session) -> Self {
        Self {
            client_repository: connection.create_client_repository(),
            session,
        }
    }

    /// Summary statistics for the dashboard home view, relative to `today`.
    pub fn summary(&self, today: NaiveDate) -> Result<DashboardSummary> {
        let clients = self.client_repository.load_clients(&self.session.user_id)?;

        let total_clients = clients.len();
        let mut total_revenue = 0.0;
        let mut appointments_today = 0;
        let mut monthly_revenue: Vec<MonthlyRevenue> = Vec::new();

        for client in &clients {
            for appointment in &client.appointments {
                if appointment.date == today {
                    appointments_today += 1;
                }
                if appointment.status == AppointmentStatus::Pago {
                    let amount = appointment.billed_amount();
                    total_revenue += amount;

                    // Buckets keep first-occurrence order, not calendar order.
                    let label = MONTH_ABBREV[appointment.date.month0() as usize].to_string();
                    match monthly_revenue.iter().position(|m| m.month == label) {
                        Some(idx) => monthly_revenue[idx].total += amount,
                        None => monthly_revenue.push(MonthlyRevenue { month: label, total: amount }),
                    }
                }
            }
        }

        let recurring = clients.iter().filter(|c| c.is_recurring()).count();
        let recurrence_rate = if total_clients == 0 {
            0.0
        } else {
            recurring as f64 / total_clients as f64 * 100.0
        };

        Ok(DashboardSummary {
            total_clients,
            total_revenue,
            appointments_today,
            recurrence_rate,
            monthly_revenue,
        })
    }

    /// Clients whose latest appointment is more than 60 days past, or who
    /// have never been in. Used to suggest reactivation outreach.
    pub fn inactive_clients(&self, today: NaiveDate) -> Result<Vec<Client>> {
        let clients = self.client_repository.load_clients(&self.session.user_id)?;
        Ok(clients
            .into_iter()
            .filter(|client| match client.last_appointment_date() {
                Some(last) => (today - last).num_days() > INACTIVITY_DAYS,
                None => true,
            })
            .collect())
    }

    /// Clients whose birthday falls within the next 30 days of `today`.
    ///
    /// The stored birth date is re-anchored to the current and the following
    /// year as two independent comparisons; nothing is mutated while
    /// comparing, so reusing the same date across both checks is safe.
    pub fn upcoming_birthdays(&self, today: NaiveDate) -> Result<Vec<Client>> {
        let clients = self.client_repository.load_clients(&self.session.user_id)?;
        Ok(clients
            .into_iter()
            .filter(|client| match client.birth_date {
                Some(birth) => birthday_within_window(birth, today),
                None => false,
            })
            .collect())
    }
}

fn birthday_within_window(birth: NaiveDate, today: NaiveDate) -> bool {
    [today.year(), today.year() + 1].iter().any(|&year| {
        // Feb 29 birthdays only anchor on leap years.
        NaiveDate::from_ymd_opt(year, birth.month(), birth.day())
            .map(|anchored| {
                let days = (anchored - today).num_days();
                (0..=BIRTHDAY_WINDOW_DAYS).contains(&days)
            })
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::appointment::Appointment;
    use crate::storage::json::JsonConnection;
    use crate::storage::traits::ClientStorage;

    fn create_test_service() -> (DashboardService<JsonConnection>, Arc<JsonConnection>, tempfile::TempDir) {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let connection = Arc::new(JsonConnection::new(temp_dir.path()).unwrap());
        let service = DashboardService::new(connection.clone(), Session::new("studio-owner"));
        (service, connection, temp_dir)
    }

    fn paid_appointment(date: NaiveDate, final_value: f64) -> Appointment {
        let mut appointment = Appointment::new(date);
        appointment.value = final_value;
        appointment.status = AppointmentStatus::Pago;
        appointment.recompute_derived();
        appointment
    }

    fn store_clients(connection: &JsonConnection, clients: &[Client]) {
        connection
            .create_client_repository()
            .save_clients("studio-owner", clients)
            .unwrap();
    }

    #[test]
    fn test_summary_over_two_clients() {
        let (service, connection, _temp_dir) = create_test_service();
        let today = NaiveDate::from_ymd_opt(2026, 6, 10).unwrap();

        let mut with_visit = Client::new("Ana");
        with_visit.appointments.push(paid_appointment(today, 100.0));
        let without_visit = Client::new("Bia");
        store_clients(&connection, &[with_visit, without_visit]);

        let summary = service.summary(today).unwrap();
        assert_eq!(summary.total_clients, 2);
        assert_eq!(summary.total_revenue, 100.0);
        assert_eq!(summary.appointments_today, 1);
        assert_eq!(summary.recurrence_rate, 0.0);
    }

    #[test]
    fn test_summary_on_empty_store() {
        let (service, _connection, _temp_dir) = create_test_service();
        let summary = service.summary(NaiveDate::from_ymd_opt(2026, 6, 10).unwrap()).unwrap();
        assert_eq!(summary.total_clients, 0);
        assert_eq!(summary.recurrence_rate, 0.0);
        assert!(summary.monthly_revenue.is_empty());
    }

    #[test]
    fn test_recurrence_counts_multi_appointment_clients() {
        let (service, connection, _temp_dir) = create_test_service();
        let today = NaiveDate::from_ymd_opt(2026, 6, 10).unwrap();

        let mut recurring = Client::new("Carla");
        recurring.appointments.push(paid_appointment(today, 80.0));
        recurring
            .appointments
            .push(paid_appointment(NaiveDate::from_ymd_opt(2026, 5, 2).unwrap(), 80.0));
        let one_timer = {
            let mut c = Client::new("Dani");
            c.appointments.push(paid_appointment(today, 50.0));
            c
        };
        store_clients(&connection, &[recurring, one_timer]);

        let summary = service.summary(today).unwrap();
        assert_eq!(summary.recurrence_rate, 50.0);
    }

    #[test]
    fn test_monthly_revenue_keeps_first_occurrence_order() {
        let (service, connection, _temp_dir) = create_test_service();

        let mut client = Client::new("Elisa");
        // March paid first, then January: buckets stay in that order.
        client
            .appointments
            .push(paid_appointment(NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(), 200.0));
        client
            .appointments
            .push(paid_appointment(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(), 120.0));
        client
            .appointments
            .push(paid_appointment(NaiveDate::from_ymd_opt(2026, 3, 20).unwrap(), 50.0));
        store_clients(&connection, &[client]);

        let summary = service.summary(NaiveDate::from_ymd_opt(2026, 6, 10).unwrap()).unwrap();
        let labels: Vec<&str> = summary.monthly_revenue.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(labels, vec!["mar", "jan"]);
        assert_eq!(summary.monthly_revenue[0].total, 250.0);
        assert_eq!(summary.monthly_revenue[1].total, 120.0);
    }

    #[test]
    fn test_pending_appointments_do_not_count_as_revenue() {
        let (service, connection, _temp_dir) = create_test_service();
        let today = NaiveDate::from_ymd_opt(2026, 6, 10).unwrap();

        let mut client = Client::new("Fabi");
        let mut pending = Appointment::new(today);
        pending.value = 500.0;
        pending.recompute_derived();
        client.appointments.push(pending);
        store_clients(&connection, &[client]);

        let summary = service.summary(today).unwrap();
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.appointments_today, 1);
    }

    #[test]
    fn test_inactive_clients() {
        let (service, connection, _temp_dir) = create_test_service();
        let today = NaiveDate::from_ymd_opt(2026, 6, 10).unwrap();

        let mut fresh = Client::new("Gabi");
        fresh
            .appointments
            .push(paid_appointment(NaiveDate::from_ymd_opt(2026, 5, 20).unwrap(), 90.0));
        let mut stale = Client::new("Helo");
        stale
            .appointments
            .push(paid_appointment(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(), 90.0));
        let never_in = Client::new("Iara");
        store_clients(&connection, &[fresh, stale, never_in]);

        let inactive = service.inactive_clients(today).unwrap();
        let names: Vec<&str> = inactive.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Helo", "Iara"]);
    }

    #[test]
    fn test_upcoming_birthdays_with_year_wrap() {
        let (service, connection, _temp_dir) = create_test_service();
        let today = NaiveDate::from_ymd_opt(2026, 12, 20).unwrap();

        let mut january = Client::new("Julia");
        january.birth_date = Some(NaiveDate::from_ymd_opt(1990, 1, 10).unwrap());
        let mut june = Client::new("Karen");
        june.birth_date = Some(NaiveDate::from_ymd_opt(1985, 6, 15).unwrap());
        let mut today_birthday = Client::new("Lara");
        today_birthday.birth_date = Some(NaiveDate::from_ymd_opt(2000, 12, 20).unwrap());
        store_clients(&connection, &[january, june, today_birthday]);

        let upcoming = service.upcoming_birthdays(today).unwrap();
        let names: Vec<&str> = upcoming.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Julia", "Lara"]);
    }
}
