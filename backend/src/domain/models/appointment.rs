//! Domain model for an appointment and its derived fields.
//!
//! Three fields of an appointment are derived, never entered directly:
//! `final_value` (value minus discount), `end_time` (start plus duration) and
//! `cost` (sum of the used materials' costs). The recompute methods here are
//! run by the client service on every appointment mutation so the stored
//! record is always consistent.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::models::procedure::Procedure;

/// Payment status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Pago,
    Pendente,
    Atrasado,
}

impl AppointmentStatus {
    pub fn to_payment_state(self) -> shared::PaymentState {
        match self {
            AppointmentStatus::Pago => shared::PaymentState::Pago,
            AppointmentStatus::Pendente => shared::PaymentState::Pendente,
            AppointmentStatus::Atrasado => shared::PaymentState::Atrasado,
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pago => write!(f, "Pago"),
            AppointmentStatus::Pendente => write!(f, "Pendente"),
            AppointmentStatus::Atrasado => write!(f, "Atrasado"),
        }
    }
}

/// A material consumed during an appointment.
///
/// `cost` is the material's own cost entry; the appointment's total cost is
/// the plain sum of these fields (quantity is informational only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialUsed {
    pub name: String,
    pub quantity: f64,
    pub cost: f64,
}

/// Whether a stored image was taken before or after the procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Antes,
    Depois,
}

/// Reference to a before/after image attached to an appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    pub id: String,
    pub kind: MediaKind,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub date: NaiveDate,
    /// Local wall-clock start, "HH:MM", no timezone
    pub start_time: String,
    /// Derived: start_time plus duration, wrapped on a 24h clock
    #[serde(default)]
    pub end_time: String,
    pub duration_minutes: i64,
    #[serde(default)]
    pub procedure_name: String,
    #[serde(default)]
    pub category: String,
    pub value: f64,
    #[serde(default)]
    pub discount: f64,
    /// Derived: value - discount
    #[serde(default)]
    pub final_value: f64,
    /// Derived from materials; seeded from the procedure template when no
    /// materials have been recorded yet
    #[serde(default)]
    pub cost: f64,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub materials: Vec<MaterialUsed>,
    #[serde(default)]
    pub media: Vec<MediaRef>,
    #[serde(default)]
    pub procedure_steps: Vec<String>,
    #[serde(default)]
    pub post_care: String,
}

impl Appointment {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            start_time: "08:00".to_string(),
            end_time: String::new(),
            duration_minutes: 30,
            procedure_name: String::new(),
            category: String::new(),
            value: 0.0,
            discount: 0.0,
            final_value: 0.0,
            cost: 0.0,
            status: AppointmentStatus::Pendente,
            materials: Vec::new(),
            media: Vec::new(),
            procedure_steps: Vec::new(),
            post_care: String::new(),
        }
    }

    /// Sum of the materials' cost entries.
    pub fn materials_cost(&self) -> f64 {
        self.materials.iter().map(|m| m.cost).sum()
    }

    /// Amount actually billed for this appointment: the derived final value,
    /// falling back to the raw value for records written before derivation.
    pub fn billed_amount(&self) -> f64 {
        if self.final_value != 0.0 {
            self.final_value
        } else {
            self.value
        }
    }

    /// Recompute `final_value` and `end_time` from the current financial and
    /// time fields. Idempotent: running it on an already-consistent
    /// appointment changes nothing.
    pub fn recompute_derived(&mut self) {
        self.final_value = self.value - self.discount;
        self.end_time = end_time_for(&self.start_time, self.duration_minutes);
    }

    /// Recompute `cost` from the material list. Run on every material
    /// add/edit/remove; an appointment with no materials keeps the cost it
    /// was seeded with.
    pub fn recompute_material_cost(&mut self) {
        self.cost = self.materials_cost();
    }

    /// One-shot seeding of defaults from a procedure template.
    ///
    /// Applied only while no procedure steps have been recorded, so selecting
    /// a template never discards in-progress work. Edits to the template do
    /// not retroactively change appointments seeded from it.
    pub fn seed_from_procedure(&mut self, procedure: &Procedure) {
        if !self.procedure_steps.is_empty() {
            return;
        }
        self.procedure_name = procedure.name.clone();
        self.category = procedure.category.clone();
        self.value = procedure.default_price;
        self.cost = procedure.default_cost;
        self.duration_minutes = procedure.default_duration_minutes;
        self.post_care = procedure.post_care.clone();
    }
}

/// Parse an "HH:MM" wall-clock string into minutes since midnight.
/// Unparsable input coerces to 0, matching the defensive arithmetic used
/// throughout the financial fields.
pub fn parse_hhmm(value: &str) -> i64 {
    let mut parts = value.splitn(2, ':');
    let hours: i64 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let minutes: i64 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    hours * 60 + minutes
}

/// Format minutes since midnight as "HH:MM", wrapping on a 24h clock.
pub fn format_hhmm(minutes: i64) -> String {
    let wrapped = minutes.rem_euclid(24 * 60);
    format!("{:02}:{:02}", wrapped / 60, wrapped % 60)
}

/// Wall-clock end time for a start time and duration. Crossing midnight
/// wraps; no day rollover is tracked.
pub fn end_time_for(start_time: &str, duration_minutes: i64) -> String {
    format_hhmm(parse_hhmm(start_time) + duration_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_procedure() -> Procedure {
        Procedure {
            id: "proc-1".to_string(),
            name: "Limpeza de pele".to_string(),
            category: "Facial".to_string(),
            default_price: 180.0,
            default_cost: 40.0,
            default_duration_minutes: 60,
            post_care: "Evitar sol por 24h".to_string(),
            is_active: true,
        }
    }

    #[test]
    fn test_final_value_tracks_value_minus_discount() {
        let mut appointment = Appointment::new(NaiveDate::from_ymd_opt(2026, 5, 4).unwrap());
        appointment.value = 200.0;
        appointment.discount = 35.0;
        appointment.recompute_derived();
        assert_eq!(appointment.final_value, 165.0);

        appointment.discount = 0.0;
        appointment.recompute_derived();
        assert_eq!(appointment.final_value, 200.0);
    }

    #[test]
    fn test_end_time_is_start_plus_duration() {
        assert_eq!(end_time_for("09:00", 60), "10:00");
        assert_eq!(end_time_for("09:15", 45), "10:00");
        assert_eq!(end_time_for("17:30", 30), "18:00");
    }

    #[test]
    fn test_end_time_wraps_past_midnight() {
        // Cross-midnight appointments are not rejected; the end time wraps
        // on the 24h clock with no day rollover.
        assert_eq!(end_time_for("23:30", 60), "00:30");
        assert_eq!(end_time_for("23:00", 1440), "23:00");
    }

    #[test]
    fn test_unparsable_start_time_coerces_to_midnight() {
        assert_eq!(parse_hhmm("not a time"), 0);
        assert_eq!(end_time_for("garbage", 90), "01:30");
    }

    #[test]
    fn test_material_cost_is_sum_of_cost_fields() {
        let mut appointment = Appointment::new(NaiveDate::from_ymd_opt(2026, 5, 4).unwrap());
        appointment.materials = vec![
            MaterialUsed { name: "Agulha".to_string(), quantity: 2.0, cost: 12.5 },
            MaterialUsed { name: "Pigmento".to_string(), quantity: 1.0, cost: 30.0 },
        ];
        appointment.recompute_material_cost();
        assert_eq!(appointment.cost, 42.5);

        appointment.materials.clear();
        appointment.recompute_material_cost();
        assert_eq!(appointment.cost, 0.0);
    }

    #[test]
    fn test_recompute_is_idempotent_on_consistent_appointment() {
        let mut appointment = Appointment::new(NaiveDate::from_ymd_opt(2026, 5, 4).unwrap());
        appointment.start_time = "10:00".to_string();
        appointment.duration_minutes = 90;
        appointment.value = 150.0;
        appointment.discount = 10.0;
        appointment.recompute_derived();

        let before = appointment.clone();
        appointment.recompute_derived();
        assert_eq!(appointment, before);
    }

    #[test]
    fn test_seed_from_procedure_fills_defaults() {
        let mut appointment = Appointment::new(NaiveDate::from_ymd_opt(2026, 5, 4).unwrap());
        appointment.seed_from_procedure(&sample_procedure());
        assert_eq!(appointment.procedure_name, "Limpeza de pele");
        assert_eq!(appointment.category, "Facial");
        assert_eq!(appointment.value, 180.0);
        assert_eq!(appointment.cost, 40.0);
        assert_eq!(appointment.duration_minutes, 60);
        assert_eq!(appointment.post_care, "Evitar sol por 24h");
    }

    #[test]
    fn test_seed_preserves_in_progress_steps() {
        let mut appointment = Appointment::new(NaiveDate::from_ymd_opt(2026, 5, 4).unwrap());
        appointment.procedure_steps.push("Assepsia".to_string());
        appointment.value = 99.0;
        appointment.seed_from_procedure(&sample_procedure());
        // Steps already recorded: the template must not overwrite anything.
        assert_eq!(appointment.value, 99.0);
        assert_eq!(appointment.procedure_name, "");
    }

    #[test]
    fn test_billed_amount_falls_back_to_value() {
        let mut appointment = Appointment::new(NaiveDate::from_ymd_opt(2026, 5, 4).unwrap());
        appointment.value = 120.0;
        assert_eq!(appointment.billed_amount(), 120.0);
        appointment.discount = 20.0;
        appointment.recompute_derived();
        assert_eq!(appointment.billed_amount(), 100.0);
    }

    #[test]
    fn test_fully_discounted_appointment_bills_raw_value() {
        let mut appointment = Appointment::new(NaiveDate::from_ymd_opt(2026, 5, 4).unwrap());
        appointment.value = 100.0;
        appointment.discount = 100.0;
        appointment.recompute_derived();
        assert_eq!(appointment.final_value, 0.0);
        // A zero final value is indistinguishable from an underived record,
        // so the raw value is what gets billed.
        assert_eq!(appointment.billed_amount(), 100.0);
    }
}
