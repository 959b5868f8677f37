//! Domain-level command types.
//!
//! These structs are the inputs the services accept for create operations.
//! Updates take the whole edited record instead: every mutation is a
//! whole-object replace keyed by id.

pub mod clients {
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    /// Input for registering a new client.
    #[derive(Debug, Clone, Default)]
    pub struct CreateClientCommand {
        pub name: String,
        pub phone: String,
        pub email: String,
        pub birth_date: Option<NaiveDate>,
        pub notes: String,
        pub anamnesis: BTreeMap<String, String>,
    }
}

pub mod appointments {
    use chrono::NaiveDate;

    use crate::domain::models::appointment::{AppointmentStatus, MaterialUsed};

    /// Input for booking a new appointment for a client.
    ///
    /// When `procedure_name` names a catalog entry, the new appointment is
    /// seeded from that template before the explicit overrides are applied.
    #[derive(Debug, Clone)]
    pub struct CreateAppointmentCommand {
        pub client_id: String,
        pub date: NaiveDate,
        /// Wall-clock "HH:MM" start
        pub start_time: String,
        /// Overrides the template default when set
        pub duration_minutes: Option<i64>,
        pub procedure_name: Option<String>,
        /// Overrides the template price when set
        pub value: Option<f64>,
        pub discount: f64,
        pub status: AppointmentStatus,
        pub materials: Vec<MaterialUsed>,
    }
}

pub mod procedures {
    /// Input for adding a procedure template to the catalog.
    #[derive(Debug, Clone, Default)]
    pub struct CreateProcedureCommand {
        pub name: String,
        pub category: String,
        pub default_price: f64,
        pub default_cost: f64,
        pub default_duration_minutes: i64,
        pub post_care: String,
    }
}

pub mod expenses {
    use chrono::NaiveDate;

    use crate::domain::models::expense::ExpenseCategory;

    /// Input for recording a standalone expense.
    #[derive(Debug, Clone)]
    pub struct CreateExpenseCommand {
        pub date: NaiveDate,
        pub description: String,
        pub category: ExpenseCategory,
        pub amount: f64,
    }
}
