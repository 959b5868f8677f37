//! Domain model for a standalone expense ledger entry.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Material,
    Aluguel,
    Marketing,
    Equipamento,
    Outros,
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseCategory::Material => write!(f, "Material"),
            ExpenseCategory::Aluguel => write!(f, "Aluguel"),
            ExpenseCategory::Marketing => write!(f, "Marketing"),
            ExpenseCategory::Equipamento => write!(f, "Equipamento"),
            ExpenseCategory::Outros => write!(f, "Outros"),
        }
    }
}

/// An operating expense. Expenses have no relation to clients or
/// appointments; they only meet appointment revenue in the derived ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    pub category: ExpenseCategory,
    /// Always stored positive; the ledger applies the outflow sign
    pub amount: f64,
}

impl Expense {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        category: ExpenseCategory,
        amount: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            description: description.into(),
            category,
            amount,
        }
    }
}
