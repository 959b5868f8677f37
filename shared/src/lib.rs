use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single entry of the unified financial ledger.
///
/// Transactions are derived on demand from appointments and expenses; they are
/// never persisted. Each paid/pending appointment contributes one `Receita`
/// entry and each expense contributes one `Despesa` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Calendar day of the underlying appointment or expense
    pub date: NaiveDate,
    /// Procedure name for revenue entries, expense description for outflows
    pub description: String,
    pub kind: TransactionKind,
    /// Positive for revenue, negative for expenses (sign convention:
    /// negative = outflow)
    pub amount: f64,
    /// Material cost of the underlying appointment; 0 for expenses
    pub cost: f64,
    /// amount - cost for revenue entries; equals amount for expenses
    pub profit: f64,
    pub payment_state: PaymentState,
}

/// Whether a ledger entry is money coming in or going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Receita,
    Despesa,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Receita => write!(f, "Receita"),
            TransactionKind::Despesa => write!(f, "Despesa"),
        }
    }
}

/// Payment status of an appointment, carried onto its ledger entry.
///
/// Expenses have no payment-pending concept; their entries use `NaoAplicavel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentState {
    Pago,
    Pendente,
    Atrasado,
    NaoAplicavel,
}

impl fmt::Display for PaymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentState::Pago => write!(f, "Pago"),
            PaymentState::Pendente => write!(f, "Pendente"),
            PaymentState::Atrasado => write!(f, "Atrasado"),
            PaymentState::NaoAplicavel => write!(f, "N/A"),
        }
    }
}

/// Summary statistics shown on the dashboard home view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_clients: usize,
    /// Sum of billed amounts over all appointments marked Pago
    pub total_revenue: f64,
    /// Appointments whose calendar day is the reference day
    pub appointments_today: usize,
    /// Share of clients with more than one appointment, as a percentage
    pub recurrence_rate: f64,
    /// Paid revenue per month label, ordered by first occurrence
    pub monthly_revenue: Vec<MonthlyRevenue>,
}

/// One month's worth of paid revenue, labeled with the month abbreviation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub month: String,
    pub total: f64,
}

/// Period-scoped financial KPIs over the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// Sum of revenue entries marked Pago
    pub total_revenue: f64,
    /// Sum of absolute expense amounts
    pub total_expenses: f64,
    /// total_revenue - total_expenses
    pub net_profit: f64,
    /// total_revenue divided by the number of revenue entries, 0 when none
    pub average_ticket: f64,
    /// Sum of revenue entries still Pendente or Atrasado
    pub pending_amount: f64,
    /// Paid revenue per procedure label, sorted descending by value
    pub revenue_by_procedure: Vec<ProcedureRevenue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureRevenue {
    pub label: String,
    pub total: f64,
}

/// One bucket of the cash-flow chart.
///
/// Buckets are labeled by day-of-month for the monthly view and by month
/// abbreviation for longer periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowPoint {
    pub label: String,
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
}
