//! Financial aggregation: the unified ledger and its period-scoped KPIs.
//!
//! The ledger is derived on demand, never persisted: each appointment
//! contributes one Receita entry and each expense one Despesa entry. Period
//! filters compare calendar date components only, so a record's local
//! display time can never move it across a day boundary.
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

use shared::{CashFlowPoint, FinancialSummary, PaymentState, ProcedureRevenue, Transaction, TransactionKind};

use crate::domain::dashboard_service::MONTH_ABBREV;
use crate::domain::session::Session;
use crate::storage::traits::{ClientStorage, Connection, ExpenseStorage};

/// Reporting window, anchored at a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// The reference day's calendar month
    Month,
    /// The calendar quarter containing the reference day (Jan-Mar, Apr-Jun, ...)
    Quarter,
    /// The reference day's calendar year
    Year,
    /// No filter
    All,
}

impl Period {
    /// Whether a record dated `date` falls inside this period relative to
    /// `reference`. Quarters match on (quarter index, year).
    pub fn matches(&self, date: NaiveDate, reference: NaiveDate) -> bool {
        match self {
            Period::Month => date.month() == reference.month() && date.year() == reference.year(),
            Period::Quarter => {
                date.month0() / 3 == reference.month0() / 3 && date.year() == reference.year()
            }
            Period::Year => date.year() == reference.year(),
            Period::All => true,
        }
    }
}

#[derive(Clone)]
pub struct FinanceService<C: Connection> {
    client_repository: C::ClientRepository,
    expense_repository: C::ExpenseRepository,
    session: Session,
}

impl<C: Connection> FinanceService<C> {
    pub fn new(connection: Arc<C>, session: Session) -> Self {
        Self {
            client_repository: connection.create_client_repository(),
            expense_repository: connection.create_expense_repository(),
            session,
        }
    }

    /// Build the full unified ledger: one Receita per appointment, one
    /// Despesa per expense (amount negated, negative means outflow).
    pub fn build_ledger(&self) -> Result<Vec<Transaction>> {
        let clients = self.client_repository.load_clients(&self.session.user_id)?;
        let expenses = self.expense_repository.load_expenses(&self.session.user_id)?;

        let mut ledger = Vec::new();

        for client in &clients {
            for appointment in &client.appointments {
                let amount = appointment.billed_amount();
                let description = if appointment.procedure_name.is_empty() {
                    "Atendimento".to_string()
                } else {
                    appointment.procedure_name.clone()
                };
                ledger.push(Transaction {
                    id: appointment.id.clone(),
                    date: appointment.date,
                    description,
                    kind: TransactionKind::Receita,
                    amount,
                    cost: appointment.cost,
                    profit: amount - appointment.cost,
                    payment_state: appointment.status.to_payment_state(),
                });
            }
        }

        for expense in &expenses {
            ledger.push(Transaction {
                id: expense.id.clone(),
                date: expense.date,
                description: expense.description.clone(),
                kind: TransactionKind::Despesa,
                amount: -expense.amount,
                cost: 0.0,
                profit: -expense.amount,
                payment_state: PaymentState::NaoAplicavel,
            });
        }

        Ok(ledger)
    }

    /// The ledger restricted to one reporting period.
    pub fn ledger(&self, period: Period, reference: NaiveDate) -> Result<Vec<Transaction>> {
        let ledger = self.build_ledger()?;
        Ok(ledger
            .into_iter()
            .filter(|tx| period.matches(tx.date, reference))
            .collect())
    }

    /// KPIs over the period's ledger.
    pub fn summary(&self, period: Period, reference: NaiveDate) -> Result<FinancialSummary> {
        let transactions = self.ledger(period, reference)?;

        let mut total_revenue = 0.0;
        let mut total_expenses = 0.0;
        let mut pending_amount = 0.0;
        let mut revenue_count = 0usize;
        let mut revenue_by_procedure: Vec<ProcedureRevenue> = Vec::new();

        for tx in &transactions {
            match tx.kind {
                TransactionKind::Receita => {
                    revenue_count += 1;
                    match tx.payment_state {
                        PaymentState::Pago => {
                            total_revenue += tx.amount;
                            match revenue_by_procedure.iter().position(|r| r.label == tx.description) {
                                Some(idx) => revenue_by_procedure[idx].total += tx.amount,
                                None => revenue_by_procedure.push(ProcedureRevenue {
                                    label: tx.description.clone(),
                                    total: tx.amount,
                                }),
                            }
                        }
                        PaymentState::Pendente | PaymentState::Atrasado => {
                            pending_amount += tx.amount;
                        }
                        PaymentState::NaoAplicavel => {}
                    }
                }
                TransactionKind::Despesa => {
                    total_expenses += tx.amount.abs();
                }
            }
        }

        revenue_by_procedure
            .sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(std::cmp::Ordering::Equal));

        let average_ticket = if revenue_count == 0 {
            0.0
        } else {
            total_revenue / revenue_count as f64
        };

        Ok(FinancialSummary {
            total_revenue,
            total_expenses,
            net_profit: total_revenue - total_expenses,
            average_ticket,
            pending_amount,
            revenue_by_procedure,
        })
    }

    /// Cash-flow chart buckets for the period.
    ///
    /// Labels are day-of-month for Month, month abbreviation for
    /// Quarter/Year, and "month year" for All. Month-labeled buckets are
    /// ordered by the fixed month table, so an All view spanning several
    /// years interleaves them; known limitation of the chart.
    pub fn cash_flow(&self, period: Period, reference: NaiveDate) -> Result<Vec<CashFlowPoint>> {
        let transactions = self.ledger(period, reference)?;

        let mut points: Vec<CashFlowPoint> = Vec::new();
        for tx in &transactions {
            let label = bucket_label(period, tx.date);
            let idx = match points.iter().position(|p| p.label == label) {
                Some(idx) => idx,
                None => {
                    points.push(CashFlowPoint { label, revenue: 0.0, expenses: 0.0, profit: 0.0 });
                    points.len() - 1
                }
            };
            let point = &mut points[idx];
            match tx.kind {
                TransactionKind::Receita => {
                    if tx.payment_state == PaymentState::Pago {
                        point.revenue += tx.amount;
                    }
                }
                TransactionKind::Despesa => point.expenses += tx.amount.abs(),
            }
        }

        for point in &mut points {
            point.profit = point.revenue - point.expenses;
        }

        match period {
            Period::Month => points.sort_by_key(|p| p.label.parse::<u32>().unwrap_or(0)),
            Period::Quarter | Period::Year | Period::All => {
                points.sort_by_key(|p| month_table_index(&p.label));
            }
        }

        Ok(points)
    }
}

fn bucket_label(period: Period, date: NaiveDate) -> String {
    match period {
        Period::Month => date.day().to_string(),
        Period::Quarter | Period::Year => MONTH_ABBREV[date.month0() as usize].to_string(),
        Period::All => format!("{} {}", MONTH_ABBREV[date.month0() as usize], date.year()),
    }
}

fn month_table_index(label: &str) -> usize {
    let month = label.split(' ').next().unwrap_or(label);
    MONTH_ABBREV.iter().position(|&m| m == month).unwrap_or(MONTH_ABBREV.len())
}
