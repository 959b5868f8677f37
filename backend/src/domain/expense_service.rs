//! Expense ledger service.
use anyhow::{anyhow, Result};
use log::info;
use std::sync::Arc;

use crate::domain::commands::expenses::CreateExpenseCommand;
use crate::domain::models::expense::Expense;
use crate::domain::session::Session;
use crate::storage::traits::{Connection, ExpenseStorage};

#[derive(Clone)]
pub struct ExpenseService<C: Connection> {
    expense_repository: C::ExpenseRepository,
    session: Session,
}

impl<C: Connection> ExpenseService<C> {
    pub fn new(connection: Arc<C>, session: Session) -> Self {
        Self {
            expense_repository: connection.create_expense_repository(),
            session,
        }
    }

    pub fn create_expense(&self, command: CreateExpenseCommand) -> Result<Expense> {
        if command.amount < 0.0 {
            return Err(anyhow!("Expense amount must not be negative"));
        }

        let expense = Expense::new(command.date, command.description, command.category, command.amount);
        self.expense_repository.store_expense(&self.session.user_id, &expense)?;
        info!("Recorded expense {} of {:.2}", expense.id, expense.amount);
        Ok(expense)
    }

    pub fn list_expenses(&self) -> Result<Vec<Expense>> {
        self.expense_repository.load_expenses(&self.session.user_id)
    }

    pub fn update_expense(&self, expense: Expense) -> Result<Expense> {
        let updated = self.expense_repository.update_expense(&self.session.user_id, &expense)?;
        if !updated {
            return Err(anyhow!("No expense with id {}", expense.id));
        }
        Ok(expense)
    }

    pub fn delete_expense(&self, expense_id: &str) -> Result<bool> {
        self.expense_repository.delete_expense(&self.session.user_id, expense_id)
    }
}
