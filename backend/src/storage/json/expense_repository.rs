use anyhow::Result;

use super::connection::JsonConnection;
use crate::domain::models::expense::Expense;
use crate::storage::traits::ExpenseStorage;

const COLLECTION: &str = "expenses";

/// JSON-file expense ledger repository.
#[derive(Clone)]
pub struct ExpenseRepository {
    connection: JsonConnection,
}

impl ExpenseRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl ExpenseStorage for ExpenseRepository {
    fn load_expenses(&self, user_id: &str) -> Result<Vec<Expense>> {
        self.connection.read_collection(user_id, COLLECTION)
    }

    fn save_expenses(&self, user_id: &str, expenses: &[Expense]) -> Result<()> {
        self.connection.write_collection(user_id, COLLECTION, expenses)
    }

    fn store_expense(&self, user_id: &str, expense: &Expense) -> Result<()> {
        let mut expenses = self.load_expenses(user_id)?;
        expenses.push(expense.clone());
        self.save_expenses(user_id, &expenses)
    }

    fn update_expense(&self, user_id: &str, expense: &Expense) -> Result<bool> {
        let mut expenses = self.load_expenses(user_id)?;
        match expenses.iter_mut().find(|e| e.id == expense.id) {
            Some(existing) => {
                *existing = expense.clone();
                self.save_expenses(user_id, &expenses)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<bool> {
        let mut expenses = self.load_expenses(user_id)?;
        let before = expenses.len();
        expenses.retain(|e| e.id != expense_id);
        if expenses.len() == before {
            return Ok(false);
        }
        self.save_expenses(user_id, &expenses)?;
        Ok(true)
    }
}
