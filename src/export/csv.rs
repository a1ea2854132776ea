//! CSV Export functionality
//!
//! Exports expenses, recurring payments and income to spreadsheet-friendly
//! CSV. Amounts are written as plain decimals without a currency symbol.

use std::io::Write;

use serde::Serialize;

use crate::error::MonthbookResult;
use crate::models::{Money, UserId};
use crate::storage::Storage;

#[derive(Serialize)]
struct ExpenseCsvRow<'a> {
    id: String,
    year: i32,
    month: &'a str,
    amount: String,
    note: &'a str,
}

#[derive(Serialize)]
struct RecurringCsvRow<'a> {
    id: String,
    start_year: i32,
    start_month: &'a str,
    end_year: i32,
    end_month: &'a str,
    months: usize,
    amount: String,
    note: &'a str,
}

#[derive(Serialize)]
struct IncomeCsvRow<'a> {
    year: i32,
    month: &'a str,
    amount: String,
    notes: &'a str,
}

fn decimal(amount: Money) -> String {
    format!("{:.2}", amount.to_decimal())
}

/// Export a user's one-off expenses to CSV
pub fn export_expenses_csv<W: Write>(
    storage: &Storage,
    user: &UserId,
    writer: W,
) -> MonthbookResult<usize> {
    let ledger = storage.ledgers.snapshot(user)?;
    let mut csv = csv::Writer::from_writer(writer);

    for expense in &ledger.expenses {
        csv.serialize(ExpenseCsvRow {
            id: expense.id.as_uuid().to_string(),
            year: expense.year,
            month: expense.month.name(),
            amount: decimal(expense.amount),
            note: &expense.note,
        })?;
    }

    csv.flush()?;
    Ok(ledger.expenses.len())
}

/// Export a user's recurring payments to CSV
pub fn export_recurring_csv<W: Write>(
    storage: &Storage,
    user: &UserId,
    writer: W,
) -> MonthbookResult<usize> {
    let ledger = storage.ledgers.snapshot(user)?;
    let mut csv = csv::Writer::from_writer(writer);

    for payment in &ledger.recurring {
        csv.serialize(RecurringCsvRow {
            id: payment.id.as_uuid().to_string(),
            start_year: payment.start.year,
            start_month: payment.start.month.name(),
            end_year: payment.end.year,
            end_month: payment.end.month.name(),
            months: payment.month_count(),
            amount: decimal(payment.amount),
            note: &payment.note,
        })?;
    }

    csv.flush()?;
    Ok(ledger.recurring.len())
}

/// Export a user's income records to CSV
pub fn export_income_csv<W: Write>(
    storage: &Storage,
    user: &UserId,
    writer: W,
) -> MonthbookResult<usize> {
    let ledger = storage.ledgers.snapshot(user)?;
    let mut csv = csv::Writer::from_writer(writer);

    for (key, record) in &ledger.income {
        let period = key.period();
        csv.serialize(IncomeCsvRow {
            year: period.year,
            month: period.month.name(),
            amount: decimal(record.amount),
            notes: &record.notes,
        })?;
    }

    csv.flush()?;
    Ok(ledger.income.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::MonthbookPaths;
    use crate::models::{Month, YearMonth};
    use crate::services::{ExpenseService, IncomeService, RecurringService};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = MonthbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_expenses_csv() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserId::new("alice").unwrap();
        ExpenseService::new(&storage, &user)
            .add(
                YearMonth::new(2025, Month::March),
                Money::from_cents(1999),
                "Buch, gebraucht",
            )
            .unwrap();

        let mut output = Vec::new();
        let count = export_expenses_csv(&storage, &user, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert_eq!(count, 1);
        assert!(text.starts_with("id,year,month,amount,note\n"));
        assert!(text.contains(",2025,März,19.99,\"Buch, gebraucht\""));
    }

    #[test]
    fn test_recurring_csv() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserId::new("alice").unwrap();
        RecurringService::new(&storage, &user)
            .add(
                Money::from_cents(2000),
                "Miete",
                YearMonth::new(2025, Month::January),
                YearMonth::new(2025, Month::June),
            )
            .unwrap();

        let mut output = Vec::new();
        export_recurring_csv(&storage, &user, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.starts_with(
            "id,start_year,start_month,end_year,end_month,months,amount,note\n"
        ));
        assert!(text.contains(",2025,Januar,2025,Juni,6,20.00,Miete"));
    }

    #[test]
    fn test_income_csv() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserId::new("alice").unwrap();
        IncomeService::new(&storage, &user)
            .set(YearMonth::new(2025, Month::May), Money::from_cents(250000), None)
            .unwrap();

        let mut output = Vec::new();
        export_income_csv(&storage, &user, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert_eq!(text, "year,month,amount,notes\n2025,Mai,2500.00,\n");
    }

    #[test]
    fn test_empty_export_writes_nothing() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserId::new("alice").unwrap();

        let mut output = Vec::new();
        assert_eq!(export_expenses_csv(&storage, &user, &mut output).unwrap(), 0);
        assert!(output.is_empty());
    }
}
