//! Record tables

use std::ops::Range;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{ExpenseRecord, IncomeRecord, RecurringRecord, YearMonth};

use super::report::truncate;
use super::DisplayOptions;

const NOTE_WIDTH: usize = 32;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Note")]
    note: String,
}

#[derive(Tabled)]
struct RecurringRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "From")]
    start: String,
    #[tabled(rename = "Until")]
    end: String,
    #[tabled(rename = "Months")]
    months: usize,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Note")]
    note: String,
}

#[derive(Tabled)]
struct IncomeRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

fn render<T: Tabled>(rows: Vec<T>, amount_columns: Range<usize>) -> String {
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(amount_columns), Alignment::right());
    format!("{}\n", table)
}

/// Format one-off expenses as a table
pub fn format_expense_table(expenses: &[ExpenseRecord], options: &DisplayOptions) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses
        .iter()
        .map(|e| ExpenseRow {
            id: e.id.to_string(),
            month: options.period(e.period()),
            amount: options.money(e.amount),
            note: truncate(&e.note, NOTE_WIDTH),
        })
        .collect();
    render::<ExpenseRow>(rows, 2..3)
}

/// Format recurring payments as a table
pub fn format_recurring_table(payments: &[RecurringRecord], options: &DisplayOptions) -> String {
    if payments.is_empty() {
        return "No recurring payments found.\n".to_string();
    }

    let rows = payments
        .iter()
        .map(|p| RecurringRow {
            id: p.id.to_string(),
            start: options.period(p.start),
            end: options.period(p.end),
            months: p.month_count(),
            amount: options.money(p.amount),
            total: p
                .total_amount()
                .map_or_else(|| "-".to_string(), |total| options.money(total)),
            note: truncate(&p.note, NOTE_WIDTH),
        })
        .collect();
    render::<RecurringRow>(rows, 4..6)
}

/// Format income records as a table
pub fn format_income_table(income: &[(YearMonth, IncomeRecord)], options: &DisplayOptions) -> String {
    if income.is_empty() {
        return "No income recorded.\n".to_string();
    }

    let rows = income
        .iter()
        .map(|(period, record)| IncomeRow {
            month: options.period(*period),
            amount: options.money(record.amount),
            notes: truncate(&record.notes, NOTE_WIDTH),
        })
        .collect();
    render::<IncomeRow>(rows, 1..2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Month};

    #[test]
    fn test_empty_tables() {
        let options = DisplayOptions::default();
        assert_eq!(format_expense_table(&[], &options), "No expenses found.\n");
        assert_eq!(
            format_recurring_table(&[], &options),
            "No recurring payments found.\n"
        );
        assert_eq!(format_income_table(&[], &options), "No income recorded.\n");
    }

    #[test]
    fn test_expense_table_contents() {
        let options = DisplayOptions::default();
        let expense = ExpenseRecord::new(
            Money::from_cents(4250),
            "Wocheneinkauf",
            YearMonth::new(2025, Month::March),
        );

        let output = format_expense_table(&[expense.clone()], &options);

        assert!(output.contains(&expense.id.to_string()));
        assert!(output.contains("März 2025"));
        assert!(output.contains("€42.50"));
        assert!(output.contains("Wocheneinkauf"));
    }

    #[test]
    fn test_recurring_table_shows_range() {
        let options = DisplayOptions::default();
        let payment = RecurringRecord::new(
            Money::from_cents(999),
            "Streaming",
            YearMonth::new(2025, Month::January),
            YearMonth::new(2025, Month::June),
        );

        let output = format_recurring_table(&[payment], &options);

        assert!(output.contains("Januar 2025"));
        assert!(output.contains("Juni 2025"));
        assert!(output.contains("€9.99"));
        assert!(output.contains("€59.94"));
    }

    #[test]
    fn test_recurring_total_that_does_not_fit_is_dashed() {
        let options = DisplayOptions::default();
        let payment = RecurringRecord::new(
            Money::from_cents(i64::MAX / 2),
            "Overflow",
            YearMonth::new(2025, Month::January),
            YearMonth::new(2025, Month::March),
        );

        let output = format_recurring_table(&[payment], &options);

        assert!(output.contains(" - "));
        assert!(output.contains("Overflow"));
    }
}
