//! Report formatting utilities for terminal output
//!
//! The month summary and the year chart, plus the bar/separator helpers
//! they are drawn with.

use crate::reports::{ExpenseSeries, MonthListing, MonthlyBalance};

use super::DisplayOptions;

const SUMMARY_WIDTH: usize = 48;
const LABEL_WIDTH: usize = 20;

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 3 {
        ".".repeat(max_chars)
    } else {
        let head: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    }
}

fn summary_line(label: &str, value: &str) -> String {
    format!(
        "{:<label_width$}{:>value_width$}\n",
        label,
        value,
        label_width = LABEL_WIDTH,
        value_width = SUMMARY_WIDTH - LABEL_WIDTH
    )
}

/// Format the balance of a month with the records it is made of
pub fn format_month_summary(
    balance: &MonthlyBalance,
    listing: &MonthListing,
    options: &DisplayOptions,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Balance for {}\n", options.period(balance.period)));
    output.push_str(&separator(SUMMARY_WIDTH));
    output.push('\n');

    output.push_str(&summary_line("Income", &options.money(balance.income)));
    output.push_str(&summary_line("One-off expenses", &options.money(balance.one_time_total)));
    output.push_str(&summary_line(
        "Recurring payments",
        &options.money(balance.recurring_total),
    ));
    output.push_str(&summary_line("Total expenses", &options.money(balance.total_expenses)));
    output.push_str(&separator(SUMMARY_WIDTH));
    output.push('\n');
    output.push_str(&summary_line("Balance", &options.money(balance.balance)));

    let ratio = balance.balance_ratio();
    output.push_str(&format!(
        "{} {:.0}% of income left\n",
        format_bar(ratio, 100.0, SUMMARY_WIDTH - 20),
        ratio
    ));
    if balance.is_overspent() {
        output.push_str("Expenses exceed income this month.\n");
    }

    if !listing.expenses.is_empty() {
        output.push_str("\nOne-off expenses\n");
        for expense in &listing.expenses {
            output.push_str(&format!(
                "  {:>12}  {}  ({})\n",
                options.money(expense.amount),
                truncate(&expense.note, 28),
                expense.id
            ));
        }
    }

    if !listing.recurring.is_empty() {
        output.push_str("\nRecurring payments\n");
        for payment in &listing.recurring {
            output.push_str(&format!(
                "  {:>12}  {}  [{} - {}]  ({})\n",
                options.money(payment.amount),
                truncate(&payment.note, 28),
                options.period(payment.start),
                options.period(payment.end),
                payment.id
            ));
        }
    }

    output
}

/// Format the twelve monthly expense totals of a year as a bar chart
pub fn format_year_chart(series: &ExpenseSeries, options: &DisplayOptions) -> String {
    let mut output = String::new();
    let max = series.max().cents() as f64;

    output.push_str(&format!("Expenses {}\n", series.year));
    output.push_str(&separator(options.chart_width + 28));
    output.push('\n');

    for (period, total) in series.iter() {
        output.push_str(&format!(
            "{:<10} {} {:>14}\n",
            options.month(period.month),
            format_bar(total.cents() as f64, max, options.chart_width),
            options.money(total)
        ));
    }

    output.push_str(&separator(options.chart_width + 28));
    output.push('\n');
    output.push_str(&format!(
        "{:<10} {} {:>14}\n",
        "Total",
        " ".repeat(options.chart_width),
        options.money(series.total())
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ExpenseRecord, IncomeKey, IncomeRecord, Ledger, Money, Month, RecurringRecord, YearMonth,
    };

    fn sample_ledger() -> Ledger {
        let march = YearMonth::new(2025, Month::March);
        let mut ledger = Ledger::new();
        ledger
            .expenses
            .push(ExpenseRecord::new(Money::from_cents(5000), "Kino", march));
        ledger.recurring.push(RecurringRecord::new(
            Money::from_cents(2000),
            "Handyvertrag",
            YearMonth::new(2025, Month::January),
            YearMonth::new(2025, Month::December),
        ));
        ledger
            .income
            .insert(IncomeKey::from(march), IncomeRecord::new(Money::from_cents(100000)));
        ledger
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(bar.chars().count(), 10);
        assert_eq!(format_bar(0.0, 100.0, 4), "░░░░");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Größenänderung", 6), "Grö...");
    }

    #[test]
    fn test_month_summary() {
        let ledger = sample_ledger();
        let march = YearMonth::new(2025, Month::March);
        let balance = MonthlyBalance::compute(&ledger, march);
        let listing = MonthListing::for_month(&ledger, march);

        let output = format_month_summary(&balance, &listing, &DisplayOptions::default());

        assert!(output.starts_with("Balance for März 2025"));
        assert!(output.contains("€70.00"));
        assert!(output.contains("€930.00"));
        assert!(output.contains("93% of income left"));
        assert!(output.contains("Kino"));
        assert!(output.contains("Handyvertrag"));
        assert!(!output.contains("exceed"));
    }

    #[test]
    fn test_overspent_summary() {
        let ledger = sample_ledger();
        let april = YearMonth::new(2025, Month::April);
        let balance = MonthlyBalance::compute(&ledger, april);
        let listing = MonthListing::for_month(&ledger, april);

        let output = format_month_summary(&balance, &listing, &DisplayOptions::default());

        assert!(output.contains("-€20.00"));
        assert!(output.contains("Expenses exceed income"));
    }

    #[test]
    fn test_year_chart() {
        let ledger = sample_ledger();
        let series = ExpenseSeries::compute(&ledger, 2025);

        let output = format_year_chart(&series, &DisplayOptions::default());

        assert!(output.starts_with("Expenses 2025"));
        assert!(output.contains("Januar"));
        assert!(output.contains("Dezember"));
        assert!(output.contains("€290.00"));
    }
}
