//! Reports module for Monthbook
//!
//! Pure calculations over one user's ledger: the monthly balance, the
//! records listed for a month, and the twelve-month expense series.

pub mod expense_series;
pub mod monthly_balance;
pub mod source;

pub use expense_series::ExpenseSeries;
pub use monthly_balance::{sort_by_amount, MonthListing, MonthlyBalance};
pub use source::RecordSource;
