//! Legacy data import
//!
//! Reads the `data.json` document written by the earlier web version of the
//! tracker and merges it into the ledger store:
//!
//! ```json
//! { "<user>": {
//!     "expenses":       [{ "id": 1, "amount": 12.5, "note": "..", "year": "2025", "month": "März" }],
//!     "dauerauftraege": [{ "amount": 20, "note": "..", "startYear": "2025", "startMonth": "Januar",
//!                          "endYear": "2025", "endMonth": "Dezember" }],
//!     "income":         { "2025 - März": { "amount": 1000 } } } }
//! ```
//!
//! Amounts are decimal numbers and years are strings. Every record is
//! validated like user input; records that fail are reported and skipped.
//!
//! Imported expenses and recurring payments remember their legacy `id` (or,
//! when a record has none, its month range, amount and note). Records whose
//! legacy identity is already in the ledger are not added again, so
//! importing the same file twice leaves the ledger unchanged.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::audit::EntityType;
use crate::error::{MonthbookError, MonthbookResult};
use crate::models::{
    month::validate_year, ExpenseRecord, IncomeKey, IncomeRecord, Money, Month, RecurringRecord,
    UserId, YearMonth,
};
use crate::storage::Storage;

const EXPENSES: &str = "expenses";
const RECURRING: &str = "dauerauftraege";
const INCOME: &str = "income";

/// A legacy record that was not imported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Collection the record came from (`expenses`, `dauerauftraege`, `income`)
    pub collection: &'static str,
    /// Position in the list, or the income key
    pub position: String,
    pub reason: String,
}

/// Outcome for one user of the legacy document
#[derive(Debug, Clone)]
pub struct UserImport {
    pub user: UserId,
    pub expenses: usize,
    pub recurring: usize,
    pub income: usize,
    /// Expenses and recurring payments already present from an earlier import
    pub duplicates: usize,
    pub skipped: Vec<SkippedRecord>,
}

impl UserImport {
    /// Number of records written
    pub fn imported(&self) -> usize {
        self.expenses + self.recurring + self.income
    }
}

/// Result of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub users: Vec<UserImport>,
    /// Top-level entries that could not be used as a user namespace
    pub rejected_users: Vec<(String, String)>,
}

impl ImportReport {
    /// Records written across all users
    pub fn imported(&self) -> usize {
        self.users.iter().map(UserImport::imported).sum()
    }

    /// Records skipped across all users
    pub fn skipped(&self) -> usize {
        self.users.iter().map(|u| u.skipped.len()).sum()
    }

    /// Records left out because an earlier import already added them
    pub fn duplicates(&self) -> usize {
        self.users.iter().map(|u| u.duplicates).sum()
    }
}

/// Records parsed from one user's legacy entry
#[derive(Default)]
struct ParsedLedger {
    expenses: Vec<ExpenseRecord>,
    recurring: Vec<RecurringRecord>,
    income: Vec<(IncomeKey, IncomeRecord)>,
    skipped: Vec<SkippedRecord>,
}

/// Service for importing legacy data
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import a legacy document from a file
    pub fn import_file(&self, path: &Path, only: Option<&UserId>) -> MonthbookResult<ImportReport> {
        let file = std::fs::File::open(path).map_err(|e| {
            MonthbookError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;
        self.import_reader(file, only)
    }

    /// Import a legacy document from a reader
    pub fn import_reader<R: Read>(
        &self,
        reader: R,
        only: Option<&UserId>,
    ) -> MonthbookResult<ImportReport> {
        let document: Value = serde_json::from_reader(reader)
            .map_err(|e| MonthbookError::Import(format!("Invalid JSON: {}", e)))?;
        self.import_value(&document, only)
    }

    /// Import an already parsed legacy document
    ///
    /// With `only` set, other users in the document are ignored.
    pub fn import_value(
        &self,
        document: &Value,
        only: Option<&UserId>,
    ) -> MonthbookResult<ImportReport> {
        let users = document.as_object().ok_or_else(|| {
            MonthbookError::Import("Expected an object keyed by user id".into())
        })?;

        let mut report = ImportReport::default();

        for (raw_user, entry) in users {
            let user = match UserId::new(raw_user.as_str()) {
                Ok(user) => user,
                Err(e) => {
                    report.rejected_users.push((raw_user.clone(), e.to_string()));
                    continue;
                }
            };
            if only.is_some_and(|wanted| *wanted != user) {
                continue;
            }
            let Some(entry) = entry.as_object() else {
                report
                    .rejected_users
                    .push((raw_user.clone(), "entry is not an object".into()));
                continue;
            };

            report.users.push(self.import_user(user, entry)?);
        }

        info!(
            users = report.users.len(),
            imported = report.imported(),
            skipped = report.skipped(),
            "legacy import finished"
        );
        Ok(report)
    }

    fn import_user(&self, user: UserId, entry: &Map<String, Value>) -> MonthbookResult<UserImport> {
        let parsed = parse_user_entry(entry);
        for skipped in &parsed.skipped {
            warn!(
                user = %user,
                collection = skipped.collection,
                position = %skipped.position,
                reason = %skipped.reason,
                "skipping legacy record"
            );
        }

        let ParsedLedger {
            expenses,
            recurring,
            income,
            skipped,
        } = parsed;
        let parsed_count = expenses.len() + recurring.len();

        let (expenses, recurring, replaced) = self.storage.ledgers.update(&user, |ledger| {
            let mut seen: HashSet<String> = ledger
                .expenses
                .iter()
                .filter_map(|e| e.legacy_id.clone())
                .collect();
            let expenses: Vec<ExpenseRecord> = expenses
                .into_iter()
                .filter(|e| e.legacy_id.as_ref().map_or(true, |id| seen.insert(id.clone())))
                .collect();
            ledger.expenses.extend(expenses.iter().cloned());

            let mut seen: HashSet<String> = ledger
                .recurring
                .iter()
                .filter_map(|r| r.legacy_id.clone())
                .collect();
            let recurring: Vec<RecurringRecord> = recurring
                .into_iter()
                .filter(|r| r.legacy_id.as_ref().map_or(true, |id| seen.insert(id.clone())))
                .collect();
            ledger.recurring.extend(recurring.iter().cloned());

            let mut replaced = Vec::with_capacity(income.len());
            for (key, record) in &income {
                replaced.push(ledger.income.insert(*key, record.clone()));
            }
            Ok((expenses, recurring, replaced))
        })?;

        let duplicates = parsed_count - expenses.len() - recurring.len();
        if duplicates > 0 {
            info!(user = %user, duplicates, "legacy records already imported");
        }

        for expense in &expenses {
            self.storage.log_create(
                &user,
                EntityType::Expense,
                expense.id.to_string(),
                Some(expense.note.clone()),
                expense,
            )?;
        }
        for payment in &recurring {
            self.storage.log_create(
                &user,
                EntityType::Recurring,
                payment.id.to_string(),
                Some(payment.note.clone()),
                payment,
            )?;
        }
        for ((key, record), previous) in income.iter().zip(replaced) {
            let label = Some(format!("Income for {}", key.period()));
            match previous {
                Some(previous) => self.storage.log_update(
                    &user,
                    EntityType::Income,
                    key.to_string(),
                    label,
                    &previous,
                    record,
                    None,
                )?,
                None => self.storage.log_create(
                    &user,
                    EntityType::Income,
                    key.to_string(),
                    label,
                    record,
                )?,
            }
        }

        Ok(UserImport {
            user,
            expenses: expenses.len(),
            recurring: recurring.len(),
            income: income.len(),
            duplicates,
            skipped,
        })
    }
}

fn parse_user_entry(entry: &Map<String, Value>) -> ParsedLedger {
    let mut parsed = ParsedLedger::default();

    for (index, item) in list_items(entry, EXPENSES, &mut parsed.skipped) {
        match parse_expense(item) {
            Ok(expense) => parsed.expenses.push(expense),
            Err(reason) => parsed.skipped.push(SkippedRecord {
                collection: EXPENSES,
                position: format!("#{}", index + 1),
                reason,
            }),
        }
    }

    for (index, item) in list_items(entry, RECURRING, &mut parsed.skipped) {
        match parse_recurring(item) {
            Ok(payment) => parsed.recurring.push(payment),
            Err(reason) => parsed.skipped.push(SkippedRecord {
                collection: RECURRING,
                position: format!("#{}", index + 1),
                reason,
            }),
        }
    }

    // An untouched legacy ledger stores income as an empty list
    if let Some(Value::Object(income)) = entry.get(INCOME) {
        for (raw_key, item) in income {
            match parse_income(raw_key, item) {
                Ok(pair) => parsed.income.push(pair),
                Err(reason) => parsed.skipped.push(SkippedRecord {
                    collection: INCOME,
                    position: raw_key.clone(),
                    reason,
                }),
            }
        }
    }

    parsed
}

fn list_items<'v>(
    entry: &'v Map<String, Value>,
    collection: &'static str,
    skipped: &mut Vec<SkippedRecord>,
) -> impl Iterator<Item = (usize, &'v Value)> {
    let items: &[Value] = match entry.get(collection) {
        None | Some(Value::Null) => &[],
        Some(Value::Array(items)) => items.as_slice(),
        Some(_) => {
            skipped.push(SkippedRecord {
                collection,
                position: "*".into(),
                reason: "collection is not a list".into(),
            });
            &[]
        }
    };
    items.iter().enumerate()
}

fn parse_expense(item: &Value) -> Result<ExpenseRecord, String> {
    let period = YearMonth::new(year_field(item, "year")?, month_field(item, "month")?);
    let mut expense = ExpenseRecord::new(amount_field(item)?, note_field(item), period);
    expense.validate().map_err(|e| e.to_string())?;
    expense.legacy_id = Some(legacy_id(item).unwrap_or_else(|| {
        format!(
            "{}|{}|{}",
            period.to_iso(),
            expense.amount.cents(),
            expense.note
        )
    }));
    Ok(expense)
}

fn parse_recurring(item: &Value) -> Result<RecurringRecord, String> {
    let start = YearMonth::new(
        year_field(item, "startYear")?,
        month_field(item, "startMonth")?,
    );
    let end = YearMonth::new(year_field(item, "endYear")?, month_field(item, "endMonth")?);
    let mut payment = RecurringRecord::new(amount_field(item)?, note_field(item), start, end);
    payment.validate().map_err(|e| e.to_string())?;
    payment.legacy_id = Some(legacy_id(item).unwrap_or_else(|| {
        format!(
            "{}..{}|{}|{}",
            start.to_iso(),
            end.to_iso(),
            payment.amount.cents(),
            payment.note
        )
    }));
    Ok(payment)
}

fn parse_income(raw_key: &str, item: &Value) -> Result<(IncomeKey, IncomeRecord), String> {
    let key: IncomeKey = raw_key.parse().map_err(|e| format!("bad key: {}", e))?;
    validate_year(key.period().year).map_err(|e| e.to_string())?;
    let record = IncomeRecord::new(amount_field(item)?);
    record.validate().map_err(|e| e.to_string())?;
    Ok((key, record))
}

fn amount_field(item: &Value) -> Result<Money, String> {
    let value = match item.get("amount") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| "missing or non-numeric amount".to_string())?;

    Money::from_decimal(value).ok_or_else(|| format!("amount out of range: {}", value))
}

fn legacy_id(item: &Value) -> Option<String> {
    match item.get("id") {
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn note_field(item: &Value) -> String {
    item.get("note")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn year_field(item: &Value, field: &str) -> Result<i32, String> {
    let year = match item.get(field) {
        Some(Value::String(s)) => s.trim().parse::<i32>().ok(),
        Some(Value::Number(n)) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        _ => None,
    }
    .ok_or_else(|| format!("missing or invalid {}", field))?;

    validate_year(year).map_err(|e| e.to_string())
}

fn month_field(item: &Value, field: &str) -> Result<Month, String> {
    let raw = item
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("missing {}", field))?;
    Month::parse(raw).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::MonthbookPaths;
    use crate::reports::MonthlyBalance;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = MonthbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn legacy_document() -> Value {
        json!({
            "alice": {
                "expenses": [
                    { "id": 1, "amount": 50, "note": "x", "year": "2025", "month": "März" },
                    { "id": 2, "amount": 12.34, "note": "", "year": "2025", "month": "März" },
                    { "id": 3, "amount": 5, "note": "bad month", "year": "2025", "month": "Smarch" }
                ],
                "dauerauftraege": [
                    { "id": 4, "amount": 20, "note": "y",
                      "startYear": "2025", "startMonth": "Januar",
                      "endYear": "2025", "endMonth": "Dezember" },
                    { "id": 5, "amount": 20, "note": "reversed",
                      "startYear": "2025", "startMonth": "Mai",
                      "endYear": "2025", "endMonth": "Januar" }
                ],
                "income": { "2025 - März": { "amount": 1000 } }
            },
            "bob": { "expenses": [], "dauerauftraege": [], "income": [] }
        })
    }

    #[test]
    fn test_import_legacy_document() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let report = service.import_value(&legacy_document(), None).unwrap();

        assert_eq!(report.users.len(), 2);
        let alice = &report.users[0];
        assert_eq!(alice.user.as_str(), "alice");
        assert_eq!(alice.expenses, 1);
        assert_eq!(alice.recurring, 1);
        assert_eq!(alice.income, 1);
        assert_eq!(alice.skipped.len(), 3);
        assert_eq!(report.imported(), 3);

        let ledger = storage.ledgers.snapshot(&alice.user).unwrap();
        let march = YearMonth::new(2025, Month::March);
        let balance = MonthlyBalance::compute(&ledger, march);
        assert_eq!(balance.total_expenses, Money::from_cents(7000));
        assert_eq!(balance.balance, Money::from_cents(93000));

        assert_eq!(storage.audit().read_all().unwrap().len(), 3);
    }

    #[test]
    fn test_skipped_records_are_described() {
        let (_temp_dir, storage) = create_test_storage();
        let report = ImportService::new(&storage)
            .import_value(&legacy_document(), None)
            .unwrap();

        let skipped = &report.users[0].skipped;
        assert!(skipped
            .iter()
            .any(|s| s.collection == EXPENSES && s.position == "#2"));
        assert!(skipped
            .iter()
            .any(|s| s.collection == EXPENSES && s.reason.contains("Smarch")));
        assert!(skipped
            .iter()
            .any(|s| s.collection == RECURRING && s.position == "#2"));
    }

    #[test]
    fn test_import_single_user() {
        let (_temp_dir, storage) = create_test_storage();
        let bob = UserId::new("bob").unwrap();

        let report = ImportService::new(&storage)
            .import_value(&legacy_document(), Some(&bob))
            .unwrap();

        assert_eq!(report.users.len(), 1);
        assert_eq!(report.users[0].user, bob);
        assert_eq!(storage.ledgers.users().unwrap(), vec![bob]);
    }

    #[test]
    fn test_string_amounts_and_numeric_years() {
        let (_temp_dir, storage) = create_test_storage();
        let document = json!({
            "carol": {
                "expenses": [
                    { "amount": "19,99", "note": "book", "year": 2024, "month": "Dezember" }
                ]
            }
        });

        let report = ImportService::new(&storage)
            .import_value(&document, None)
            .unwrap();

        assert_eq!(report.users[0].expenses, 1);
        let ledger = storage
            .ledgers
            .snapshot(&UserId::new("carol").unwrap())
            .unwrap();
        assert_eq!(ledger.expenses[0].amount.cents(), 1999);
        assert_eq!(ledger.expenses[0].month, Month::December);
    }

    #[test]
    fn test_income_overwrite_is_logged_as_update() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);
        let document = json!({ "dave": {
            "expenses": [
                { "id": 7, "amount": 50, "note": "x", "year": "2025", "month": "März" }
            ],
            "income": { "2025 - März": { "amount": 1000 } }
        } });

        service.import_value(&document, None).unwrap();
        let second = service.import_value(&document, None).unwrap();

        assert_eq!(second.users[0].expenses, 0);
        assert_eq!(second.users[0].duplicates, 1);
        assert_eq!(second.duplicates(), 1);

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].operation, crate::audit::Operation::Update);
        assert_eq!(entries[2].entity_type, EntityType::Income);

        let dave = UserId::new("dave").unwrap();
        let ledger = storage.ledgers.snapshot(&dave).unwrap();
        assert_eq!(ledger.expenses.len(), 1);
        assert_eq!(ledger.expenses[0].legacy_id.as_deref(), Some("7"));

        let balance = MonthlyBalance::compute(&ledger, YearMonth::new(2025, Month::March));
        assert_eq!(balance.one_time_total, Money::from_cents(5000));
        assert_eq!(balance.balance, Money::from_cents(95000));
    }

    #[test]
    fn test_reimport_keeps_ledger_unchanged() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        service.import_value(&legacy_document(), None).unwrap();
        let alice = UserId::new("alice").unwrap();
        let before = storage.ledgers.snapshot(&alice).unwrap();

        let report = service.import_value(&legacy_document(), None).unwrap();
        let after = storage.ledgers.snapshot(&alice).unwrap();

        assert_eq!(report.users[0].duplicates, 2);
        assert_eq!(after.expenses, before.expenses);
        assert_eq!(after.recurring, before.recurring);
        let march = YearMonth::new(2025, Month::March);
        assert_eq!(
            MonthlyBalance::compute(&after, march).total_expenses,
            Money::from_cents(7000)
        );
    }

    #[test]
    fn test_records_without_id_are_matched_by_content() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);
        let document = json!({ "erin": {
            "expenses": [
                { "amount": 9.5, "note": "cinema", "year": "2025", "month": "April" },
                { "amount": 9.5, "note": "cinema", "year": "2025", "month": "April" },
                { "amount": 9.5, "note": "cinema", "year": "2025", "month": "Mai" }
            ],
            "dauerauftraege": [
                { "amount": 12, "note": "gym", "startYear": "2025", "startMonth": "Januar",
                  "endYear": "2025", "endMonth": "Juni" }
            ]
        } });

        let first = service.import_value(&document, None).unwrap();
        assert_eq!(first.users[0].expenses, 2);
        assert_eq!(first.users[0].recurring, 1);
        assert_eq!(first.users[0].duplicates, 1);

        let second = service.import_value(&document, None).unwrap();
        assert_eq!(second.imported(), 0);
        assert_eq!(second.duplicates(), 3);

        let erin = UserId::new("erin").unwrap();
        let ledger = storage.ledgers.snapshot(&erin).unwrap();
        assert_eq!(ledger.expenses.len(), 2);
        assert_eq!(ledger.recurring.len(), 1);
    }

    #[test]
    fn test_rejects_non_object_document() {
        let (_temp_dir, storage) = create_test_storage();
        let err = ImportService::new(&storage)
            .import_value(&json!([1, 2, 3]), None)
            .unwrap_err();
        assert!(matches!(err, MonthbookError::Import(_)));
    }

    #[test]
    fn test_invalid_json_reader() {
        let (_temp_dir, storage) = create_test_storage();
        let err = ImportService::new(&storage)
            .import_reader("{not json".as_bytes(), None)
            .unwrap_err();
        assert!(matches!(err, MonthbookError::Import(_)));
    }
}
