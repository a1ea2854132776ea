//! One line of the audit log
//!
//! Each entry names the user whose ledger changed, the record touched and
//! JSON snapshots of it before and after the change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// Types of records that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Expense,
    Recurring,
    Income,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Expense => write!(f, "Expense"),
            EntityType::Recurring => write!(f, "Recurring"),
            EntityType::Income => write!(f, "Income"),
        }
    }
}

/// A single audit log entry
///
/// Records one operation on one record of one user, with the JSON form of
/// the record before and/or after the change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Owner of the changed ledger
    pub user: String,

    pub entity_type: EntityType,

    /// Record id, or the income key for income records
    pub entity_id: String,

    /// Short human-readable label (usually the note)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable diff summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

/// What an entry is about: owner, record kind, id and label
#[derive(Debug, Clone)]
pub struct AuditSubject {
    pub user: String,
    pub entity_type: EntityType,
    pub entity_id: String,
    pub entity_name: Option<String>,
}

impl AuditSubject {
    pub fn new(
        user: impl Into<String>,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            user: user.into(),
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
        }
    }
}

impl AuditEntry {
    fn base(operation: Operation, subject: AuditSubject) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            user: subject.user,
            entity_type: subject.entity_type,
            entity_id: subject.entity_id,
            entity_name: subject.entity_name,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    /// Entry for a newly created record
    pub fn create<T: Serialize>(subject: AuditSubject, entity: &T) -> Self {
        Self {
            after: serde_json::to_value(entity).ok(),
            ..Self::base(Operation::Create, subject)
        }
    }

    /// Entry for an edited record
    pub fn update<T: Serialize>(
        subject: AuditSubject,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            diff_summary,
            ..Self::base(Operation::Update, subject)
        }
    }

    /// Entry for a deleted record
    pub fn delete<T: Serialize>(subject: AuditSubject, entity: &T) -> Self {
        Self {
            before: serde_json::to_value(entity).ok(),
            ..Self::base(Operation::Delete, subject)
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {} ({})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id,
            self.user
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" \"{}\"", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}
