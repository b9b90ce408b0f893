use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event lifecycle status.
///
/// Serialized with the exact strings the backend stores ("On Hold" contains a
/// space).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    #[default]
    Active,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// Category kind, deciding the sign of every entry attached to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryType {
    Income,
    Expense,
}

impl CategoryType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReimbursementStatus {
    #[default]
    Pending,
    Completed,
}

impl ReimbursementStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

pub mod event {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EventNew {
        pub name: String,
        /// Allocated budget in centavos.
        pub allocated_budget_minor: i64,
        pub venue: Option<String>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
        pub status: EventStatus,
    }

    /// Partial update; absent fields are left untouched by the backend.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct EventUpdate {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub allocated_budget_minor: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub venue: Option<Option<String>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub start_date: Option<Option<NaiveDate>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub end_date: Option<Option<NaiveDate>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub status: Option<EventStatus>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct EventView {
        pub id: Uuid,
        pub name: String,
        pub allocated_budget_minor: i64,
        pub venue: Option<String>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
        pub status: EventStatus,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EventListResponse {
        pub events: Vec<EventView>,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryNew {
        pub event_id: Uuid,
        pub name: String,
        /// Wire field is `type`, matching the backend column.
        #[serde(rename = "type")]
        pub kind: CategoryType,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: Uuid,
        pub event_id: Uuid,
        pub name: String,
        #[serde(rename = "type")]
        pub kind: CategoryType,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryListResponse {
        pub categories: Vec<CategoryView>,
    }
}

pub mod entry {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntryNew {
        pub event_id: Uuid,
        pub category_id: Uuid,
        pub item_name: String,
        /// Amount in centavos; the income/expense sign is derived from the
        /// category, never stored here.
        pub amount_minor: i64,
        pub payment_method: Option<String>,
        pub receipt_photo_url: Option<String>,
        pub receipt_filename: Option<String>,
        pub to_be_reimbursed: bool,
        pub reimbursement_source: Option<String>,
        pub reimbursement_status: ReimbursementStatus,
        pub entry_date: NaiveDate,
    }

    /// Partial update for a single entry.
    ///
    /// Inline cell edits send exactly one populated field. Text fields are
    /// forwarded as received from the edit buffer.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct EntryUpdate {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub item_name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub amount_minor: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub payment_method: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub entry_date: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub reimbursement_status: Option<ReimbursementStatus>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub receipt_photo_url: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub receipt_filename: Option<String>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct EntryView {
        pub id: Uuid,
        pub event_id: Uuid,
        pub category_id: Uuid,
        pub item_name: String,
        pub amount_minor: i64,
        pub payment_method: Option<String>,
        pub receipt_photo_url: Option<String>,
        pub receipt_filename: Option<String>,
        pub to_be_reimbursed: bool,
        pub reimbursement_source: Option<String>,
        pub reimbursement_status: ReimbursementStatus,
        pub entry_date: NaiveDate,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntryListResponse {
        pub entries: Vec<EntryView>,
    }
}

pub mod receipt {
    use super::*;

    /// Response of a blob upload: the public URL the entry should reference.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ReceiptUploaded {
        pub url: String,
    }
}
