use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
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

    /// The other status. Well-defined because there are exactly two.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }
}

/// A stored receipt image: public URL plus the original filename.
///
/// Both are present or neither is; the pair exists as one field to make the
/// half-set state unrepresentable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub url: String,
    pub filename: String,
}

/// A single dated income or expense record.
///
/// The income/expense sign is **not** stored here: it is derived at read
/// time from the referenced category's kind. `reimbursement_status` is only
/// meaningful while `to_be_reimbursed` is set; a stale value may remain from
/// an earlier state and must be ignored by consumers.
#[derive(Clone, Debug, PartialEq)]
pub struct BudgetEntry {
    pub id: Uuid,
    pub event_id: Uuid,
    pub category_id: Uuid,
    pub item_name: String,
    pub amount_minor: i64,
    pub payment_method: Option<String>,
    pub receipt: Option<Receipt>,
    pub to_be_reimbursed: bool,
    pub reimbursement_source: Option<String>,
    pub reimbursement_status: ReimbursementStatus,
    pub entry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
