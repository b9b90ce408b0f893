//! Shared builders for unit tests.

use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use crate::{BudgetEntry, Category, CategoryType, ReimbursementStatus};

pub(crate) fn category(name: &str, kind: CategoryType) -> Category {
    Category {
        id: Uuid::new_v4(),
        event_id: Uuid::nil(),
        name: name.to_string(),
        kind,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub(crate) fn entry(amount_minor: i64, category_id: Uuid) -> BudgetEntry {
    BudgetEntry {
        id: Uuid::new_v4(),
        event_id: Uuid::nil(),
        category_id,
        item_name: "item".to_string(),
        amount_minor,
        payment_method: None,
        receipt: None,
        to_be_reimbursed: false,
        reimbursement_source: None,
        reimbursement_status: ReimbursementStatus::Pending,
        entry_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        created_at: Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap(),
    }
}
