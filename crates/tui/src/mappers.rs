//! Conversions between wire views (`api_types`) and engine domain types.

use api_types::{category::CategoryView, entry::EntryUpdate, entry::EntryView};
use engine::{BudgetEntry, Category, CategoryType, EditField, EntryPatch, Receipt};

pub fn category_from_view(view: CategoryView) -> Category {
    Category {
        id: view.id,
        event_id: view.event_id,
        name: view.name,
        kind: match view.kind {
            api_types::CategoryType::Income => CategoryType::Income,
            api_types::CategoryType::Expense => CategoryType::Expense,
        },
        created_at: view.created_at,
    }
}

pub fn entry_from_view(view: EntryView) -> BudgetEntry {
    let receipt = match (view.receipt_photo_url, view.receipt_filename) {
        (Some(url), Some(filename)) => Some(Receipt { url, filename }),
        (None, None) => None,
        // A half-set pair should not exist; treat it as no receipt.
        (url, filename) => {
            tracing::warn!(
                entry_id = %view.id,
                has_url = url.is_some(),
                has_filename = filename.is_some(),
                "entry has a half-set receipt pair"
            );
            None
        }
    };

    BudgetEntry {
        id: view.id,
        event_id: view.event_id,
        category_id: view.category_id,
        item_name: view.item_name,
        amount_minor: view.amount_minor,
        payment_method: view.payment_method,
        receipt,
        to_be_reimbursed: view.to_be_reimbursed,
        reimbursement_source: view.reimbursement_source,
        reimbursement_status: match view.reimbursement_status {
            api_types::ReimbursementStatus::Pending => engine::ReimbursementStatus::Pending,
            api_types::ReimbursementStatus::Completed => engine::ReimbursementStatus::Completed,
        },
        entry_date: view.entry_date,
        created_at: view.created_at,
        updated_at: view.updated_at,
    }
}

/// Maps an engine mutation patch to the partial-update wire payload.
pub fn update_from_patch(patch: EntryPatch) -> EntryUpdate {
    match patch {
        EntryPatch::Amount(minor) => EntryUpdate {
            amount_minor: Some(minor),
            ..EntryUpdate::default()
        },
        EntryPatch::Text { field, value } => match field {
            EditField::ItemName => EntryUpdate {
                item_name: Some(value),
                ..EntryUpdate::default()
            },
            EditField::PaymentMethod => EntryUpdate {
                payment_method: Some(value),
                ..EntryUpdate::default()
            },
            EditField::EntryDate => EntryUpdate {
                entry_date: Some(value),
                ..EntryUpdate::default()
            },
            // Amount never arrives as raw text.
            EditField::Amount => EntryUpdate::default(),
        },
        EntryPatch::ReimbursementStatus(status) => EntryUpdate {
            reimbursement_status: Some(match status {
                engine::ReimbursementStatus::Pending => api_types::ReimbursementStatus::Pending,
                engine::ReimbursementStatus::Completed => {
                    api_types::ReimbursementStatus::Completed
                }
            }),
            ..EntryUpdate::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    fn view() -> EntryView {
        EntryView {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            category_id: Uuid::new_v4(),
            item_name: "banner".to_string(),
            amount_minor: 12_345,
            payment_method: None,
            receipt_photo_url: None,
            receipt_filename: None,
            to_be_reimbursed: false,
            reimbursement_source: None,
            reimbursement_status: api_types::ReimbursementStatus::Pending,
            entry_date: NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(),
            created_at: Utc.with_ymd_and_hms(2025, 5, 2, 8, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 5, 2, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn receipt_pair_maps_only_when_complete() {
        let mut v = view();
        v.receipt_photo_url = Some("https://cdn/receipt.png".to_string());
        v.receipt_filename = Some("receipt.png".to_string());
        assert!(entry_from_view(v).receipt.is_some());

        let mut half = view();
        half.receipt_photo_url = Some("https://cdn/receipt.png".to_string());
        assert!(entry_from_view(half).receipt.is_none());
    }

    #[test]
    fn amount_patch_populates_only_amount() {
        let update = update_from_patch(EntryPatch::Amount(50_000));
        assert_eq!(update.amount_minor, Some(50_000));
        assert!(update.item_name.is_none());
        assert!(update.entry_date.is_none());
        assert!(update.reimbursement_status.is_none());
    }

    #[test]
    fn raw_date_text_is_forwarded_verbatim() {
        let update = update_from_patch(EntryPatch::Text {
            field: EditField::EntryDate,
            value: "2025-05-03".to_string(),
        });
        assert_eq!(update.entry_date.as_deref(), Some("2025-05-03"));
    }
}
