use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Whether entries under a category count toward income or expenses.
///
/// Categories are create/delete only: the kind never changes after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
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

/// An income or expense bucket owned by an event.
///
/// Deleting a category does not touch its entries; they keep a dangling
/// `category_id` and become unclassified (see [`classify`]).
///
/// [`classify`]: crate::classify
#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub kind: CategoryType,
    pub created_at: DateTime<Utc>,
}
