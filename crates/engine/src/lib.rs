//! Client-side aggregation and table-view core for the event budget tracker.
//!
//! Everything in this crate is pure and synchronous: the caller hands in the
//! current `(entries, categories)` snapshot on every render and gets derived
//! views back. Mutations are value objects ([`EntryMutation`]) the caller
//! dispatches to the hosted backend, followed by a full refetch.

pub use category::{Category, CategoryType};
pub use distribution::{DistributionSlice, PALETTE_SIZE, expense_distribution};
pub use edit::{EditField, EditLocus, EditState, EntryMutation, EntryPatch, toggle_reimbursement};
pub use entry::{BudgetEntry, Receipt, ReimbursementStatus};
pub use error::EngineError;
pub use money::{Currency, Money};
pub use table::{
    CategoryFilter, SortDirection, SortField, TableView, TypeFilter, filter_entries, sort_entries,
    visible_entries,
};
pub use totals::{
    Classification, EntryCounts, ReimbursementCounts, Totals, classify, compute_totals,
    count_entries, count_reimbursements,
};

mod category;
mod distribution;
mod edit;
mod entry;
mod error;
mod money;
mod table;
#[cfg(test)]
mod test_support;
mod totals;

pub type ResultEngine<T> = Result<T, EngineError>;
