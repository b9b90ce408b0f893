//! Scalar financial metrics derived from an entry snapshot.

use crate::{BudgetEntry, Category, CategoryType};

/// Derived income/expense label of an entry, resolved through its category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    Income,
    Expense,
    /// The entry references a category that no longer exists. Not an error:
    /// such entries are silently excluded from every derived total and from
    /// type-based filtering.
    Unclassified,
}

/// Resolves an entry's classification by looking up its category.
pub fn classify(entry: &BudgetEntry, categories: &[Category]) -> Classification {
    match categories.iter().find(|cat| cat.id == entry.category_id) {
        Some(cat) => match cat.kind {
            CategoryType::Income => Classification::Income,
            CategoryType::Expense => Classification::Expense,
        },
        None => Classification::Unclassified,
    }
}

/// Headline totals for one event, in centavos.
///
/// `onhand_cash_minor` equals total income by definition (income received is
/// the cash on hand; there is no separate ledger). `ending_balance_minor`
/// currently equals `left_to_spend_minor`; both are kept as named outputs
/// because the dashboard displays them separately.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub total_income_minor: i64,
    pub total_expenses_minor: i64,
    pub onhand_cash_minor: i64,
    /// May be negative when spending exceeds income.
    pub left_to_spend_minor: i64,
    pub ending_balance_minor: i64,
}

pub fn compute_totals(entries: &[BudgetEntry], categories: &[Category]) -> Totals {
    let mut total_income_minor = 0i64;
    let mut total_expenses_minor = 0i64;

    for entry in entries {
        match classify(entry, categories) {
            Classification::Income => total_income_minor += entry.amount_minor,
            Classification::Expense => total_expenses_minor += entry.amount_minor,
            Classification::Unclassified => {}
        }
    }

    let onhand_cash_minor = total_income_minor;
    let left_to_spend_minor = onhand_cash_minor - total_expenses_minor;

    Totals {
        total_income_minor,
        total_expenses_minor,
        onhand_cash_minor,
        left_to_spend_minor,
        ending_balance_minor: left_to_spend_minor,
    }
}

/// Reimbursement tallies. Entries with `to_be_reimbursed == false` are not
/// counted at all, whatever their stored status says.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReimbursementCounts {
    pub pending: usize,
    pub completed: usize,
}

pub fn count_reimbursements(entries: &[BudgetEntry]) -> ReimbursementCounts {
    let mut counts = ReimbursementCounts::default();
    for entry in entries.iter().filter(|e| e.to_be_reimbursed) {
        match entry.reimbursement_status {
            crate::ReimbursementStatus::Pending => counts.pending += 1,
            crate::ReimbursementStatus::Completed => counts.completed += 1,
        }
    }
    counts
}

/// Entry counts for the Quick Stats panel. Unclassified entries count toward
/// `total` only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EntryCounts {
    pub total: usize,
    pub income: usize,
    pub expense: usize,
}

pub fn count_entries(entries: &[BudgetEntry], categories: &[Category]) -> EntryCounts {
    let mut counts = EntryCounts {
        total: entries.len(),
        ..EntryCounts::default()
    };
    for entry in entries {
        match classify(entry, categories) {
            Classification::Income => counts.income += 1,
            Classification::Expense => counts.expense += 1,
            Classification::Unclassified => {}
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReimbursementStatus;
    use crate::test_support::{category, entry};
    use uuid::Uuid;

    #[test]
    fn totals_split_by_category_kind() {
        let income = category("Sponsorship", CategoryType::Income);
        let expense = category("Food", CategoryType::Expense);
        let entries = vec![
            entry(100_000, income.id),
            entry(30_000, expense.id),
            entry(20_000, expense.id),
        ];
        let categories = vec![income, expense];

        let totals = compute_totals(&entries, &categories);
        assert_eq!(totals.total_income_minor, 100_000);
        assert_eq!(totals.total_expenses_minor, 50_000);
        assert_eq!(totals.onhand_cash_minor, 100_000);
        assert_eq!(totals.left_to_spend_minor, 50_000);
        assert_eq!(totals.ending_balance_minor, 50_000);
    }

    #[test]
    fn left_to_spend_can_go_negative() {
        let expense = category("Venue", CategoryType::Expense);
        let entries = vec![entry(75_000, expense.id)];
        let categories = vec![expense];

        let totals = compute_totals(&entries, &categories);
        assert_eq!(totals.left_to_spend_minor, -75_000);
        assert_eq!(totals.ending_balance_minor, totals.left_to_spend_minor);
    }

    #[test]
    fn dangling_category_is_unclassified_and_excluded() {
        let income = category("Tickets", CategoryType::Income);
        let orphan = entry(999_999, Uuid::new_v4());
        let entries = vec![entry(10_000, income.id), orphan.clone()];
        let categories = vec![income];

        assert_eq!(classify(&orphan, &categories), Classification::Unclassified);
        let totals = compute_totals(&entries, &categories);
        assert_eq!(totals.total_income_minor, 10_000);
        assert_eq!(totals.total_expenses_minor, 0);

        let counts = count_entries(&entries, &categories);
        assert_eq!(counts.total, 2);
        assert_eq!(counts.income, 1);
        assert_eq!(counts.expense, 0);
    }

    #[test]
    fn reimbursement_counts_ignore_unflagged_entries() {
        let expense = category("Transport", CategoryType::Expense);
        let mut flagged_pending = entry(1_000, expense.id);
        flagged_pending.to_be_reimbursed = true;

        let mut flagged_done = entry(2_000, expense.id);
        flagged_done.to_be_reimbursed = true;
        flagged_done.reimbursement_status = ReimbursementStatus::Completed;

        // Stale "completed" left over from a previous state: flag is off, so
        // it must not be counted on either side.
        let mut unflagged = entry(3_000, expense.id);
        unflagged.reimbursement_status = ReimbursementStatus::Completed;

        let counts = count_reimbursements(&[flagged_pending, flagged_done, unflagged]);
        assert_eq!(counts, ReimbursementCounts { pending: 1, completed: 1 });
    }
}
