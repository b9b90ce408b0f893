//! Expense breakdown for the cash-flow chart.

use crate::{BudgetEntry, Category, Classification, classify};

/// Number of colors in the chart palette; slices cycle through it.
pub const PALETTE_SIZE: usize = 8;

/// One chart slice: a category bucket with its summed expense amount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistributionSlice {
    pub category_name: String,
    pub amount_minor: i64,
    /// Position in the sorted sequence modulo [`PALETTE_SIZE`].
    pub color_index: usize,
}

/// Buckets expense-classified entries by category **name** and sums them,
/// sorted descending by amount.
///
/// Grouping is by display name, not id: two distinct categories that share a
/// name merge into one slice. That mirrors the dashboard's observed behavior
/// and is a known ambiguity, kept until product says otherwise.
///
/// Ties keep first-encountered order (the sort is stable). The sum over all
/// slices equals `Totals::total_expenses_minor` for the same snapshot.
/// Returns an empty vec when there are no expense entries; the caller renders
/// a "no data" state.
pub fn expense_distribution(
    entries: &[BudgetEntry],
    categories: &[Category],
) -> Vec<DistributionSlice> {
    // Vec instead of a map to preserve first-encounter order for ties.
    let mut buckets: Vec<(String, i64)> = Vec::new();

    for entry in entries {
        if classify(entry, categories) != Classification::Expense {
            continue;
        }
        let Some(cat) = categories.iter().find(|cat| cat.id == entry.category_id) else {
            continue;
        };
        match buckets.iter_mut().find(|(name, _)| *name == cat.name) {
            Some((_, sum)) => *sum += entry.amount_minor,
            None => buckets.push((cat.name.clone(), entry.amount_minor)),
        }
    }

    buckets.sort_by(|a, b| b.1.cmp(&a.1));

    buckets
        .into_iter()
        .enumerate()
        .map(|(i, (category_name, amount_minor))| DistributionSlice {
            category_name,
            amount_minor,
            color_index: i % PALETTE_SIZE,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CategoryType;
    use crate::test_support::{category, entry};

    #[test]
    fn sums_and_sorts_descending() {
        let food = category("Food", CategoryType::Expense);
        let venue = category("Venue", CategoryType::Expense);
        let tickets = category("Tickets", CategoryType::Income);
        let entries = vec![
            entry(10_000, food.id),
            entry(40_000, venue.id),
            entry(5_000, food.id),
            entry(99_000, tickets.id),
        ];
        let categories = vec![food, venue, tickets];

        let slices = expense_distribution(&entries, &categories);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].category_name, "Venue");
        assert_eq!(slices[0].amount_minor, 40_000);
        assert_eq!(slices[0].color_index, 0);
        assert_eq!(slices[1].category_name, "Food");
        assert_eq!(slices[1].amount_minor, 15_000);
        assert_eq!(slices[1].color_index, 1);
    }

    #[test]
    fn same_name_categories_merge_into_one_slice() {
        let food_a = category("Food", CategoryType::Expense);
        let food_b = category("Food", CategoryType::Expense);
        let entries = vec![entry(10_000, food_a.id), entry(5_000, food_b.id)];
        let categories = vec![food_a, food_b];

        let slices = expense_distribution(&entries, &categories);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].category_name, "Food");
        assert_eq!(slices[0].amount_minor, 15_000);
    }

    #[test]
    fn ties_keep_first_encounter_order() {
        let a = category("Printing", CategoryType::Expense);
        let b = category("Decor", CategoryType::Expense);
        let entries = vec![entry(7_500, a.id), entry(7_500, b.id)];
        let categories = vec![a, b];

        let slices = expense_distribution(&entries, &categories);
        assert_eq!(slices[0].category_name, "Printing");
        assert_eq!(slices[1].category_name, "Decor");
    }

    #[test]
    fn color_indices_cycle_through_palette() {
        let mut categories = Vec::new();
        let mut entries = Vec::new();
        for i in 0..10 {
            let cat = category(&format!("Cat {i}"), CategoryType::Expense);
            // Descending amounts so the sorted order is the creation order.
            entries.push(entry(100_000 - i as i64 * 1_000, cat.id));
            categories.push(cat);
        }

        let slices = expense_distribution(&entries, &categories);
        assert_eq!(slices.len(), 10);
        assert_eq!(slices[7].color_index, 7);
        assert_eq!(slices[8].color_index, 0);
        assert_eq!(slices[9].color_index, 1);
    }

    #[test]
    fn empty_without_expense_entries() {
        let tickets = category("Tickets", CategoryType::Income);
        let entries = vec![entry(10_000, tickets.id)];
        let categories = vec![tickets];

        assert!(expense_distribution(&entries, &categories).is_empty());
    }
}
