//! Filtering and sorting for the budget entries table.
//!
//! View state is an explicit record passed into the functions below; there is
//! no hidden per-screen state. Transitions are pure: they consume a
//! [`TableView`] and return the next one.

use uuid::Uuid;

use crate::{BudgetEntry, Category, Classification, classify};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    One(Uuid),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    /// Whether an entry with the given classification passes this filter.
    ///
    /// Unclassified entries only pass `All`: a dangling category reference
    /// never matches a concrete type.
    fn matches(self, classification: Classification) -> bool {
        match self {
            Self::All => true,
            Self::Income => classification == Classification::Income,
            Self::Expense => classification == Classification::Expense,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    EntryDate,
    CategoryName,
    ItemName,
    Amount,
}

impl SortField {
    pub fn label(self) -> &'static str {
        match self {
            Self::EntryDate => "Entry Date",
            Self::CategoryName => "Category",
            Self::ItemName => "Item Name",
            Self::Amount => "Amount",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// Transient view state of the entries table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableView {
    pub search: String,
    pub category_filter: CategoryFilter,
    pub type_filter: TypeFilter,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
}

impl Default for TableView {
    /// Newest entries first, no filters.
    fn default() -> Self {
        Self {
            search: String::new(),
            category_filter: CategoryFilter::All,
            type_filter: TypeFilter::All,
            sort_field: SortField::EntryDate,
            sort_direction: SortDirection::Descending,
        }
    }
}

impl TableView {
    /// Selecting the current sort field flips the direction; selecting a new
    /// field resets to ascending.
    #[must_use]
    pub fn toggle_sort(mut self, field: SortField) -> Self {
        if self.sort_field == field {
            self.sort_direction = match self.sort_direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Ascending;
        }
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    #[must_use]
    pub fn with_category_filter(mut self, filter: CategoryFilter) -> Self {
        self.category_filter = filter;
        self
    }

    #[must_use]
    pub fn with_type_filter(mut self, filter: TypeFilter) -> Self {
        self.type_filter = filter;
        self
    }
}

/// Returns the entries passing all three predicates, in input order.
///
/// The predicates are an intersection, so applying them in any order yields
/// the same set. The search term matches case-insensitively against the item
/// name or the category name; for an entry with a dangling category only the
/// item name can match.
pub fn filter_entries<'a>(
    entries: &'a [BudgetEntry],
    categories: &[Category],
    view: &TableView,
) -> Vec<&'a BudgetEntry> {
    let needle = view.search.to_lowercase();

    entries
        .iter()
        .filter(|entry| {
            let category = categories.iter().find(|cat| cat.id == entry.category_id);

            let matches_search = needle.is_empty()
                || entry.item_name.to_lowercase().contains(&needle)
                || category.is_some_and(|cat| cat.name.to_lowercase().contains(&needle));

            let matches_category = match view.category_filter {
                CategoryFilter::All => true,
                CategoryFilter::One(id) => entry.category_id == id,
            };

            let matches_type = view.type_filter.matches(classify(entry, categories));

            matches_search && matches_category && matches_type
        })
        .collect()
}

/// Stable sort by the given field. Dates compare as calendar dates, amounts
/// numerically, names case-insensitively; a missing category name sorts as
/// the empty string.
pub fn sort_entries<'a>(
    mut rows: Vec<&'a BudgetEntry>,
    categories: &[Category],
    field: SortField,
    direction: SortDirection,
) -> Vec<&'a BudgetEntry> {
    let category_name_lower = |entry: &BudgetEntry| {
        categories
            .iter()
            .find(|cat| cat.id == entry.category_id)
            .map(|cat| cat.name.to_lowercase())
            .unwrap_or_default()
    };

    rows.sort_by(|a, b| {
        let ordering = match field {
            SortField::EntryDate => a.entry_date.cmp(&b.entry_date),
            SortField::Amount => a.amount_minor.cmp(&b.amount_minor),
            SortField::ItemName => a.item_name.to_lowercase().cmp(&b.item_name.to_lowercase()),
            SortField::CategoryName => category_name_lower(a).cmp(&category_name_lower(b)),
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    rows
}

/// Filter, then sort: the ordered subset of entries the table renders.
pub fn visible_entries<'a>(
    entries: &'a [BudgetEntry],
    categories: &[Category],
    view: &TableView,
) -> Vec<&'a BudgetEntry> {
    let filtered = filter_entries(entries, categories, view);
    sort_entries(filtered, categories, view.sort_field, view.sort_direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CategoryType;
    use crate::test_support::{category, entry};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn named(name: &str, amount_minor: i64, category_id: Uuid) -> crate::BudgetEntry {
        let mut e = entry(amount_minor, category_id);
        e.item_name = name.to_string();
        e
    }

    #[test]
    fn search_matches_item_or_category_name() {
        let food = category("Food", CategoryType::Income);
        let entries = vec![
            named("Catering deposit", 1_000, food.id),
            named("Banner print", 2_000, food.id),
        ];
        let categories = vec![food];

        let view = TableView::default().with_search("FOOD");
        let rows = filter_entries(&entries, &categories, &view);
        assert_eq!(rows.len(), 2);

        let view = TableView::default().with_search("banner");
        let rows = filter_entries(&entries, &categories, &view);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].item_name, "Banner print");
    }

    #[test]
    fn dangling_category_matches_only_under_all_filters() {
        let food = category("Food", CategoryType::Expense);
        let orphan = named("Mystery spend", 1_000, Uuid::new_v4());
        let entries = vec![named("Lunch", 500, food.id), orphan];
        let food_id = food.id;
        let categories = vec![food];

        // Passes when both filters are All and search hits the item name.
        let view = TableView::default().with_search("mystery");
        assert_eq!(filter_entries(&entries, &categories, &view).len(), 1);

        // Never matches a concrete type filter...
        let view = TableView::default().with_type_filter(TypeFilter::Expense);
        let rows = filter_entries(&entries, &categories, &view);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].item_name, "Lunch");

        // ...nor a concrete category filter.
        let view = TableView::default().with_category_filter(CategoryFilter::One(food_id));
        let rows = filter_entries(&entries, &categories, &view);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].item_name, "Lunch");
    }

    #[test]
    fn filters_intersect_in_any_order() {
        let food = category("Food", CategoryType::Expense);
        let tickets = category("Tickets", CategoryType::Income);
        let entries = vec![
            named("Lunch box", 500, food.id),
            named("Lunch raffle ticket", 700, tickets.id),
            named("Dinner", 900, food.id),
        ];
        let food_id = food.id;
        let categories = vec![food, tickets];

        let view = TableView::default()
            .with_search("lunch")
            .with_category_filter(CategoryFilter::One(food_id))
            .with_type_filter(TypeFilter::Expense);
        let rows = filter_entries(&entries, &categories, &view);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].item_name, "Lunch box");
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let food = category("Food", CategoryType::Expense);
        let entries = vec![
            named("first", 1_000, food.id),
            named("second", 1_000, food.id),
            named("third", 500, food.id),
        ];
        let categories = vec![food];

        let rows = sort_entries(
            entries.iter().collect(),
            &categories,
            SortField::Amount,
            SortDirection::Descending,
        );
        let names: Vec<_> = rows.iter().map(|e| e.item_name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn dates_compare_as_dates_and_missing_category_sorts_first() {
        let food = category("Food", CategoryType::Expense);
        let mut early = named("early", 100, food.id);
        early.entry_date = NaiveDate::from_ymd_opt(2025, 2, 9).unwrap();
        let mut late = named("late", 100, food.id);
        // Lexically "10" < "9", but as a date Feb 10 follows Feb 9.
        late.entry_date = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
        let orphan = named("orphan", 100, Uuid::new_v4());

        let entries = vec![late.clone(), early.clone(), orphan.clone()];
        let categories = vec![food];

        let rows = sort_entries(
            entries.iter().collect(),
            &categories,
            SortField::EntryDate,
            SortDirection::Ascending,
        );
        assert_eq!(rows[0].item_name, "early");
        assert_eq!(rows[1].item_name, "late");

        let rows = sort_entries(
            entries.iter().collect(),
            &categories,
            SortField::CategoryName,
            SortDirection::Ascending,
        );
        assert_eq!(rows[0].item_name, "orphan");
    }

    #[test]
    fn toggle_sort_flips_then_resets() {
        let view = TableView::default();
        assert_eq!(view.sort_field, SortField::EntryDate);
        assert_eq!(view.sort_direction, SortDirection::Descending);

        let view = view.toggle_sort(SortField::EntryDate);
        assert_eq!(view.sort_direction, SortDirection::Ascending);

        let view = view.toggle_sort(SortField::Amount);
        assert_eq!(view.sort_field, SortField::Amount);
        assert_eq!(view.sort_direction, SortDirection::Ascending);

        let view = view.toggle_sort(SortField::Amount);
        assert_eq!(view.sort_direction, SortDirection::Descending);
    }
}
