//! Form state for the add-entry and event create/settings flows.
//!
//! Validation happens here, before anything is dispatched: a form that fails
//! to convert produces a user-visible message and no request.

use chrono::NaiveDate;

use api_types::{
    CategoryType, EventStatus, ReimbursementStatus,
    category::CategoryView,
    entry::EntryNew,
    event::{EventNew, EventUpdate, EventView},
};
use engine::Money;
use uuid::Uuid;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryField {
    Category,
    ItemName,
    Amount,
    PaymentMethod,
    EntryDate,
    ReceiptPath,
    Reimbursed,
    ReimbursementSource,
    ReimbursementStatus,
}

impl EntryField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::ItemName => "Item Name",
            Self::Amount => "Amount (₱)",
            Self::PaymentMethod => "Payment Method",
            Self::EntryDate => "Entry Date",
            Self::ReceiptPath => "Receipt Photo",
            Self::Reimbursed => "To be reimbursed?",
            Self::ReimbursementSource => "Reimbursement Source",
            Self::ReimbursementStatus => "Reimbursement Status",
        }
    }
}

const ENTRY_FIELD_ORDER: [EntryField; 9] = [
    EntryField::Category,
    EntryField::ItemName,
    EntryField::Amount,
    EntryField::PaymentMethod,
    EntryField::EntryDate,
    EntryField::ReceiptPath,
    EntryField::Reimbursed,
    EntryField::ReimbursementSource,
    EntryField::ReimbursementStatus,
];

#[derive(Clone, Debug)]
pub struct EntryForm {
    pub category_idx: Option<usize>,
    pub item_name: String,
    pub amount: String,
    pub payment_method: String,
    pub entry_date: String,
    pub receipt_path: String,
    pub to_be_reimbursed: bool,
    pub reimbursement_source: String,
    pub reimbursement_status: ReimbursementStatus,
    pub focus: EntryField,
}

impl EntryForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            category_idx: None,
            item_name: String::new(),
            amount: String::new(),
            payment_method: String::new(),
            entry_date: today.format(DATE_FORMAT).to_string(),
            receipt_path: String::new(),
            to_be_reimbursed: false,
            reimbursement_source: String::new(),
            reimbursement_status: ReimbursementStatus::Pending,
            focus: EntryField::Category,
        }
    }

    /// Advances focus; the reimbursement detail fields are skipped while the
    /// flag is off.
    pub fn next_focus(&mut self) {
        let mut idx = ENTRY_FIELD_ORDER
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        loop {
            idx = (idx + 1) % ENTRY_FIELD_ORDER.len();
            let next = ENTRY_FIELD_ORDER[idx];
            let skipped = !self.to_be_reimbursed
                && matches!(
                    next,
                    EntryField::ReimbursementSource | EntryField::ReimbursementStatus
                );
            if !skipped {
                self.focus = next;
                return;
            }
        }
    }

    /// The text buffer behind the focused field, if it is a text field.
    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            EntryField::ItemName => Some(&mut self.item_name),
            EntryField::Amount => Some(&mut self.amount),
            EntryField::PaymentMethod => Some(&mut self.payment_method),
            EntryField::EntryDate => Some(&mut self.entry_date),
            EntryField::ReceiptPath => Some(&mut self.receipt_path),
            EntryField::ReimbursementSource => Some(&mut self.reimbursement_source),
            _ => None,
        }
    }

    pub fn cycle_category(&mut self, count: usize, forward: bool) {
        if count == 0 {
            self.category_idx = None;
            return;
        }
        self.category_idx = Some(match self.category_idx {
            None => 0,
            Some(idx) if forward => (idx + 1) % count,
            Some(idx) => (idx + count - 1) % count,
        });
    }

    pub fn toggle_reimbursed(&mut self) {
        self.to_be_reimbursed = !self.to_be_reimbursed;
    }

    pub fn toggle_status(&mut self) {
        self.reimbursement_status = match self.reimbursement_status {
            ReimbursementStatus::Pending => ReimbursementStatus::Completed,
            ReimbursementStatus::Completed => ReimbursementStatus::Pending,
        };
    }

    /// Validates and builds the insert payload. Receipt fields stay empty;
    /// the caller fills them in after a successful upload.
    pub fn to_new(
        &self,
        event_id: Uuid,
        categories: &[CategoryView],
    ) -> Result<EntryNew, String> {
        let category = self
            .category_idx
            .and_then(|idx| categories.get(idx))
            .ok_or_else(|| "Please fill in all required fields".to_string())?;

        if self.item_name.trim().is_empty() || self.amount.trim().is_empty() {
            return Err("Please fill in all required fields".to_string());
        }

        let amount = Money::parse_major(&self.amount)
            .map_err(|_| format!("\"{}\" is not a valid amount", self.amount))?;
        if amount.is_negative() {
            return Err("Amount must not be negative".to_string());
        }

        let entry_date = NaiveDate::parse_from_str(self.entry_date.trim(), DATE_FORMAT)
            .map_err(|_| format!("\"{}\" is not a valid date (YYYY-MM-DD)", self.entry_date))?;

        let payment_method = match self.payment_method.trim() {
            "" => None,
            method => Some(method.to_string()),
        };
        let reimbursement_source = if self.to_be_reimbursed {
            match self.reimbursement_source.trim() {
                "" => None,
                source => Some(source.to_string()),
            }
        } else {
            None
        };
        let reimbursement_status = if self.to_be_reimbursed {
            self.reimbursement_status
        } else {
            ReimbursementStatus::Pending
        };

        Ok(EntryNew {
            event_id,
            category_id: category.id,
            item_name: self.item_name.trim().to_string(),
            amount_minor: amount.minor(),
            payment_method,
            receipt_photo_url: None,
            receipt_filename: None,
            to_be_reimbursed: self.to_be_reimbursed,
            reimbursement_source,
            reimbursement_status,
            entry_date,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventField {
    Name,
    Budget,
    Venue,
    StartDate,
    EndDate,
    Status,
}

impl EventField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Event Name",
            Self::Budget => "Allocated Budget (₱)",
            Self::Venue => "Venue",
            Self::StartDate => "Start Date",
            Self::EndDate => "End Date",
            Self::Status => "Status",
        }
    }
}

const EVENT_FIELD_ORDER: [EventField; 6] = [
    EventField::Name,
    EventField::Budget,
    EventField::Venue,
    EventField::StartDate,
    EventField::EndDate,
    EventField::Status,
];

const STATUS_ORDER: [EventStatus; 4] = [
    EventStatus::Active,
    EventStatus::Completed,
    EventStatus::OnHold,
    EventStatus::Cancelled,
];

#[derive(Clone, Debug, Default)]
pub struct EventForm {
    pub name: String,
    pub budget: String,
    pub venue: String,
    pub start_date: String,
    pub end_date: String,
    pub status: EventStatus,
    pub focus: EventField,
}

impl Default for EventField {
    fn default() -> Self {
        Self::Name
    }
}

impl EventForm {
    pub fn from_event(event: &EventView) -> Self {
        Self {
            name: event.name.clone(),
            budget: major_units_string(event.allocated_budget_minor),
            venue: event.venue.clone().unwrap_or_default(),
            start_date: event
                .start_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            end_date: event
                .end_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            status: event.status,
            focus: EventField::Name,
        }
    }

    pub fn next_focus(&mut self) {
        let idx = EVENT_FIELD_ORDER
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        self.focus = EVENT_FIELD_ORDER[(idx + 1) % EVENT_FIELD_ORDER.len()];
    }

    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            EventField::Name => Some(&mut self.name),
            EventField::Budget => Some(&mut self.budget),
            EventField::Venue => Some(&mut self.venue),
            EventField::StartDate => Some(&mut self.start_date),
            EventField::EndDate => Some(&mut self.end_date),
            EventField::Status => None,
        }
    }

    pub fn cycle_status(&mut self, forward: bool) {
        let idx = STATUS_ORDER
            .iter()
            .position(|s| *s == self.status)
            .unwrap_or(0);
        let len = STATUS_ORDER.len();
        self.status = if forward {
            STATUS_ORDER[(idx + 1) % len]
        } else {
            STATUS_ORDER[(idx + len - 1) % len]
        };
    }

    pub fn to_new(&self) -> Result<EventNew, String> {
        if self.name.trim().is_empty() {
            return Err("Please enter an event name".to_string());
        }
        Ok(EventNew {
            name: self.name.trim().to_string(),
            allocated_budget_minor: self.budget_minor(),
            venue: optional(&self.venue),
            start_date: parse_optional_date(&self.start_date, "start date")?,
            end_date: parse_optional_date(&self.end_date, "end date")?,
            status: self.status,
        })
    }

    pub fn to_update(&self) -> Result<EventUpdate, String> {
        if self.name.trim().is_empty() {
            return Err("Please enter an event name".to_string());
        }
        Ok(EventUpdate {
            name: Some(self.name.trim().to_string()),
            allocated_budget_minor: Some(self.budget_minor()),
            venue: Some(optional(&self.venue)),
            start_date: Some(parse_optional_date(&self.start_date, "start date")?),
            end_date: Some(parse_optional_date(&self.end_date, "end date")?),
            status: Some(self.status),
        })
    }

    /// An unparseable budget falls back to zero rather than blocking the
    /// save; the value is editable afterwards.
    fn budget_minor(&self) -> i64 {
        match Money::parse_major(&self.budget) {
            Ok(amount) if !amount.is_negative() => amount.minor(),
            Ok(_) | Err(_) => {
                if !self.budget.trim().is_empty() {
                    tracing::warn!(budget = %self.budget, "allocated budget not parseable, defaulting to 0");
                }
                0
            }
        }
    }
}

/// One category queued during event creation (inserted after the event).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub kind: CategoryType,
}

#[derive(Clone, Debug)]
pub struct CategoryStep {
    pub input: String,
    pub kind: CategoryType,
    pub drafts: Vec<CategoryDraft>,
}

impl Default for CategoryStep {
    fn default() -> Self {
        Self {
            input: String::new(),
            kind: CategoryType::Income,
            drafts: Vec::new(),
        }
    }
}

impl CategoryStep {
    pub fn toggle_kind(&mut self) {
        self.kind = match self.kind {
            CategoryType::Income => CategoryType::Expense,
            CategoryType::Expense => CategoryType::Income,
        };
    }

    /// Queues the typed name under the current kind; blank input is ignored.
    pub fn add_current(&mut self) {
        let name = self.input.trim().to_string();
        if name.is_empty() {
            return;
        }
        self.drafts.push(CategoryDraft {
            name,
            kind: self.kind,
        });
        self.input.clear();
    }

    pub fn remove_last(&mut self) {
        self.drafts.pop();
    }
}

fn optional(value: &str) -> Option<String> {
    match value.trim() {
        "" => None,
        value => Some(value.to_string()),
    }
}

fn parse_optional_date(value: &str, label: &str) -> Result<Option<NaiveDate>, String> {
    match value.trim() {
        "" => Ok(None),
        value => NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(Some)
            .map_err(|_| format!("\"{value}\" is not a valid {label} (YYYY-MM-DD)")),
    }
}

fn major_units_string(minor: i64) -> String {
    let abs = minor.unsigned_abs();
    let sign = if minor < 0 { "-" } else { "" };
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn categories() -> Vec<CategoryView> {
        vec![CategoryView {
            id: Uuid::new_v4(),
            event_id: Uuid::nil(),
            name: "Food".to_string(),
            kind: CategoryType::Expense,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }]
    }

    fn filled_form() -> EntryForm {
        let mut form = EntryForm::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        form.category_idx = Some(0);
        form.item_name = "Catering".to_string();
        form.amount = "1,500.50".to_string();
        form
    }

    #[test]
    fn entry_form_requires_category_item_and_amount() {
        let cats = categories();
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let form = EntryForm::new(today);
        assert!(form.to_new(Uuid::nil(), &cats).is_err());

        let mut form = filled_form();
        form.amount.clear();
        assert!(form.to_new(Uuid::nil(), &cats).is_err());

        let form = filled_form();
        let new = form.to_new(Uuid::nil(), &cats).unwrap();
        assert_eq!(new.amount_minor, 150_050);
        assert_eq!(new.category_id, cats[0].id);
        assert_eq!(new.reimbursement_status, ReimbursementStatus::Pending);
    }

    #[test]
    fn entry_form_rejects_bad_amount_and_date() {
        let cats = categories();
        let mut form = filled_form();
        form.amount = "abc".to_string();
        assert!(form.to_new(Uuid::nil(), &cats).is_err());

        let mut form = filled_form();
        form.entry_date = "06/01/2025".to_string();
        assert!(form.to_new(Uuid::nil(), &cats).is_err());
    }

    #[test]
    fn reimbursement_details_are_dropped_when_flag_is_off() {
        let cats = categories();
        let mut form = filled_form();
        form.reimbursement_source = "stale source".to_string();
        form.reimbursement_status = ReimbursementStatus::Completed;

        let new = form.to_new(Uuid::nil(), &cats).unwrap();
        assert!(!new.to_be_reimbursed);
        assert!(new.reimbursement_source.is_none());
        assert_eq!(new.reimbursement_status, ReimbursementStatus::Pending);
    }

    #[test]
    fn focus_skips_reimbursement_fields_while_flag_off() {
        let mut form = EntryForm::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        form.focus = EntryField::Reimbursed;
        form.next_focus();
        assert_eq!(form.focus, EntryField::Category);

        form.to_be_reimbursed = true;
        form.focus = EntryField::Reimbursed;
        form.next_focus();
        assert_eq!(form.focus, EntryField::ReimbursementSource);
    }

    #[test]
    fn event_form_defaults_unparseable_budget_to_zero() {
        let mut form = EventForm::default();
        form.name = "Hackathon".to_string();
        form.budget = "not a number".to_string();

        let new = form.to_new().unwrap();
        assert_eq!(new.allocated_budget_minor, 0);
    }

    #[test]
    fn event_form_round_trips_from_view() {
        let event = EventView {
            id: Uuid::new_v4(),
            name: "Dev Fest".to_string(),
            allocated_budget_minor: 250_000,
            venue: Some("Covered court".to_string()),
            start_date: NaiveDate::from_ymd_opt(2025, 7, 4),
            end_date: None,
            status: EventStatus::OnHold,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        };

        let form = EventForm::from_event(&event);
        assert_eq!(form.budget, "2500.00");
        let update = form.to_update().unwrap();
        assert_eq!(update.allocated_budget_minor, Some(250_000));
        assert_eq!(update.start_date, Some(NaiveDate::from_ymd_opt(2025, 7, 4)));
        assert_eq!(update.venue, Some(Some("Covered court".to_string())));
    }

    #[test]
    fn category_step_queues_and_toggles() {
        let mut step = CategoryStep::default();
        step.input = "Sponsors".to_string();
        step.add_current();
        step.toggle_kind();
        step.input = "Food".to_string();
        step.add_current();

        assert_eq!(step.drafts.len(), 2);
        assert_eq!(step.drafts[0].kind, CategoryType::Income);
        assert_eq!(step.drafts[1].kind, CategoryType::Expense);

        step.add_current(); // blank input ignored
        assert_eq!(step.drafts.len(), 2);
    }
}
