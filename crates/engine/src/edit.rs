//! Inline cell editing, modeled as an explicit state machine.
//!
//! At most one cell (entry id + field) is editable at a time. Starting a new
//! edit abandons any unsaved buffer. A successful commit yields an
//! [`EntryMutation`] for the caller to dispatch; the view stays stale until
//! the caller refetches and calls [`EditState::finish`].

use uuid::Uuid;

use crate::{BudgetEntry, EngineError, Money, ReimbursementStatus, ResultEngine};

/// Fields that support inline editing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditField {
    EntryDate,
    ItemName,
    Amount,
    PaymentMethod,
}

impl EditField {
    pub fn label(self) -> &'static str {
        match self {
            Self::EntryDate => "entry date",
            Self::ItemName => "item name",
            Self::Amount => "amount",
            Self::PaymentMethod => "payment method",
        }
    }
}

/// The cell currently open for editing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditLocus {
    pub entry_id: Uuid,
    pub field: EditField,
}

/// A validated, not-yet-dispatched update request for one entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryMutation {
    pub entry_id: Uuid,
    pub patch: EntryPatch,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryPatch {
    /// Parsed and validated amount in centavos.
    Amount(i64),
    /// Raw buffer text, forwarded as-is. No validation happens for these
    /// fields; the backend is the only gate. Known weak point, kept to match
    /// the observed behavior (see DESIGN.md).
    Text { field: EditField, value: String },
    ReimbursementStatus(ReimbursementStatus),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing {
        locus: EditLocus,
        buffer: String,
    },
    /// A mutation was emitted and the refetch is in flight.
    Committing { locus: EditLocus },
}

impl EditState {
    /// Opens a cell for editing, seeding the buffer with the current value.
    ///
    /// Valid from any state: an unsaved buffer from a previous locus is
    /// silently dropped (last writer wins at the UI level).
    pub fn begin(&mut self, locus: EditLocus, current_value: &str) {
        *self = Self::Editing {
            locus,
            buffer: current_value.to_string(),
        };
    }

    /// Abandons the current edit, if any.
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    /// Appends a character to the edit buffer. No-op outside `Editing`.
    pub fn push(&mut self, ch: char) {
        if let Self::Editing { buffer, .. } = self {
            buffer.push(ch);
        }
    }

    /// Removes the last character of the edit buffer. No-op outside `Editing`.
    pub fn pop(&mut self) {
        if let Self::Editing { buffer, .. } = self {
            buffer.pop();
        }
    }

    pub fn locus(&self) -> Option<EditLocus> {
        match self {
            Self::Idle => None,
            Self::Editing { locus, .. } | Self::Committing { locus } => Some(*locus),
        }
    }

    pub fn buffer(&self) -> Option<&str> {
        match self {
            Self::Editing { buffer, .. } => Some(buffer),
            _ => None,
        }
    }

    /// Validates the buffer and, on success, moves to `Committing` and
    /// returns the mutation to dispatch.
    ///
    /// For the amount field the buffer must parse as a non-negative decimal;
    /// a failure returns `InvalidAmount` and leaves the state in `Editing` so
    /// the user can fix the input. Every other field passes its raw text
    /// through.
    pub fn commit(&mut self) -> ResultEngine<EntryMutation> {
        let Self::Editing { locus, buffer } = &*self else {
            return Err(EngineError::NoActiveEdit);
        };
        let locus = *locus;

        let patch = match locus.field {
            EditField::Amount => {
                let amount = Money::parse_major(buffer).inspect_err(|err| {
                    tracing::debug!(entry_id = %locus.entry_id, "rejected amount edit: {err}");
                })?;
                if amount.is_negative() {
                    return Err(EngineError::InvalidAmount(
                        "amount must not be negative".to_string(),
                    ));
                }
                EntryPatch::Amount(amount.minor())
            }
            field => EntryPatch::Text {
                field,
                value: buffer.clone(),
            },
        };

        *self = Self::Committing { locus };
        Ok(EntryMutation {
            entry_id: locus.entry_id,
            patch,
        })
    }

    /// Closes the commit cycle once the caller's refetch has resolved.
    pub fn finish(&mut self) {
        if matches!(self, Self::Committing { .. }) {
            *self = Self::Idle;
        }
    }
}

/// Mutation flipping an entry's reimbursement status pending↔completed.
///
/// Dispatched immediately on trigger; deliberately not gated behind the edit
/// locus.
pub fn toggle_reimbursement(entry: &BudgetEntry) -> EntryMutation {
    EntryMutation {
        entry_id: entry.id,
        patch: EntryPatch::ReimbursementStatus(entry.reimbursement_status.toggled()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CategoryType;
    use crate::test_support::{category, entry};

    fn locus(field: EditField) -> EditLocus {
        EditLocus {
            entry_id: Uuid::new_v4(),
            field,
        }
    }

    #[test]
    fn commit_amount_parses_buffer() {
        let mut state = EditState::default();
        let locus = locus(EditField::Amount);
        state.begin(locus, "500.00");

        let mutation = state.commit().unwrap();
        assert_eq!(mutation.entry_id, locus.entry_id);
        assert_eq!(mutation.patch, EntryPatch::Amount(50_000));
        assert_eq!(state, EditState::Committing { locus });

        state.finish();
        assert_eq!(state, EditState::Idle);
    }

    #[test]
    fn invalid_amount_keeps_editing_open() {
        let mut state = EditState::default();
        state.begin(locus(EditField::Amount), "500");
        state.push('a');
        state.push('b');
        state.push('c');
        state.pop();
        state.pop();
        state.pop();
        state.push('a');

        let err = state.commit().unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
        // Locus stays open with the bad buffer; nothing was dispatched.
        assert_eq!(state.buffer(), Some("500a"));
        assert!(matches!(state, EditState::Editing { .. }));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let mut state = EditState::default();
        state.begin(locus(EditField::Amount), "-5");
        assert!(matches!(
            state.commit(),
            Err(EngineError::InvalidAmount(_))
        ));
    }

    #[test]
    fn non_amount_fields_pass_raw_text() {
        let mut state = EditState::default();
        let locus = locus(EditField::PaymentMethod);
        state.begin(locus, "GCash");

        let mutation = state.commit().unwrap();
        assert_eq!(
            mutation.patch,
            EntryPatch::Text {
                field: EditField::PaymentMethod,
                value: "GCash".to_string()
            }
        );
    }

    #[test]
    fn begin_over_existing_edit_abandons_buffer() {
        let mut state = EditState::default();
        state.begin(locus(EditField::ItemName), "old name");
        state.push('!');

        let second = locus(EditField::Amount);
        state.begin(second, "100");
        assert_eq!(state.locus(), Some(second));
        assert_eq!(state.buffer(), Some("100"));
    }

    #[test]
    fn commit_without_edit_fails() {
        let mut state = EditState::default();
        assert_eq!(state.commit().unwrap_err(), EngineError::NoActiveEdit);
    }

    #[test]
    fn toggle_flips_both_ways() {
        let cat = category("Food", CategoryType::Expense);
        let mut e = entry(1_000, cat.id);
        e.to_be_reimbursed = true;

        let mutation = toggle_reimbursement(&e);
        assert_eq!(
            mutation.patch,
            EntryPatch::ReimbursementStatus(ReimbursementStatus::Completed)
        );

        e.reimbursement_status = ReimbursementStatus::Completed;
        let mutation = toggle_reimbursement(&e);
        assert_eq!(
            mutation.patch,
            EntryPatch::ReimbursementStatus(ReimbursementStatus::Pending)
        );
    }
}
