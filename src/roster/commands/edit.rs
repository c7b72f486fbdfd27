use super::Transition;
use crate::form::{FormField, FormState};
use chrono::NaiveDate;

/// Write one text input. The value is stored as typed.
pub fn set_field(state: &FormState, field: FormField, value: String) -> Transition {
    let mut next = state.clone();
    next.set(field, value);
    Transition::state(next)
}

/// Pick a membership start date, or unset it so submit falls back to today.
pub fn set_start(state: &FormState, date: Option<NaiveDate>) -> Transition {
    let mut next = state.clone();
    next.membership_start = date;
    Transition::state(next)
}
