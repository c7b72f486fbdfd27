use super::{Effect, Transition};
use crate::error::{Result, RosterError};
use crate::form::FormState;
use crate::validation::validate;
use chrono::NaiveDate;

/// Submit the form over the selected member, keeping its id.
pub fn run(state: &FormState, today: NaiveDate) -> Result<Transition> {
    let selected = state.selected.as_ref().ok_or(RosterError::NoSelection)?;
    let fields = state.read(today);
    validate(&fields)?;
    Ok(Transition::new(
        state.clone(),
        Effect::Replace {
            id: selected.id,
            fields,
        },
    ))
}
