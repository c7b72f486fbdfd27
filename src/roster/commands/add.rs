use super::{Effect, Transition};
use crate::error::Result;
use crate::form::FormState;
use crate::validation::validate;
use chrono::NaiveDate;

/// Submit the form as a new member.
///
/// Always inserts, even while another member is selected for editing.
pub fn run(state: &FormState, today: NaiveDate) -> Result<Transition> {
    let fields = state.read(today);
    validate(&fields)?;
    Ok(Transition::new(state.clone(), Effect::Insert(fields)))
}
