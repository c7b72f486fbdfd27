use super::{DeleteRequest, Effect, Transition};
use crate::error::{Result, RosterError};
use crate::form::FormState;

/// Ask to delete the selected member. Nothing is removed until the request
/// comes back through [`confirm`] with a yes.
pub fn run(state: &FormState) -> Result<Transition> {
    let selected = state.selected.as_ref().ok_or(RosterError::NoSelection)?;
    let request = DeleteRequest {
        id: selected.id,
        name: selected.fields.full_name(),
    };
    Ok(Transition::new(state.clone(), Effect::ConfirmDelete(request)))
}

/// The user's answer to a [`DeleteRequest`]. Declining changes nothing.
pub fn confirm(state: &FormState, request: DeleteRequest, confirmed: bool) -> Transition {
    if confirmed {
        Transition::new(state.clone(), Effect::Delete(request.id))
    } else {
        Transition::state(state.clone())
    }
}
