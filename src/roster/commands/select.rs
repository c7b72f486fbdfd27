use super::Transition;
use crate::form::FormState;
use crate::model::Member;

/// React to a selection change in the list.
///
/// Selecting a member loads it into the form. Losing the selection (for
/// example because the list was reloaded) forgets which member is being
/// edited but leaves whatever is typed in the inputs alone.
pub fn run(state: &FormState, member: Option<Member>) -> Transition {
    let mut next = state.clone();
    match member {
        Some(member) => next.populate(&member),
        None => next.selected = None,
    }
    Transition::state(next)
}
