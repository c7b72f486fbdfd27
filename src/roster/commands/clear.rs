use super::{Effect, Transition};
use crate::form::FormState;
use chrono::NaiveDate;

/// Reset the form: empty inputs, today's date, nothing selected. The list
/// selection is dropped too.
pub fn run(today: NaiveDate) -> Transition {
    Transition::new(FormState::blank(today), Effect::UnselectAll)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_returns_blank_form_and_unselects() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let t = run(today);
        assert_eq!(t.state, FormState::blank(today));
        assert_eq!(t.effect, Effect::UnselectAll);
    }
}
