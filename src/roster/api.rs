//! # API Facade
//!
//! [`RosterApi`] is the single entry point for every UI. It owns one editing
//! session: the open store, the list view and the form view-model.
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** actions to the pure commands in [`crate::commands`]
//! - **Performs effects** the commands ask for (insert, replace, delete)
//! - **Reloads** the list after every successful write
//! - **Returns structured results** ([`CmdResult`]) and typed errors
//!
//! ## What the API Does NOT Do
//!
//! - **Validation or form logic**: that belongs to the commands
//! - **Prompting**: a delete comes back as [`CmdResult::pending_delete`];
//!   the UI asks the user and answers with [`RosterApi::confirm_delete`]
//! - **Printing**: nothing here writes to stdout or stderr
//!
//! ## Failure Semantics
//!
//! A failed action leaves the session exactly as it was: the form keeps its
//! contents and the list is not reloaded. Errors are returned to the caller,
//! which is the point where they get shown to the user.
//!
//! A reload that fails *after* a successful write does not undo the write;
//! it is reported as an error message inside the otherwise successful result
//! and the list keeps its previous rows.
//!
//! ## Generic Over MemberStore
//!
//! `RosterApi<S: MemberStore>` works the same over the JSON file store, the
//! in-memory store, or the [`crate::store::Collection`] enum that `connect`
//! returns.

use crate::commands::{self, Effect, Transition};
use crate::error::{Result, RosterError};
use crate::form::{FormField, FormState};
use crate::index::RowSelector;
use crate::store::{DeleteOutcome, MemberStore, ReplaceOutcome};
use crate::view::{ListView, SelectionChanged};
use chrono::{Local, NaiveDate};

pub use crate::commands::{
    Action, ActionKind, CmdMessage, CmdResult, DeleteRequest, MessageLevel,
};

pub struct RosterApi<S: MemberStore> {
    store: S,
    view: ListView,
    form: FormState,
    fixed_today: Option<NaiveDate>,
}

impl<S: MemberStore> RosterApi<S> {
    pub fn new(store: S) -> Self {
        let today = Local::now().date_naive();
        Self {
            store,
            view: ListView::new(),
            form: FormState::blank(today),
            fixed_today: None,
        }
    }

    /// Pin "today" to a fixed date instead of the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self.form = FormState::blank(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch every member and show them. Drops the selection.
    pub fn reload(&mut self) -> Result<CmdResult> {
        let members = self.store.fetch_all()?;
        let changed = self.view.load(members);
        self.on_selection_changed(changed)?;
        Ok(CmdResult::default())
    }

    pub fn select(&mut self, selector: &RowSelector) -> Result<CmdResult> {
        let changed = self.view.select(selector)?;
        self.on_selection_changed(changed)?;
        let mut result = CmdResult::default();
        if let Some(member) = self.form.selected.clone() {
            result = result.with_affected_member(member);
        }
        Ok(result)
    }

    pub fn edit(&mut self, field: FormField, value: impl Into<String>) -> Result<CmdResult> {
        self.dispatch(Action::Edit(field, value.into()))
    }

    pub fn set_start(&mut self, date: Option<NaiveDate>) -> Result<CmdResult> {
        self.dispatch(Action::SetStart(date))
    }

    pub fn add(&mut self) -> Result<CmdResult> {
        self.dispatch(Action::Add)
    }

    pub fn update(&mut self) -> Result<CmdResult> {
        self.dispatch(Action::Update)
    }

    /// Start deleting the selected member. The result carries the pending
    /// request; nothing is removed yet.
    pub fn delete(&mut self) -> Result<CmdResult> {
        self.dispatch(Action::Delete)
    }

    pub fn confirm_delete(&mut self, request: DeleteRequest, confirmed: bool) -> Result<CmdResult> {
        self.dispatch(Action::ConfirmDelete { request, confirmed })
    }

    pub fn clear(&mut self) -> Result<CmdResult> {
        self.dispatch(Action::Clear)
    }

    /// Run one action through the command layer and carry out its effect.
    pub fn dispatch(&mut self, action: Action) -> Result<CmdResult> {
        let kind = action.kind();
        tracing::debug!(action = %kind, "dispatch");
        let transition = commands::dispatch(&self.form, action, self.today())?;
        self.apply(transition)
    }

    fn on_selection_changed(&mut self, changed: SelectionChanged) -> Result<()> {
        let SelectionChanged(member) = changed;
        let transition = commands::dispatch(&self.form, Action::Select(member), self.today())?;
        self.form = transition.state;
        Ok(())
    }

    fn apply(&mut self, transition: Transition) -> Result<CmdResult> {
        let Transition { state, effect } = transition;

        match effect {
            Effect::None => {
                self.form = state;
                Ok(CmdResult::default())
            }
            Effect::UnselectAll => {
                self.form = state;
                self.view.unselect_all();
                Ok(CmdResult::default())
            }
            Effect::ConfirmDelete(request) => {
                self.form = state;
                Ok(CmdResult::default().with_pending_delete(request))
            }
            Effect::Insert(fields) => {
                let member = self.store.insert(fields)?;
                self.form = state;

                let mut result = CmdResult::default()
                    .with_message(CmdMessage::success(format!(
                        "Member added: {}",
                        member.fields.full_name()
                    )))
                    .with_affected_member(member);
                self.reload_after_write(&mut result)?;
                Ok(result)
            }
            Effect::Replace { id, fields } => {
                let name = fields.full_name();
                match self.store.replace(&id, fields)? {
                    ReplaceOutcome::Replaced => {}
                    ReplaceOutcome::NotFound => return Err(RosterError::NotFound(id)),
                }
                self.form = state;

                let mut result = CmdResult::default()
                    .with_message(CmdMessage::success(format!("Member updated: {}", name)));
                self.reload_after_write(&mut result)?;
                self.clear_after_write()?;
                Ok(result)
            }
            Effect::Delete(id) => {
                let mut result = match self.store.delete(&id)? {
                    DeleteOutcome::Deleted => {
                        let name = self
                            .form
                            .selected
                            .as_ref()
                            .filter(|m| m.id == id)
                            .map(|m| m.fields.full_name())
                            .unwrap_or_else(|| id.to_string());
                        CmdResult::default()
                            .with_message(CmdMessage::success(format!("Member deleted: {}", name)))
                    }
                    DeleteOutcome::NotFound => CmdResult::default()
                        .with_message(CmdMessage::info("Member was already removed.")),
                };
                self.form = state;
                self.reload_after_write(&mut result)?;
                self.clear_after_write()?;
                Ok(result)
            }
        }
    }

    fn reload_after_write(&mut self, result: &mut CmdResult) -> Result<()> {
        match self.reload() {
            Ok(_) => Ok(()),
            Err(RosterError::Query(msg)) => {
                tracing::warn!(error = %msg, "reload after write failed");
                result.add_message(CmdMessage::error(RosterError::Query(msg).to_string()));
                Ok(())
            }
            Err(other) => Err(other),
        }
    }

    fn clear_after_write(&mut self) -> Result<()> {
        let transition = commands::dispatch(&self.form, Action::Clear, self.today())?;
        self.apply(transition)?;
        Ok(())
    }
}
