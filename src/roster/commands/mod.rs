//! # Command Layer
//!
//! Every user action on the form is a pure function of the current
//! [`FormState`] and its input:
//!
//! ```text
//! (&FormState, input) -> Result<Transition { state, effect }>
//! ```
//!
//! Commands never touch the store. When an action needs persistence it says
//! so through its [`Effect`]; the API layer performs the effect and only then
//! commits the new state. A command that fails (validation, nothing selected)
//! returns `Err` and the caller keeps the old state, so a rejected submit
//! never disturbs the form.
//!
//! ## Dispatch Table
//!
//! | Action          | Module      | Effect on success                      |
//! |-----------------|-------------|----------------------------------------|
//! | `select`        | [`select`]  | none                                   |
//! | `edit` / start  | [`edit`]    | none                                   |
//! | `clear`         | [`clear`]   | `UnselectAll`                          |
//! | `add`           | [`add`]     | `Insert(fields)`                       |
//! | `update`        | [`update`]  | `Replace { id, fields }`               |
//! | `delete`        | [`delete`]  | `ConfirmDelete(request)`               |
//! | confirm delete  | [`delete`]  | `Delete(id)` or none when declined     |
//!
//! ## Testing Strategy
//!
//! This is where most of the tests live. Commands are plain functions over
//! plain data, so tests build a `FormState`, call `run`, and inspect the
//! returned state and effect. No store is involved.

use crate::error::Result;
use crate::form::{FormField, FormState};
use crate::model::{Member, MemberFields, MemberId};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub mod add;
pub mod clear;
pub mod delete;
pub mod edit;
pub mod select;
pub mod update;

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Select(Option<Member>),
    Edit(FormField, String),
    SetStart(Option<NaiveDate>),
    Add,
    Update,
    Delete,
    ConfirmDelete {
        request: DeleteRequest,
        confirmed: bool,
    },
    Clear,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Select(_) => ActionKind::Select,
            Action::Edit(..) | Action::SetStart(_) => ActionKind::Edit,
            Action::Add => ActionKind::Add,
            Action::Update => ActionKind::Update,
            Action::Delete | Action::ConfirmDelete { .. } => ActionKind::Delete,
            Action::Clear => ActionKind::Clear,
        }
    }
}

/// The names actions are known by in logs and in the interactive shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Add,
    Update,
    Delete,
    Clear,
    Select,
    Edit,
}

impl ActionKind {
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Add => "add",
            ActionKind::Update => "update",
            ActionKind::Delete => "delete",
            ActionKind::Clear => "clear",
            ActionKind::Select => "select",
            ActionKind::Edit => "edit",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" => Ok(ActionKind::Add),
            "update" | "save" => Ok(ActionKind::Update),
            "delete" | "rm" => Ok(ActionKind::Delete),
            "clear" | "new" => Ok(ActionKind::Clear),
            "select" | "sel" => Ok(ActionKind::Select),
            "edit" | "set" => Ok(ActionKind::Edit),
            other => Err(format!("Unknown action: {}", other)),
        }
    }
}

/// A delete waiting for the user's yes/no.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteRequest {
    pub id: MemberId,
    pub name: String,
}

/// Work the API layer must carry out before committing a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    UnselectAll,
    Insert(MemberFields),
    Replace { id: MemberId, fields: MemberFields },
    ConfirmDelete(DeleteRequest),
    Delete(MemberId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: FormState,
    pub effect: Effect,
}

impl Transition {
    pub fn new(state: FormState, effect: Effect) -> Self {
        Self { state, effect }
    }

    /// A state change with nothing else to do.
    pub fn state(state: FormState) -> Self {
        Self::new(state, Effect::None)
    }
}

/// Route an action to its command.
pub fn dispatch(state: &FormState, action: Action, today: NaiveDate) -> Result<Transition> {
    match action {
        Action::Select(member) => Ok(select::run(state, member)),
        Action::Edit(field, value) => Ok(edit::set_field(state, field, value)),
        Action::SetStart(date) => Ok(edit::set_start(state, date)),
        Action::Add => add::run(state, today),
        Action::Update => update::run(state, today),
        Action::Delete => delete::run(state),
        Action::ConfirmDelete { request, confirmed } => {
            Ok(delete::confirm(state, request, confirmed))
        }
        Action::Clear => Ok(clear::run(today)),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// What an API call did, for the UI to render.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_members: Vec<Member>,
    pub pending_delete: Option<DeleteRequest>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_member(mut self, member: Member) -> Self {
        self.affected_members.push(member);
        self
    }

    pub fn with_pending_delete(mut self, request: DeleteRequest) -> Self {
        self.pending_delete = Some(request);
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }
}
