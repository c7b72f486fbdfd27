//! # List View
//!
//! The list half of the screen: the rows last fetched from the store plus at
//! most one selected row. It knows nothing about the form; every change of
//! selection is reported as a [`SelectionChanged`] which the caller feeds to
//! the `select` action.
//!
//! Loading new rows always drops the selection. A reloaded list holds fresh
//! copies of the records, so a selection carried across could point at stale
//! data.

use crate::error::{Result, RosterError};
use crate::index::RowSelector;
use crate::model::{Member, MemberId};
use serde::Serialize;

/// Emitted whenever the selected row changes. `None` means nothing is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChanged(pub Option<Member>);

/// A member together with its 1-based row number.
#[derive(Debug, Clone, Serialize)]
pub struct Row<'a> {
    pub number: usize,
    pub member: &'a Member,
    pub selected: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListView {
    rows: Vec<Member>,
    selected: Option<MemberId>,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rows and clear the selection.
    pub fn load(&mut self, rows: Vec<Member>) -> SelectionChanged {
        self.rows = rows;
        self.unselect_all()
    }

    pub fn select(&mut self, selector: &RowSelector) -> Result<SelectionChanged> {
        let member = self
            .find(selector)
            .cloned()
            .ok_or_else(|| RosterError::RowNotFound(selector.to_string()))?;
        self.selected = Some(member.id);
        Ok(SelectionChanged(Some(member)))
    }

    pub fn unselect_all(&mut self) -> SelectionChanged {
        self.selected = None;
        SelectionChanged(None)
    }

    pub fn find(&self, selector: &RowSelector) -> Option<&Member> {
        match selector {
            RowSelector::Row(n) => n.checked_sub(1).and_then(|i| self.rows.get(i)),
            RowSelector::Id(id) => self.rows.iter().find(|m| &m.id == id),
        }
    }

    pub fn members(&self) -> &[Member] {
        &self.rows
    }

    pub fn rows(&self) -> Vec<Row<'_>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, member)| Row {
                number: i + 1,
                member,
                selected: self.selected == Some(member.id),
            })
            .collect()
    }

    pub fn selected(&self) -> Option<&Member> {
        let id = self.selected?;
        self.rows.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
