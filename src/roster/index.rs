//! # Row Selection
//!
//! Members are addressed in two ways from the outside:
//!
//! - **Row number**: the 1-based position in the current list view (`3`).
//!   Convenient, but only meaningful against the list the user just saw.
//! - **Id**: the full store id (`6f9619ff-8b86-4d11-b42d-00c04fc964ff`).
//!   Stable across reloads.

use crate::model::MemberId;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSelector {
    Row(usize),
    Id(MemberId),
}

impl fmt::Display for RowSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowSelector::Row(n) => write!(f, "{}", n),
            RowSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for RowSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            if n == 0 {
                return Err("Row numbers start at 1".to_string());
            }
            return Ok(RowSelector::Row(n));
        }
        if let Ok(id) = s.parse::<MemberId>() {
            return Ok(RowSelector::Id(id));
        }
        Err(format!("Invalid row: {} (expected a row number or member id)", s))
    }
}
