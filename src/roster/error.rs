use crate::model::MemberId;
use crate::validation::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    /// The store could not be opened. Fatal to the session.
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Error loading members: {0}")]
    Query(String),

    #[error("Error saving changes: {0}")]
    Persistence(String),

    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("No row selected.")]
    NoSelection,

    #[error("Member not found: {0}")]
    NotFound(MemberId),

    #[error("Row {0} not found in the current list")]
    RowNotFound(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RosterError {
    /// Connection failures leave the session inoperable; everything else can
    /// be corrected or retried by the user.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RosterError::Connection(_))
    }
}

impl From<ValidationErrors> for RosterError {
    fn from(errors: ValidationErrors) -> Self {
        RosterError::Validation(errors)
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
