//! # Storage Layer
//!
//! The [`MemberStore`] trait is the whole contract between roster and its
//! backing document collection: fetch everything, insert one, replace one by
//! id, delete one by id. Nothing else is needed by the layers above.
//!
//! ## Connecting
//!
//! [`connect`] turns a connection string into an open [`Collection`]:
//!
//! | Connection string  | Backend                | Collection location                          |
//! |--------------------|------------------------|----------------------------------------------|
//! | `file://<dir>`     | [`json::JsonStore`]    | `<dir>/<database>/<collection>.json`         |
//! | `memory://`        | [`memory::InMemoryStore`] | process memory, gone on exit              |
//!
//! Anything else is a [`RosterError::Connection`]. The connection is opened
//! once and held for the session; there is no reconnect.
//!
//! ## Semantics
//!
//! - No transactions and no version checks: the last write wins.
//! - A replace or delete that matches nothing is reported through
//!   [`ReplaceOutcome`] / [`DeleteOutcome`], never as an error. Callers decide.
//! - Fetch order is insertion order for both backends, but callers must not
//!   rely on it.

use crate::config::StoreConfig;
use crate::error::{Result, RosterError};
use crate::model::{Member, MemberFields, MemberId};

pub mod json;
pub mod memory;

const FILE_SCHEME: &str = "file://";
const MEMORY_SCHEME: &str = "memory://";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOutcome {
    Replaced,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Abstract interface to a collection of member documents.
pub trait MemberStore {
    /// Every record in the collection, in no guaranteed order.
    fn fetch_all(&self) -> Result<Vec<Member>>;

    /// Persist a new record under a freshly generated id.
    fn insert(&mut self, fields: MemberFields) -> Result<Member>;

    /// Overwrite every field of the record with the given id.
    fn replace(&mut self, id: &MemberId, fields: MemberFields) -> Result<ReplaceOutcome>;

    /// Remove the record with the given id.
    fn delete(&mut self, id: &MemberId) -> Result<DeleteOutcome>;

    /// Human-readable location, for logs and `config` output.
    fn describe(&self) -> String;
}

/// An open collection, whichever backend the connection string selected.
pub enum Collection {
    Json(json::JsonStore),
    Memory(memory::InMemoryStore),
}

impl MemberStore for Collection {
    fn fetch_all(&self) -> Result<Vec<Member>> {
        match self {
            Collection::Json(store) => store.fetch_all(),
            Collection::Memory(store) => store.fetch_all(),
        }
    }

    fn insert(&mut self, fields: MemberFields) -> Result<Member> {
        match self {
            Collection::Json(store) => store.insert(fields),
            Collection::Memory(store) => store.insert(fields),
        }
    }

    fn replace(&mut self, id: &MemberId, fields: MemberFields) -> Result<ReplaceOutcome> {
        match self {
            Collection::Json(store) => store.replace(id, fields),
            Collection::Memory(store) => store.replace(id, fields),
        }
    }

    fn delete(&mut self, id: &MemberId) -> Result<DeleteOutcome> {
        match self {
            Collection::Json(store) => store.delete(id),
            Collection::Memory(store) => store.delete(id),
        }
    }

    fn describe(&self) -> String {
        match self {
            Collection::Json(store) => store.describe(),
            Collection::Memory(store) => store.describe(),
        }
    }
}

/// Open the collection named by `config`.
pub fn connect(config: &StoreConfig) -> Result<Collection> {
    let uri = config.connection.trim();
    tracing::debug!(
        connection = uri,
        database = %config.database,
        collection = %config.collection,
        "connecting"
    );

    if let Some(root) = uri.strip_prefix(FILE_SCHEME) {
        if root.is_empty() {
            return Err(RosterError::Connection(format!(
                "missing directory in connection string '{}'",
                uri
            )));
        }
        let store = json::JsonStore::open(root, &config.database, &config.collection)?;
        return Ok(Collection::Json(store));
    }

    if uri == MEMORY_SCHEME || uri == "memory" {
        return Ok(Collection::Memory(memory::InMemoryStore::new()));
    }

    Err(RosterError::Connection(format!(
        "unsupported connection string '{}' (expected file://<dir> or memory://)",
        uri
    )))
}
