use super::{DeleteOutcome, MemberStore, ReplaceOutcome};
use crate::error::{Result, RosterError};
use crate::model::{Member, MemberFields, MemberId};

/// In-memory collection for tests and throwaway sessions.
/// Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    members: Vec<Member>,
    simulate_read_error: bool,
    simulate_write_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every fetch fail with a query error.
    pub fn set_simulate_read_error(&mut self, simulate: bool) {
        self.simulate_read_error = simulate;
    }

    /// Make every insert, replace and delete fail with a persistence error.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error {
            return Err(RosterError::Persistence("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl MemberStore for InMemoryStore {
    fn fetch_all(&self) -> Result<Vec<Member>> {
        tracing::debug!(count = self.members.len(), "fetch_all (memory)");
        if self.simulate_read_error {
            return Err(RosterError::Query("Simulated read error".to_string()));
        }
        Ok(self.members.clone())
    }

    fn insert(&mut self, fields: MemberFields) -> Result<Member> {
        tracing::debug!("insert (memory)");
        self.check_writable()?;
        let member = Member::new(MemberId::generate(), fields);
        self.members.push(member.clone());
        tracing::info!(id = %member.id, "inserted member");
        Ok(member)
    }

    fn replace(&mut self, id: &MemberId, fields: MemberFields) -> Result<ReplaceOutcome> {
        tracing::debug!(%id, "replace (memory)");
        self.check_writable()?;
        match self.members.iter_mut().find(|m| &m.id == id) {
            Some(existing) => {
                existing.fields = fields;
                tracing::info!(%id, "replaced member");
                Ok(ReplaceOutcome::Replaced)
            }
            None => {
                tracing::warn!(%id, "replace matched no member");
                Ok(ReplaceOutcome::NotFound)
            }
        }
    }

    fn delete(&mut self, id: &MemberId) -> Result<DeleteOutcome> {
        tracing::debug!(%id, "delete (memory)");
        self.check_writable()?;
        let before = self.members.len();
        self.members.retain(|m| &m.id != id);
        if self.members.len() == before {
            tracing::warn!(%id, "delete matched no member");
            Ok(DeleteOutcome::NotFound)
        } else {
            tracing::info!(%id, "deleted member");
            Ok(DeleteOutcome::Deleted)
        }
    }

    fn describe(&self) -> String {
        "memory://".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use chrono::NaiveDate;

    pub fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    /// A member that passes validation.
    pub fn valid_fields(first: &str, last: &str) -> MemberFields {
        let email = format!("{}@example.fi", first.to_lowercase());
        MemberFields::new(first, last, sample_date())
            .with_postal_code("00100")
            .with_email(email)
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_members(mut self, count: usize) -> Self {
            for i in 0..count {
                let fields = valid_fields(&format!("Member{}", i + 1), "Test");
                self.store.insert(fields).unwrap();
            }
            self
        }

        pub fn with_member(mut self, first: &str, last: &str) -> Self {
            self.store.insert(valid_fields(first, last)).unwrap();
            self
        }
    }
}
