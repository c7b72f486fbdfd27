use super::{DeleteOutcome, MemberStore, ReplaceOutcome};
use crate::error::{Result, RosterError};
use crate::model::{Member, MemberFields, MemberId};
use std::fs;
use std::path::{Path, PathBuf};

/// A collection persisted as a JSON array of documents.
///
/// Every call reads the file afresh, so two sessions pointed at the same
/// directory see each other's writes (and overwrite each other's updates).
/// Writes go to a sibling temp file which is then renamed over the
/// collection, so a reader never sees a half-written document list.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Open `<root>/<database>/<collection>.json`, creating the database
    /// directory if needed. The collection file itself is created lazily on
    /// first write.
    pub fn open<P: AsRef<Path>>(root: P, database: &str, collection: &str) -> Result<Self> {
        let root = root.as_ref();
        if root.exists() && !root.is_dir() {
            return Err(RosterError::Connection(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let db_dir = root.join(database);
        fs::create_dir_all(&db_dir).map_err(|e| {
            RosterError::Connection(format!("cannot open {}: {}", db_dir.display(), e))
        })?;

        let store = Self {
            path: db_dir.join(format!("{}.json", collection)),
        };
        // An existing collection must be readable before the session starts.
        store.load().map_err(|e| match e {
            RosterError::Query(msg) => RosterError::Connection(format!("cannot read {}", msg)),
            other => other,
        })?;

        tracing::debug!(path = %store.path.display(), "opened json collection");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Member>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| RosterError::Query(format!("{}: {}", self.path.display(), e)))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content)
            .map_err(|e| RosterError::Query(format!("{}: {}", self.path.display(), e)))
    }

    fn save(&self, members: &[Member]) -> Result<()> {
        let content = serde_json::to_string_pretty(members)
            .map_err(|e| RosterError::Persistence(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .map_err(|e| RosterError::Persistence(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| RosterError::Persistence(format!("{}: {}", self.path.display(), e)))?;
        Ok(())
    }

    /// Reads for a write path: a failure here aborts the write.
    fn load_for_write(&self) -> Result<Vec<Member>> {
        self.load().map_err(|e| match e {
            RosterError::Query(msg) => RosterError::Persistence(msg),
            other => other,
        })
    }
}

impl MemberStore for JsonStore {
    fn fetch_all(&self) -> Result<Vec<Member>> {
        tracing::debug!(path = %self.path.display(), "fetch_all");
        let members = self.load()?;
        tracing::debug!(count = members.len(), "fetched members");
        Ok(members)
    }

    fn insert(&mut self, fields: MemberFields) -> Result<Member> {
        tracing::debug!(path = %self.path.display(), "insert");
        let mut members = self.load_for_write()?;

        let mut id = MemberId::generate();
        while members.iter().any(|m| m.id == id) {
            id = MemberId::generate();
        }

        let member = Member::new(id, fields);
        members.push(member.clone());
        self.save(&members)?;
        tracing::info!(%id, "inserted member");
        Ok(member)
    }

    fn replace(&mut self, id: &MemberId, fields: MemberFields) -> Result<ReplaceOutcome> {
        tracing::debug!(%id, "replace");
        let mut members = self.load_for_write()?;
        let Some(existing) = members.iter_mut().find(|m| &m.id == id) else {
            tracing::warn!(%id, "replace matched no member");
            return Ok(ReplaceOutcome::NotFound);
        };
        existing.fields = fields;
        self.save(&members)?;
        tracing::info!(%id, "replaced member");
        Ok(ReplaceOutcome::Replaced)
    }

    fn delete(&mut self, id: &MemberId) -> Result<DeleteOutcome> {
        tracing::debug!(%id, "delete");
        let mut members = self.load_for_write()?;
        let before = members.len();
        members.retain(|m| &m.id != id);
        if members.len() == before {
            tracing::warn!(%id, "delete matched no member");
            return Ok(DeleteOutcome::NotFound);
        }
        self.save(&members)?;
        tracing::info!(%id, "deleted member");
        Ok(DeleteOutcome::Deleted)
    }

    fn describe(&self) -> String {
        format!("file://{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn matti() -> MemberFields {
        MemberFields::new("Matti", "Meikäläinen", today())
            .with_postal_code("00100")
            .with_email("matti@example.fi")
    }

    fn open(dir: &TempDir) -> JsonStore {
        JsonStore::open(dir.path(), "MemberDatabaseDb", "members").unwrap()
    }

    #[test]
    fn empty_collection_fetches_nothing() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir);
        assert!(store.fetch_all().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn insert_round_trips_all_fields() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);

        let inserted = store.insert(matti()).unwrap();
        let fetched = store.fetch_all().unwrap();

        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].id, inserted.id);
        assert_eq!(fetched[0].fields, matti());
    }

    #[test]
    fn data_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let id = open(&dir).insert(matti()).unwrap().id;

        let reopened = open(&dir);
        let members = reopened.fetch_all().unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, id);
    }

    #[test]
    fn replace_overwrites_fields_and_keeps_id() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        let member = store.insert(matti()).unwrap();

        let mut changed = matti();
        changed.last_name = "Virtanen".to_string();
        let outcome = store.replace(&member.id, changed).unwrap();

        assert_eq!(outcome, ReplaceOutcome::Replaced);
        let members = store.fetch_all().unwrap();
        assert_eq!(members[0].id, member.id);
        assert_eq!(members[0].fields.last_name, "Virtanen");
    }

    #[test]
    fn replace_unknown_id_reports_not_found() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        store.insert(matti()).unwrap();

        let outcome = store.replace(&MemberId::generate(), matti()).unwrap();
        assert_eq!(outcome, ReplaceOutcome::NotFound);
        assert_eq!(store.fetch_all().unwrap().len(), 1);
    }

    #[test]
    fn delete_removes_record() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        let member = store.insert(matti()).unwrap();

        assert_eq!(store.delete(&member.id).unwrap(), DeleteOutcome::Deleted);
        assert!(store.fetch_all().unwrap().is_empty());
    }

    #[test]
    fn delete_unknown_id_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        store.insert(matti()).unwrap();

        assert_eq!(
            store.delete(&MemberId::generate()).unwrap(),
            DeleteOutcome::NotFound
        );
        assert_eq!(store.fetch_all().unwrap().len(), 1);
    }

    #[test]
    fn corrupt_collection_is_a_query_error() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir);
        fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(store.fetch_all(), Err(RosterError::Query(_))));
    }

    #[test]
    fn corrupt_collection_aborts_writes() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(
            store.insert(matti()),
            Err(RosterError::Persistence(_))
        ));
    }

    #[test]
    fn root_that_is_a_file_fails_to_connect() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain-file");
        fs::write(&file, "").unwrap();

        let result = JsonStore::open(&file, "MemberDatabaseDb", "members");
        assert!(matches!(result, Err(RosterError::Connection(_))));
    }

    #[test]
    fn unreadable_collection_fails_to_connect() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("MemberDatabaseDb").join("members.json")).unwrap();

        let result = JsonStore::open(dir.path(), "MemberDatabaseDb", "members");
        assert!(matches!(result, Err(RosterError::Connection(_))));
    }

    #[test]
    fn corrupt_collection_fails_to_connect() {
        let dir = TempDir::new().unwrap();
        let db = dir.path().join("MemberDatabaseDb");
        fs::create_dir_all(&db).unwrap();
        fs::write(db.join("members.json"), "{ not json").unwrap();

        let result = JsonStore::open(dir.path(), "MemberDatabaseDb", "members");
        assert!(matches!(result, Err(RosterError::Connection(_))));
    }

    #[test]
    fn writes_leave_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        store.insert(matti()).unwrap();

        assert!(!store.path().with_extension("json.tmp").exists());
    }
}
