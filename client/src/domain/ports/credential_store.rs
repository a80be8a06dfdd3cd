//! Driven port for the local credential document.
//!
//! The store is the sole source of truth for identity and role. Adapters own
//! the document format; this module owns uniqueness and lookup semantics.

use std::sync::{Mutex, MutexGuard};

use super::define_port_error;
use crate::domain::{UserRecord, Username};

define_port_error! {
    /// Errors raised by credential store adapters.
    pub enum CredentialStoreError {
        /// A record with the same username is already stored.
        AlreadyExists {
            /// The taken username.
            username: String,
        } =>
            "username '{username}' is already registered",
        /// The document exists but does not have the expected shape.
        Corrupt {
            /// Configured document path.
            path: String,
            /// Parse or validation failure.
            message: String,
        } =>
            "credential document {path} is corrupt: {message}",
        /// The document could not be read or written.
        Io {
            /// Configured document path.
            path: String,
            /// Underlying I/O error text.
            message: String,
        } =>
            "credential document {path} is unavailable: {message}",
    }
}

/// Persistence contract for credential records.
///
/// `load` and `save` always move the whole document. The provided
/// `register` performs its duplicate check against a fresh load, so callers
/// never compare against a stale snapshot.
pub trait CredentialStore: Send + Sync {
    /// Read every stored record, creating an empty document when none exists.
    fn load(&self) -> Result<Vec<UserRecord>, CredentialStoreError>;

    /// Replace the document with `records`.
    fn save(&self, records: &[UserRecord]) -> Result<(), CredentialStoreError>;

    /// Append `record` unless its username is already taken.
    ///
    /// Usernames compare exactly; `"Alice"` and `"alice"` may coexist.
    fn register(&self, record: UserRecord) -> Result<(), CredentialStoreError> {
        let mut records = self.load()?;
        if records
            .iter()
            .any(|existing| existing.username() == record.username())
        {
            return Err(CredentialStoreError::already_exists(
                record.username().as_ref(),
            ));
        }
        records.push(record);
        self.save(&records)
    }

    /// Look up the record stored for `username`.
    fn find_credential(
        &self,
        username: &Username,
    ) -> Result<Option<UserRecord>, CredentialStoreError> {
        Ok(self
            .load()?
            .into_iter()
            .find(|record| record.username() == username))
    }
}

/// Process-local store used by tests and the behaviour suite.
///
/// # Examples
/// ```
/// use globaldorm_client::domain::ports::{CredentialStore, InMemoryCredentialStore};
/// use globaldorm_client::domain::{UserRecord, Username, hash_password};
///
/// let store = InMemoryCredentialStore::default();
/// let alice = Username::new("alice").unwrap();
/// store
///     .register(UserRecord::new(alice.clone(), hash_password("pw1"), false))
///     .unwrap();
/// assert!(store.find_credential(&alice).unwrap().is_some());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    records: Mutex<Vec<UserRecord>>,
}

impl InMemoryCredentialStore {
    /// Seed the store with existing records.
    #[must_use]
    pub fn with_records(records: Vec<UserRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<UserRecord>>, CredentialStoreError> {
        self.records
            .lock()
            .map_err(|_| CredentialStoreError::io("<memory>", "store lock poisoned"))
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn load(&self) -> Result<Vec<UserRecord>, CredentialStoreError> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, records: &[UserRecord]) -> Result<(), CredentialStoreError> {
        *self.lock()? = records.to_vec();
        Ok(())
    }

    // Holds the lock across check and append.
    fn register(&self, record: UserRecord) -> Result<(), CredentialStoreError> {
        let mut records = self.lock()?;
        if records
            .iter()
            .any(|existing| existing.username() == record.username())
        {
            return Err(CredentialStoreError::already_exists(
                record.username().as_ref(),
            ));
        }
        records.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::hash_password;
    use rstest::{fixture, rstest};

    fn record(name: &str, password: &str, is_admin: bool) -> UserRecord {
        UserRecord::new(
            Username::new(name).expect("valid username"),
            hash_password(password),
            is_admin,
        )
    }

    #[fixture]
    fn store() -> InMemoryCredentialStore {
        InMemoryCredentialStore::default()
    }

    #[rstest]
    fn duplicate_registration_keeps_single_record(store: InMemoryCredentialStore) {
        store
            .register(record("alice", "pw1", false))
            .expect("first registration");
        let err = store
            .register(record("alice", "other", true))
            .expect_err("duplicate must fail");

        assert_eq!(err, CredentialStoreError::already_exists("alice"));
        let records = store.load().expect("load");
        assert_eq!(records.len(), 1);
        assert!(records.first().is_some_and(|r| r.password_hash().matches("pw1")));
    }

    #[rstest]
    fn usernames_differing_in_case_are_distinct(store: InMemoryCredentialStore) {
        store
            .register(record("alice", "pw1", false))
            .expect("lower");
        store
            .register(record("Alice", "pw1", false))
            .expect("upper");
        assert_eq!(store.load().expect("load").len(), 2);
    }

    #[rstest]
    fn find_credential_returns_exact_match(store: InMemoryCredentialStore) {
        store
            .register(record("bob", "pw2", true))
            .expect("register");

        let bob = Username::new("bob").expect("valid username");
        let found = store.find_credential(&bob).expect("lookup");
        assert_eq!(found.map(|r| r.is_admin()), Some(true));

        let missing = Username::new("Bob").expect("valid username");
        assert_eq!(store.find_credential(&missing).expect("lookup"), None);
    }

    /// Store that only implements `load`/`save`, so `register` runs the
    /// provided method.
    #[derive(Default)]
    struct LoadSaveOnly(InMemoryCredentialStore);

    impl CredentialStore for LoadSaveOnly {
        fn load(&self) -> Result<Vec<UserRecord>, CredentialStoreError> {
            self.0.load()
        }

        fn save(&self, records: &[UserRecord]) -> Result<(), CredentialStoreError> {
            self.0.save(records)
        }
    }

    #[test]
    fn provided_register_rejects_duplicates_and_persists() {
        let store = LoadSaveOnly::default();
        store
            .register(record("carol", "pw", false))
            .expect("first registration");
        assert!(matches!(
            store.register(record("carol", "pw", false)),
            Err(CredentialStoreError::AlreadyExists { .. })
        ));
        assert_eq!(store.load().expect("load").len(), 1);
    }

    #[test]
    fn seeded_store_exposes_records() {
        let store = InMemoryCredentialStore::with_records(vec![record("dave", "pw", false)]);
        let dave = Username::new("dave").expect("valid username");
        assert!(store.find_credential(&dave).expect("lookup").is_some());
    }
}
