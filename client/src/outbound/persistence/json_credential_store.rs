//! Credential store backed by a JSON array on disk.
//!
//! The document is read in full on every load and rewritten in full on every
//! save. Access goes through a `cap_std` directory handle opened once for the
//! document's parent directory.

use std::collections::HashSet;
use std::io::ErrorKind;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::{info, warn};

use super::atomic_io::write_atomic;
use crate::domain::UserRecord;
use crate::domain::ports::{CredentialStore, CredentialStoreError};

const EMPTY_DOCUMENT: &str = "[]\n";

/// JSON file credential store.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use globaldorm_client::domain::ports::CredentialStore;
/// use globaldorm_client::outbound::persistence::JsonFileCredentialStore;
///
/// let store = JsonFileCredentialStore::open(Utf8Path::new("users.json"))?;
/// let records = store.load()?;
/// println!("{} users", records.len());
/// # Ok::<(), globaldorm_client::domain::ports::CredentialStoreError>(())
/// ```
#[derive(Debug)]
pub struct JsonFileCredentialStore {
    dir: Dir,
    file_name: Utf8PathBuf,
    path: Utf8PathBuf,
}

impl JsonFileCredentialStore {
    /// Open the store at `path`. The document itself is created lazily on
    /// the first load.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialStoreError::Io`] when `path` has no file name or
    /// its parent directory cannot be opened.
    pub fn open(path: &Utf8Path) -> Result<Self, CredentialStoreError> {
        let file_name = path
            .file_name()
            .ok_or_else(|| CredentialStoreError::io(path.as_str(), "path has no file name"))?;
        let parent = match path.parent() {
            Some(dir_path) if !dir_path.as_str().is_empty() => dir_path,
            _ => Utf8Path::new("."),
        };
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|err| CredentialStoreError::io(path.as_str(), err.to_string()))?;
        Ok(Self {
            dir,
            file_name: Utf8PathBuf::from(file_name),
            path: path.to_path_buf(),
        })
    }

    /// Location of the document as configured.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn initialise(&self) -> Result<(), CredentialStoreError> {
        write_atomic(&self.dir, &self.file_name, &self.path, EMPTY_DOCUMENT)?;
        info!(path = %self.path, "created empty credential document");
        Ok(())
    }

    fn corrupt(&self, message: impl Into<String>) -> CredentialStoreError {
        let detail: String = message.into();
        warn!(path = %self.path, message = %detail, "credential document rejected");
        CredentialStoreError::corrupt(self.path.as_str(), detail)
    }

    fn parse(&self, contents: &str) -> Result<Vec<UserRecord>, CredentialStoreError> {
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        let records: Vec<UserRecord> =
            serde_json::from_str(contents).map_err(|err| self.corrupt(err.to_string()))?;

        let mut seen = HashSet::with_capacity(records.len());
        if let Some(duplicate) = records
            .iter()
            .map(UserRecord::username)
            .find(|username| !seen.insert(*username))
        {
            return Err(self.corrupt(format!("username '{duplicate}' appears more than once")));
        }
        Ok(records)
    }
}

impl CredentialStore for JsonFileCredentialStore {
    fn load(&self) -> Result<Vec<UserRecord>, CredentialStoreError> {
        match self.dir.read_to_string(&self.file_name) {
            Ok(contents) => self.parse(&contents),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                self.initialise()?;
                Ok(Vec::new())
            }
            Err(err) => Err(CredentialStoreError::io(self.path.as_str(), err.to_string())),
        }
    }

    fn save(&self, records: &[UserRecord]) -> Result<(), CredentialStoreError> {
        let mut contents = serde_json::to_string_pretty(records)
            .map_err(|err| CredentialStoreError::io(self.path.as_str(), err.to_string()))?;
        contents.push('\n');
        write_atomic(&self.dir, &self.file_name, &self.path, &contents)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the JSON document contract.
    use super::*;
    use crate::domain::{Username, hash_password};
    use crate::test_support::UsersWorkspace;
    use crate::test_support::cap_fs::{path_exists, read_file_to_string, write_file};
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    struct Workspace(UsersWorkspace);

    impl Workspace {
        fn path(&self) -> &Utf8Path {
            self.0.path()
        }

        fn store(&self) -> JsonFileCredentialStore {
            JsonFileCredentialStore::open(self.path()).expect("open store")
        }

        fn write(&self, contents: &str) {
            write_file(self.path(), contents).expect("seed document");
        }

        fn read(&self) -> String {
            read_file_to_string(self.path()).expect("read document")
        }
    }

    #[fixture]
    fn workspace() -> Workspace {
        Workspace(UsersWorkspace::new().expect("temp workspace"))
    }

    fn record(name: &str, password: &str, is_admin: bool) -> UserRecord {
        UserRecord::new(
            Username::new(name).expect("valid username"),
            hash_password(password),
            is_admin,
        )
    }

    #[rstest]
    fn missing_document_is_created_empty(workspace: Workspace) {
        let records = workspace.store().load().expect("load");
        assert!(records.is_empty());
        assert_eq!(workspace.read().trim(), "[]");
    }

    #[rstest]
    #[case("")]
    #[case("  \n")]
    #[case("[]")]
    fn empty_documents_load_without_rewrite(workspace: Workspace, #[case] contents: &str) {
        workspace.write(contents);
        assert!(workspace.store().load().expect("load").is_empty());
        assert_eq!(workspace.read(), contents);
    }

    #[rstest]
    fn registration_round_trips_through_disk(workspace: Workspace) {
        let store = workspace.store();
        store
            .register(record("alice", "pw1", false))
            .expect("register alice");
        store
            .register(record("bob", "pw2", true))
            .expect("register bob");

        let document: Value = serde_json::from_str(&workspace.read()).expect("valid json");
        assert_eq!(
            document,
            json!([
                {"username": "alice", "password": hash_password("pw1").as_str(), "isAdmin": false},
                {"username": "bob", "password": hash_password("pw2").as_str(), "isAdmin": true},
            ])
        );

        let reopened = workspace.store();
        let bob = Username::new("bob").expect("valid username");
        let found = reopened.find_credential(&bob).expect("lookup");
        assert_eq!(found.map(|r| r.is_admin()), Some(true));
    }

    #[rstest]
    fn duplicate_registration_leaves_document_unchanged(workspace: Workspace) {
        let store = workspace.store();
        store
            .register(record("alice", "pw1", false))
            .expect("register");
        let before = workspace.read();

        let error = store
            .register(record("alice", "pw9", true))
            .expect_err("duplicate");
        assert!(matches!(error, CredentialStoreError::AlreadyExists { .. }));
        assert_eq!(workspace.read(), before);
    }

    #[rstest]
    fn legacy_records_without_admin_flag_load_as_residents(workspace: Workspace) {
        workspace.write(
            &json!([{"username": "legacy", "password": hash_password("old").as_str()}])
                .to_string(),
        );
        let records = workspace.store().load().expect("load");
        assert_eq!(records.len(), 1);
        assert!(records.iter().all(|r| !r.is_admin()));
    }

    #[rstest]
    #[case("{\"username\": \"alice\"}")]
    #[case("not json")]
    #[case("[{\"username\": \"alice\", \"password\": \"plaintext\"}]")]
    #[case(concat!(
        "[{\"username\": \"\", \"password\": ",
        "\"e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855\"}]"
    ))]
    fn malformed_documents_are_corrupt_and_preserved(
        workspace: Workspace,
        #[case] contents: &str,
    ) {
        workspace.write(contents);
        let error = workspace.store().load().expect_err("corrupt document");
        assert!(matches!(error, CredentialStoreError::Corrupt { .. }));
        assert_eq!(workspace.read(), contents);
    }

    #[rstest]
    fn duplicate_usernames_in_document_are_corrupt(workspace: Workspace) {
        let digest = hash_password("pw");
        workspace.write(
            &json!([
                {"username": "alice", "password": digest.as_str()},
                {"username": "alice", "password": digest.as_str(), "isAdmin": true},
            ])
            .to_string(),
        );
        let error = workspace.store().load().expect_err("duplicate usernames");
        assert!(matches!(
            error,
            CredentialStoreError::Corrupt { ref message, .. } if message.contains("alice")
        ));
    }

    #[rstest]
    fn corrupt_document_blocks_registration(workspace: Workspace) {
        workspace.write("garbage");
        let error = workspace
            .store()
            .register(record("alice", "pw1", false))
            .expect_err("must not overwrite corrupt data");
        assert!(matches!(error, CredentialStoreError::Corrupt { .. }));
        assert_eq!(workspace.read(), "garbage");
    }

    #[rstest]
    fn missing_parent_directory_is_unavailable(workspace: Workspace) {
        let path = workspace
            .path()
            .with_file_name("absent")
            .join("users.json");
        let error = JsonFileCredentialStore::open(&path).expect_err("parent missing");
        assert!(matches!(error, CredentialStoreError::Io { .. }));
    }

    #[rstest]
    fn opening_does_not_create_document(workspace: Workspace) {
        let store = workspace.store();
        assert!(!path_exists(store.path()));
        store.load().expect("load");
        assert!(path_exists(store.path()));
    }
}
