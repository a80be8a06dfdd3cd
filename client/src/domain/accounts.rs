//! Account registration and login over the credential store.

use std::sync::Arc;

use tracing::{info, warn};

use super::DomainError;
use super::auth::LoginCredentials;
use super::password::hash_password;
use super::ports::{CredentialStore, CredentialStoreError};
use super::session::{Role, Session};
use super::user::UserRecord;

const LOGIN_FAILED: &str = "Invalid username or password.";

fn map_store_error(error: CredentialStoreError) -> DomainError {
    if !matches!(error, CredentialStoreError::AlreadyExists { .. }) {
        warn!(kind = error.kind(), %error, "credential store failed");
    }
    match error {
        CredentialStoreError::AlreadyExists { username } => {
            DomainError::already_exists(format!("Username '{username}' is already taken."))
        }
        CredentialStoreError::Corrupt { path, message } => DomainError::store_corrupt(format!(
            "The user file {path} is corrupt and was left untouched: {message}"
        )),
        CredentialStoreError::Io { path, message } => DomainError::store_unavailable(format!(
            "The user file {path} could not be accessed: {message}"
        )),
    }
}

/// Registration and login service.
///
/// The store is consulted on every call; nothing is cached between
/// operations.
#[derive(Clone)]
pub struct AccountService<S> {
    store: Arc<S>,
}

impl<S> AccountService<S> {
    /// Create a service over `store`.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S> AccountService<S>
where
    S: CredentialStore,
{
    /// Store a new record for `credentials`.
    ///
    /// Does not log in; the caller must still authenticate.
    pub fn register(
        &self,
        credentials: &LoginCredentials,
        is_admin: bool,
    ) -> Result<UserRecord, DomainError> {
        let record = UserRecord::new(
            credentials.username().clone(),
            hash_password(credentials.password()),
            is_admin,
        );
        self.store
            .register(record.clone())
            .map_err(map_store_error)?;
        info!(username = %record.username(), is_admin, "registered user");
        Ok(record)
    }

    /// Verify `credentials` and establish them on `session`.
    ///
    /// Unknown usernames and wrong passwords produce the same error. A failed
    /// login leaves `session` untouched.
    pub fn login(
        &self,
        credentials: &LoginCredentials,
        session: &mut Session,
    ) -> Result<Role, DomainError> {
        let matched = self
            .store
            .find_credential(credentials.username())
            .map_err(map_store_error)?
            .filter(|candidate| candidate.password_hash().matches(credentials.password()));

        let Some(record) = matched else {
            warn!(username = %credentials.username(), "login rejected");
            return Err(DomainError::unauthenticated(LOGIN_FAILED));
        };

        session.login(&record);
        info!(username = %record.username(), role = ?record.role(), "login succeeded");
        Ok(record.role())
    }

    /// Clear `session`.
    pub fn logout(&self, session: &mut Session) {
        if let Some(username) = session.identity() {
            info!(%username, "logged out");
        }
        session.logout();
    }

    /// Every stored record, in document order.
    pub fn list_users(&self) -> Result<Vec<UserRecord>, DomainError> {
        self.store.load().map_err(map_store_error)
    }
}
