//! The operator's session: at most one authenticated identity and its role.
//!
//! A [`Session`] is an explicit value owned by the orchestrator and lent to
//! the services that need the current identity. The role is captured from the
//! credential record at login and is not re-read until the next login.

use super::user::{UserRecord, Username};

/// Role derived from a credential record's admin flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// No identity is established.
    Anonymous,
    /// Ordinary dormitory resident.
    Resident,
    /// Administrator who accepts room offers.
    Admin,
}

impl Role {
    /// Map a stored admin flag onto an authenticated role.
    #[must_use]
    pub const fn from_admin_flag(is_admin: bool) -> Self {
        if is_admin { Self::Admin } else { Self::Resident }
    }
}

/// Authenticated identity for the running client.
///
/// ## Invariants
/// - `role` is [`Role::Anonymous`] exactly when `identity` is `None`.
///
/// # Examples
/// ```
/// use globaldorm_client::domain::{Role, Session, UserRecord, Username, hash_password};
///
/// let mut session = Session::default();
/// assert_eq!(session.current_role(), Role::Anonymous);
///
/// let record = UserRecord::new(Username::new("alice").unwrap(), hash_password("pw1"), false);
/// session.login(&record);
/// assert_eq!(session.current_role(), Role::Resident);
///
/// session.logout();
/// assert!(session.identity().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    identity: Option<Identity>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Identity {
    username: Username,
    role: Role,
}

impl Session {
    /// Establish `record` as the session identity.
    ///
    /// Credential verification happens in
    /// [`AccountService::login`](super::AccountService::login); this only
    /// records the outcome.
    pub fn login(&mut self, record: &UserRecord) {
        self.identity = Some(Identity {
            username: record.username().clone(),
            role: record.role(),
        });
    }

    /// Clear identity and role unconditionally.
    pub fn logout(&mut self) {
        self.identity = None;
    }

    /// Role used to gate which intents are offered.
    #[must_use]
    pub fn current_role(&self) -> Role {
        self.identity
            .as_ref()
            .map_or(Role::Anonymous, |identity| identity.role)
    }

    /// Authenticated username, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&Username> {
        self.identity.as_ref().map(|identity| &identity.username)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::hash_password;
    use rstest::{fixture, rstest};

    fn record(name: &str, is_admin: bool) -> UserRecord {
        UserRecord::new(
            Username::new(name).expect("valid username"),
            hash_password("pw"),
            is_admin,
        )
    }

    #[fixture]
    fn session() -> Session {
        Session::default()
    }

    #[rstest]
    fn new_session_is_anonymous(session: Session) {
        assert_eq!(session.current_role(), Role::Anonymous);
        assert!(session.identity().is_none());
    }

    #[rstest]
    #[case(false, Role::Resident)]
    #[case(true, Role::Admin)]
    fn login_captures_identity_and_role(
        mut session: Session,
        #[case] is_admin: bool,
        #[case] expected: Role,
    ) {
        session.login(&record("alice", is_admin));
        assert_eq!(session.current_role(), expected);
        assert_eq!(
            session.identity().map(ToString::to_string),
            Some("alice".to_owned())
        );
    }

    #[rstest]
    fn logout_clears_identity_and_role(mut session: Session) {
        session.login(&record("bob", true));
        session.logout();
        assert_eq!(session.current_role(), Role::Anonymous);
        assert!(session.identity().is_none());
    }

    #[rstest]
    fn logout_on_anonymous_session_is_harmless(mut session: Session) {
        session.logout();
        assert_eq!(session, Session::default());
    }

    #[rstest]
    fn second_login_replaces_previous_identity(mut session: Session) {
        session.login(&record("bob", true));
        session.login(&record("alice", false));
        assert_eq!(session.current_role(), Role::Resident);
        assert_eq!(
            session.identity().map(ToString::to_string),
            Some("alice".to_owned())
        );
    }
}
