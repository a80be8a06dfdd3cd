//! Role-gated menu state machine and intent dispatch.
//!
//! [`MenuState::entries`] is the single authorisation table: an intent is
//! permitted exactly when one of the current state's entries offers it.
//! [`MenuState::transition`] is the single transition table.

use tracing::{debug, warn};

use super::accounts::AccountService;
use super::auth::LoginCredentials;
use super::ports::{CredentialStore, RoomTransport};
use super::remote::{DistanceQueryResult, RemoteOperationResult};
use super::room_service::RoomServiceClient;
use super::session::{Role, Session};
use super::user::Username;
use super::DomainError;

/// Menu the operator is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuState {
    /// No one is logged in.
    Unauthenticated,
    /// A resident is logged in.
    ResidentMenu,
    /// An administrator is logged in.
    AdminMenu,
}

impl MenuState {
    /// Menu shown to a session holding `role`.
    #[must_use]
    pub const fn for_role(role: Role) -> Self {
        match role {
            Role::Anonymous => Self::Unauthenticated,
            Role::Resident => Self::ResidentMenu,
            Role::Admin => Self::AdminMenu,
        }
    }

    /// Entries offered in this state, in display order.
    #[must_use]
    pub const fn entries(self) -> &'static [MenuEntry] {
        match self {
            Self::Unauthenticated => &[MenuEntry::Login, MenuEntry::CreateUser, MenuEntry::Exit],
            Self::ResidentMenu => &[
                MenuEntry::ViewAllRooms,
                MenuEntry::Apply,
                MenuEntry::Cancel,
                MenuEntry::ViewHistory,
                MenuEntry::CheckDistance,
                MenuEntry::CheckWeather,
                MenuEntry::Logout,
            ],
            Self::AdminMenu => &[MenuEntry::AcceptRoomOffer, MenuEntry::Logout],
        }
    }

    /// Whether an intent of `kind` may be dispatched in this state.
    ///
    /// # Examples
    /// ```
    /// use globaldorm_client::domain::{IntentKind, MenuState};
    ///
    /// assert!(MenuState::AdminMenu.permits(IntentKind::AcceptOffer));
    /// assert!(!MenuState::ResidentMenu.permits(IntentKind::AcceptOffer));
    /// assert!(!MenuState::AdminMenu.permits(IntentKind::Apply));
    /// ```
    #[must_use]
    pub fn permits(self, kind: IntentKind) -> bool {
        self.entries()
            .iter()
            .any(|entry| entry.intents().contains(&kind))
    }

    /// State after `outcome` was produced in this state.
    #[must_use]
    pub const fn transition(self, outcome: &Outcome) -> Self {
        match (self, outcome) {
            (Self::Unauthenticated, Outcome::LoggedIn { role, .. }) => Self::for_role(*role),
            (Self::ResidentMenu | Self::AdminMenu, Outcome::LoggedOut) => Self::Unauthenticated,
            (state, _) => state,
        }
    }

    /// Heading printed above the entries.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Unauthenticated => "GlobalDorm",
            Self::ResidentMenu => "Resident Menu",
            Self::AdminMenu => "Admin Menu",
        }
    }
}

/// One numbered line in a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuEntry {
    /// Log in.
    Login,
    /// Register a new account.
    CreateUser,
    /// Leave the client.
    Exit,
    /// List every room.
    ViewAllRooms,
    /// Apply for a room.
    Apply,
    /// Cancel an application.
    Cancel,
    /// Show the resident's applications.
    ViewHistory,
    /// Route distance to a room.
    CheckDistance,
    /// Weather by room or by postcode.
    CheckWeather,
    /// List pending applications, then accept one.
    AcceptRoomOffer,
    /// Log out.
    Logout,
}

impl MenuEntry {
    /// Label shown to the operator.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::CreateUser => "Create New User",
            Self::Exit => "Exit",
            Self::ViewAllRooms => "View All Rooms",
            Self::Apply => "Apply for a Room",
            Self::Cancel => "Cancel an Application",
            Self::ViewHistory => "View Application History",
            Self::CheckDistance => "Check Distance to a Room",
            Self::CheckWeather => "Check Weather",
            Self::AcceptRoomOffer => "Accept Room Offer",
            Self::Logout => "Logout",
        }
    }

    /// Intents this entry may dispatch.
    #[must_use]
    pub const fn intents(self) -> &'static [IntentKind] {
        match self {
            Self::Login => &[IntentKind::Login],
            Self::CreateUser => &[IntentKind::Register],
            Self::Exit => &[IntentKind::Exit],
            Self::ViewAllRooms => &[IntentKind::ListRooms],
            Self::Apply => &[IntentKind::Apply],
            Self::Cancel => &[IntentKind::Cancel],
            Self::ViewHistory => &[IntentKind::History],
            Self::CheckDistance => &[IntentKind::Proximity],
            Self::CheckWeather => &[IntentKind::WeatherByRoom, IntentKind::WeatherByPostcode],
            Self::AcceptRoomOffer => &[IntentKind::PendingApplications, IntentKind::AcceptOffer],
            Self::Logout => &[IntentKind::Logout],
        }
    }
}

/// Discriminant of an [`Intent`], used for gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentKind {
    /// See [`Intent::Login`].
    Login,
    /// See [`Intent::Register`].
    Register,
    /// See [`Intent::Exit`].
    Exit,
    /// See [`Intent::ListRooms`].
    ListRooms,
    /// See [`Intent::Apply`].
    Apply,
    /// See [`Intent::Cancel`].
    Cancel,
    /// See [`Intent::History`].
    History,
    /// See [`Intent::Proximity`].
    Proximity,
    /// See [`Intent::WeatherByRoom`].
    WeatherByRoom,
    /// See [`Intent::WeatherByPostcode`].
    WeatherByPostcode,
    /// See [`Intent::PendingApplications`].
    PendingApplications,
    /// See [`Intent::AcceptOffer`].
    AcceptOffer,
    /// See [`Intent::Logout`].
    Logout,
}

/// Operator action, independent of how it was typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Authenticate.
    Login(LoginCredentials),
    /// Create an account without logging in.
    Register {
        /// Username and password for the new account.
        credentials: LoginCredentials,
        /// Whether the account administers offers.
        is_admin: bool,
    },
    /// Leave the client.
    Exit,
    /// `GET /rooms`
    ListRooms,
    /// `POST /rooms/apply`
    Apply {
        /// Raw application id.
        application_id: i64,
        /// Raw room id.
        room_id: i64,
    },
    /// `DELETE /rooms/cancel/{applicationId}`
    Cancel {
        /// Raw application id.
        application_id: i64,
    },
    /// `GET /rooms/history/{username}`
    History,
    /// `GET /rooms/proximity`
    Proximity {
        /// Operator's postcode.
        postcode: String,
        /// Raw room id.
        room_id: i64,
    },
    /// `GET /rooms/rooms/weather`
    WeatherByRoom {
        /// Raw room id.
        room_id: i64,
    },
    /// `GET /rooms/weather`
    WeatherByPostcode {
        /// Postcode to look up.
        postcode: String,
    },
    /// `GET /rooms/applications/pending`
    PendingApplications,
    /// `PUT /rooms/accept/{applicationId}`
    AcceptOffer {
        /// Raw application id.
        application_id: i64,
    },
    /// Clear the session.
    Logout,
}

impl Intent {
    /// Gating discriminant.
    #[must_use]
    pub const fn kind(&self) -> IntentKind {
        match self {
            Self::Login(_) => IntentKind::Login,
            Self::Register { .. } => IntentKind::Register,
            Self::Exit => IntentKind::Exit,
            Self::ListRooms => IntentKind::ListRooms,
            Self::Apply { .. } => IntentKind::Apply,
            Self::Cancel { .. } => IntentKind::Cancel,
            Self::History => IntentKind::History,
            Self::Proximity { .. } => IntentKind::Proximity,
            Self::WeatherByRoom { .. } => IntentKind::WeatherByRoom,
            Self::WeatherByPostcode { .. } => IntentKind::WeatherByPostcode,
            Self::PendingApplications => IntentKind::PendingApplications,
            Self::AcceptOffer { .. } => IntentKind::AcceptOffer,
            Self::Logout => IntentKind::Logout,
        }
    }
}

/// Result of a dispatched intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Login succeeded.
    LoggedIn {
        /// Authenticated user.
        username: Username,
        /// Role captured from the record.
        role: Role,
    },
    /// An account was created.
    Registered {
        /// New account's username.
        username: Username,
    },
    /// The session was cleared.
    LoggedOut,
    /// The operator chose to leave.
    Exit,
    /// A room-service call whose body is shown as text.
    Remote(RemoteOperationResult),
    /// A proximity call.
    Distance(RemoteOperationResult<DistanceQueryResult>),
}

/// Owns the session and menu state and dispatches intents.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use globaldorm_client::domain::ports::InMemoryCredentialStore;
/// use globaldorm_client::domain::{
///     AccountService, Intent, LoginCredentials, MenuState, Orchestrator, RoomServiceClient,
/// };
/// use globaldorm_client::test_support::StubRoomTransport;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let accounts = AccountService::new(Arc::new(InMemoryCredentialStore::default()));
/// let rooms = RoomServiceClient::new(Arc::new(StubRoomTransport::default()));
/// let mut orchestrator = Orchestrator::new(accounts, rooms);
///
/// let credentials = LoginCredentials::try_from_parts("bob", "pw2").unwrap();
/// orchestrator
///     .handle(Intent::Register { credentials: credentials.clone(), is_admin: true })
///     .await
///     .unwrap();
/// orchestrator.handle(Intent::Login(credentials)).await.unwrap();
/// assert_eq!(orchestrator.state(), MenuState::AdminMenu);
/// # });
/// ```
pub struct Orchestrator<S, T> {
    accounts: AccountService<S>,
    rooms: RoomServiceClient<T>,
    session: Session,
    state: MenuState,
}

impl<S, T> Orchestrator<S, T>
where
    S: CredentialStore,
    T: RoomTransport,
{
    /// Start in [`MenuState::Unauthenticated`] with an empty session.
    #[must_use]
    pub fn new(accounts: AccountService<S>, rooms: RoomServiceClient<T>) -> Self {
        Self {
            accounts,
            rooms,
            session: Session::default(),
            state: MenuState::Unauthenticated,
        }
    }

    /// Current menu.
    #[must_use]
    pub const fn state(&self) -> MenuState {
        self.state
    }

    /// Current session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Dispatch `intent` if the current state offers it.
    ///
    /// Errors leave the state unchanged.
    pub async fn handle(&mut self, intent: Intent) -> Result<Outcome, DomainError> {
        let kind = intent.kind();
        if !self.state.permits(kind) {
            warn!(state = ?self.state, intent = ?kind, "intent not offered in current menu");
            return Err(DomainError::not_permitted(format!(
                "{kind:?} is not permitted in the {:?} state.",
                self.state
            )));
        }
        debug!(state = ?self.state, intent = ?kind, "dispatching intent");

        let outcome = self.dispatch(intent).await?;
        self.state = self.state.transition(&outcome);
        Ok(outcome)
    }

    async fn dispatch(&mut self, intent: Intent) -> Result<Outcome, DomainError> {
        let outcome = match intent {
            Intent::Login(credentials) => {
                let role = self.accounts.login(&credentials, &mut self.session)?;
                Outcome::LoggedIn {
                    username: credentials.username().clone(),
                    role,
                }
            }
            Intent::Register {
                credentials,
                is_admin,
            } => {
                let record = self.accounts.register(&credentials, is_admin)?;
                Outcome::Registered {
                    username: record.username().clone(),
                }
            }
            Intent::Exit => Outcome::Exit,
            Intent::Logout => {
                self.accounts.logout(&mut self.session);
                Outcome::LoggedOut
            }
            Intent::ListRooms => Outcome::Remote(self.rooms.list_rooms().await?),
            Intent::Apply {
                application_id,
                room_id,
            } => Outcome::Remote(
                self.rooms
                    .apply(&self.session, application_id, room_id)
                    .await?,
            ),
            Intent::Cancel { application_id } => {
                Outcome::Remote(self.rooms.cancel(application_id).await?)
            }
            Intent::History => Outcome::Remote(self.rooms.history(&self.session).await?),
            Intent::Proximity { postcode, room_id } => {
                Outcome::Distance(self.rooms.proximity(&postcode, room_id).await?)
            }
            Intent::WeatherByRoom { room_id } => {
                Outcome::Remote(self.rooms.weather_by_room(room_id).await?)
            }
            Intent::WeatherByPostcode { postcode } => {
                Outcome::Remote(self.rooms.weather_by_postcode(&postcode).await?)
            }
            Intent::PendingApplications => {
                Outcome::Remote(self.rooms.pending_applications().await?)
            }
            Intent::AcceptOffer { application_id } => {
                Outcome::Remote(self.rooms.accept_offer(application_id).await?)
            }
        };
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "menu_tests.rs"]
mod tests;
