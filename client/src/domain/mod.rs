//! Domain primitives, ports and services.
//!
//! Purpose: model the client's contracts (credential records, sessions,
//! remote operations and their outcomes, and the menu state machine) as
//! strongly typed values. Adapters translate to and from files, HTTP and the
//! terminal; nothing in here touches I/O directly.
//!
//! Public surface:
//! - DomainError / ErrorCode: failure taxonomy recovered by the menu loop.
//! - UserRecord, Username, PasswordHash, Role: credential model.
//! - Session: the single authenticated identity passed into services.
//! - AccountService: registration and login over a credential store.
//! - RoomServiceClient: one method per remote room operation.
//! - Orchestrator, MenuState, Intent: role-gated dispatch.

pub mod accounts;
pub mod auth;
pub mod error;
pub mod menu;
pub mod password;
pub mod ports;
pub mod remote;
pub mod room_service;
pub mod rooms;
pub mod session;
pub mod user;

pub use self::accounts::AccountService;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{DomainError, ErrorCode};
pub use self::menu::{Intent, IntentKind, MenuEntry, MenuState, Orchestrator, Outcome};
pub use self::password::{PasswordHash, hash_password};
pub use self::remote::{
    Distance, DistanceQueryResult, RemoteOperationResult, classify_response, interpret_distance,
};
pub use self::room_service::RoomServiceClient;
pub use self::rooms::{
    ApplicationId, ApplicationIntent, Postcode, RoomId, RoomRequest, RoomValidationError,
};
pub use self::session::{Role, Session};
pub use self::user::{UserRecord, UserValidationError, Username};

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use globaldorm_client::domain::{DomainError, DomainResult};
///
/// fn refuse() -> DomainResult<()> {
///     Err(DomainError::not_permitted("admins only"))
/// }
/// assert!(refuse().is_err());
/// ```
pub type DomainResult<T> = Result<T, DomainError>;
