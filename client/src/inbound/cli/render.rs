//! Text rendering of outcomes and errors.

use crate::domain::{DistanceQueryResult, DomainError, Outcome, Role};

/// Render a successful dispatch.
#[must_use]
pub fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::LoggedIn { username, role } => {
            let label = match role {
                Role::Admin => "administrator",
                Role::Resident | Role::Anonymous => "resident",
            };
            format!("Logged in as {username} ({label}).")
        }
        Outcome::Registered { username } => {
            format!("User '{username}' created. Please log in.")
        }
        Outcome::LoggedOut => "Logged out.".to_owned(),
        Outcome::Exit => "Goodbye.".to_owned(),
        Outcome::Remote(result) => match result.clone().into_result() {
            Ok(body) if body.trim().is_empty() => "Request completed.".to_owned(),
            Ok(body) => body,
            Err(error) => render_error(&error),
        },
        Outcome::Distance(result) => match result
            .clone()
            .into_result()
            .and_then(DistanceQueryResult::into_distance)
        {
            Ok(distance) => format!("Distance to room: {distance}"),
            Err(error) => render_error(&error),
        },
    }
}

/// Render a failure as one line.
#[must_use]
pub fn render_error(error: &DomainError) -> String {
    error.message().to_owned()
}
