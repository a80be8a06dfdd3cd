//! Menu loop: render, read a choice, build an intent, dispatch, print.

use std::io::{self, BufRead, Write};

use tracing::debug;

use super::console::Console;
use super::render::{render_error, render_outcome};
use crate::domain::ports::{CredentialStore, RoomTransport};
use crate::domain::{
    DomainError, Intent, LoginCredentials, MenuEntry, MenuState, Orchestrator, Outcome,
};

const INVALID_OPTION: &str = "Invalid option. Please try again.";

/// Result of reading one value from the operator.
enum Answer<T> {
    Given(T),
    Invalid(DomainError),
    Closed,
}

/// Whether the loop keeps going after an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Unwrap an [`Answer`], reporting invalid input and returning to the menu.
macro_rules! ask {
    ($console:expr, $answer:expr) => {
        match $answer? {
            Answer::Given(value) => value,
            Answer::Invalid(error) => {
                $console.say(&render_error(&error))?;
                return Ok(Flow::Continue);
            }
            Answer::Closed => return Ok(Flow::Exit),
        }
    };
}

/// Drive the menu until the operator exits or input ends.
///
/// Domain errors are printed and the current menu is shown again; only I/O
/// failures on the console end the loop early.
///
/// # Errors
///
/// Propagates console read and write failures.
pub async fn run_menu<S, T, R, W>(
    orchestrator: &mut Orchestrator<S, T>,
    console: &mut Console<R, W>,
) -> io::Result<()>
where
    S: CredentialStore,
    T: RoomTransport,
    R: BufRead,
    W: Write,
{
    loop {
        let state = orchestrator.state();
        let Some(entry) = choose_entry(state, console)? else {
            debug!("input closed; leaving menu");
            return Ok(());
        };
        debug!(?state, ?entry, "menu entry selected");
        if run_entry(entry, orchestrator, console).await? == Flow::Exit {
            return Ok(());
        }
    }
}

fn choose_entry<R, W>(
    state: MenuState,
    console: &mut Console<R, W>,
) -> io::Result<Option<MenuEntry>>
where
    R: BufRead,
    W: Write,
{
    let entries = state.entries();
    loop {
        console.say("")?;
        console.say(&format!("== {} ==", state.title()))?;
        for (position, entry) in entries.iter().enumerate() {
            console.say(&format!("{}. {}", position + 1, entry.label()))?;
        }
        let Some(choice) = console.prompt("Choose an option")? else {
            return Ok(None);
        };
        let selected = choice
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|index| entries.get(index));
        match selected {
            Some(entry) => return Ok(Some(*entry)),
            None => console.say(INVALID_OPTION)?,
        }
    }
}

async fn run_entry<S, T, R, W>(
    entry: MenuEntry,
    orchestrator: &mut Orchestrator<S, T>,
    console: &mut Console<R, W>,
) -> io::Result<Flow>
where
    S: CredentialStore,
    T: RoomTransport,
    R: BufRead,
    W: Write,
{
    let intent = match entry {
        MenuEntry::Login => Intent::Login(ask!(console, ask_credentials(console))),
        MenuEntry::CreateUser => {
            let credentials = ask!(console, ask_credentials(console));
            let is_admin = ask!(console, ask_yes_no(console, "Administrator? (y/N)"));
            Intent::Register {
                credentials,
                is_admin,
            }
        }
        MenuEntry::Exit => Intent::Exit,
        MenuEntry::ViewAllRooms => Intent::ListRooms,
        MenuEntry::Apply => {
            let application_id = ask!(console, ask_number(console, "Application ID"));
            let room_id = ask!(console, ask_number(console, "Room ID"));
            Intent::Apply {
                application_id,
                room_id,
            }
        }
        MenuEntry::Cancel => Intent::Cancel {
            application_id: ask!(console, ask_number(console, "Application ID to cancel")),
        },
        MenuEntry::ViewHistory => Intent::History,
        MenuEntry::CheckDistance => {
            let postcode = ask!(console, ask_text(console, "Your postcode"));
            let room_id = ask!(console, ask_number(console, "Room ID"));
            Intent::Proximity { postcode, room_id }
        }
        MenuEntry::CheckWeather => ask!(console, ask_weather(console)),
        MenuEntry::AcceptRoomOffer => {
            if dispatch(Intent::PendingApplications, orchestrator, console).await? == Flow::Exit {
                return Ok(Flow::Exit);
            }
            Intent::AcceptOffer {
                application_id: ask!(console, ask_number(console, "Application ID to accept")),
            }
        }
        MenuEntry::Logout => Intent::Logout,
    };
    dispatch(intent, orchestrator, console).await
}

async fn dispatch<S, T, R, W>(
    intent: Intent,
    orchestrator: &mut Orchestrator<S, T>,
    console: &mut Console<R, W>,
) -> io::Result<Flow>
where
    S: CredentialStore,
    T: RoomTransport,
    R: BufRead,
    W: Write,
{
    match orchestrator.handle(intent).await {
        Ok(outcome) => {
            console.say(&render_outcome(&outcome))?;
            Ok(if matches!(outcome, Outcome::Exit) {
                Flow::Exit
            } else {
                Flow::Continue
            })
        }
        Err(error) => {
            console.say(&render_error(&error))?;
            Ok(Flow::Continue)
        }
    }
}

fn ask_text<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    label: &str,
) -> io::Result<Answer<String>> {
    Ok(console
        .prompt(label)?
        .map_or(Answer::Closed, Answer::Given))
}

fn ask_number<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    label: &str,
) -> io::Result<Answer<i64>> {
    Ok(match console.prompt(label)? {
        None => Answer::Closed,
        Some(raw) => raw.trim().parse::<i64>().map_or_else(
            |_| {
                Answer::Invalid(DomainError::validation(format!(
                    "{label} must be a whole number."
                )))
            },
            Answer::Given,
        ),
    })
}

fn ask_yes_no<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    label: &str,
) -> io::Result<Answer<bool>> {
    Ok(match console.prompt(label)? {
        None => Answer::Closed,
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "" | "n" | "no" => Answer::Given(false),
            "y" | "yes" => Answer::Given(true),
            _ => Answer::Invalid(DomainError::validation("Please answer y or n.")),
        },
    })
}

fn ask_credentials<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> io::Result<Answer<LoginCredentials>> {
    let Some(username) = console.prompt("Username")? else {
        return Ok(Answer::Closed);
    };
    let Some(password) = console.prompt("Password")? else {
        return Ok(Answer::Closed);
    };
    Ok(LoginCredentials::try_from_parts(&username, &password).map_or_else(
        |error| Answer::Invalid(DomainError::validation(format!("Cannot continue: {error}."))),
        Answer::Given,
    ))
}

fn ask_weather<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<Answer<Intent>> {
    let Some(choice) = console.prompt("Look up weather by 1) room ID or 2) postcode")? else {
        return Ok(Answer::Closed);
    };
    match choice.trim() {
        "1" => Ok(match ask_number(console, "Room ID")? {
            Answer::Given(room_id) => Answer::Given(Intent::WeatherByRoom { room_id }),
            Answer::Invalid(error) => Answer::Invalid(error),
            Answer::Closed => Answer::Closed,
        }),
        "2" => Ok(match ask_text(console, "Postcode")? {
            Answer::Given(postcode) => Answer::Given(Intent::WeatherByPostcode { postcode }),
            Answer::Invalid(error) => Answer::Invalid(error),
            Answer::Closed => Answer::Closed,
        }),
        _ => Ok(Answer::Invalid(DomainError::validation(INVALID_OPTION))),
    }
}
