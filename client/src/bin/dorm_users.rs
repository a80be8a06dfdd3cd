//! Provision and inspect accounts in the credential document without the
//! interactive menu.

use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use globaldorm_client::config::ClientSettings;
use globaldorm_client::domain::{AccountService, LoginCredentials, Role};
use globaldorm_client::outbound::persistence::JsonFileCredentialStore;

/// `dorm-users` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "dorm-users",
    about = "Manage accounts in the GlobalDorm credential document",
    version
)]
struct CliArgs {
    /// Credential document. Falls back to `GLOBALDORM_USERS_FILE`, then `users.json`.
    #[arg(long = "users-file", value_name = "path")]
    users_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register an account. The password is read from the first line of stdin.
    Add {
        /// Account name, compared case-sensitively.
        username: String,
        /// Grant the administrator role.
        #[arg(long)]
        admin: bool,
    },
    /// Print every account with its role.
    List,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let settings = ClientSettings::load_from_iter([OsString::from("dorm-users")])
        .map_err(|err| eyre!("failed to load client settings: {err}"))?;
    let configured_path = args.users_file.unwrap_or_else(|| settings.users_file());
    let users_file = Utf8PathBuf::from_path_buf(configured_path)
        .map_err(|path| eyre!("users file {} is not valid UTF-8", path.display()))?;

    let store = JsonFileCredentialStore::open(&users_file)
        .wrap_err_with(|| format!("failed to open credential document {users_file}"))?;
    let accounts = AccountService::new(Arc::new(store));
    let mut stdout = io::stdout().lock();

    match args.command {
        Command::Add { username, admin } => {
            let password = read_password(io::stdin().lock())?;
            let credentials = LoginCredentials::try_from_parts(&username, &password)
                .wrap_err("invalid account details")?;
            let record = accounts
                .register(&credentials, admin)
                .wrap_err("registration failed")?;
            writeln!(
                stdout,
                "Created {} ({})",
                record.username(),
                role_label(record.role())
            )?;
        }
        Command::List => {
            for record in accounts.list_users().wrap_err("failed to read accounts")? {
                writeln!(stdout, "{}\t{}", record.username(), role_label(record.role()))?;
            }
        }
    }
    Ok(())
}

fn read_password(mut input: impl BufRead) -> Result<String> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .wrap_err("failed to read password from stdin")?;
    let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed_len);
    Ok(line)
}

const fn role_label(role: Role) -> &'static str {
    match role {
        Role::Admin => "admin",
        Role::Resident | Role::Anonymous => "resident",
    }
}
