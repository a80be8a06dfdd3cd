//! Interactive GlobalDorm client: wires settings, the credential document,
//! the room-service transport and the terminal menu.

use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use globaldorm_client::config::ClientSettings;
use globaldorm_client::domain::{AccountService, Orchestrator, RoomServiceClient};
use globaldorm_client::inbound::cli::{Console, run_menu};
use globaldorm_client::outbound::http::ReqwestRoomTransport;
use globaldorm_client::outbound::persistence::JsonFileCredentialStore;

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ClientSettings::load()
        .map_err(|err| eyre!("failed to load client settings: {err}"))?;
    let base_url = settings.base_url()?;
    let users_file = Utf8PathBuf::from_path_buf(settings.users_file())
        .map_err(|path| eyre!("users file {} is not valid UTF-8", path.display()))?;

    let store = JsonFileCredentialStore::open(&users_file)
        .wrap_err_with(|| format!("failed to open credential document {users_file}"))?;
    let transport =
        ReqwestRoomTransport::new(base_url.clone()).wrap_err("failed to build HTTP client")?;
    info!(%base_url, users_file = %users_file, "client configured");

    let mut orchestrator = Orchestrator::new(
        AccountService::new(Arc::new(store)),
        RoomServiceClient::new(Arc::new(transport)),
    );
    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build client runtime")?;
    runtime
        .block_on(run_menu(&mut orchestrator, &mut console))
        .wrap_err("terminal I/O failed")?;
    Ok(())
}
