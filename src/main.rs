mod cli;

use anyhow::{Context, Result};
use bistro_admin::{AdminConsole, ConnectionConfig};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::app::App;

/// Terminal admin console for a restaurant operations backend.
#[derive(Parser, Debug)]
#[command(name = "bistro-admin", version, about)]
struct Args {
    /// Base URL of the REST backend (overrides BISTRO_BASE_URL).
    #[arg(long)]
    base_url: Option<String>,
}

// The whole client is cooperatively single-threaded: network completions
// and key handling share one thread, and a modal prompt suspends both.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = ConnectionConfig::from_env().context("failed to load configuration")?;
    if let Some(base_url) = args.base_url {
        config = ConnectionConfig::new(&base_url)
            .connect_timeout(config.connect_timeout)
            .request_timeout(config.request_timeout);
    }

    let mut console =
        AdminConsole::connect(&config).context("failed to set up the backend gateway")?;
    console.refresh_all().await;

    let mut app = App::new(console);
    app.run().await?;
    Ok(())
}

fn init_tracing() {
    // Logs go to stderr; stdout belongs to the alternate-screen interface.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bistro_admin=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
