use clap::Parser;
use tracing_subscriber::EnvFilter;

use eventboard_server::client::{terminal, Controller, HttpEventsApi, TerminalUi};

/// Interactive staff client for the event board.
#[derive(Parser)]
#[command(name = "eventboard", version)]
struct Cli {
    /// Base URL of the event board server
    #[arg(long, env = "EVENTBOARD_URL", default_value = "http://localhost:3000")]
    server_url: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let api = HttpEventsApi::new(cli.server_url);
    let mut controller = Controller::new(api, TerminalUi::stdio());

    terminal::run(&mut controller).await;
}
