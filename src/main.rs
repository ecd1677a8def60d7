// Entrypoint for the packet CLI.
// - Keeps `main` small: set up logging, load config, build the client and
//   hand the parsed command to the UI layer.
// - Any failure prints `ERROR: ...` to stderr and exits non-zero.

use std::io::{self, Write};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use packet_cli::api::ApiClient;
use packet_cli::cli::Cli;
use packet_cli::config::Config;
use packet_cli::{ui, PacketError};

fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "packet=debug,packet_cli=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    if let Err(err) = run(&cli) {
        eprintln!("ERROR: {err}");
        if let Some(description) = err.description() {
            eprintln!("{description}");
        }
        std::process::exit(err.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), PacketError> {
    let config = Config::from_env()?.with_overrides(cli.server.clone(), cli.order);
    tracing::debug!(?config, "loaded configuration");

    let api = ApiClient::new(&config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    ui::dispatch(&cli.command, &api, config.order, &mut out)?;
    out.flush()?;
    Ok(())
}
