use anyhow::Context;
use clap::{Parser, Subcommand};
use courses_app::courses::models::seed_catalogue;
use courses_kernel::settings::Settings;

/// Command-line entrypoint for the courses service
#[derive(Debug, Parser)]
#[command(name = "courses-cli", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Address to bind, overrides `server.host`
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on, overrides `server.port`
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the effective settings as JSON
    Settings,
    /// Print the startup catalogue as JSON
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load courses settings")?;

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }

            courses_telemetry::init(&settings.telemetry);
            tracing::info!(addr = %settings.server.bind_addr(), "serving from CLI");
            courses_app::run(settings).await
        }
        Command::Settings => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
        Command::Seed => {
            println!("{}", serde_json::to_string_pretty(&seed_catalogue())?);
            Ok(())
        }
    }
}
