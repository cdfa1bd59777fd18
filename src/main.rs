use anyhow::Result;
use clap::Parser;
use know_your_ingredient::models::Config;
use know_your_ingredient::web;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "know-your-ingredient")]
#[command(about = "Serve the food label ingredient analysis form")]
struct CliArgs {
    /// Address to bind, overriding HOST.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overriding PORT.
    #[arg(long)]
    port: Option<u16>,
}

impl CliArgs {
    fn apply(self, mut config: Config) -> Config {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "know_your_ingredient=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting know-your-ingredient");

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => args.apply(config),
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = web::serve(config).await {
        error!("Server failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
