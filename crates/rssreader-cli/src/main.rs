//! rssreader.

mod cli;
mod config;
mod error;
mod logging;
mod modes;
pub mod prelude;
mod query;
mod responses;

#[cfg(test)]
mod tests;

use prelude::internal::*;
use prelude::*;

static DEFAULT_CONFIG_PATH: LazyLock<String> = LazyLock::new(|| {
    use directories::ProjectDirs;
    if let Some(dirs) = ProjectDirs::from("", "", "rssreader") {
        let mut config = dirs.config_dir().to_path_buf();
        config.push("rssreader.toml");
        String::from(config.to_string_lossy())
    } else {
        "~/.config/rssreader/rssreader.toml".to_owned()
    }
});
const DEFAULT_ADDRESS: &str = "0.0.0.0:8080";

/// Entry point for rssreader.
#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> Result<()> {
    // Initial setup.
    let cli = Cli::parse();
    let config = match cli.parse_config() {
        Ok(config) => config,
        Err(e) => bail!("Failed to parse config:\n{e}"),
    };
    setup_logging(&cli, &config)?;

    // The registry is resolved once and only read afterwards.
    let provider: Arc<dyn feeds::FeedProvider> =
        Arc::new(feeds::StandardSyndication::new(config.user_agent.clone())?);
    let registry = Arc::new(config.registry(provider.as_ref()).await?);
    tracing::info!("{} sources configured", registry.len());

    // Run the command:
    match &cli.command {
        CommandMode::Serve { address } => {
            let cancel_token = CancellationToken::new();

            // Wait for ctrl+c (top-level):
            {
                let cancel_token = cancel_token.clone();
                tokio::spawn(async move {
                    tokio::select! {
                        _ = cancel_token.cancelled() => {},
                        _ = tokio::signal::ctrl_c() => {
                            cancel_token.cancel();
                        },
                    };
                });
            }

            serve_cli(
                address.clone(),
                &config,
                AppState { registry, provider },
                cancel_token,
            )
            .await
        }
        CommandMode::Feeds(query) => {
            feeds_cli(query, AppState { registry, provider }).await
        }
        CommandMode::Sources => sources_cli(&registry),
    }
}
