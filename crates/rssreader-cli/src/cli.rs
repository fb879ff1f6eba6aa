//! CLI.

use super::*;

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Log at debug level.
    #[arg(short, long, action)]
    pub debug: bool,
    /// Log at trace level.
    #[arg(short, long, action)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: CommandMode,
}

impl Cli {
    /// Load the configuration from `--config`, or the default location.
    pub fn parse_config(&self) -> Result<Config> {
        let config_path = match &self.config {
            Some(path) => path.clone(),
            None => PathBuf::from(DEFAULT_CONFIG_PATH.as_str()),
        };
        Config::load(&config_path.resolve())
    }
}

#[derive(Subcommand)]
pub enum CommandMode {
    /// Serve `/sources` and `/feeds` over http.
    Serve {
        /// Address to listen on, e.g. `0.0.0.0:8080` or `:8080`.
        #[arg(short, long, env = "RSS_READER_SERVER_ADDRESS")]
        address: Option<String>,
    },
    /// Print the merged article list once, as json.
    Feeds(FeedQueryParams),
    /// Print the configured sources, as json.
    Sources,
}
