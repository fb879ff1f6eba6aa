//! rssreader configuration.

use super::*;

/// Configuration for rssreader.
/// This is parsed from the toml rssreader configuration file.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Address to serve on.
    pub address: Option<String>,
    /// Log file.
    pub log: Option<String>,
    /// The user agent used for feed requests.
    /// Without specifying, no user agent is used.
    #[serde(default, alias = "user-agent")]
    pub user_agent: Option<String>,
    /// Configured sources, in the order they are listed and merged.
    #[serde(default = "Config::default_sources")]
    pub sources: Vec<SourceDefinition>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: None,
            log: None,
            user_agent: None,
            sources: Config::default_sources(),
        }
    }
}

impl Config {
    /// Read the configuration file. A missing file is created empty, which
    /// configures the default sources.
    pub fn load(path: &Path) -> Result<Config> {
        if let Some(parent_dir) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent_dir) {
                bail!("Unable to create config directory {parent_dir:?}: {e}.");
            }
        }
        let created = !path.exists();
        // Opening for append creates the file without truncating it.
        if let Err(e) =
            std::fs::OpenOptions::new().append(true).create(true).open(path)
        {
            bail!("Unable to open config file {path:?}: {e}.");
        }
        if created {
            tracing::debug!("Created empty config file at {path:?}.");
        }

        let config_data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) => bail!("Unable to read config file {path:?}: {e}."),
        };
        match toml::from_str(&config_data) {
            Ok(config) => Ok(config),
            Err(e) => bail!("Configuration file is not valid: {e}."),
        }
    }

    /// Create the source registry from the configured sources.
    /// Sources without a configured title are described by fetching their
    /// feed once.
    pub async fn registry(
        &self,
        provider: &dyn feeds::FeedProvider,
    ) -> Result<feeds::SourceRegistry> {
        let mut sources = Vec::with_capacity(self.sources.len());
        for definition in &self.sources {
            let source = match definition.resolve(provider).await {
                Ok(source) => source,
                Err(e) => {
                    bail!("Error reading source {}: {}", definition.id, e)
                }
            };
            tracing::debug!("Added source {} ({}).", source.id, source.name());
            sources.push(source);
        }
        Ok(feeds::SourceRegistry::new(sources)?)
    }

    /// Address to serve on: the cli flag, then the configuration, then the
    /// default. Go-style `:port` addresses listen on every interface.
    pub fn address(&self, cli_address: Option<&str>) -> String {
        let address = cli_address
            .or(self.address.as_deref())
            .unwrap_or(DEFAULT_ADDRESS);
        match address.starts_with(':') {
            true => format!("0.0.0.0{address}"),
            false => address.to_string(),
        }
    }

    fn default_sources() -> Vec<SourceDefinition> {
        vec![
            SourceDefinition::new(
                "1",
                "http://feeds.bbci.co.uk/news/uk/rss.xml",
            ),
            SourceDefinition::new(
                "2",
                "http://feeds.bbci.co.uk/news/technology/rss.xml",
            ),
            SourceDefinition::new(
                "3",
                "http://feeds.reuters.com/reuters/UKdomesticNews?format=xml",
            ),
            SourceDefinition::new(
                "4",
                "http://feeds.reuters.com/reuters/technologyNews?format=xml",
            ),
        ]
    }
}

/// A source as written in the configuration file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceDefinition {
    /// Source id.
    pub id: String,
    /// Feed url.
    pub url: String,
    /// Title. When missing, the feed is fetched for its metadata.
    pub title: Option<String>,
    /// Description override.
    pub description: Option<String>,
    /// Categories override.
    pub categories: Option<Vec<String>>,
}

impl SourceDefinition {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            title: None,
            description: None,
            categories: None,
        }
    }

    /// Build the source, fetching feed metadata if no title is configured.
    pub async fn resolve(
        &self,
        provider: &dyn feeds::FeedProvider,
    ) -> feeds::Result<feeds::Source> {
        let mut source = feeds::Source::new(&self.id, &self.url);
        match &self.title {
            Some(title) => source.title = title.clone(),
            None => {
                let metadata = provider.fetch_metadata(&self.url).await?;
                source = source.with_metadata(metadata);
            }
        }
        if let Some(description) = &self.description {
            source.description = description.clone();
        }
        if let Some(categories) = &self.categories {
            source.categories = categories.clone();
        }
        Ok(source)
    }
}
