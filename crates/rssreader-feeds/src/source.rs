//! Sources and the source registry.

use super::*;

/// A configured feed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    /// Identifier used to select the source.
    pub id: String,
    /// Url of the feed document.
    pub url: String,
    /// Feed title.
    pub title: String,
    /// Feed-level categories.
    pub categories: Vec<String>,
    /// Feed description.
    pub description: String,
}

impl Source {
    /// Create a source without metadata.
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            title: String::new(),
            categories: Vec::new(),
            description: String::new(),
        }
    }

    /// Name to report the source by: its title, or its id if untitled.
    pub fn name(&self) -> &str {
        match self.title.is_empty() {
            true => &self.id,
            false => &self.title,
        }
    }

    /// Fill in title, description, and categories from fetched metadata.
    pub fn with_metadata(mut self, metadata: FeedMetadata) -> Self {
        self.title = metadata.title;
        self.description = metadata.description;
        self.categories = metadata.categories;
        self
    }
}

/// Read-only collection of configured sources.
/// Built once; lookups never mutate, so it can be shared between requests.
#[derive(Clone, Debug, Default)]
pub struct SourceRegistry {
    /// Sources in configuration order.
    sources: Vec<Source>,
    /// Map of source id to position in `sources`.
    ids: HashMap<String, usize>,
}

impl SourceRegistry {
    /// Create a registry, rejecting duplicate ids.
    pub fn new(sources: Vec<Source>) -> Result<Self> {
        let mut ids = HashMap::with_capacity(sources.len());
        for (position, source) in sources.iter().enumerate() {
            if ids.insert(source.id.clone(), position).is_some() {
                return Err(Error::DuplicateSource(source.id.clone()));
            }
        }
        Ok(Self { sources, ids })
    }

    /// All sources, in configuration order.
    pub fn all(&self) -> &[Source] {
        &self.sources
    }

    /// Find a source by id.
    pub fn get(&self, id: &str) -> Result<&Source> {
        match self.ids.get(id) {
            Some(position) => Ok(&self.sources[*position]),
            None => Err(Error::SourceNotFound(id.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
