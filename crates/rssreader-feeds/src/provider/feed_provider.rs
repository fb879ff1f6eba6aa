//! Feed provider trait.

use super::*;

/// Retrieves articles and metadata for feeds.
#[feed_trait]
pub trait FeedProvider: Send + Sync {
    /// Fetch every current article of a source.
    /// Results come back in no particular order and are never cached.
    async fn fetch_articles(&self, source: &Source) -> Result<Vec<Article>>;

    /// Fetch the feed-level metadata of the document at `url`.
    async fn fetch_metadata(&self, url: &str) -> Result<FeedMetadata>;
}

/// Feed-level information used to describe a source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedMetadata {
    /// Feed title.
    pub title: String,
    /// Feed description.
    pub description: String,
    /// Feed categories.
    pub categories: Vec<String>,
}
