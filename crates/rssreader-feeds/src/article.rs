//! Feed article.

use super::*;

/// An article from a feed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Article {
    /// Article title.
    title: String,
    /// Article publication date, if the feed provided one.
    publication_date: Option<DateTime>,
    /// Categories, in feed order.
    categories: Vec<String>,
    /// Title of the feed the article came from.
    feed_name: String,
    /// Article description.
    description: String,
    /// Article link.
    link: String,
}

impl Article {
    /// Get article title.
    pub fn title(&self) -> &String {
        &self.title
    }

    /// Get article publication date.
    pub fn publication_date(&self) -> Option<&DateTime> {
        self.publication_date.as_ref()
    }

    /// Get the categories.
    pub fn categories(&self) -> &Vec<String> {
        &self.categories
    }

    /// Check if the article carries a category. Case-sensitive.
    pub fn has_category(&self, category: impl AsRef<str>) -> bool {
        self.categories.iter().any(|c| c == category.as_ref())
    }

    /// Get the feed name.
    pub fn feed_name(&self) -> &String {
        &self.feed_name
    }

    /// Get article description.
    pub fn description(&self) -> &String {
        &self.description
    }

    /// Get article link.
    pub fn link(&self) -> &String {
        &self.link
    }
}

/// Builder helper for articles.
#[derive(Default)]
pub struct ArticleBuilder {
    title: Option<String>,
    publication_date: Option<DateTime>,
    categories: Vec<String>,
    feed_name: Option<String>,
    description: Option<String>,
    link: Option<String>,
}

impl ArticleBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    /// Set the publication date.
    pub fn publication_date(&mut self, date: DateTime) -> &mut Self {
        self.publication_date = Some(date);
        self
    }

    /// Add a category.
    pub fn category(&mut self, category: impl Into<String>) -> &mut Self {
        self.categories.push(category.into());
        self
    }

    /// Set the feed name.
    pub fn feed_name(&mut self, feed_name: impl Into<String>) -> &mut Self {
        self.feed_name = Some(feed_name.into());
        self
    }

    /// Set the description.
    pub fn description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    /// Set the link.
    pub fn link(&mut self, link: impl Into<String>) -> &mut Self {
        self.link = Some(link.into());
        self
    }

    /// Build into an article.
    pub fn build(&self) -> Article {
        Article {
            title: self.title.clone().unwrap_or_default(),
            publication_date: self.publication_date,
            categories: self.categories.clone(),
            feed_name: self.feed_name.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            link: self.link.clone().unwrap_or_default(),
        }
    }
}

impl From<ArticleBuilder> for Article {
    fn from(value: ArticleBuilder) -> Self {
        value.build()
    }
}
