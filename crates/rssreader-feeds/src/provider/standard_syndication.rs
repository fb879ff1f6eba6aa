//! Atom and RSS over HTTP.

use super::*;

/// Fetches RSS/Atom documents over HTTP.
#[derive(Clone, Debug)]
pub struct StandardSyndication {
    client: reqwest::Client,
}

impl StandardSyndication {
    /// Create a new standard syndication provider.
    /// If the user agent is not set, none is sent.
    pub fn new(user_agent: Option<String>) -> Result<Self> {
        let builder = match &user_agent {
            Some(user_agent) => {
                reqwest::Client::builder().user_agent(user_agent)
            }
            None => reqwest::Client::builder(),
        };
        let client = builder
            .build()
            .map_err(|e| Error::Client(e.to_string()))?;
        Ok(Self { client })
    }

    /// Download the document at `url`.
    async fn get(&self, url: &str) -> Result<String> {
        let request_error = |e: reqwest::Error| Error::Request {
            url: url.to_string(),
            reason: e.to_string(),
        };
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(request_error)?
            .error_for_status()
            .map_err(request_error)?;
        response.text().await.map_err(request_error)
    }
}

#[feed_trait]
impl FeedProvider for StandardSyndication {
    async fn fetch_articles(&self, source: &Source) -> Result<Vec<Article>> {
        let body = self.get(&source.url).await?;
        let document = Document::parse(&body, &source.url)?;
        let articles = document.articles(source.name());
        tracing::trace!(
            "Parsed {} articles from {}.",
            articles.len(),
            source.url
        );
        Ok(articles)
    }

    async fn fetch_metadata(&self, url: &str) -> Result<FeedMetadata> {
        let body = self.get(url).await?;
        Ok(Document::parse(&body, url)?.metadata())
    }
}

/// A parsed feed document.
#[derive(Debug)]
pub(crate) enum Document {
    Atom(atom_syndication::Feed),
    Rss(rss::Channel),
}

impl Document {
    /// Parse a feed from the body text, trying atom first.
    pub(crate) fn parse(body: &str, url: &str) -> Result<Self> {
        let atom_error = match body.parse::<atom_syndication::Feed>() {
            Ok(feed) => return Ok(Document::Atom(feed)),
            Err(e) => e,
        };
        let rss_error = match body.parse::<rss::Channel>() {
            Ok(channel) => return Ok(Document::Rss(channel)),
            Err(e) => e,
        };

        tracing::warn!("Unable to parse feed `{}` as atom or rss", url);
        Err(Error::Parse {
            url: url.to_string(),
            reason: format!(" atom: {atom_error}; rss: {rss_error}"),
        })
    }

    /// Feed-level metadata.
    pub(crate) fn metadata(&self) -> FeedMetadata {
        match self {
            Document::Atom(feed) => FeedMetadata {
                title: feed.title().value.clone(),
                description: feed
                    .subtitle()
                    .map(|subtitle| subtitle.value.clone())
                    .unwrap_or_default(),
                categories: feed
                    .categories()
                    .iter()
                    .map(|category| category.term().to_string())
                    .collect(),
            },
            Document::Rss(channel) => FeedMetadata {
                title: channel.title().to_string(),
                description: channel.description().to_string(),
                categories: channel
                    .categories()
                    .iter()
                    .map(|category| category.name().to_string())
                    .collect(),
            },
        }
    }

    /// All articles in the document, attributed to `feed_name`.
    pub(crate) fn articles(&self, feed_name: &str) -> Vec<Article> {
        match self {
            Document::Atom(feed) => feed
                .entries()
                .iter()
                .map(|entry| Document::parse_atom(entry, feed_name))
                .collect(),
            Document::Rss(channel) => channel
                .items()
                .iter()
                .map(|item| Document::parse_rss(item, feed_name))
                .collect(),
        }
    }

    /// Parse an atom entry.
    fn parse_atom(
        atom_entry: &atom_syndication::Entry,
        feed_name: &str,
    ) -> Article {
        let mut parsed = ArticleBuilder::new();
        parsed
            .title(atom_entry.title().value.clone())
            .publication_date(DateTime::from_chrono(
                atom_entry
                    .published()
                    .unwrap_or_else(|| atom_entry.updated())
                    .to_utc(),
            ))
            .feed_name(feed_name)
            .description(match atom_entry.summary() {
                Some(summary) => summary.value.clone(),
                None => match atom_entry.content() {
                    Some(content) => content.value().unwrap_or("").to_string(),
                    None => String::new(),
                },
            });
        if let Some(link) = atom_entry.links().first() {
            parsed.link(link.href());
        }
        for category in atom_entry.categories() {
            parsed.category(category.term());
        }
        parsed.build()
    }

    /// Parse an rss item.
    /// Items without a readable date are kept dateless.
    fn parse_rss(rss_entry: &rss::Item, feed_name: &str) -> Article {
        let mut parsed = ArticleBuilder::new();
        parsed
            .title(rss_entry.title().unwrap_or(""))
            .feed_name(feed_name)
            .description(match rss_entry.description() {
                Some(description) => description,
                None => rss_entry.content().unwrap_or(""),
            });

        let date = 'date: {
            let pub_date = rss_entry.pub_date().unwrap_or("");
            if let Ok(dt) = DateTime::try_from(pub_date) {
                break 'date Some(dt);
            }
            if let Some(dc) = rss_entry.dublin_core_ext() {
                for date in dc.dates() {
                    if let Ok(dt) = DateTime::try_from(date) {
                        break 'date Some(dt);
                    }
                }
            }
            None
        };
        if let Some(date) = date {
            parsed.publication_date(date);
        }

        if let Some(link) = rss_entry.link() {
            parsed.link(link);
        }
        for category in rss_entry.categories() {
            parsed.category(category.name());
        }
        if let Some(dc) = rss_entry.dublin_core_ext() {
            for subject in dc.subjects() {
                parsed.category(subject.as_str());
            }
        }
        parsed.build()
    }
}
