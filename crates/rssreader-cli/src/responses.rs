//! Response bodies.

use super::*;

/// One entry of `GET /sources`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SourceInfo {
    #[serde(rename = "sourceID")]
    pub source_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(rename = "sourceURL")]
    pub source_url: String,
    pub summary: String,
    pub title: String,
}

impl From<&feeds::Source> for SourceInfo {
    fn from(source: &feeds::Source) -> Self {
        Self {
            source_id: source.id.clone(),
            categories: source.categories.clone(),
            source_url: source.url.clone(),
            summary: source.description.clone(),
            title: source.title.clone(),
        }
    }
}

/// Body of `GET /sources`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SourceList {
    pub sources: Vec<SourceInfo>,
}

impl From<&feeds::SourceRegistry> for SourceList {
    fn from(registry: &feeds::SourceRegistry) -> Self {
        Self {
            sources: registry.all().iter().map(SourceInfo::from).collect(),
        }
    }
}

/// One entry of `GET /feeds`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleInfo {
    pub title: String,
    /// RFC 3339.
    pub publication_time: String,
    pub publication_unix_timestamp: i64,
    pub categories: Vec<String>,
    pub feed_title: String,
    pub description: String,
    pub link: String,
}

impl TryFrom<&feeds::Article> for ArticleInfo {
    type Error = ApiError;

    fn try_from(article: &feeds::Article) -> Result<Self, Self::Error> {
        // Merged articles always carry a date.
        let Some(date) = article.publication_date() else {
            return Err(ApiError::Internal(feeds::Error::MissingPublicationDate {
                feed: article.feed_name().clone(),
                stage: feeds::Stage::Merge,
            }));
        };
        Ok(Self {
            title: article.title().clone(),
            publication_time: date.to_rfc3339(),
            publication_unix_timestamp: date.unix_timestamp(),
            categories: article.categories().clone(),
            feed_title: article.feed_name().clone(),
            description: article.description().clone(),
            link: article.link().clone(),
        })
    }
}

/// Body of `GET /feeds`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleList {
    pub articles: Vec<ArticleInfo>,
}

impl TryFrom<&[feeds::Article]> for ArticleList {
    type Error = ApiError;

    fn try_from(articles: &[feeds::Article]) -> Result<Self, Self::Error> {
        Ok(Self {
            articles: articles
                .iter()
                .map(ArticleInfo::try_from)
                .collect::<Result<Vec<ArticleInfo>, ApiError>>()?,
        })
    }
}

/// Encode a response body, logging failures.
pub fn encode<T: Serialize>(body: &T) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| {
        tracing::error!("Error encoding the JSON response: {e}");
        ApiError::from(e)
    })
}
