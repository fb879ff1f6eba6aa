//! `/feeds` query parameters.

use super::*;

/// Articles returned when no count is given.
pub const DEFAULT_COUNT: usize = 10;

/// Raw `/feeds` parameters, from the query string or the command line.
/// Empty values count as absent.
#[derive(Clone, Debug, Default, Args)]
pub struct FeedQueryParams {
    /// Maximum number of articles (default 10).
    #[arg(long)]
    pub count: Option<String>,
    /// Only articles published at or before this unix timestamp.
    #[arg(long)]
    pub maxtimestamp: Option<String>,
    /// Comma-separated categories; articles need at least one of them.
    #[arg(long)]
    pub categories: Option<String>,
    /// Comma-separated source ids (default: all sources).
    #[arg(long)]
    pub sources: Option<String>,
}

impl FeedQueryParams {
    /// Read parameters from decoded query pairs. The first value of a
    /// repeated key wins and unknown keys are ignored.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |key: &str| {
            pairs
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.clone())
        };
        Self {
            count: first("count"),
            maxtimestamp: first("maxtimestamp"),
            categories: first("categories"),
            sources: first("sources"),
        }
    }
}

/// Validated `/feeds` request.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedQuery {
    /// Maximum number of articles.
    pub count: usize,
    /// Articles newer than this are left out.
    pub cutoff: feeds::DateTime,
    /// Allowed categories. Empty means no category filtering.
    pub categories: Vec<String>,
    /// Requested source ids. Empty means every source.
    pub sources: Vec<String>,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            cutoff: feeds::DateTime::max(),
            categories: Vec::new(),
            sources: Vec::new(),
        }
    }
}

impl TryFrom<&FeedQueryParams> for FeedQuery {
    type Error = ApiError;

    fn try_from(params: &FeedQueryParams) -> Result<Self, Self::Error> {
        Ok(Self {
            count: parse_count(params.count.as_deref())?,
            cutoff: parse_max_timestamp(params.maxtimestamp.as_deref())?,
            categories: parse_list(params.categories.as_deref(), "category")?,
            sources: parse_list(params.sources.as_deref(), "source")?,
        })
    }
}

impl FeedQuery {
    /// Look up the requested sources, or all of them.
    pub fn select_sources(
        &self,
        registry: &feeds::SourceRegistry,
    ) -> Result<Vec<feeds::Source>, ApiError> {
        if self.sources.is_empty() {
            return Ok(registry.all().to_vec());
        }
        self.sources
            .iter()
            .map(|id| match registry.get(id) {
                Ok(source) => Ok(source.clone()),
                Err(e) => Err(ApiError::Validation(e.to_string())),
            })
            .collect()
    }

    /// Filters for the request.
    pub fn filters(&self) -> Vec<feeds::Filter> {
        let mut filters = Vec::new();
        if !self.categories.is_empty() {
            filters.push(feeds::CategorySet::new(&self.categories).into());
        }
        filters
    }

    /// Fetch, merge, and filter the requested articles.
    /// Nothing is returned unless every step succeeds.
    pub async fn articles(
        &self,
        state: &AppState,
    ) -> Result<ArticleList, ApiError> {
        let sources = self.select_sources(&state.registry)?;

        let merge = match feeds::ChronologicalMerge::fetch(
            &self.cutoff,
            &sources,
            state.provider.as_ref(),
        )
        .await
        {
            Ok(merge) => merge,
            Err(e) => {
                tracing::error!("Error retrieving article list: {e}");
                return Err(e.into());
            }
        };

        let articles = match feeds::Pipeline::new(merge, self.filters())
            .take_articles(self.count)
        {
            Ok(articles) => articles,
            Err(e) => {
                tracing::error!("Error processing article: {e}");
                return Err(e.into());
            }
        };

        ArticleList::try_from(articles.as_slice())
    }
}

/// Treat empty parameters as missing.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn parse_count(value: Option<&str>) -> Result<usize, ApiError> {
    let Some(value) = non_empty(value) else {
        return Ok(DEFAULT_COUNT);
    };
    let count = value.parse::<i32>().map_err(|e| {
        ApiError::Validation(format!("invalid count query parameter: {e}"))
    })?;
    if count <= 0 {
        return Err(ApiError::Validation(
            "count query parameter must be > 0".into(),
        ));
    }
    Ok(count as usize)
}

fn parse_max_timestamp(
    value: Option<&str>,
) -> Result<feeds::DateTime, ApiError> {
    let Some(value) = non_empty(value) else {
        return Ok(feeds::DateTime::max());
    };
    let timestamp = value.parse::<i64>().map_err(|e| {
        ApiError::Validation(format!(
            "invalid maxtimestamp query parameter: {e}"
        ))
    })?;
    if timestamp <= 0 {
        return Err(ApiError::Validation(
            "maxtimestamp query parameter must be > 0".into(),
        ));
    }
    match feeds::DateTime::from_unix_timestamp(timestamp) {
        Some(cutoff) => Ok(cutoff),
        None => Err(ApiError::Validation(
            "maxtimestamp query parameter is out of range".into(),
        )),
    }
}

/// Split a comma-separated list. Tokens must be non-empty and unpadded.
fn parse_list(
    value: Option<&str>,
    name: &str,
) -> Result<Vec<String>, ApiError> {
    let Some(value) = non_empty(value) else {
        return Ok(Vec::new());
    };
    value
        .split(',')
        .map(|token| {
            if token.is_empty() {
                return Err(ApiError::Validation(format!("empty {name}")));
            }
            if token.trim() != token {
                return Err(ApiError::Validation(format!(
                    "{name} {token:?} contains leading or trailing whitespaces"
                )));
            }
            Ok(token.to_string())
        })
        .collect()
}
