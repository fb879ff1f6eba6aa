//! Filtering pipeline.

use super::*;

/// Pulls articles from an ordered source and yields the ones that pass
/// every filter.
///
/// Filters run in order and stop at the first rejection. With no filters,
/// every article passes. A failure from the source or a filter is yielded
/// once, after which the pipeline is closed and yields nothing.
pub struct Pipeline<S, F = Filter> {
    source: S,
    filters: Vec<F>,
    closed: bool,
}

impl<S, F> Pipeline<S, F>
where
    S: Iterator<Item = Result<Article>>,
    F: ArticleFilter,
{
    /// Create a new pipeline.
    pub fn new(source: S, filters: Vec<F>) -> Self {
        Self {
            source,
            filters,
            closed: false,
        }
    }

    /// Collect at most `count` accepted articles.
    /// Any failure discards what was collected so far.
    pub fn take_articles(self, count: usize) -> Result<Vec<Article>> {
        self.take(count).collect()
    }

    /// Check the article against all filters.
    fn accepts(&self, article: &Article) -> Result<bool> {
        for filter in &self.filters {
            if !filter.apply(article)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<S, F> Iterator for Pipeline<S, F>
where
    S: Iterator<Item = Result<Article>>,
    F: ArticleFilter,
{
    type Item = Result<Article>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.closed {
            return None;
        }

        loop {
            let article = match self.source.next() {
                Some(Ok(article)) => article,
                Some(Err(e)) => {
                    self.closed = true;
                    return Some(Err(e));
                }
                None => {
                    self.closed = true;
                    return None;
                }
            };

            match self.accepts(&article) {
                Ok(true) => return Some(Ok(article)),
                Ok(false) => {
                    tracing::trace!("Filtered out `{}`.", article.title());
                }
                Err(e) => {
                    self.closed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<S, F> std::iter::FusedIterator for Pipeline<S, F>
where
    S: Iterator<Item = Result<Article>>,
    F: ArticleFilter,
{
}
