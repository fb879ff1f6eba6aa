//! Chronological merge across sources.

use super::*;

use std::cmp::Ordering;

/// Merges the articles of several sources into one sequence, newest first.
///
/// Each source's articles are sorted newest-first and everything newer than
/// the cutoff is dropped before merging starts. Every call to `next` then
/// scans the head of each backlog and pops the newest one, so the output is
/// non-increasing in date and keeps each source's own order. Ties go to the
/// source listed first.
///
/// If none of a source's articles is at or before the cutoff, the source is
/// kept whole rather than emptied.
#[derive(Debug)]
pub struct ChronologicalMerge {
    backlogs: Vec<Backlog>,
}

impl ChronologicalMerge {
    /// Create a merge from already-fetched articles, one collection per
    /// source, labelled with the source's name.
    pub fn new<I, S>(cutoff: &DateTime, backlogs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<Article>)>,
        S: Into<String>,
    {
        let backlogs = backlogs
            .into_iter()
            .map(|(feed, articles)| Backlog::new(feed.into(), articles, cutoff))
            .collect::<Result<Vec<Backlog>>>()?;
        Ok(Self { backlogs })
    }

    /// Fetch every source, one after another, and create a merge from the
    /// results. The first failing source aborts the whole merge.
    pub async fn fetch<P>(
        cutoff: &DateTime,
        sources: &[Source],
        provider: &P,
    ) -> Result<Self>
    where
        P: FeedProvider + ?Sized,
    {
        let mut backlogs = Vec::with_capacity(sources.len());
        for source in sources {
            let articles =
                provider.fetch_articles(source).await.map_err(|e| {
                    Error::Fetch {
                        feed: source.name().to_string(),
                        cause: Box::new(e),
                    }
                })?;
            tracing::debug!(
                "Fetched {} articles from {}.",
                articles.len(),
                source.name()
            );
            backlogs.push(Backlog::new(
                source.name().to_string(),
                articles,
                cutoff,
            )?);
        }
        Ok(Self { backlogs })
    }

    /// Number of articles not yet produced.
    pub fn remaining(&self) -> usize {
        self.backlogs.iter().map(|b| b.articles.len()).sum()
    }
}

impl Iterator for ChronologicalMerge {
    type Item = Result<Article>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut latest: Option<(usize, &DateTime)> = None;
        for (i, backlog) in self.backlogs.iter().enumerate() {
            let Some(head) = backlog.articles.front() else {
                continue;
            };
            let Some(date) = head.publication_date() else {
                return Some(Err(Error::MissingPublicationDate {
                    feed: backlog.feed.clone(),
                    stage: Stage::Merge,
                }));
            };
            match latest {
                Some((_, latest_date)) if date <= latest_date => {}
                _ => latest = Some((i, date)),
            }
        }

        let (index, _) = latest?;
        self.backlogs[index].articles.pop_front().map(Ok)
    }
}

/// One source's remaining articles, newest first.
#[derive(Debug)]
struct Backlog {
    feed: String,
    articles: VecDeque<Article>,
}

impl Backlog {
    /// Sort newest-first and drop the articles newer than the cutoff.
    fn new(
        feed: String,
        mut articles: Vec<Article>,
        cutoff: &DateTime,
    ) -> Result<Self> {
        articles.sort_by(newest_first);

        let mut head = None;
        for (i, article) in articles.iter().enumerate() {
            let Some(date) = article.publication_date() else {
                return Err(Error::MissingPublicationDate {
                    feed,
                    stage: Stage::CutoffScan,
                });
            };
            if date <= cutoff {
                head = Some(i);
                break;
            }
        }

        let head = match head {
            Some(head) => head,
            None => {
                if !articles.is_empty() {
                    tracing::debug!(
                        "All {} articles from {} are newer than {}; \
                         keeping them all.",
                        articles.len(),
                        feed,
                        cutoff
                    );
                }
                0
            }
        };

        let mut articles = VecDeque::from(articles);
        articles.drain(..head);
        Ok(Self { feed, articles })
    }
}

/// Descending by date. Dated articles come before dateless ones, and
/// dateless articles compare equal to each other.
fn newest_first(a: &Article, b: &Article) -> Ordering {
    match (a.publication_date(), b.publication_date()) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
