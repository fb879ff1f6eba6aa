//! Errors.

/// Result type for feed operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while fetching, merging, or filtering.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A source's articles could not be retrieved.
    #[error("could not read article list from source {feed}: {cause}")]
    Fetch {
        feed: String,
        #[source]
        cause: Box<Error>,
    },
    /// The HTTP client could not be created.
    #[error("unable to build http client: {0}")]
    Client(String),
    /// The request for a feed document failed.
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },
    /// The feed document is neither valid atom nor valid rss.
    #[error("unable to parse {url} as atom or rss:{reason}")]
    Parse { url: String, reason: String },
    /// An article without a publication date reached the merge.
    #[error("article from {feed} has missing publication date ({stage})")]
    MissingPublicationDate { feed: String, stage: Stage },
    /// No source is registered under the id.
    #[error("could not find source with ID {0}")]
    SourceNotFound(String),
    /// Two sources share an id.
    #[error("source ID {0} is configured more than once")]
    DuplicateSource(String),
}

/// Where in the merge a missing publication date was found.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    /// While truncating a source's backlog at the cutoff.
    CutoffScan,
    /// While comparing the heads of the backlogs.
    Merge,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::CutoffScan => f.write_str("cutoff scan"),
            Stage::Merge => f.write_str("merge"),
        }
    }
}
