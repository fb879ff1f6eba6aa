//! rssreader modes.

use super::*;

mod print;
mod serve;

pub use print::*;
pub use serve::*;

/// Shared, read-only state for answering requests.
#[derive(Clone)]
pub struct AppState {
    /// Configured sources.
    pub registry: Arc<feeds::SourceRegistry>,
    /// Feed retrieval.
    pub provider: Arc<dyn feeds::FeedProvider>,
}
