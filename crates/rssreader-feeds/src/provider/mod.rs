//! Feed retrieval.

use super::*;

mod feed_provider;
mod standard_syndication;

pub use feed_provider::*;
pub use standard_syndication::*;
