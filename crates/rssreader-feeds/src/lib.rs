//! rssreader feed retrieval, chronological merging, and filtering.

mod article;
mod datetime;
mod error;
mod filter;
mod merge;
mod pipeline;
pub mod prelude;
mod provider;
mod source;


use prelude::internal::*;
use prelude::*;
