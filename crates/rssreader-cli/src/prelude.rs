use super::*;

pub use cli::*;
pub use config::*;
pub use error::*;
pub use logging::*;
pub use modes::*;
pub use query::*;
pub use responses::*;

pub(crate) mod internal {
    pub use std::sync::{Arc, LazyLock};
    pub use std::path::{Path, PathBuf};

    pub use anyhow::{Result, bail};
    pub use clap::{Args, Parser, Subcommand};
    pub use resolve_path::PathResolveExt;
    pub use rssreader_feeds::prelude::{self as feeds};
    pub use serde::{Deserialize, Serialize};
    pub use tokio_util::sync::CancellationToken;
}
