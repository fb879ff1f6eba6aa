use super::*;

pub use async_trait::async_trait as feed_trait;
pub use article::*;
pub use datetime::*;
pub use error::*;
pub use filter::*;
pub use merge::*;
pub use pipeline::*;
pub use provider::*;
pub use source::*;

pub(crate) mod internal {
    pub use std::collections::{HashMap, HashSet, VecDeque};
}
