//! Probabilistic linked hierarchy of subsequences.

mod config;
mod map;

pub use self::config::Config;
pub use self::map::{SkipMap, SkipMapIter, SkipMapRange};
