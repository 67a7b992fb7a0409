//! Query layer: fragment matching, sub-tree reconstruction, path rendering.

pub mod facade;
pub mod render;
pub mod resolver;

pub use facade::{IndexOptions, IndexStatus, PathIndex};
pub use render::{PathRenderer, TreeDict};
pub use resolver::{MatchResolver, Resolution};
