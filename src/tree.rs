//! Listing trees: node model and the indentation builder.

pub mod builder;
pub mod node;

pub use builder::TreeBuilder;
pub use node::{ListingTree, Node};
