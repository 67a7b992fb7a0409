//! Config merging: default values plus the layered sources.

pub mod merge_policy;
pub mod service;
