//! Integration tests for listing builds, searches, persistence and the CLI

mod cli_contracts;
mod listing_properties;
mod search_contracts;
mod store_rebuild;
mod support;
