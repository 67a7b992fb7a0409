//! Built-in defaults applied beneath every other source.

use crate::types::{DEFAULT_INDENT_UNIT, DEFAULT_SEPARATOR};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Start a builder carrying the default listing and search settings.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("listing.path", "data/file_structure.txt")?
        .set_default("listing.indent_unit", DEFAULT_INDENT_UNIT as i64)?
        .set_default("search.case_mode", "sensitive")?
        .set_default("search.separator", DEFAULT_SEPARATOR)?
        .set_default("storage.backend", "sled")
}
