//! Core types shared by the builder, the store and the query layer.

/// NodeId: position of a node in listing order, assigned from 0 upwards
pub type NodeId = i64;

/// Parent id carried by the root record
pub const NO_PARENT: NodeId = -1;

/// Default number of whitespace characters per indentation level
pub const DEFAULT_INDENT_UNIT: usize = 7;

/// Default separator between path segments
pub const DEFAULT_SEPARATOR: &str = "\\";

/// Single-element result returned when a query has nothing to report
pub const NO_MATCHES: &str = "No matching files or directories found";
