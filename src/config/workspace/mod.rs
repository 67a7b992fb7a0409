//! Workspace-scoped storage settings.

pub mod storage_paths;
