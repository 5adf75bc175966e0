//! CLI command implementations

pub(crate) mod common;
pub(crate) mod drop;
pub(crate) mod exec;
pub(crate) mod force;
pub(crate) mod tables;
pub(crate) mod version;
