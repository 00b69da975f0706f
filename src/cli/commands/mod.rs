//! CLI command implementations

pub mod completions;
pub mod config;
pub mod dest;
pub mod dim;
pub mod export;
pub mod import;
pub mod init;
pub mod proj;
