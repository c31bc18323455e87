//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - `config` - Configuration file management
//! - `replay` - Replay a route as a simulated location feed
//! - `route` - Print a summary of a route
//! - `common` - Shared route resolution and formatting helpers

pub mod common;
pub mod config;
pub mod replay;
pub mod route;
