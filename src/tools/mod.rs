//! Command implementations behind the CLI

pub mod listings;
pub mod search;
