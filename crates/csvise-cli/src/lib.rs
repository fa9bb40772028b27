//! Library half of the `csvise` command: configuration, logging and
//! terminal rendering.

pub mod config;
pub mod logging;
pub mod render;
pub mod summary;
