//! Utility modules for the cookbook generator.

pub mod category;
pub mod escape;
pub mod log;
pub mod minify;
pub mod slug;
