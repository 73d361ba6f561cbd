//! Output formatters for country reports and author search results.

pub mod json;
pub mod text;
