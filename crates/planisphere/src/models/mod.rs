//! Data models for OpenAlex entities.
//!
//! All fields are optional and decoded leniently; OpenAlex already uses
//! snake_case so only `2yr_mean_citedness` needs renaming.

mod author;
mod author_id;
mod work;

pub use author::{
    Affiliation, Author, AuthorSearchResult, AuthorSuggestion, AutocompleteResult, SummaryStats,
};
pub use author_id::AuthorId;
pub use work::{Authorship, DehydratedAuthor, Institution, PageMeta, Work, WorksPage};
