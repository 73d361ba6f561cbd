//! Planisphere
//!
//! Frequentist coauthor-by-country aggregation for OpenAlex authors.
//! Pulls every work attributed to an author through cursor pagination, then
//! reduces the authorships into the author's anchor country and a per-country
//! count of coauthored works.
//!
//! # Example
//!
//! ```no_run
//! use planisphere::{AuthorId, Config, FetchOptions, OpenAlexClient, WorkFetcher, aggregate};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let author = AuthorId::parse("https://openalex.org/A5023888391")?;
//!     let client = OpenAlexClient::new(Config::from_env()?)?;
//!
//!     let works = WorkFetcher::new(client).fetch_all_works(&author, FetchOptions::default()).await?;
//!     let result = aggregate(&author, &works);
//!     println!("{:?} {:?}", result.anchor, result.coauthor_tally.top(5));
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod countries;
pub mod error;
pub mod fetcher;
pub mod formatters;
pub mod models;

pub use client::{OpenAlexClient, SearchField, WorksSource};
pub use config::Config;
pub use countries::{AggregationResult, CountryTally, aggregate};
pub use error::{AppError, ClientError, FetchError, InputError};
pub use fetcher::{FetchOptions, WorkFetcher};
pub use models::AuthorId;
