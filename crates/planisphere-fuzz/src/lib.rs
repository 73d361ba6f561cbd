//! Fuzzing library for planisphere.
//!
//! Targets cover lenient decoding of OpenAlex pages, author id
//! normalization, and the country aggregation over arbitrary records.
//!
//! # Usage
//!
//! ```bash
//! cd crates/planisphere-fuzz
//! cargo +nightly fuzz run fuzz_aggregate -- -max_total_time=60
//! ```

pub use planisphere::models;
