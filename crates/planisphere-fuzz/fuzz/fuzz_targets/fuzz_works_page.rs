#![no_main]

use libfuzzer_sys::fuzz_target;
use planisphere::models::{Author, AuthorSearchResult, AutocompleteResult, WorksPage};

fuzz_target!(|data: &[u8]| {
    // Decoding may reject non-objects but must never panic
    let _ = serde_json::from_slice::<WorksPage>(data);
    let _ = serde_json::from_slice::<AuthorSearchResult>(data);
    let _ = serde_json::from_slice::<AutocompleteResult>(data);
    let _ = serde_json::from_slice::<Author>(data);
});
