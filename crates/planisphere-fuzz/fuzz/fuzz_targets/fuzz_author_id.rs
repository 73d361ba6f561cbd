#![no_main]

use libfuzzer_sys::fuzz_target;
use planisphere::AuthorId;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        if let Ok(id) = AuthorId::parse(raw) {
            // A normalized id always matches its own URL form
            assert!(id.matches(&format!("https://openalex.org/{id}")));
        }
    }
});
