#![no_main]

use libfuzzer_sys::fuzz_target;
use planisphere::models::WorksPage;
use planisphere::{AuthorId, aggregate};

fuzz_target!(|data: &[u8]| {
    let Ok(page) = serde_json::from_slice::<WorksPage>(data) else {
        return;
    };
    let author = AuthorId::parse("A1").expect("static id");

    let result = aggregate(&author, &page.results);
    assert!(result.works_counted <= result.works_seen);
    assert_eq!(result.anchor.is_some(), result.works_counted > 0);
});
