// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 docsort contributors

#![no_main]

use libfuzzer_sys::fuzz_target;

use docsort::organizer::category::{sanitize_segment, CategoryPath};

// Any label the model could produce must resolve to a usable relative
// directory: at least one segment, no empty segments, and stable under
// a second pass.
fuzz_target!(|label: &str| {
    let clean = sanitize_segment(label);
    assert_eq!(sanitize_segment(&clean), clean);

    let path = CategoryPath::resolve(label, "Uncategorized");
    assert!(!path.segments().is_empty());
    assert!(path.segments().iter().all(|s| !s.is_empty()));

    let rel = path.as_rel_path();
    assert!(rel.is_relative());
});
