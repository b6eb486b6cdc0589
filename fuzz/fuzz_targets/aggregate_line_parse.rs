//! Fuzz target for aggregate line parsing and label path derivation.
//!
//! Derived label paths must never climb out of the output folder.

#![no_main]

use std::path::Component;

use labelfix::split::{label_path_for_image, parse_aggregate_line};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };

    let Some(record) = parse_aggregate_line(line) else {
        return;
    };

    if let Some(path) = label_path_for_image(record.image) {
        assert!(path
            .components()
            .all(|component| matches!(component, Component::Normal(_))));
    }
});
