//! Fuzz target for label line cleaning.
//!
//! Feeds arbitrary UTF-8 lines through the shared token rule and checks that
//! every kept token re-parses to itself.

#![no_main]

use labelfix::label::{clean_label_line, CleanReport, LabelToken};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };

    let mut report = CleanReport::new();
    for token in clean_label_line(line, "<fuzz>", 1, &mut report) {
        let reparsed = LabelToken::parse(token.as_str()).expect("normalized token re-parses");
        assert_eq!(reparsed, token);
    }
});
