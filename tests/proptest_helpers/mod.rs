#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A raw token plus the values it must normalize to.
#[derive(Clone, Debug)]
pub struct TokenCase {
    pub raw: String,
    pub class_id: String,
    pub coords: Vec<f64>,
}

pub fn arb_class_id() -> impl Strategy<Value = String> {
    prop_oneof!["[0-9]{1,3}", "[a-z_]{1,8}"]
}

pub fn arb_coord() -> impl Strategy<Value = f64> {
    prop_oneof![0.0f64..=1.0, -1.0e6f64..1.0e6]
}

/// A valid token, either comma-delimited or space-delimited.
pub fn arb_valid_token() -> impl Strategy<Value = TokenCase> {
    any::<bool>().prop_flat_map(arb_valid_token_delimited)
}

/// A valid token, comma-delimited when `commas` is true.
pub fn arb_valid_token_delimited(commas: bool) -> impl Strategy<Value = TokenCase> {
    (arb_class_id(), prop::collection::vec(arb_coord(), 4..=8))
        .prop_map(move |(class_id, coords)| {
            let mut fields = vec![class_id.clone()];
            fields.extend(coords.iter().map(|c| c.to_string()));
            let raw = fields.join(if commas { "," } else { " " });
            TokenCase {
                raw,
                class_id,
                coords,
            }
        })
}

/// A comma-delimited token with one to four fields.
pub fn arb_short_token() -> impl Strategy<Value = String> {
    (arb_class_id(), prop::collection::vec(arb_coord(), 0..=3)).prop_map(|(class_id, coords)| {
        let mut fields = vec![class_id];
        fields.extend(coords.iter().map(|c| c.to_string()));
        fields.join(",")
    })
}

/// A comma-delimited token with enough fields but one non-numeric coordinate.
pub fn arb_non_numeric_token() -> impl Strategy<Value = String> {
    (
        arb_class_id(),
        prop::collection::vec(arb_coord(), 4..=6),
        "[a-z]{1,4}",
        any::<prop::sample::Index>(),
    )
        .prop_map(|(class_id, coords, junk, index)| {
            let mut fields: Vec<String> = coords.iter().map(|c| c.to_string()).collect();
            let slot = index.index(fields.len());
            fields[slot] = junk;
            fields.insert(0, class_id);
            fields.join(",")
        })
}

pub fn arb_corrupt_token() -> impl Strategy<Value = String> {
    prop_oneof![arb_short_token(), arb_non_numeric_token()]
}

/// Label file content mixing valid and corrupt tokens, blank lines and
/// irregular whitespace.
pub fn arb_label_content() -> impl Strategy<Value = String> {
    let token = prop_oneof![
        3 => arb_valid_token().prop_map(|case| case.raw),
        1 => arb_corrupt_token(),
    ];
    let line = prop::collection::vec(token, 0..4).prop_map(|tokens| tokens.join("  "));
    prop::collection::vec(line, 0..8).prop_map(|lines| lines.join("\n"))
}

/// A line with at least one valid comma-delimited token, mixed with
/// space-delimited boxes and corrupt tokens. Returns the line and the number
/// of valid comma-delimited tokens in it.
pub fn arb_mixed_line() -> impl Strategy<Value = (String, usize)> {
    let piece = prop_oneof![
        arb_valid_token_delimited(true).prop_map(|case| (case.raw, true)),
        arb_valid_token_delimited(false).prop_map(|case| (case.raw, false)),
        arb_corrupt_token().prop_map(|raw| (raw, false)),
    ];
    (
        arb_valid_token_delimited(true),
        prop::collection::vec(piece, 0..6),
        any::<prop::sample::Index>(),
    )
        .prop_map(|(anchor, mut pieces, index)| {
            let slot = index.index(pieces.len() + 1);
            pieces.insert(slot, (anchor.raw, true));
            let valid = pieces.iter().filter(|(_, is_valid)| *is_valid).count();
            let line = pieces
                .into_iter()
                .map(|(raw, _)| raw)
                .collect::<Vec<_>>()
                .join(" ");
            (line, valid)
        })
}
