// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    none = { None, "-" },
    zero = { Some(0), "0 B" },
    bytes = { Some(512), "512 B" },
    kilobytes = { Some(1_500), "1.5 kB" },
    megabytes = { Some(2_300_000), "2.3 MB" },
    gigabytes = { Some(7_000_000_000), "7.0 GB" },
)]
fn format_size_cases(bytes: Option<u64>, expected: &str) {
    assert_eq!(format_size(bytes), expected);
}

#[test]
fn truncate_short_string_unchanged() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn truncate_long_string_gets_ellipsis() {
    assert_eq!(truncate("abcdefghij", 5), "abcd…");
}

#[test]
fn truncate_multibyte_respects_chars() {
    // 6 chars, limit 4: keep 3 plus the ellipsis
    assert_eq!(truncate("ääääää", 4), "äää…");
}

#[test]
fn timestamp_trims_subsecond_precision() {
    let ts = Some("2026-08-29T11:22:33.456789Z".to_string());
    assert_eq!(format_timestamp(&ts), "2026-08-29T11:22:33");
    assert_eq!(format_timestamp(&None), "-");
}
