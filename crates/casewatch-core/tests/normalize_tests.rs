use casewatch_core::normalize::normalize_count;
use proptest::prelude::*;

#[test]
fn test_display_strings_from_source() {
    assert_eq!(normalize_count("3,000"), 3000);
    assert_eq!(normalize_count("1 204"), 1204);
    assert_eq!(normalize_count(""), 0);
    assert_eq!(normalize_count("N/A"), 0);
    assert_eq!(normalize_count("+12"), 12);
    assert_eq!(normalize_count("-4"), 4);
}

#[test]
fn test_overflow_saturates() {
    assert_eq!(normalize_count("99999999999999999999999999"), u64::MAX);
}

proptest! {
    #[test]
    fn prop_formatting_is_ignored(n in 0u64..1_000_000_000_000) {
        let plain = n.to_string();
        let mut grouped = String::new();
        for (i, ch) in plain.chars().enumerate() {
            if i > 0 && (plain.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        prop_assert_eq!(normalize_count(&grouped), n);
        prop_assert_eq!(normalize_count(&format!(" {grouped} cases")), n);
    }

    #[test]
    fn prop_total_over_any_input(raw in ".*") {
        let _ = normalize_count(&raw);
    }
}
