//! Numeric normalizer for raw metric strings.
//!
//! Sources publish counts as display text: `"3,000"`, `" 12 "`, `""`, `"N/A"`.
//! [`normalize_count`] keeps only the ASCII digits and reads them as a count,
//! so every input resolves to a comparable number.

/// Extract a non-negative count from a raw display string.
///
/// Every character that is not an ASCII decimal digit is dropped and the rest
/// is read as a base-10 integer. No digits yields 0. Digit runs too large for
/// `u64` saturate at `u64::MAX`. This function never fails.
///
/// ```
/// use casewatch_core::normalize::normalize_count;
///
/// assert_eq!(normalize_count("3,000"), 3000);
/// assert_eq!(normalize_count("N/A"), 0);
/// ```
pub fn normalize_count(raw: &str) -> u64 {
    raw.bytes()
        .filter(u8::is_ascii_digit)
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(u64::from(digit - b'0'))
        })
}
