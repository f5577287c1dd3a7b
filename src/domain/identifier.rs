//! Catalog identifier normalization
//!
//! Raw catalog codes on the site come with noise: an underscore-delimited
//! letter prefix, stray digits before the real code, lowercase letters, and
//! zero-padded numeric parts. `normalize_id` rewrites them into the canonical
//! `LETTERS-NUMBERS` form. The function is total - malformed input degrades
//! to the best-effort uppercased text instead of failing.

/// Normalize a raw catalog code into canonical `LETTERS-NUMBERS` form.
///
/// Steps, in fixed order:
/// 1. drop everything up to and including the first `_`;
/// 2. strip a leading run of ASCII digits;
/// 3. uppercase;
/// 4. insert a dash before the first digit;
/// 5. a 5-6 digit numeric suffix is re-rendered from its parsed integer
///    value, zero-padded to a minimum width of 3 (`00123` becomes `123`;
///    `12345` is left alone - padding extends, it never truncates).
///
/// If no digit remains after cleanup the uppercased text is returned
/// unchanged. Normalizing an already-canonical code is a no-op.
pub fn normalize_id(raw: &str) -> String {
    let mut text = raw.trim();
    if let Some(pos) = text.find('_') {
        text = &text[pos + 1..];
    }
    let text = text.trim_start_matches(|c: char| c.is_ascii_digit());
    let text = text.to_uppercase();

    let Some(first_digit) = text.find(|c: char| c.is_ascii_digit()) else {
        return text;
    };
    let (prefix, suffix) = text.split_at(first_digit);

    let numeric_part = if (5..=6).contains(&suffix.len())
        && suffix.chars().all(|c| c.is_ascii_digit())
    {
        match suffix.parse::<u32>() {
            Ok(n) => format!("{n:03}"),
            Err(_) => suffix.to_string(),
        }
    } else {
        suffix.to_string()
    };

    // The prefix already ends with a dash when the input was canonical.
    if prefix.ends_with('-') {
        format!("{prefix}{numeric_part}")
    } else {
        format!("{prefix}-{numeric_part}")
    }
}

/// Derive a search query token from a media file name: the file stem up to
/// the first whitespace. Release files conventionally lead with the catalog
/// code.
pub fn search_token(file_name: &str) -> String {
    let stem = std::path::Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    stem.split_whitespace().next().unwrap_or(stem).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("012ABC456", "ABC-456")]
    #[case("siro3334", "SIRO-3334")]
    #[case("ABC00123", "ABC-123")]
    #[case("h_086abc00123", "ABC-123")]
    #[case("ABC123", "ABC-123")]
    #[case("ABC-123", "ABC-123")]
    fn normalizes_raw_codes(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_id(raw), expected);
    }

    #[test]
    fn five_digit_suffix_is_rerendered_not_truncated() {
        // Padding is a minimum-width operation: 12345 parses to 12345 and
        // stays five digits; only leading zeros disappear.
        assert_eq!(normalize_id("ABC12345"), "ABC-12345");
        assert_eq!(normalize_id("ABC012345"), "ABC-12345");
        assert_eq!(normalize_id("abc000123"), "ABC-123");
    }

    #[test]
    fn no_digit_returns_uppercased_text_unchanged() {
        assert_eq!(normalize_id("abcdef"), "ABCDEF");
        assert_eq!(normalize_id(""), "");
        // All-digit input strips to nothing rather than panicking.
        assert_eq!(normalize_id("123456"), "");
    }

    #[test]
    fn underscore_prefix_is_dropped_before_digit_stripping() {
        assert_eq!(normalize_id("1sdmt_123abc00789"), "ABC-789");
    }

    proptest! {
        #[test]
        fn idempotent_over_underscore_free_input(raw in "[A-Za-z0-9]{0,12}") {
            let once = normalize_id(&raw);
            prop_assert_eq!(normalize_id(&once), once);
        }

        #[test]
        fn canonical_codes_are_fixed_points(code in "[A-Z]{1,6}-[1-9][0-9]{1,3}") {
            prop_assert_eq!(normalize_id(&code), code);
        }
    }

    #[rstest]
    #[case("SIRO-3334.mp4", "SIRO-3334")]
    #[case("ABC-123 (uncensored).mkv", "ABC-123")]
    #[case("plain", "plain")]
    fn derives_search_token_from_file_name(#[case] file: &str, #[case] expected: &str) {
        assert_eq!(search_token(file), expected);
    }
}
