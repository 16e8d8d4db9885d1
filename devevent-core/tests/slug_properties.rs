use devevent_core::{derive_slug, normalize_date, normalize_time};
use proptest::prelude::*;

proptest! {
    /// Property: deriving a slug from a slug is a no-op
    #[test]
    fn prop_slug_idempotent(title in "\\PC{0,120}") {
        let once = derive_slug(&title);
        prop_assert_eq!(derive_slug(&once), once);
    }

    /// Property: slugs only contain lowercase ascii alphanumerics and single inner hyphens
    #[test]
    fn prop_slug_charset(title in "\\PC{0,120}") {
        let slug = derive_slug(&title);
        prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        prop_assert!(!slug.starts_with('-'));
        prop_assert!(!slug.ends_with('-'));
        prop_assert!(!slug.contains("--"));
    }

    /// Property: every valid 24-hour time normalizes to itself, zero-padded
    #[test]
    fn prop_time_24h_roundtrip(h in 0u32..24, m in 0u32..60) {
        let canonical = format!("{h:02}:{m:02}");
        prop_assert_eq!(normalize_time(&format!("{h}:{m:02}")).unwrap(), canonical);
    }

    /// Property: canonical dates are fixed points
    #[test]
    fn prop_date_fixed_point(y in 1970i32..2100, m in 1u32..=12, d in 1u32..=28) {
        let canonical = format!("{y:04}-{m:02}-{d:02}");
        prop_assert_eq!(normalize_date(&canonical).unwrap(), canonical);
    }
}
