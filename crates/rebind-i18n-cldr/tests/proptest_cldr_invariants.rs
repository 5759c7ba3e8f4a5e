//! Property-based invariant tests for the bundled date/time tables.
//!
//! 1. Every locale, bundled or not, resolves to a complete format info
//! 2. The effective locale is the nearest bundled ancestor
//! 3. Resolution through a shared cache matches a fresh one

use proptest::prelude::*;
use rebind_i18n::{LocaleTag, ResourceCache};
use rebind_i18n_cldr::{DateTimeFormatInfo, bundled_locales, date_time_resources};

fn tag_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("az".to_string()), Just("ka".to_string()), "[a-z]{2,3}"],
        proptest::option::of(prop_oneof![
            Just("Cyrl".to_string()),
            Just("Latn".to_string())
        ]),
        proptest::option::of("[A-Z]{2}"),
    )
        .prop_map(|(lang, script, region)| {
            let mut parts = vec![lang];
            parts.extend(script);
            parts.extend(region);
            parts.join("_")
        })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Completeness
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn every_locale_resolves_completely(raw in tag_strategy()) {
        let resources = date_time_resources().unwrap();
        let info = DateTimeFormatInfo::resolve(
            &ResourceCache::new(),
            &resources,
            &LocaleTag::parse(&raw).unwrap(),
        )
        .unwrap();
        prop_assert_eq!(info.months_full.len(), 12);
        prop_assert_eq!(info.weekdays_short.len(), 7);
        prop_assert!(!info.date_formats.full.is_empty());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Effective locale
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn effective_locale_is_nearest_bundled_ancestor(raw in tag_strategy()) {
        let requested = LocaleTag::parse(&raw).unwrap();
        let bundled = bundled_locales();
        let expected = requested
            .fallback_chain()
            .into_iter()
            .find(|t| bundled.contains(t))
            .unwrap();
        let info = DateTimeFormatInfo::resolve(
            &ResourceCache::new(),
            &date_time_resources().unwrap(),
            &requested,
        )
        .unwrap();
        prop_assert_eq!(info.locale, expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Cache transparency
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn shared_cache_matches_fresh(raws in proptest::collection::vec(tag_strategy(), 1..5)) {
        let resources = date_time_resources().unwrap();
        let shared = ResourceCache::new();
        for raw in &raws {
            let tag = LocaleTag::parse(raw).unwrap();
            let cached = DateTimeFormatInfo::resolve(&shared, &resources, &tag).unwrap();
            let fresh = DateTimeFormatInfo::resolve(&ResourceCache::new(), &resources, &tag).unwrap();
            prop_assert_eq!(cached, fresh);
        }
    }
}
