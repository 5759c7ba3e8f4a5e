//! CLDR plural rules and gender selectors.
//!
//! Implements a subset of the Unicode CLDR plural rules covering the
//! most common language families. Each [`PluralRule`] maps an integer
//! count to a [`PluralCategory`], which names the selector form a
//! message may override.
//!
//! # Invariants
//!
//! 1. Every `PluralRule` maps any `i64` to exactly one `PluralCategory`.
//! 2. The `Other` category is always the catch-all fallback.
//! 3. Rules are pure functions: same count always yields same category.

use core::fmt;

use crate::locale::LocaleTag;

/// CLDR plural categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    pub const ALL: [Self; 6] = [
        Self::Zero,
        Self::One,
        Self::Two,
        Self::Few,
        Self::Many,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grammatical gender selector values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plural rule function that maps a count to a plural category.
///
/// Built-in rules cover the most common CLDR language groups.
/// Custom rules can be provided via the function pointer variant.
#[derive(Clone)]
pub enum PluralRule {
    /// English-like: `one` for 1, `other` for everything else.
    English,
    /// Russian/Slavic: `one` for 1, `few` for 2-4, `many` for 5-20,
    /// then repeats based on last two digits.
    Russian,
    /// Arabic: `zero` for 0, `one` for 1, `two` for 2, `few` for 3-10,
    /// `many` for 11-99, `other` for 100+.
    Arabic,
    /// French-like: `one` for 0-1, `other` for everything else.
    French,
    /// Chinese/Japanese/Korean: always `other` (no plural distinction).
    CJK,
    /// Polish: similar to Russian but with different thresholds.
    Polish,
    /// Custom rule function.
    Custom(fn(i64) -> PluralCategory),
}

impl PluralRule {
    /// Determine the plural category for the given count.
    #[must_use]
    pub fn categorize(&self, count: i64) -> PluralCategory {
        let n = count.unsigned_abs();
        match self {
            Self::English => english_rule(n),
            Self::Russian => russian_rule(n),
            Self::Arabic => arabic_rule(n),
            Self::French => french_rule(n),
            Self::CJK => PluralCategory::Other,
            Self::Polish => polish_rule(n),
            Self::Custom(f) => f(count),
        }
    }

    /// Select the rule for a locale's language.
    ///
    /// Falls back to English if the language is unknown (including root).
    #[must_use]
    pub fn for_locale(tag: &LocaleTag) -> Self {
        Self::for_language(tag.language())
    }

    /// Select the rule for a bare language subtag such as `"ru"`.
    #[must_use]
    pub fn for_language(language: &str) -> Self {
        match language.to_ascii_lowercase().as_str() {
            "en" | "de" | "nl" | "sv" | "da" | "no" | "nb" | "nn" | "it" | "es" | "pt" | "el"
            | "hu" | "fi" | "et" | "he" | "tr" | "bg" | "az" | "ka" | "uz" => Self::English,
            "fr" | "hi" | "bn" => Self::French,
            "ru" | "uk" | "hr" | "sr" | "bs" => Self::Russian,
            "pl" => Self::Polish,
            "ar" => Self::Arabic,
            "zh" | "ja" | "ko" | "th" | "vi" | "id" | "ms" => Self::CJK,
            _ => Self::English,
        }
    }
}

impl fmt::Debug for PluralRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::English => write!(f, "PluralRule::English"),
            Self::Russian => write!(f, "PluralRule::Russian"),
            Self::Arabic => write!(f, "PluralRule::Arabic"),
            Self::French => write!(f, "PluralRule::French"),
            Self::CJK => write!(f, "PluralRule::CJK"),
            Self::Polish => write!(f, "PluralRule::Polish"),
            Self::Custom(_) => write!(f, "PluralRule::Custom(...)"),
        }
    }
}

// ── Rule implementations ────────────────────────────────────────────

fn english_rule(n: u64) -> PluralCategory {
    if n == 1 {
        PluralCategory::One
    } else {
        PluralCategory::Other
    }
}

fn french_rule(n: u64) -> PluralCategory {
    if n <= 1 {
        PluralCategory::One
    } else {
        PluralCategory::Other
    }
}

fn russian_rule(n: u64) -> PluralCategory {
    let mod10 = n % 10;
    let mod100 = n % 100;

    if mod10 == 1 && mod100 != 11 {
        PluralCategory::One
    } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
        PluralCategory::Few
    } else if mod10 == 0 || (5..=9).contains(&mod10) || (11..=14).contains(&mod100) {
        PluralCategory::Many
    } else {
        PluralCategory::Other
    }
}

fn polish_rule(n: u64) -> PluralCategory {
    let mod10 = n % 10;
    let mod100 = n % 100;

    if n == 1 {
        PluralCategory::One
    } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
        PluralCategory::Few
    } else {
        PluralCategory::Many
    }
}

fn arabic_rule(n: u64) -> PluralCategory {
    let mod100 = n % 100;
    match n {
        0 => PluralCategory::Zero,
        1 => PluralCategory::One,
        2 => PluralCategory::Two,
        _ if (3..=10).contains(&mod100) => PluralCategory::Few,
        _ if (11..=99).contains(&mod100) => PluralCategory::Many,
        _ => PluralCategory::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_rules() {
        let r = PluralRule::English;
        assert_eq!(r.categorize(0), PluralCategory::Other);
        assert_eq!(r.categorize(1), PluralCategory::One);
        assert_eq!(r.categorize(2), PluralCategory::Other);
    }

    #[test]
    fn russian_rules() {
        let r = PluralRule::Russian;
        assert_eq!(r.categorize(1), PluralCategory::One);
        assert_eq!(r.categorize(3), PluralCategory::Few);
        assert_eq!(r.categorize(5), PluralCategory::Many);
        assert_eq!(r.categorize(11), PluralCategory::Many);
        assert_eq!(r.categorize(21), PluralCategory::One);
        assert_eq!(r.categorize(22), PluralCategory::Few);
    }

    #[test]
    fn polish_rules() {
        let r = PluralRule::Polish;
        assert_eq!(r.categorize(1), PluralCategory::One);
        assert_eq!(r.categorize(2), PluralCategory::Few);
        assert_eq!(r.categorize(12), PluralCategory::Many);
        assert_eq!(r.categorize(22), PluralCategory::Few);
    }

    #[test]
    fn arabic_rules() {
        let r = PluralRule::Arabic;
        assert_eq!(r.categorize(0), PluralCategory::Zero);
        assert_eq!(r.categorize(2), PluralCategory::Two);
        assert_eq!(r.categorize(7), PluralCategory::Few);
        assert_eq!(r.categorize(42), PluralCategory::Many);
        assert_eq!(r.categorize(100), PluralCategory::Other);
    }

    #[test]
    fn locale_selection_uses_language_only() {
        let tag = LocaleTag::parse("az_Cyrl_AZ").unwrap();
        assert_eq!(
            PluralRule::for_locale(&tag).categorize(1),
            PluralCategory::One
        );
        let ru = LocaleTag::parse("ru_RU").unwrap();
        assert_eq!(
            PluralRule::for_locale(&ru).categorize(4),
            PluralCategory::Few
        );
        assert!(matches!(
            PluralRule::for_locale(&LocaleTag::root()),
            PluralRule::English
        ));
    }

    #[test]
    fn custom_rule() {
        let r = PluralRule::Custom(|n| {
            if n == 0 {
                PluralCategory::Zero
            } else {
                PluralCategory::Other
            }
        });
        assert_eq!(r.categorize(0), PluralCategory::Zero);
        assert_eq!(r.categorize(9), PluralCategory::Other);
    }

    #[test]
    fn display_names() {
        assert_eq!(PluralCategory::Few.to_string(), "few");
        assert_eq!(Gender::Female.to_string(), "female");
    }
}
