//! Locale identifiers and their fallback chains.
//!
//! # Invariants
//!
//! 1. **Chains terminate**: `fallback_chain()` always ends at the root tag
//!    and every step removes exactly one non-empty component, so the chain is
//!    finite, duplicate-free and strictly decreasing in specificity.
//!
//! 2. **Stepwise degradation**: components are dropped variant first, then
//!    region, then script, then language. `az_Cyrl_AZ` degrades to `az_Cyrl`
//!    (the script survives the region), never to `az_AZ`.
//!
//! 3. **Normalized equality**: parsing normalizes case (language lowercase,
//!    script Titlecase, region uppercase) so `AZ-cyrl-az` and `az_Cyrl_AZ`
//!    are the same tag.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{I18nError, Result};

const ROOT_NAMES: [&str; 2] = ["root", "default"];

/// A parsed locale identifier: `language[_Script][_REGION][_variant]`.
///
/// The root (default) locale has every component empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct LocaleTag {
    language: String,
    script: String,
    region: String,
    variant: String,
}

impl LocaleTag {
    /// The root locale, the last entry of every fallback chain.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a locale identifier separated by `_` or `-`.
    ///
    /// Parsing is lenient about subtags it does not recognize: anything after
    /// the language, script and region is retained verbatim as the variant.
    /// It fails when the language segment is empty but other segments follow
    /// (`"_AZ"`), when the language contains non-letters, or when the input
    /// contains characters other than ASCII alphanumerics and separators.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty()
            || ROOT_NAMES
                .iter()
                .any(|name| trimmed.eq_ignore_ascii_case(name))
        {
            return Ok(Self::root());
        }

        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(malformed(input, format!("unexpected character '{bad}'")));
        }

        let mut segments = trimmed.split(['_', '-']);
        let language = segments.next().unwrap_or_default();
        if language.is_empty() {
            return Err(malformed(input, "empty language segment"));
        }
        if !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(malformed(input, "language subtag must be alphabetic"));
        }

        let rest: Vec<&str> = segments.filter(|s| !s.is_empty()).collect();
        let mut idx = 0;

        let mut script = String::new();
        if let Some(seg) = rest.get(idx).filter(|s| is_script(s)) {
            script = titlecase(seg);
            idx += 1;
        }

        let mut region = String::new();
        if let Some(seg) = rest.get(idx).filter(|s| is_region(s)) {
            region = seg.to_ascii_uppercase();
            idx += 1;
        }

        let variant = rest.get(idx..).unwrap_or_default().join("_");

        Ok(Self {
            language: language.to_ascii_lowercase(),
            script,
            region,
            variant,
        })
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn script(&self) -> &str {
        &self.script
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[must_use]
    pub fn variant(&self) -> &str {
        &self.variant
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.specificity() == 0
    }

    /// Number of non-empty components (0 for root, at most 4).
    #[must_use]
    pub fn specificity(&self) -> usize {
        [&self.language, &self.script, &self.region, &self.variant]
            .iter()
            .filter(|c| !c.is_empty())
            .count()
    }

    /// The next less specific tag, or `None` for root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let mut parent = self.clone();
        if !parent.variant.is_empty() {
            parent.variant.clear();
        } else if !parent.region.is_empty() {
            parent.region.clear();
        } else if !parent.script.is_empty() {
            parent.script.clear();
        } else if !parent.language.is_empty() {
            parent.language.clear();
        } else {
            return None;
        }
        Some(parent)
    }

    /// This tag followed by each ancestor, ending with root.
    #[must_use]
    pub fn fallback_chain(&self) -> Vec<Self> {
        let mut chain = Vec::with_capacity(self.specificity() + 1);
        let mut current = Some(self.clone());
        while let Some(tag) = current {
            current = tag.parent();
            chain.push(tag);
        }
        chain
    }

    fn components(&self) -> (&str, &str, &str, &str) {
        (&self.language, &self.script, &self.region, &self.variant)
    }
}

fn malformed(tag: &str, reason: impl Into<String>) -> I18nError {
    I18nError::MalformedLocaleTag {
        tag: tag.to_string(),
        reason: reason.into(),
    }
}

fn is_script(seg: &str) -> bool {
    seg.len() == 4 && seg.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_region(seg: &str) -> bool {
    (seg.len() == 2 && seg.chars().all(|c| c.is_ascii_alphabetic()))
        || (seg.len() == 3 && seg.chars().all(|c| c.is_ascii_digit()))
}

fn titlecase(seg: &str) -> String {
    let mut out = seg.to_ascii_lowercase();
    if let Some(first) = out.get_mut(..1) {
        first.make_ascii_uppercase();
    }
    out
}

impl PartialOrd for LocaleTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders by specificity (root first), ties broken by component strings.
impl Ord for LocaleTag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.specificity()
            .cmp(&other.specificity())
            .then_with(|| self.components().cmp(&other.components()))
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("root");
        }
        let mut first = true;
        for part in [&self.language, &self.script, &self.region, &self.variant] {
            if part.is_empty() {
                continue;
            }
            if !first {
                f.write_str("_")?;
            }
            f.write_str(part)?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for LocaleTag {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for LocaleTag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for LocaleTag {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
