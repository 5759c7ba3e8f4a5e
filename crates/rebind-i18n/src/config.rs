//! Lookup configuration.

/// Where a selector miss falls back to.
///
/// Given a chain `[az_Cyrl, az, root]` and a request for form `one`, where
/// `az_Cyrl` has only a default value and `az` declares `one`:
///
/// - `SameLocaleDefault` returns the `az_Cyrl` default.
/// - `AcrossChainFirst` returns the `az` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SelectorFallback {
    /// Try the form, then the default, in each descriptor before moving on.
    #[default]
    SameLocaleDefault,
    /// Try the form in every descriptor, then the default in every descriptor.
    AcrossChainFirst,
}

/// Tunables for [`KeyLookupEngine`](crate::lookup::KeyLookupEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LookupConfig {
    pub selector_fallback: SelectorFallback,
}

impl LookupConfig {
    #[must_use]
    pub fn with_selector_fallback(mut self, policy: SelectorFallback) -> Self {
        self.selector_fallback = policy;
        self
    }
}
