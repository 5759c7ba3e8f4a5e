//! Key lookup over a resolved resource chain.
//!
//! # Invariants
//!
//! 1. **First hit wins**: descriptors are consulted most specific first and
//!    the first one yielding a value ends the walk.
//!
//! 2. **Selector miss stays local** (default policy): when a descriptor has
//!    no override for the requested form, its own default value is used
//!    before the next, less specific, descriptor is consulted.
//!
//! 3. **Missing keys are explicit**: a required key found nowhere produces a
//!    [`MissingKeyError`] naming every locale consulted; it is never turned
//!    into an empty value.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing key | Key absent from all descriptors | `MissingKeyError` |
//! | Empty chain | No descriptor matched the locale | Every key is missing |
//! | Optional key absent | Caller used `lookup_optional` | `None` |

use std::collections::{BTreeMap, BTreeSet};

use crate::config::{LookupConfig, SelectorFallback};
use crate::descriptor::{ResourceDescriptor, ResourceValue, SelectorForm};
use crate::error::MissingKeyError;
use crate::locale::LocaleTag;
use crate::plural::PluralRule;
use crate::resolver::ResourceList;

/// A value found in a chain, borrowed from the descriptor that supplied it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub value: &'a ResourceValue,
    /// Locale of the descriptor the value came from.
    pub locale: &'a LocaleTag,
    /// The selector form that matched, `None` for a default value.
    pub form: Option<&'a SelectorForm>,
}

impl Resolved<'_> {
    #[must_use]
    pub fn to_binding(&self) -> Binding {
        Binding {
            value: self.value.clone(),
            locale: self.locale.clone(),
            form: self.form.cloned(),
        }
    }
}

/// Owned form of [`Resolved`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Binding {
    pub value: ResourceValue,
    pub locale: LocaleTag,
    pub form: Option<SelectorForm>,
}

/// Every value a selector-capable key can take for one resolved chain.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FormTable {
    pub key: String,
    pub default: Option<Binding>,
    pub forms: BTreeMap<SelectorForm, Binding>,
}

/// Looks keys up in [`ResourceList`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyLookupEngine {
    config: LookupConfig,
}

impl KeyLookupEngine {
    #[must_use]
    pub fn new(config: LookupConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Look up a required key, optionally for a selector form.
    pub fn lookup<'a>(
        &self,
        list: &'a ResourceList,
        key: &str,
        selector: Option<&SelectorForm>,
    ) -> Result<Resolved<'a>, MissingKeyError> {
        self.find(list, key, selector)
            .ok_or_else(|| missing_key(list, key))
    }

    /// Look up a key the interface marks optional; absence is not an error.
    #[must_use]
    pub fn lookup_optional<'a>(
        &self,
        list: &'a ResourceList,
        key: &str,
        selector: Option<&SelectorForm>,
    ) -> Option<Resolved<'a>> {
        let found = self.find(list, key, selector);
        if found.is_none() {
            tracing::debug!(
                interface = %list.interface(),
                requested = %list.requested(),
                key,
                "optional key absent"
            );
        }
        found
    }

    /// Look up the value for a count, using the requested locale's plural
    /// rule. Within a descriptor an exact-count form (`=N`) beats the plural
    /// category; descriptors are walked with this engine's fallback policy.
    pub fn lookup_plural<'a>(
        &self,
        list: &'a ResourceList,
        key: &str,
        count: i64,
    ) -> Result<Resolved<'a>, MissingKeyError> {
        let exact = SelectorForm::exact(count);
        let category =
            SelectorForm::from(PluralRule::for_locale(list.requested()).categorize(count));
        let found = match self.config.selector_fallback {
            SelectorFallback::SameLocaleDefault => list.iter().find_map(|d| {
                form_hit(d, key, &exact)
                    .or_else(|| form_hit(d, key, &category))
                    .or_else(|| default_hit(d, key))
            }),
            SelectorFallback::AcrossChainFirst => list
                .iter()
                .find_map(|d| form_hit(d, key, &exact))
                .or_else(|| list.iter().find_map(|d| form_hit(d, key, &category)))
                .or_else(|| list.iter().find_map(|d| default_hit(d, key))),
        };
        found.ok_or_else(|| missing_key(list, key))
    }

    /// The key's default value plus every selector form declared anywhere in
    /// the chain, each resolved with this engine's fallback policy.
    pub fn collect_forms(
        &self,
        list: &ResourceList,
        key: &str,
    ) -> Result<FormTable, MissingKeyError> {
        let default = self.find(list, key, None).map(|r| r.to_binding());
        let declared: BTreeSet<&SelectorForm> = list.iter().flat_map(|d| d.forms(key)).collect();

        let mut forms = BTreeMap::new();
        for form in declared {
            if let Some(found) = self.find(list, key, Some(form)) {
                forms.insert(form.clone(), found.to_binding());
            }
        }

        if default.is_none() && forms.is_empty() {
            return Err(missing_key(list, key));
        }
        Ok(FormTable {
            key: key.to_string(),
            default,
            forms,
        })
    }

    fn find<'a>(
        &self,
        list: &'a ResourceList,
        key: &str,
        selector: Option<&SelectorForm>,
    ) -> Option<Resolved<'a>> {
        let Some(form) = selector else {
            return list.iter().find_map(|d| default_hit(d, key));
        };
        match self.config.selector_fallback {
            SelectorFallback::SameLocaleDefault => list
                .iter()
                .find_map(|d| form_hit(d, key, form).or_else(|| default_hit(d, key))),
            SelectorFallback::AcrossChainFirst => list
                .iter()
                .find_map(|d| form_hit(d, key, form))
                .or_else(|| list.iter().find_map(|d| default_hit(d, key))),
        }
    }
}

fn default_hit<'a>(descriptor: &'a ResourceDescriptor, key: &str) -> Option<Resolved<'a>> {
    let hit = descriptor.lookup(key).map(|value| Resolved {
        value,
        locale: descriptor.locale(),
        form: None,
    });
    tracing::trace!(locale = %descriptor.locale(), key, found = hit.is_some(), "probe default");
    hit
}

fn form_hit<'a>(
    descriptor: &'a ResourceDescriptor,
    key: &str,
    form: &SelectorForm,
) -> Option<Resolved<'a>> {
    let (form, value) = descriptor.entry(key)?.forms().get_key_value(form)?;
    Some(Resolved {
        value,
        locale: descriptor.locale(),
        form: Some(form),
    })
}

fn missing_key(list: &ResourceList, key: &str) -> MissingKeyError {
    let tried = list.locales();
    tracing::warn!(
        interface = %list.interface(),
        requested = %list.requested(),
        key,
        tried = tried.len(),
        "required key missing from every resource"
    );
    MissingKeyError {
        key: key.to_string(),
        tried,
        chain: list.chain().to_vec(),
    }
}
