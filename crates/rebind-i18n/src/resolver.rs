//! Selection of the resource chain applicable to a requested locale.
//!
//! # Invariants
//!
//! 1. **Chain order**: a [`ResourceList`] follows the requested tag's
//!    fallback chain, most specific first, root last when present.
//!
//! 2. **Unique locales**: a [`ResourceSet`] holds at most one descriptor per
//!    locale, so no two list entries share a tag.
//!
//! 3. **Order independence**: resolution indexes descriptors by tag and walks
//!    the chain; the order descriptors were discovered in never matters.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::descriptor::{InterfaceId, ResourceDescriptor};
use crate::error::{I18nError, Result};
use crate::locale::LocaleTag;

/// Every descriptor discovered for one interface, indexed by locale.
#[derive(Debug, Clone)]
pub struct ResourceSet {
    interface: InterfaceId,
    by_locale: BTreeMap<LocaleTag, Arc<ResourceDescriptor>>,
}

impl ResourceSet {
    /// Index `descriptors` for `interface`.
    ///
    /// Fails if two descriptors share a locale or one belongs to a
    /// different interface.
    pub fn new<I>(interface: impl Into<InterfaceId>, descriptors: I) -> Result<Self>
    where
        I: IntoIterator<Item = ResourceDescriptor>,
    {
        let mut set = Self::empty(interface);
        for descriptor in descriptors {
            set.insert(descriptor)?;
        }
        Ok(set)
    }

    pub fn empty(interface: impl Into<InterfaceId>) -> Self {
        Self {
            interface: interface.into(),
            by_locale: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, descriptor: ResourceDescriptor) -> Result<()> {
        if descriptor.interface() != &self.interface {
            return Err(I18nError::InterfaceMismatch {
                expected: self.interface.to_string(),
                found: descriptor.interface().to_string(),
            });
        }
        if self.by_locale.contains_key(descriptor.locale()) {
            return Err(I18nError::DuplicateLocaleResource {
                interface: self.interface.to_string(),
                locale: descriptor.locale().clone(),
            });
        }
        self.by_locale
            .insert(descriptor.locale().clone(), Arc::new(descriptor));
        Ok(())
    }

    #[must_use]
    pub fn interface(&self) -> &InterfaceId {
        &self.interface
    }

    #[must_use]
    pub fn get(&self, locale: &LocaleTag) -> Option<&Arc<ResourceDescriptor>> {
        self.by_locale.get(locale)
    }

    /// Locales with a descriptor, least specific first.
    pub fn locales(&self) -> impl Iterator<Item = &LocaleTag> {
        self.by_locale.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_locale.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_locale.is_empty()
    }
}

/// Descriptors applicable to one requested locale, most specific first.
#[derive(Debug, Clone)]
pub struct ResourceList {
    interface: InterfaceId,
    requested: LocaleTag,
    chain: Vec<LocaleTag>,
    descriptors: Vec<Arc<ResourceDescriptor>>,
}

impl ResourceList {
    #[must_use]
    pub fn interface(&self) -> &InterfaceId {
        &self.interface
    }

    #[must_use]
    pub fn requested(&self) -> &LocaleTag {
        &self.requested
    }

    /// The requested tag's full fallback chain, matched or not.
    #[must_use]
    pub fn chain(&self) -> &[LocaleTag] {
        &self.chain
    }

    #[must_use]
    pub fn descriptors(&self) -> &[Arc<ResourceDescriptor>] {
        &self.descriptors
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        self.descriptors.iter().map(AsRef::as_ref)
    }

    /// Locales of the matched descriptors, in list order.
    #[must_use]
    pub fn locales(&self) -> Vec<LocaleTag> {
        self.iter().map(|d| d.locale().clone()).collect()
    }

    /// The most specific locale that actually contributed a descriptor.
    ///
    /// Two requested locales with the same effective locale resolve to the
    /// same descriptors and therefore the same values.
    #[must_use]
    pub fn effective_locale(&self) -> LocaleTag {
        self.descriptors
            .first()
            .map(|d| d.locale().clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Computes [`ResourceList`]s from a [`ResourceSet`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceResolver;

impl ResourceResolver {
    /// Walk `requested`'s fallback chain and collect each exact-tag match.
    ///
    /// Returns an empty list if nothing matches, not even root.
    #[must_use]
    pub fn resolve(set: &ResourceSet, requested: &LocaleTag) -> ResourceList {
        let chain = requested.fallback_chain();
        let descriptors: Vec<Arc<ResourceDescriptor>> = chain
            .iter()
            .filter_map(|tag| set.get(tag).cloned())
            .collect();

        tracing::debug!(
            interface = %set.interface(),
            requested = %requested,
            matched = descriptors.len(),
            "resolved resource list"
        );

        ResourceList {
            interface: set.interface().clone(),
            requested: requested.clone(),
            chain,
            descriptors,
        }
    }
}
