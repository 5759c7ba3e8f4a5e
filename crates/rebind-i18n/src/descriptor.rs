//! Locale-tagged resource bundles for a single interface.
//!
//! A [`ResourceDescriptor`] is the in-memory form of one discovered resource
//! (a properties file or a data table) declared for one locale. It is built
//! once through [`DescriptorBuilder`] and never mutated afterwards, so it can
//! be shared freely between resolved chains and worker threads.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;

use crate::error::{I18nError, Result};
use crate::locale::LocaleTag;
use crate::plural::{Gender, PluralCategory};

/// Identity of a user-declared Messages/Constants interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterfaceId(Arc<str>);

impl InterfaceId {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name after the last `.` or `::` separator.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        let name = self.as_str();
        let after_path = name.rsplit("::").next().unwrap_or(name);
        after_path.rsplit('.').next().unwrap_or(after_path)
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InterfaceId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for InterfaceId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A resource value: a single string or an ordered list of names.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ResourceValue {
    Text(String),
    List(Vec<String>),
}

impl ResourceValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::List(_) => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Text(_) => None,
            Self::List(items) => Some(items),
        }
    }

    /// The value as a list. Text is split on commas not escaped as `\,`,
    /// with surrounding whitespace trimmed from each item; empty text is an
    /// empty list.
    #[must_use]
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Self::List(items) => items.clone(),
            Self::Text(text) if text.is_empty() => Vec::new(),
            Self::Text(text) => split_unescaped_commas(text),
        }
    }
}

fn split_unescaped_commas(text: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some(',') => current.push(','),
                Some(other) => {
                    current.push('\\');
                    current.push(other);
                }
                None => current.push('\\'),
            },
            ',' => items.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(ch),
        }
    }
    items.push(current.trim().to_string());
    items
}

impl fmt::Display for ResourceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<&str> for ResourceValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ResourceValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<String>> for ResourceValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<&[&str]> for ResourceValue {
    fn from(items: &[&str]) -> Self {
        Self::List(items.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ResourceValue {
    fn from(items: [&str; N]) -> Self {
        Self::List(items.iter().map(|s| (*s).to_string()).collect())
    }
}

/// A selector form a value may vary by: a plural category (`one`), a gender
/// (`female`), an exact count (`=0`) or a compound of those (`one|female`).
///
/// Forms are normalized to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct SelectorForm(String);

impl SelectorForm {
    pub fn new(form: &str) -> Result<Self> {
        let normalized = form.trim().to_ascii_lowercase();
        let valid = !normalized.is_empty()
            && normalized
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '=' | '|' | '_' | '-'));
        if valid {
            Ok(Self(normalized))
        } else {
            Err(I18nError::InvalidSelectorForm(form.to_string()))
        }
    }

    /// The form matching an exact count, e.g. `=0`.
    #[must_use]
    pub fn exact(count: i64) -> Self {
        Self(format!("={count}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SelectorForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PluralCategory> for SelectorForm {
    fn from(category: PluralCategory) -> Self {
        Self(category.as_str().to_string())
    }
}

impl From<Gender> for SelectorForm {
    fn from(gender: Gender) -> Self {
        Self(gender.as_str().to_string())
    }
}

/// All values declared for one key: the default plus selector overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    default: Option<ResourceValue>,
    forms: BTreeMap<SelectorForm, ResourceValue>,
}

impl Entry {
    #[must_use]
    pub fn default_value(&self) -> Option<&ResourceValue> {
        self.default.as_ref()
    }

    #[must_use]
    pub fn forms(&self) -> &BTreeMap<SelectorForm, ResourceValue> {
        &self.forms
    }
}

/// One locale's key/value bundle for an interface.
#[derive(Debug, Clone)]
pub struct ResourceDescriptor {
    interface: InterfaceId,
    locale: LocaleTag,
    entries: AHashMap<String, Entry>,
    source: Option<String>,
}

impl ResourceDescriptor {
    pub fn builder(interface: impl Into<InterfaceId>, locale: LocaleTag) -> DescriptorBuilder {
        DescriptorBuilder {
            interface: interface.into(),
            locale,
            entries: AHashMap::new(),
            source: None,
            conflict: None,
        }
    }

    #[must_use]
    pub fn interface(&self) -> &InterfaceId {
        &self.interface
    }

    #[must_use]
    pub fn locale(&self) -> &LocaleTag {
        &self.locale
    }

    /// Where the descriptor was discovered (file path, class name), if known.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// The key's default (non-selector) value.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&ResourceValue> {
        self.entries.get(key).and_then(Entry::default_value)
    }

    /// The key's override for `form`, falling back to the key's default value
    /// in this same descriptor.
    #[must_use]
    pub fn lookup_with_selector(&self, key: &str, form: &SelectorForm) -> Option<&ResourceValue> {
        let entry = self.entries.get(key)?;
        entry.forms.get(form).or(entry.default.as_ref())
    }

    /// The key's override for `form` only, without the default.
    #[must_use]
    pub fn form(&self, key: &str, form: &SelectorForm) -> Option<&ResourceValue> {
        self.entries.get(key)?.forms.get(form)
    }

    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Selector forms declared for `key`, in sorted order.
    pub fn forms(&self, key: &str) -> impl Iterator<Item = &SelectorForm> {
        self.entries.get(key).into_iter().flat_map(|e| e.forms.keys())
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// All declared keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Accumulates entries for a [`ResourceDescriptor`].
///
/// A repeated default value for a key replaces the earlier one. A repeated
/// selector form with a different value is recorded as a conflict and
/// reported by [`build`](Self::build).
#[derive(Debug)]
pub struct DescriptorBuilder {
    interface: InterfaceId,
    locale: LocaleTag,
    entries: AHashMap<String, Entry>,
    source: Option<String>,
    conflict: Option<I18nError>,
}

impl DescriptorBuilder {
    #[must_use]
    pub fn value(mut self, key: impl Into<String>, value: impl Into<ResourceValue>) -> Self {
        self.insert_value(key, value);
        self
    }

    #[must_use]
    pub fn form(
        mut self,
        key: impl Into<String>,
        form: SelectorForm,
        value: impl Into<ResourceValue>,
    ) -> Self {
        self.insert_form(key, form, value);
        self
    }

    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn insert_value(&mut self, key: impl Into<String>, value: impl Into<ResourceValue>) {
        let key = key.into();
        let entry = self.entries.entry(key.clone()).or_default();
        if entry.default.replace(value.into()).is_some() {
            tracing::warn!(locale = %self.locale, key = %key, "later default value replaces earlier one");
        }
    }

    pub fn insert_form(
        &mut self,
        key: impl Into<String>,
        form: SelectorForm,
        value: impl Into<ResourceValue>,
    ) {
        let key = key.into();
        let value = value.into();
        let entry = self.entries.entry(key.clone()).or_default();
        match entry.forms.get(&form) {
            Some(existing) if *existing != value => {
                tracing::warn!(
                    locale = %self.locale,
                    key = %key,
                    form = %form,
                    "conflicting selector override"
                );
                if self.conflict.is_none() {
                    self.conflict = Some(I18nError::AmbiguousSelectorOverride {
                        key,
                        form: form.to_string(),
                        locale: self.locale.clone(),
                        first: existing.to_string(),
                        second: value.to_string(),
                    });
                }
            }
            Some(_) => {}
            None => {
                entry.forms.insert(form, value);
            }
        }
    }

    pub fn build(self) -> Result<ResourceDescriptor> {
        if let Some(conflict) = self.conflict {
            return Err(conflict);
        }
        Ok(ResourceDescriptor {
            interface: self.interface,
            locale: self.locale,
            entries: self.entries,
            source: self.source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(s: &str) -> SelectorForm {
        SelectorForm::new(s).unwrap()
    }

    fn az() -> LocaleTag {
        LocaleTag::parse("az").unwrap()
    }

    #[test]
    fn plain_lookup() {
        let d = ResourceDescriptor::builder("Messages", az())
            .value("greeting", "Salam")
            .build()
            .unwrap();
        assert_eq!(d.lookup("greeting"), Some(&ResourceValue::from("Salam")));
        assert_eq!(d.lookup("missing"), None);
        assert_eq!(d.locale(), &az());
    }

    #[test]
    fn selector_override_wins_over_default() {
        let d = ResourceDescriptor::builder("Messages", az())
            .value("items", "{0} items")
            .form("items", form("one"), "{0} item")
            .build()
            .unwrap();
        assert_eq!(
            d.lookup_with_selector("items", &form("one")),
            Some(&ResourceValue::from("{0} item"))
        );
        assert_eq!(
            d.lookup_with_selector("items", &form("few")),
            Some(&ResourceValue::from("{0} items"))
        );
    }

    #[test]
    fn selector_miss_falls_back_to_same_descriptor_default() {
        let d = ResourceDescriptor::builder("DateTimeFormatInfo", az())
            .value("erasFull", ["BCE", "CE"])
            .build()
            .unwrap();
        assert_eq!(
            d.lookup_with_selector("erasFull", &form("one")),
            Some(&ResourceValue::from(["BCE", "CE"]))
        );
        assert_eq!(d.form("erasFull", &form("one")), None);
    }

    #[test]
    fn form_without_default_has_no_plain_value() {
        let d = ResourceDescriptor::builder("Messages", az())
            .form("items", form("one"), "one item")
            .build()
            .unwrap();
        assert_eq!(d.lookup("items"), None);
        assert_eq!(d.lookup_with_selector("items", &form("other")), None);
        assert!(d.contains_key("items"));
    }

    #[test]
    fn conflicting_forms_are_ambiguous() {
        let err = ResourceDescriptor::builder("Messages", az())
            .form("items", form("one"), "a")
            .form("items", form("ONE"), "b")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            I18nError::AmbiguousSelectorOverride { ref key, ref form, .. }
                if key == "items" && form == "one"
        ));
    }

    #[test]
    fn identical_repeated_form_is_not_a_conflict() {
        let d = ResourceDescriptor::builder("Messages", az())
            .form("items", form("one"), "a")
            .form("items", form("one"), "a")
            .build();
        assert!(d.is_ok());
    }

    #[tracing_test::traced_test]
    #[test]
    fn repeated_default_last_wins() {
        let d = ResourceDescriptor::builder("Messages", az())
            .value("k", "first")
            .value("k", "second")
            .build()
            .unwrap();
        assert_eq!(d.lookup("k"), Some(&ResourceValue::from("second")));
        assert!(logs_contain("WARN"));
        assert!(logs_contain("later default value replaces earlier one"));
    }

    #[test]
    fn selector_form_validation() {
        assert_eq!(form(" One ").as_str(), "one");
        assert_eq!(form("one|female").as_str(), "one|female");
        assert_eq!(SelectorForm::exact(0).as_str(), "=0");
        assert!(SelectorForm::new("").is_err());
        assert!(SelectorForm::new("one two").is_err());
        assert_eq!(SelectorForm::from(PluralCategory::Few).as_str(), "few");
        assert_eq!(SelectorForm::from(Gender::Male).as_str(), "male");
    }

    #[test]
    fn forms_and_keys_are_sorted() {
        let d = ResourceDescriptor::builder("Messages", az())
            .form("b", form("other"), "x")
            .form("b", form("few"), "y")
            .value("a", "z")
            .build()
            .unwrap();
        assert_eq!(d.keys(), vec!["a", "b"]);
        let forms: Vec<&str> = d.forms("b").map(SelectorForm::as_str).collect();
        assert_eq!(forms, vec!["few", "other"]);
    }

    #[test]
    fn text_to_list_splits_unescaped_commas() {
        let v = ResourceValue::from(r"Q1, Q2 ,a\,b,Q4");
        assert_eq!(v.to_list(), vec!["Q1", "Q2", "a,b", "Q4"]);
        assert!(ResourceValue::from("").to_list().is_empty());
    }

    #[test]
    fn interface_simple_name() {
        assert_eq!(InterfaceId::new("org.app.Messages").simple_name(), "Messages");
        assert_eq!(InterfaceId::new("app::i18n::Labels").simple_name(), "Labels");
        assert_eq!(InterfaceId::new("Plain").simple_name(), "Plain");
    }
}
