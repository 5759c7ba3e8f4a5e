//! Error types for locale parsing, resource construction and key lookup.

use std::fmt;

use thiserror::Error;

use crate::locale::LocaleTag;

/// A required key was absent from every descriptor of a resolved chain.
///
/// `tried` lists the locales that were consulted, most specific first, so a
/// diagnostic can name exactly where the key was expected. `chain` is the
/// full fallback chain of the requested locale, including locales with no
/// resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct MissingKeyError {
    pub key: String,
    pub tried: Vec<LocaleTag>,
    pub chain: Vec<LocaleTag>,
}

fn write_tags(f: &mut fmt::Formatter<'_>, tags: &[LocaleTag]) -> fmt::Result {
    for (idx, tag) in tags.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{tag}")?;
    }
    Ok(())
}

impl fmt::Display for MissingKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no resource provides key '{}' (tried: ", self.key)?;
        if self.tried.is_empty() {
            f.write_str("<no resources>")?;
            if !self.chain.is_empty() {
                f.write_str(" for chain ")?;
                write_tags(f, &self.chain)?;
            }
        }
        write_tags(f, &self.tried)?;
        f.write_str(")")
    }
}

/// Errors from i18n operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum I18nError {
    /// A locale string could not be split into valid subtags.
    #[error("malformed locale tag '{tag}': {reason}")]
    MalformedLocaleTag { tag: String, reason: String },

    #[error(transparent)]
    MissingKey(#[from] MissingKeyError),

    /// The same key and selector form were declared twice with different values.
    #[error(
        "ambiguous selector override for key '{key}' form '{form}' in locale '{locale}': \
         '{first}' vs '{second}'"
    )]
    AmbiguousSelectorOverride {
        key: String,
        form: String,
        locale: LocaleTag,
        first: String,
        second: String,
    },

    /// Two descriptors of one interface were declared for the same locale.
    #[error("interface '{interface}' has more than one resource for locale '{locale}'")]
    DuplicateLocaleResource { interface: String, locale: LocaleTag },

    /// A descriptor was handed to a resource set of a different interface.
    #[error("resource for interface '{found}' cannot be added to interface '{expected}'")]
    InterfaceMismatch { expected: String, found: String },

    #[error("invalid selector form '{0}'")]
    InvalidSelectorForm(String),

    /// A properties bundle could not be parsed.
    #[error("parse error at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("resource name '{name}' does not belong to interface '{interface}'")]
    InvalidResourceName { interface: String, name: String },
}

pub type Result<T> = std::result::Result<T, I18nError>;
