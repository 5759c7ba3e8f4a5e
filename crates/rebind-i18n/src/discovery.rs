//! Locale inference from discovered resource names.
//!
//! Resources for an interface `Messages` are named `Messages.properties`
//! (root) and `Messages_<locale>.properties`, e.g. `Messages_az_Cyrl.properties`.

use crate::descriptor::{InterfaceId, ResourceDescriptor};
use crate::error::{I18nError, Result};
use crate::locale::LocaleTag;
use crate::properties::descriptor_from_properties;

pub const PROPERTIES_EXTENSION: &str = "properties";

/// The locale a resource file was declared for.
///
/// `file_name` may include directories and an extension; both are ignored.
pub fn locale_from_resource_name(interface: &InterfaceId, file_name: &str) -> Result<LocaleTag> {
    let invalid = || I18nError::InvalidResourceName {
        interface: interface.to_string(),
        name: file_name.to_string(),
    };

    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let stem = base.split_once('.').map_or(base, |(stem, _)| stem);
    let suffix = stem
        .strip_prefix(interface.simple_name())
        .ok_or_else(invalid)?;

    if suffix.is_empty() {
        return Ok(LocaleTag::root());
    }
    let locale = suffix.strip_prefix('_').ok_or_else(invalid)?;
    if locale.is_empty() {
        return Err(invalid());
    }
    LocaleTag::parse(locale)
}

/// The conventional file name for `interface` in `locale`.
#[must_use]
pub fn resource_name(interface: &InterfaceId, locale: &LocaleTag, extension: &str) -> String {
    if locale.is_root() {
        format!("{}.{extension}", interface.simple_name())
    } else {
        format!("{}_{locale}.{extension}", interface.simple_name())
    }
}

/// Parse a discovered properties file, inferring its locale from the name.
pub fn descriptor_from_named_properties(
    interface: &InterfaceId,
    file_name: &str,
    text: &str,
) -> Result<ResourceDescriptor> {
    let locale = locale_from_resource_name(interface, file_name)?;
    tracing::debug!(interface = %interface, file = file_name, locale = %locale, "discovered resource");
    descriptor_from_properties(interface.clone(), locale, text, Some(file_name))
}
