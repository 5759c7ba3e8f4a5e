//! Bundled tables as resource descriptors.

use rebind_i18n::{LocaleTag, ResourceDescriptor, ResourceSet, ResourceValue};

use crate::data::{Cell, LocaleTable, TABLES};
use crate::error::Result;

/// Interface the date/time tables are bound to.
pub const DATE_TIME_INTERFACE: &str = "DateTimeFormatInfo";

impl From<Cell> for ResourceValue {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Text(text) => ResourceValue::from(text),
            Cell::List(items) => ResourceValue::from(items),
        }
    }
}

/// The descriptor for one table.
pub fn descriptor(table: &LocaleTable) -> Result<ResourceDescriptor> {
    let locale = LocaleTag::parse(table.locale)?;
    let builder = table
        .entries
        .iter()
        .fold(
            ResourceDescriptor::builder(DATE_TIME_INTERFACE, locale),
            |builder, (key, cell)| builder.value(*key, *cell),
        )
        .source(format!("cldr:{}", table_name(table)));
    Ok(builder.build()?)
}

/// Every bundled date/time table, indexed by locale.
pub fn date_time_resources() -> Result<ResourceSet> {
    let descriptors = TABLES
        .iter()
        .map(|table| descriptor(table))
        .collect::<Result<Vec<_>>>()?;
    let set = ResourceSet::new(DATE_TIME_INTERFACE, descriptors)?;
    tracing::debug!(locales = set.len(), "loaded date/time tables");
    Ok(set)
}

/// Locales with a bundled table.
#[must_use]
pub fn bundled_locales() -> Vec<LocaleTag> {
    TABLES
        .iter()
        .filter_map(|table| LocaleTag::parse(table.locale).ok())
        .collect()
}

fn table_name(table: &LocaleTable) -> &'static str {
    if table.locale.is_empty() {
        "root"
    } else {
        table.locale
    }
}
