#![forbid(unsafe_code)]

//! CLDR date/time format data for `rebind-i18n`.
//!
//! Locale data is a flat key/value table per locale rather than a type per
//! locale; a child table holds only what differs from its parent, and the
//! fallback chain supplies the rest at lookup time.
//!
//! ```
//! use rebind_i18n::{LocaleTag, ResourceCache};
//! use rebind_i18n_cldr::{DateTimeFormatInfo, FormatLength, date_time_resources};
//!
//! let resources = date_time_resources().unwrap();
//! let cache = ResourceCache::new();
//! let az = LocaleTag::parse("az_Cyrl_AZ").unwrap();
//! let info = DateTimeFormatInfo::resolve(&cache, &resources, &az).unwrap();
//! assert_eq!(info.date_format(FormatLength::Full), "EEEE, d, MMMM, y");
//! assert_eq!(info.quarters_full, ["Q1", "Q2", "Q3", "Q4"]);
//! ```

pub mod data;
mod error;
mod format_info;
mod resources;

pub use error::{CldrError, Result};
pub use format_info::{DateTimeFormatInfo, FormatLength, LengthPatterns, SkeletonPatterns};
pub use resources::{DATE_TIME_INTERFACE, bundled_locales, date_time_resources, descriptor};
