#![forbid(unsafe_code)]

//! Locale resolution and resource selection for compile-time i18n binding.
//!
//! Given the resources discovered for a Messages/Constants interface and a
//! requested locale, this crate selects the ordered chain of resources that
//! apply, memoizes that chain for the duration of a generation pass, and
//! answers key lookups against it, including plural/gender selector forms.
//!
//! # How it fits in the system
//! Discovery (finding resource files) and code emission belong to the host.
//! They hand this crate [`ResourceDescriptor`]s and receive
//! [`ResourceList`]s and looked-up values back; everything in between is
//! pure, in-memory computation.
//!
//! ```
//! use rebind_i18n::{KeyLookupEngine, LocaleTag, ResourceCache, ResourceDescriptor, ResourceSet};
//!
//! let tag = |s: &str| LocaleTag::parse(s).unwrap();
//! let set = ResourceSet::new(
//!     "DateTimeFormatInfo",
//!     vec![
//!         ResourceDescriptor::builder("DateTimeFormatInfo", tag("root"))
//!             .value("dateFormatFull", "y")
//!             .build()
//!             .unwrap(),
//!         ResourceDescriptor::builder("DateTimeFormatInfo", tag("az_Cyrl"))
//!             .value("dateFormatFull", "EEEE, d, MMMM, y")
//!             .build()
//!             .unwrap(),
//!     ],
//! )
//! .unwrap();
//!
//! let cache = ResourceCache::new();
//! let list = cache.get_or_resolve(&set, &tag("az_Cyrl_AZ"));
//! let found = KeyLookupEngine::default()
//!     .lookup(&list, "dateFormatFull", None)
//!     .unwrap();
//! assert_eq!(found.value.as_text(), Some("EEEE, d, MMMM, y"));
//! ```

pub mod cache;
pub mod config;
pub mod descriptor;
pub mod discovery;
pub mod error;
pub mod locale;
pub mod lookup;
pub mod plural;
pub mod properties;
pub mod resolver;

pub use cache::{CacheKey, CacheStats, ResourceCache};
pub use config::{LookupConfig, SelectorFallback};
pub use descriptor::{
    DescriptorBuilder, Entry, InterfaceId, ResourceDescriptor, ResourceValue, SelectorForm,
};
pub use error::{I18nError, MissingKeyError, Result};
pub use locale::LocaleTag;
pub use lookup::{Binding, FormTable, KeyLookupEngine, Resolved};
pub use plural::{Gender, PluralCategory, PluralRule};
pub use properties::{PropertyEntry, descriptor_from_properties, parse_properties};
pub use resolver::{ResourceList, ResourceResolver, ResourceSet};
