#![forbid(unsafe_code)]

//! Generation pass for localizable interfaces.
//!
//! A host compiler reflects each user-declared Messages or Constants
//! interface into [`KeyDecl`]s, discovers its resource bundles, and hands
//! both to a [`GenerationPass`]. The pass resolves every configured locale
//! through a pass-scoped [`ResourceCache`](rebind_i18n::ResourceCache),
//! binds each method to a value, and emits one [`GeneratedArtifact`] per
//! distinct effective locale.
//!
//! ```
//! use rebind_i18n::{LocaleTag, ResourceDescriptor, ResourceSet};
//! use rebind_i18n_gen::{
//!     CollectingEmitter, GenerationConfig, GenerationPass, InterfaceBundle, InterfaceKind,
//!     KeyDecl, StaticOracle,
//! };
//!
//! let resources = ResourceSet::new(
//!     "Messages",
//!     vec![
//!         ResourceDescriptor::builder("Messages", LocaleTag::root())
//!             .value("title", "Home")
//!             .build()
//!             .unwrap(),
//!     ],
//! )
//! .unwrap();
//! let bundles = [InterfaceBundle::new(InterfaceKind::Messages, resources)];
//! let oracle = StaticOracle::new().with_interface("Messages", [KeyDecl::new("title")]);
//!
//! let config = GenerationConfig {
//!     locales: vec!["az_Cyrl_AZ".into(), "en".into()],
//!     ..GenerationConfig::default()
//! };
//! let pass = GenerationPass::new(config).unwrap();
//! let emitter = CollectingEmitter::new();
//! let report = pass.run(&bundles, &oracle, &emitter);
//!
//! assert!(report.is_success());
//! // Both locales fall back to root and share one artifact.
//! assert_eq!(report.interfaces[0].emitted, ["Messages_default"]);
//! ```

mod artifact;
mod config;
mod discover;
mod emit;
mod error;
mod pass;
mod source;

pub use artifact::{BoundValue, GeneratedArtifact, MethodBinding, class_name};
pub use config::GenerationConfig;
pub use discover::bundle_from_dir;
pub use emit::JsonArtifactEmitter;
pub use error::{ConfigError, GenerateError, Result};
pub use pass::{GenerationPass, InterfaceReport, PassReport};
pub use source::{
    ArtifactEmitter, CollectingEmitter, InterfaceBundle, InterfaceKind, InterfaceOracle, KeyDecl,
    StaticOracle,
};
