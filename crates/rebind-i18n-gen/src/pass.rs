//! One generation pass over a set of interfaces.
//!
//! # Invariants
//!
//! 1. **Pass-scoped cache**: a [`GenerationPass`] owns its [`ResourceCache`];
//!    nothing resolved in one pass is visible to another.
//!
//! 2. **Failure isolation**: an interface whose keys cannot be enumerated,
//!    bound or emitted is recorded in the [`PassReport`] and the remaining
//!    interfaces still run.
//!
//! 3. **Deterministic report**: report entries follow the input order of
//!    the bundles regardless of which worker handled them.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Oracle error | Host cannot reflect the interface | Interface failed |
//! | Missing required key | No resource and no declared default | Interface failed, or absent if `fail_on_missing` is off |
//! | Plural method on Constants | Invalid declaration | Interface failed |
//! | Emit error | Host rejected the artifact | Interface failed |

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use rebind_i18n::{
    CacheStats, I18nError, InterfaceId, KeyLookupEngine, LocaleTag, MissingKeyError,
    ResourceCache, ResourceList,
};

use crate::artifact::{BoundValue, GeneratedArtifact, MethodBinding, class_name};
use crate::config::GenerationConfig;
use crate::error::{ConfigError, GenerateError, Result};
use crate::source::{ArtifactEmitter, InterfaceBundle, InterfaceKind, InterfaceOracle, KeyDecl};

/// Outcome for one interface.
#[derive(Debug)]
pub struct InterfaceReport {
    pub interface: InterfaceId,
    /// Class names emitted for this interface, in locale order.
    pub emitted: Vec<String>,
    /// `(requested locale, class name)` pairs served by an earlier artifact.
    pub reused: Vec<(LocaleTag, String)>,
    pub error: Option<GenerateError>,
}

impl InterfaceReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of [`GenerationPass::run`].
#[derive(Debug)]
pub struct PassReport {
    pub interfaces: Vec<InterfaceReport>,
    pub cache: CacheStats,
}

impl PassReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.interfaces.iter().all(InterfaceReport::is_success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &InterfaceReport> {
        self.interfaces.iter().filter(|r| !r.is_success())
    }

    #[must_use]
    pub fn emitted_count(&self) -> usize {
        self.interfaces.iter().map(|r| r.emitted.len()).sum()
    }
}

/// Binds interfaces to their locale resources for one compilation.
#[derive(Debug)]
pub struct GenerationPass {
    config: GenerationConfig,
    locales: Vec<LocaleTag>,
    engine: KeyLookupEngine,
    cache: ResourceCache,
}

impl GenerationPass {
    /// Start a pass with a fresh cache. Fails if `config` does not validate.
    pub fn new(config: GenerationConfig) -> Result<Self> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors).into());
        }
        let locales = config.parsed_locales()?;
        Ok(Self {
            engine: KeyLookupEngine::new(config.lookup_config()),
            locales,
            config,
            cache: ResourceCache::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    #[must_use]
    pub fn cache(&self) -> &ResourceCache {
        &self.cache
    }

    /// End the pass, discarding the cache.
    pub fn finish(self) -> CacheStats {
        let stats = self.cache.stats();
        tracing::debug!(
            entries = stats.entries,
            hits = stats.hits,
            computations = stats.computations,
            "generation pass finished; cache discarded"
        );
        stats
    }

    /// Bind every method of `bundle` for `locale`.
    pub fn bind(
        &self,
        bundle: &InterfaceBundle,
        oracle: &dyn InterfaceOracle,
        locale: &LocaleTag,
    ) -> Result<GeneratedArtifact> {
        let keys = oracle.keys(bundle.interface())?;
        self.bind_keys(bundle, &keys, locale)
    }

    /// Bind every bundle for every configured locale and emit the artifacts.
    pub fn run(
        &self,
        bundles: &[InterfaceBundle],
        oracle: &dyn InterfaceOracle,
        emitter: &dyn ArtifactEmitter,
    ) -> PassReport {
        let started = Instant::now();
        let workers = self.config.workers.min(bundles.len()).max(1);
        tracing::info!(
            interfaces = bundles.len(),
            locales = self.locales.len(),
            workers,
            "generation pass started"
        );

        let emitted_classes = Mutex::new(HashSet::new());
        let mut reports: Vec<Option<InterfaceReport>> = Vec::with_capacity(bundles.len());

        if workers == 1 {
            reports.extend(
                bundles
                    .iter()
                    .map(|b| Some(self.run_interface(b, oracle, emitter, &emitted_classes))),
            );
        } else {
            let next = AtomicUsize::new(0);
            let slots: Mutex<Vec<Option<InterfaceReport>>> =
                Mutex::new((0..bundles.len()).map(|_| None).collect());
            std::thread::scope(|s| {
                for _ in 0..workers {
                    s.spawn(|| {
                        loop {
                            let idx = next.fetch_add(1, Ordering::Relaxed);
                            let Some(bundle) = bundles.get(idx) else {
                                break;
                            };
                            let report =
                                self.run_interface(bundle, oracle, emitter, &emitted_classes);
                            slots.lock().unwrap_or_else(|e| e.into_inner())[idx] =
                                Some(report);
                        }
                    });
                }
            });
            reports = slots.into_inner().unwrap_or_else(|e| e.into_inner());
        }

        let report = PassReport {
            interfaces: reports.into_iter().flatten().collect(),
            cache: self.cache.stats(),
        };
        tracing::info!(
            emitted = report.emitted_count(),
            failed = report.failures().count(),
            cache_hits = report.cache.hits,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "generation pass complete"
        );
        report
    }

    fn run_interface(
        &self,
        bundle: &InterfaceBundle,
        oracle: &dyn InterfaceOracle,
        emitter: &dyn ArtifactEmitter,
        emitted_classes: &Mutex<HashSet<(InterfaceId, String)>>,
    ) -> InterfaceReport {
        let interface = bundle.interface().clone();
        let mut report = InterfaceReport {
            interface: interface.clone(),
            emitted: Vec::new(),
            reused: Vec::new(),
            error: None,
        };

        let outcome = oracle.keys(&interface).and_then(|keys| {
            for locale in &self.locales {
                let artifact = self.bind_keys(bundle, &keys, locale)?;
                let class = (interface.clone(), artifact.class_name.clone());
                let first = !self.config.reuse_equivalent_artifacts
                    || emitted_classes
                        .lock()
                        .unwrap_or_else(|e| e.into_inner())
                        .insert(class);
                if first {
                    emitter.emit(&artifact)?;
                    report.emitted.push(artifact.class_name);
                } else {
                    tracing::debug!(
                        interface = %interface,
                        requested = %locale,
                        class = %artifact.class_name,
                        "reusing equivalent artifact"
                    );
                    report.reused.push((locale.clone(), artifact.class_name));
                }
            }
            Ok(())
        });

        if let Err(err) = outcome {
            tracing::warn!(interface = %interface, error = %err, "interface generation failed");
            report.error = Some(err);
        }
        report
    }

    fn bind_keys(
        &self,
        bundle: &InterfaceBundle,
        keys: &[KeyDecl],
        locale: &LocaleTag,
    ) -> Result<GeneratedArtifact> {
        let list = self.cache.get_or_resolve(&bundle.resources, locale);
        let effective = list.effective_locale();
        let class_name = class_name(bundle.interface(), &effective);

        let methods = keys
            .iter()
            .map(|decl| {
                Ok(MethodBinding {
                    method: decl.method.clone(),
                    key: decl.lookup_key().to_string(),
                    value: self.bind_method(bundle, &list, decl)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            interface = %bundle.interface(),
            requested = %locale,
            effective = %effective,
            methods = methods.len(),
            "bound interface"
        );
        Ok(GeneratedArtifact {
            interface: bundle.interface().clone(),
            kind: bundle.kind,
            requested: locale.clone(),
            effective,
            class_name,
            methods,
        })
    }

    fn bind_method(
        &self,
        bundle: &InterfaceBundle,
        list: &ResourceList,
        decl: &KeyDecl,
    ) -> Result<BoundValue> {
        let key = decl.lookup_key();
        let found = if decl.plural {
            if bundle.kind == InterfaceKind::Constants {
                return Err(GenerateError::InvalidDeclaration {
                    interface: bundle.interface().to_string(),
                    method: decl.method.clone(),
                    reason: "plural selection requires a Messages interface".into(),
                });
            }
            self.engine.collect_forms(list, key).map(BoundValue::Selectable)
        } else {
            self.engine
                .lookup(list, key, None)
                .map(|r| BoundValue::Resolved(r.to_binding()))
        };

        match found {
            Ok(value) => Ok(value),
            Err(missing) => self.unresolved(bundle, decl, missing),
        }
    }

    fn unresolved(
        &self,
        bundle: &InterfaceBundle,
        decl: &KeyDecl,
        missing: MissingKeyError,
    ) -> Result<BoundValue> {
        if let Some(value) = &decl.default {
            tracing::debug!(
                interface = %bundle.interface(),
                key = decl.lookup_key(),
                "no resource value; using declared default"
            );
            return Ok(BoundValue::Declared {
                value: value.clone(),
            });
        }
        if decl.optional {
            return Ok(BoundValue::Absent);
        }
        if self.config.fail_on_missing {
            return Err(I18nError::MissingKey(missing).into());
        }
        tracing::warn!(
            interface = %bundle.interface(),
            key = decl.lookup_key(),
            error = %missing,
            "required key missing; bound as absent"
        );
        Ok(BoundValue::Absent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{CollectingEmitter, StaticOracle};
    use rebind_i18n::{ResourceDescriptor, ResourceSet, ResourceValue, SelectorForm};
    use tracing_test::traced_test;

    fn tag(raw: &str) -> LocaleTag {
        LocaleTag::parse(raw).unwrap()
    }

    fn date_bundle() -> InterfaceBundle {
        let d = |locale: &str, value: &str| {
            ResourceDescriptor::builder("DateTimeFormatInfo", tag(locale))
                .value("dateFormatFull", value)
                .build()
                .unwrap()
        };
        let root = ResourceDescriptor::builder("DateTimeFormatInfo", LocaleTag::root())
            .value("dateFormatFull", "y")
            .value("quartersFull", ["Q1", "Q2", "Q3", "Q4"])
            .build()
            .unwrap();
        InterfaceBundle::new(
            InterfaceKind::Constants,
            ResourceSet::new(
                "DateTimeFormatInfo",
                vec![root, d("az", "d, y"), d("az_Cyrl", "EEEE, d, MMMM, y")],
            )
            .unwrap(),
        )
    }

    fn messages_bundle() -> InterfaceBundle {
        let one = SelectorForm::new("one").unwrap();
        InterfaceBundle::new(
            InterfaceKind::Messages,
            ResourceSet::new(
                "org.app.Messages",
                vec![
                    ResourceDescriptor::builder("org.app.Messages", LocaleTag::root())
                        .value("files", "{0} files")
                        .form("files", one.clone(), "{0} file")
                        .value("page.title", "Home")
                        .build()
                        .unwrap(),
                    ResourceDescriptor::builder("org.app.Messages", tag("az"))
                        .value("files", "{0} fayl")
                        .build()
                        .unwrap(),
                ],
            )
            .unwrap(),
        )
    }

    fn oracle() -> StaticOracle {
        StaticOracle::new()
            .with_interface(
                "DateTimeFormatInfo",
                [KeyDecl::new("dateFormatFull"), KeyDecl::new("quartersFull")],
            )
            .with_interface(
                "org.app.Messages",
                [
                    KeyDecl::new("files").plural(),
                    KeyDecl::new("title").with_key("page.title"),
                    KeyDecl::new("greeting").with_default("Hello"),
                    KeyDecl::new("tooltip").optional(),
                ],
            )
    }

    fn pass(locales: &[&str]) -> GenerationPass {
        GenerationPass::new(GenerationConfig {
            locales: locales.iter().map(|s| s.to_string()).collect(),
            ..GenerationConfig::default()
        })
        .unwrap()
    }

    fn resolved(artifact: &GeneratedArtifact, method: &str) -> ResourceValue {
        match &artifact.method(method).unwrap().value {
            BoundValue::Resolved(binding) => binding.value.clone(),
            other => panic!("{method} not resolved: {other:?}"),
        }
    }

    #[test]
    fn binds_az_cyrl_az_through_the_chain() {
        let pass = pass(&["az_Cyrl_AZ"]);
        let artifact = pass
            .bind(&date_bundle(), &oracle(), &tag("az_Cyrl_AZ"))
            .unwrap();
        assert_eq!(artifact.effective, tag("az_Cyrl"));
        assert_eq!(artifact.class_name, "DateTimeFormatInfo_az_Cyrl");
        assert_eq!(
            resolved(&artifact, "dateFormatFull"),
            ResourceValue::from("EEEE, d, MMMM, y")
        );
        assert_eq!(
            resolved(&artifact, "quartersFull"),
            ResourceValue::from(["Q1", "Q2", "Q3", "Q4"])
        );
    }

    #[test]
    fn declared_defaults_optional_and_key_overrides() {
        let pass = pass(&["az"]);
        let artifact = pass.bind(&messages_bundle(), &oracle(), &tag("az")).unwrap();

        assert_eq!(resolved(&artifact, "title"), ResourceValue::from("Home"));
        assert_eq!(artifact.method("title").unwrap().key, "page.title");
        assert_eq!(
            artifact.method("greeting").unwrap().value,
            BoundValue::Declared {
                value: ResourceValue::from("Hello")
            }
        );
        assert_eq!(artifact.method("tooltip").unwrap().value, BoundValue::Absent);
    }

    #[test]
    fn plural_methods_collect_forms() {
        let pass = pass(&["az"]);
        let artifact = pass.bind(&messages_bundle(), &oracle(), &tag("az")).unwrap();
        let BoundValue::Selectable(table) = &artifact.method("files").unwrap().value else {
            panic!("files should be selectable");
        };
        let default = table.default.as_ref().unwrap();
        assert_eq!(default.value, ResourceValue::from("{0} fayl"));
        assert_eq!(default.locale, tag("az"));
        let one = &table.forms[&SelectorForm::new("one").unwrap()];
        // az has only a default, which wins over root's `one` form.
        assert_eq!(one.value, ResourceValue::from("{0} fayl"));
    }

    #[test]
    fn missing_required_key_fails_the_interface() {
        let oracle = StaticOracle::new()
            .with_interface("DateTimeFormatInfo", [KeyDecl::new("nonexistentKey")]);
        let err = pass(&["az_Cyrl_AZ"])
            .bind(&date_bundle(), &oracle, &tag("az_Cyrl_AZ"))
            .unwrap_err();
        match err {
            GenerateError::I18n(I18nError::MissingKey(missing)) => {
                assert_eq!(missing.key, "nonexistentKey");
                assert_eq!(missing.tried, vec![tag("az_Cyrl"), tag("az"), LocaleTag::root()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[traced_test]
    #[test]
    fn missing_key_can_be_bound_absent() {
        let oracle = StaticOracle::new()
            .with_interface("DateTimeFormatInfo", [KeyDecl::new("nonexistentKey")]);
        let pass = GenerationPass::new(GenerationConfig {
            fail_on_missing: false,
            ..GenerationConfig::default()
        })
        .unwrap();
        let artifact = pass
            .bind(&date_bundle(), &oracle, &LocaleTag::root())
            .unwrap();
        assert_eq!(
            artifact.method("nonexistentKey").unwrap().value,
            BoundValue::Absent
        );
        assert!(logs_contain("required key missing; bound as absent"));
    }

    #[test]
    fn plural_on_constants_is_rejected() {
        let oracle = StaticOracle::new()
            .with_interface("DateTimeFormatInfo", [KeyDecl::new("quartersFull").plural()]);
        let err = pass(&["az"])
            .bind(&date_bundle(), &oracle, &tag("az"))
            .unwrap_err();
        assert!(matches!(err, GenerateError::InvalidDeclaration { .. }));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = GenerationPass::new(GenerationConfig {
            workers: 0,
            ..GenerationConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, GenerateError::Config(ConfigError::Validation(_))));
    }

    #[traced_test]
    #[test]
    fn failing_interface_does_not_abort_others() {
        let orphan = InterfaceBundle::new(
            InterfaceKind::Messages,
            ResourceSet::empty("org.app.Orphan"),
        );
        let bundles = vec![date_bundle(), orphan, messages_bundle()];
        let emitter = CollectingEmitter::new();
        let report = pass(&["az", "root"]).run(&bundles, &oracle(), &emitter);

        assert!(!report.is_success());
        assert_eq!(report.interfaces.len(), 3);
        assert!(report.interfaces[0].is_success());
        assert!(matches!(
            report.interfaces[1].error,
            Some(GenerateError::Oracle { .. })
        ));
        assert!(report.interfaces[2].is_success());
        assert_eq!(report.failures().count(), 1);
        assert_eq!(emitter.artifacts().len(), 4);
        assert!(logs_contain("interface generation failed"));
        assert!(logs_contain("generation pass complete"));
    }

    #[test]
    fn equivalent_locales_share_an_artifact() {
        let emitter = CollectingEmitter::new();
        let report = pass(&["az_Cyrl_AZ", "az_Cyrl", "ka", "root"]).run(
            &[date_bundle()],
            &oracle(),
            &emitter,
        );
        let r = &report.interfaces[0];
        assert_eq!(r.emitted, vec!["DateTimeFormatInfo_az_Cyrl", "DateTimeFormatInfo_default"]);
        assert_eq!(
            r.reused,
            vec![
                (tag("az_Cyrl"), "DateTimeFormatInfo_az_Cyrl".to_string()),
                (LocaleTag::root(), "DateTimeFormatInfo_default".to_string()),
            ]
        );
        assert_eq!(emitter.artifacts().len(), 2);
    }

    #[test]
    fn reuse_can_be_disabled() {
        let pass = GenerationPass::new(GenerationConfig {
            locales: vec!["az_Cyrl_AZ".into(), "az_Cyrl".into()],
            reuse_equivalent_artifacts: false,
            ..GenerationConfig::default()
        })
        .unwrap();
        let emitter = CollectingEmitter::new();
        let report = pass.run(&[date_bundle()], &oracle(), &emitter);
        assert_eq!(report.emitted_count(), 2);
        assert!(report.interfaces[0].reused.is_empty());
    }

    #[test]
    fn parallel_run_matches_sequential() {
        let bundles = vec![date_bundle(), messages_bundle(), date_bundle_named("Other")];
        let oracle = oracle().with_interface("Other", [KeyDecl::new("dateFormatFull")]);
        let locales = ["az_Cyrl_AZ", "az", "ka_GE"];

        let run = |workers: usize| {
            let pass = GenerationPass::new(GenerationConfig {
                locales: locales.iter().map(|s| s.to_string()).collect(),
                workers,
                ..GenerationConfig::default()
            })
            .unwrap();
            let emitter = CollectingEmitter::new();
            let report = pass.run(&bundles, &oracle, &emitter);
            assert!(report.is_success());
            let order: Vec<String> = report
                .interfaces
                .iter()
                .map(|r| r.interface.to_string())
                .collect();
            (order, emitter.artifacts())
        };

        assert_eq!(run(1), run(3));
    }

    #[test]
    fn cache_is_pass_scoped() {
        let bundles = vec![date_bundle()];
        let first = pass(&["az_Cyrl_AZ", "az"]);
        first.run(&bundles, &oracle(), &CollectingEmitter::new());
        assert_eq!(first.cache().len(), 2);
        let stats = first.finish();
        assert_eq!(stats.computations, 2);

        let second = pass(&["az_Cyrl_AZ", "az"]);
        assert!(second.cache().is_empty());
    }

    #[test]
    fn bind_reuses_cached_lists() {
        let pass = pass(&["az"]);
        let bundle = date_bundle();
        pass.bind(&bundle, &oracle(), &tag("az")).unwrap();
        pass.bind(&bundle, &oracle(), &tag("az")).unwrap();
        let stats = pass.cache().stats();
        assert_eq!(stats.computations, 1);
        assert_eq!(stats.hits, 1);
    }

    fn date_bundle_named(name: &str) -> InterfaceBundle {
        InterfaceBundle::new(
            InterfaceKind::Constants,
            ResourceSet::new(
                name,
                vec![
                    ResourceDescriptor::builder(name, LocaleTag::root())
                        .value("dateFormatFull", "y")
                        .build()
                        .unwrap(),
                ],
            )
            .unwrap(),
        )
    }
}
