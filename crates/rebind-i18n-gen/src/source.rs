//! What the host compiler hands to a generation pass.
//!
//! Interface reflection and artifact emission belong to the host. The pass
//! sees them only through [`InterfaceOracle`] ("which keys does this
//! interface declare?") and [`ArtifactEmitter`] ("write this artifact").

use std::sync::Mutex;

use ahash::AHashMap;
use rebind_i18n::{InterfaceId, ResourceSet, ResourceValue};
use serde::{Deserialize, Serialize};

use crate::artifact::GeneratedArtifact;
use crate::error::{GenerateError, Result};

/// The flavor of a user-declared localizable interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceKind {
    /// Parameterized messages; methods may select on a plural count.
    Messages,
    /// Fixed values: strings, string lists, numbers.
    Constants,
}

/// One method of a localizable interface, as the host reflected it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDecl {
    pub method: String,
    /// Explicit resource key; the method name is used when absent.
    pub key: Option<String>,
    /// Value declared on the method itself, used when no resource has one.
    pub default: Option<ResourceValue>,
    /// The method takes a count argument and selects a plural form.
    pub plural: bool,
    /// Absence from every resource is not an error.
    pub optional: bool,
}

impl KeyDecl {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            key: None,
            default: None,
            plural: false,
            optional: false,
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<ResourceValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn plural(mut self) -> Self {
        self.plural = true;
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// The key resources are searched under.
    #[must_use]
    pub fn lookup_key(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.method)
    }
}

/// An interface with every resource discovered for it.
#[derive(Debug, Clone)]
pub struct InterfaceBundle {
    pub kind: InterfaceKind,
    pub resources: ResourceSet,
}

impl InterfaceBundle {
    pub fn new(kind: InterfaceKind, resources: ResourceSet) -> Self {
        Self { kind, resources }
    }

    #[must_use]
    pub fn interface(&self) -> &InterfaceId {
        self.resources.interface()
    }
}

/// Enumerates the keys an interface declares.
pub trait InterfaceOracle: Send + Sync {
    fn keys(&self, interface: &InterfaceId) -> Result<Vec<KeyDecl>>;
}

/// Receives finished artifacts.
pub trait ArtifactEmitter: Send + Sync {
    fn emit(&self, artifact: &GeneratedArtifact) -> Result<()>;
}

/// An oracle backed by declarations registered up front.
#[derive(Debug, Default)]
pub struct StaticOracle {
    interfaces: AHashMap<InterfaceId, Vec<KeyDecl>>,
}

impl StaticOracle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_interface(
        mut self,
        interface: impl Into<InterfaceId>,
        keys: impl IntoIterator<Item = KeyDecl>,
    ) -> Self {
        self.interfaces
            .insert(interface.into(), keys.into_iter().collect());
        self
    }
}

impl InterfaceOracle for StaticOracle {
    fn keys(&self, interface: &InterfaceId) -> Result<Vec<KeyDecl>> {
        self.interfaces
            .get(interface)
            .cloned()
            .ok_or_else(|| GenerateError::Oracle {
                interface: interface.to_string(),
                reason: "interface is not declared".into(),
            })
    }
}

/// An emitter that keeps every artifact in memory.
#[derive(Debug, Default)]
pub struct CollectingEmitter {
    artifacts: Mutex<Vec<GeneratedArtifact>>,
}

impl CollectingEmitter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every artifact emitted so far, sorted by class name.
    #[must_use]
    pub fn artifacts(&self) -> Vec<GeneratedArtifact> {
        let mut out = self
            .artifacts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        out.sort_by(|a, b| a.class_name.cmp(&b.class_name));
        out
    }
}

impl ArtifactEmitter for CollectingEmitter {
    fn emit(&self, artifact: &GeneratedArtifact) -> Result<()> {
        self.artifacts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(artifact.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_override_wins_over_method_name() {
        assert_eq!(KeyDecl::new("title").lookup_key(), "title");
        assert_eq!(
            KeyDecl::new("title").with_key("page.title").lookup_key(),
            "page.title"
        );
    }

    #[test]
    fn static_oracle_rejects_unknown_interfaces() {
        let oracle = StaticOracle::new().with_interface("Messages", [KeyDecl::new("hi")]);
        assert_eq!(oracle.keys(&"Messages".into()).unwrap().len(), 1);
        assert!(matches!(
            oracle.keys(&"Labels".into()),
            Err(GenerateError::Oracle { .. })
        ));
    }
}
