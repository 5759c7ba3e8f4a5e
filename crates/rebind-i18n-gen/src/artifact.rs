//! Generated artifacts: the per-locale binding of an interface's methods.

use rebind_i18n::{Binding, FormTable, InterfaceId, LocaleTag, ResourceValue};
use serde::Serialize;

use crate::source::InterfaceKind;

/// How one method was bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum BoundValue {
    /// Found in a resource of the chain.
    Resolved(Binding),
    /// A plural method: default plus every selector form in the chain.
    Selectable(FormTable),
    /// No resource had the key; the method's declared default is used.
    Declared { value: ResourceValue },
    /// Optional key found nowhere.
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodBinding {
    pub method: String,
    pub key: String,
    pub value: BoundValue,
}

/// Everything the host needs to emit one locale-specific implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifact {
    pub interface: InterfaceId,
    pub kind: InterfaceKind,
    pub requested: LocaleTag,
    /// Locale of the most specific resource that matched.
    pub effective: LocaleTag,
    pub class_name: String,
    pub methods: Vec<MethodBinding>,
}

impl GeneratedArtifact {
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodBinding> {
        self.methods.iter().find(|m| m.method == name)
    }
}

/// `Messages_az_Cyrl` for `org.app.Messages` bound at `az_Cyrl`, and
/// `Messages_default` at root. Requests sharing an effective locale share
/// a class.
#[must_use]
pub fn class_name(interface: &InterfaceId, effective: &LocaleTag) -> String {
    if effective.is_root() {
        format!("{}_default", interface.simple_name())
    } else {
        format!("{}_{effective}", interface.simple_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_follow_effective_locale() {
        let id = InterfaceId::new("org.app.Messages");
        assert_eq!(
            class_name(&id, &LocaleTag::parse("az_Cyrl").unwrap()),
            "Messages_az_Cyrl"
        );
        assert_eq!(class_name(&id, &LocaleTag::root()), "Messages_default");
    }

    #[test]
    fn bound_values_serialize_with_source_tag() {
        let json = serde_json::to_value(BoundValue::Declared {
            value: ResourceValue::from("Hello"),
        })
        .unwrap();
        assert_eq!(json["source"], "declared");
        assert_eq!(json["value"], "Hello");
        assert_eq!(
            serde_json::to_value(BoundValue::Absent).unwrap()["source"],
            "absent"
        );
    }
}
