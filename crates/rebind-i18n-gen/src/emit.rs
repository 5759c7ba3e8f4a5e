//! JSON-lines artifact output.

use std::io::Write;
use std::sync::Mutex;

use crate::artifact::GeneratedArtifact;
use crate::error::{GenerateError, Result};
use crate::source::ArtifactEmitter;

/// Writes each artifact as one JSON object per line.
#[derive(Debug)]
pub struct JsonArtifactEmitter<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonArtifactEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> ArtifactEmitter for JsonArtifactEmitter<W> {
    fn emit(&self, artifact: &GeneratedArtifact) -> Result<()> {
        let line = serde_json::to_string(artifact).map_err(|e| emit_error(artifact, e))?;
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(writer, "{line}").map_err(|e| emit_error(artifact, e))?;
        writer.flush().map_err(|e| emit_error(artifact, e))
    }
}

fn emit_error(artifact: &GeneratedArtifact, err: impl std::fmt::Display) -> GenerateError {
    GenerateError::Emit {
        class_name: artifact.class_name.clone(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{BoundValue, MethodBinding};
    use crate::source::InterfaceKind;
    use rebind_i18n::{Binding, InterfaceId, LocaleTag, ResourceValue};

    fn artifact() -> GeneratedArtifact {
        let az_cyrl = LocaleTag::parse("az_Cyrl").unwrap();
        GeneratedArtifact {
            interface: InterfaceId::new("DateTimeFormatInfo"),
            kind: InterfaceKind::Constants,
            requested: LocaleTag::parse("az_Cyrl_AZ").unwrap(),
            effective: az_cyrl.clone(),
            class_name: "DateTimeFormatInfo_az_Cyrl".into(),
            methods: vec![MethodBinding {
                method: "erasShort".into(),
                key: "erasShort".into(),
                value: BoundValue::Resolved(Binding {
                    value: ResourceValue::from(["BCE", "CE"]),
                    locale: az_cyrl,
                    form: None,
                }),
            }],
        }
    }

    #[test]
    fn writes_one_json_object_per_line() {
        let emitter = JsonArtifactEmitter::new(Vec::new());
        emitter.emit(&artifact()).unwrap();
        emitter.emit(&artifact()).unwrap();
        let out = String::from_utf8(emitter.into_inner()).unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["class_name"], "DateTimeFormatInfo_az_Cyrl");
        assert_eq!(value["requested"], "az_Cyrl_AZ");
        assert_eq!(value["kind"], "constants");
        let method = &value["methods"][0];
        assert_eq!(method["value"]["source"], "resolved");
        assert_eq!(method["value"]["locale"], "az_Cyrl");
        assert_eq!(method["value"]["value"], serde_json::json!(["BCE", "CE"]));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failures_name_the_artifact() {
        let err = JsonArtifactEmitter::new(FailingWriter)
            .emit(&artifact())
            .unwrap_err();
        match err {
            GenerateError::Emit { class_name, reason } => {
                assert_eq!(class_name, "DateTimeFormatInfo_az_Cyrl");
                assert!(reason.contains("disk full"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
