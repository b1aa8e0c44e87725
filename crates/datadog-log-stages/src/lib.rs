// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod drop;
pub mod json;
pub mod labels;
pub mod regex;
pub mod structured_metadata;

use std::sync::Arc;

use datadog_log_pipeline::{BuildError, Stage, StageRegistry};

use crate::drop::DropStage;
use crate::json::JsonStage;
use crate::labels::LabelStage;
use crate::regex::RegexStage;
use crate::structured_metadata::StructuredMetadataStage;

/// Registry for the built-in stage types.
///
/// Field-extracting stages (`json`, `regex`) and field-copying stages
/// (`labels`) are direct; stages that need to drop records or touch
/// structured metadata (`drop`, `structured_metadata`) go through the
/// queued channel interface.
pub struct BuiltinRegistry;

impl StageRegistry for BuiltinRegistry {
    fn build(&self, name: &str, config: &serde_json::Value) -> Result<Stage, BuildError> {
        match name {
            "json" => Ok(Stage::Direct(Arc::new(JsonStage::from_config(config)?))),
            "regex" => Ok(Stage::Direct(Arc::new(RegexStage::from_config(config)?))),
            "labels" => Ok(Stage::Direct(Arc::new(LabelStage::from_config(config)?))),
            "structured_metadata" => Ok(Stage::Queued(Arc::new(
                StructuredMetadataStage::from_config(config)?,
            ))),
            "drop" => Ok(Stage::Queued(Arc::new(DropStage::from_config(config)?))),
            other => Err(BuildError::UnknownStage(other.to_string())),
        }
    }
}

/// Renders an extracted value as a label or metadata string. Nulls and
/// composite values are skipped rather than stringified as JSON.
pub(crate) fn value_as_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_builds_every_stage_type() {
        let registry = BuiltinRegistry;
        let cases = [
            ("json", json!({"expressions": {"level": "level"}})),
            ("regex", json!({"expression": "(?P<level>\\w+)"})),
            ("labels", json!({"level": null})),
            ("structured_metadata", json!({"level": null})),
            ("drop", json!({"longer_than": 10})),
        ];

        for (name, config) in cases {
            assert!(
                registry.build(name, &config).is_ok(),
                "stage {name} should build"
            );
        }
    }

    #[test]
    fn test_registry_rejects_unknown_stage() {
        let err = BuiltinRegistry
            .build("invalid", &json!({}))
            .expect_err("unknown stage should fail");
        assert!(err.to_string().contains("invalid"));
    }

    #[test]
    fn test_value_as_string() {
        assert_eq!(value_as_string(&json!("api")), Some("api".to_string()));
        assert_eq!(value_as_string(&json!(42)), Some("42".to_string()));
        assert_eq!(value_as_string(&json!(true)), Some("true".to_string()));
        assert_eq!(value_as_string(&json!(null)), None);
        assert_eq!(value_as_string(&json!({"nested": 1})), None);
    }
}
