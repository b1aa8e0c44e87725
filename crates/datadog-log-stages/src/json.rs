// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::time::SystemTime;

use serde::Deserialize;

use datadog_log_pipeline::{BuildError, DirectStage, Extracted, Labels};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonConfig {
    /// target field name -> source key in the JSON line; a null source
    /// means "same as the target name".
    expressions: HashMap<String, Option<String>>,
}

/// Parses the line as a JSON object and copies selected top-level fields
/// into `extracted`.
pub struct JsonStage {
    expressions: Vec<(String, String)>,
}

impl JsonStage {
    pub fn from_config(config: &serde_json::Value) -> Result<Self, BuildError> {
        let config: JsonConfig = serde_json::from_value(config.clone())
            .map_err(|err| BuildError::InvalidConfig(err.to_string()))?;
        if config.expressions.is_empty() {
            return Err(BuildError::InvalidConfig(
                "json stage requires at least one expression".to_string(),
            ));
        }

        let expressions = config
            .expressions
            .into_iter()
            .map(|(target, source)| {
                let source = source.unwrap_or_else(|| target.clone());
                (target, source)
            })
            .collect();

        Ok(Self { expressions })
    }
}

impl DirectStage for JsonStage {
    fn process(
        &self,
        _labels: &mut Labels,
        extracted: &mut Extracted,
        _timestamp: &mut SystemTime,
        line: &mut String,
    ) {
        // Lines that are not JSON objects pass through untouched; a
        // direct stage swallows its own failures.
        let Ok(serde_json::Value::Object(fields)) = serde_json::from_str(line) else {
            return;
        };

        for (target, source) in &self.expressions {
            if let Some(value) = fields.get(source) {
                extracted.insert(target.clone(), value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn process(stage: &JsonStage, line: &str) -> Extracted {
        let mut labels = Labels::new();
        let mut extracted = Extracted::new();
        let mut timestamp = SystemTime::now();
        let mut line = line.to_string();
        stage.process(&mut labels, &mut extracted, &mut timestamp, &mut line);
        extracted
    }

    #[test]
    fn test_extracts_configured_fields() {
        let stage = JsonStage::from_config(&json!({
            "expressions": {"level": "level", "message": "msg"}
        }))
        .expect("config should be valid");

        let extracted = process(&stage, r#"{"level":"info","msg":"test message"}"#);
        assert_eq!(extracted.get("level"), Some(&json!("info")));
        assert_eq!(extracted.get("message"), Some(&json!("test message")));
    }

    #[test]
    fn test_null_source_uses_target_name() {
        let stage = JsonStage::from_config(&json!({"expressions": {"level": null}}))
            .expect("config should be valid");

        let extracted = process(&stage, r#"{"level":"error"}"#);
        assert_eq!(extracted.get("level"), Some(&json!("error")));
    }

    #[test]
    fn test_missing_source_is_skipped() {
        let stage = JsonStage::from_config(&json!({"expressions": {"missing": null}}))
            .expect("config should be valid");

        assert!(process(&stage, r#"{"level":"error"}"#).is_empty());
    }

    #[test]
    fn test_non_json_line_is_untouched() {
        let stage = JsonStage::from_config(&json!({"expressions": {"level": null}}))
            .expect("config should be valid");

        assert!(process(&stage, "plain text line").is_empty());
        assert!(process(&stage, "[1, 2, 3]").is_empty());
    }

    #[test]
    fn test_rejects_empty_and_malformed_config() {
        assert!(JsonStage::from_config(&json!({"expressions": {}})).is_err());
        assert!(JsonStage::from_config(&json!({})).is_err());
        assert!(JsonStage::from_config(&json!({"unexpected": true})).is_err());
    }
}
