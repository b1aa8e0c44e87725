// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::time::SystemTime;

use datadog_log_pipeline::{BuildError, DirectStage, Extracted, Labels};

use crate::value_as_string;

/// Copies extracted fields into the record's label set.
///
/// Config is a map of label name to source field; a null source means
/// "same as the label name". Missing or non-scalar extracted values are
/// skipped.
pub struct LabelStage {
    labels: Vec<(String, String)>,
}

impl LabelStage {
    pub fn from_config(config: &serde_json::Value) -> Result<Self, BuildError> {
        let config: HashMap<String, Option<String>> = serde_json::from_value(config.clone())
            .map_err(|err| BuildError::InvalidConfig(err.to_string()))?;
        if config.is_empty() {
            return Err(BuildError::InvalidConfig(
                "labels stage requires at least one label".to_string(),
            ));
        }

        let labels = config
            .into_iter()
            .map(|(label, source)| {
                let source = source.unwrap_or_else(|| label.clone());
                (label, source)
            })
            .collect();

        Ok(Self { labels })
    }
}

impl DirectStage for LabelStage {
    fn process(
        &self,
        labels: &mut Labels,
        extracted: &mut Extracted,
        _timestamp: &mut SystemTime,
        _line: &mut String,
    ) {
        for (label, source) in &self.labels {
            if let Some(value) = extracted.get(source).and_then(value_as_string) {
                labels.insert(label.clone(), value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn process(stage: &LabelStage, extracted: Extracted) -> Labels {
        let mut labels = Labels::new();
        let mut extracted = extracted;
        let mut timestamp = SystemTime::now();
        let mut line = String::new();
        stage.process(&mut labels, &mut extracted, &mut timestamp, &mut line);
        labels
    }

    #[test]
    fn test_copies_extracted_values_into_labels() {
        let stage = LabelStage::from_config(&json!({
            "level": "level",
            "service": "service_name"
        }))
        .expect("config should be valid");

        let extracted = Extracted::from([
            ("level".to_string(), json!("error")),
            ("service_name".to_string(), json!("api")),
        ]);

        let labels = process(&stage, extracted);
        assert_eq!(labels.get("level"), Some(&"error".to_string()));
        assert_eq!(labels.get("service"), Some(&"api".to_string()));
    }

    #[test]
    fn test_stringifies_scalar_values() {
        let stage =
            LabelStage::from_config(&json!({"status": null})).expect("config should be valid");

        let labels = process(&stage, Extracted::from([("status".to_string(), json!(500))]));
        assert_eq!(labels.get("status"), Some(&"500".to_string()));
    }

    #[test]
    fn test_missing_and_composite_sources_are_skipped() {
        let stage = LabelStage::from_config(&json!({"level": null, "meta": null}))
            .expect("config should be valid");

        let labels = process(
            &stage,
            Extracted::from([("meta".to_string(), json!({"k": "v"}))]),
        );
        assert!(labels.is_empty());
    }

    #[test]
    fn test_rejects_empty_config() {
        assert!(LabelStage::from_config(&json!({})).is_err());
    }
}
