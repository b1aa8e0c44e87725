// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::time::SystemTime;

use ::regex::Regex;
use serde::Deserialize;

use datadog_log_pipeline::{BuildError, DirectStage, Extracted, Labels};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegexConfig {
    expression: String,
}

/// Matches the line against a pattern and copies every named capture
/// group into `extracted`. Lines that do not match pass through
/// untouched.
pub struct RegexStage {
    re: Regex,
}

impl RegexStage {
    pub fn from_config(config: &serde_json::Value) -> Result<Self, BuildError> {
        let config: RegexConfig = serde_json::from_value(config.clone())
            .map_err(|err| BuildError::InvalidConfig(err.to_string()))?;
        let re = Regex::new(&config.expression)
            .map_err(|err| BuildError::InvalidConfig(format!("invalid expression: {err}")))?;
        if re.capture_names().flatten().next().is_none() {
            return Err(BuildError::InvalidConfig(
                "expression has no named capture groups".to_string(),
            ));
        }
        Ok(Self { re })
    }
}

impl DirectStage for RegexStage {
    fn process(
        &self,
        _labels: &mut Labels,
        extracted: &mut Extracted,
        _timestamp: &mut SystemTime,
        line: &mut String,
    ) {
        let Some(captures) = self.re.captures(line) else {
            return;
        };

        for name in self.re.capture_names().flatten() {
            if let Some(capture) = captures.name(name) {
                extracted.insert(
                    name.to_string(),
                    serde_json::Value::String(capture.as_str().to_string()),
                );
            }
        }
    }
}
