// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use ::regex::Regex;
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::debug;

use datadog_log_pipeline::{BuildError, QueuedStage, Record};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DropConfig {
    longer_than: Option<usize>,
    expression: Option<String>,
}

/// Filters out records whose line exceeds a length threshold or matches
/// a pattern. At least one condition must be configured; a record
/// matching any condition is consumed without being forwarded.
pub struct DropStage {
    rules: Arc<DropRules>,
}

struct DropRules {
    longer_than: Option<usize>,
    expression: Option<Regex>,
}

impl DropRules {
    fn should_drop(&self, line: &str) -> bool {
        if let Some(threshold) = self.longer_than {
            if line.len() > threshold {
                return true;
            }
        }
        if let Some(re) = &self.expression {
            if re.is_match(line) {
                return true;
            }
        }
        false
    }
}

impl DropStage {
    pub fn from_config(config: &serde_json::Value) -> Result<Self, BuildError> {
        let config: DropConfig = serde_json::from_value(config.clone())
            .map_err(|err| BuildError::InvalidConfig(err.to_string()))?;

        let expression = config
            .expression
            .map(|pattern| {
                Regex::new(&pattern)
                    .map_err(|err| BuildError::InvalidConfig(format!("invalid expression: {err}")))
            })
            .transpose()?;

        if config.longer_than.is_none() && expression.is_none() {
            return Err(BuildError::InvalidConfig(
                "drop stage requires longer_than or expression".to_string(),
            ));
        }

        Ok(Self {
            rules: Arc::new(DropRules {
                longer_than: config.longer_than,
                expression,
            }),
        })
    }
}

impl QueuedStage for DropStage {
    fn run(&self, mut input: mpsc::Receiver<Record>) -> mpsc::Receiver<Record> {
        let (tx, rx) = mpsc::channel(1);
        let rules = Arc::clone(&self.rules);
        tokio::spawn(async move {
            while let Some(record) = input.recv().await {
                if rules.should_drop(&record.line) {
                    debug!("dropping log line");
                    continue;
                }
                if tx.send(record).await.is_err() {
                    break;
                }
            }
        });
        rx
    }
}
