// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;

use datadog_log_pipeline::{BuildError, QueuedStage, Record};

use crate::value_as_string;

/// Appends (name, value) pairs from extracted fields to the record's
/// structured metadata.
///
/// Config is a map of metadata name to source field; a null source means
/// "same as the metadata name". Queued rather than direct: the direct
/// stage signature has no access to structured metadata.
pub struct StructuredMetadataStage {
    fields: Arc<Vec<(String, String)>>,
}

impl StructuredMetadataStage {
    pub fn from_config(config: &serde_json::Value) -> Result<Self, BuildError> {
        let config: HashMap<String, Option<String>> = serde_json::from_value(config.clone())
            .map_err(|err| BuildError::InvalidConfig(err.to_string()))?;
        if config.is_empty() {
            return Err(BuildError::InvalidConfig(
                "structured_metadata stage requires at least one field".to_string(),
            ));
        }

        let fields = config
            .into_iter()
            .map(|(name, source)| {
                let source = source.unwrap_or_else(|| name.clone());
                (name, source)
            })
            .collect();

        Ok(Self {
            fields: Arc::new(fields),
        })
    }
}

impl QueuedStage for StructuredMetadataStage {
    fn run(&self, mut input: mpsc::Receiver<Record>) -> mpsc::Receiver<Record> {
        let (tx, rx) = mpsc::channel(1);
        let fields = Arc::clone(&self.fields);
        tokio::spawn(async move {
            while let Some(mut record) = input.recv().await {
                for (name, source) in fields.iter() {
                    if let Some(value) = record.extracted.get(source).and_then(value_as_string) {
                        record.structured_metadata.push((name.clone(), value));
                    }
                }
                if tx.send(record).await.is_err() {
                    break;
                }
            }
        });
        rx
    }
}
