// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time;
use tracing::warn;

use crate::config::PipelineConfig;
use crate::error::BuildError;
use crate::record::Record;
use crate::registry::StageRegistry;
use crate::stage::Stage;

/// An ordered, immutable sequence of built stages.
///
/// Built once from a configuration document, then shared read-only for
/// the process lifetime. [`Pipeline::process`] may be called concurrently
/// from any number of tasks; per-invocation state lives entirely in the
/// record and in invocation-scoped channels.
pub struct Pipeline {
    stages: Vec<Stage>,
    process_timeout: Duration,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stages.len())
            .field("process_timeout", &self.process_timeout)
            .finish()
    }
}

impl Pipeline {
    /// Parses a JSON stage configuration document and builds the pipeline.
    ///
    /// An empty document is valid and yields a zero-stage pass-through
    /// pipeline. The document must be an array of single-key objects,
    /// each key naming a stage type; anything else fails the whole build.
    pub fn from_json(
        config_json: &str,
        registry: &dyn StageRegistry,
        config: &PipelineConfig,
    ) -> Result<Self, BuildError> {
        if config_json.is_empty() {
            return Self::new(Vec::new(), registry, config);
        }

        let documents: Vec<HashMap<String, serde_json::Value>> =
            serde_json::from_str(config_json)?;
        Self::new(documents, registry, config)
    }

    /// Builds a pipeline from an already-parsed configuration document.
    ///
    /// Document order is execution order. The first stage the registry
    /// rejects aborts the whole build; no partial pipeline is returned.
    pub fn new(
        documents: Vec<HashMap<String, serde_json::Value>>,
        registry: &dyn StageRegistry,
        config: &PipelineConfig,
    ) -> Result<Self, BuildError> {
        config.validate()?;

        let mut stages = Vec::with_capacity(documents.len());
        for document in &documents {
            for (name, stage_config) in document {
                let stage = registry
                    .build(name, stage_config)
                    .map_err(|err| BuildError::for_stage(name.as_str(), err))?;
                stages.push(stage);
            }
        }

        Ok(Self {
            stages,
            process_timeout: config.process_timeout,
        })
    }

    /// Runs one record through every stage in order.
    ///
    /// Returns the transformed record, or the zero-value record if a
    /// stage dropped it or a queued stage missed the timeout budget.
    /// Callers must treat [`Record::is_dropped`] results as "do not
    /// forward".
    pub async fn process(&self, mut record: Record) -> Record {
        for stage in &self.stages {
            match stage {
                Stage::Direct(stage) => {
                    stage.process(
                        &mut record.labels,
                        &mut record.extracted,
                        &mut record.timestamp,
                        &mut record.line,
                    );
                }
                Stage::Queued(stage) => {
                    let (input_tx, input_rx) = mpsc::channel(1);
                    let mut output = stage.run(input_rx);

                    // One record per invocation; dropping the sender
                    // closes the input and tells the stage to finish. A
                    // stage that already dropped its receiver has refused
                    // the record, which can only mean a drop.
                    if input_tx.send(record).await.is_err() {
                        return Record::dropped();
                    }
                    drop(input_tx);

                    match time::timeout(self.process_timeout, output.recv()).await {
                        Ok(Some(processed)) => record = processed,
                        // Output closed without a value: the stage
                        // consumed and dropped the record.
                        Ok(None) => return Record::dropped(),
                        Err(_) => {
                            warn!("timed out whilst processing log line");
                            return Record::dropped();
                        }
                    }
                }
            }
        }
        record
    }

    /// The number of configured stages, for diagnostics and tests.
    pub fn size(&self) -> usize {
        self.stages.len()
    }
}
