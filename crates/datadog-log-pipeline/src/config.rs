// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::env;
use std::time::Duration;

use crate::error::BuildError;

const DEFAULT_PROCESS_TIMEOUT_MS: u64 = 1000;

/// Configuration for the stage pipeline, resolved once at startup.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// JSON stage configuration document, if any. Absent means a
    /// zero-stage pass-through pipeline.
    pub stage_configs: Option<String>,
    /// Maximum wait per queued stage before the executor abandons the
    /// record and drops it.
    pub process_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stage_configs: None,
            process_timeout: Duration::from_millis(DEFAULT_PROCESS_TIMEOUT_MS),
        }
    }
}

impl PipelineConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, BuildError> {
        let stage_configs = env::var("STAGE_CONFIGS").ok();
        let process_timeout = env::var("PIPELINE_TIMEOUT_MS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_PROCESS_TIMEOUT_MS));

        let config = Self {
            stage_configs,
            process_timeout,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.process_timeout.is_zero() {
            return Err(BuildError::InvalidConfig(
                "PIPELINE_TIMEOUT_MS must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
