// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

/// Errors that can occur while building a pipeline from configuration.
///
/// Build errors are fatal to construction: no partial pipeline is ever
/// returned. Run-time conditions (queued-stage timeout, self-initiated
/// drop) are not errors and are signaled through the zero-value record
/// instead.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("failed to parse stage configs: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error("unknown stage type: {0}")]
    UnknownStage(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid {name} stage config: {source}")]
    Stage {
        name: String,
        #[source]
        source: Box<BuildError>,
    },
}

impl BuildError {
    /// Wraps a registry error with the name of the offending stage.
    pub fn for_stage(name: impl Into<String>, source: BuildError) -> Self {
        BuildError::Stage {
            name: name.into(),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = BuildError::UnknownStage("frobnicate".to_string());
        assert_eq!(error.to_string(), "unknown stage type: frobnicate");
    }

    #[test]
    fn test_stage_error_names_the_stage() {
        let error = BuildError::for_stage(
            "json",
            BuildError::InvalidConfig("missing expressions".to_string()),
        );
        assert_eq!(
            error.to_string(),
            "invalid json stage config: invalid configuration: missing expressions"
        );
    }

    #[test]
    fn test_document_error_is_descriptive() {
        let parse_err = serde_json::from_str::<Vec<serde_json::Value>>("   ")
            .expect_err("whitespace should not parse");
        let error = BuildError::from(parse_err);
        assert!(error.to_string().contains("failed to parse stage configs"));
    }
}
