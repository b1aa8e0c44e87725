// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::time::SystemTime;

/// Labels attached to a log record, used for downstream routing and indexing.
pub type Labels = HashMap<String, String>;

/// Fields extracted from a log record by earlier stages, consumed by later ones.
pub type Extracted = HashMap<String, serde_json::Value>;

/// One log line as it moves through the pipeline.
///
/// The default value (empty fields, `UNIX_EPOCH` timestamp) is the
/// distinguished "dropped" record: callers must never forward it and must
/// never construct it for a legitimate empty log line. Use [`Record::new`]
/// for real records, which stamps the arrival time.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub labels: Labels,
    pub extracted: Extracted,
    /// Ordered (name, value) pairs, append-only during pipeline execution.
    /// Duplicate names are allowed.
    pub structured_metadata: Vec<(String, String)>,
    pub line: String,
    pub timestamp: SystemTime,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            labels: Labels::new(),
            extracted: Extracted::new(),
            structured_metadata: Vec::new(),
            line: String::new(),
            timestamp: SystemTime::UNIX_EPOCH,
        }
    }
}

impl Record {
    /// Creates a record for a freshly received log line, timestamped with
    /// the arrival time.
    pub fn new(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            timestamp: SystemTime::now(),
            ..Self::default()
        }
    }

    /// The drop signal returned by the executor. Downstream must not
    /// forward it.
    pub fn dropped() -> Self {
        Self::default()
    }

    /// Whether this record is the drop signal.
    pub fn is_dropped(&self) -> bool {
        *self == Self::default()
    }
}
