// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;
use std::time::SystemTime;

use tokio::sync::mpsc;

use crate::record::{Extracted, Labels, Record};

/// A stage that transforms a record synchronously, in place.
///
/// Direct stages are invoked inline by the executor with no timeout; they
/// are expected to be cheap and to handle their own internal errors
/// without aborting the pipeline. They cannot drop a record and cannot
/// touch structured metadata.
pub trait DirectStage: Send + Sync {
    fn process(
        &self,
        labels: &mut Labels,
        extracted: &mut Extracted,
        timestamp: &mut SystemTime,
        line: &mut String,
    );
}

/// A stage that consumes records from an input channel and forwards
/// transformed records on an output channel of its own.
///
/// The executor sends exactly one record per invocation and then closes
/// the input. The stage must eventually either forward one record on the
/// returned channel or close it without a value, which signals that the
/// record was consumed and dropped. The stage owns its spawned task; the
/// executor never cancels it — on timeout the executor only stops
/// waiting, and the task's next send fails once the receiver is gone.
pub trait QueuedStage: Send + Sync {
    fn run(&self, input: mpsc::Receiver<Record>) -> mpsc::Receiver<Record>;
}

/// A built transformation unit. The two variants are the only execution
/// styles the executor knows; it matches on the variant rather than
/// probing capabilities per call.
#[derive(Clone)]
pub enum Stage {
    Direct(Arc<dyn DirectStage>),
    Queued(Arc<dyn QueuedStage>),
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Direct(_) => f.write_str("Stage::Direct"),
            Stage::Queued(_) => f.write_str("Stage::Queued"),
        }
    }
}
