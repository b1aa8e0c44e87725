// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::error::BuildError;
use crate::stage::Stage;

/// Builds stages from their configured type name and config value.
///
/// Implementations must be deterministic for identical inputs within a
/// process lifetime, and every stage they produce must be safe for
/// unsynchronized concurrent invocation once built.
pub trait StageRegistry: Send + Sync {
    fn build(&self, name: &str, config: &serde_json::Value) -> Result<Stage, BuildError>;
}
