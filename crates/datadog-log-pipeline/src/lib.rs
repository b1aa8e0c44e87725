// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod record;
pub mod registry;
pub mod stage;

pub use config::PipelineConfig;
pub use error::BuildError;
pub use pipeline::Pipeline;
pub use record::{Extracted, Labels, Record};
pub use registry::StageRegistry;
pub use stage::{DirectStage, QueuedStage, Stage};
