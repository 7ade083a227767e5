// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections. Each has an all-optional layer type that merges
//! field by field and a resolved type used at runtime.

mod identity;
mod logging;
mod output;

pub use identity::{
	IdentityConfig, IdentityConfigLayer, DEFAULT_AUTHORITY, DEFAULT_CLIENT_ID, DEFAULT_GRAPH_BASE,
	DEFAULT_LOGIN_BASE,
};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer, DEFAULT_LOG_LEVEL};
pub use output::{BrowserPolicy, OutputConfig, OutputConfigLayer};
