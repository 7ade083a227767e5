// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The `appreg` provisioning session: console input, the end-to-end
//! workflow and the final report.

pub mod auth;
pub mod catalog;
pub mod input;
pub mod logging;
pub mod report;
pub mod session;

pub use input::{InputCollector, InputError};
pub use report::{BrowserLauncher, Diagnostic, SystemBrowser};
pub use session::{Session, SessionOptions, SessionReport};
