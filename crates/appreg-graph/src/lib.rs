// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Directory API used to provision an application registration.
//!
//! [`DirectoryApi`] is the seam the provisioner depends on; [`GraphClient`]
//! implements it against Microsoft Graph `v1.0`.

mod api;
mod client;
mod error;
pub mod models;

pub use api::DirectoryApi;
pub use client::{GraphClient, DEFAULT_GRAPH_BASE};
pub use error::GraphError;
pub use models::{RequiredResourceAccess, ResourceAccess, SIGN_IN_AUDIENCE};
