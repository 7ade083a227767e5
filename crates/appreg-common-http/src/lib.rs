// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared HTTP client for appreg.
//!
//! Every outbound call (token endpoint and directory API) goes through a
//! client built here so requests carry the same User-Agent. No retry layer is
//! provided: a failed remote call is reported to the operator as-is.

mod client;

pub use client::new_client;
