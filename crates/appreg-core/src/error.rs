// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request validation errors.

/// Reasons an operator-supplied value cannot become part of a
/// [`ProvisioningRequest`](crate::ProvisioningRequest).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
	#[error("application name must not be empty")]
	EmptyName,

	#[error("redirect URI is required")]
	MissingRedirectUri,

	#[error("redirect URI is not an absolute URI: {0}")]
	NotAbsolute(String),

	#[error("redirect URI must contain the callback route '{fragment}': {value}")]
	MissingCallbackRoute {
		value: String,
		fragment: &'static str,
	},

	#[error("secret validity must be a positive number of days, got {0}")]
	NonPositiveValidity(i64),
}
