// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication error types.

/// OAuth error codes that mean the cached sign-in can no longer be used
/// without the operator.
pub(crate) const INTERACTION_REQUIRED_CODES: &[&str] = &[
	"invalid_grant",
	"interaction_required",
	"login_required",
	"consent_required",
];

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
	/// The silent path cannot proceed; the caller should sign in interactively.
	#[error("interaction required: {0}")]
	InteractionRequired(String),

	#[error("token endpoint rejected the request ({code}): {description}")]
	Endpoint { code: String, description: String },

	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("invalid token response: {0}")]
	InvalidResponse(String),

	#[error("the device code expired before sign-in completed")]
	DeviceCodeExpired,

	#[error("sign-in was declined by the operator")]
	Declined,

	/// Terminal failure of the whole sign-in, wrapping the underlying cause.
	#[error("authentication failed: {0}")]
	Failed(#[source] Box<AuthError>),
}

impl AuthError {
	pub(crate) fn failed(cause: AuthError) -> Self {
		match cause {
			already @ AuthError::Failed(_) => already,
			other => AuthError::Failed(Box::new(other)),
		}
	}

	pub fn is_interaction_required(&self) -> bool {
		matches!(self, AuthError::InteractionRequired(_))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::error::Error;

	#[test]
	fn failed_exposes_cause_as_source() {
		let err = AuthError::failed(AuthError::Declined);
		assert!(err.to_string().starts_with("authentication failed:"));
		let source = err.source().expect("source");
		assert_eq!(source.to_string(), AuthError::Declined.to_string());
	}

	#[test]
	fn failed_is_not_nested_twice() {
		let err = AuthError::failed(AuthError::failed(AuthError::DeviceCodeExpired));
		match err {
			AuthError::Failed(inner) => assert!(matches!(*inner, AuthError::DeviceCodeExpired)),
			other => panic!("unexpected {other:?}"),
		}
	}
}
