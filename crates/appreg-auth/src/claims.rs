// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Account identity read from the `id_token` returned with each token.
//!
//! The token comes straight from the token endpoint over TLS, so only the
//! payload is decoded; the signature is not checked.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

use crate::error::AuthError;

#[derive(Debug, Clone, Deserialize)]
pub struct IdTokenClaims {
	/// Tenant the operator signed in to.
	pub tid: String,
	#[serde(default)]
	pub oid: Option<String>,
	#[serde(default)]
	pub preferred_username: Option<String>,
	#[serde(default)]
	pub upn: Option<String>,
	#[serde(default)]
	pub name: Option<String>,
}

impl IdTokenClaims {
	pub fn decode(id_token: &str) -> Result<Self, AuthError> {
		let payload = id_token
			.split('.')
			.nth(1)
			.ok_or_else(|| AuthError::InvalidResponse("id_token is not a JWT".to_string()))?;
		let bytes = URL_SAFE_NO_PAD
			.decode(payload.trim_end_matches('='))
			.map_err(|e| AuthError::InvalidResponse(format!("id_token payload: {e}")))?;
		serde_json::from_slice(&bytes)
			.map_err(|e| AuthError::InvalidResponse(format!("id_token claims: {e}")))
	}

	pub fn username(&self) -> &str {
		[&self.preferred_username, &self.upn, &self.name]
			.into_iter()
			.flatten()
			.next()
			.map_or("unknown", String::as_str)
	}

	/// `{oid}.{tid}`, falling back to the username when `oid` is absent.
	pub fn home_account_id(&self) -> String {
		match &self.oid {
			Some(oid) => format!("{oid}.{}", self.tid),
			None => format!("{}.{}", self.username(), self.tid),
		}
	}
}

#[cfg(test)]
pub(crate) fn encode_test_id_token(claims: &serde_json::Value) -> String {
	let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
	let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
	format!("{header}.{payload}.sig")
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use serde_json::json;

	#[test]
	fn decodes_tenant_and_username() {
		let token = encode_test_id_token(&json!({
			"tid": "tid-1",
			"oid": "oid-1",
			"preferred_username": "ops@contoso.com",
		}));

		let claims = IdTokenClaims::decode(&token).unwrap();
		assert_eq!(claims.tid, "tid-1");
		assert_eq!(claims.username(), "ops@contoso.com");
		assert_eq!(claims.home_account_id(), "oid-1.tid-1");
	}

	#[test]
	fn username_falls_back_to_upn_then_name() {
		let token = encode_test_id_token(&json!({"tid": "t", "upn": "u@x"}));
		assert_eq!(IdTokenClaims::decode(&token).unwrap().username(), "u@x");

		let token = encode_test_id_token(&json!({"tid": "t", "name": "Ops"}));
		assert_eq!(IdTokenClaims::decode(&token).unwrap().username(), "Ops");
	}

	#[test]
	fn rejects_non_jwt() {
		assert!(matches!(
			IdTokenClaims::decode("opaque"),
			Err(AuthError::InvalidResponse(_))
		));
	}

	#[test]
	fn rejects_missing_tenant() {
		let token = encode_test_id_token(&json!({"preferred_username": "a@b"}));
		assert!(IdTokenClaims::decode(&token).is_err());
	}

	proptest! {
		#[test]
		fn decode_never_panics(token in ".{0,64}") {
			let _ = IdTokenClaims::decode(&token);
		}

		#[test]
		fn claims_survive_encoding(tid in "[a-f0-9-]{1,36}", user in "[a-z]{1,12}@[a-z]{1,8}\\.com") {
			let token = encode_test_id_token(&json!({"tid": tid, "preferred_username": user}));
			let claims = IdTokenClaims::decode(&token).unwrap();
			prop_assert_eq!(&claims.tid, &tid);
			prop_assert_eq!(claims.username(), user.as_str());
			prop_assert_eq!(claims.home_account_id(), format!("{user}.{tid}"));
		}
	}
}
