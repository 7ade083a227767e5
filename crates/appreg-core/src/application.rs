// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Directory objects returned by the provisioning calls.

use chrono::{DateTime, Utc};

use crate::secret::SecretString;

/// An application registration as created in the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationRecord {
	/// Client-facing identifier (`appId`).
	pub app_id: String,
	/// Directory object identifier (`id`), used to address follow-up calls.
	pub object_id: String,
	pub display_name: String,
	pub redirect_uris: Vec<String>,
}

/// A freshly issued client secret.
///
/// The directory returns the secret text only in the response to the call
/// that created it. This type is the single capture of that value: it is not
/// `Clone`, and nothing in the workspace can fetch it again.
#[derive(Debug)]
pub struct ClientSecret {
	secret_text: SecretString,
	key_id: Option<String>,
	display_name: String,
	expires_at: DateTime<Utc>,
}

impl ClientSecret {
	pub fn new(
		secret_text: SecretString,
		key_id: Option<String>,
		display_name: impl Into<String>,
		expires_at: DateTime<Utc>,
	) -> Self {
		Self {
			secret_text,
			key_id,
			display_name: display_name.into(),
			expires_at,
		}
	}

	/// The secret value, as captured at creation.
	pub fn secret_text(&self) -> &str {
		self.secret_text.expose()
	}

	pub fn key_id(&self) -> Option<&str> {
		self.key_id.as_deref()
	}

	pub fn display_name(&self) -> &str {
		&self.display_name
	}

	pub fn expires_at(&self) -> DateTime<Utc> {
		self.expires_at
	}
}
