// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Graph wire models for the `application` resource.

use appreg_core::{ApplicationRecord, PermissionGrant};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Accounts in the creating tenant only.
pub const SIGN_IN_AUDIENCE: &str = "AzureADMyOrg";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication<'a> {
	pub display_name: &'a str,
	pub sign_in_audience: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub web: Option<WebApplication>,
}

impl<'a> NewApplication<'a> {
	pub fn new(display_name: &'a str, redirect_uri: Option<&str>) -> Self {
		Self {
			display_name,
			sign_in_audience: SIGN_IN_AUDIENCE,
			web: redirect_uri.map(|uri| WebApplication {
				redirect_uris: vec![uri.to_string()],
			}),
		}
	}
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebApplication {
	#[serde(default)]
	pub redirect_uris: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
	pub id: String,
	pub app_id: String,
	#[serde(default)]
	pub display_name: Option<String>,
	#[serde(default)]
	pub web: Option<WebApplication>,
}

impl Application {
	pub fn into_record(self, requested_name: &str) -> ApplicationRecord {
		ApplicationRecord {
			app_id: self.app_id,
			object_id: self.id,
			display_name: self.display_name.unwrap_or_else(|| requested_name.to_string()),
			redirect_uris: self.web.map(|w| w.redirect_uris).unwrap_or_default(),
		}
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPasswordRequest<'a> {
	pub password_credential: PasswordCredentialRequest<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordCredentialRequest<'a> {
	pub display_name: &'a str,
	pub end_date_time: DateTime<Utc>,
}

/// `passwordCredential` as returned by `addPassword`. `secretText` is only
/// populated in this one response.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordCredential {
	#[serde(default)]
	pub secret_text: Option<String>,
	#[serde(default)]
	pub key_id: Option<String>,
	#[serde(default)]
	pub display_name: Option<String>,
	pub end_date_time: DateTime<Utc>,
}

impl std::fmt::Debug for PasswordCredential {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PasswordCredential")
			.field("secret_text", &self.secret_text.as_ref().map(|_| appreg_core::REDACTED))
			.field("key_id", &self.key_id)
			.field("display_name", &self.display_name)
			.field("end_date_time", &self.end_date_time)
			.finish()
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredResourceAccess {
	pub resource_app_id: Uuid,
	pub resource_access: Vec<ResourceAccess>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAccess {
	pub id: Uuid,
	/// `Role` for application permissions, `Scope` for delegated ones.
	#[serde(rename = "type")]
	pub kind: String,
}

impl RequiredResourceAccess {
	/// Groups grants by resource, keeping first-seen resource order and the
	/// grant order within each resource.
	pub fn from_grants(grants: &[PermissionGrant]) -> Vec<RequiredResourceAccess> {
		let mut groups: Vec<RequiredResourceAccess> = Vec::new();
		for grant in grants {
			let access = ResourceAccess {
				id: grant.access_id,
				kind: grant.kind.as_str().to_string(),
			};
			match groups
				.iter_mut()
				.find(|g| g.resource_app_id == grant.resource_app_id)
			{
				Some(group) => group.resource_access.push(access),
				None => groups.push(RequiredResourceAccess {
					resource_app_id: grant.resource_app_id,
					resource_access: vec![access],
				}),
			}
		}
		groups
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredResourceAccessUpdate<'a> {
	pub required_resource_access: &'a [RequiredResourceAccess],
}
