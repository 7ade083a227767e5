// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use appreg_core::{ApplicationRecord, ClientSecret, Credential, PermissionGrant, SecretString};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::api::DirectoryApi;
use crate::error::GraphError;
use crate::models::{
	AddPasswordRequest, Application, NewApplication, PasswordCredential, PasswordCredentialRequest,
	RequiredResourceAccess, RequiredResourceAccessUpdate,
};

pub const DEFAULT_GRAPH_BASE: &str = "https://graph.microsoft.com/v1.0";

/// Microsoft Graph client authorised with the operator's bearer token.
#[derive(Debug, Clone)]
pub struct GraphClient {
	http: Client,
	base_url: String,
	access_token: SecretString,
}

impl GraphClient {
	pub fn new(base_url: impl Into<String>, credential: &Credential) -> Self {
		Self::with_http_client(appreg_common_http::new_client(), base_url, credential)
	}

	pub fn with_http_client(
		http: Client,
		base_url: impl Into<String>,
		credential: &Credential,
	) -> Self {
		let base_url = base_url.into().trim_end_matches('/').to_string();
		Self {
			http,
			base_url,
			access_token: credential.access_token().clone(),
		}
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	fn url(&self, path: &str) -> String {
		format!("{}{path}", self.base_url)
	}

	async fn send<B: Serialize + ?Sized>(
		&self,
		method: Method,
		path: &str,
		body: &B,
	) -> Result<String, GraphError> {
		let url = self.url(path);
		debug!(method = %method, url = %url, "Graph request");

		let response = self
			.http
			.request(method, &url)
			.bearer_auth(self.access_token.expose())
			.json(body)
			.send()
			.await?;

		let status = response.status();
		let text = response.text().await?;
		if !status.is_success() {
			return Err(GraphError::from_response(status, &text));
		}
		Ok(text)
	}

	async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
		&self,
		method: Method,
		path: &str,
		body: &B,
	) -> Result<T, GraphError> {
		let text = self.send(method, path, body).await?;
		serde_json::from_str(&text).map_err(|e| GraphError::InvalidResponse(e.to_string()))
	}
}

#[async_trait]
impl DirectoryApi for GraphClient {
	#[instrument(skip_all, fields(display_name = %display_name))]
	async fn create_application(
		&self,
		display_name: &str,
		redirect_uri: Option<&str>,
	) -> Result<ApplicationRecord, GraphError> {
		let body = NewApplication::new(display_name, redirect_uri);
		let application: Application = self.send_json(Method::POST, "/applications", &body).await?;
		let record = application.into_record(display_name);
		info!(app_id = %record.app_id, object_id = %record.object_id, "application created");
		Ok(record)
	}

	#[instrument(skip_all, fields(object_id = %object_id))]
	async fn add_password(
		&self,
		object_id: &str,
		label: &str,
		expires_at: DateTime<Utc>,
	) -> Result<ClientSecret, GraphError> {
		let body = AddPasswordRequest {
			password_credential: PasswordCredentialRequest {
				display_name: label,
				end_date_time: expires_at,
			},
		};
		let credential: PasswordCredential = self
			.send_json(
				Method::POST,
				&format!("/applications/{object_id}/addPassword"),
				&body,
			)
			.await?;

		let secret_text = credential
			.secret_text
			.filter(|s| !s.is_empty())
			.ok_or_else(|| GraphError::InvalidResponse("addPassword returned no secretText".to_string()))?;

		info!(key_id = ?credential.key_id, "client secret created");
		Ok(ClientSecret::new(
			SecretString::new(secret_text),
			credential.key_id,
			credential.display_name.unwrap_or_else(|| label.to_string()),
			credential.end_date_time,
		))
	}

	#[instrument(skip_all, fields(object_id = %object_id, grants = grants.len()))]
	async fn set_required_resource_access(
		&self,
		object_id: &str,
		grants: &[PermissionGrant],
	) -> Result<(), GraphError> {
		let groups = RequiredResourceAccess::from_grants(grants);
		let body = RequiredResourceAccessUpdate {
			required_resource_access: &groups,
		};
		self.send(Method::PATCH, &format!("/applications/{object_id}"), &body)
			.await?;
		info!(resources = groups.len(), "required resource access updated");
		Ok(())
	}
}
