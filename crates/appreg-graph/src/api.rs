// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use appreg_core::{ApplicationRecord, ClientSecret, PermissionGrant};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::GraphError;

/// The three directory operations a provisioning run consumes.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
	/// Creates a single-tenant application, optionally with one web redirect URI.
	async fn create_application(
		&self,
		display_name: &str,
		redirect_uri: Option<&str>,
	) -> Result<ApplicationRecord, GraphError>;

	/// Adds a password credential. The returned secret text is only ever
	/// available from this call.
	async fn add_password(
		&self,
		object_id: &str,
		label: &str,
		expires_at: DateTime<Utc>,
	) -> Result<ClientSecret, GraphError>;

	/// Replaces the application's `requiredResourceAccess` with `grants`.
	async fn set_required_resource_access(
		&self,
		object_id: &str,
		grants: &[PermissionGrant],
	) -> Result<(), GraphError>;
}
