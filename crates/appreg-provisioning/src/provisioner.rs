// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use appreg_core::{flatten_grants, ApplicationRecord, ClientSecret, ProvisioningRequest};
use appreg_graph::DirectoryApi;
use chrono::{DateTime, Duration, Utc};
use tracing::{info, instrument};

use crate::error::ProvisioningError;

/// Result of a complete provisioning run.
#[derive(Debug)]
pub struct ProvisionedApplication {
	pub application: ApplicationRecord,
	pub secret: ClientSecret,
}

/// Progress reported while a run advances through its stages.
#[derive(Debug, Clone, Copy)]
pub enum ProvisioningEvent<'a> {
	CreatingApplication,
	ApplicationCreated(&'a ApplicationRecord),
	CreatingSecret,
	SecretCreated(&'a ClientSecret),
	AttachingPermissions,
	PermissionsAttached { grants: usize },
}

/// `now + days`, or `None` past the representable range.
pub fn secret_expiry(now: DateTime<Utc>, days: u32) -> Option<DateTime<Utc>> {
	Duration::try_days(i64::from(days)).and_then(|validity| now.checked_add_signed(validity))
}

/// Display name given to the generated client secret.
pub fn secret_label(now: DateTime<Utc>) -> String {
	format!("Auto-generated secret - {}", now.format("%Y-%m-%d"))
}

/// Runs create application, create secret and attach permissions against a
/// directory. Each step needs the object id from the first; a failure stops
/// the run.
#[derive(Debug)]
pub struct Provisioner<D> {
	directory: D,
}

impl<D: DirectoryApi> Provisioner<D> {
	pub fn new(directory: D) -> Self {
		Self { directory }
	}

	pub async fn provision(
		&self,
		request: &ProvisioningRequest,
	) -> Result<ProvisionedApplication, ProvisioningError> {
		self.provision_at(request, Utc::now()).await
	}

	/// Like [`provision`](Self::provision) with an explicit clock for the
	/// secret label and expiry.
	pub async fn provision_at(
		&self,
		request: &ProvisioningRequest,
		now: DateTime<Utc>,
	) -> Result<ProvisionedApplication, ProvisioningError> {
		self.provision_observed(request, now, &mut |_| {}).await
	}

	/// Runs the pipeline, reporting each stage to `observe` as it starts and
	/// completes.
	#[instrument(skip_all, fields(name = %request.name()))]
	pub async fn provision_observed(
		&self,
		request: &ProvisioningRequest,
		now: DateTime<Utc>,
		observe: &mut dyn FnMut(ProvisioningEvent<'_>),
	) -> Result<ProvisionedApplication, ProvisioningError> {
		observe(ProvisioningEvent::CreatingApplication);
		let redirect_uri = Some(request.redirect_uri()).filter(|uri| !uri.is_empty());
		let application = self
			.directory
			.create_application(request.name(), redirect_uri)
			.await
			.map_err(|source| ProvisioningError::CreateApplication { source })?;
		info!(app_id = %application.app_id, "application created");
		observe(ProvisioningEvent::ApplicationCreated(&application));

		observe(ProvisioningEvent::CreatingSecret);

		let days = request.secret_validity_days();
		let Some(expires_at) = secret_expiry(now, days) else {
			return Err(ProvisioningError::SecretExpiryOutOfRange { application, days });
		};
		let secret = match self
			.directory
			.add_password(&application.object_id, &secret_label(now), expires_at)
			.await
		{
			Ok(secret) => secret,
			Err(source) => {
				return Err(ProvisioningError::CreateSecret {
					application,
					source,
				})
			}
		};
		info!(expires_at = %secret.expires_at(), "client secret created");
		observe(ProvisioningEvent::SecretCreated(&secret));

		observe(ProvisioningEvent::AttachingPermissions);
		let grants = flatten_grants();
		if let Err(source) = self
			.directory
			.set_required_resource_access(&application.object_id, &grants)
			.await
		{
			return Err(ProvisioningError::AttachPermissions {
				application,
				source,
			});
		}
		info!(grants = grants.len(), "API permissions attached");
		observe(ProvisioningEvent::PermissionsAttached {
			grants: grants.len(),
		});

		Ok(ProvisionedApplication {
			application,
			secret,
		})
	}
}
