// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use appreg_core::ApplicationRecord;
use appreg_graph::GraphError;

/// Errors that can occur while provisioning an application.
///
/// Nothing is rolled back. Failures after the application exists carry its
/// record so the operator can find and clean it up.
#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
	#[error("failed to create application")]
	CreateApplication {
		#[source]
		source: GraphError,
	},

	#[error(
		"failed to create client secret for application {} (object id {})",
		application.app_id,
		application.object_id
	)]
	CreateSecret {
		application: ApplicationRecord,
		#[source]
		source: GraphError,
	},

	/// `now + days` does not fit in a timestamp.
	#[error(
		"secret validity of {days} days is out of range for application {} (object id {})",
		application.app_id,
		application.object_id
	)]
	SecretExpiryOutOfRange {
		application: ApplicationRecord,
		days: u32,
	},

	#[error(
		"failed to add API permissions to application {} (object id {})",
		application.app_id,
		application.object_id
	)]
	AttachPermissions {
		application: ApplicationRecord,
		#[source]
		source: GraphError,
	},
}

impl ProvisioningError {
	/// The application left behind by a partially completed run.
	pub fn orphaned_application(&self) -> Option<&ApplicationRecord> {
		match self {
			ProvisioningError::CreateApplication { .. } => None,
			ProvisioningError::CreateSecret { application, .. }
			| ProvisioningError::SecretExpiryOutOfRange { application, .. }
			| ProvisioningError::AttachPermissions { application, .. } => Some(application),
		}
	}
}
