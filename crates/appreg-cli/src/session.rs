// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! One provisioning session, from sign-in to the written summary.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use appreg_auth::AcquireCredential;
use appreg_cli_config::{AppregConfig, BrowserPolicy};
use appreg_core::{admin_consent_url_with_base, Credential, ProvisioningRequest};
use appreg_graph::DirectoryApi;
use appreg_provisioning::{ProvisionedApplication, Provisioner, ProvisioningEvent};
use chrono::Utc;
use tracing::{info, instrument};

use crate::input::InputCollector;
use crate::report::{
	format_expiry, launch_browser, render_summary, write_summary, BrowserLauncher, Diagnostic,
};

const CONSENT_PROMPT: &str = "Would you like to open the admin consent URL in your browser? (y/n): ";

#[derive(Debug, Clone)]
pub struct SessionOptions {
	pub summary_dir: PathBuf,
	pub open_browser: BrowserPolicy,
	/// Login host the admin consent link is rooted at.
	pub consent_base: String,
}

impl SessionOptions {
	pub fn from_config(config: &AppregConfig) -> Self {
		Self {
			summary_dir: config.output.summary_dir.clone(),
			open_browser: config.output.open_browser,
			consent_base: config.identity.login_base.clone(),
		}
	}
}

/// Everything a successful session produced.
#[derive(Debug)]
pub struct SessionReport {
	pub request: ProvisioningRequest,
	pub username: String,
	pub tenant_id: String,
	pub provisioned: ProvisionedApplication,
	pub consent_url: String,
	pub summary: String,
	/// Set when the summary file was written.
	pub summary_path: Option<PathBuf>,
	pub diagnostics: Vec<Diagnostic>,
}

pub struct Session<'a> {
	authenticator: &'a dyn AcquireCredential,
	browser: &'a dyn BrowserLauncher,
	options: SessionOptions,
}

impl<'a> Session<'a> {
	pub fn new(
		authenticator: &'a dyn AcquireCredential,
		browser: &'a dyn BrowserLauncher,
		options: SessionOptions,
	) -> Self {
		Self {
			authenticator,
			browser,
			options,
		}
	}

	/// Runs the whole workflow. `connect` builds the directory client once
	/// the operator's credential is known.
	///
	/// Any error aborts the session; created directory objects are left in
	/// place and named in the error.
	#[instrument(skip_all)]
	pub async fn run<R, W, D, F>(
		&self,
		console: &mut InputCollector<R, W>,
		connect: F,
	) -> Result<SessionReport>
	where
		R: BufRead,
		W: Write,
		D: DirectoryApi,
		F: FnOnce(&Credential) -> D,
	{
		console.say("=== Azure AD Application Registration Tool ===")?;
		console.say(
			"This tool will help you create Azure AD app registrations with required permissions.",
		)?;
		console.say("")?;

		console.say("Step 1: Authenticating with Azure AD...")?;
		let credential = self.authenticator.acquire().await?;
		console.say(format!(
			"Successfully authenticated as: {}",
			credential.username()
		))?;
		console.say("")?;

		let request = console.collect()?;
		info!(
			name = %request.name(),
			secret_validity_days = request.secret_validity_days(),
			"provisioning request collected"
		);

		let provisioner = Provisioner::new(connect(&credential));
		let provisioned = provisioner
			.provision_observed(&request, Utc::now(), &mut |event| {
				show_progress(console, event)
			})
			.await?;

		console.say("Step 7: Generating admin consent URL...")?;
		let consent_url = admin_consent_url_with_base(
			&self.options.consent_base,
			&provisioned.application.app_id,
			credential.tenant_id(),
		);
		console.say(format!("Admin Consent URL: {consent_url}"))?;
		console.say("")?;

		let mut diagnostics = Vec::new();
		if self.should_open_browser(console)? {
			match launch_browser(self.browser, &consent_url) {
				Ok(()) => console.note("Admin consent URL opened in browser."),
				Err(diagnostic) => {
					console.note(format!("Could not open browser: {}", diagnostic_message(&diagnostic)));
					console.note("Please manually navigate to the URL above.");
					diagnostics.push(diagnostic);
				}
			}
		}

		let summary = render_summary(
			request.name(),
			&provisioned.application,
			&provisioned.secret,
			credential.tenant_id(),
		);
		console.note(&summary);

		let summary_path = match write_summary(&self.options.summary_dir, request.name(), &summary) {
			Ok(path) => {
				console.note(format!("📄 Summary written to file: {}", path.display()));
				Some(path)
			}
			Err(diagnostic) => {
				console.note(format!(
					"❌ Failed to write summary to file: {}",
					diagnostic_message(&diagnostic)
				));
				diagnostics.push(diagnostic);
				None
			}
		};

		Ok(SessionReport {
			request,
			username: credential.username().to_string(),
			tenant_id: credential.tenant_id().to_string(),
			provisioned,
			consent_url,
			summary,
			summary_path,
			diagnostics,
		})
	}

	fn should_open_browser<R: BufRead, W: Write>(
		&self,
		console: &mut InputCollector<R, W>,
	) -> Result<bool> {
		Ok(match self.options.open_browser {
			BrowserPolicy::Always => true,
			BrowserPolicy::Never => false,
			BrowserPolicy::Ask => console.confirm(CONSENT_PROMPT)?,
		})
	}
}

fn diagnostic_message(diagnostic: &Diagnostic) -> &str {
	match diagnostic {
		Diagnostic::BrowserLaunch { message } | Diagnostic::SummaryWrite { message, .. } => message,
	}
}

fn show_progress<R: BufRead, W: Write>(
	console: &mut InputCollector<R, W>,
	event: ProvisioningEvent<'_>,
) {
	match event {
		ProvisioningEvent::CreatingApplication => {
			console.note("Step 4: Creating Azure AD application...")
		}
		ProvisioningEvent::ApplicationCreated(application) => {
			console.note("Application created successfully!");
			console.note(format!("Application ID: {}", application.app_id));
			console.note(format!("Object ID: {}", application.object_id));
			console.note("");
		}
		ProvisioningEvent::CreatingSecret => console.note("Step 5: Creating client secret..."),
		ProvisioningEvent::SecretCreated(secret) => {
			console.note(format!(
				"Client Secret created (expires: {})",
				format_expiry(secret.expires_at())
			));
			console.note(format!("Secret Value: {}", secret.secret_text()));
			console.note("⚠️  IMPORTANT: Save this secret value now - it won't be shown again!");
			console.note("");
		}
		ProvisioningEvent::AttachingPermissions => {
			console.note("Step 6: Adding required API permissions...")
		}
		ProvisioningEvent::PermissionsAttached { .. } => {
			console.note("Required permissions added successfully!");
			console.note("");
		}
	}
}

/// Console text for an error that ended the session: the message, then the
/// first underlying cause when there is one.
pub fn render_failure(err: &anyhow::Error) -> String {
	let mut out = format!("❌ Error: {err}");
	if let Some(cause) = err.chain().nth(1) {
		out.push_str(&format!("\nDetails: {cause}"));
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use appreg_auth::AuthError;
	use appreg_provisioning::ProvisioningError;

	#[test]
	fn failure_without_cause_has_no_details() {
		let err = anyhow::anyhow!("input closed");
		assert_eq!(render_failure(&err), "❌ Error: input closed");
	}

	#[test]
	fn failure_details_show_first_cause() {
		let err: anyhow::Error = ProvisioningError::CreateApplication {
			source: appreg_graph::GraphError::InvalidResponse("missing id".to_string()),
		}
		.into();
		assert_eq!(
			render_failure(&err),
			"❌ Error: failed to create application\nDetails: unexpected Graph response: missing id"
		);
	}

	#[test]
	fn authentication_failures_are_labelled() {
		let err: anyhow::Error = AuthError::Failed(Box::new(AuthError::Declined)).into();
		let text = render_failure(&err);
		assert!(text.starts_with("❌ Error: authentication failed:"));
		assert!(text.contains("Details: sign-in was declined by the operator"));
	}
}
