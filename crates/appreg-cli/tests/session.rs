// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end session tests against in-process fakes.

use std::io::{self, Cursor};
use std::path::Path;
use std::sync::{Arc, Mutex};

use appreg_auth::{AcquireCredential, AuthError};
use appreg_cli::{BrowserLauncher, Diagnostic, InputCollector, Session, SessionOptions};
use appreg_cli_config::BrowserPolicy;
use appreg_core::{
	flatten_grants, ApplicationRecord, ClientSecret, Credential, PermissionGrant, SecretString,
};
use appreg_graph::{DirectoryApi, GraphError};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

const REDIRECT: &str = "https://acme.example/#/auth/azuread/";

struct FakeAuthenticator {
	fail: bool,
}

#[async_trait]
impl AcquireCredential for FakeAuthenticator {
	async fn acquire(&self) -> Result<Credential, AuthError> {
		if self.fail {
			return Err(AuthError::Failed(Box::new(AuthError::DeviceCodeExpired)));
		}
		Ok(Credential::new(
			SecretString::new("at"),
			"ops@contoso.com",
			"tenant-xyz",
		))
	}
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
	Create(String, Option<String>),
	AddPassword(String, String),
	SetAccess(String, Vec<PermissionGrant>),
}

#[derive(Clone, Default)]
struct FakeDirectory {
	calls: Arc<Mutex<Vec<Call>>>,
	fail_secret: bool,
}

impl FakeDirectory {
	fn calls(&self) -> Vec<Call> {
		self.calls.lock().unwrap().clone()
	}
}

#[async_trait]
impl DirectoryApi for FakeDirectory {
	async fn create_application(
		&self,
		display_name: &str,
		redirect_uri: Option<&str>,
	) -> Result<ApplicationRecord, GraphError> {
		self.calls.lock().unwrap().push(Call::Create(
			display_name.to_string(),
			redirect_uri.map(str::to_string),
		));
		Ok(ApplicationRecord {
			app_id: "11111111-aaaa-bbbb-cccc-000000000001".to_string(),
			object_id: "22222222-aaaa-bbbb-cccc-000000000002".to_string(),
			display_name: display_name.to_string(),
			redirect_uris: redirect_uri.map(str::to_string).into_iter().collect(),
		})
	}

	async fn add_password(
		&self,
		object_id: &str,
		label: &str,
		expires_at: DateTime<Utc>,
	) -> Result<ClientSecret, GraphError> {
		self.calls
			.lock()
			.unwrap()
			.push(Call::AddPassword(object_id.to_string(), label.to_string()));
		if self.fail_secret {
			return Err(GraphError::Api {
				status: 400,
				code: "Request_BadRequest".to_string(),
				message: "credential limit reached".to_string(),
			});
		}
		Ok(ClientSecret::new(
			SecretString::new("one~time~secret"),
			Some("key-1".to_string()),
			label,
			expires_at,
		))
	}

	async fn set_required_resource_access(
		&self,
		object_id: &str,
		grants: &[PermissionGrant],
	) -> Result<(), GraphError> {
		self.calls
			.lock()
			.unwrap()
			.push(Call::SetAccess(object_id.to_string(), grants.to_vec()));
		Ok(())
	}
}

#[derive(Default)]
struct RecordingBrowser {
	opened: Mutex<Vec<String>>,
	fail: bool,
}

impl BrowserLauncher for RecordingBrowser {
	fn open(&self, url: &str) -> io::Result<()> {
		self.opened.lock().unwrap().push(url.to_string());
		if self.fail {
			return Err(io::Error::new(io::ErrorKind::NotFound, "no browser"));
		}
		Ok(())
	}
}

fn options(dir: &Path, open_browser: BrowserPolicy) -> SessionOptions {
	SessionOptions {
		summary_dir: dir.to_path_buf(),
		open_browser,
		consent_base: "https://login.microsoftonline.com".to_string(),
	}
}

fn console(input: &str) -> InputCollector<Cursor<Vec<u8>>, Vec<u8>> {
	InputCollector::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

fn output(console: InputCollector<Cursor<Vec<u8>>, Vec<u8>>) -> String {
	String::from_utf8(console.into_parts().1).unwrap()
}

#[tokio::test]
async fn full_session_writes_summary_and_consent_link() {
	let dir = tempfile::tempdir().unwrap();
	let auth = FakeAuthenticator { fail: false };
	let browser = RecordingBrowser::default();
	let directory = FakeDirectory::default();
	let session = Session::new(&auth, &browser, options(dir.path(), BrowserPolicy::Ask));

	let mut console = console(&format!("Acme\n{REDIRECT}\n365\nn\n"));
	let started = Utc::now();
	let report = session
		.run(&mut console, |_| directory.clone())
		.await
		.unwrap();

	assert_eq!(report.request.name(), "Acme");
	assert_eq!(report.request.redirect_uri(), REDIRECT);
	assert_eq!(report.request.secret_validity_days(), 365);
	assert_eq!(
		report.consent_url,
		"https://login.microsoftonline.com/tenant-xyz/adminconsent?client_id=11111111-aaaa-bbbb-cccc-000000000001"
	);

	let expiry = report.provisioned.secret.expires_at();
	let expected = started + Duration::days(365);
	assert!((expiry - expected).num_seconds().abs() < 60);

	let path = report.summary_path.clone().unwrap();
	assert_eq!(path, dir.path().join("Acme.txt"));
	let written = std::fs::read_to_string(&path).unwrap();
	assert_eq!(written, report.summary);
	assert!(written.contains("Application ID:   11111111-aaaa-bbbb-cccc-000000000001"));
	assert!(written.contains("Object ID:        22222222-aaaa-bbbb-cccc-000000000002"));
	assert!(written.contains("Client Secret:    one~time~secret"));
	assert!(written.contains("Tenant ID:        tenant-xyz"));
	assert!(report.diagnostics.is_empty());
	assert!(browser.opened.lock().unwrap().is_empty());

	let calls = directory.calls();
	assert_eq!(calls.len(), 3);
	assert_eq!(
		calls[0],
		Call::Create("Acme".to_string(), Some(REDIRECT.to_string()))
	);
	match &calls[2] {
		Call::SetAccess(object_id, grants) => {
			assert_eq!(object_id, "22222222-aaaa-bbbb-cccc-000000000002");
			assert_eq!(grants, &flatten_grants());
		}
		other => panic!("unexpected call {other:?}"),
	}

	let out = output(console);
	let step1 = out.find("Step 1:").unwrap();
	let step4 = out.find("Step 4:").unwrap();
	let step7 = out.find("Step 7:").unwrap();
	assert!(step1 < step4 && step4 < step7);
	assert!(out.contains("Successfully authenticated as: ops@contoso.com"));
	assert!(out.contains("📄 Summary written to file:"));
}

#[tokio::test]
async fn secret_failure_stops_before_permissions_and_summary() {
	let dir = tempfile::tempdir().unwrap();
	let auth = FakeAuthenticator { fail: false };
	let browser = RecordingBrowser::default();
	let directory = FakeDirectory {
		fail_secret: true,
		..Default::default()
	};
	let session = Session::new(&auth, &browser, options(dir.path(), BrowserPolicy::Always));

	let mut console = console(&format!("Acme\n{REDIRECT}\n\n"));
	let err = session
		.run(&mut console, |_| directory.clone())
		.await
		.unwrap_err();

	assert!(err.to_string().contains("failed to create client secret"));
	assert!(err.to_string().contains("22222222-aaaa-bbbb-cccc-000000000002"));
	assert!(!directory
		.calls()
		.iter()
		.any(|c| matches!(c, Call::SetAccess(..))));
	assert!(!dir.path().join("Acme.txt").exists());
	assert!(browser.opened.lock().unwrap().is_empty());
}

#[tokio::test]
async fn authentication_failure_makes_no_directory_calls() {
	let dir = tempfile::tempdir().unwrap();
	let auth = FakeAuthenticator { fail: true };
	let browser = RecordingBrowser::default();
	let directory = FakeDirectory::default();
	let session = Session::new(&auth, &browser, options(dir.path(), BrowserPolicy::Never));

	let mut console = console(&format!("Acme\n{REDIRECT}\n30\n"));
	let err = session
		.run(&mut console, |_| directory.clone())
		.await
		.unwrap_err();

	assert!(err.to_string().starts_with("authentication failed:"));
	assert!(directory.calls().is_empty());
	assert!(!output(console).contains("Enter application name"));
}

#[tokio::test]
async fn browser_failure_is_not_fatal() {
	let dir = tempfile::tempdir().unwrap();
	let auth = FakeAuthenticator { fail: false };
	let browser = RecordingBrowser {
		fail: true,
		..Default::default()
	};
	let directory = FakeDirectory::default();
	let session = Session::new(&auth, &browser, options(dir.path(), BrowserPolicy::Ask));

	let mut console = console(&format!("\n{REDIRECT}\nabc\nyes\n"));
	let report = session
		.run(&mut console, |_| directory.clone())
		.await
		.unwrap();

	assert_eq!(report.request.name(), "Easy2PatchProd");
	assert_eq!(report.request.secret_validity_days(), 730);
	assert_eq!(browser.opened.lock().unwrap().as_slice(), [report.consent_url.clone()]);
	assert_eq!(
		report.diagnostics,
		vec![Diagnostic::BrowserLaunch {
			message: "no browser".to_string()
		}]
	);
	assert!(report.summary_path.is_some());
	assert!(output(console).contains("Please manually navigate to the URL above."));
}

#[tokio::test]
async fn summary_write_failure_is_not_fatal() {
	let dir = tempfile::tempdir().unwrap();
	let missing = dir.path().join("missing");
	let auth = FakeAuthenticator { fail: false };
	let browser = RecordingBrowser::default();
	let directory = FakeDirectory::default();
	let session = Session::new(&auth, &browser, options(&missing, BrowserPolicy::Never));

	let mut console = console(&format!("Acme\n{REDIRECT}\n10\n"));
	let report = session
		.run(&mut console, |_| directory.clone())
		.await
		.unwrap();

	assert!(report.summary_path.is_none());
	assert!(matches!(
		report.diagnostics.as_slice(),
		[Diagnostic::SummaryWrite { .. }]
	));
	let out = output(console);
	assert!(out.contains("❌ Failed to write summary to file:"));
	assert!(out.contains("=== Registration Summary ==="));
}

#[tokio::test]
async fn unrepresentable_validity_is_reported_without_a_secret() {
	let dir = tempfile::tempdir().unwrap();
	let auth = FakeAuthenticator { fail: false };
	let browser = RecordingBrowser::default();
	let directory = FakeDirectory::default();
	let session = Session::new(&auth, &browser, options(dir.path(), BrowserPolicy::Never));

	let mut console = console(&format!("Acme\n{REDIRECT}\n2147483647\n"));
	let err = session
		.run(&mut console, |_| directory.clone())
		.await
		.unwrap_err();

	assert!(err.to_string().contains("2147483647 days is out of range"));
	assert!(err.to_string().contains("11111111-aaaa-bbbb-cccc-000000000001"));
	assert_eq!(
		directory.calls(),
		vec![Call::Create("Acme".to_string(), Some(REDIRECT.to_string()))]
	);
	assert!(!dir.path().join("Acme.txt").exists());
}
