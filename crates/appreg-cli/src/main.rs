// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use appreg_cli::auth::{build_authenticator, logout};
use appreg_cli::logging::init_tracing;
use appreg_cli::session::render_failure;
use appreg_cli::{catalog, InputCollector, Session, SessionOptions, SystemBrowser};
use appreg_cli_config::{load_config_with_cli, AppregConfig, CliOverrides};
use appreg_graph::GraphClient;
use clap::{Parser, Subcommand};
use tracing::debug;

/// Create an Azure AD application registration with its client secret,
/// API permissions and admin consent link.
#[derive(Parser, Debug)]
#[command(name = "appreg", version, about)]
struct Args {
	#[command(subcommand)]
	command: Option<Command>,

	/// Additional configuration file
	#[arg(long, global = true, env = "APPREG_CONFIG")]
	config: Option<PathBuf>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(long, global = true)]
	log_level: Option<String>,

	/// Emit logs as JSON
	#[arg(long, global = true)]
	json_logs: bool,

	/// Directory to write the registration summary to
	#[arg(long, global = true)]
	summary_dir: Option<PathBuf>,

	/// Never open a browser
	#[arg(long, global = true)]
	no_browser: bool,

	/// Keep signed-in accounts on disk for later runs
	#[arg(long, global = true)]
	remember_account: bool,

	/// Exit without waiting for Enter at the end of the session
	#[arg(long, global = true)]
	no_pause: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Run the provisioning session (default)
	Provision,
	/// Forget cached sign-in accounts
	Logout,
	/// Print the API permissions granted to every registration
	Catalog {
		/// Machine-readable output
		#[arg(long)]
		json: bool,
	},
}

impl Args {
	fn overrides(&self) -> CliOverrides {
		CliOverrides {
			config_file: self.config.clone(),
			log_level: self.log_level.clone(),
			json_logs: self.json_logs,
			summary_dir: self.summary_dir.clone(),
			no_browser: self.no_browser,
			remember_account: self.remember_account,
		}
	}
}

#[tokio::main]
async fn main() -> ExitCode {
	let args = Args::parse();

	let config = match load_config_with_cli(args.overrides()) {
		Ok(config) => config,
		Err(e) => {
			eprintln!("❌ Error: invalid configuration: {e}");
			return ExitCode::FAILURE;
		}
	};
	init_tracing(&config.logging);
	debug!(?config, "configuration loaded");

	let outcome = match args.command.unwrap_or(Command::Provision) {
		Command::Catalog { json } => print_catalog(json),
		Command::Logout => logout(&config.identity).await,
		Command::Provision => return provision(&config, args.no_pause).await,
	};

	match outcome {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("{}", render_failure(&e));
			ExitCode::FAILURE
		}
	}
}

fn print_catalog(json: bool) -> Result<()> {
	let text = if json {
		catalog::render_json()?
	} else {
		catalog::render_table()
	};
	let mut stdout = io::stdout().lock();
	writeln!(stdout, "{}", text.trim_end())?;
	Ok(())
}

async fn provision(config: &AppregConfig, no_pause: bool) -> ExitCode {
	let authenticator = build_authenticator(config);
	let browser = SystemBrowser;
	let session = Session::new(&authenticator, &browser, SessionOptions::from_config(config));
	let graph_base = config.identity.graph_base.clone();

	let stdin = io::stdin();
	let mut console = InputCollector::new(stdin.lock(), io::stdout());

	let code = match session
		.run(&mut console, |credential| GraphClient::new(graph_base, credential))
		.await
	{
		Ok(report) => {
			debug!(
				app_id = %report.provisioned.application.app_id,
				diagnostics = report.diagnostics.len(),
				"session complete"
			);
			ExitCode::SUCCESS
		}
		Err(e) => {
			console.note(render_failure(&e));
			ExitCode::FAILURE
		}
	};

	if !no_pause {
		console.note("");
		if let Err(e) = console.pause("Press Enter to exit...") {
			debug!(error = %e, "pause failed");
		}
	}
	code
}
