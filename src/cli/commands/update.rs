use anyhow::{Context, Result};
use flake_bump::{changes, flake::Flake, report};
use std::path::PathBuf;

/// Update the flake's inputs and report what changed.
#[derive(Debug, clap::Args)]
pub struct Args {
	/// The directory containing the flake. Defaults to the current directory.
	pub path: Option<PathBuf>,
}

pub async fn run(args: Args) -> Result<()> {
	// Get the flake directory.
	let mut dir =
		std::env::current_dir().context("Failed to get the current working directory.")?;
	if let Some(path) = &args.path {
		dir.push(path);
	}
	let flake = Flake::new(&dir);

	// Read the current lockfile.
	let old_lockfile = flake.lockfile().await?;
	tracing::debug!(?old_lockfile, "Read the old lockfile.");

	// Update the flake's inputs.
	let output = flake.update().await?;
	tracing::info!("Updated the flake's inputs.");
	tracing::debug!(%output, "Output of `nix flake update`.");

	// Read the updated lockfile.
	let new_lockfile = flake.lockfile().await?;
	tracing::debug!(?new_lockfile, "Read the new lockfile.");

	// Compare the lockfiles.
	let changes = changes::diff(&old_lockfile, &new_lockfile);
	tracing::debug!(?changes, "Compared the lockfiles.");
	if changes.is_empty() {
		tracing::info!("All flake inputs are already up to date.");
		return Ok(());
	}

	// Generate the report.
	let report = report::generate(&changes).context("Failed to generate the report.")?;

	// Publish the report.
	let commit_message = format!("{}\n\n{}", report.title, report.body);
	crate::outputs::set("commit-message", &commit_message).await?;
	crate::outputs::set("pull-request-title", &report.title).await?;
	crate::outputs::set("pull-request-body", &report.body).await?;

	Ok(())
}
