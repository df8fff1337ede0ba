use anyhow::Result;
use flake_bump::{changes, lockfile::Lockfile, report};
use std::path::PathBuf;

/// Compare two lockfiles and print the report.
#[derive(Debug, clap::Args)]
pub struct Args {
	/// The path of the old lockfile.
	pub old: PathBuf,

	/// The path of the new lockfile.
	pub new: PathBuf,
}

pub async fn run(args: Args) -> Result<()> {
	// Parse both lockfiles.
	let old_lockfile = Lockfile::read(&args.old).await?;
	let new_lockfile = Lockfile::read(&args.new).await?;

	// Compare the lockfiles.
	let changes = changes::diff(&old_lockfile, &new_lockfile);
	if changes.is_empty() {
		println!("The lockfiles contain the same inputs.");
		return Ok(());
	}

	// Generate and print the report.
	let report = report::generate(&changes)?;
	println!("{}", report.title);
	println!();
	print!("{}", report.body);

	Ok(())
}
