use crate::lockfile::{Lockfile, FILE_NAME};
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// A flake, rooted at the directory containing its `flake.nix`.
#[derive(Clone, Debug)]
pub struct Flake {
	dir: PathBuf,
}

impl Flake {
	#[must_use]
	pub fn new(dir: impl Into<PathBuf>) -> Flake {
		Flake { dir: dir.into() }
	}

	#[must_use]
	pub fn dir(&self) -> &Path {
		&self.dir
	}

	/// Read and parse the flake's current lockfile.
	pub async fn lockfile(&self) -> Result<Lockfile> {
		Lockfile::read(&self.dir.join(FILE_NAME)).await
	}

	/// Update the flake's lockfile by running `nix flake update`. Returns nix's diagnostic output.
	pub async fn update(&self) -> Result<String> {
		let output = run_command("nix", &["flake", "update"], &self.dir).await?;
		Ok(output.stderr)
	}
}

/// The captured output of a successfully completed command.
#[derive(Clone, Debug)]
pub struct Output {
	pub stdout: String,
	pub stderr: String,
}

/// Run a command in `dir` and capture its output. A non-zero exit status is an error whose message includes the command line and both captured streams.
pub async fn run_command(command: &str, args: &[&str], dir: &Path) -> Result<Output> {
	let output = tokio::process::Command::new(command)
		.args(args)
		.current_dir(dir)
		.output()
		.await
		.with_context(|| format!(r#"Failed to run "{command}"."#))?;

	let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
	let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

	if output.status.success() {
		return Ok(Output { stdout, stderr });
	}

	let mut command_line = command.to_owned();
	if !args.is_empty() {
		command_line.push(' ');
		command_line.push_str(&args.join(" "));
	}
	let mut message = format!(r#"The command "{command_line}" failed with {}."#, output.status);
	if !stdout.is_empty() {
		message.push_str(&format!("\nstandard output:\n{stdout}"));
	}
	if !stderr.is_empty() {
		message.push_str(&format!("\nstandard error:\n{stderr}"));
	}
	bail!(message);
}
