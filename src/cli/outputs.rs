use anyhow::{Context, Result};
use tokio::io::AsyncWriteExt;

/// Set a named output for the surrounding automation.
///
/// When `GITHUB_OUTPUT` is set, the output is appended to that file in the workflow command format, using a random delimiter so the value may span lines. Otherwise the output is printed to standard output.
pub async fn set(name: &str, value: &str) -> Result<()> {
	let Ok(path) = std::env::var("GITHUB_OUTPUT") else {
		println!("{name}:");
		println!("{value}");
		return Ok(());
	};

	// The delimiter must not occur in the value.
	let delimiter = format!("delimiter_{:016x}", rand::random::<u64>());
	let entry = format!("{name}<<{delimiter}\n{value}\n{delimiter}\n");

	let mut file = tokio::fs::OpenOptions::new()
		.append(true)
		.create(true)
		.open(&path)
		.await
		.with_context(|| format!(r#"Failed to open "{path}"."#))?;
	file.write_all(entry.as_bytes())
		.await
		.with_context(|| format!(r#"Failed to write the output "{name}"."#))?;

	Ok(())
}
