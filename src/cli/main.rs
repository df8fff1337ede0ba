#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

use anyhow::Result;
use clap::Parser;
use futures::FutureExt;
use tracing_subscriber::prelude::*;

mod commands;
mod outputs;

#[derive(Parser)]
#[clap(
	version = concat!(env!("CARGO_PKG_VERSION")),
	disable_help_subcommand = true,
)]
struct Args {
	#[clap(subcommand)]
	subcommand: Subcommand,
}

#[derive(Parser)]
enum Subcommand {
	Diff(commands::diff::Args),
	Update(commands::update::Args),
}

#[tokio::main]
async fn main() -> Result<()> {
	// Enable backtraces by default in debug mode.
	if cfg!(debug_assertions)
		&& matches!(
			std::env::var("RUST_BACKTRACE"),
			Err(std::env::VarError::NotPresent)
		) {
		std::env::set_var("RUST_BACKTRACE", "1");
	}
	setup_tracing();

	let args = Args::parse();
	match args.subcommand {
		Subcommand::Diff(args) => commands::diff::run(args).boxed(),
		Subcommand::Update(args) => commands::update::run(args).boxed(),
	}
	.await?;
	Ok(())
}

fn setup_tracing() {
	let env_layer = if std::env::var("FLAKE_BUMP_TRACING").is_ok() {
		let filter =
			tracing_subscriber::filter::EnvFilter::try_from_env("FLAKE_BUMP_TRACING").unwrap();
		Some(filter)
	} else if cfg!(debug_assertions) {
		Some(tracing_subscriber::EnvFilter::new("[]=info"))
	} else {
		None
	};
	if let Some(env_layer) = env_layer {
		let format_layer = tracing_subscriber::fmt::layer()
			.pretty()
			.with_span_events(tracing_subscriber::fmt::format::FmtSpan::NEW);
		let subscriber = tracing_subscriber::registry()
			.with(env_layer)
			.with(format_layer);
		subscriber.init();
	}
}
