use thiserror::Error;

/// A result.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error produced by parsing, diffing, or reporting on a lockfile.
#[derive(Debug, Error)]
pub enum Error {
	/// The JSON document did not match the expected lockfile shape.
	#[error("invalid lockfile: {0}")]
	Schema(String),

	/// The lockfile declared a schema version this crate does not support.
	#[error("incompatible lockfile version: expected {expected}, got {found}")]
	Version { expected: u64, found: u64 },

	/// A URI was requested for a flake reference kind with no defined rendering.
	#[error(r#"no URI representation for a flake reference of kind "{kind}""#)]
	UnsupportedReference { kind: String },

	/// A report was requested for an empty set of changes.
	#[error("cannot generate a report from an empty set of changes")]
	EmptyChanges,
}
