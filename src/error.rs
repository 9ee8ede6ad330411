//! Integrator-level error types shared across validation, the channel codec, and the adapter.

// self
use crate::{_prelude::*, provider::ProviderKind};

/// Integrator-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical integrator error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Operator configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Shared channel failure (decode, encode, or backend).
	#[error(transparent)]
	Channel(#[from] ChannelError),

	/// No redirect URI has been published by the identity broker yet.
	#[error("No redirect_uri found.")]
	RedirectUriNotFound,
	/// Only the leader replica may answer queries that touch shared state.
	#[error("This replica is not the leader.")]
	NotLeader,
}

/// Configuration and validation failures raised while handling operator input.
///
/// None of these are retried: they describe the current configuration snapshot, so the only
/// remedy is corrected input.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// The `provider` option is absent or names an unsupported provider.
	#[error("Required configuration 'provider' MUST be one of the following: {allowed}")]
	UnknownProvider {
		/// Value the operator supplied, when present.
		value: Option<String>,
		/// Comma-separated list of supported providers.
		allowed: String,
	},
	/// A mandatory option for the selected provider is absent or empty.
	#[error("Missing required configuration '{field}' for provider '{kind}'")]
	MissingField {
		/// Name of the missing option.
		field: &'static str,
		/// Provider whose rule requires the option.
		kind: ProviderKind,
	},
	/// Both an inline claim mapper and an external mapper URL were supplied.
	#[error("Only one of 'jsonnet_mapper' and 'mapper_url' may be set")]
	ConflictingMapper,
	/// The secret backend is recognized but has no implementation yet.
	#[error("Secret backend '{backend}' is not supported yet")]
	UnsupportedSecretBackend {
		/// Backend label as supplied by the operator.
		backend: String,
	},
	/// The secret backend value is not recognized.
	#[error(
		"Invalid value {value} for 'secret_backend', allowed values are: ['relation', 'secret', 'vault']"
	)]
	InvalidSecretBackend {
		/// Value the operator supplied.
		value: String,
	},
	/// Operator configuration document could not be parsed.
	#[error("Configuration document is malformed.")]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Failures raised while reading from or writing to the shared channel.
#[derive(Debug, ThisError)]
pub enum ChannelError {
	/// The value under `key` is present but not decodable per the expected shape.
	#[error("Channel value under `{key}` is malformed.")]
	MalformedPayload {
		/// Channel key that held the malformed value.
		key: &'static str,
		/// Structured decoding failure with the offending JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Records could not be encoded for publication.
	#[error("Channel payload could not be encoded.")]
	Encode(#[source] serde_json::Error),
	/// Backend-level failure reported by the channel implementation.
	#[error("Channel backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
