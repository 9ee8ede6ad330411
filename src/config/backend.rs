//! Secret transport selection.

// self
use crate::{_prelude::*, error::ConfigError};

/// Where client secrets travel to the broker.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretBackend {
	/// Secrets are published inline with the provider record.
	#[default]
	Inline,
	/// Secrets live in an external store and only a reference is published.
	ExternalSecretStore {
		/// Store label as supplied by the operator (`secret`, `vault`).
		backend: String,
	},
}
impl SecretBackend {
	/// Parses the `secret_backend` option; absence selects [`SecretBackend::Inline`].
	pub fn parse(value: Option<&str>) -> Result<Self, ConfigError> {
		match value {
			None | Some("relation") | Some("inline") => Ok(SecretBackend::Inline),
			Some(backend @ ("secret" | "vault")) =>
				Ok(SecretBackend::ExternalSecretStore { backend: backend.to_owned() }),
			Some(other) => Err(ConfigError::InvalidSecretBackend { value: other.to_owned() }),
		}
	}

	/// Fails unless the backend can actually carry secrets today.
	pub fn ensure_supported(&self) -> Result<(), ConfigError> {
		match self {
			SecretBackend::Inline => Ok(()),
			SecretBackend::ExternalSecretStore { backend } =>
				Err(ConfigError::UnsupportedSecretBackend { backend: backend.clone() }),
		}
	}
}
