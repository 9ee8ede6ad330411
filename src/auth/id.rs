//! Identifier under which the broker registers a provider record.

// std
use std::ops::Deref;
// crates.io
use sha2::{Digest, Sha256};
// self
use crate::{_prelude::*, provider::ProviderKind};

/// Number of hex characters kept from the digest of a derived identifier.
pub const DERIVED_HASH_LEN: usize = 12;

/// Error returned when an identifier cannot key a record.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("Provider identifier cannot be empty.")]
	Empty,
}

/// Stable key of a published provider record.
///
/// Either chosen by the operator through `provider_id` and kept verbatim, or derived from the
/// provider kind and client id with [`ProviderRecordId::derive`].
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderRecordId(String);
impl ProviderRecordId {
	/// Wraps an operator-supplied identifier as is; only the empty string is rejected.
	pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
		let value = value.into();

		if value.is_empty() {
			return Err(IdentifierError::Empty);
		}

		Ok(Self(value))
	}

	/// Derives the identifier `{kind}_{hash}` for a provider/client pair.
	///
	/// The hash is the first [`DERIVED_HASH_LEN`] lowercase hex characters of
	/// `SHA-256(kind || client_id)`, so the same pair always maps to the same record.
	pub fn derive(kind: ProviderKind, client_id: &str) -> Self {
		let digest = Sha256::new()
			.chain_update(kind.as_str().as_bytes())
			.chain_update(client_id.as_bytes())
			.finalize();
		let mut id = format!("{kind}_");

		for byte in digest.iter().take(DERIVED_HASH_LEN / 2) {
			id.push_str(&format!("{byte:02x}"));
		}

		Self(id)
	}
}
impl Deref for ProviderRecordId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for ProviderRecordId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl TryFrom<String> for ProviderRecordId {
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl From<ProviderRecordId> for String {
	fn from(value: ProviderRecordId) -> Self {
		value.0
	}
}
impl Debug for ProviderRecordId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "ProviderRecordId({})", self.0)
	}
}
impl Display for ProviderRecordId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
