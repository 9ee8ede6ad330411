//! Secret material published to the broker: client secrets and Apple signing keys.

// self
use crate::{_prelude::*, provider::ProviderRule};

/// Placeholder printed instead of secret material.
pub const REDACTED: &str = "<redacted>";

/// Client secret shared with the broker.
///
/// Serialization emits the raw value because the shared channel is how the inline secret
/// backend transports credentials to the broker.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientSecret(String);
impl ClientSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for ClientSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "ClientSecret({REDACTED})")
	}
}
impl Display for ClientSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(REDACTED)
	}
}

/// Debug view of kind-specific record fields that hides the outputs a provider rule marks as
/// secret, such as Apple's `private_key`.
pub struct RedactedFields<'a> {
	rule: &'static ProviderRule,
	fields: &'a BTreeMap<String, String>,
}
impl<'a> RedactedFields<'a> {
	/// Wraps `fields` produced under `rule`.
	pub fn new(rule: &'static ProviderRule, fields: &'a BTreeMap<String, String>) -> Self {
		Self { rule, fields }
	}
}
impl Debug for RedactedFields<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_map()
			.entries(self.fields.iter().map(|(name, value)| {
				(name, if self.rule.is_secret(name) { REDACTED } else { value.as_str() })
			}))
			.finish()
	}
}
