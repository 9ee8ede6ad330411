//! Canonical provider record published to the identity broker.

// self
use crate::{
	_prelude::*,
	auth::{ClientSecret, IdentifierError, ProviderRecordId, RedactedFields, ScopeList},
	provider::{ProviderKind, lookup},
};

/// One normalized, publishable description of an external OAuth2/OIDC client.
///
/// Records are replaced wholesale on every republish; kind-specific fields (issuer, tenant,
/// Apple signing key, ...) live in [`extra`](Self::extra) and are flattened into the wire object.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordWire")]
pub struct NormalizedProviderRecord {
	/// Stable record identifier.
	pub id: ProviderRecordId,
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// Provider family.
	pub provider: ProviderKind,
	/// End-user facing label.
	pub label: String,
	/// Client secret; absent for providers that authenticate with a signing key.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub client_secret: Option<ClientSecret>,
	/// Scopes requested from the provider, in order.
	pub scope: ScopeList,
	/// Inline claim-mapper script.
	pub jsonnet_mapper: Option<String>,
	/// Claim-mapper location (a `base64://` URI when the script is inline).
	pub mapper_url: Option<String>,
	/// Kind-specific output fields, after renames.
	#[serde(flatten)]
	pub extra: BTreeMap<String, String>,
}
impl NormalizedProviderRecord {
	/// Kind-specific output field.
	pub fn extra_field(&self, name: &str) -> Option<&str> {
		self.extra.get(name).map(String::as_str)
	}
}
impl Debug for NormalizedProviderRecord {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("NormalizedProviderRecord")
			.field("id", &self.id)
			.field("client_id", &self.client_id)
			.field("provider", &self.provider)
			.field("label", &self.label)
			.field("client_secret", &self.client_secret)
			.field("scope", &self.scope)
			.field("jsonnet_mapper_set", &self.jsonnet_mapper.is_some())
			.field("mapper_url", &self.mapper_url)
			.field("extra", &RedactedFields::new(lookup(self.provider), &self.extra))
			.finish()
	}
}

/// Errors raised while turning a decoded wire object into a record.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum RecordDecodeError {
	/// The `client_id` field is empty.
	#[error("Field `client_id` cannot be empty.")]
	EmptyClientId,
	/// The `id` field is not a valid identifier.
	#[error(transparent)]
	Identifier(#[from] IdentifierError),
}

/// Lenient wire view: only `provider` and `client_id` are required, the rest is derived.
#[derive(Deserialize)]
struct RecordWire {
	#[serde(default)]
	id: Option<String>,
	client_id: String,
	provider: ProviderKind,
	#[serde(default)]
	label: Option<String>,
	#[serde(default)]
	client_secret: Option<ClientSecret>,
	#[serde(default)]
	scope: Option<ScopeList>,
	#[serde(default)]
	jsonnet_mapper: Option<String>,
	#[serde(default)]
	mapper_url: Option<String>,
	#[serde(flatten)]
	extra: BTreeMap<String, String>,
}
impl TryFrom<RecordWire> for NormalizedProviderRecord {
	type Error = RecordDecodeError;

	fn try_from(wire: RecordWire) -> Result<Self, Self::Error> {
		if wire.client_id.is_empty() {
			return Err(RecordDecodeError::EmptyClientId);
		}

		let id = match wire.id {
			Some(id) => ProviderRecordId::new(id)?,
			None => ProviderRecordId::derive(wire.provider, &wire.client_id),
		};
		let scope = wire
			.scope
			.unwrap_or_else(|| ScopeList::parse_or(None, lookup(wire.provider).default_scope));

		Ok(Self {
			id,
			label: wire.label.unwrap_or_else(|| wire.provider.display_name().to_owned()),
			client_id: wire.client_id,
			provider: wire.provider,
			client_secret: wire.client_secret,
			scope,
			jsonnet_mapper: wire.jsonnet_mapper,
			mapper_url: wire.mapper_url,
			extra: wire.extra,
		})
	}
}
