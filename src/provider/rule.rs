//! Per-provider validation and normalization rules, expressed as plain data.
//!
//! Rules are composed from a shared base rather than dispatched through a type hierarchy:
//! the social family adds `client_secret` on top of the base, Microsoft adds a tenant on top
//! of the social rule, and Apple swaps the secret for a signing key. Adding a provider means
//! adding a row to [`rules`].

// std
use std::{collections::BTreeSet, sync::OnceLock};
// self
use crate::{_prelude::*, provider::ProviderKind};

/// Operator option names understood by the integrator.
pub mod field {
	/// Provider selector.
	pub const PROVIDER: &str = "provider";
	/// Adapter on/off switch.
	pub const ENABLED: &str = "enabled";
	/// OAuth 2.0 client identifier.
	pub const CLIENT_ID: &str = "client_id";
	/// OAuth 2.0 client secret.
	pub const CLIENT_SECRET: &str = "client_secret";
	/// OIDC issuer for discovery-based providers.
	pub const ISSUER_URL: &str = "issuer_url";
	/// Microsoft tenant.
	pub const MICROSOFT_TENANT_ID: &str = "microsoft_tenant_id";
	/// Apple developer team.
	pub const APPLE_TEAM_ID: &str = "apple_team_id";
	/// Apple signing key identifier.
	pub const APPLE_PRIVATE_KEY_ID: &str = "apple_private_key_id";
	/// Apple signing key (PEM).
	pub const APPLE_PRIVATE_KEY: &str = "apple_private_key";
	/// Explicit record identifier override.
	pub const PROVIDER_ID: &str = "provider_id";
	/// End-user facing label override.
	pub const LABEL: &str = "label";
	/// Space-delimited scope list.
	pub const SCOPE: &str = "scope";
	/// Inline claim-mapper script.
	pub const JSONNET_MAPPER: &str = "jsonnet_mapper";
	/// External claim-mapper location.
	pub const MAPPER_URL: &str = "mapper_url";
	/// Where secret material travels.
	pub const SECRET_BACKEND: &str = "secret_backend";
}

/// Options that drive the adapter itself and never count as provider fields.
pub const ADAPTER_FIELDS: [&str; 2] = [field::PROVIDER, field::ENABLED];

const OIDC_DEFAULT_SCOPE: &[&str] = &["profile", "email", "address", "phone"];
const GITHUB_DEFAULT_SCOPE: &[&str] = &["user:email"];

/// Validation + normalization rule for one provider family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderRule {
	/// Options that must be present and non-empty.
	pub mandatory_fields: BTreeSet<&'static str>,
	/// Options that are forwarded when present.
	pub optional_fields: BTreeSet<&'static str>,
	/// Option name to output field name renames.
	pub rename_map: BTreeMap<&'static str, &'static str>,
	/// Output fields carrying secret material; redacted in debug output.
	pub secret_fields: BTreeSet<&'static str>,
	/// Scopes requested when the operator does not supply any.
	pub default_scope: &'static [&'static str],
}
impl ProviderRule {
	/// Rule shared by every provider.
	pub fn base() -> Self {
		Self {
			mandatory_fields: BTreeSet::from([field::CLIENT_ID]),
			optional_fields: BTreeSet::from([
				field::PROVIDER_ID,
				field::LABEL,
				field::SCOPE,
				field::JSONNET_MAPPER,
				field::MAPPER_URL,
				field::SECRET_BACKEND,
			]),
			rename_map: BTreeMap::new(),
			secret_fields: BTreeSet::from([field::CLIENT_SECRET]),
			default_scope: OIDC_DEFAULT_SCOPE,
		}
	}

	/// Base rule plus a client secret.
	pub fn social() -> Self {
		Self::base().with_mandatory([field::CLIENT_SECRET])
	}

	/// Adds mandatory options.
	pub fn with_mandatory<I>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = &'static str>,
	{
		self.mandatory_fields.extend(fields);

		self
	}

	/// Adds a rename from an option name to an output field name.
	pub fn with_rename(mut self, from: &'static str, to: &'static str) -> Self {
		self.rename_map.insert(from, to);

		self
	}

	/// Marks an output field as secret material.
	pub fn with_secret(mut self, output_field: &'static str) -> Self {
		self.secret_fields.insert(output_field);

		self
	}

	/// Overrides the default scope list.
	pub fn with_default_scope(mut self, scope: &'static [&'static str]) -> Self {
		self.default_scope = scope;

		self
	}

	/// Returns true if the option is mandatory or optional for this rule.
	pub fn accepts(&self, option: &str) -> bool {
		self.mandatory_fields.contains(option) || self.optional_fields.contains(option)
	}

	/// Output field name for an option after applying the rename map.
	pub fn output_name<'a>(&self, option: &'a str) -> &'a str {
		self.rename_map.get(option).copied().unwrap_or(option)
	}

	/// Returns true if the output field carries secret material.
	pub fn is_secret(&self, output_field: &str) -> bool {
		self.secret_fields.contains(output_field)
	}
}

/// The provider rule table, built once per process.
pub fn rules() -> &'static BTreeMap<ProviderKind, ProviderRule> {
	static RULES: OnceLock<BTreeMap<ProviderKind, ProviderRule>> = OnceLock::new();

	RULES.get_or_init(build_rules)
}

/// Looks up the rule for a provider.
pub fn lookup(kind: ProviderKind) -> &'static ProviderRule {
	// Every variant of the closed enum has a row, see `table_covers_every_kind`.
	&rules()[&kind]
}

fn build_rules() -> BTreeMap<ProviderKind, ProviderRule> {
	let generic = ProviderRule::base().with_mandatory([field::CLIENT_SECRET, field::ISSUER_URL]);
	let social = ProviderRule::social();
	let microsoft = ProviderRule::social()
		.with_mandatory([field::MICROSOFT_TENANT_ID])
		.with_rename(field::MICROSOFT_TENANT_ID, "microsoft_tenant");
	let apple = ProviderRule::base()
		.with_mandatory([
			field::APPLE_TEAM_ID,
			field::APPLE_PRIVATE_KEY_ID,
			field::APPLE_PRIVATE_KEY,
		])
		.with_rename(field::APPLE_TEAM_ID, "team_id")
		.with_rename(field::APPLE_PRIVATE_KEY_ID, "private_key_id")
		.with_rename(field::APPLE_PRIVATE_KEY, "private_key")
		.with_secret("private_key");
	let github = ProviderRule::social().with_default_scope(GITHUB_DEFAULT_SCOPE);

	ProviderKind::ALL
		.into_iter()
		.map(|kind| {
			let rule = match kind {
				ProviderKind::Generic | ProviderKind::Auth0 => generic.clone(),
				ProviderKind::Microsoft => microsoft.clone(),
				ProviderKind::Apple => apple.clone(),
				ProviderKind::Github => github.clone(),
				_ => social.clone(),
			};

			(kind, rule)
		})
		.collect()
}
