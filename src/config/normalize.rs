//! Turns a validated snapshot into the canonical provider record.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
// self
use crate::{
	_prelude::*,
	auth::{ClientSecret, ProviderRecordId, ScopeList},
	config::ValidatedConfig,
	error::ConfigError,
	provider::field,
	record::NormalizedProviderRecord,
};

/// Options consumed by the fixed record fields; everything else lands in `extra`.
const RECORD_FIELDS: [&str; 8] = [
	field::CLIENT_ID,
	field::CLIENT_SECRET,
	field::PROVIDER_ID,
	field::LABEL,
	field::SCOPE,
	field::JSONNET_MAPPER,
	field::MAPPER_URL,
	field::SECRET_BACKEND,
];

/// Scheme prefix used to ship inline claim mappers by value.
pub const BASE64_MAPPER_SCHEME: &str = "base64://";

/// Builds the record for a validated snapshot.
///
/// The function is pure: renames come from the provider rule, the identifier is either the
/// operator's `provider_id` or derived from the provider and client id, and scopes fall back
/// to the provider's defaults.
pub fn normalize(validated: &ValidatedConfig) -> Result<NormalizedProviderRecord, ConfigError> {
	let kind = validated.kind;
	let rule = validated.rule();
	// Mandatory for every rule, so validation guarantees presence.
	let client_id = validated.get(field::CLIENT_ID).unwrap_or_default().to_owned();
	let id = validated
		.get(field::PROVIDER_ID)
		.and_then(|explicit| ProviderRecordId::new(explicit).ok())
		.unwrap_or_else(|| ProviderRecordId::derive(kind, &client_id));
	let (jsonnet_mapper, mapper_url) = resolve_mapper(
		validated.get(field::JSONNET_MAPPER),
		validated.get(field::MAPPER_URL),
	)?;
	let extra = validated
		.fields()
		.filter(|(option, _)| !RECORD_FIELDS.contains(option))
		.map(|(option, value)| (rule.output_name(option).to_owned(), value.to_owned()))
		.collect();

	Ok(NormalizedProviderRecord {
		id,
		client_id,
		provider: kind,
		label: validated.get(field::LABEL).unwrap_or(kind.display_name()).to_owned(),
		client_secret: validated.get(field::CLIENT_SECRET).map(ClientSecret::new),
		scope: ScopeList::parse_or(validated.get(field::SCOPE), rule.default_scope),
		jsonnet_mapper,
		mapper_url,
		extra,
	})
}

/// Resolves the claim mapper; an inline script is also exposed as a `base64://` URI.
pub fn resolve_mapper(
	jsonnet_mapper: Option<&str>,
	mapper_url: Option<&str>,
) -> Result<(Option<String>, Option<String>), ConfigError> {
	match (jsonnet_mapper, mapper_url) {
		(Some(_), Some(_)) => Err(ConfigError::ConflictingMapper),
		(Some(script), None) => Ok((
			Some(script.to_owned()),
			Some(format!("{BASE64_MAPPER_SCHEME}{}", STANDARD.encode(script.as_bytes()))),
		)),
		(None, url) => Ok((None, url.map(str::to_owned))),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		config::{RawProviderConfig, validate},
		provider::ProviderKind,
	};

	fn normalize_raw(raw: RawProviderConfig, kind: ProviderKind) -> NormalizedProviderRecord {
		let validated = validate(&raw, kind).expect("Fixture should validate.");

		normalize(&validated).expect("Fixture should normalize.")
	}

	#[test]
	fn inline_mapper_is_exposed_as_base64_uri() {
		let (script, url) =
			resolve_mapper(Some("local claims = {};"), None).expect("Inline mapper is valid.");

		assert_eq!(script.as_deref(), Some("local claims = {};"));
		assert_eq!(url.as_deref(), Some("base64://bG9jYWwgY2xhaW1zID0ge307"));
	}

	#[test]
	fn both_mappers_conflict() {
		let err = resolve_mapper(Some("{}"), Some("https://example.com/mapper.jsonnet"))
			.expect_err("Inline and external mappers are exclusive.");

		assert!(matches!(err, ConfigError::ConflictingMapper));
	}

	#[test]
	fn explicit_identifier_wins() {
		let record = normalize_raw(
			RawProviderConfig::new()
				.with("client_id", "cid")
				.with("client_secret", "sec")
				.with("provider_id", "corp-google"),
			ProviderKind::Google,
		);

		assert_eq!(record.id.as_ref(), "corp-google");
	}

	#[test]
	fn explicit_identifier_is_used_verbatim() {
		let record = normalize_raw(
			RawProviderConfig::new()
				.with("client_id", "cid")
				.with("client_secret", "sec")
				.with("provider_id", "corp google "),
			ProviderKind::Google,
		);

		assert_eq!(record.id.as_ref(), "corp google ");
	}

	#[test]
	fn operator_scope_and_label_override_defaults() {
		let record = normalize_raw(
			RawProviderConfig::new()
				.with("client_id", "cid")
				.with("client_secret", "sec")
				.with("scope", "read:user user:email")
				.with("label", "GitHub Enterprise"),
			ProviderKind::Github,
		);

		assert_eq!(record.scope.as_slice(), ["read:user", "user:email"]);
		assert_eq!(record.label, "GitHub Enterprise");
		assert!(record.extra.is_empty());
	}

	#[test]
	fn external_mapper_url_passes_through() {
		let record = normalize_raw(
			RawProviderConfig::new()
				.with("client_id", "cid")
				.with("client_secret", "sec")
				.with("mapper_url", "https://example.com/mapper.jsonnet"),
			ProviderKind::Google,
		);

		assert_eq!(record.jsonnet_mapper, None);
		assert_eq!(record.mapper_url.as_deref(), Some("https://example.com/mapper.jsonnet"));
	}
}
