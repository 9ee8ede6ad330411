// crates.io
use serde_json::{Value, json};
// self
use idp_integrator::{
	_preludet::*,
	config::{self, RawProviderConfig, normalize, validate},
	error::ConfigError,
	provider::{ProviderKind, lookup},
	record::NormalizedProviderRecord,
};

fn process(raw: &RawProviderConfig) -> NormalizedProviderRecord {
	config::process(raw).expect("Fixture configuration should process successfully.").record
}

fn to_json(record: &NormalizedProviderRecord) -> Value {
	serde_json::to_value(record).expect("Provider record should serialize to JSON.")
}

fn minimal_config(kind: ProviderKind) -> RawProviderConfig {
	lookup(kind)
		.mandatory_fields
		.iter()
		.fold(RawProviderConfig::new().with("provider", kind.as_str()), |raw, field| {
			let value = if field.ends_with("_url") { "https://idp.example.com" } else { "value" };

			raw.with(*field, value)
		})
}

#[test]
fn generic_record_matches_wire_contract() {
	let record = process(&generic_config());

	assert_eq!(
		to_json(&record),
		json!({
			"id": "generic_a5c446d0e7b2",
			"client_id": "cid",
			"provider": "generic",
			"label": "generic",
			"client_secret": "sec",
			"issuer_url": "http://example.com",
			"scope": ["profile", "email", "address", "phone"],
			"jsonnet_mapper": null,
			"mapper_url": null
		})
	);
}

#[test]
fn microsoft_tenant_is_renamed() {
	let json = to_json(&process(&microsoft_config()));

	assert_eq!(json["microsoft_tenant"], "tid");
	assert_eq!(json["id"], "microsoft_2b8ecd959b42");
	assert!(json.get("microsoft_tenant_id").is_none());
}

#[test]
fn apple_uses_signing_key_instead_of_secret() {
	let json = to_json(&process(&apple_config()));

	assert_eq!(json["team_id"], "t");
	assert_eq!(json["private_key_id"], "k");
	assert_eq!(json["private_key"], "p");
	assert!(json.get("client_secret").is_none());
	assert!(json.get("apple_team_id").is_none());
}

#[test]
fn every_kind_accepts_its_mandatory_set() {
	for kind in ProviderKind::ALL {
		let raw = minimal_config(kind);
		let validated = validate(&raw, kind)
			.unwrap_or_else(|e| panic!("{kind} should accept its mandatory fields: {e}"));
		let record = normalize(&validated).expect("Validated configuration should normalize.");
		let rule = lookup(kind);

		assert_eq!(record.provider, kind);
		assert_eq!(record.label, kind.display_name());
		assert_eq!(record.scope.as_slice(), rule.default_scope);

		let renamed_or_extra =
			rule.mandatory_fields.iter().filter(|f| !["client_id", "client_secret"].contains(*f));

		for field in renamed_or_extra {
			assert!(
				record.extra.contains_key(rule.output_name(field)),
				"{kind} record should carry `{}`.",
				rule.output_name(field)
			);
			assert!(
				rule.output_name(field) == *field || !record.extra.contains_key(*field),
				"{kind} record should not keep the pre-rename `{field}`."
			);
		}
	}
}

#[test]
fn omitting_any_mandatory_field_names_it() {
	for kind in ProviderKind::ALL {
		for field in &lookup(kind).mandatory_fields {
			let raw = minimal_config(kind).with(*field, "");
			let err = validate(&raw, kind).expect_err("Missing mandatory field must be rejected.");

			match err {
				ConfigError::MissingField { field: missing, kind: reported } => {
					assert_eq!(missing, *field);
					assert_eq!(reported, kind);
				},
				other => panic!("Unexpected error for {kind}/{field}: {other}"),
			}
		}
	}
}

#[test]
fn normalization_is_idempotent() {
	let raw = generic_config().with("jsonnet_mapper", "local claims = std.extVar('claims'); {}");
	let first = serde_json::to_string(&process(&raw)).expect("First record should serialize.");
	let second = serde_json::to_string(&process(&raw)).expect("Second record should serialize.");

	assert_eq!(first, second);
}

#[test]
fn inline_and_external_mappers_conflict() {
	let raw = generic_config()
		.with("jsonnet_mapper", "{}")
		.with("mapper_url", "https://example.com/mapper.jsonnet");

	assert!(matches!(config::process(&raw), Err(ConfigError::ConflictingMapper)));
}

#[test]
fn unknown_provider_always_blocks() {
	let err = config::process(&generic_config().with("provider", "go0gle"))
		.expect_err("Unknown providers must be rejected.");

	assert!(matches!(err, ConfigError::UnknownProvider { .. }));

	let raw = RawProviderConfig::new().with("client_id", "cid").with("provider", "");

	assert!(matches!(config::process(&raw), Err(ConfigError::UnknownProvider { value: None, .. })));
}

#[test]
fn ignored_options_are_reported() {
	let processed = config::process(&microsoft_config().with("issuer_url", "https://x"))
		.expect("Ignored options never block.");

	assert_eq!(processed.warnings.len(), 1);
	assert_eq!(processed.warnings[0].field(), "issuer_url");
	assert!(processed.record.extra_field("issuer_url").is_none());
}

#[test]
fn free_form_values_never_block() {
	let processed = config::process(
		&generic_config()
			.with("issuer_url", "accounts.example.com")
			.with("provider_id", "corp idp"),
	)
	.expect("Relative issuers and spaced identifiers should still publish.");
	let json = to_json(&processed.record);

	assert_eq!(json["id"], "corp idp");
	assert_eq!(json["issuer_url"], "accounts.example.com");
	assert_eq!(processed.warnings.len(), 1);
	assert_eq!(processed.warnings[0].field(), "issuer_url");
}
