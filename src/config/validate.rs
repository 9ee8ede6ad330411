//! Rule-driven validation of a raw configuration snapshot.

// self
use crate::{
	_prelude::*,
	config::{RawProviderConfig, SecretBackend},
	error::ConfigError,
	provider::{ADAPTER_FIELDS, ProviderKind, ProviderRule, field, lookup},
};

/// Options expected to hold absolute URLs.
const URL_FIELDS: [&str; 2] = [field::ISSUER_URL, field::MAPPER_URL];

/// Non-fatal diagnostic attached to a validated snapshot; warnings never block publication.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigWarning {
	/// Option the selected provider does not use; it is left out of the record.
	Ignored {
		/// Option name as supplied.
		field: String,
		/// Provider the snapshot was validated against.
		kind: ProviderKind,
	},
	/// URL-valued option that does not parse as an absolute URL; it is still published as given.
	UnparsableUrl {
		/// Option holding the value.
		field: &'static str,
		/// Value as supplied.
		value: String,
	},
}
impl ConfigWarning {
	/// Option the warning is about.
	pub fn field(&self) -> &str {
		match self {
			ConfigWarning::Ignored { field, .. } => field.as_str(),
			ConfigWarning::UnparsableUrl { field, .. } => field,
		}
	}
}
impl Display for ConfigWarning {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			ConfigWarning::Ignored { field, kind } =>
				write!(f, "Invalid config '{field}' for provider '{kind}' will be ignored"),
			ConfigWarning::UnparsableUrl { field, value } =>
				write!(f, "Config '{field}' is not an absolute URL; passing it on as is: {value}"),
		}
	}
}

/// Snapshot restricted to the options the selected provider accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedConfig {
	/// Provider the snapshot was validated against.
	pub kind: ProviderKind,
	/// Secret transport selected by the operator.
	pub secret_backend: SecretBackend,
	/// Diagnostics for options that were ignored or look malformed.
	pub warnings: Vec<ConfigWarning>,
	fields: BTreeMap<&'static str, String>,
}
impl ValidatedConfig {
	/// Rule the snapshot was validated against.
	pub fn rule(&self) -> &'static ProviderRule {
		lookup(self.kind)
	}

	/// Value of an accepted option.
	pub fn get(&self, option: &str) -> Option<&str> {
		self.fields.get(option).map(String::as_str)
	}

	/// Iterator over accepted options in name order.
	pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
		self.fields.iter().map(|(option, value)| (*option, value.as_str()))
	}
}

/// Validates `raw` against the rule for `kind`.
///
/// Fails on the first missing mandatory option (in option-name order) so the operator sees a
/// stable message. Options the rule does not know and URL options that do not parse are
/// collected as [`ConfigWarning`]s and never block validation.
pub fn validate(
	raw: &RawProviderConfig,
	kind: ProviderKind,
) -> Result<ValidatedConfig, ConfigError> {
	let rule = lookup(kind);

	if let Some(missing) = rule.mandatory_fields.iter().find(|option| !raw.is_set(option)) {
		return Err(ConfigError::MissingField { field: *missing, kind });
	}

	let secret_backend = SecretBackend::parse(raw.get_str(field::SECRET_BACKEND))?;

	secret_backend.ensure_supported()?;

	let fields = rule
		.mandatory_fields
		.iter()
		.chain(rule.optional_fields.iter())
		.filter_map(|option| {
			let text = raw.get(option)?.as_text()?;

			Some((*option, text.into_owned()))
		})
		.collect::<BTreeMap<_, _>>();

	let ignored = raw
		.set_keys()
		.filter(|key| !rule.accepts(key) && !ADAPTER_FIELDS.contains(key))
		.map(|key| ConfigWarning::Ignored { field: key.to_owned(), kind });
	let unparsable = URL_FIELDS.into_iter().filter_map(|option| {
		let value = fields.get(option)?;

		Url::parse(value)
			.is_err()
			.then(|| ConfigWarning::UnparsableUrl { field: option, value: value.clone() })
	});
	let warnings = ignored.chain(unparsable).collect::<Vec<_>>();

	#[cfg(feature = "tracing")]
	for warning in &warnings {
		tracing::warn!(field = warning.field(), provider = %kind, "{warning}");
	}

	Ok(ValidatedConfig { kind, secret_backend, warnings, fields })
}
