//! Raw operator configuration snapshot.

// std
use std::borrow::Cow;
// self
use crate::{_prelude::*, auth::REDACTED, error::ConfigError, provider::field};

/// A single operator option value.
///
/// Empty strings, `null`, and `false` all count as "not set".
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
	/// Explicit `null`.
	Null,
	/// Boolean option.
	Bool(bool),
	/// String option.
	Str(String),
}
impl ConfigValue {
	/// Returns true unless the value is empty, `null`, or `false`.
	pub fn is_set(&self) -> bool {
		match self {
			ConfigValue::Null => false,
			ConfigValue::Bool(value) => *value,
			ConfigValue::Str(value) => !value.is_empty(),
		}
	}

	/// Textual view of a set value.
	pub fn as_text(&self) -> Option<Cow<'_, str>> {
		match self {
			ConfigValue::Str(value) if !value.is_empty() => Some(Cow::Borrowed(value)),
			ConfigValue::Bool(true) => Some(Cow::Borrowed("true")),
			_ => None,
		}
	}

	/// Boolean view of the value; strings `"true"`/`"false"` are accepted.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			ConfigValue::Bool(value) => Some(*value),
			ConfigValue::Str(value) => value.parse().ok(),
			ConfigValue::Null => None,
		}
	}
}
impl Debug for ConfigValue {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			ConfigValue::Null => f.write_str("Null"),
			ConfigValue::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
			// Option values may hold secrets.
			ConfigValue::Str(_) => f.debug_tuple("Str").field(&REDACTED).finish(),
		}
	}
}
impl From<&str> for ConfigValue {
	fn from(value: &str) -> Self {
		Self::Str(value.to_owned())
	}
}
impl From<String> for ConfigValue {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}
impl From<bool> for ConfigValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

/// Operator-supplied configuration snapshot.
///
/// Every option is optional at the type level; which ones are mandatory depends on the
/// selected provider's rule. A snapshot is never mutated once handed to the adapter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawProviderConfig(BTreeMap<String, ConfigValue>);
impl RawProviderConfig {
	/// Creates an empty snapshot.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a JSON object of options.
	pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
		let mut de = serde_json::Deserializer::from_str(json);

		serde_path_to_error::deserialize(&mut de).map_err(|source| ConfigError::Parse { source })
	}

	/// Sets an option and returns the snapshot.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
		self.0.insert(key.into(), value.into());

		self
	}

	/// Raw value of an option.
	pub fn get(&self, key: &str) -> Option<&ConfigValue> {
		self.0.get(key)
	}

	/// Set string value of an option.
	pub fn get_str(&self, key: &str) -> Option<&str> {
		match self.0.get(key) {
			Some(ConfigValue::Str(value)) if !value.is_empty() => Some(value),
			_ => None,
		}
	}

	/// Returns true if the option holds a set value.
	pub fn is_set(&self, key: &str) -> bool {
		self.0.get(key).is_some_and(ConfigValue::is_set)
	}

	/// The `enabled` option, when the operator supplied one.
	pub fn enabled(&self) -> Option<bool> {
		self.0.get(field::ENABLED).and_then(ConfigValue::as_bool)
	}

	/// Iterator over option names that hold set values.
	pub fn set_keys(&self) -> impl Iterator<Item = &str> {
		self.0.iter().filter(|(_, value)| value.is_set()).map(|(key, _)| key.as_str())
	}
}
impl<K, V> FromIterator<(K, V)> for RawProviderConfig
where
	K: Into<String>,
	V: Into<ConfigValue>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		Self(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}
}
