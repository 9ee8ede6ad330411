//! Ordered scope lists requested from external providers.

// std
use std::slice::Iter;
// crates.io
use serde::{Deserializer, Serializer, de::Error as DeError};
// self
use crate::_prelude::*;

/// A scope entry that cannot be forwarded to a provider.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ScopeValidationError {
	/// Entry at `position` is empty.
	#[error("Scope entry {position} is empty.")]
	Empty {
		/// Zero-based index of the entry.
		position: usize,
	},
	/// Entry embeds whitespace and would split on the wire.
	#[error("Scope '{scope}' contains whitespace.")]
	Whitespace {
		/// The offending entry.
		scope: String,
	},
}

/// Ordered, duplicate-free list of OAuth scopes.
///
/// Unlike a set, the list keeps the operator's order because the broker forwards scopes to the
/// provider as given; repeated entries keep their first position.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ScopeList(Vec<String>);
impl ScopeList {
	/// Creates a scope list from any iterator, dropping repeated entries.
	pub fn new<I, S>(scopes: I) -> Result<Self, ScopeValidationError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut list = Vec::new();

		for (position, scope) in scopes.into_iter().enumerate() {
			let owned: String = scope.into();

			if owned.is_empty() {
				return Err(ScopeValidationError::Empty { position });
			}
			if owned.chars().any(char::is_whitespace) {
				return Err(ScopeValidationError::Whitespace { scope: owned });
			}
			if !list.contains(&owned) {
				list.push(owned);
			}
		}

		Ok(Self(list))
	}

	/// Splits a space-delimited scope string, falling back to `default` when it holds no scopes.
	pub fn parse_or(value: Option<&str>, default: &[&str]) -> Self {
		let parsed = value.map(|s| s.split_whitespace().collect::<Vec<_>>()).unwrap_or_default();
		let source = if parsed.is_empty() { default } else { parsed.as_slice() };

		let mut list = Vec::<String>::with_capacity(source.len());

		// `split_whitespace` never yields empty or padded entries.
		for scope in source {
			if !list.iter().any(|existing| existing == scope) {
				list.push((*scope).to_owned());
			}
		}

		Self(list)
	}

	/// Number of scopes.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if no scopes are defined.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterator over scopes in request order.
	pub fn iter(&self) -> Iter<'_, String> {
		self.0.iter()
	}

	/// Returns the underlying slice of scope strings.
	pub fn as_slice(&self) -> &[String] {
		&self.0
	}
}
impl Debug for ScopeList {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ScopeList").field(&self.0).finish()
	}
}
impl Display for ScopeList {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0.join(" "))
	}
}
impl<'a> IntoIterator for &'a ScopeList {
	type IntoIter = Iter<'a, String>;
	type Item = &'a String;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}
impl FromStr for ScopeList {
	type Err = ScopeValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s.split_whitespace())
	}
}
impl Serialize for ScopeList {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_seq(&self.0)
	}
}
impl<'de> Deserialize<'de> for ScopeList {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let values = <Vec<String>>::deserialize(deserializer)?;

		ScopeList::new(values).map_err(DeError::custom)
	}
}
