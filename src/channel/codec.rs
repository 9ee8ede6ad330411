//! Wire codec for the `providers` value.
//!
//! Records travel as one JSON array string under [`PROVIDERS_KEY`]. Zero records are encoded
//! by omitting the key, never as `"[]"`.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	channel::{ChannelPayload, PROVIDERS_KEY},
	error::ChannelError,
	record::NormalizedProviderRecord,
};

/// Encodes provider records into a payload; an empty slice yields an empty payload.
pub fn encode(records: &[NormalizedProviderRecord]) -> Result<ChannelPayload, ChannelError> {
	encode_list(records)
}

/// Decodes provider records; an absent key yields an empty list.
pub fn decode(payload: &ChannelPayload) -> Result<Vec<NormalizedProviderRecord>, ChannelError> {
	decode_list(payload)
}

/// Encodes any list under [`PROVIDERS_KEY`], omitting the key for an empty list.
pub fn encode_list<T>(items: &[T]) -> Result<ChannelPayload, ChannelError>
where
	T: Serialize,
{
	if items.is_empty() {
		return Ok(ChannelPayload::new());
	}

	let json = serde_json::to_string(items).map_err(ChannelError::Encode)?;

	Ok(ChannelPayload::with_providers(json))
}

/// Decodes the list under [`PROVIDERS_KEY`], reporting the JSON path of any malformed element.
pub fn decode_list<T>(payload: &ChannelPayload) -> Result<Vec<T>, ChannelError>
where
	T: DeserializeOwned,
{
	let Some(json) = payload.providers() else {
		return Ok(Vec::new());
	};
	let mut de = serde_json::Deserializer::from_str(json);

	serde_path_to_error::deserialize(&mut de)
		.map_err(|source| ChannelError::MalformedPayload { key: PROVIDERS_KEY, source })
}
