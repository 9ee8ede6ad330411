//! Broker → integrator direction: registered providers and their redirect URIs.

// self
use crate::{
	_prelude::*,
	auth::ProviderRecordId,
	channel::{ChannelPayload, decode_list, encode_list},
	error::ChannelError,
};

/// One registration acknowledged by the identity broker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredProvider {
	/// Callback URL the operator must configure at the external provider. Empty while the
	/// broker has registered the record but not assigned a URI yet.
	pub redirect_uri: String,
	/// Record the registration belongs to; absent in single-record payloads.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub provider_id: Option<String>,
}
impl RegisteredProvider {
	/// Registration for a specific record.
	pub fn new(redirect_uri: impl Into<String>, provider_id: impl Into<String>) -> Self {
		Self { redirect_uri: redirect_uri.into(), provider_id: Some(provider_id.into()) }
	}
}

/// Encodes registrations for the broker's side of the channel.
pub fn encode_registered(entries: &[RegisteredProvider]) -> Result<ChannelPayload, ChannelError> {
	encode_list(entries)
}

/// Decodes the broker's registrations; an absent key yields an empty list.
pub fn decode_registered(
	payload: &ChannelPayload,
) -> Result<Vec<RegisteredProvider>, ChannelError> {
	decode_list(payload)
}

/// Finds the redirect URI the broker assigned to `own_record_id`.
///
/// An entry whose `provider_id` matches wins; otherwise a payload holding a single entry
/// without any `provider_id` is taken as ours. No match yields `None`, which is the normal
/// state until the broker finishes registration.
pub fn extract_redirect_uri(
	peer_payload: &ChannelPayload,
	own_record_id: &ProviderRecordId,
) -> Result<Option<String>, ChannelError> {
	let entries = decode_registered(peer_payload)?;
	let matched = entries
		.iter()
		.find(|entry| entry.provider_id.as_deref() == Some(own_record_id.as_ref()))
		.or_else(|| match entries.as_slice() {
			[sole] if sole.provider_id.is_none() => Some(sole),
			_ => None,
		});

	Ok(matched.map(|entry| entry.redirect_uri.clone()))
}
