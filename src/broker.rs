//! Broker-side endpoint of the channel.
//!
//! The identity broker reads the records the integrator published and answers with the
//! redirect URI it registered for each of them. Keeping both halves in one crate lets the
//! wire contract be exercised end to end.

// self
use crate::{
	_prelude::*,
	callback::{RegisteredProvider, encode_registered},
	channel::{
		Channel, ChannelSide, PublishOutcome, WriterAuthority, clear, decode, publish_payload,
	},
	record::NormalizedProviderRecord,
};

/// The broker's view of one channel.
#[derive(Clone, Debug)]
pub struct BrokerEndpoint<C>
where
	C: Channel,
{
	/// Channel as seen from the broker's side.
	pub channel: C,
	/// Whether this broker replica may write.
	pub authority: WriterAuthority,
}
impl<C> BrokerEndpoint<C>
where
	C: Channel,
{
	/// Wraps a channel seen from the broker's side.
	pub fn new(channel: C, authority: WriterAuthority) -> Self {
		Self { channel, authority }
	}

	/// Records the integrator currently publishes; empty when nothing is published.
	pub fn providers(&self) -> Result<Vec<NormalizedProviderRecord>> {
		let remote = self.channel.read(ChannelSide::Remote)?;

		Ok(decode(&remote)?)
	}

	/// Publishes the redirect URI registered for `provider_id`.
	pub fn set_registered_provider(
		&self,
		redirect_uri: impl Into<String>,
		provider_id: impl Into<String>,
	) -> Result<PublishOutcome> {
		let payload = encode_registered(&[RegisteredProvider::new(redirect_uri, provider_id)])?;

		Ok(publish_payload(&self.channel, self.authority, &payload)?)
	}

	/// Withdraws every registration.
	pub fn remove_registered_provider(&self) -> Result<PublishOutcome> {
		Ok(clear(&self.channel, self.authority)?)
	}
}
