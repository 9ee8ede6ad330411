//! Shared key/value channel between the integrator and the identity broker.
//!
//! Each side of a channel owns one string-to-string databag that only it may write, and both
//! sides may read. The integrator publishes its records under [`PROVIDERS_KEY`] on its own
//! side and reads the broker's registrations from the remote side. Writes are whole-value
//! replacements and only the leader replica performs them.

pub mod codec;
pub mod memory;

pub use codec::*;
pub use memory::MemoryChannel;

// self
use crate::{_prelude::*, error::ChannelError, record::NormalizedProviderRecord};

/// Key holding the JSON-encoded list exchanged in both directions.
pub const PROVIDERS_KEY: &str = "providers";

/// Which databag of a channel is being addressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelSide {
	/// The databag this component owns and writes.
	Local,
	/// The peer's databag; read-only from here.
	Remote,
}

/// Contract implemented by channel backends supplied by the hosting control plane.
pub trait Channel
where
	Self: Send + Sync,
{
	/// Reads the full databag for one side.
	fn read(&self, side: ChannelSide) -> Result<ChannelPayload, ChannelError>;

	/// Sets a key on the local databag, replacing any previous value.
	fn write(&self, key: &str, value: String) -> Result<(), ChannelError>;

	/// Removes a key from the local databag; removing an absent key is not an error.
	fn remove(&self, key: &str) -> Result<(), ChannelError>;
}

/// Contents of one databag.
///
/// An absent (or empty) [`PROVIDERS_KEY`] means nothing is published.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelPayload(BTreeMap<String, String>);
impl ChannelPayload {
	/// Creates an empty payload.
	pub fn new() -> Self {
		Self::default()
	}

	/// Payload holding only a `providers` value.
	pub fn with_providers(value: impl Into<String>) -> Self {
		Self(BTreeMap::from([(PROVIDERS_KEY.to_owned(), value.into())]))
	}

	/// Value under `key`, if any.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}

	/// The `providers` value, treating an empty string as absent.
	pub fn providers(&self) -> Option<&str> {
		self.get(PROVIDERS_KEY).filter(|value| !value.is_empty())
	}

	/// Returns true if no keys are set.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterator over key/value pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
	}
}
impl From<BTreeMap<String, String>> for ChannelPayload {
	fn from(value: BTreeMap<String, String>) -> Self {
		Self(value)
	}
}

/// Write capability on the shared channel.
///
/// Passed explicitly so the single-writer rule is testable without a control-plane runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriterAuthority {
	/// Whether this replica is the leader.
	pub is_leader: bool,
}
impl WriterAuthority {
	/// Authority held by the leader replica.
	pub const fn leader() -> Self {
		Self { is_leader: true }
	}

	/// Authority held by any other replica.
	pub const fn follower() -> Self {
		Self { is_leader: false }
	}
}

/// What a publish call did to the local databag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PublishOutcome {
	/// The `providers` key was written.
	Published,
	/// The `providers` key was removed.
	Cleared,
	/// Nothing was written because this replica is not the leader.
	Skipped,
}
impl PublishOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			PublishOutcome::Published => "published",
			PublishOutcome::Cleared => "cleared",
			PublishOutcome::Skipped => "skipped",
		}
	}
}

/// Replaces the local `providers` value with `payload`'s, removing the key when it is absent.
///
/// Non-leader callers get [`PublishOutcome::Skipped`]; that is not an error.
pub fn publish_payload<C>(
	channel: &C,
	authority: WriterAuthority,
	payload: &ChannelPayload,
) -> Result<PublishOutcome, ChannelError>
where
	C: ?Sized + Channel,
{
	if !authority.is_leader {
		#[cfg(feature = "tracing")]
		tracing::debug!("Skipping channel write on a non-leader replica.");

		return Ok(PublishOutcome::Skipped);
	}

	match payload.providers() {
		Some(value) => {
			channel.write(PROVIDERS_KEY, value.to_owned())?;

			Ok(PublishOutcome::Published)
		},
		None => {
			channel.remove(PROVIDERS_KEY)?;

			Ok(PublishOutcome::Cleared)
		},
	}
}

/// Encodes `records` and publishes them; an empty list removes the key.
pub fn publish<C>(
	channel: &C,
	authority: WriterAuthority,
	records: &[NormalizedProviderRecord],
) -> Result<PublishOutcome, ChannelError>
where
	C: ?Sized + Channel,
{
	let payload = encode(records)?;
	let outcome = publish_payload(channel, authority, &payload)?;

	#[cfg(feature = "tracing")]
	tracing::info!(
		records = records.len(),
		outcome = outcome.as_str(),
		"Published provider records."
	);

	Ok(outcome)
}

/// Removes the published records entirely.
pub fn clear<C>(channel: &C, authority: WriterAuthority) -> Result<PublishOutcome, ChannelError>
where
	C: ?Sized + Channel,
{
	publish_payload(channel, authority, &ChannelPayload::new())
}
