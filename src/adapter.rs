//! Adapter orchestrator: turns operator input and channel contents into published state.
//!
//! Every event re-evaluates the adapter from its inputs (stored configuration, enabled flag,
//! channel contents, writer authority) instead of applying deltas, so repeated or
//! out-of-order delivery converges on the same result. Failures never escape an event
//! handler; they surface as [`AdapterState::Blocked`] with the error message attached.

// self
use crate::{
	_prelude::*,
	callback,
	channel::{self, Channel, ChannelSide, PublishOutcome, WriterAuthority},
	config::{self, ConfigWarning, RawProviderConfig},
	obs::{self, EventKind},
	record::NormalizedProviderRecord,
};

/// Why the adapter cannot make progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockedReason {
	/// The configuration snapshot failed validation or normalization.
	InvalidConfig(String),
	/// No channel to the identity broker exists.
	MissingChannel,
	/// The channel could not be read or written.
	Channel(String),
}
impl Display for BlockedReason {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			BlockedReason::InvalidConfig(message) => write!(f, "Invalid configuration: {message}"),
			BlockedReason::MissingChannel =>
				f.write_str("Waiting for relation with identity broker"),
			BlockedReason::Channel(message) => write!(f, "Channel error: {message}"),
		}
	}
}

/// Lifecycle state of the adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdapterState {
	/// No configuration has been received yet.
	Unconfigured,
	/// Waiting for corrected input or a channel.
	Blocked(BlockedReason),
	/// Record published; waiting for the broker's redirect URI.
	Pending,
	/// Record published and the redirect URI is known.
	Ready,
	/// The operator turned the provider off; nothing is published.
	Disabled,
}
impl AdapterState {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(&self) -> &'static str {
		match self {
			AdapterState::Unconfigured => "unconfigured",
			AdapterState::Blocked(_) => "blocked",
			AdapterState::Pending => "pending",
			AdapterState::Ready => "ready",
			AdapterState::Disabled => "disabled",
		}
	}
}
impl Display for AdapterState {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			AdapterState::Unconfigured => f.write_str("Waiting for configuration"),
			AdapterState::Blocked(reason) => Display::fmt(reason, f),
			AdapterState::Pending =>
				f.write_str("Waiting for identity broker to register provider"),
			AdapterState::Ready => f.write_str("Ready"),
			AdapterState::Disabled => f.write_str("Provider disabled"),
		}
	}
}

/// Process-local projection of the adapter's inputs, recomputed on every event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdapterObservableState {
	/// Current lifecycle state.
	pub state: AdapterState,
	/// Redirect URI assigned by the broker, when known and non-empty.
	pub redirect_uri: Option<String>,
	/// Message of the most recent configuration error, if the current snapshot is invalid.
	pub last_error: Option<String>,
	/// Whether the operator wants the provider published.
	pub enabled: bool,
	/// Options in the current snapshot that the selected provider ignores.
	pub warnings: Vec<ConfigWarning>,
	/// Record derived from the current snapshot, when it is valid.
	pub record: Option<NormalizedProviderRecord>,
	/// What this evaluation did to the local `providers` key, when a channel was touched.
	///
	/// Followers report [`PublishOutcome::Skipped`]; their `Pending`/`Ready` state mirrors the
	/// broker's view of the leader's publication.
	pub publish_outcome: Option<PublishOutcome>,
}
impl Default for AdapterObservableState {
	fn default() -> Self {
		Self {
			state: AdapterState::Unconfigured,
			redirect_uri: None,
			last_error: None,
			enabled: true,
			warnings: Vec::new(),
			record: None,
			publish_outcome: None,
		}
	}
}

/// Publishes one provider record into a broker channel and tracks the broker's answer.
///
/// Only the leader writes. Followers run the same evaluation so their observable state stays
/// meaningful after a leadership change.
#[derive(Debug)]
pub struct Adapter<C>
where
	C: Channel,
{
	channel: Option<C>,
	authority: WriterAuthority,
	config: Option<RawProviderConfig>,
	enabled: bool,
	observed: AdapterObservableState,
}
impl<C> Adapter<C>
where
	C: Channel,
{
	/// Creates an unconfigured adapter without a channel.
	pub fn new(authority: WriterAuthority) -> Self {
		Self {
			channel: None,
			authority,
			config: None,
			enabled: true,
			observed: AdapterObservableState::default(),
		}
	}

	/// Attaches a channel without reconciling; use [`Adapter::on_channel_joined`] at runtime.
	pub fn with_channel(mut self, channel: C) -> Self {
		self.channel = Some(channel);

		self
	}

	/// Latest observable state.
	pub fn observed(&self) -> &AdapterObservableState {
		&self.observed
	}

	/// Current lifecycle state.
	pub fn state(&self) -> &AdapterState {
		&self.observed.state
	}

	/// Attached channel, if any.
	pub fn channel(&self) -> Option<&C> {
		self.channel.as_ref()
	}

	/// Handles a new configuration snapshot.
	///
	/// The snapshot's `enabled` option (default `true`) resets the enabled flag, so
	/// [`Adapter::enable`] and [`Adapter::disable`] only hold until the next snapshot.
	pub fn on_config_changed(&mut self, raw: RawProviderConfig) -> &AdapterObservableState {
		self.enabled = raw.enabled().unwrap_or(true);

		self.config = Some(raw);
		self.reconcile(EventKind::ConfigChanged)
	}

	/// Handles a newly established channel to the broker.
	pub fn on_channel_joined(&mut self, channel: C) -> &AdapterObservableState {
		self.channel = Some(channel);
		self.reconcile(EventKind::ChannelJoined)
	}

	/// Handles a change on the broker's side of the channel.
	pub fn on_channel_changed(&mut self) -> &AdapterObservableState {
		self.reconcile(EventKind::ChannelChanged)
	}

	/// Handles the channel going away.
	pub fn on_channel_departed(&mut self) -> &AdapterObservableState {
		self.channel = None;
		self.reconcile(EventKind::ChannelDeparted)
	}

	/// Handles a leadership change for this replica.
	pub fn on_leader_changed(&mut self, authority: WriterAuthority) -> &AdapterObservableState {
		self.authority = authority;
		self.reconcile(EventKind::LeaderChanged)
	}

	/// Turns the provider on and republishes it.
	pub fn enable(&mut self) -> &AdapterObservableState {
		self.enabled = true;
		self.reconcile(EventKind::Enable)
	}

	/// Turns the provider off and removes the published record, even before any configuration
	/// has arrived.
	pub fn disable(&mut self) -> &AdapterObservableState {
		self.enabled = false;
		self.reconcile(EventKind::Disable)
	}

	/// One-shot query for the redirect URI assigned by the broker.
	pub fn get_redirect_uri(&self) -> Result<String> {
		if !self.authority.is_leader {
			return Err(Error::NotLeader);
		}

		self.observed.redirect_uri.clone().ok_or(Error::RedirectUriNotFound)
	}

	fn reconcile(&mut self, event: EventKind) -> &AdapterObservableState {
		let observed = obs::in_event_span(event, self.authority.is_leader, || self.evaluate());

		#[cfg(feature = "tracing")]
		match &observed.state {
			AdapterState::Blocked(reason) => tracing::warn!(%reason, "Adapter is blocked."),
			state => tracing::info!(state = state.as_str(), "Adapter reconciled."),
		}

		obs::record_event_outcome(event, observed.state.as_str());

		self.observed = observed;

		&self.observed
	}

	fn evaluate(&self) -> AdapterObservableState {
		let mut observed = AdapterObservableState { enabled: self.enabled, ..Default::default() };
		let processed = self.config.as_ref().map(config::process);

		match &processed {
			Some(Ok(processed)) => {
				observed.warnings = processed.warnings.clone();
				observed.record = Some(processed.record.clone());
			},
			Some(Err(e)) => observed.last_error = Some(e.to_string()),
			None => {},
		}

		// A stale record is cleared whether or not configuration has arrived.
		if !self.enabled {
			let cleared = self.channel.as_ref().map(|ch| channel::clear(ch, self.authority));

			match cleared.transpose() {
				Ok(outcome) => {
					observed.publish_outcome = outcome;
					observed.state = AdapterState::Disabled;
				},
				Err(e) =>
					observed.state = AdapterState::Blocked(BlockedReason::Channel(e.to_string())),
			}

			return observed;
		}

		let record = match processed {
			None => return observed,
			Some(Ok(processed)) => processed.record,
			Some(Err(e)) => {
				observed.state = AdapterState::Blocked(BlockedReason::InvalidConfig(e.to_string()));

				return observed;
			},
		};
		let Some(channel) = self.channel.as_ref() else {
			observed.state = AdapterState::Blocked(BlockedReason::MissingChannel);

			return observed;
		};

		match self.publish_and_observe(channel, record) {
			Ok((outcome, redirect_uri)) => {
				observed.publish_outcome = Some(outcome);
				observed.state = match redirect_uri {
					Some(_) => AdapterState::Ready,
					None => AdapterState::Pending,
				};
				observed.redirect_uri = redirect_uri;
			},
			Err(e) => observed.state = AdapterState::Blocked(BlockedReason::Channel(e.to_string())),
		}

		observed
	}

	fn publish_and_observe(
		&self,
		channel: &C,
		record: NormalizedProviderRecord,
	) -> Result<(PublishOutcome, Option<String>)> {
		let own_id = record.id.clone();
		let outcome = channel::publish(channel, self.authority, &[record])?;
		let remote = channel.read(ChannelSide::Remote)?;
		let redirect_uri = callback::extract_redirect_uri(&remote, &own_id)?;

		Ok((outcome, redirect_uri.filter(|uri| !uri.is_empty())))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::channel::{ChannelPayload, MemoryChannel, PROVIDERS_KEY};

	fn google() -> RawProviderConfig {
		RawProviderConfig::new()
			.with("provider", "google")
			.with("client_id", "cid")
			.with("client_secret", "sec")
	}

	fn local_providers(channel: &MemoryChannel) -> Option<String> {
		channel
			.read(ChannelSide::Local)
			.expect("Memory reads never fail.")
			.get(PROVIDERS_KEY)
			.map(str::to_owned)
	}

	#[test]
	fn starts_unconfigured() {
		let adapter = Adapter::<MemoryChannel>::new(WriterAuthority::leader());

		assert_eq!(adapter.state(), &AdapterState::Unconfigured);
		assert!(matches!(adapter.get_redirect_uri(), Err(Error::RedirectUriNotFound)));
	}

	#[test]
	fn missing_channel_blocks_valid_config() {
		let mut adapter = Adapter::<MemoryChannel>::new(WriterAuthority::leader());
		let observed = adapter.on_config_changed(google());

		assert_eq!(observed.state, AdapterState::Blocked(BlockedReason::MissingChannel));
		assert!(observed.record.is_some());
		assert_eq!(observed.state.to_string(), "Waiting for relation with identity broker");
	}

	#[test]
	fn invalid_config_blocks_with_message_and_publishes_nothing() {
		let channel = MemoryChannel::default();
		let mut adapter = Adapter::new(WriterAuthority::leader()).with_channel(channel.clone());
		let observed = adapter.on_config_changed(google().with("provider", "go0gle"));

		assert!(matches!(observed.state, AdapterState::Blocked(BlockedReason::InvalidConfig(_))));
		assert!(observed.state.to_string().starts_with(
			"Invalid configuration: Required configuration 'provider' MUST be one of the following:"
		));
		assert!(observed.last_error.is_some());
		assert_eq!(local_providers(&channel), None);
	}

	#[test]
	fn publish_then_ready_on_matching_redirect() {
		let channel = MemoryChannel::default();
		let mut adapter = Adapter::new(WriterAuthority::leader()).with_channel(channel.clone());

		assert_eq!(adapter.on_config_changed(google()).state, AdapterState::Pending);
		assert!(local_providers(&channel).is_some());

		let id = adapter.observed().record.as_ref().map(|r| r.id.to_string()).unwrap_or_default();
		let payload = callback::encode_registered(&[callback::RegisteredProvider::new(
			"https://broker/self-service/methods/oidc/callback/x",
			id,
		)])
		.expect("Registration should encode.");

		channel.set_remote(payload);

		assert_eq!(adapter.on_channel_changed().state, AdapterState::Ready);
		assert_eq!(
			adapter.get_redirect_uri().expect("Leader should see the redirect URI."),
			"https://broker/self-service/methods/oidc/callback/x"
		);
	}

	#[test]
	fn malformed_peer_payload_blocks() {
		let channel = MemoryChannel::default();
		let mut adapter = Adapter::new(WriterAuthority::leader()).with_channel(channel.clone());

		channel.set_remote(ChannelPayload::with_providers("not json"));

		assert!(matches!(
			adapter.on_config_changed(google()).state,
			AdapterState::Blocked(BlockedReason::Channel(_))
		));
	}

	#[test]
	fn disable_removes_key_and_enable_republishes() {
		let channel = MemoryChannel::default();
		let mut adapter = Adapter::new(WriterAuthority::leader()).with_channel(channel.clone());

		adapter.on_config_changed(google());

		let published = local_providers(&channel);

		assert_eq!(adapter.disable().state, AdapterState::Disabled);
		assert_eq!(local_providers(&channel), None);
		assert_eq!(adapter.enable().state, AdapterState::Pending);
		assert_eq!(local_providers(&channel), published);
	}

	#[test]
	fn config_enabled_false_disables_even_when_invalid() {
		let channel = MemoryChannel::default();
		let mut adapter = Adapter::new(WriterAuthority::leader()).with_channel(channel.clone());

		adapter.on_config_changed(google());

		let observed =
			adapter.on_config_changed(google().with("client_secret", "").with("enabled", false));

		assert_eq!(observed.state, AdapterState::Disabled);
		assert!(observed.last_error.is_some());
		assert!(!observed.enabled);
		assert_eq!(local_providers(&channel), None);
	}

	#[test]
	fn follower_never_writes_and_cannot_query() {
		let channel = MemoryChannel::default();
		let mut adapter = Adapter::new(WriterAuthority::follower()).with_channel(channel.clone());

		let observed = adapter.on_config_changed(google());

		assert_eq!(observed.state, AdapterState::Pending);
		assert_eq!(observed.publish_outcome, Some(PublishOutcome::Skipped));
		assert_eq!(local_providers(&channel), None);
		assert!(matches!(adapter.get_redirect_uri(), Err(Error::NotLeader)));

		let observed = adapter.on_leader_changed(WriterAuthority::leader());

		assert_eq!(observed.publish_outcome, Some(PublishOutcome::Published));
		assert!(local_providers(&channel).is_some());
	}

	#[test]
	fn dropping_the_enabled_option_re_enables() {
		let channel = MemoryChannel::default();
		let mut adapter = Adapter::new(WriterAuthority::leader()).with_channel(channel.clone());

		assert_eq!(
			adapter.on_config_changed(google().with("enabled", false)).state,
			AdapterState::Disabled
		);

		let observed = adapter.on_config_changed(google());

		assert_eq!(observed.state, AdapterState::Pending);
		assert!(observed.enabled);
		assert!(local_providers(&channel).is_some());
	}

	#[test]
	fn disable_command_holds_until_the_next_snapshot() {
		let channel = MemoryChannel::default();
		let mut adapter = Adapter::new(WriterAuthority::leader()).with_channel(channel.clone());

		adapter.on_config_changed(google());

		assert_eq!(adapter.disable().state, AdapterState::Disabled);
		assert_eq!(adapter.on_channel_changed().state, AdapterState::Disabled);
		assert_eq!(local_providers(&channel), None);
		assert_eq!(adapter.on_config_changed(google()).state, AdapterState::Pending);
	}

	#[test]
	fn disable_before_configuration_clears_a_stale_record() {
		let channel = MemoryChannel::default();

		channel
			.write(PROVIDERS_KEY, r#"[{"provider":"google"}]"#.into())
			.expect("Memory writes never fail.");

		let mut adapter = Adapter::new(WriterAuthority::leader()).with_channel(channel.clone());
		let observed = adapter.disable();

		assert_eq!(observed.state, AdapterState::Disabled);
		assert_eq!(observed.publish_outcome, Some(PublishOutcome::Cleared));
		assert_eq!(local_providers(&channel), None);
	}

	#[test]
	fn channel_departure_forgets_redirect() {
		let channel = MemoryChannel::default();
		let mut adapter = Adapter::new(WriterAuthority::leader()).with_channel(channel.clone());

		let registered =
			ChannelPayload::with_providers(r#"[{"redirect_uri":"https://broker/cb"}]"#);

		channel.set_remote(registered);

		assert_eq!(adapter.on_config_changed(google()).state, AdapterState::Ready);

		let observed = adapter.on_channel_departed();

		assert_eq!(observed.state, AdapterState::Blocked(BlockedReason::MissingChannel));
		assert_eq!(observed.redirect_uri, None);
	}
}
