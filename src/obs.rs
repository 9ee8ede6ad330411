//! Optional observability helpers for adapter events.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `idp_integrator.event` with the `event`
//!   (trigger) and `leader` (writer role) fields.
//! - Enable `metrics` to increment the `idp_integrator_event_total` counter once per handled
//!   event, labeled by `event` + `outcome` (the resulting adapter state).

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Triggers the adapter reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
	/// Operator configuration changed.
	ConfigChanged,
	/// A channel to the broker was established.
	ChannelJoined,
	/// The broker's side of the channel changed.
	ChannelChanged,
	/// The channel to the broker went away.
	ChannelDeparted,
	/// Leadership moved to or away from this replica.
	LeaderChanged,
	/// Operator enabled the provider.
	Enable,
	/// Operator disabled the provider.
	Disable,
}
impl EventKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			EventKind::ConfigChanged => "config_changed",
			EventKind::ChannelJoined => "channel_joined",
			EventKind::ChannelChanged => "channel_changed",
			EventKind::ChannelDeparted => "channel_departed",
			EventKind::LeaderChanged => "leader_changed",
			EventKind::Enable => "enable",
			EventKind::Disable => "disable",
		}
	}
}
impl Display for EventKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
