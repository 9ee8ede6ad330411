// self
use crate::obs::EventKind;

/// Runs `f` inside an `idp_integrator.event` span tagged with the event and writer role.
///
/// Without the `tracing` feature this simply calls `f`.
pub fn in_event_span<T>(kind: EventKind, is_leader: bool, f: impl FnOnce() -> T) -> T {
	#[cfg(feature = "tracing")]
	{
		tracing::info_span!("idp_integrator.event", event = kind.as_str(), leader = is_leader)
			.in_scope(f)
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, is_leader);

		f()
	}
}
