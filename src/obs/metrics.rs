// self
use crate::obs::EventKind;

/// Records the state an event left the adapter in via the global metrics recorder (when
/// enabled).
pub fn record_event_outcome(kind: EventKind, outcome: &'static str) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"idp_integrator_event_total",
			"event" => kind.as_str(),
			"outcome" => outcome
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}
