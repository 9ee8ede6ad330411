//! Operator configuration intake: raw snapshot, validation, and normalization.
//!
//! The pipeline is `RawProviderConfig` → [`validate`] → [`normalize`] →
//! [`NormalizedProviderRecord`](crate::record::NormalizedProviderRecord). Both stages are
//! pure; the same snapshot always yields the same record, byte for byte.

pub mod backend;
pub mod normalize;
pub mod raw;
pub mod validate;

pub use backend::*;
pub use normalize::*;
pub use raw::*;
pub use validate::*;

// self
use crate::{
	_prelude::*, error::ConfigError, provider::ProviderKind, record::NormalizedProviderRecord,
};

/// Record produced from one configuration snapshot, plus its non-fatal diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessedConfig {
	/// Record ready to be published.
	pub record: NormalizedProviderRecord,
	/// Options that were supplied but ignored for the selected provider.
	pub warnings: Vec<ConfigWarning>,
}

/// Resolves the provider from the snapshot's `provider` option, then validates and normalizes.
pub fn process(raw: &RawProviderConfig) -> Result<ProcessedConfig, ConfigError> {
	let kind = ProviderKind::resolve(raw.get_str(crate::provider::field::PROVIDER))?;
	let validated = validate(raw, kind)?;
	let record = normalize(&validated)?;

	Ok(ProcessedConfig { record, warnings: validated.warnings })
}
