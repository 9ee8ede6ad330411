//! Validate external identity-provider client configuration and hand it to an identity broker
//! over a shared key/value channel, then surface the redirect URI the broker assigns.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod adapter;
pub mod auth;
pub mod broker;
pub mod callback;
pub mod channel;
pub mod config;
pub mod error;
pub mod obs;
pub mod provider;
pub mod record;
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and fixtures for integration tests.

	pub use crate::_prelude::*;

	// self
	use crate::{
		channel::{ChannelPayload, MemoryChannel},
		config::RawProviderConfig,
	};

	/// `generic` provider configuration used across tests.
	pub fn generic_config() -> RawProviderConfig {
		RawProviderConfig::new()
			.with("provider", "generic")
			.with("client_id", "cid")
			.with("client_secret", "sec")
			.with("issuer_url", "http://example.com")
	}

	/// `microsoft` provider configuration used across tests.
	pub fn microsoft_config() -> RawProviderConfig {
		RawProviderConfig::new()
			.with("provider", "microsoft")
			.with("client_id", "cid")
			.with("client_secret", "sec")
			.with("microsoft_tenant_id", "tid")
	}

	/// `apple` provider configuration used across tests.
	pub fn apple_config() -> RawProviderConfig {
		RawProviderConfig::new()
			.with("provider", "apple")
			.with("client_id", "cid")
			.with("apple_team_id", "t")
			.with("apple_private_key_id", "k")
			.with("apple_private_key", "p")
	}

	/// Channel whose broker side already holds `payload`.
	pub fn channel_with_remote(payload: ChannelPayload) -> MemoryChannel {
		let channel = MemoryChannel::default();

		channel.set_remote(payload);

		channel
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use url;
#[cfg(test)] use color_eyre as _;
