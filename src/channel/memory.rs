//! In-process [`Channel`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	channel::{Channel, ChannelPayload, ChannelSide},
	error::ChannelError,
};

type Databags = Arc<RwLock<[BTreeMap<String, String>; 2]>>;

/// Channel whose two databags live in memory.
///
/// Clones share storage. [`MemoryChannel::peer`] returns the same channel seen from the other
/// side, so one test can drive both the integrator and the broker.
#[derive(Clone, Debug, Default)]
pub struct MemoryChannel {
	bags: Databags,
	swapped: bool,
}
impl MemoryChannel {
	/// The same channel, seen from the peer's side.
	pub fn peer(&self) -> Self {
		Self { bags: self.bags.clone(), swapped: !self.swapped }
	}

	/// Replaces the whole remote databag, as the peer would.
	pub fn set_remote(&self, payload: ChannelPayload) {
		let index = self.index(ChannelSide::Remote);

		self.bags.write()[index] =
			payload.iter().map(|(k, v)| (k.to_owned(), v.to_owned())).collect();
	}

	fn index(&self, side: ChannelSide) -> usize {
		match (side, self.swapped) {
			(ChannelSide::Local, false) | (ChannelSide::Remote, true) => 0,
			(ChannelSide::Remote, false) | (ChannelSide::Local, true) => 1,
		}
	}
}
impl Channel for MemoryChannel {
	fn read(&self, side: ChannelSide) -> Result<ChannelPayload, ChannelError> {
		Ok(ChannelPayload::from(self.bags.read()[self.index(side)].clone()))
	}

	fn write(&self, key: &str, value: String) -> Result<(), ChannelError> {
		let index = self.index(ChannelSide::Local);

		self.bags.write()[index].insert(key.to_owned(), value);

		Ok(())
	}

	fn remove(&self, key: &str) -> Result<(), ChannelError> {
		let index = self.index(ChannelSide::Local);

		self.bags.write()[index].remove(key);

		Ok(())
	}
}
