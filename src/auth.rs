//! Identifier, secret, and scope primitives used by provider records.

pub mod id;
pub mod scope;
pub mod secret;

pub use id::*;
pub use scope::*;
pub use secret::*;
