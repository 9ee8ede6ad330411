//! Provider catalogue (data) shared by validation and normalization.
//!
//! `kind` enumerates the closed set of supported identity providers, while `rule` maps each
//! of them to the options it requires, the options it forwards, and the output renames applied
//! when the record is published.

pub mod kind;
pub mod rule;

pub use kind::*;
pub use rule::{ADAPTER_FIELDS, ProviderRule, field, lookup, rules};
