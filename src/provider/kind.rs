//! Closed set of external identity providers the broker knows how to register.

// self
use crate::{_prelude::*, error::ConfigError};

/// External identity provider family selected by the operator's `provider` option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
	/// Any OIDC-compliant issuer discovered through `issuer_url`.
	Generic,
	/// Auth0 tenant (OIDC, discovered through `issuer_url`).
	Auth0,
	/// Google.
	Google,
	/// Facebook.
	Facebook,
	/// GitHub (OAuth2 only).
	Github,
	/// GitLab.
	Gitlab,
	/// Slack.
	Slack,
	/// Spotify.
	Spotify,
	/// Discord.
	Discord,
	/// Twitch.
	Twitch,
	/// NetID.
	Netid,
	/// Yandex.
	Yandex,
	/// VK.
	Vk,
	/// DingTalk.
	Dingtalk,
	/// Microsoft Entra ID; requires a tenant.
	Microsoft,
	/// Sign in with Apple; authenticates with a signing key instead of a client secret.
	Apple,
}
impl ProviderKind {
	/// Every supported provider, in the order they are listed to operators.
	pub const ALL: [ProviderKind; 16] = [
		ProviderKind::Generic,
		ProviderKind::Auth0,
		ProviderKind::Google,
		ProviderKind::Facebook,
		ProviderKind::Github,
		ProviderKind::Gitlab,
		ProviderKind::Slack,
		ProviderKind::Spotify,
		ProviderKind::Discord,
		ProviderKind::Twitch,
		ProviderKind::Netid,
		ProviderKind::Yandex,
		ProviderKind::Vk,
		ProviderKind::Dingtalk,
		ProviderKind::Microsoft,
		ProviderKind::Apple,
	];

	/// Returns the wire identifier for the provider.
	pub const fn as_str(self) -> &'static str {
		match self {
			ProviderKind::Generic => "generic",
			ProviderKind::Auth0 => "auth0",
			ProviderKind::Google => "google",
			ProviderKind::Facebook => "facebook",
			ProviderKind::Github => "github",
			ProviderKind::Gitlab => "gitlab",
			ProviderKind::Slack => "slack",
			ProviderKind::Spotify => "spotify",
			ProviderKind::Discord => "discord",
			ProviderKind::Twitch => "twitch",
			ProviderKind::Netid => "netid",
			ProviderKind::Yandex => "yandex",
			ProviderKind::Vk => "vk",
			ProviderKind::Dingtalk => "dingtalk",
			ProviderKind::Microsoft => "microsoft",
			ProviderKind::Apple => "apple",
		}
	}

	/// Label shown to end users when the operator does not override it.
	pub const fn display_name(self) -> &'static str {
		self.as_str()
	}

	/// Comma-separated list of every supported provider identifier.
	pub fn allowed() -> String {
		Self::ALL.iter().map(|kind| kind.as_str()).collect::<Vec<_>>().join(", ")
	}

	/// Resolves the operator's `provider` option, treating absence as an unknown provider.
	pub fn resolve(value: Option<&str>) -> Result<Self, ConfigError> {
		value.map(Self::from_str).unwrap_or_else(|| {
			Err(ConfigError::UnknownProvider { value: None, allowed: Self::allowed() })
		})
	}
}
impl Display for ProviderKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for ProviderKind {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL.into_iter().find(|kind| kind.as_str() == s).ok_or_else(|| {
			ConfigError::UnknownProvider { value: Some(s.to_owned()), allowed: Self::allowed() }
		})
	}
}
