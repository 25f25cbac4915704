use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::MdrefError;
use crate::MdrefResult;
use crate::entities::Channel;
use crate::entities::RealmEmoji;
use crate::entities::User;
use crate::entities::UserGroup;
use crate::entities::UserId;
use crate::memory::Realm;
use crate::narrow::ChannelDefaultView;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["mdref.toml", ".mdref.toml", ".config/mdref.toml"];

/// A realm described in an `mdref.toml` file.
///
/// ```toml
/// my_user_id = 1
///
/// [settings]
/// translate_emoticons = true
/// web_channel_default_view = "channel_feed"
///
/// [[users]]
/// user_id = 1
/// full_name = "Iago"
///
/// [[groups]]
/// id = 10
/// name = "backend"
/// members = [1]
///
/// [[channels]]
/// stream_id = 5
/// name = "general"
///
/// [emoji.codepoints]
/// smile = "1f642"
///
/// [emoji.aliases]
/// slightly_smiling_face = "smile"
///
/// [[emoji.realm]]
/// id = "1"
/// name = "parrot"
/// source_url = "/user_avatars/2/emoji/images/1.gif"
///
/// [[linkifiers]]
/// pattern = "#(?P<id>[0-9]+)"
/// url_template = "https://github.com/zulip/zulip/issues/{id}"
/// ```
#[derive(Debug, Deserialize)]
pub struct RealmConfig {
	/// The user the renderer acts on behalf of.
	pub my_user_id: UserId,
	#[serde(default)]
	pub settings: SettingsConfig,
	#[serde(default)]
	pub users: Vec<User>,
	#[serde(default)]
	pub groups: Vec<UserGroup>,
	#[serde(default)]
	pub channels: Vec<Channel>,
	#[serde(default)]
	pub emoji: EmojiConfig,
	#[serde(default)]
	pub linkifiers: Vec<LinkifierConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SettingsConfig {
	#[serde(default)]
	pub translate_emoticons: bool,
	#[serde(default)]
	pub web_channel_default_view: ChannelDefaultView,
}

#[derive(Debug, Default, Deserialize)]
pub struct EmojiConfig {
	/// Canonical name to hex codepoint.
	#[serde(default)]
	pub codepoints: IndexMap<String, String>,
	/// Alias to canonical name.
	#[serde(default)]
	pub aliases: IndexMap<String, String>,
	/// Emoticon to canonical name. When absent the standard table is used.
	#[serde(default)]
	pub emoticons: Option<IndexMap<String, String>>,
	#[serde(default)]
	pub realm: Vec<RealmEmoji>,
}

#[derive(Debug, Deserialize)]
pub struct LinkifierConfig {
	pub pattern: String,
	pub url_template: String,
}

impl RealmConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if the file does not exist.
	pub fn load(root: &Path) -> MdrefResult<Option<RealmConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		debug!(path = %config_path.display(), "loading realm config");
		let content = std::fs::read_to_string(&config_path)?;

		Self::parse(&content).map(Some)
	}

	pub fn parse(content: &str) -> MdrefResult<RealmConfig> {
		toml::from_str(content).map_err(|e| MdrefError::ConfigParse(e.to_string()))
	}

	/// Populate in-memory stores from this config.
	pub fn into_realm(self) -> MdrefResult<Realm> {
		ensure_unique("user", self.users.iter().map(|user| user.user_id))?;
		ensure_unique("group", self.groups.iter().map(|group| group.id))?;
		ensure_unique(
			"channel",
			self.channels.iter().map(|channel| channel.stream_id),
		)?;

		let realm = Realm::new(self.my_user_id);

		realm
			.settings
			.set_translate_emoticons(self.settings.translate_emoticons);
		realm
			.settings
			.set_web_channel_default_view(self.settings.web_channel_default_view);

		for user in self.users {
			realm.users.add_user(user);
		}
		for group in self.groups {
			realm.groups.add_group(group);
		}
		for channel in self.channels {
			realm.channels.add_channel(channel);
		}

		for (name, codepoint) in &self.emoji.codepoints {
			realm.emoji.add_emoji(name, codepoint);
		}
		for (alias, canonical) in &self.emoji.aliases {
			realm.emoji.add_alias(alias, canonical);
		}
		if let Some(emoticons) = &self.emoji.emoticons {
			realm.emoji.clear_emoticons();
			for (emoticon, name) in emoticons {
				realm.emoji.add_emoticon(emoticon, name);
			}
		}
		for emoji in self.emoji.realm {
			realm.emoji.add_realm_emoji(emoji);
		}

		for linkifier in &self.linkifiers {
			realm
				.linkifiers
				.add(&linkifier.pattern, &linkifier.url_template)?;
		}

		debug!("realm config loaded");
		Ok(realm)
	}
}

fn ensure_unique(kind: &'static str, ids: impl Iterator<Item = u64>) -> MdrefResult<()> {
	let mut seen = BTreeSet::new();
	for id in ids {
		if !seen.insert(id) {
			return Err(MdrefError::DuplicateId { kind, id });
		}
	}
	Ok(())
}
