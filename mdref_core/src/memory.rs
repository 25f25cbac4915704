//! In-memory host stores.
//!
//! These back the CLI and the test suite. Each store can be mutated by the
//! host after the helpers bundle was built; the bundle always reads the
//! current state.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::MdrefResult;
use crate::collaborators::ChannelDirectory;
use crate::collaborators::EmojiCatalog;
use crate::collaborators::GroupDirectory;
use crate::collaborators::LinkifierRegistry;
use crate::collaborators::SettingsStore;
use crate::collaborators::UserDirectory;
use crate::entities::Channel;
use crate::entities::GroupId;
use crate::entities::RealmEmoji;
use crate::entities::StreamId;
use crate::entities::User;
use crate::entities::UserGroup;
use crate::entities::UserId;
use crate::helpers::Helpers;
use crate::linkifier::LinkifierPattern;
use crate::linkifier::LinkifierRule;
use crate::linkifier::compile_linkifier;
use crate::narrow::ChannelDefaultView;
use crate::narrow::NarrowUrls;
use crate::view::Mapping;
use crate::view::SharedMap;

/// Emoticons translated when the user has emoticon translation enabled.
pub const DEFAULT_EMOTICONS: [(&str, &str); 12] = [
	(":)", "smile"),
	("(:", "upside_down"),
	(":(", "frown"),
	("<3", "heart"),
	(":|", "expressionless"),
	(":/", "confused"),
	(";)", "wink"),
	(":D", "grinning"),
	(":o", "open_mouth"),
	(":O", "open_mouth"),
	(":p", "stuck_out_tongue"),
	(":P", "stuck_out_tongue"),
];

#[derive(Debug)]
pub struct MemoryUsers {
	my_user_id: UserId,
	users: RwLock<BTreeMap<UserId, User>>,
}

impl MemoryUsers {
	pub fn new(my_user_id: UserId) -> Self {
		Self {
			my_user_id,
			users: RwLock::new(BTreeMap::new()),
		}
	}

	/// Insert or replace a user.
	pub fn add_user(&self, user: User) {
		self.users.write().insert(user.user_id, user);
	}

	pub fn remove_user(&self, user_id: UserId) -> Option<User> {
		self.users.write().remove(&user_id)
	}
}

impl UserDirectory for MemoryUsers {
	fn actual_name_from_user_id(&self, user_id: UserId) -> Option<String> {
		self.users
			.read()
			.get(&user_id)
			.map(|user| user.full_name.clone())
	}

	/// Names match case-insensitively. A name shared by several users is
	/// ambiguous and resolves to nothing.
	fn user_id_from_name(&self, full_name: &str) -> Option<UserId> {
		let needle = full_name.to_lowercase();
		let users = self.users.read();
		let mut matches = users
			.values()
			.filter(|user| user.full_name.to_lowercase() == needle);

		let first = matches.next()?;
		if matches.next().is_some() {
			return None;
		}

		Some(first.user_id)
	}

	fn is_valid_full_name_and_user_id(&self, full_name: &str, user_id: UserId) -> bool {
		self.users
			.read()
			.get(&user_id)
			.is_some_and(|user| user.full_name == full_name)
	}

	fn my_current_user_id(&self) -> UserId {
		self.my_user_id
	}

	fn is_known_user_id(&self, user_id: UserId) -> bool {
		self.users
			.read()
			.get(&user_id)
			.is_some_and(|user| !user.is_inaccessible)
	}
}

#[derive(Debug, Default)]
pub struct MemoryGroups {
	groups: RwLock<BTreeMap<GroupId, UserGroup>>,
}

impl MemoryGroups {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert or replace a group.
	pub fn add_group(&self, group: UserGroup) {
		self.groups.write().insert(group.id, group);
	}

	pub fn add_members(&self, group_id: GroupId, user_ids: &[UserId]) {
		if let Some(group) = self.groups.write().get_mut(&group_id) {
			group.members.extend(user_ids.iter().copied());
		}
	}

	pub fn remove_members(&self, group_id: GroupId, user_ids: &[UserId]) {
		if let Some(group) = self.groups.write().get_mut(&group_id) {
			for user_id in user_ids {
				group.members.remove(user_id);
			}
		}
	}
}

impl GroupDirectory for MemoryGroups {
	fn user_group_from_name(&self, name: &str) -> Option<UserGroup> {
		let needle = name.to_lowercase();
		self.groups
			.read()
			.values()
			.find(|group| group.name.to_lowercase() == needle)
			.cloned()
	}

	fn is_user_in_group(&self, group_id: GroupId, user_id: UserId) -> bool {
		let groups = self.groups.read();
		let mut seen = HashSet::new();
		let mut pending = vec![group_id];

		while let Some(id) = pending.pop() {
			if !seen.insert(id) {
				continue;
			}
			let Some(group) = groups.get(&id) else {
				continue;
			};
			if group.members.contains(&user_id) {
				return true;
			}
			pending.extend(group.direct_subgroup_ids.iter().copied());
		}

		false
	}
}

#[derive(Debug, Default)]
pub struct MemoryChannels {
	channels: RwLock<BTreeMap<StreamId, Channel>>,
}

impl MemoryChannels {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert or replace a channel.
	pub fn add_channel(&self, channel: Channel) {
		self.channels.write().insert(channel.stream_id, channel);
	}

	pub fn rename_channel(&self, stream_id: StreamId, name: &str) {
		if let Some(channel) = self.channels.write().get_mut(&stream_id) {
			channel.name = name.to_string();
		}
	}

	pub fn remove_channel(&self, stream_id: StreamId) -> Option<Channel> {
		self.channels.write().remove(&stream_id)
	}
}

impl ChannelDirectory for MemoryChannels {
	fn sub_by_name(&self, name: &str) -> Option<Channel> {
		let needle = name.to_lowercase();
		self.channels
			.read()
			.values()
			.find(|channel| channel.name.to_lowercase() == needle)
			.cloned()
	}

	fn sub_by_id(&self, stream_id: StreamId) -> Option<Channel> {
		self.channels.read().get(&stream_id).cloned()
	}
}

#[derive(Debug, Clone, Copy, Default)]
struct SettingsState {
	translate_emoticons: bool,
	web_channel_default_view: ChannelDefaultView,
}

#[derive(Debug, Default)]
pub struct MemorySettings {
	state: RwLock<SettingsState>,
}

impl MemorySettings {
	pub fn new(translate_emoticons: bool, web_channel_default_view: ChannelDefaultView) -> Self {
		Self {
			state: RwLock::new(SettingsState {
				translate_emoticons,
				web_channel_default_view,
			}),
		}
	}

	pub fn set_translate_emoticons(&self, value: bool) {
		self.state.write().translate_emoticons = value;
	}

	pub fn set_web_channel_default_view(&self, view: ChannelDefaultView) {
		self.state.write().web_channel_default_view = view;
	}
}

impl SettingsStore for MemorySettings {
	fn translate_emoticons(&self) -> bool {
		self.state.read().translate_emoticons
	}

	fn web_channel_default_view(&self) -> ChannelDefaultView {
		self.state.read().web_channel_default_view
	}
}

#[derive(Debug, Default)]
struct EmojiState {
	name_to_codepoint: HashMap<String, String>,
	codepoint_to_name: HashMap<String, String>,
	aliases: HashMap<String, String>,
	emoticons: IndexMap<String, String>,
	/// Keyed by realm emoji id.
	realm: IndexMap<String, RealmEmoji>,
}

impl EmojiState {
	fn active_realm_emoji(&self, name_or_id: &str) -> Option<&RealmEmoji> {
		self.realm
			.get(name_or_id)
			.or_else(|| self.realm.values().find(|emoji| emoji.name == name_or_id))
			.filter(|emoji| !emoji.deactivated)
	}

	fn canonical_name(&self, name: &str) -> Option<String> {
		if self.name_to_codepoint.contains_key(name) {
			return Some(name.to_string());
		}
		if let Some(canonical) = self.aliases.get(name) {
			return Some(canonical.clone());
		}
		if let Some(canonical) = self.codepoint_to_name.get(&name.to_lowercase()) {
			return Some(canonical.clone());
		}
		self.realm
			.values()
			.find(|emoji| emoji.name == name && !emoji.deactivated)
			.map(|emoji| emoji.name.clone())
	}
}

#[derive(Debug, Default)]
pub struct MemoryEmoji {
	state: RwLock<EmojiState>,
}

impl MemoryEmoji {
	/// Empty catalog with the standard emoticon table.
	pub fn new() -> Self {
		let catalog = Self::default();
		for (emoticon, name) in DEFAULT_EMOTICONS {
			catalog.add_emoticon(emoticon, name);
		}
		catalog
	}

	/// Register a unicode emoji by canonical name and hex codepoint.
	///
	/// A codepoint keeps the first name registered for it.
	pub fn add_emoji(&self, name: &str, codepoint: &str) {
		let mut state = self.state.write();
		let codepoint = codepoint.to_lowercase();
		state
			.codepoint_to_name
			.entry(codepoint.clone())
			.or_insert_with(|| name.to_string());
		state.name_to_codepoint.insert(name.to_string(), codepoint);
	}

	pub fn add_alias(&self, alias: &str, canonical: &str) {
		self.state
			.write()
			.aliases
			.insert(alias.to_string(), canonical.to_string());
	}

	pub fn add_emoticon(&self, emoticon: &str, name: &str) {
		self.state
			.write()
			.emoticons
			.insert(emoticon.to_string(), name.to_string());
	}

	pub fn clear_emoticons(&self) {
		self.state.write().emoticons.clear();
	}

	/// Insert or replace a realm emoji, keyed by its id.
	pub fn add_realm_emoji(&self, emoji: RealmEmoji) {
		self.state.write().realm.insert(emoji.id.clone(), emoji);
	}

	pub fn deactivate_realm_emoji(&self, id: &str) {
		if let Some(emoji) = self.state.write().realm.get_mut(id) {
			emoji.deactivated = true;
		}
	}
}

impl EmojiCatalog for MemoryEmoji {
	/// Resolves a canonical name, an alias, a hex codepoint or an active realm
	/// emoji name to the canonical name.
	fn emoji_name(&self, name: &str) -> Option<String> {
		self.state.read().canonical_name(name)
	}

	fn emoji_codepoint(&self, name: &str) -> Option<String> {
		let state = self.state.read();
		let canonical = state.aliases.get(name).map_or(name, String::as_str);
		state.name_to_codepoint.get(canonical).cloned()
	}

	fn emoticon_translations(&self) -> IndexMap<String, String> {
		self.state.read().emoticons.clone()
	}

	fn realm_emoji_url(&self, name_or_id: &str) -> Option<String> {
		self.state
			.read()
			.active_realm_emoji(name_or_id)
			.map(|emoji| emoji.source_url.clone())
	}
}

#[derive(Debug, Default)]
pub struct MemoryLinkifiers {
	map: SharedMap<LinkifierPattern, LinkifierRule>,
}

impl MemoryLinkifiers {
	pub fn new() -> Self {
		Self::default()
	}

	/// Compile and register a linkifier, replacing one with the same pattern.
	pub fn add(&self, pattern: &str, url_template: &str) -> MdrefResult<()> {
		let (pattern, rule) = compile_linkifier(pattern, url_template)?;
		debug!(pattern = %pattern, url_template, "registered linkifier");
		self.map.insert(pattern, rule);
		Ok(())
	}

	pub fn remove(&self, pattern: &str) -> MdrefResult<bool> {
		let pattern = LinkifierPattern::new(pattern)?;
		Ok(self.map.remove(&pattern).is_some())
	}

	pub fn clear(&self) {
		self.map.clear();
	}
}

impl LinkifierRegistry for MemoryLinkifiers {
	fn linkifier_map(&self) -> Arc<dyn Mapping<LinkifierPattern, LinkifierRule>> {
		Arc::new(self.map.clone())
	}
}

/// One realm's worth of in-memory stores.
#[derive(Debug, Clone)]
pub struct Realm {
	pub users: Arc<MemoryUsers>,
	pub groups: Arc<MemoryGroups>,
	pub channels: Arc<MemoryChannels>,
	pub settings: Arc<MemorySettings>,
	pub emoji: Arc<MemoryEmoji>,
	pub linkifiers: Arc<MemoryLinkifiers>,
}

impl Realm {
	/// Empty realm viewed by `my_user_id`.
	pub fn new(my_user_id: UserId) -> Self {
		Self {
			users: Arc::new(MemoryUsers::new(my_user_id)),
			groups: Arc::new(MemoryGroups::new()),
			channels: Arc::new(MemoryChannels::new()),
			settings: Arc::new(MemorySettings::default()),
			emoji: Arc::new(MemoryEmoji::new()),
			linkifiers: Arc::new(MemoryLinkifiers::new()),
		}
	}

	/// Build the helpers bundle over this realm's stores.
	pub fn helpers(&self) -> MdrefResult<Helpers> {
		let urls = NarrowUrls::new(self.channels.clone(), self.settings.clone());

		Helpers::builder()
			.users(self.users.clone())
			.groups(self.groups.clone())
			.channels(self.channels.clone())
			.urls(Arc::new(urls))
			.settings(self.settings.clone())
			.emoji(self.emoji.clone())
			.linkifiers(self.linkifiers.clone())
			.build()
	}
}
