use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;
use tracing::trace;

use crate::ChannelRef;
use crate::GroupRef;
use crate::MdrefError;
use crate::MdrefResult;
use crate::capability::MarkdownHelpers;
use crate::collaborators::ChannelDirectory;
use crate::collaborators::EmojiCatalog;
use crate::collaborators::GroupDirectory;
use crate::collaborators::LinkifierRegistry;
use crate::collaborators::SettingsStore;
use crate::collaborators::UrlFormatter;
use crate::collaborators::UserDirectory;
use crate::entities::GroupId;
use crate::entities::StreamId;
use crate::entities::UserId;
use crate::linkifier::LinkifierPattern;
use crate::linkifier::LinkifierRule;
use crate::refs::to_channel_ref;
use crate::refs::to_group_ref;
use crate::view::ReadOnlyMap;
use crate::view::as_readonly_view;

/// Handles to every host store the bundle reads from.
pub struct Collaborators {
	pub users: Arc<dyn UserDirectory>,
	pub groups: Arc<dyn GroupDirectory>,
	pub channels: Arc<dyn ChannelDirectory>,
	pub urls: Arc<dyn UrlFormatter>,
	pub settings: Arc<dyn SettingsStore>,
	pub emoji: Arc<dyn EmojiCatalog>,
	pub linkifiers: Arc<dyn LinkifierRegistry>,
}

/// The capability bundle handed to the renderer.
///
/// Holds no state of its own: every call is forwarded to a collaborator, and
/// rich entities are projected to [`ChannelRef`] / [`GroupRef`] on the way
/// out.
#[derive(Clone)]
pub struct Helpers {
	users: Arc<dyn UserDirectory>,
	groups: Arc<dyn GroupDirectory>,
	channels: Arc<dyn ChannelDirectory>,
	urls: Arc<dyn UrlFormatter>,
	settings: Arc<dyn SettingsStore>,
	emoji: Arc<dyn EmojiCatalog>,
	linkifiers: Arc<dyn LinkifierRegistry>,
}

/// Bind every capability to its collaborator.
pub fn build_capability_bundle(collaborators: Collaborators) -> Helpers {
	debug!("assembling markdown helpers");

	let Collaborators {
		users,
		groups,
		channels,
		urls,
		settings,
		emoji,
		linkifiers,
	} = collaborators;

	Helpers {
		users,
		groups,
		channels,
		urls,
		settings,
		emoji,
		linkifiers,
	}
}

impl Helpers {
	pub fn builder() -> HelpersBuilder {
		HelpersBuilder::default()
	}
}

impl fmt::Debug for Helpers {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Helpers").finish_non_exhaustive()
	}
}

impl MarkdownHelpers for Helpers {
	fn actual_name_from_user_id(&self, user_id: UserId) -> Option<String> {
		let name = self.users.actual_name_from_user_id(user_id);
		if name.is_none() {
			trace!(user_id, "unresolved user id");
		}
		name
	}

	fn user_id_from_name(&self, full_name: &str) -> Option<UserId> {
		let user_id = self.users.user_id_from_name(full_name);
		if user_id.is_none() {
			trace!(full_name, "unresolved user name");
		}
		user_id
	}

	fn is_valid_full_name_and_user_id(&self, full_name: &str, user_id: UserId) -> bool {
		self.users.is_valid_full_name_and_user_id(full_name, user_id)
	}

	fn my_user_id(&self) -> UserId {
		self.users.my_current_user_id()
	}

	fn is_valid_user_id(&self, user_id: UserId) -> bool {
		self.users.is_known_user_id(user_id)
	}

	fn user_group_from_name(&self, name: &str) -> Option<GroupRef> {
		let group = self.groups.user_group_from_name(name);
		if group.is_none() {
			trace!(name, "unresolved user group");
		}
		to_group_ref(group.as_ref())
	}

	fn is_member_of_user_group(&self, user_id: UserId, group_id: GroupId) -> bool {
		self.groups.is_user_in_group(group_id, user_id)
	}

	fn stream_by_name(&self, name: &str) -> Option<ChannelRef> {
		let channel = self.channels.sub_by_name(name);
		if channel.is_none() {
			trace!(name, "unresolved channel");
		}
		to_channel_ref(channel.as_ref())
	}

	fn stream_hash(&self, stream_id: StreamId) -> String {
		self.urls.channel_url(stream_id)
	}

	fn stream_topic_hash(&self, stream_id: StreamId, topic: &str) -> String {
		self.urls.channel_topic_url(stream_id, topic)
	}

	fn should_translate_emoticons(&self) -> bool {
		self.settings.translate_emoticons()
	}

	fn emoji_name(&self, name: &str) -> Option<String> {
		self.emoji.emoji_name(name)
	}

	fn emoji_codepoint(&self, name: &str) -> Option<String> {
		self.emoji.emoji_codepoint(name)
	}

	fn emoticon_translations(&self) -> IndexMap<String, String> {
		self.emoji.emoticon_translations()
	}

	fn realm_emoji_url(&self, name_or_id: &str) -> Option<String> {
		let url = self.emoji.realm_emoji_url(name_or_id);
		if url.is_none() {
			trace!(name_or_id, "unresolved realm emoji");
		}
		url
	}

	fn linkifier_map(&self) -> ReadOnlyMap<LinkifierPattern, LinkifierRule> {
		as_readonly_view(self.linkifiers.linkifier_map())
	}
}

/// Collects collaborators one at a time.
///
/// [`HelpersBuilder::build`] refuses to produce a bundle unless every
/// collaborator was supplied.
#[derive(Default)]
pub struct HelpersBuilder {
	users: Option<Arc<dyn UserDirectory>>,
	groups: Option<Arc<dyn GroupDirectory>>,
	channels: Option<Arc<dyn ChannelDirectory>>,
	urls: Option<Arc<dyn UrlFormatter>>,
	settings: Option<Arc<dyn SettingsStore>>,
	emoji: Option<Arc<dyn EmojiCatalog>>,
	linkifiers: Option<Arc<dyn LinkifierRegistry>>,
}

impl HelpersBuilder {
	#[must_use]
	pub fn users(mut self, users: Arc<dyn UserDirectory>) -> Self {
		self.users = Some(users);
		self
	}

	#[must_use]
	pub fn groups(mut self, groups: Arc<dyn GroupDirectory>) -> Self {
		self.groups = Some(groups);
		self
	}

	#[must_use]
	pub fn channels(mut self, channels: Arc<dyn ChannelDirectory>) -> Self {
		self.channels = Some(channels);
		self
	}

	#[must_use]
	pub fn urls(mut self, urls: Arc<dyn UrlFormatter>) -> Self {
		self.urls = Some(urls);
		self
	}

	#[must_use]
	pub fn settings(mut self, settings: Arc<dyn SettingsStore>) -> Self {
		self.settings = Some(settings);
		self
	}

	#[must_use]
	pub fn emoji(mut self, emoji: Arc<dyn EmojiCatalog>) -> Self {
		self.emoji = Some(emoji);
		self
	}

	#[must_use]
	pub fn linkifiers(mut self, linkifiers: Arc<dyn LinkifierRegistry>) -> Self {
		self.linkifiers = Some(linkifiers);
		self
	}

	pub fn build(self) -> MdrefResult<Helpers> {
		let collaborators = Collaborators {
			users: self.users.ok_or(MdrefError::MissingCollaborator("users"))?,
			groups: self
				.groups
				.ok_or(MdrefError::MissingCollaborator("groups"))?,
			channels: self
				.channels
				.ok_or(MdrefError::MissingCollaborator("channels"))?,
			urls: self.urls.ok_or(MdrefError::MissingCollaborator("urls"))?,
			settings: self
				.settings
				.ok_or(MdrefError::MissingCollaborator("settings"))?,
			emoji: self.emoji.ok_or(MdrefError::MissingCollaborator("emoji"))?,
			linkifiers: self
				.linkifiers
				.ok_or(MdrefError::MissingCollaborator("linkifiers"))?,
		};

		Ok(build_capability_bundle(collaborators))
	}
}
