//! Host-side lookups the helpers bundle is assembled from.
//!
//! Each trait is a read-only handle onto one of the host's stores. "Not
//! found" is always `None` or `false`, never an error.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::entities::Channel;
use crate::entities::GroupId;
use crate::entities::StreamId;
use crate::entities::UserGroup;
use crate::entities::UserId;
use crate::linkifier::LinkifierPattern;
use crate::linkifier::LinkifierRule;
use crate::narrow::ChannelDefaultView;
use crate::view::Mapping;

pub trait UserDirectory: Send + Sync {
	fn actual_name_from_user_id(&self, user_id: UserId) -> Option<String>;
	fn user_id_from_name(&self, full_name: &str) -> Option<UserId>;
	fn is_valid_full_name_and_user_id(&self, full_name: &str, user_id: UserId) -> bool;
	/// Id of the user the renderer runs on behalf of.
	fn my_current_user_id(&self) -> UserId;
	fn is_known_user_id(&self, user_id: UserId) -> bool;
}

pub trait GroupDirectory: Send + Sync {
	fn user_group_from_name(&self, name: &str) -> Option<UserGroup>;
	/// Membership including members of nested subgroups.
	fn is_user_in_group(&self, group_id: GroupId, user_id: UserId) -> bool;
}

pub trait ChannelDirectory: Send + Sync {
	fn sub_by_name(&self, name: &str) -> Option<Channel>;
	fn sub_by_id(&self, stream_id: StreamId) -> Option<Channel>;
}

/// Pure string formatting of channel and topic URL fragments.
pub trait UrlFormatter: Send + Sync {
	fn channel_url(&self, stream_id: StreamId) -> String;
	fn channel_topic_url(&self, stream_id: StreamId, topic: &str) -> String;
}

pub trait SettingsStore: Send + Sync {
	fn translate_emoticons(&self) -> bool;

	fn web_channel_default_view(&self) -> ChannelDefaultView {
		ChannelDefaultView::default()
	}
}

pub trait EmojiCatalog: Send + Sync {
	fn emoji_name(&self, name: &str) -> Option<String>;
	fn emoji_codepoint(&self, name: &str) -> Option<String>;
	/// Emoticon text (`:)`) to canonical emoji name (`smile`).
	fn emoticon_translations(&self) -> IndexMap<String, String>;
	fn realm_emoji_url(&self, name_or_id: &str) -> Option<String>;
}

pub trait LinkifierRegistry: Send + Sync {
	fn linkifier_map(&self) -> Arc<dyn Mapping<LinkifierPattern, LinkifierRule>>;
}
