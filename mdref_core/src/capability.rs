use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde_json::Value;
use serde_json::json;

use crate::ChannelRef;
use crate::GroupRef;
use crate::MdrefError;
use crate::MdrefResult;
use crate::entities::GroupId;
use crate::entities::StreamId;
use crate::entities::UserId;
use crate::linkifier::LinkifierPattern;
use crate::linkifier::LinkifierRule;
use crate::view::ReadOnlyMap;

/// Every lookup the markdown renderer may perform while parsing.
///
/// All operations are synchronous and read-only. A reference that cannot be
/// resolved comes back as `None` (or `false`) and should be rendered as plain
/// text, never treated as an error.
pub trait MarkdownHelpers: Send + Sync {
	// users
	fn actual_name_from_user_id(&self, user_id: UserId) -> Option<String>;
	fn user_id_from_name(&self, full_name: &str) -> Option<UserId>;
	fn is_valid_full_name_and_user_id(&self, full_name: &str, user_id: UserId) -> bool;
	fn my_user_id(&self) -> UserId;
	fn is_valid_user_id(&self, user_id: UserId) -> bool;

	// user groups
	fn user_group_from_name(&self, name: &str) -> Option<GroupRef>;
	fn is_member_of_user_group(&self, user_id: UserId, group_id: GroupId) -> bool;

	// channels
	fn stream_by_name(&self, name: &str) -> Option<ChannelRef>;
	fn stream_hash(&self, stream_id: StreamId) -> String;
	fn stream_topic_hash(&self, stream_id: StreamId, topic: &str) -> String;

	// settings
	fn should_translate_emoticons(&self) -> bool;

	// emoji
	fn emoji_name(&self, name: &str) -> Option<String>;
	fn emoji_codepoint(&self, name: &str) -> Option<String>;
	fn emoticon_translations(&self) -> IndexMap<String, String>;
	fn realm_emoji_url(&self, name_or_id: &str) -> Option<String>;

	// linkifiers
	fn linkifier_map(&self) -> ReadOnlyMap<LinkifierPattern, LinkifierRule>;
}

/// Names of the operations on [`MarkdownHelpers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
	/// User id to full name.
	ActualNameFromUserId,
	/// Full name to user id.
	UserIdFromName,
	/// Whether the id belongs to a user with exactly this full name.
	IsValidFullNameAndUserId,
	/// The current user's id.
	MyUserId,
	/// Whether the id belongs to a user the current user can see.
	IsValidUserId,
	/// Group name to [`GroupRef`].
	UserGroupFromName,
	/// Whether the user is in the group, directly or through subgroups.
	IsMemberOfUserGroup,
	/// Channel name to [`ChannelRef`].
	StreamByName,
	/// URL fragment for a channel.
	StreamHash,
	/// URL fragment for a topic within a channel.
	StreamTopicHash,
	/// Whether `:)` and friends should become emoji.
	ShouldTranslateEmoticons,
	/// Any emoji spelling to its canonical name.
	EmojiName,
	/// Emoji name to hex codepoint.
	EmojiCodepoint,
	/// Emoticon text to canonical emoji name.
	EmoticonTranslations,
	/// Realm emoji name or id to image URL.
	RealmEmojiUrl,
	/// Live view of linkifier patterns.
	LinkifierMap,
}

impl Capability {
	pub const ALL: [Capability; 16] = [
		Self::ActualNameFromUserId,
		Self::UserIdFromName,
		Self::IsValidFullNameAndUserId,
		Self::MyUserId,
		Self::IsValidUserId,
		Self::UserGroupFromName,
		Self::IsMemberOfUserGroup,
		Self::StreamByName,
		Self::StreamHash,
		Self::StreamTopicHash,
		Self::ShouldTranslateEmoticons,
		Self::EmojiName,
		Self::EmojiCodepoint,
		Self::EmoticonTranslations,
		Self::RealmEmojiUrl,
		Self::LinkifierMap,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::ActualNameFromUserId => "actual_name_from_user_id",
			Self::UserIdFromName => "user_id_from_name",
			Self::IsValidFullNameAndUserId => "is_valid_full_name_and_user_id",
			Self::MyUserId => "my_user_id",
			Self::IsValidUserId => "is_valid_user_id",
			Self::UserGroupFromName => "user_group_from_name",
			Self::IsMemberOfUserGroup => "is_member_of_user_group",
			Self::StreamByName => "stream_by_name",
			Self::StreamHash => "stream_hash",
			Self::StreamTopicHash => "stream_topic_hash",
			Self::ShouldTranslateEmoticons => "should_translate_emoticons",
			Self::EmojiName => "emoji_name",
			Self::EmojiCodepoint => "emoji_codepoint",
			Self::EmoticonTranslations => "emoticon_translations",
			Self::RealmEmojiUrl => "realm_emoji_url",
			Self::LinkifierMap => "linkifier_map",
		}
	}

	/// Human readable argument list, used in usage errors.
	pub fn signature(self) -> &'static str {
		match self {
			Self::ActualNameFromUserId | Self::IsValidUserId => "<user_id>",
			Self::UserIdFromName => "<full_name>",
			Self::IsValidFullNameAndUserId => "<full_name> <user_id>",
			Self::UserGroupFromName => "<group_name>",
			Self::IsMemberOfUserGroup => "<user_id> <group_id>",
			Self::StreamByName => "<channel_name>",
			Self::StreamHash => "<stream_id>",
			Self::StreamTopicHash => "<stream_id> <topic>",
			Self::EmojiName | Self::EmojiCodepoint => "<emoji_name>",
			Self::RealmEmojiUrl => "<emoji_name_or_id>",
			Self::MyUserId
			| Self::ShouldTranslateEmoticons
			| Self::EmoticonTranslations
			| Self::LinkifierMap => "",
		}
	}

	fn arity(self) -> usize {
		self.signature().split_whitespace().count()
	}
}

impl fmt::Display for Capability {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Capability {
	type Err = MdrefError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|capability| capability.as_str() == s)
			.ok_or_else(|| MdrefError::UnknownCapability(s.to_string()))
	}
}

/// Call one capability by name with string arguments and render the result
/// as JSON. Absence is rendered as `null`.
pub fn invoke(
	helpers: &dyn MarkdownHelpers,
	capability: Capability,
	args: &[String],
) -> MdrefResult<Value> {
	if args.len() != capability.arity() {
		return Err(usage(capability));
	}

	let value = match capability {
		Capability::ActualNameFromUserId => {
			json!(helpers.actual_name_from_user_id(parse_id(capability, &args[0])?))
		}
		Capability::UserIdFromName => json!(helpers.user_id_from_name(&args[0])),
		Capability::IsValidFullNameAndUserId => {
			json!(helpers.is_valid_full_name_and_user_id(
				&args[0],
				parse_id(capability, &args[1])?
			))
		}
		Capability::MyUserId => json!(helpers.my_user_id()),
		Capability::IsValidUserId => {
			json!(helpers.is_valid_user_id(parse_id(capability, &args[0])?))
		}
		Capability::UserGroupFromName => json!(helpers.user_group_from_name(&args[0])),
		Capability::IsMemberOfUserGroup => {
			json!(helpers.is_member_of_user_group(
				parse_id(capability, &args[0])?,
				parse_id(capability, &args[1])?
			))
		}
		Capability::StreamByName => json!(helpers.stream_by_name(&args[0])),
		Capability::StreamHash => json!(helpers.stream_hash(parse_id(capability, &args[0])?)),
		Capability::StreamTopicHash => {
			json!(helpers.stream_topic_hash(parse_id(capability, &args[0])?, &args[1]))
		}
		Capability::ShouldTranslateEmoticons => json!(helpers.should_translate_emoticons()),
		Capability::EmojiName => json!(helpers.emoji_name(&args[0])),
		Capability::EmojiCodepoint => json!(helpers.emoji_codepoint(&args[0])),
		Capability::EmoticonTranslations => json!(helpers.emoticon_translations()),
		Capability::RealmEmojiUrl => json!(helpers.realm_emoji_url(&args[0])),
		Capability::LinkifierMap => {
			let linkifiers: Vec<Value> = helpers
				.linkifier_map()
				.entries()
				.map(|(pattern, rule)| {
					json!({
						"pattern": pattern.as_str(),
						"url_template": rule.url_template,
						"group_number_to_name": rule.group_number_to_name,
					})
				})
				.collect();
			Value::Array(linkifiers)
		}
	};

	Ok(value)
}

fn parse_id(capability: Capability, arg: &str) -> MdrefResult<u64> {
	arg.trim().parse().map_err(|_| usage(capability))
}

fn usage(capability: Capability) -> MdrefError {
	let expected = match capability.signature() {
		"" => "no arguments",
		signature => signature,
	};
	MdrefError::InvalidArgument {
		capability: capability.as_str(),
		expected,
	}
}
