use std::collections::BTreeSet;

use crate::entities::Channel;
use crate::entities::GroupId;
use crate::entities::RealmEmoji;
use crate::entities::StreamId;
use crate::entities::User;
use crate::entities::UserGroup;
use crate::entities::UserId;
use crate::memory::Realm;

pub const ME: UserId = 1;
pub const IAGO: UserId = 2;
pub const CORDELIA: UserId = 3;
pub const HIDDEN: UserId = 4;
pub const OTHELLO_ONE: UserId = 5;
pub const OTHELLO_TWO: UserId = 6;

pub const BACKEND: GroupId = 10;
pub const ENGINEERING: GroupId = 11;

pub const GENERAL: StreamId = 5;
pub const DESIGN: StreamId = 8;

pub fn user(user_id: UserId, full_name: &str) -> User {
	User {
		user_id,
		full_name: full_name.to_string(),
		email: format!("user{user_id}@example.com"),
		is_bot: false,
		is_active: true,
		is_inaccessible: false,
	}
}

pub fn group(id: GroupId, name: &str, members: &[UserId], subgroups: &[GroupId]) -> UserGroup {
	UserGroup {
		id,
		name: name.to_string(),
		description: format!("The {name} group"),
		members: members.iter().copied().collect(),
		direct_subgroup_ids: subgroups.iter().copied().collect(),
		is_system_group: false,
		deactivated: false,
	}
}

pub fn channel(stream_id: StreamId, name: &str) -> Channel {
	Channel {
		stream_id,
		name: name.to_string(),
		description: "...".to_string(),
		rendered_description: "<p>...</p>".to_string(),
		invite_only: false,
		is_web_public: true,
		subscribed: true,
		color: Some("#76ce90".to_string()),
	}
}

pub fn realm_emoji(id: &str, name: &str) -> RealmEmoji {
	RealmEmoji {
		id: id.to_string(),
		name: name.to_string(),
		source_url: format!("/user_avatars/2/emoji/images/{id}.png"),
		deactivated: false,
	}
}

/// A small realm with a bit of everything.
pub fn sample_realm() -> Realm {
	let realm = Realm::new(ME);

	realm.users.add_user(user(ME, "Desdemona"));
	realm.users.add_user(user(IAGO, "Iago"));
	realm.users.add_user(user(CORDELIA, "Cordelia, Lear's daughter"));
	realm.users.add_user(User {
		is_inaccessible: true,
		..user(HIDDEN, "Unknown user")
	});
	realm.users.add_user(user(OTHELLO_ONE, "Othello"));
	realm.users.add_user(user(OTHELLO_TWO, "othello"));

	realm.groups.add_group(group(BACKEND, "backend", &[IAGO], &[]));
	realm
		.groups
		.add_group(group(ENGINEERING, "engineering", &[CORDELIA], &[BACKEND]));

	realm.channels.add_channel(channel(GENERAL, "general"));
	realm.channels.add_channel(channel(DESIGN, "design team"));

	realm.emoji.add_emoji("smile", "1f642");
	realm.emoji.add_emoji("heart", "2764");
	realm.emoji.add_alias("slightly_smiling_face", "smile");
	realm.emoji.add_realm_emoji(realm_emoji("1", "parrot"));

	realm
		.linkifiers
		.add("#(?P<id>[0-9]+)", "https://github.com/zulip/zulip/issues/{id}")
		.unwrap_or_else(|e| panic!("fixture linkifier: {e}"));

	realm
}

pub fn ids(values: &[u64]) -> BTreeSet<u64> {
	values.iter().copied().collect()
}
