//! Rich records as the host stores them.
//!
//! These carry everything the host knows about an entity. The renderer never
//! sees them directly: they are projected to [`ChannelRef`](crate::ChannelRef)
//! and [`GroupRef`](crate::GroupRef) before crossing the boundary.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

pub type UserId = u64;
pub type GroupId = u64;
pub type StreamId = u64;

/// A person in the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	pub user_id: UserId,
	pub full_name: String,
	#[serde(default)]
	pub email: String,
	#[serde(default)]
	pub is_bot: bool,
	#[serde(default = "default_true")]
	pub is_active: bool,
	/// Placeholder for a user the current user is not allowed to see.
	#[serde(default)]
	pub is_inaccessible: bool,
}

/// A user group, possibly nesting other groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroup {
	pub id: GroupId,
	pub name: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub members: BTreeSet<UserId>,
	#[serde(default)]
	pub direct_subgroup_ids: BTreeSet<GroupId>,
	#[serde(default)]
	pub is_system_group: bool,
	#[serde(default)]
	pub deactivated: bool,
}

/// A channel (stream) subscription record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
	pub stream_id: StreamId,
	pub name: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub rendered_description: String,
	#[serde(default)]
	pub invite_only: bool,
	#[serde(default)]
	pub is_web_public: bool,
	#[serde(default)]
	pub subscribed: bool,
	#[serde(default)]
	pub color: Option<String>,
}

/// A custom emoji uploaded to the realm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmEmoji {
	pub id: String,
	pub name: String,
	pub source_url: String,
	#[serde(default)]
	pub deactivated: bool,
}

fn default_true() -> bool {
	true
}
