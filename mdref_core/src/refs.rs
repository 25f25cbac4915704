use serde::Deserialize;
use serde::Serialize;

use crate::entities::Channel;
use crate::entities::GroupId;
use crate::entities::StreamId;
use crate::entities::UserGroup;

/// Snapshot of a channel at the moment it was looked up.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelRef {
	pub stream_id: StreamId,
	pub name: String,
}

/// Snapshot of a user group at the moment it was looked up.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupRef {
	pub id: GroupId,
	pub name: String,
}

impl From<&Channel> for ChannelRef {
	fn from(channel: &Channel) -> Self {
		Self {
			stream_id: channel.stream_id,
			name: channel.name.clone(),
		}
	}
}

impl From<&UserGroup> for GroupRef {
	fn from(group: &UserGroup) -> Self {
		Self {
			id: group.id,
			name: group.name.clone(),
		}
	}
}

/// Project a channel record to the fields the renderer is allowed to see.
pub fn to_channel_ref(channel: Option<&Channel>) -> Option<ChannelRef> {
	channel.map(ChannelRef::from)
}

/// Project a user group record to the fields the renderer is allowed to see.
pub fn to_group_ref(group: Option<&UserGroup>) -> Option<GroupRef> {
	group.map(GroupRef::from)
}
