//! URL fragments for channel and topic narrows.
//!
//! Channels are addressed as `#narrow/channel/<id>-<slug>` where the slug is
//! the channel name with spaces turned into dashes. The name part is
//! cosmetic: the id alone identifies the channel, so an unknown id still
//! yields a usable fragment with the slug `unknown`.

use std::sync::Arc;

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;
use serde::Deserialize;
use serde::Serialize;

use crate::collaborators::ChannelDirectory;
use crate::collaborators::SettingsStore;
use crate::collaborators::UrlFormatter;
use crate::entities::StreamId;

/// Characters `encodeURIComponent` leaves untouched.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'_')
	.remove(b'.')
	.remove(b'!')
	.remove(b'~')
	.remove(b'*')
	.remove(b'\'')
	.remove(b'(')
	.remove(b')');

/// Where a bare channel link should take the reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelDefaultView {
	/// The channel's message feed.
	#[default]
	ChannelFeed,
	/// The list of topics in the channel.
	ListOfTopics,
}

/// Encode a single fragment component.
///
/// Percent encoding is applied first and then rewritten so the result
/// survives browsers that decode `%` sequences in the fragment: `%` becomes
/// `.`, and the literal characters `(`, `)` and `.` are escaped as `.28`,
/// `.29` and `.2E`.
pub fn encode_hash_component(component: &str) -> String {
	let encoded = utf8_percent_encode(component, URI_COMPONENT).to_string();
	let mut result = String::with_capacity(encoded.len());

	for ch in encoded.chars() {
		match ch {
			'%' => result.push('.'),
			'(' => result.push_str(".28"),
			')' => result.push_str(".29"),
			'.' => result.push_str(".2E"),
			other => result.push(other),
		}
	}

	result
}

/// `<id>-<name with dashes>`, encoded.
pub fn encode_stream_id(stream_id: StreamId, name: Option<&str>) -> String {
	let name = name.unwrap_or("unknown").replace(' ', "-");
	encode_hash_component(&format!("{stream_id}-{name}"))
}

/// Formats narrow fragments using the live channel directory for slugs and
/// the user's default channel view.
pub struct NarrowUrls {
	channels: Arc<dyn ChannelDirectory>,
	settings: Arc<dyn SettingsStore>,
}

impl NarrowUrls {
	pub fn new(channels: Arc<dyn ChannelDirectory>, settings: Arc<dyn SettingsStore>) -> Self {
		Self { channels, settings }
	}

	fn channel_slug(&self, stream_id: StreamId) -> String {
		let channel = self.channels.sub_by_id(stream_id);
		encode_stream_id(stream_id, channel.as_ref().map(|c| c.name.as_str()))
	}

	/// `#narrow/channel/<id>-<slug>` regardless of user preference.
	pub fn by_stream_url(&self, stream_id: StreamId) -> String {
		format!("#narrow/channel/{}", self.channel_slug(stream_id))
	}
}

impl UrlFormatter for NarrowUrls {
	fn channel_url(&self, stream_id: StreamId) -> String {
		match self.settings.web_channel_default_view() {
			ChannelDefaultView::ChannelFeed => self.by_stream_url(stream_id),
			ChannelDefaultView::ListOfTopics => format!("#topics/channel/{stream_id}"),
		}
	}

	fn channel_topic_url(&self, stream_id: StreamId, topic: &str) -> String {
		format!(
			"{}/topic/{}",
			self.by_stream_url(stream_id),
			encode_hash_component(topic)
		)
	}
}
