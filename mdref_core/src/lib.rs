//! `mdref_core` is the lookup boundary between a markdown renderer and the
//! host application that owns users, user groups, channels, emoji and
//! linkifiers. While parsing, the renderer meets references such as
//! `@**Iago**`, `#**general**`, `:smile:` or `#1234` and resolves them
//! through a single [`MarkdownHelpers`] bundle without knowing how the host
//! stores any of it.
//!
//! ## Layers
//!
//! ```text
//! host stores (UserDirectory, ChannelDirectory, EmojiCatalog, …)
//!   → normalizers (Channel → ChannelRef, UserGroup → GroupRef)
//!   → read-only views (linkifier map behind ReadOnlyMap)
//!   → Helpers (one MarkdownHelpers method per capability)
//!   → renderer
//! ```
//!
//! ## Modules
//!
//! - [`collaborators`]: traits for the host stores the bundle reads from.
//! - [`config`]: `mdref.toml` realm description used by the CLI and tests.
//! - [`memory`]: in-memory implementations of every collaborator.
//! - [`narrow`]: channel and topic URL fragments.
//! - [`view`]: the live read-only mapping facade.
//!
//! ## Unresolved references
//!
//! A lookup that finds nothing returns `None` (or `false`). The renderer is
//! expected to fall back to plain text. The only error in this crate's
//! boundary is building a bundle with a collaborator missing, which
//! [`HelpersBuilder::build`] reports as [`MdrefError::MissingCollaborator`].
//!
//! ## Quick Start
//!
//! ```rust
//! use mdref_core::MarkdownHelpers;
//! use mdref_core::entities::Channel;
//! use mdref_core::memory::Realm;
//!
//! let realm = Realm::new(1);
//! realm.channels.add_channel(Channel {
//! 	stream_id: 5,
//! 	name: "general".into(),
//! 	description: "Everything else".into(),
//! 	rendered_description: String::new(),
//! 	invite_only: false,
//! 	is_web_public: false,
//! 	subscribed: true,
//! 	color: None,
//! });
//!
//! let helpers = realm.helpers().unwrap();
//! let channel = helpers.stream_by_name("general").unwrap();
//! assert_eq!(channel.stream_id, 5);
//! assert_eq!(helpers.stream_hash(5), "#narrow/channel/5-general");
//! assert!(helpers.user_group_from_name("ghost").is_none());
//! ```

pub use capability::*;
pub use error::*;
pub use helpers::*;
pub use linkifier::*;
pub use refs::*;
pub use view::ReadOnlyMap;
pub use view::as_readonly_view;

mod capability;
pub mod collaborators;
pub mod config;
pub mod entities;
#[allow(unused_assignments)]
mod error;
mod helpers;
mod linkifier;
pub mod memory;
pub mod narrow;
mod refs;
pub mod view;

#[cfg(test)]
mod __fixtures;
