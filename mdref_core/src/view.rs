//! Read-only access to key-unique mappings owned by the host.
//!
//! [`ReadOnlyMap`] never copies the mapping it wraps. Every call to
//! [`ReadOnlyMap::get`], and every step of the [`ReadOnlyMap::keys`] and
//! [`ReadOnlyMap::entries`] iterators, goes back to the live mapping, so a
//! host mutation made after the view was handed out is visible through it.
//!
//! Iteration order is whatever the underlying mapping reports. Consumers must
//! not depend on it.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

/// A key-unique mapping that can be read by position or by key.
///
/// Implementors return owned values so no lock or borrow outlives a call.
pub trait Mapping<K, V>: Send + Sync {
	/// Number of entries currently stored.
	fn len(&self) -> usize;

	/// Whether the mapping currently holds no entries.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// The entry at `index` in the mapping's own order.
	fn entry_at(&self, index: usize) -> Option<(K, V)>;

	/// The key at `index` in the mapping's own order.
	fn key_at(&self, index: usize) -> Option<K> {
		self.entry_at(index).map(|(key, _)| key)
	}

	/// Current position of `key`, if present.
	fn index_of(&self, key: &K) -> Option<usize>;

	/// Point lookup.
	fn get(&self, key: &K) -> Option<V>;
}

/// Narrow facade over a [`Mapping`]: enumerate keys, enumerate entries, look
/// up a single key. Nothing else is reachable through it.
pub struct ReadOnlyMap<K, V> {
	inner: Arc<dyn Mapping<K, V>>,
}

/// Wrap a live mapping in a [`ReadOnlyMap`].
pub fn as_readonly_view<K, V>(mapping: Arc<dyn Mapping<K, V>>) -> ReadOnlyMap<K, V> {
	ReadOnlyMap { inner: mapping }
}

impl<K, V> ReadOnlyMap<K, V> {
	/// Lazily yields every key currently in the mapping.
	pub fn keys(&self) -> Keys<'_, K, V> {
		Keys {
			cursor: Cursor::new(self.inner.as_ref()),
		}
	}

	/// Lazily yields every key/value pair currently in the mapping.
	pub fn entries(&self) -> Entries<'_, K, V> {
		Entries {
			cursor: Cursor::new(self.inner.as_ref()),
		}
	}

	/// Point lookup against the live mapping.
	pub fn get(&self, key: &K) -> Option<V> {
		self.inner.get(key)
	}
}

impl<K, V> Clone for ReadOnlyMap<K, V> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<K, V> fmt::Debug for ReadOnlyMap<K, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ReadOnlyMap").finish_non_exhaustive()
	}
}

/// Position tracking shared by [`Keys`] and [`Entries`].
///
/// Resumes after the last key it yielded, looked up afresh on every step, so
/// removing an already visited entry does not cause an unvisited one to be
/// skipped.
struct Cursor<'a, K, V> {
	mapping: &'a dyn Mapping<K, V>,
	last: Option<K>,
	next: usize,
}

impl<'a, K, V> Cursor<'a, K, V> {
	fn new(mapping: &'a dyn Mapping<K, V>) -> Self {
		Self {
			mapping,
			last: None,
			next: 0,
		}
	}

	fn position(&self) -> usize {
		match &self.last {
			// The last key is gone, so everything after it moved down a slot.
			Some(key) => {
				self.mapping
					.index_of(key)
					.map_or(self.next.saturating_sub(1), |index| index + 1)
			}
			None => self.next,
		}
	}
}

impl<K: Clone, V> Cursor<'_, K, V> {
	fn advance(&mut self, index: usize, key: &K) {
		self.last = Some(key.clone());
		self.next = index + 1;
	}
}

/// Iterator returned by [`ReadOnlyMap::keys`].
pub struct Keys<'a, K, V> {
	cursor: Cursor<'a, K, V>,
}

impl<K: Clone, V> Iterator for Keys<'_, K, V> {
	type Item = K;

	fn next(&mut self) -> Option<Self::Item> {
		let index = self.cursor.position();
		let key = self.cursor.mapping.key_at(index)?;
		self.cursor.advance(index, &key);
		Some(key)
	}
}

/// Iterator returned by [`ReadOnlyMap::entries`].
pub struct Entries<'a, K, V> {
	cursor: Cursor<'a, K, V>,
}

impl<K: Clone, V> Iterator for Entries<'_, K, V> {
	type Item = (K, V);

	fn next(&mut self) -> Option<Self::Item> {
		let index = self.cursor.position();
		let (key, value) = self.cursor.mapping.entry_at(index)?;
		self.cursor.advance(index, &key);
		Some((key, value))
	}
}

/// Shared, host-mutable mapping that views can observe live.
///
/// Clones share the same storage.
pub struct SharedMap<K, V> {
	inner: Arc<RwLock<IndexMap<K, V>>>,
}

impl<K, V> SharedMap<K, V>
where
	K: Hash + Eq + Clone + Send + Sync + 'static,
	V: Clone + Send + Sync + 'static,
{
	pub fn new() -> Self {
		Self {
			inner: Arc::new(RwLock::new(IndexMap::new())),
		}
	}

	/// Insert or replace an entry, returning the previous value.
	pub fn insert(&self, key: K, value: V) -> Option<V> {
		self.inner.write().insert(key, value)
	}

	/// Remove an entry, keeping the remaining entries in order.
	pub fn remove(&self, key: &K) -> Option<V> {
		self.inner.write().shift_remove(key)
	}

	pub fn clear(&self) {
		self.inner.write().clear();
	}

	/// A [`ReadOnlyMap`] over this storage.
	pub fn view(&self) -> ReadOnlyMap<K, V> {
		let mapping: Arc<dyn Mapping<K, V>> = Arc::new(self.clone());
		as_readonly_view(mapping)
	}
}

impl<K, V> Mapping<K, V> for SharedMap<K, V>
where
	K: Hash + Eq + Clone + Send + Sync,
	V: Clone + Send + Sync,
{
	fn len(&self) -> usize {
		self.inner.read().len()
	}

	fn entry_at(&self, index: usize) -> Option<(K, V)> {
		self.inner
			.read()
			.get_index(index)
			.map(|(key, value)| (key.clone(), value.clone()))
	}

	fn key_at(&self, index: usize) -> Option<K> {
		self.inner.read().get_index(index).map(|(key, _)| key.clone())
	}

	fn index_of(&self, key: &K) -> Option<usize> {
		self.inner.read().get_index_of(key)
	}

	fn get(&self, key: &K) -> Option<V> {
		self.inner.read().get(key).cloned()
	}
}

impl<K, V> Clone for SharedMap<K, V> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<K, V> Default for SharedMap<K, V>
where
	K: Hash + Eq + Clone + Send + Sync + 'static,
	V: Clone + Send + Sync + 'static,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<K, V> FromIterator<(K, V)> for SharedMap<K, V>
where
	K: Hash + Eq,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			inner: Arc::new(RwLock::new(iter.into_iter().collect())),
		}
	}
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SharedMap<K, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.inner.read().iter()).finish()
	}
}
