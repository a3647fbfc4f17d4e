use core::{
	borrow::Borrow,
	fmt,
	hash::{BuildHasher, Hash},
	mem,
};
use hashbrown::{
	hash_map::{DefaultHashBuilder, Entry},
	HashMap,
};

/// An insertion-ordered map from keys to visual elements, representing what is currently on screen.
///
/// Keys are unique. Iteration yields entries in insertion order, and [`remove`](`KeyedSet::remove`)
/// keeps the relative order of the surviving entries, so exit ordering during reconciliation is
/// deterministic.
pub struct KeyedSet<K, E, S = DefaultHashBuilder>
where
	K: Hash + Eq,
	S: BuildHasher,
{
	index: HashMap<K, usize, S>,
	entries: Vec<(K, E)>,
}

impl<K, E, S> Default for KeyedSet<K, E, S>
where
	K: Hash + Eq,
	S: Default + BuildHasher,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<K, E, S> KeyedSet<K, E, S>
where
	K: Hash + Eq,
	S: BuildHasher,
{
	#[must_use]
	pub fn new() -> Self
	where
		S: Default,
	{
		Self {
			index: HashMap::with_hasher(S::default()),
			entries: Vec::new(),
		}
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	#[must_use]
	pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: Hash + Eq,
	{
		self.index.contains_key(key)
	}

	#[must_use]
	pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&E>
	where
		K: Borrow<Q>,
		Q: Hash + Eq,
	{
		let slot = *self.index.get(key)?;
		Some(&self.entries[slot].1)
	}

	#[must_use]
	pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut E>
	where
		K: Borrow<Q>,
		Q: Hash + Eq,
	{
		let slot = *self.index.get(key)?;
		Some(&mut self.entries[slot].1)
	}

	/// Inserts `element` under `key`, returning the displaced element if the key was already
	/// present. Displacing keeps the key's original position.
	pub fn insert(&mut self, key: K, element: E) -> Option<E>
	where
		K: Clone,
	{
		match self.index.entry(key.clone()) {
			Entry::Occupied(occupied) => {
				let slot = *occupied.get();
				Some(mem::replace(&mut self.entries[slot].1, element))
			}
			Entry::Vacant(vacant) => {
				vacant.insert(self.entries.len());
				self.entries.push((key, element));
				None
			}
		}
	}

	/// Removes the element under `key`, keeping the relative order of the remaining entries.
	///
	/// Linear in the number of entries behind the removed slot.
	pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<E>
	where
		K: Borrow<Q>,
		Q: Hash + Eq,
	{
		let removed = self.index.remove(key)?;
		let (_, element) = self.entries.remove(removed);
		for slot in self.index.values_mut() {
			if *slot > removed {
				*slot -= 1;
			}
		}
		Some(element)
	}

	pub fn keys(&self) -> impl Iterator<Item = &K> {
		self.entries.iter().map(|(key, _)| key)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&K, &E)> {
		self.entries.iter().map(|(key, element)| (key, element))
	}

	pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut E)> {
		self.entries.iter_mut().map(|(key, element)| (&*key, element))
	}

	pub fn drain(&mut self) -> impl Iterator<Item = (K, E)> + '_ {
		self.index.clear();
		self.entries.drain(..)
	}
}

impl<K, E, S> fmt::Debug for KeyedSet<K, E, S>
where
	K: Hash + Eq + fmt::Debug,
	E: fmt::Debug,
	S: BuildHasher,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.entries.iter().map(|(key, element)| (key, element))).finish()
	}
}
