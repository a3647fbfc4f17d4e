use crate::keyed_set::KeyedSet;
use core::{
	fmt,
	hash::{BuildHasher, Hash},
};
use hashbrown::HashSet;
use thiserror::Error;
use tracing::{trace, trace_span};

/// The result of one reconciliation pass: three disjoint groups whose keys partition
/// `keys(current) ∪ keys(records)` exactly.
///
/// `enter` and `update` follow the order of the record sequence they were computed from;
/// `exit` follows the prior [`KeyedSet`]'s insertion order. Callers must not depend on
/// these orders for correctness, only for z-stacking.
#[derive(Debug, PartialEq, Eq)]
pub struct Partition<K, R> {
	/// Keys present in the new records but absent from the scene. No element exists yet.
	pub enter: Vec<(K, R)>,
	/// Keys present in both. The existing element is kept and re-bound to the new record.
	pub update: Vec<(K, R)>,
	/// Keys present in the scene but absent from the new records. The element is to be discarded.
	pub exit: Vec<K>,
}

impl<K, R> Partition<K, R> {
	/// `true` when nothing enters and nothing exits, i.e. the pass only re-binds existing elements.
	#[must_use]
	pub fn is_steady(&self) -> bool {
		self.enter.is_empty() && self.exit.is_empty()
	}
}

/// Key extraction failed, so no partition was produced and the scene is untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError<K: fmt::Debug> {
	/// The key function returned no key for the record at `index`.
	#[error("no key could be extracted from the record at index {index}")]
	Missing { index: usize },
	/// The same key was extracted from two records of one sequence. Which record would win
	/// is undefined, so this is rejected instead of silently picking one.
	#[error("duplicate key {key:?} within one record sequence")]
	Duplicate { key: K },
}

/// Computes the enter/update/exit partition of `records` against the currently rendered set.
///
/// Pure: `current` is never mutated and no rendering state is touched. Side effects belong to
/// the apply step ([`Scene::apply`](`crate::scene::Scene::apply`)).
///
/// # Errors
///
/// [`KeyError::Missing`] if `key_of` returns [`None`] for any record, [`KeyError::Duplicate`]
/// if the same key is extracted twice. Either way the partition is discarded whole.
pub fn reconcile<K, E, S, R, I, F>(current: &KeyedSet<K, E, S>, records: I, mut key_of: F) -> Result<Partition<K, R>, KeyError<K>>
where
	K: Hash + Eq + Clone + fmt::Debug,
	S: BuildHasher,
	I: IntoIterator<Item = R>,
	F: FnMut(&R) -> Option<K>,
{
	let span = trace_span!("reconcile", rendered = current.len());
	let _enter = span.enter();

	let mut seen = HashSet::new();
	let mut enter = Vec::new();
	let mut update = Vec::new();
	for (index, record) in records.into_iter().enumerate() {
		let key = key_of(&record).ok_or(KeyError::Missing { index })?;
		if !seen.insert(key.clone()) {
			return Err(KeyError::Duplicate { key });
		}
		if current.contains_key(&key) {
			update.push((key, record));
		} else {
			enter.push((key, record));
		}
	}
	let exit: Vec<K> = current.keys().filter(|key| !seen.contains(*key)).cloned().collect();

	trace!("partitioned: {} enter, {} update, {} exit", enter.len(), update.len(), exit.len());
	Ok(Partition { enter, update, exit })
}
