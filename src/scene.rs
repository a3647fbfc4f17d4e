use crate::{
	diff::{reconcile, KeyError, Partition},
	keyed_set::KeyedSet,
};
use core::{fmt, hash::Hash};
use thiserror::Error;
use tracing::{error, info, trace_span, warn};

/// Owns the currently rendered keyed element set of one chart.
///
/// The scene is an explicit value, one instance per chart, passed by reference to whatever
/// drives the updates. Nothing lives in module-level state, so several charts on one page
/// cannot collide.
///
/// There is exactly one logical writer per scene: the caller's event-driven update sequence.
/// The set is only ever mutated by [`apply`](`Scene::apply`).
#[derive(Debug)]
pub struct Scene<K, E>
where
	K: Hash + Eq,
{
	elements: KeyedSet<K, E>,
}

impl<K, E> Default for Scene<K, E>
where
	K: Hash + Eq,
{
	fn default() -> Self {
		Self { elements: KeyedSet::new() }
	}
}

/// Which apply phase a callback failed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyPhase {
	Enter,
	Update,
	Exit,
}

impl fmt::Display for ApplyPhase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			ApplyPhase::Enter => "enter",
			ApplyPhase::Update => "update",
			ApplyPhase::Exit => "exit",
		})
	}
}

/// A caller-supplied apply callback failed.
///
/// The remaining apply loop was aborted, but mutations applied before the failure stay in
/// place: partial visual updates are an accepted, documented outcome, not rolled back.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{phase} callback failed: {error}")]
pub struct ApplyError<X>
where
	X: fmt::Debug + fmt::Display,
{
	pub phase: ApplyPhase,
	pub error: X,
}

/// Failure of a combined reconcile-then-apply pass.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UpdateError<K, X>
where
	K: fmt::Debug,
	X: fmt::Debug + fmt::Display,
{
	/// Key extraction failed; the scene is untouched.
	#[error("{0}")]
	Key(KeyError<K>),
	/// An apply callback failed; the scene keeps the partially applied state.
	#[error("{0}")]
	Apply(ApplyError<X>),
}

impl<K, X> From<KeyError<K>> for UpdateError<K, X>
where
	K: fmt::Debug,
	X: fmt::Debug + fmt::Display,
{
	fn from(error: KeyError<K>) -> Self {
		UpdateError::Key(error)
	}
}

impl<K, X> From<ApplyError<X>> for UpdateError<K, X>
where
	K: fmt::Debug,
	X: fmt::Debug + fmt::Display,
{
	fn from(error: ApplyError<X>) -> Self {
		UpdateError::Apply(error)
	}
}

impl<K, E> Scene<K, E>
where
	K: Hash + Eq + Clone + fmt::Debug,
{
	#[must_use]
	pub fn new() -> Self {
		Self { elements: KeyedSet::new() }
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.elements.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	/// The currently rendered keyed element set.
	#[must_use]
	pub fn elements(&self) -> &KeyedSet<K, E> {
		&self.elements
	}

	/// Releases the rendered set, consuming the scene.
	#[must_use]
	pub fn into_elements(self) -> KeyedSet<K, E> {
		self.elements
	}

	/// Partitions `records` against this scene's rendered set. See [`reconcile`].
	///
	/// # Errors
	///
	/// [`KeyError`] as for [`reconcile`]; the scene is untouched either way.
	pub fn reconcile<R, I, F>(&self, records: I, key_of: F) -> Result<Partition<K, R>, KeyError<K>>
	where
		I: IntoIterator<Item = R>,
		F: FnMut(&R) -> Option<K>,
	{
		reconcile(&self.elements, records, key_of)
	}

	/// Applies a partition to the rendered set through the caller's three callbacks, in the
	/// order enter, update, exit.
	///
	/// - `enter_fn` materializes a new element for a record; the element is inserted under its key.
	/// - `update_fn` mutates the existing element in place. The element identity carried into the
	///   resulting set is the same one that was already rendered.
	/// - `exit_fn` receives the removed element by value; ownership is released to the callback.
	///
	/// The scene holds no rendering state itself: all side effects happen inside the callbacks,
	/// which may address whatever scene graph the caller renders to, or schedule
	/// [`Transitions`](`crate::transition::Transitions`) of bounded duration.
	///
	/// # Errors
	///
	/// [`ApplyError`] as soon as a callback fails. The remaining loop is aborted and
	/// already-applied mutations stay in place (best-effort partial application).
	pub fn apply<R, X, FE, FU, FX>(&mut self, partition: Partition<K, R>, mut enter_fn: FE, mut update_fn: FU, mut exit_fn: FX) -> Result<(), ApplyError<X>>
	where
		X: fmt::Debug + fmt::Display,
		FE: FnMut(&K, &R) -> Result<E, X>,
		FU: FnMut(&K, &mut E, &R) -> Result<(), X>,
		FX: FnMut(K, E) -> Result<(), X>,
	{
		let span = trace_span!("apply", enter = partition.enter.len(), update = partition.update.len(), exit = partition.exit.len());
		let _enter = span.enter();

		let Partition { enter, update, exit } = partition;

		for (key, record) in enter {
			let element = enter_fn(&key, &record).map_err(|error| ApplyError { phase: ApplyPhase::Enter, error })?;
			let displaced = self.elements.insert(key, element);
			debug_assert!(displaced.is_none(), "entering key was already present in the scene");
		}

		for (key, record) in update {
			match self.elements.get_mut(&key) {
				Some(element) => update_fn(&key, element, &record).map_err(|error| ApplyError { phase: ApplyPhase::Update, error })?,
				None => error!("Expected to update key {:?} missing from the scene. Skipping.", key),
			}
		}

		for key in exit {
			match self.elements.remove(&key) {
				Some(element) => exit_fn(key, element).map_err(|error| ApplyError { phase: ApplyPhase::Exit, error })?,
				None => error!("Expected to remove key {:?} missing from the scene. Skipping.", key),
			}
		}

		Ok(())
	}

	/// The reconcile-then-apply convenience: one data change, one pass.
	///
	/// A new pass may begin while transitions scheduled by an earlier one are still in flight;
	/// the later pass's attribute targets silently supersede the earlier ones per element
	/// (last-writer-wins, see [`Transitions::schedule`](`crate::transition::Transitions::schedule`)).
	///
	/// # Errors
	///
	/// [`UpdateError::Key`] leaves the scene untouched; [`UpdateError::Apply`] leaves the
	/// partially applied state in place.
	pub fn update<R, X, I, F, FE, FU, FX>(&mut self, records: I, key_of: F, enter_fn: FE, update_fn: FU, exit_fn: FX) -> Result<(), UpdateError<K, X>>
	where
		X: fmt::Debug + fmt::Display,
		I: IntoIterator<Item = R>,
		F: FnMut(&R) -> Option<K>,
		FE: FnMut(&K, &R) -> Result<E, X>,
		FU: FnMut(&K, &mut E, &R) -> Result<(), X>,
		FX: FnMut(K, E) -> Result<(), X>,
	{
		let partition = self.reconcile(records, key_of)?;

		let (entered, updated, exited) = (partition.enter.len(), partition.update.len(), partition.exit.len());
		if exited > entered + updated {
			warn!(
				"More elements exit ({}) than remain ({}) in this pass.\n\
				This may point to an unstable key function.",
				exited,
				entered + updated
			);
		}

		self.apply(partition, enter_fn, update_fn, exit_fn)?;
		info!("Scene updated: {} entered, {} updated, {} exited; {} rendered.", entered, updated, exited, self.elements.len());
		Ok(())
	}
}
