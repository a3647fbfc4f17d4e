use core::{
	borrow::Borrow,
	hash::Hash,
	time::Duration,
};
use hashbrown::HashMap;
use num_traits::Float;
use tracing::{trace, trace_span};

/// Attribute values that can be interpolated between two endpoints.
///
/// `t` is the eased progress in `0.0..=1.0`.
pub trait Interpolate {
	#[must_use]
	fn lerp(&self, to: &Self, t: f64) -> Self;
}

fn lerp_float<F: Float>(from: F, to: F, t: f64) -> F {
	from + (to - from) * F::from(t).unwrap_or_else(F::zero)
}

macro_rules! interpolate_float {
	($($float:ty),*) => {$(
		impl Interpolate for $float {
			fn lerp(&self, to: &Self, t: f64) -> Self {
				lerp_float(*self, *to, t)
			}
		}
	)*};
}
interpolate_float!(f32, f64);

/// Componentwise, for positions and the like.
impl<V: Interpolate> Interpolate for [V; 2] {
	fn lerp(&self, to: &Self, t: f64) -> Self {
		[self[0].lerp(&to[0], t), self[1].lerp(&to[1], t)]
	}
}

/// How raw progress maps to eased progress. Cubic in-out by default, the conventional
/// easing for chart transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
	Linear,
	#[default]
	CubicInOut,
}

impl Easing {
	#[must_use]
	pub fn apply(self, t: f64) -> f64 {
		match self {
			Easing::Linear => t,
			Easing::CubicInOut => {
				let t = t * 2.0;
				if t <= 1.0 {
					t * t * t / 2.0
				} else {
					let t = t - 2.0;
					(t * t * t + 2.0) / 2.0
				}
			}
		}
	}
}

/// Whether an emitted value is an intermediate frame or the exact target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	Running,
	Done,
}

#[derive(Debug)]
struct Scheduled<V> {
	from: V,
	to: V,
	duration: Duration,
	elapsed: Duration,
	easing: Easing,
}

/// Time-bounded attribute transitions, keyed by element key.
///
/// Scheduling under a key that already has an in-flight transition replaces it, so a
/// superseding update replaces rather than races the earlier animation (last-writer-wins,
/// made explicit instead of relying on a host scheduler's default).
///
/// Frames are caller-driven through [`advance`](`Transitions::advance`): once scheduled, a
/// transition runs to completion across however many frames the caller grants it, without
/// blocking anyone. There is no timer thread.
#[derive(Debug)]
pub struct Transitions<K, V>
where
	K: Hash + Eq,
{
	active: HashMap<K, Scheduled<V>>,
}

impl<K, V> Default for Transitions<K, V>
where
	K: Hash + Eq,
{
	fn default() -> Self {
		Self { active: HashMap::new() }
	}
}

impl<K, V> Transitions<K, V>
where
	K: Hash + Eq,
	V: Interpolate + Clone,
{
	#[must_use]
	pub fn new() -> Self {
		Self { active: HashMap::new() }
	}

	#[must_use]
	pub fn active_len(&self) -> usize {
		self.active.len()
	}

	#[must_use]
	pub fn is_active<Q: ?Sized>(&self, key: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: Hash + Eq,
	{
		self.active.contains_key(key)
	}

	/// Schedules an interpolation of bounded `duration` under `key`, returning the superseded
	/// in-flight transition's target value if there was one.
	///
	/// A zero `duration` completes on the next [`advance`](`Transitions::advance`), emitting
	/// the target once.
	pub fn schedule(&mut self, key: K, from: V, to: V, duration: Duration, easing: Easing) -> Option<V> {
		let superseded = self.active.insert(
			key,
			Scheduled {
				from,
				to,
				duration,
				elapsed: Duration::ZERO,
				easing,
			},
		);
		if superseded.is_some() {
			trace!("Superseding an in-flight transition.");
		}
		superseded.map(|scheduled| scheduled.to)
	}

	/// Cancels the in-flight transition under `key`, if any, returning its target value.
	/// No frame is emitted for a cancelled transition.
	pub fn cancel<Q: ?Sized>(&mut self, key: &Q) -> Option<V>
	where
		K: Borrow<Q>,
		Q: Hash + Eq,
	{
		self.active.remove(key).map(|scheduled| scheduled.to)
	}

	/// Advances every in-flight transition by `dt` and emits one interpolated value per
	/// transition. A transition whose time is up emits exactly once more, at the exact target
	/// value with [`Phase::Done`], and is dropped from the schedule.
	pub fn advance<F>(&mut self, dt: Duration, mut emit: F)
	where
		F: FnMut(&K, V, Phase),
	{
		let span = trace_span!("advance", active = self.active.len());
		let _enter = span.enter();

		self.active.retain(|key, scheduled| {
			scheduled.elapsed += dt;
			if scheduled.elapsed >= scheduled.duration {
				emit(key, scheduled.to.clone(), Phase::Done);
				false
			} else {
				let t = scheduled.elapsed.as_secs_f64() / scheduled.duration.as_secs_f64();
				emit(key, scheduled.from.lerp(&scheduled.to, scheduled.easing.apply(t)), Phase::Running);
				true
			}
		});
	}
}
