#![doc(html_root_url = "https://docs.rs/keyed-scene/0.1.0")]
#![warn(clippy::pedantic)]

//! A keyed scene reconciler for data-driven visuals.
//!
//! Given the currently rendered keyed element set and a new sequence of records,
//! [`reconcile`](`diff::reconcile`) computes which elements enter, which persist and are
//! re-bound, and which exit, and [`Scene::apply`](`scene::Scene::apply`) carries the
//! partition out through caller-supplied callbacks while preserving element identity.
//! Everything that actually draws, projects or styles stays on the caller's side of those
//! callbacks.

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod chart;
pub mod diff;
pub mod keyed_set;
pub mod load;
pub mod scene;
pub mod transition;

pub use chart::{CategoryFilter, ZoomTransform};
pub use diff::{reconcile, KeyError, Partition};
pub use keyed_set::KeyedSet;
pub use load::LoadError;
pub use scene::{ApplyError, ApplyPhase, Scene, UpdateError};
pub use transition::{Easing, Interpolate, Phase, Transitions};
