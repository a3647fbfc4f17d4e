use core::time::Duration;
use keyed_scene::{Easing, Phase, Transitions};

#[test]
fn linear_transition_runs_to_completion_at_the_exact_target() {
	let mut transitions: Transitions<&str, f64> = Transitions::new();
	transitions.schedule("radius", 3.0, 10.0, Duration::from_millis(100), Easing::Linear);

	let mut frames = Vec::new();
	transitions.advance(Duration::from_millis(50), |key, value, phase| frames.push((*key, value, phase)));
	assert_eq!(frames, [("radius", 6.5, Phase::Running)]);
	assert!(transitions.is_active("radius"));

	frames.clear();
	transitions.advance(Duration::from_millis(50), |key, value, phase| frames.push((*key, value, phase)));
	assert_eq!(frames, [("radius", 10.0, Phase::Done)]);
	assert!(!transitions.is_active("radius"));
	assert_eq!(transitions.active_len(), 0);

	// Nothing left to emit.
	frames.clear();
	transitions.advance(Duration::from_millis(50), |key, value, phase| frames.push((*key, value, phase)));
	assert!(frames.is_empty());
}

#[test]
fn superseding_schedule_replaces_the_in_flight_transition() {
	let mut transitions: Transitions<u16, f64> = Transitions::new();
	transitions.schedule(1999, 0.0, 100.0, Duration::from_secs(1), Easing::Linear);
	transitions.advance(Duration::from_millis(250), |_, _, _| {});

	// Last writer wins: the new target replaces the old one outright, the old target is
	// reported back so the caller can snap to it if it wants.
	let superseded = transitions.schedule(1999, 25.0, 0.0, Duration::from_secs(1), Easing::Linear);
	assert_eq!(superseded, Some(100.0));
	assert_eq!(transitions.active_len(), 1);

	let mut last = None;
	transitions.advance(Duration::from_millis(500), |_, value, phase| last = Some((value, phase)));
	assert_eq!(last, Some((12.5, Phase::Running)));
}

#[test]
fn zero_duration_completes_on_the_next_advance() {
	let mut transitions: Transitions<&str, f64> = Transitions::new();
	transitions.schedule("opacity", 1.0, 0.0, Duration::ZERO, Easing::CubicInOut);

	let mut frames = Vec::new();
	transitions.advance(Duration::ZERO, |key, value, phase| frames.push((*key, value, phase)));
	assert_eq!(frames, [("opacity", 0.0, Phase::Done)]);
}

#[test]
fn cancel_drops_the_transition_without_a_frame() {
	let mut transitions: Transitions<&str, [f64; 2]> = Transitions::new();
	transitions.schedule("position", [0.0, 0.0], [10.0, 20.0], Duration::from_secs(1), Easing::Linear);

	assert_eq!(transitions.cancel("position"), Some([10.0, 20.0]));
	assert_eq!(transitions.cancel("position"), None);

	let mut frames = 0;
	transitions.advance(Duration::from_secs(1), |_, _: [f64; 2], _| frames += 1);
	assert_eq!(frames, 0);
}

#[test]
fn cubic_easing_is_slow_at_the_edges() {
	let mut transitions: Transitions<&str, f64> = Transitions::new();
	transitions.schedule("y", 0.0, 1.0, Duration::from_secs(1), Easing::CubicInOut);

	let mut early = 0.0;
	transitions.advance(Duration::from_millis(100), |_, value, _| early = value);
	// Eased progress lags raw progress near t = 0.
	assert!(early < 0.1);
	assert!((early - 0.004).abs() < 1e-9);
}
