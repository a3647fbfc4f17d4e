use keyed_scene::{reconcile, KeyedSet, Scene};

fn init_tracing() {
	static INIT: std::sync::Once = std::sync::Once::new();
	INIT.call_once(|| {
		let _ = tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).with_test_writer().try_init();
	});
}

#[derive(Debug, PartialEq)]
struct Production {
	year: u16,
	tonnes: f64,
}

fn production(year: u16, tonnes: f64) -> Production {
	Production { year, tonnes }
}

#[derive(Debug, PartialEq)]
struct Circle {
	id: usize,
	value: f64,
}

#[test]
fn first_render_enters_everything() {
	init_tracing();

	let mut scene: Scene<u16, Circle> = Scene::new();
	let records = vec![production(1998, 1.0), production(1999, 2.0)];

	let partition = scene.reconcile(records.iter(), |record| Some(record.year)).unwrap();
	assert_eq!(partition.enter.len(), 2);
	assert!(partition.update.is_empty());
	assert!(partition.exit.is_empty());
	assert!(!partition.is_steady());

	let mut next_id = 0;
	scene
		.apply::<_, Never, _, _, _>(
			partition,
			|_, record| {
				next_id += 1;
				Ok(Circle { id: next_id, value: record.tonnes })
			},
			|_, _, _| Ok(()),
			|_, _| Ok(()),
		)
		.unwrap();

	assert_eq!(scene.len(), 2);
	assert_eq!(scene.elements().keys().copied().collect::<Vec<_>>(), [1998, 1999]);
	assert_eq!(scene.elements().get(&1998), Some(&Circle { id: 1, value: 1.0 }));
	assert_eq!(scene.elements().get(&1999), Some(&Circle { id: 2, value: 2.0 }));
}

#[test]
fn partition_covers_old_and_new_exactly() {
	init_tracing();

	let mut current: KeyedSet<u16, &str> = KeyedSet::new();
	current.insert(1997, "a");
	current.insert(1998, "b");
	current.insert(1999, "c");

	let records = vec![production(1999, 5.0), production(1998, 4.0), production(2000, 3.0)];
	let partition = reconcile(&current, records.iter(), |record| Some(record.year)).unwrap();

	// Enter ∪ Update covers the records exactly, in record order.
	let entered: Vec<u16> = partition.enter.iter().map(|(key, _)| *key).collect();
	let updated: Vec<u16> = partition.update.iter().map(|(key, _)| *key).collect();
	assert_eq!(entered, [2000]);
	assert_eq!(updated, [1999, 1998]);

	// Update ∪ Exit covers the prior set exactly; exit follows its insertion order.
	assert_eq!(partition.exit, [1997]);

	// No key appears in more than one group.
	let mut all: Vec<u16> = entered.iter().chain(&updated).chain(&partition.exit).copied().collect();
	all.sort_unstable();
	all.dedup();
	assert_eq!(all.len(), 4);
}

#[test]
fn empty_records_exit_everything_in_insertion_order() {
	init_tracing();

	let mut scene: Scene<u16, &str> = Scene::new();
	let initial = [1998_u16, 1999, 2000];
	scene
		.update::<_, Never, _, _, _, _, _>(initial.iter(), |year| Some(**year), |_, _| Ok("point"), |_, _, _| Ok(()), |_, _| Ok(()))
		.unwrap();

	let mut exited = Vec::new();
	scene
		.update::<&Production, Never, _, _, _, _, _>(
			Vec::new(),
			|record| Some(record.year),
			|_, _| Ok("point"),
			|_, _, _| Ok(()),
			|year, _| {
				exited.push(year);
				Ok(())
			},
		)
		.unwrap();

	assert!(scene.is_empty());
	assert_eq!(exited, [1998, 1999, 2000]);
}

/// Stand-in for callbacks that cannot fail.
type Never = core::convert::Infallible;
