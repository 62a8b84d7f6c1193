use eframe_wheel::animation::SpinRequest;
use eframe_wheel::{EntryList, SpinController, SpinState, WheelEvent, resolve};
use std::time::Duration;

const FRAME: f64 = 1.0 / 60.0;

// Run frames until the controller goes idle, collecting every event
fn run_to_completion(controller: &mut SpinController, start: f64) -> Vec<WheelEvent> {
    let mut events = controller.drain_events();
    let mut now = start;
    while controller.is_spinning() {
        controller.advance(now);
        events.extend(controller.drain_events());
        now += FRAME;
    }
    events
}

fn winners(events: &[WheelEvent]) -> Vec<(usize, String)> {
    events
        .iter()
        .filter_map(|event| match event {
            WheelEvent::Winner { index, entry } => Some((*index, entry.name.clone())),
            _ => None,
        })
        .collect()
}

#[test]
fn test_snapshot_isolation_against_live_deletion() {
    let mut entries = EntryList::from_names(["A", "B", "C"]);
    let mut controller = SpinController::with_seed(Duration::from_millis(500), 11);
    let request = SpinRequest {
        turns: 5.0,
        offset_degrees: 130.0,
    };
    assert!(controller.request_spin_with(entries.entries(), request));

    controller.advance(0.0);
    controller.advance(0.1);
    let b = entries.entries()[1].id;
    entries.remove(b);
    assert_eq!(entries.len(), 2);

    let SpinState::Spinning(spin) = controller.state() else {
        panic!("spin should still be in flight");
    };
    assert_eq!(spin.snapshot().len(), 3);
    assert_eq!(spin.snapshot().get(1).map(|e| e.name.as_str()), Some("B"));
    assert_eq!(spin.target(), 1800.0 + 130.0);

    let events = run_to_completion(&mut controller, 0.2);
    let expected = resolve(1800.0 + 130.0, 3);
    assert_eq!(expected, 1);
    assert_eq!(winners(&events), vec![(1, "B".to_owned())]);
}

#[test]
fn test_single_flight_yields_one_winner() {
    let entries = EntryList::default();
    let mut controller = SpinController::with_seed(Duration::from_millis(300), 2);
    assert!(controller.request_spin(entries.entries()));
    assert!(!controller.request_spin(entries.entries()));

    controller.advance(0.0);
    controller.advance(0.1);
    assert!(!controller.request_spin(entries.entries()));

    let events = run_to_completion(&mut controller, 0.2);
    assert_eq!(winners(&events).len(), 1);
    let starts = events
        .iter()
        .filter(|e| matches!(e, WheelEvent::SpinStarted { .. }))
        .count();
    assert_eq!(starts, 1);
}

#[test]
fn test_idle_after_winner_and_next_spin_accepted() {
    let entries = EntryList::default();
    let mut controller = SpinController::with_seed(Duration::from_millis(200), 4);
    controller.request_spin(entries.entries());
    let events = run_to_completion(&mut controller, 0.0);

    assert_eq!(winners(&events).len(), 1);
    assert!(controller.state().is_idle());
    let first_total = controller.rotation();

    assert!(controller.request_spin(entries.entries()));
    run_to_completion(&mut controller, 10.0);
    assert!(controller.rotation() >= first_total + 1800.0);
}

#[test]
fn test_rotation_never_decreases_during_spin() {
    let entries = EntryList::from_names(["A", "B", "C", "D", "E", "F", "G"]);
    let mut controller = SpinController::with_seed(Duration::from_millis(1000), 8);
    controller.request_spin(entries.entries());
    let mut previous = controller.rotation();
    let mut now = 0.0;
    while controller.is_spinning() {
        controller.advance(now);
        assert!(controller.rotation() >= previous);
        previous = controller.rotation();
        now += 0.007;
    }
}

#[test]
fn test_winner_matches_resolver_for_target() {
    let entries = EntryList::from_names(["A", "B", "C", "D", "E"]);
    for seed in 0..20 {
        let mut controller = SpinController::with_seed(Duration::from_millis(100), seed);
        controller.request_spin(entries.entries());
        let events = run_to_completion(&mut controller, 0.0);
        let (index, name) = winners(&events).pop().expect("one winner");
        assert_eq!(index, resolve(controller.rotation(), entries.len()));
        assert_eq!(name, entries.entries()[index].name);
    }
}

#[test]
fn test_cancelled_spin_never_reports_winner() {
    let entries = EntryList::default();
    let mut controller = SpinController::with_seed(Duration::from_millis(400), 6);
    controller.request_spin(entries.entries());
    controller.advance(0.0);
    controller.advance(0.2);
    controller.cancel();

    controller.advance(5.0);
    assert!(winners(&controller.drain_events()).is_empty());
    assert!(controller.state().is_idle());
}

#[test]
fn test_ticks_stay_within_snapshot_segments() {
    let mut entries = EntryList::from_names(["A", "B", "C", "D", "E", "F"]);
    let mut controller = SpinController::with_seed(Duration::from_millis(800), 12);
    controller.request_spin(entries.entries());
    controller.advance(0.0);
    entries.clear();

    let events = run_to_completion(&mut controller, FRAME);
    let ticks: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            WheelEvent::SegmentTick { segment } => Some(*segment),
            _ => None,
        })
        .collect();
    assert!(!ticks.is_empty());
    assert!(ticks.iter().all(|&segment| segment < 6));
    assert_eq!(winners(&events).len(), 1);
}
