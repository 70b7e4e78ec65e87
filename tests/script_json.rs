use svg_choreo::{Position, Repeat, Script, Step, Timeline};

#[test]
fn fixture_builds_expected_schedule() {
    let script = Script::from_json(include_str!("data/stage_sequence.json")).unwrap();
    assert_eq!(script.steps.len(), 5);
    assert!(matches!(
        &script.steps[1],
        Step::MoveAlong { position: Position::WithPrevious(x), .. } if *x == 0.0
    ));

    let mut tl = Timeline::new();
    script.apply(&mut tl);
    assert_eq!(tl.len(), 7);

    let starts: Vec<f64> = tl.schedule().iter().map(|s| s.start).collect();
    // door 0..1, cart 0..3, lights from 3 every 0.5s (0.25s each), spin after 4.25
    assert_eq!(starts, vec![0.0, 0.0, 3.0, 3.5, 4.0, 4.25, 6.25]);
    assert_eq!(tl.segments()[5].repeat, Repeat::Forever);
    assert_eq!(tl.segments()[6].vars["attr"]["viewBox"], "0 0 400 300");
}

#[test]
fn script_round_trips_through_json() {
    let script = Script::from_json(include_str!("data/stage_sequence.json")).unwrap();
    let json = serde_json::to_string(&script).unwrap();
    assert_eq!(Script::from_json(&json).unwrap(), script);
}
