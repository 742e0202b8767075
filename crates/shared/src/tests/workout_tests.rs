use super::*;
use chrono::Datelike;

const LONDON: Coordinate = Coordinate::new(51.5, -0.1);

#[test]
fn running_pace_is_duration_over_distance() {
    let workout = create_workout(WorkoutType::Running, LONDON, 5.0, 30.0, 150.0);

    assert_eq!(workout.workout_type(), WorkoutType::Running);
    assert_eq!(workout.pace(), Some(6.0));
    assert_eq!(workout.speed(), None);
    assert_eq!(
        *workout.kind(),
        WorkoutKind::Running {
            cadence: 150.0,
            pace: 6.0
        }
    );
}

#[test]
fn cycling_speed_divides_by_duration_and_sixty() {
    let workout = create_workout(WorkoutType::Cycling, LONDON, 20.0, 60.0, 400.0);

    assert_eq!(workout.workout_type(), WorkoutType::Cycling);
    assert_eq!(workout.speed(), Some(20.0 / 60.0 / 60.0));
    assert_eq!(workout.pace(), None);
    match workout.kind() {
        WorkoutKind::Cycling { elevation_gain, .. } => assert_eq!(*elevation_gain, 400.0),
        other => panic!("expected cycling, got {other:?}"),
    }
}

#[test]
fn derived_metrics_match_formulas_for_uneven_inputs() {
    for (distance, duration) in [(0.3, 7.0), (42.195, 181.5), (1e-3, 1e3), (7.7, 0.9)] {
        let run = Workout::running(LONDON, distance, duration, 170.0);
        let ride = Workout::cycling(LONDON, distance, duration, 0.0);
        assert_eq!(run.pace(), Some(duration / distance));
        assert_eq!(ride.speed(), Some(distance / duration / 60.0));
    }
}

#[test]
fn common_fields_are_kept_as_given() {
    let workout = Workout::cycling(LONDON, 12.5, 40.0, 0.0);

    assert_eq!(workout.coordinate(), LONDON);
    assert_eq!(workout.distance(), 12.5);
    assert_eq!(workout.duration(), 40.0);
}

#[test]
fn every_workout_gets_its_own_id() {
    let first = Workout::running(LONDON, 5.0, 30.0, 150.0);
    let second = Workout::running(LONDON, 5.0, 30.0, 150.0);

    assert_ne!(first.id(), second.id());
    assert!(second.created_at() >= first.created_at());
}

#[test]
fn description_names_type_and_creation_date() {
    let workout = Workout::running(LONDON, 5.0, 30.0, 150.0);
    let created = workout.created_at();
    let month = created.format("%B").to_string();

    assert_eq!(
        workout.description(),
        format!("Running on {month} {}", created.day())
    );
    assert!(Workout::cycling(LONDON, 1.0, 1.0, 0.0)
        .description()
        .starts_with("Cycling on "));
}

#[test]
fn serialized_workout_carries_type_tag_and_metric() {
    let workout = Workout::running(LONDON, 5.0, 30.0, 150.0);
    let value = serde_json::to_value(&workout).expect("serialize");

    assert_eq!(value["type"], "running");
    assert_eq!(value["pace"], 6.0);
    assert_eq!(value["coordinate"]["lat"], 51.5);

    let restored: Workout = serde_json::from_value(value).expect("deserialize");
    assert_eq!(restored, workout);
}
