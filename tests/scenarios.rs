//! End-to-end trip scenarios.

use trip_lifecycle::{
    Action, Checkpoint, CheckpointError, MachineConfig, State, TripMachineBuilder, TripState,
    TripStateMachine,
};

fn drive(machine: &mut TripStateMachine, steps: &[(&str, &str, bool)]) {
    for (label, expected_state, expected_accepted) in steps {
        let result = machine.dispatch(*label);
        assert_eq!(
            result.as_pair(),
            (*expected_state, *expected_accepted),
            "dispatching '{label}'"
        );
        assert_eq!(machine.current_state_name(), *expected_state);
    }
}

#[test]
fn completed_trip_then_reset() {
    let mut machine = TripStateMachine::new();
    assert_eq!(machine.current_state_name(), "Idle");

    drive(
        &mut machine,
        &[
            ("select_car", "CarSelected", true),
            ("confirm_order", "OrderConfirmed", true),
            ("car_arrived", "CarArrived", true),
            ("start_trip", "InTrip", true),
            ("complete_trip", "TripCompleted", true),
            ("rate_driver", "Idle", true),
        ],
    );

    let stats = machine.stats();
    assert_eq!(stats.accepted, 6);
    assert_eq!(stats.completed_trips, 1);
    assert_eq!(
        machine.history().path(),
        vec![
            TripState::Idle,
            TripState::CarSelected,
            TripState::OrderConfirmed,
            TripState::CarArrived,
            TripState::InTrip,
            TripState::TripCompleted,
            TripState::Idle,
        ]
    );
}

#[test]
fn cancelled_trip_then_reset() {
    let mut machine = TripStateMachine::new();
    drive(
        &mut machine,
        &[
            ("select_car", "CarSelected", true),
            ("cancel", "TripCancelled", true),
            ("select_car", "Idle", true),
        ],
    );
    assert_eq!(machine.stats().cancelled_trips, 1);
}

#[test]
fn confirm_before_selecting_is_rejected() {
    let mut machine = TripStateMachine::new();
    let result = machine.dispatch("confirm_order");

    assert!(!result.is_accepted());
    assert_eq!(result.state(), TripState::Idle);
    assert_eq!(result.notice(), "Invalid action in Idle state.");
}

#[test]
fn cancel_is_available_until_the_trip_ends() {
    let path = ["select_car", "confirm_order", "car_arrived", "start_trip"];

    for depth in 1..=path.len() {
        let mut machine = TripStateMachine::new();
        for label in &path[..depth] {
            machine.dispatch(*label);
        }

        assert!(machine.can_dispatch(&Action::Cancel));
        assert_eq!(machine.dispatch(Action::Cancel).state(), TripState::TripCancelled);
    }

    let mut idle = TripStateMachine::new();
    assert!(!idle.dispatch(Action::Cancel).is_accepted());
}

#[test]
fn one_machine_serves_consecutive_trips() {
    let mut machine = TripStateMachine::new();

    for _ in 0..3 {
        drive(
            &mut machine,
            &[
                ("select_car", "CarSelected", true),
                ("confirm_order", "OrderConfirmed", true),
                ("start_trip", "OrderConfirmed", false),
                ("car_arrived", "CarArrived", true),
                ("start_trip", "InTrip", true),
                ("complete_trip", "TripCompleted", true),
                ("next", "Idle", true),
            ],
        );
    }

    let stats = machine.stats();
    assert_eq!(stats.completed_trips, 3);
    assert_eq!(stats.rejected, 3);
    assert_eq!(stats.accepted, 18);
}

#[test]
fn every_state_name_is_canonical() {
    for state in TripState::ALL {
        let machine = TripStateMachine::with_initial(*state);
        assert_eq!(machine.current_state_name(), state.name());
        assert_eq!(machine.current_state_name(), format!("{state:?}"));
    }
}

#[test]
fn config_file_drives_machine_construction() {
    let path = std::env::temp_dir().join(format!("trip-config-{}.json", uuid::Uuid::new_v4()));
    std::fs::write(
        &path,
        r#"{ "initial_state": "CarArrived", "history_limit": 2 }"#,
    )
    .unwrap();

    let config = MachineConfig::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let mut machine = config.into_machine().unwrap();
    drive(
        &mut machine,
        &[
            ("start_trip", "InTrip", true),
            ("complete_trip", "TripCompleted", true),
            ("done", "Idle", true),
        ],
    );
    assert_eq!(machine.history().len(), 2);
    assert_eq!(machine.history().evicted(), 1);
}

#[test]
fn trip_survives_a_checkpoint() {
    let mut machine = TripMachineBuilder::new().build().unwrap();
    drive(
        &mut machine,
        &[
            ("select_car", "CarSelected", true),
            ("confirm_order", "OrderConfirmed", true),
        ],
    );

    let json = machine.checkpoint().to_json().unwrap();
    drop(machine);

    let mut resumed = TripStateMachine::resume(Checkpoint::from_json(&json).unwrap()).unwrap();
    drive(
        &mut resumed,
        &[
            ("car_arrived", "CarArrived", true),
            ("cancel", "TripCancelled", true),
        ],
    );
    assert_eq!(resumed.history().len(), 4);
    assert_eq!(resumed.stats().cancelled_trips, 1);
}

#[test]
fn forged_checkpoint_does_not_resume() {
    let mut machine = TripStateMachine::new();
    machine.dispatch("select_car");

    let mut value: serde_json::Value =
        serde_json::from_str(&machine.checkpoint().to_json().unwrap()).unwrap();
    value["history"]["records"][0]["to"] = "InTrip".into();
    value["history"]["limit"] = 0.into();
    value["current_state"] = "InTrip".into();

    let forged = Checkpoint::from_json(&value.to_string()).unwrap();
    assert!(matches!(
        TripStateMachine::resume(forged),
        Err(CheckpointError::Inconsistent(_))
    ));
}

#[test]
fn wrapped_cancel_ends_the_trip() {
    let mut machine = TripStateMachine::with_initial(TripState::CarSelected);
    let result = machine.dispatch(Action::Other("cancel".to_string()));
    assert_eq!(result.as_pair(), ("TripCancelled", true));

    let json = machine.checkpoint().to_json().unwrap();
    assert!(!json.contains("other"));
    let resumed = TripStateMachine::resume(Checkpoint::from_json(&json).unwrap()).unwrap();
    assert_eq!(resumed.history().last().map(|r| &r.action), Some(&Action::Cancel));
}
