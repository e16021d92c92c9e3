//! Trip Lifecycle
//!
//! Replays a full ride: select a car, confirm, wait for the car, ride,
//! finish, then start over with a cancelled trip. Each dispatch prints the
//! resulting state; set `RUST_LOG=trip_lifecycle=debug` to see the
//! machine's own events.
//!
//! Run with: cargo run --example trip_lifecycle

use tracing_subscriber::EnvFilter;
use trip_lifecycle::TripStateMachine;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Trip Lifecycle ===\n");

    let mut machine = TripStateMachine::new();
    println!("Current state: {}", machine.current_state_name());

    for label in [
        "select_car",
        "confirm_order",
        "car_arrived",
        "start_trip",
        "complete_trip",
        "select_car",
        "select_car",
        "start_trip",
        "cancel",
        "select_car",
    ] {
        let result = machine.dispatch(label);
        println!("{label:>14} -> {}", result.notice());
        println!("Current state: {}", machine.current_state_name());
    }

    let stats = machine.stats();
    println!(
        "\n{} accepted, {} rejected, {} completed, {} cancelled",
        stats.accepted, stats.rejected, stats.completed_trips, stats.cancelled_trips
    );

    println!("\n=== Example Complete ===");
}
