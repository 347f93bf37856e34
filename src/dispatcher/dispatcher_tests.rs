/*
 * Unit tests for dispatcher module
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 *  - test_dispatcher_init
 *  - test_dispatcher_caps_initial_floors
 *  - test_direct_request_goes_to_closest_elevator
 *  - test_tie_goes_to_lowest_index
 *  - test_pickup_dropoff_scenario
 *  - test_pickup_scoring_discounts_dropoff_leg
 *  - test_invalid_requests_never_queued
 *  - test_same_floor_pickup_is_ignored
 *  - test_boundary_errors
 *  - test_history_of_unused_elevator_is_empty
 *  - test_concurrent_submissions
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod dispatcher_tests {
    use crate::config::{Config, ElevatorConfig, FleetConfig};
    use crate::dispatcher::{DispatchError, Dispatcher};
    use crate::elevator::{ElevatorEvent, ScheduledStop};
    use crate::shared::Direction::{Stationary, Up};
    use crate::shared::Request;
    use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError};
    use std::thread;
    use std::time::Duration;

    fn test_config(n_elevators: usize) -> Config {
        Config {
            fleet: FleetConfig {
                n_elevators,
                n_floors: 20,
            },
            elevator: ElevatorConfig { travel_delay_ms: 0 },
            ..Config::default()
        }
    }

    fn setup_dispatcher(initial_floors: &[i32]) -> (Dispatcher, Receiver<ElevatorEvent>) {
        let (event_tx, event_rx) = unbounded::<ElevatorEvent>();
        let dispatcher = Dispatcher::with_initial_floors(
            &test_config(initial_floors.len()),
            initial_floors,
            event_tx,
        )
        .unwrap();
        (dispatcher, event_rx)
    }

    // Collects the stops served by `elevator` until it reports idle
    fn wait_for_idle(event_rx: &Receiver<ElevatorEvent>, elevator: usize) -> Vec<ScheduledStop> {
        let mut served = Vec::new();
        loop {
            match event_rx.recv_timeout(Duration::from_secs(5)) {
                Ok(ElevatorEvent::StopServed { elevator: e, stop }) if e == elevator => served.push(stop),
                Ok(ElevatorEvent::Idle { elevator: e }) if e == elevator => return served,
                Ok(_) => (),
                Err(RecvTimeoutError::Timeout) => panic!("Timed out waiting for elevator {} to go idle", elevator),
                Err(e) => panic!("Error receiving from event_rx: {:?}", e),
            }
        }
    }

    #[test]
    fn test_dispatcher_init() {
        // Arrange
        let (event_tx, _event_rx) = unbounded::<ElevatorEvent>();

        // Act
        let dispatcher = Dispatcher::new(&test_config(4), event_tx).unwrap();

        // Assert
        assert_eq!(dispatcher.n_elevators(), 4);
        assert_eq!(dispatcher.n_floors(), 20);
        let floors: Vec<i32> = dispatcher.statuses().iter().map(|status| status.floor).collect();
        assert_eq!(floors, vec![0, 1, 2, 3]);
        assert!(dispatcher
            .statuses()
            .iter()
            .all(|status| status.direction == Stationary));
    }

    #[test]
    fn test_dispatcher_caps_initial_floors() {
        // Arrange
        let (event_tx, _event_rx) = unbounded::<ElevatorEvent>();
        let mut config = test_config(5);
        config.fleet.n_floors = 3;

        // Act
        let dispatcher = Dispatcher::new(&config, event_tx).unwrap();

        // Assert
        let floors: Vec<i32> = dispatcher.statuses().iter().map(|status| status.floor).collect();
        assert_eq!(floors, vec![0, 1, 2, 2, 2]);
    }

    #[test]
    fn test_direct_request_goes_to_closest_elevator() {
        // Arrange
        let (dispatcher, event_rx) = setup_dispatcher(&[0, 10]);

        // Act
        let assigned = dispatcher.submit_direct_request(9);

        // Assert
        assert_eq!(assigned, Ok(Some(1)));
        wait_for_idle(&event_rx, 1);
        assert_eq!(dispatcher.status(1).unwrap().floor, 9);
        assert_eq!(dispatcher.status(0).unwrap().floor, 0);
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        // Arrange: floor 4 is two floors from both elevators
        let (dispatcher, event_rx) = setup_dispatcher(&[6, 2]);
        let request = Request::new(Stationary, 4, dispatcher.n_floors());
        assert_eq!(
            dispatcher.elevator(0).unwrap().proximity_score(&request),
            dispatcher.elevator(1).unwrap().proximity_score(&request)
        );

        // Act
        let assigned = dispatcher.submit(request);

        // Assert
        assert_eq!(assigned, Some(0));
        wait_for_idle(&event_rx, 0);
        assert_eq!(dispatcher.history(0).unwrap(), vec![request]);
        assert!(dispatcher.history(1).unwrap().is_empty());
    }

    #[test]
    fn test_pickup_dropoff_scenario() {
        // Arrange: two stationary elevators at floors 0 and 10
        let (dispatcher, event_rx) = setup_dispatcher(&[0, 10]);
        let epsilon = Config::default().scoring.score_adjustment;

        // Act: a direct request to floor 9 goes to the elevator one floor away
        assert_eq!(dispatcher.submit_direct_request(9), Ok(Some(1)));
        wait_for_idle(&event_rx, 1);

        // Act: pickup at 5 heading to 15
        let assigned = dispatcher.submit_pickup(5, 15);

        // Assert
        assert_eq!(assigned, Ok(Some(1)));
        let served = wait_for_idle(&event_rx, 1);
        assert_eq!(served.len(), 2);

        let pickup = served[0];
        let dropoff = served[1];
        assert_eq!(pickup.request(), &Request::new(Up, 5, 20));
        assert_eq!(dropoff.request(), &Request::new(Stationary, 15, 20));
        assert!(dropoff.proximity_score() >= pickup.proximity_score() + epsilon);

        assert_eq!(
            dispatcher.history(1).unwrap(),
            vec![
                Request::new(Stationary, 9, 20),
                Request::new(Up, 5, 20),
                Request::new(Stationary, 15, 20),
            ]
        );
        assert!(dispatcher.history(0).unwrap().is_empty());

        let status = dispatcher.status(1).unwrap();
        assert_eq!(status.floor, 15);
        assert_eq!(status.direction, Stationary);
    }

    #[test]
    fn test_pickup_scoring_discounts_dropoff_leg() {
        // Arrange: elevator 0 is closer to the pickup, elevator 1 closer to the dropoff.
        // Elevator 0: 2.5 + 20.0 * 0.35 = 9.5, elevator 1: 5.0 + 12.5 * 0.35 = 9.375
        let (dispatcher, event_rx) = setup_dispatcher(&[3, 9]);

        // Act
        let assigned = dispatcher.submit_pickup_dropoff(5, 19);

        // Assert
        assert_eq!(assigned, Some(1));
        let served = wait_for_idle(&event_rx, 1);
        let floors: Vec<i32> = served
            .iter()
            .map(|stop| stop.request().destination_floor())
            .collect();
        assert_eq!(floors, vec![5, 19]);
    }

    #[test]
    fn test_invalid_requests_never_queued() {
        // Arrange
        let (dispatcher, event_rx) = setup_dispatcher(&[0, 10]);

        // Act
        let results = vec![
            dispatcher.submit(Request::from_code(7, 3, 20)),
            dispatcher.submit(Request::new(Stationary, -1, 20)),
            dispatcher.submit(Request::new(Up, 20, 20)),
            dispatcher.submit_pickup_dropoff(5, 20),
            dispatcher.submit_pickup_dropoff(-1, 3),
        ];

        // Assert
        assert!(results.iter().all(|result| result.is_none()));
        for index in 0..dispatcher.n_elevators() {
            assert!(dispatcher.history(index).unwrap().is_empty());
            assert!(!dispatcher.elevator(index).unwrap().is_active());
        }
        match event_rx.recv_timeout(Duration::from_millis(100)) {
            Err(RecvTimeoutError::Timeout) => (),
            other => panic!("Expected no movement, got {:?}", other),
        }
    }

    #[test]
    fn test_same_floor_pickup_is_ignored() {
        let (dispatcher, _event_rx) = setup_dispatcher(&[0, 10]);

        assert_eq!(dispatcher.submit_pickup(4, 4), Ok(None));
        assert!(dispatcher.history(0).unwrap().is_empty());
        assert!(dispatcher.history(1).unwrap().is_empty());
    }

    #[test]
    fn test_boundary_errors() {
        let (dispatcher, _event_rx) = setup_dispatcher(&[0, 10]);

        assert_eq!(dispatcher.submit_direct_request(20), Err(DispatchError::InvalidFloor(20)));
        assert_eq!(dispatcher.submit_pickup(3, -2), Err(DispatchError::InvalidFloor(-2)));
        assert_eq!(dispatcher.status(2), Err(DispatchError::InvalidElevatorIndex(2)));
        assert_eq!(dispatcher.history(5), Err(DispatchError::InvalidElevatorIndex(5)));
        assert_eq!(
            DispatchError::InvalidElevatorIndex(5).to_string(),
            "elevator 5 does not exist"
        );
    }

    #[test]
    fn test_history_of_unused_elevator_is_empty() {
        let (dispatcher, _event_rx) = setup_dispatcher(&[0, 10]);

        assert_eq!(dispatcher.history(0), Ok(Vec::new()));
    }

    #[test]
    fn test_concurrent_submissions() {
        // Arrange
        let (dispatcher, _event_rx) = setup_dispatcher(&[0, 5, 10, 15]);

        // Act: four callers submitting at once
        thread::scope(|scope| {
            for caller in 0..4 {
                let dispatcher = &dispatcher;
                scope.spawn(move || {
                    for floor in 0..10 {
                        let floor = (caller * 5 + floor) % 20;
                        assert!(dispatcher.submit_direct_request(floor).unwrap().is_some());
                    }
                });
            }
        });

        // Assert: every request landed in exactly one history
        let accepted: usize = (0..dispatcher.n_elevators())
            .map(|index| dispatcher.history(index).unwrap().len())
            .sum();
        assert_eq!(accepted, 40);
    }
}
