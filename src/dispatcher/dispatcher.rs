/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{info, warn};
use std::fmt;
use std::io;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::{Config, ScoringConfig};
use crate::elevator::{Elevator, ElevatorEvent};
use crate::shared::{floor_in_range, Direction, ElevatorStatus, Request};

/***************************************/
/*               Errors                */
/***************************************/
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    InvalidFloor(i32),
    InvalidElevatorIndex(usize),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::InvalidFloor(floor) => write!(f, "floor {} is out of range", floor),
            DispatchError::InvalidElevatorIndex(index) => {
                write!(f, "elevator {} does not exist", index)
            }
        }
    }
}

impl std::error::Error for DispatchError {}

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Assigns incoming requests to the fleet.
 *
 * Every request is scored against every elevator in index order and handed to the one with
 * the strictly lowest score, so the lowest index wins a tie. The scan reads one status
 * snapshot per elevator and holds no lock across the fleet; after the hand-off the elevators
 * run on their own.
 *
 * # Fields
 * - `elevators`:   The fleet, indexed `0..n_elevators`. Fixed for the dispatcher's lifetime.
 * - `n_floors`:    Floors are valid in `0..n_floors`.
 * - `weights`:     Scoring weights, used here for the dropoff leg of a pickup/dropoff pair.
 */
pub struct Dispatcher {
    elevators: Vec<Elevator>,
    n_floors: u8,
    weights: ScoringConfig,
}

impl Dispatcher {
    /// Builds the fleet described by `config`. Elevator `i` starts at floor `i`, capped at the
    /// top floor.
    pub fn new(config: &Config, event_tx: cbc::Sender<ElevatorEvent>) -> io::Result<Dispatcher> {
        let top_floor = config.fleet.n_floors.saturating_sub(1) as usize;
        let initial_floors: Vec<i32> = (0..config.fleet.n_elevators)
            .map(|index| index.min(top_floor) as i32)
            .collect();

        Dispatcher::with_initial_floors(config, &initial_floors, event_tx)
    }

    /// Builds one elevator per entry of `initial_floors`, ignoring `config.fleet.n_elevators`.
    pub fn with_initial_floors(
        config: &Config,
        initial_floors: &[i32],
        event_tx: cbc::Sender<ElevatorEvent>,
    ) -> io::Result<Dispatcher> {
        let elevators = initial_floors
            .iter()
            .enumerate()
            .map(|(index, floor)| {
                Elevator::new(
                    index,
                    *floor,
                    &config.elevator,
                    config.scoring,
                    event_tx.clone(),
                )
            })
            .collect::<io::Result<Vec<Elevator>>>()?;

        info!(
            "Dispatcher started with {} elevators serving floors 0..{}",
            elevators.len(),
            config.fleet.n_floors
        );

        Ok(Dispatcher {
            elevators,
            n_floors: config.fleet.n_floors,
            weights: config.scoring,
        })
    }

    pub fn n_elevators(&self) -> usize {
        self.elevators.len()
    }

    pub fn n_floors(&self) -> u8 {
        self.n_floors
    }

    /// Routes a single request to the best elevator and returns its index, or `None` if the
    /// request is invalid.
    pub fn submit(&self, request: Request) -> Option<usize> {
        if !request.is_valid() {
            warn!("Dropping invalid request {:?}", request);
            return None;
        }

        let index = self.best_elevator(|elevator| elevator.proximity_score(&request))?;
        info!(
            "Request to floor {} ({}) assigned to elevator {}",
            request.destination_floor(),
            request.direction(),
            index
        );
        self.elevators[index].enqueue(request);
        Some(index)
    }

    /// Routes a pickup and its dropoff to the same elevator. Nothing is submitted when both
    /// floors are the same.
    pub fn submit_pickup_dropoff(&self, pickup_floor: i32, dropoff_floor: i32) -> Option<usize> {
        let direction = Direction::between(pickup_floor, dropoff_floor);
        if direction == Direction::Stationary {
            return None;
        }

        let pickup = Request::new(direction, pickup_floor, self.n_floors);
        let dropoff = Request::new(Direction::Stationary, dropoff_floor, self.n_floors);
        if !pickup.is_valid() || !dropoff.is_valid() {
            warn!("Dropping invalid pickup/dropoff {:?} / {:?}", pickup, dropoff);
            return None;
        }

        let destination_weight = self.weights.destination_weight;
        let index = self.best_elevator(|elevator| {
            elevator.proximity_score(&pickup)
                + elevator.proximity_score(&dropoff) * destination_weight
        })?;
        info!(
            "Pickup at floor {} with dropoff at floor {} assigned to elevator {}",
            pickup_floor, dropoff_floor, index
        );
        self.elevators[index].enqueue_pair(pickup, dropoff);
        Some(index)
    }

    /// Direct request to `floor`, e.g. a cabin button. The floor is checked before any
    /// request is built.
    pub fn submit_direct_request(&self, floor: i32) -> Result<Option<usize>, DispatchError> {
        self.check_floor(floor)?;
        Ok(self.submit(Request::new(Direction::Stationary, floor, self.n_floors)))
    }

    /// Pickup/dropoff trip. Returns `Ok(None)` when both floors are the same.
    pub fn submit_pickup(
        &self,
        pickup_floor: i32,
        dropoff_floor: i32,
    ) -> Result<Option<usize>, DispatchError> {
        self.check_floor(pickup_floor)?;
        self.check_floor(dropoff_floor)?;
        Ok(self.submit_pickup_dropoff(pickup_floor, dropoff_floor))
    }

    pub fn elevator(&self, index: usize) -> Result<&Elevator, DispatchError> {
        self.elevators
            .get(index)
            .ok_or(DispatchError::InvalidElevatorIndex(index))
    }

    pub fn status(&self, index: usize) -> Result<ElevatorStatus, DispatchError> {
        Ok(self.elevator(index)?.status())
    }

    /// Status of every elevator, in fleet order.
    pub fn statuses(&self) -> Vec<ElevatorStatus> {
        self.elevators.iter().map(|elevator| elevator.status()).collect()
    }

    /// Requests accepted by elevator `index`, in the order they were accepted.
    pub fn history(&self, index: usize) -> Result<Vec<Request>, DispatchError> {
        Ok(self.elevator(index)?.history())
    }

    fn check_floor(&self, floor: i32) -> Result<(), DispatchError> {
        if floor_in_range(floor, self.n_floors) {
            Ok(())
        } else {
            Err(DispatchError::InvalidFloor(floor))
        }
    }

    // Lowest score wins; a later elevator must beat the current best strictly
    fn best_elevator<F>(&self, score: F) -> Option<usize>
    where
        F: Fn(&Elevator) -> f64,
    {
        if self.elevators.is_empty() {
            return None;
        }

        let mut best_elevator = 0;
        let mut best_score = f64::INFINITY;
        for (index, elevator) in self.elevators.iter().enumerate() {
            let elevator_score = score(elevator);
            if elevator_score < best_score {
                best_score = elevator_score;
                best_elevator = index;
            }
        }
        Some(best_elevator)
    }
}
