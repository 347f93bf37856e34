use crate::config::{ElevatorConfig, ScoringConfig};
use crate::elevator::scoring;
use crate::elevator::stop_queue::{ScheduledStop, StopQueue};
use crate::shared::{Behaviour, Direction, ElevatorStatus, Request};
use crossbeam_channel as cbc;
use log::{debug, warn};
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
};
use std::thread::{self, Builder};
use std::time::Duration;

/// Progress reported by an elevator's worker thread.
#[derive(Debug, Clone, PartialEq)]
pub enum ElevatorEvent {
    FloorPassed { elevator: usize, floor: i32 },
    StopServed { elevator: usize, stop: ScheduledStop },
    Idle { elevator: usize },
}

struct Schedule {
    stops: StopQueue,
    active: bool,
}

struct Shared {
    id: usize,
    status: RwLock<ElevatorStatus>,
    schedule: Mutex<Schedule>,
    history: Mutex<Vec<Request>>,
}

/**
 * One simulated elevator car.
 *
 * The `Elevator` handle accepts stops and answers status queries. The movement itself runs on
 * a dedicated worker thread (`elevator-<id>`) that parks while the car is idle, drains the stop
 * queue lowest score first when woken, and steps one floor per `travel_delay`.
 *
 * # Fields
 * - `shared`:      State shared with the worker thread.
 * - `weights`:     Weights used to score requests against this car.
 * - `wake_tx`:     Wakes the worker on the idle to moving transition. Dropping it ends the worker.
 *
 * # Shared state
 * - `status`:      Floor, direction and behaviour. Written by the worker only.
 * - `schedule`:    Pending stops and the `active` flag, behind one lock so a push can never
 *                  race the worker's decision to go idle.
 * - `history`:     Every request the car has accepted, in insertion order.
 */
pub struct Elevator {
    shared: Arc<Shared>,
    weights: ScoringConfig,
    wake_tx: cbc::Sender<()>,
}

struct Worker {
    shared: Arc<Shared>,
    travel_delay: Duration,
    wake_rx: cbc::Receiver<()>,
    event_tx: cbc::Sender<ElevatorEvent>,
}

impl Elevator {
    pub fn new(
        id: usize,
        initial_floor: i32,
        config: &ElevatorConfig,
        weights: ScoringConfig,
        event_tx: cbc::Sender<ElevatorEvent>,
    ) -> std::io::Result<Elevator> {
        let shared = Arc::new(Shared {
            id,
            status: RwLock::new(ElevatorStatus::new(initial_floor)),
            schedule: Mutex::new(Schedule {
                stops: StopQueue::new(),
                active: false,
            }),
            history: Mutex::new(Vec::new()),
        });

        let (wake_tx, wake_rx) = cbc::unbounded::<()>();
        let worker = Worker {
            shared: Arc::clone(&shared),
            travel_delay: config.travel_delay(),
            wake_rx,
            event_tx,
        };

        let worker_thread = Builder::new().name(format!("elevator-{}", id));
        worker_thread.spawn(move || worker.run())?;

        Ok(Elevator {
            shared,
            weights,
            wake_tx,
        })
    }

    pub fn id(&self) -> usize {
        self.shared.id
    }

    pub fn proximity_score(&self, request: &Request) -> f64 {
        scoring::proximity_score(&self.status(), request, &self.weights)
    }

    pub fn enqueue(&self, request: Request) {
        if !request.is_valid() {
            warn!("Elevator {}: dropping invalid request {:?}", self.id(), request);
            return;
        }

        let score = self.proximity_score(&request);
        self.schedule(&[(request, score)]);
    }

    /// Queues a pickup and its dropoff so that the dropoff is always served after the pickup.
    pub fn enqueue_pair(&self, pickup: Request, dropoff: Request) {
        if !pickup.is_valid() || !dropoff.is_valid() {
            warn!(
                "Elevator {}: dropping invalid pickup/dropoff {:?} / {:?}",
                self.id(),
                pickup,
                dropoff
            );
            return;
        }

        let pickup_score = self.proximity_score(&pickup);
        let mut dropoff_score = self.proximity_score(&dropoff);
        if dropoff_score <= pickup_score {
            dropoff_score = pickup_score + self.weights.score_adjustment;
        }
        self.schedule(&[(pickup, pickup_score), (dropoff, dropoff_score)]);
    }

    pub fn status(&self) -> ElevatorStatus {
        read(&self.shared.status).clone()
    }

    pub fn history(&self) -> Vec<Request> {
        lock(&self.shared.history).clone()
    }

    pub fn is_active(&self) -> bool {
        lock(&self.shared.schedule).active
    }

    pub fn pending_stops(&self) -> usize {
        lock(&self.shared.schedule).stops.len()
    }

    fn schedule(&self, stops: &[(Request, f64)]) {
        let wake = {
            let mut schedule = lock(&self.shared.schedule);
            for (request, score) in stops {
                schedule.stops.push(*request, *score);
            }
            lock(&self.shared.history).extend(stops.iter().map(|(request, _)| *request));

            if schedule.active {
                false
            } else {
                schedule.active = true;
                write(&self.shared.status).behaviour = Behaviour::Moving;
                true
            }
        };

        if wake {
            let _ = self.wake_tx.send(());
        }
    }
}

impl Worker {
    fn run(self) {
        // Parked until an enqueue wakes us; ends when the Elevator handle is dropped
        while self.wake_rx.recv().is_ok() {
            self.drain();
        }
    }

    fn drain(&self) {
        while let Some(stop) = self.next_stop() {
            self.travel_to(stop.request());
            let _ = self.event_tx.send(ElevatorEvent::StopServed {
                elevator: self.shared.id,
                stop,
            });
        }
        let _ = self.event_tx.send(ElevatorEvent::Idle {
            elevator: self.shared.id,
        });
    }

    // Pops the next stop, or marks the car idle if there is none
    fn next_stop(&self) -> Option<ScheduledStop> {
        let mut schedule = lock(&self.shared.schedule);
        match schedule.stops.pop() {
            Some(stop) => Some(stop),
            None => {
                schedule.active = false;
                write(&self.shared.status).behaviour = Behaviour::Idle;
                None
            }
        }
    }

    fn travel_to(&self, request: &Request) {
        let destination = request.destination_floor();

        loop {
            let floor = read(&self.shared.status).floor;
            let heading = Direction::between(floor, destination);
            let step = match heading {
                Direction::Up => 1,
                Direction::Down => -1,
                Direction::Stationary => break,
            };
            write(&self.shared.status).direction = heading;

            // No lock is held while the car is between floors
            thread::sleep(self.travel_delay);

            let floor = {
                let mut status = write(&self.shared.status);
                status.floor += step;
                status.floor
            };
            debug!("Elevator {}: reached floor {}", self.shared.id, floor);
            let _ = self.event_tx.send(ElevatorEvent::FloorPassed {
                elevator: self.shared.id,
                floor,
            });
        }

        let mut status = write(&self.shared.status);
        status.floor = destination;
        status.direction = request.direction();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn read<T>(rwlock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    rwlock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(rwlock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    rwlock.write().unwrap_or_else(PoisonError::into_inner)
}
