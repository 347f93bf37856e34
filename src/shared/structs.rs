/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*             Constants               */
/***************************************/
pub const DIRN_UP: u8 = 0;
pub const DIRN_DOWN: u8 = 1;
pub const DIRN_STATIONARY: u8 = 2;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Stationary,
}

impl Direction {
    pub fn to_u8(&self) -> u8 {
        match *self {
            Direction::Up => DIRN_UP,
            Direction::Down => DIRN_DOWN,
            Direction::Stationary => DIRN_STATIONARY,
        }
    }

    /// Direction of travel needed to get from `from` to `to`.
    pub fn between(from: i32, to: i32) -> Direction {
        if to > from {
            Direction::Up
        } else if to < from {
            Direction::Down
        } else {
            Direction::Stationary
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = u8;

    fn try_from(item: u8) -> Result<Self, Self::Error> {
        match item {
            DIRN_UP => Ok(Direction::Up),
            DIRN_DOWN => Ok(Direction::Down),
            DIRN_STATIONARY => Ok(Direction::Stationary),
            other => Err(other),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "UP"),
            Direction::Down => write!(f, "DOWN"),
            Direction::Stationary => write!(f, "STATIONARY"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "moving")]
    Moving,
}

/**
 * Snapshot of where an elevator is and which way it is heading.
 *
 * Only the owning elevator's worker writes the live copy; everyone else gets a clone.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ElevatorStatus {
    pub behaviour: Behaviour,
    pub floor: i32,
    pub direction: Direction,
}

impl ElevatorStatus {
    pub fn new(initial_floor: i32) -> ElevatorStatus {
        ElevatorStatus {
            behaviour: Behaviour::Idle,
            floor: initial_floor,
            direction: Direction::Stationary,
        }
    }
}

impl fmt::Display for ElevatorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current floor: {}", self.floor)?;
        write!(f, "Direction: {}", self.direction)
    }
}

/**
 * A floor to visit and the direction the rider travels after arriving there.
 *
 * Requests are never rejected at construction. Instead an out-of-range floor or an unknown
 * direction code produces a request with `is_valid() == false`, which every acceptance point
 * drops without queueing it.
 */
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Request {
    direction: Direction,
    destination_floor: i32,
    valid: bool,
}

impl Request {
    pub fn new(direction: Direction, destination_floor: i32, n_floors: u8) -> Request {
        Request {
            direction,
            destination_floor,
            valid: floor_in_range(destination_floor, n_floors),
        }
    }

    /// Builds a request from a raw direction code (0 = up, 1 = down, 2 = stationary).
    pub fn from_code(direction: u8, destination_floor: i32, n_floors: u8) -> Request {
        match Direction::try_from(direction) {
            Ok(direction) => Request::new(direction, destination_floor, n_floors),
            Err(_) => Request {
                direction: Direction::Stationary,
                destination_floor,
                valid: false,
            },
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn destination_floor(&self) -> i32 {
        self.destination_floor
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Destination: {}", self.destination_floor)?;
        write!(f, "Direction: {}", self.direction)
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn floor_in_range(floor: i32, n_floors: u8) -> bool {
    floor >= 0 && floor < n_floors as i32
}

/***************************************/
/*             Unit tests              */
/***************************************/
