use crate::config::ScoringConfig;
use crate::shared::{Direction, ElevatorStatus, Request};

/**
 * Weighted cost of serving `request` from the position in `status`. Lower is better.
 *
 * The base cost is the floor distance times `distance_weight`. It is multiplied by
 * `detour_weight` when the elevator would have to turn around to reach the floor, and by
 * `reversal_weight` when the rider's onward direction opposes the elevator's heading.
 *
 * Reads nothing but its arguments, so the dispatcher can score every elevator off a
 * status snapshot without touching the stop queues.
 */
pub fn proximity_score(status: &ElevatorStatus, request: &Request, weights: &ScoringConfig) -> f64 {
    let distance = (status.floor - request.destination_floor()).abs();

    let mut score = distance as f64 * weights.distance_weight;
    if !on_current_path(status, request) {
        score *= weights.detour_weight;
    }
    if !directions_match(status, request) {
        score *= weights.reversal_weight;
    }
    score
}

// Whether the elevator reaches the floor without changing direction
fn on_current_path(status: &ElevatorStatus, request: &Request) -> bool {
    if status.direction == Direction::Stationary {
        return true;
    }
    if request.destination_floor() == status.floor {
        return true;
    }

    let required_direction = if status.floor > request.destination_floor() {
        Direction::Down
    } else {
        Direction::Up
    };
    required_direction == status.direction
}

fn directions_match(status: &ElevatorStatus, request: &Request) -> bool {
    request.direction() == Direction::Stationary
        || status.direction == Direction::Stationary
        || request.direction() == status.direction
}
