pub mod fsm;
pub mod scoring;
pub mod stop_queue;


pub use fsm::Elevator;
pub use fsm::ElevatorEvent;
pub use scoring::proximity_score;
pub use stop_queue::ScheduledStop;
