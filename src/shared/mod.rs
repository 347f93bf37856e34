pub mod macros;
pub mod structs;

pub use structs::floor_in_range;
pub use structs::Behaviour;
pub use structs::Direction;
pub use structs::ElevatorStatus;
pub use structs::Request;
