//! Dispatch and scheduling engine for a simulated bank of elevators.
//!
//! A [`dispatcher::Dispatcher`] owns a fixed fleet of [`elevator::Elevator`]s. Each request is
//! scored against every car and queued on the cheapest one, and every car drains its own
//! queue on a dedicated thread.

pub mod config;
pub mod control;
pub mod dispatcher;
pub mod elevator;
pub mod shared;
