pub mod dispatcher;

mod dispatcher_tests;

pub use dispatcher::DispatchError;
pub use dispatcher::Dispatcher;
