//! Validation lifecycle events.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::ToetsEventHandler;
pub use types::*;
