pub mod engine;
pub mod event_bus;
pub mod flags;
pub mod history;
pub mod ports;
pub mod prompt;
pub mod router;
pub mod session_store;
pub mod workout;


pub use engine::{EnginePorts, Keystroke, LineEngine};
pub use router::{CommandContext, CommandOutput, CommandRouter};
