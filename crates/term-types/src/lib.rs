pub mod config;
pub mod error;
pub mod event;
pub mod flags;
pub mod session;
pub mod workout;

#[cfg(test)]
mod tests;

pub use error::{CommandError, TermError};
pub type Result<T> = std::result::Result<T, TermError>;
