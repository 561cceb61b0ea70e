//! Domain layer of the game studio wizard.
//!
//! Everything here is synchronous and free of I/O: the terminal front-end
//! feeds [`command::ProjectCommand`]s into a [`store::ProjectStore`] and runs
//! the simulated async work itself.

pub mod assets;
pub mod catalog;
pub mod command;
pub mod error;
pub mod export;
pub mod levels;
pub mod mechanics;
pub mod project;
pub mod session;
pub mod step;
pub mod store;

pub use command::{Outcome, ProjectCommand};
pub use error::Rejection;
pub use project::Project;
pub use step::Step;
pub use store::ProjectStore;
