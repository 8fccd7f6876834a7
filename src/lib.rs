pub mod body;
pub mod boundary;
pub mod c_api;
pub mod collision;
pub mod config;
pub mod error;
pub mod explosion;
pub mod feedback;
pub mod integrator;
pub mod simulation;
pub mod store;
pub mod utils;

pub use body::{Body, BodySpec};
pub use collision::SolveStats;
pub use config::SimConfig;
pub use error::ConfigError;
pub use simulation::{BodyEvent, BodyView, Simulation};
pub use store::{BodyHandle, BodyStore};
