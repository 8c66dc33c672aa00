pub mod azely;
pub mod azely_errors;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod engine;
pub mod env_state;
pub mod location;
pub mod object;
pub mod services;
pub mod time;

pub use crate::azely::{Azely, ComputeArgs};
pub use crate::azely_errors::AzelyError;
