// Library interface for the bionews backend, shared by the binary and the integration tests.

pub mod ai;
pub mod config;
pub mod content;
pub mod error;
pub mod models;
pub mod server;

pub use error::{AppError, Result};
