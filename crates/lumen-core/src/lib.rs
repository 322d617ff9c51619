pub mod cache;
pub mod cloud;
pub mod color;
pub mod command;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod hub;
pub mod io;
pub mod menu;
pub mod paths;
pub mod prompt;
pub mod refresh;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{Context, Ports};
pub use dispatcher::{Dispatcher, Outcome};
pub use error::{LumenError, Result};
