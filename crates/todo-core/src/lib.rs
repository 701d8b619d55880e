pub mod command;
pub mod config;
pub mod error;
pub mod handler;
pub mod io;
pub mod paths;
pub mod resolve;
pub mod session;
pub mod state;
pub mod task;
pub mod tokenizer;
pub mod types;

pub use error::{Result, TodoError};
