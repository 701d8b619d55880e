pub mod config;
pub mod init;
pub mod parse;
pub mod repl;
pub mod states;
