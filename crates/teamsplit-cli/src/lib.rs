// Library root: re-exports all modules so integration tests can reach the
// command implementations without going through the binary.

pub mod app;
pub mod config;
pub mod output;
pub mod roster;
pub mod script;
