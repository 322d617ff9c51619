//! Terminal front end for the lumen palette. The binary in `main.rs` parses
//! arguments; everything it runs lives here so it can be tested.

pub mod cmd;
pub mod output;
pub mod prompt;
pub mod session;
