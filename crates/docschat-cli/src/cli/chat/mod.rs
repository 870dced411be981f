//! Interactive chat front end.
//!
//! Reads questions from stdin, streams answers to stdout and draws the
//! thinking spinner while waiting. Entry point: `loop_runner::run_chat`.

pub mod banner;
pub mod loop_runner;
pub mod renderer;
