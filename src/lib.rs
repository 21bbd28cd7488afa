//! TOMATUI - Terminal Pomodoro Timer Library
//!
//! A terminal-based Pomodoro timer with a persistent cycle history, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
