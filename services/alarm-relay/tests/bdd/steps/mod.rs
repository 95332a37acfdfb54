//! BDD step definitions for alarm relay

pub mod config_steps;
