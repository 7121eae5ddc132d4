//! Foundation types for the cloud terminal simulator.
//!
//! This crate contains the types shared by every other crate in the
//! workspace: the command error taxonomy and the session configuration.

pub mod config;
pub mod error;
