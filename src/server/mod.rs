//! Roster server assembly.
//!
//! # Module Organization
//!
//! * [`builder`] - Configuration, validation and the fluent builder
//! * [`core`] - The assembled server and its service accessors

pub mod builder;
pub mod core;

pub use builder::{RosterServerBuilder, RosterServerConfig};
pub use self::core::{InMemoryService, RosterServer};
