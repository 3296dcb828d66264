//! CLI command implementations.

pub mod common;
pub mod gates;
pub mod generate;
pub mod verify;
pub mod version;
