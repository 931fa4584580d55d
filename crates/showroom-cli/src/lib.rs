//! Shared modules for the Showroom CLI binary.

pub mod logging;
pub mod tables;
