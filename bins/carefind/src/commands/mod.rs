//! Command implementations.

pub mod geocode;
pub mod nearby;
pub mod settings;
