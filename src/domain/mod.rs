//! Domain layer - Core business logic and entities.
//!
//! This layer has no dependencies on infrastructure concerns.

pub mod authorization;
pub mod calendar;
pub mod foundation;
pub mod tools;
