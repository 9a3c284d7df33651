//! Background jobs spawned by handlers as detached tasks.

pub mod tag_generation;
