//! Typed records used across layers.

pub mod health;
pub mod log;
pub mod response;
pub mod setting;
