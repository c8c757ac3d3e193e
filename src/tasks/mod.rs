//! Background Tasks Module
//!
//! # Tasks
//! - Cache sweep: drops expired response cache entries at a fixed interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
