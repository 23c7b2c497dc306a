//! Background Tasks
//!
//! Optional maintenance tasks spawned by the host during startup.

mod sweeper;

pub use sweeper::spawn_sweeper_task;
