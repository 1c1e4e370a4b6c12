//! Embassy tasks

pub mod controller;
pub mod tick;

pub use controller::controller_task;
pub use tick::tick_task;
