//! BDD step definitions for the homework notifier

pub mod rendering_steps;
pub mod startup_steps;
pub mod validation_steps;
