//! Command line interface.

pub mod build;
pub mod field;
pub mod run;
pub mod seeding;
pub mod tracing;
pub mod utils;
