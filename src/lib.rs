//! The `lodestone` crate traces field lines of analytical vector fields,
//! such as the field of a point magnetic dipole.

pub mod error;
pub mod field;
pub mod geometry;
pub mod io;
pub mod num;
pub mod seeding;
pub mod tracing;

#[cfg(feature = "cli")]
pub mod cli;
