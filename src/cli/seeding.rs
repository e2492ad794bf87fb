//! Command line interface for seed point generators used for field line tracing.

pub mod manual;
pub mod ring;

#[cfg(feature = "random-seeding")]
pub mod shell;
