//! Stepping along field lines of a vector field.

pub mod euler;

use super::ftr;
use crate::{
    ensure_valid,
    error::TracingResult,
    field::FieldFunction3,
    geometry::{Point3, Vec3},
};
use std::fmt;

#[cfg(feature = "serialization")]
use serde::Serialize;

/// Stepping along the field line in the same direction as the field or opposite.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub enum SteppingSense {
    Same,
    Opposite,
}

impl SteppingSense {
    /// Determines the stepping sense from a direction flag, which must be `+1` or `-1`.
    pub fn from_direction(direction: ftr) -> TracingResult<Self> {
        ensure_valid!(
            direction == 1.0 || direction == -1.0,
            "Tracing direction must be +1 or -1, got {}",
            direction
        );
        Ok(if direction > 0.0 {
            Self::Same
        } else {
            Self::Opposite
        })
    }

    /// Returns `1` for the same sense as the field and `-1` for the opposite sense.
    pub fn sign(self) -> ftr {
        match self {
            Self::Same => 1.0,
            Self::Opposite => -1.0,
        }
    }

    /// Returns the opposite sense.
    pub fn reversed(self) -> Self {
        match self {
            Self::Same => Self::Opposite,
            Self::Opposite => Self::Same,
        }
    }
}

impl fmt::Display for SteppingSense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Same => "same",
                Self::Opposite => "opposite",
            }
        )
    }
}

/// A stepper result which is either OK (with an arbitrary value) or stopped (with a cause).
#[derive(Clone, Debug)]
pub enum StepperResult<T> {
    Ok(T),
    Stopped(StoppingCause),
}

/// Reason for terminating stepping.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub enum StoppingCause {
    /// The field magnitude fell below the null threshold.
    Null,
    /// The field evaluated to a non-finite vector.
    NonFinite,
    /// The maximum number of steps was taken.
    MaxStepsReached,
    StoppedByCallback,
}

impl StoppingCause {
    /// Returns the code identifying the stopping cause in binary output.
    pub fn code(self) -> u8 {
        match self {
            Self::Null => 0,
            Self::NonFinite => 1,
            Self::MaxStepsReached => 2,
            Self::StoppedByCallback => 3,
        }
    }
}

/// Lets the stepper callback communicate whether tracing should
/// continue or terminate.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StepperInstruction {
    Continue,
    Terminate,
}

/// Defines the properties of a stepping scheme.
pub trait Stepper3: Clone {
    /// Places the stepper at the given position.
    ///
    /// # Parameters
    ///
    /// - `field`: Vector field to step in.
    /// - `sense`: Whether to step in the same or opposite direction as the field.
    /// - `position`: Position where the stepper should be placed.
    /// - `callback`: Closure that will be called with the placed position if successful.
    ///
    /// # Returns
    ///
    /// A `StepperResult<()>` which is either:
    ///
    /// - `Ok`: Stepper placement succeeded.
    /// - `Stopped`: Contains a `StoppingCause` indicating why stepper placement failed.
    ///
    /// # Type parameters
    ///
    /// - `Fi`: Type of field function.
    /// - `C`: Mutable function type taking a displacement, a position and a distance and returning a `StepperInstruction`.
    fn place<Fi, C>(
        &mut self,
        field: &Fi,
        sense: SteppingSense,
        position: &Point3<ftr>,
        callback: &mut C,
    ) -> StepperResult<()>
    where
        Fi: FieldFunction3 + ?Sized,
        C: FnMut(&Vec3<ftr>, &Point3<ftr>, ftr) -> StepperInstruction;

    /// Performs a step.
    ///
    /// # Parameters
    ///
    /// - `field`: Vector field to step in.
    /// - `sense`: Whether to step in the same or opposite direction as the field.
    /// - `callback`: Closure that will be called with the step displacement, the resulting
    /// position and the total traced distance if successful.
    ///
    /// # Returns
    ///
    /// A `StepperResult<()>` which is either:
    ///
    /// - `Ok`: The step succeeded.
    /// - `Stopped`: Contains a `StoppingCause` indicating why the step failed.
    ///
    /// # Type parameters
    ///
    /// - `Fi`: Type of field function.
    /// - `C`: Mutable function type taking a displacement, a position and a distance and returning a `StepperInstruction`.
    fn step<Fi, C>(&mut self, field: &Fi, sense: SteppingSense, callback: &mut C) -> StepperResult<()>
    where
        Fi: FieldFunction3 + ?Sized,
        C: FnMut(&Vec3<ftr>, &Point3<ftr>, ftr) -> StepperInstruction;

    /// Returns a reference to the current stepper position.
    fn position(&self) -> &Point3<ftr>;

    /// Returns the current distance of the stepper along the field line.
    fn distance(&self) -> ftr;
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn direction_flags_map_to_senses() {
        assert_eq!(SteppingSense::from_direction(1.0), Ok(SteppingSense::Same));
        assert_eq!(
            SteppingSense::from_direction(-1.0),
            Ok(SteppingSense::Opposite)
        );
        assert!(SteppingSense::from_direction(0.0).is_err());
        assert!(SteppingSense::from_direction(0.5).is_err());
        assert!(SteppingSense::from_direction(ftr::NAN).is_err());

        assert_eq!(SteppingSense::Same.sign(), 1.0);
        assert_eq!(SteppingSense::Opposite.sign(), -1.0);
        assert_eq!(SteppingSense::Same.reversed(), SteppingSense::Opposite);
    }
}
