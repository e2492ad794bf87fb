//! Stepping with the explicit Euler method along the unit field direction.
//!
//! Every step has the same Euclidean length regardless of the field
//! magnitude, so the output points are evenly spaced along the field line.

use super::{Stepper3, StepperInstruction, StepperResult, SteppingSense, StoppingCause};
use crate::{
    ensure_valid,
    error::TracingResult,
    field::FieldFunction3,
    geometry::{Point3, Vec3},
    num,
    tracing::ftr,
};

/// Configuration parameters for Euler steppers.
#[derive(Clone, Debug)]
pub struct EulerStepperConfig {
    /// Distance to advance along the field line in each step.
    pub step_length: ftr,
    /// Stepping stops where the field magnitude is smaller than this.
    pub null_field_threshold: ftr,
}

/// A stepper taking fixed-length steps along the local field direction.
#[derive(Clone, Debug)]
pub struct EulerStepper3 {
    config: EulerStepperConfig,
    position: Point3<ftr>,
    distance: ftr,
}

impl EulerStepper3 {
    /// Creates a new Euler stepper.
    pub fn new(config: EulerStepperConfig) -> TracingResult<Self> {
        config.validate()?;
        Ok(EulerStepper3 {
            config,
            position: Point3::origin(),
            distance: 0.0,
        })
    }

    /// Returns the configuration of the stepper.
    pub fn config(&self) -> &EulerStepperConfig {
        &self.config
    }
}

impl Stepper3 for EulerStepper3 {
    fn place<Fi, C>(
        &mut self,
        _field: &Fi,
        _sense: SteppingSense,
        position: &Point3<ftr>,
        callback: &mut C,
    ) -> StepperResult<()>
    where
        Fi: FieldFunction3 + ?Sized,
        C: FnMut(&Vec3<ftr>, &Point3<ftr>, ftr) -> StepperInstruction,
    {
        self.position = *position;
        self.distance = 0.0;
        match callback(&Vec3::zero(), &self.position, self.distance) {
            StepperInstruction::Continue => StepperResult::Ok(()),
            StepperInstruction::Terminate => {
                StepperResult::Stopped(StoppingCause::StoppedByCallback)
            }
        }
    }

    fn step<Fi, C>(&mut self, field: &Fi, sense: SteppingSense, callback: &mut C) -> StepperResult<()>
    where
        Fi: FieldFunction3 + ?Sized,
        C: FnMut(&Vec3<ftr>, &Point3<ftr>, ftr) -> StepperInstruction,
    {
        let field_vector = field.evaluate(&self.position);
        let field_strength = field_vector.length();

        if !field_strength.is_finite() {
            return StepperResult::Stopped(StoppingCause::NonFinite);
        }
        if field_strength < self.config.null_field_threshold || field_strength == 0.0 {
            return StepperResult::Stopped(StoppingCause::Null);
        }

        let displacement =
            field_vector * (sense.sign() * self.config.step_length / field_strength);

        self.position = &self.position + &displacement;
        self.distance += self.config.step_length;

        match callback(&displacement, &self.position, self.distance) {
            StepperInstruction::Continue => StepperResult::Ok(()),
            StepperInstruction::Terminate => {
                StepperResult::Stopped(StoppingCause::StoppedByCallback)
            }
        }
    }

    fn position(&self) -> &Point3<ftr> {
        &self.position
    }

    fn distance(&self) -> ftr {
        self.distance
    }
}

impl EulerStepperConfig {
    pub const DEFAULT_STEP_LENGTH: ftr = 0.03;
    pub const DEFAULT_NULL_FIELD_THRESHOLD: ftr = 1e-9;

    /// Checks that the configuration parameters are valid.
    pub fn validate(&self) -> TracingResult<()> {
        ensure_valid!(
            num::is_finite_and_positive(self.step_length),
            "Step length must be finite and positive, got {}",
            self.step_length
        );
        ensure_valid!(
            num::is_finite_and_non_negative(self.null_field_threshold),
            "Null field threshold must be finite and non-negative, got {}",
            self.null_field_threshold
        );
        Ok(())
    }
}

impl Default for EulerStepperConfig {
    fn default() -> Self {
        EulerStepperConfig {
            step_length: Self::DEFAULT_STEP_LENGTH,
            null_field_threshold: Self::DEFAULT_NULL_FIELD_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::field::{uniform::UniformField3, FnField3};
    use approx::assert_abs_diff_eq;

    fn always_continue(_: &Vec3<ftr>, _: &Point3<ftr>, _: ftr) -> StepperInstruction {
        StepperInstruction::Continue
    }

    #[test]
    fn euler_step_has_configured_length_regardless_of_field_strength() {
        let field = UniformField3::new(Vec3::new(300.0, 0.0, 400.0)).unwrap();
        let mut stepper = EulerStepper3::new(EulerStepperConfig {
            step_length: 0.5,
            ..EulerStepperConfig::default()
        })
        .unwrap();
        let mut callback = always_continue;

        stepper.place(&field, SteppingSense::Same, &Point3::origin(), &mut callback);
        assert!(matches!(
            stepper.step(&field, SteppingSense::Same, &mut callback),
            StepperResult::Ok(())
        ));
        assert_abs_diff_eq!(*stepper.position(), Point3::new(0.3, 0.0, 0.4), epsilon = 1e-15);
        assert_abs_diff_eq!(stepper.distance(), 0.5);

        stepper.step(&field, SteppingSense::Opposite, &mut callback);
        assert_abs_diff_eq!(*stepper.position(), Point3::origin(), epsilon = 1e-15);
    }

    #[test]
    fn euler_stepper_stops_at_null_and_non_finite_fields() {
        let mut stepper = EulerStepper3::new(EulerStepperConfig::default()).unwrap();
        let mut callback = always_continue;

        let weak = UniformField3::new(Vec3::new(0.0, 1e-10, 0.0)).unwrap();
        stepper.place(&weak, SteppingSense::Same, &Point3::origin(), &mut callback);
        assert!(matches!(
            stepper.step(&weak, SteppingSense::Same, &mut callback),
            StepperResult::Stopped(StoppingCause::Null)
        ));
        assert_eq!(*stepper.position(), Point3::origin());

        let broken = FnField3::new(|_: &Point3<ftr>| Vec3::new(ftr::NAN, 0.0, 0.0));
        assert!(matches!(
            stepper.step(&broken, SteppingSense::Same, &mut callback),
            StepperResult::Stopped(StoppingCause::NonFinite)
        ));
    }

    #[test]
    fn zero_threshold_still_stops_at_exact_null() {
        let mut stepper = EulerStepper3::new(EulerStepperConfig {
            null_field_threshold: 0.0,
            ..EulerStepperConfig::default()
        })
        .unwrap();
        let mut callback = always_continue;
        let null = UniformField3::new(Vec3::zero()).unwrap();
        stepper.place(&null, SteppingSense::Same, &Point3::origin(), &mut callback);
        assert!(matches!(
            stepper.step(&null, SteppingSense::Same, &mut callback),
            StepperResult::Stopped(StoppingCause::Null)
        ));
    }

    #[test]
    fn callback_can_terminate_stepping() {
        let field = UniformField3::new(Vec3::new(1.0, 0.0, 0.0)).unwrap();
        let mut stepper = EulerStepper3::new(EulerStepperConfig::default()).unwrap();
        let mut callback = |_: &Vec3<ftr>, _: &Point3<ftr>, distance: ftr| {
            if distance > 0.05 {
                StepperInstruction::Terminate
            } else {
                StepperInstruction::Continue
            }
        };
        stepper.place(&field, SteppingSense::Same, &Point3::origin(), &mut callback);
        assert!(matches!(
            stepper.step(&field, SteppingSense::Same, &mut callback),
            StepperResult::Ok(())
        ));
        assert!(matches!(
            stepper.step(&field, SteppingSense::Same, &mut callback),
            StepperResult::Stopped(StoppingCause::StoppedByCallback)
        ));
    }

    #[test]
    fn invalid_stepper_configurations_are_rejected() {
        for step_length in [0.0, -0.03, ftr::NAN, ftr::INFINITY] {
            assert!(EulerStepper3::new(EulerStepperConfig {
                step_length,
                ..EulerStepperConfig::default()
            })
            .is_err());
        }
        assert!(EulerStepper3::new(EulerStepperConfig {
            null_field_threshold: -1e-9,
            ..EulerStepperConfig::default()
        })
        .is_err());
    }
}
