//! Basic field line tracing.

use super::{FieldLineTrace3, FieldLineTracer3};
use crate::{
    error::TracingResult,
    field::FieldFunction3,
    geometry::{Point3, Vec3},
    tracing::{
        self, ftr,
        stepping::{
            euler::{EulerStepper3, EulerStepperConfig},
            StepperInstruction, SteppingSense, StoppingCause,
        },
        TracerResult,
    },
};

/// Whether to trace a field line a specified direction or in both directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldLineTracingSense {
    Both,
    One(SteppingSense),
}

impl FieldLineTracingSense {
    pub fn same() -> Self {
        FieldLineTracingSense::One(SteppingSense::Same)
    }
    pub fn opposite() -> Self {
        FieldLineTracingSense::One(SteppingSense::Opposite)
    }

    /// Returns the senses to trace in, with the opposite sense first.
    pub fn senses(&self) -> Vec<SteppingSense> {
        match self {
            Self::Both => vec![SteppingSense::Opposite, SteppingSense::Same],
            Self::One(sense) => vec![*sense],
        }
    }
}

/// Configuration parameters for basic field line tracer.
#[derive(Clone, Debug)]
pub struct BasicFieldLineTracerConfig {
    /// Direction(s) to trace the field line relative to the field direction.
    pub tracing_sense: FieldLineTracingSense,
    /// Configuration for the stepper advancing along the field line.
    pub stepper: EulerStepperConfig,
    /// Largest number of steps to take in each direction.
    pub max_steps: usize,
}

/// A basic field line tracer for 3D vector fields.
#[derive(Clone, Debug)]
pub struct BasicFieldLineTracer3 {
    config: BasicFieldLineTracerConfig,
    stepper: EulerStepper3,
}

impl BasicFieldLineTracer3 {
    /// Creates a new basic field line tracer.
    pub fn new(config: BasicFieldLineTracerConfig) -> TracingResult<Self> {
        config.validate()?;
        let stepper = EulerStepper3::new(config.stepper.clone())?;
        Ok(BasicFieldLineTracer3 { config, stepper })
    }

    /// Returns the configuration of the tracer.
    pub fn config(&self) -> &BasicFieldLineTracerConfig {
        &self.config
    }

    /// Traces the half of the field line starting at the given seed and
    /// extending in the given sense.
    pub fn trace_in_sense<Fi>(
        &self,
        field: &Fi,
        seed: &Point3<ftr>,
        sense: SteppingSense,
    ) -> FieldLineTrace3
    where
        Fi: FieldFunction3 + ?Sized,
    {
        let mut positions = Vec::with_capacity(self.config.max_steps.saturating_add(1).min(
            Self::MAX_PREALLOCATED_POINTS,
        ));
        let mut length = 0.0;

        let mut callback = |_: &Vec3<ftr>, position: &Point3<ftr>, distance: ftr| {
            positions.push(*position);
            length = distance;
            StepperInstruction::Continue
        };

        let stopping_cause = match tracing::trace_3d_field_line(
            field,
            self.stepper.clone(),
            seed,
            sense,
            self.config.max_steps,
            &mut callback,
        ) {
            TracerResult::Ok(cause) => cause,
            TracerResult::Void => StoppingCause::StoppedByCallback,
        };

        FieldLineTrace3::new(positions, sense, stopping_cause, length)
    }

    // Avoids huge upfront allocations for very large step limits
    const MAX_PREALLOCATED_POINTS: usize = 1 << 16;
}

impl FieldLineTracer3 for BasicFieldLineTracer3 {
    fn trace<Fi>(&self, field: &Fi, seed: &Point3<ftr>) -> Vec<FieldLineTrace3>
    where
        Fi: FieldFunction3 + ?Sized,
    {
        self.config
            .tracing_sense
            .senses()
            .into_iter()
            .map(|sense| self.trace_in_sense(field, seed, sense))
            .collect()
    }
}

impl BasicFieldLineTracerConfig {
    pub const DEFAULT_TRACING_SENSE: FieldLineTracingSense = FieldLineTracingSense::Both;
    pub const DEFAULT_MAX_STEPS: usize = 8000;

    /// Checks that the configuration parameters are valid.
    pub fn validate(&self) -> TracingResult<()> {
        self.stepper.validate()
    }
}

impl Default for BasicFieldLineTracerConfig {
    fn default() -> Self {
        BasicFieldLineTracerConfig {
            tracing_sense: Self::DEFAULT_TRACING_SENSE,
            stepper: EulerStepperConfig::default(),
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }
}
