//! Tracing field lines of a vector field.

pub mod field_line;
pub mod stepping;

use self::{
    field_line::{
        basic::{BasicFieldLineTracer3, BasicFieldLineTracerConfig, FieldLineTracingSense},
        FieldLineTrace3,
    },
    stepping::{
        euler::EulerStepperConfig, Stepper3, StepperInstruction, StepperResult, SteppingSense,
        StoppingCause,
    },
};
use crate::{
    error::TracingResult,
    field::FieldFunction3,
    geometry::{Point3, Vec3},
};

/// Floating-point precision to use for tracing.
#[allow(non_camel_case_types)]
pub type ftr = f64;

/// A tracer result which is either OK or void.
#[derive(Clone, Debug)]
pub enum TracerResult {
    Ok(StoppingCause),
    Void,
}

/// Traces a field line through a 3D vector field.
///
/// # Parameters
///
/// - `field`: Vector field to trace.
/// - `stepper`: Stepper to use (will be consumed).
/// - `start_position`: Position where the tracing should start.
/// - `sense`: Whether the field line should be traced in the same or opposite direction as the field.
/// - `max_steps`: Tracing is terminated after this number of steps.
/// - `callback`: Closure that for the start position and each step will be called with the displacement
/// vector from the previous to the current position, the current position and the total traced distance.
///
/// # Returns
///
/// A `TracerResult` which is either:
///
/// - `Ok`: Contains the `StoppingCause` indicating why tracing was terminated.
/// - `Void`: No field line was traced.
///
/// # Type parameters
///
/// - `Fi`: Type of field function.
/// - `St`: Type of stepper.
/// - `C`: Mutable function type taking a displacement, a position and a distance and returning a `StepperInstruction`.
pub fn trace_3d_field_line<Fi, St, C>(
    field: &Fi,
    mut stepper: St,
    start_position: &Point3<ftr>,
    sense: SteppingSense,
    max_steps: usize,
    callback: &mut C,
) -> TracerResult
where
    Fi: FieldFunction3 + ?Sized,
    St: Stepper3,
    C: FnMut(&Vec3<ftr>, &Point3<ftr>, ftr) -> StepperInstruction,
{
    match stepper.place(field, sense, start_position, callback) {
        StepperResult::Ok(_) => {}
        StepperResult::Stopped(_) => return TracerResult::Void,
    };
    for _ in 0..max_steps {
        if let StepperResult::Stopped(cause) = stepper.step(field, sense, callback) {
            return TracerResult::Ok(cause);
        }
    }
    TracerResult::Ok(StoppingCause::MaxStepsReached)
}

/// Traces a field line from the given seed in a single direction, using
/// fixed-length Euler steps along the unit field direction.
///
/// # Parameters
///
/// - `seed`: Position where the tracing should start.
/// - `field`: Vector field to trace.
/// - `step_size`: Distance between consecutive field line points.
/// - `max_steps`: Largest number of steps to take.
/// - `direction`: `+1` to trace along the field, `-1` to trace against it.
///
/// # Returns
///
/// A `TracingResult` which is either:
///
/// - `Ok`: Contains the traced `FieldLineTrace3`, starting at `seed` and holding at most `max_steps + 1` points.
/// - `Err`: `step_size` was not finite and positive, or `direction` was not `+1` or `-1`.
pub fn trace<Fi>(
    seed: &Point3<ftr>,
    field: &Fi,
    step_size: ftr,
    max_steps: usize,
    direction: ftr,
) -> TracingResult<FieldLineTrace3>
where
    Fi: FieldFunction3 + ?Sized,
{
    let sense = SteppingSense::from_direction(direction)?;
    let tracer = BasicFieldLineTracer3::new(BasicFieldLineTracerConfig {
        tracing_sense: FieldLineTracingSense::One(sense),
        stepper: EulerStepperConfig {
            step_length: step_size,
            ..EulerStepperConfig::default()
        },
        max_steps,
    })?;
    Ok(tracer.trace_in_sense(field, seed, sense))
}
