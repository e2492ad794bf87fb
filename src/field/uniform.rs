//! Spatially constant field.

use super::{ffl, FieldFunction3};
use crate::{
    ensure_valid,
    error::TracingResult,
    geometry::{Point3, Vec3},
};

/// Field with the same vector at every position.
#[derive(Clone, Debug)]
pub struct UniformField3 {
    vector: Vec3<ffl>,
}

impl UniformField3 {
    /// Creates a new uniform field with the given field vector.
    pub fn new(vector: Vec3<ffl>) -> TracingResult<Self> {
        ensure_valid!(
            vector.is_finite(),
            "Uniform field vector must be finite, got {}",
            vector
        );
        Ok(Self { vector })
    }

    /// Returns the field vector.
    pub fn vector(&self) -> &Vec3<ffl> {
        &self.vector
    }
}

impl FieldFunction3 for UniformField3 {
    fn evaluate(&self, _point: &Point3<ffl>) -> Vec3<ffl> {
        self.vector
    }
}
