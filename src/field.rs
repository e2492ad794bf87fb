//! Analytical vector fields that can be traced.

pub mod dipole;
pub mod uniform;

use crate::geometry::{Point3, Vec3};

/// Floating-point precision to use for field evaluation.
#[allow(non_camel_case_types)]
pub type ffl = f64;

/// Defines the properties of a 3D vector field that can be evaluated
/// at any position.
///
/// Evaluation must be free of side effects, so that tracing the same
/// seed twice yields identical field lines.
pub trait FieldFunction3 {
    /// Computes the field vector at the given position.
    fn evaluate(&self, point: &Point3<ffl>) -> Vec3<ffl>;

    /// Whether the given position lies so close to a source of the field
    /// that the field is considered undefined there.
    fn is_singular_at(&self, _point: &Point3<ffl>) -> bool {
        false
    }
}

impl<Fi: FieldFunction3 + ?Sized> FieldFunction3 for &Fi {
    fn evaluate(&self, point: &Point3<ffl>) -> Vec3<ffl> {
        (**self).evaluate(point)
    }

    fn is_singular_at(&self, point: &Point3<ffl>) -> bool {
        (**self).is_singular_at(point)
    }
}

impl<Fi: FieldFunction3 + ?Sized> FieldFunction3 for Box<Fi> {
    fn evaluate(&self, point: &Point3<ffl>) -> Vec3<ffl> {
        self.as_ref().evaluate(point)
    }

    fn is_singular_at(&self, point: &Point3<ffl>) -> bool {
        self.as_ref().is_singular_at(point)
    }
}

/// Field given by an arbitrary closure mapping a position to a field vector.
#[derive(Clone, Debug)]
pub struct FnField3<C> {
    evaluator: C,
}

impl<C> FnField3<C>
where
    C: Fn(&Point3<ffl>) -> Vec3<ffl>,
{
    /// Creates a new field evaluated by the given closure.
    pub fn new(evaluator: C) -> Self {
        Self { evaluator }
    }
}

impl<C> FieldFunction3 for FnField3<C>
where
    C: Fn(&Point3<ffl>) -> Vec3<ffl>,
{
    fn evaluate(&self, point: &Point3<ffl>) -> Vec3<ffl> {
        (self.evaluator)(point)
    }
}

/// A field function that can be shared between threads.
pub type DynFieldFunction3 = Box<dyn FieldFunction3 + Sync + Send>;

#[cfg(test)]
mod tests {

    use super::*;
    use crate::geometry::Dim3;

    #[test]
    fn closure_field_is_evaluated_through_references_and_boxes() {
        let field = FnField3::new(|point: &Point3<ffl>| Vec3::new(-point[Dim3::Y], point[Dim3::X], 0.0));
        let point = Point3::new(1.0, 2.0, 3.0);
        let expected = Vec3::new(-2.0, 1.0, 0.0);

        assert_eq!(field.evaluate(&point), expected);
        assert_eq!((&field).evaluate(&point), expected);

        let boxed: DynFieldFunction3 = Box::new(field);
        assert_eq!(boxed.evaluate(&point), expected);
        assert!(!boxed.is_singular_at(&Point3::origin()));
    }
}
