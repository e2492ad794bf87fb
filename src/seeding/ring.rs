//! Seeding on concentric rings around an axis.

use super::impl_seeder_for_point_list;
use crate::{
    ensure_valid,
    error::{TracingError, TracingResult},
    geometry::{Dim3, Point3, Vec3},
    num,
    tracing::ftr,
};
use std::f64::consts::TAU;

/// Generator for 3D seed points lying on circles centered on an axis.
///
/// Each circle lies in the plane perpendicular to the axis at a given
/// offset along the axis from the center position.
#[derive(Clone, Debug)]
pub struct RingSeeder3 {
    seed_points: Vec<Point3<ftr>>,
}

impl RingSeeder3 {
    /// Creates a new seeder producing points on rings around an axis.
    ///
    /// # Parameters
    ///
    /// - `center`: Position on the axis that the axial offset is measured from.
    /// - `axis`: Direction of the axis (does not have to be normalized).
    /// - `axial_offset`: Signed distance along the axis from `center` to the plane of the rings.
    /// - `radii`: Radius of each ring.
    /// - `angles`: Angles [rad] of the points on each ring, measured from the first basis vector
    ///   perpendicular to the axis.
    ///
    /// # Returns
    ///
    /// A `TracingResult` which is either:
    ///
    /// - `Ok`: Contains a new `RingSeeder3` with the points ordered by radius, then by angle.
    /// - `Err`: The axis was zero or non-finite, or a radius or angle was invalid.
    pub fn new(
        center: Point3<ftr>,
        axis: Vec3<ftr>,
        axial_offset: ftr,
        radii: &[ftr],
        angles: &[ftr],
    ) -> TracingResult<Self> {
        ensure_valid!(
            center.is_finite() && axial_offset.is_finite(),
            "Ring center and axial offset must be finite, got {} and {}",
            center,
            axial_offset
        );
        let unit_axis = axis.normalized().ok_or_else(|| {
            TracingError::invalid_argument(format!(
                "Ring axis must be finite and non-zero, got {}",
                axis
            ))
        })?;
        for &radius in radii {
            ensure_valid!(
                num::is_finite_and_non_negative(radius),
                "Ring radii must be finite and non-negative, got {}",
                radius
            );
        }
        for &angle in angles {
            ensure_valid!(angle.is_finite(), "Ring angles must be finite, got {}", angle);
        }

        let (first_basis, second_basis) = perpendicular_basis(&unit_axis);
        let plane_center = &center + &(&unit_axis * axial_offset);

        let seed_points = radii
            .iter()
            .flat_map(|&radius| {
                angles.iter().map(move |&angle| {
                    let radial = &(&first_basis * angle.cos()) + &(&second_basis * angle.sin());
                    &plane_center + &(radial * radius)
                })
            })
            .collect();

        Ok(Self { seed_points })
    }

    /// Creates a new seeder with the given number of evenly spaced angles on each ring,
    /// starting at zero.
    pub fn regular(
        center: Point3<ftr>,
        axis: Vec3<ftr>,
        axial_offset: ftr,
        radii: &[ftr],
        n_angles: usize,
    ) -> TracingResult<Self> {
        let angles: Vec<_> = (0..n_angles)
            .map(|idx| TAU * (idx as ftr) / (n_angles as ftr))
            .collect();
        Self::new(center, axis, axial_offset, radii, &angles)
    }

    pub fn seed_points(&self) -> &[Point3<ftr>] {
        &self.seed_points
    }
}

impl_seeder_for_point_list!(RingSeeder3);

// Gram-Schmidt on whichever of x or y is least aligned with the axis
fn perpendicular_basis(unit_axis: &Vec3<ftr>) -> (Vec3<ftr>, Vec3<ftr>) {
    let trial = if unit_axis[Dim3::X].abs() < 0.9 {
        Vec3::unit(Dim3::X)
    } else {
        Vec3::unit(Dim3::Y)
    };
    let projected = &trial - &(unit_axis * trial.dot(unit_axis));
    let first = &projected / projected.length();
    let second = unit_axis.cross(&first);
    (first, second)
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::seeding::Seeder3;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn rings_around_z_axis_use_x_and_y_directions() {
        let seeder = RingSeeder3::regular(
            Point3::origin(),
            Vec3::new(0.0, 0.0, 2.0),
            1.1,
            &[0.1],
            4,
        )
        .unwrap();
        assert_eq!(seeder.number_of_points(), 4);

        let expected = [
            Point3::new(0.1, 0.0, 1.1),
            Point3::new(0.0, 0.1, 1.1),
            Point3::new(-0.1, 0.0, 1.1),
            Point3::new(0.0, -0.1, 1.1),
        ];
        for (point, expected) in seeder.into_iter().zip(expected) {
            assert_abs_diff_eq!(point, expected, epsilon = 1e-15);
        }
    }

    #[test]
    fn ring_points_are_ordered_by_radius_then_angle() {
        let seeder = RingSeeder3::new(
            Point3::new(1.0, 1.0, 1.0),
            Vec3::new(0.0, 0.0, 1.0),
            0.0,
            &[1.0, 2.0],
            &[0.0, FRAC_PI_2],
        )
        .unwrap();
        let points = seeder.seed_points();
        assert_eq!(points.len(), 4);
        assert_abs_diff_eq!(points[1], Point3::new(1.0, 2.0, 1.0), epsilon = 1e-15);
        assert_abs_diff_eq!(points[2], Point3::new(3.0, 1.0, 1.0), epsilon = 1e-15);
    }

    #[test]
    fn rings_around_tilted_axis_are_perpendicular_to_it() {
        let axis = Vec3::new(1.0, -2.0, 0.5);
        let center = Point3::new(0.3, 0.2, -0.4);
        let seeder = RingSeeder3::regular(center, axis, -0.7, &[0.0, 0.25, 3.0], 7).unwrap();
        let unit_axis = axis.normalized().unwrap();
        let plane_center = &center + &(&unit_axis * -0.7);

        for point in seeder.seed_points() {
            let radial = point - &plane_center;
            assert_abs_diff_eq!(radial.dot(&unit_axis), 0.0, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(
            seeder.seed_points()[10].distance_to(&plane_center),
            0.25,
            epsilon = 1e-12
        );
    }

    #[test]
    fn invalid_ring_parameters_are_rejected() {
        let center = Point3::origin();
        assert!(RingSeeder3::regular(center, Vec3::zero(), 1.0, &[0.1], 4).is_err());
        assert!(
            RingSeeder3::regular(center, Vec3::new(0.0, ftr::NAN, 1.0), 1.0, &[0.1], 4).is_err()
        );
        assert!(RingSeeder3::regular(center, Vec3::unit(Dim3::Z), 1.0, &[-0.1], 4).is_err());
        assert!(
            RingSeeder3::new(center, Vec3::unit(Dim3::Z), 1.0, &[0.1], &[ftr::INFINITY]).is_err()
        );
    }

    #[test]
    fn no_angles_gives_no_points() {
        let seeder =
            RingSeeder3::regular(Point3::origin(), Vec3::unit(Dim3::Z), 1.0, &[0.1, 0.2], 0)
                .unwrap();
        assert_eq!(seeder.number_of_points(), 0);
    }
}
