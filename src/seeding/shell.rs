//! Random seeding in a spherical shell.

use super::impl_seeder_for_point_list;
use crate::{
    ensure_valid,
    error::TracingResult,
    geometry::{Point3, Vec3},
    num,
    tracing::ftr,
};
use rand::{
    distributions::{Distribution, Uniform},
    Rng,
};
use std::f64::consts::TAU;

/// Generator for 3D seed points randomly placed between two concentric spheres.
#[derive(Clone, Debug)]
pub struct ShellSeeder3 {
    seed_points: Vec<Point3<ftr>>,
}

impl ShellSeeder3 {
    /// Creates a new seeder producing randomly placed points in a spherical shell.
    ///
    /// Directions are distributed uniformly over the sphere and the distances
    /// from the center uniformly between the inner and outer radius.
    ///
    /// # Parameters
    ///
    /// - `center`: Center of the shell.
    /// - `inner_radius`: Smallest distance of a seed point from the center.
    /// - `outer_radius`: Largest distance of a seed point from the center.
    /// - `n_seeds`: Number of seed points to generate.
    pub fn random(
        center: Point3<ftr>,
        inner_radius: ftr,
        outer_radius: ftr,
        n_seeds: usize,
    ) -> TracingResult<Self> {
        Self::random_with_rng(
            center,
            inner_radius,
            outer_radius,
            n_seeds,
            &mut rand::thread_rng(),
        )
    }

    /// Like `random`, but draws from the given random number generator.
    pub fn random_with_rng<R: Rng + ?Sized>(
        center: Point3<ftr>,
        inner_radius: ftr,
        outer_radius: ftr,
        n_seeds: usize,
        rng: &mut R,
    ) -> TracingResult<Self> {
        ensure_valid!(
            center.is_finite(),
            "Shell center must be finite, got {}",
            center
        );
        ensure_valid!(
            num::is_finite_and_non_negative(inner_radius),
            "Inner shell radius must be finite and non-negative, got {}",
            inner_radius
        );
        ensure_valid!(
            outer_radius.is_finite() && outer_radius >= inner_radius,
            "Outer shell radius must be finite and at least the inner radius ({}), got {}",
            inner_radius,
            outer_radius
        );

        let cos_polar_angles = Uniform::new_inclusive(-1.0, 1.0);
        let azimuthal_angles = Uniform::new(0.0, TAU);
        let radii = Uniform::new_inclusive(inner_radius, outer_radius);

        let seed_points = (0..n_seeds)
            .map(|_| {
                let cos_polar_angle: ftr = cos_polar_angles.sample(rng);
                let sin_polar_angle = (1.0 - cos_polar_angle * cos_polar_angle).max(0.0).sqrt();
                let azimuthal_angle: ftr = azimuthal_angles.sample(rng);
                let direction = Vec3::new(
                    sin_polar_angle * azimuthal_angle.cos(),
                    sin_polar_angle * azimuthal_angle.sin(),
                    cos_polar_angle,
                );
                &center + &(direction * radii.sample(rng))
            })
            .collect();

        Ok(Self { seed_points })
    }

    pub fn seed_points(&self) -> &[Point3<ftr>] {
        &self.seed_points
    }
}

impl_seeder_for_point_list!(ShellSeeder3);
