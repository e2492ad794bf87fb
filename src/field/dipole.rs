//! Field of a point magnetic dipole.

use super::{ffl, FieldFunction3};
use crate::{
    ensure_valid,
    error::TracingResult,
    geometry::{Point3, Vec3},
    num,
};

/// Configuration parameters for a dipole field.
#[derive(Clone, Debug)]
pub struct DipoleFieldConfig {
    /// Magnetic moment vector of the dipole.
    pub moment: Vec3<ffl>,
    /// Position of the dipole.
    pub center: Point3<ffl>,
    /// Factor scaling the field magnitude. Not tied to physical units.
    pub scale: ffl,
    /// The field is zero at distances from the center smaller than this.
    pub singularity_radius: ffl,
}

/// Magnetic field of an idealized point dipole,
///
/// `B(r) = scale*(3*(m·r̂)*r̂ - m)/|r|^3`,
///
/// with `r` the displacement from the dipole center to the evaluation point.
#[derive(Clone, Debug)]
pub struct DipoleField3 {
    config: DipoleFieldConfig,
}

impl DipoleField3 {
    /// Creates a new dipole field.
    ///
    /// # Returns
    ///
    /// A `TracingResult` which is either:
    ///
    /// - `Ok`: Contains a new `DipoleField3`.
    /// - `Err`: The configuration contained non-finite values, a non-positive scale
    /// or a negative singularity radius.
    pub fn new(config: DipoleFieldConfig) -> TracingResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the magnetic moment of the dipole.
    pub fn moment(&self) -> &Vec3<ffl> {
        &self.config.moment
    }

    /// Returns the position of the dipole.
    pub fn center(&self) -> &Point3<ffl> {
        &self.config.center
    }

    /// Returns the factor scaling the field magnitude.
    pub fn scale(&self) -> ffl {
        self.config.scale
    }

    /// Returns the radius around the center inside which the field is zero.
    pub fn singularity_radius(&self) -> ffl {
        self.config.singularity_radius
    }
}

impl FieldFunction3 for DipoleField3 {
    fn evaluate(&self, point: &Point3<ffl>) -> Vec3<ffl> {
        let displacement = point - &self.config.center;
        let distance = displacement.length();

        if distance < self.config.singularity_radius {
            return Vec3::zero();
        }
        let direction = &displacement / distance;
        let moment = &self.config.moment;

        let field = &(&direction * (3.0 * moment.dot(&direction))) - moment;
        field * (self.config.scale / (distance * distance * distance))
    }

    fn is_singular_at(&self, point: &Point3<ffl>) -> bool {
        point.distance_to(&self.config.center) < self.config.singularity_radius
    }
}

impl DipoleFieldConfig {
    pub const DEFAULT_MOMENT: [ffl; 3] = [0.0, 0.0, 1.0];
    pub const DEFAULT_CENTER: [ffl; 3] = [0.0, 0.0, 0.0];
    pub const DEFAULT_SCALE: ffl = 0.05;
    pub const DEFAULT_SINGULARITY_RADIUS: ffl = 1e-7;

    /// Checks that the configuration describes a well-defined dipole field.
    pub fn validate(&self) -> TracingResult<()> {
        ensure_valid!(
            self.moment.is_finite(),
            "Dipole moment must be finite, got {}",
            self.moment
        );
        ensure_valid!(
            self.center.is_finite(),
            "Dipole center must be finite, got {}",
            self.center
        );
        ensure_valid!(
            num::is_finite_and_positive(self.scale),
            "Dipole field scale must be finite and positive, got {}",
            self.scale
        );
        ensure_valid!(
            num::is_finite_and_non_negative(self.singularity_radius),
            "Singularity radius must be finite and non-negative, got {}",
            self.singularity_radius
        );
        Ok(())
    }
}

impl Default for DipoleFieldConfig {
    fn default() -> Self {
        let [mx, my, mz] = Self::DEFAULT_MOMENT;
        let [cx, cy, cz] = Self::DEFAULT_CENTER;
        DipoleFieldConfig {
            moment: Vec3::new(mx, my, mz),
            center: Point3::new(cx, cy, cz),
            scale: Self::DEFAULT_SCALE,
            singularity_radius: Self::DEFAULT_SINGULARITY_RADIUS,
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::error::TracingError;
    use approx::assert_abs_diff_eq;

    fn unit_dipole() -> DipoleField3 {
        DipoleField3::new(DipoleFieldConfig {
            scale: 1.0,
            ..DipoleFieldConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn dipole_field_at_equator_is_antiparallel_to_moment() {
        let field = unit_dipole();
        assert_abs_diff_eq!(
            field.evaluate(&Point3::new(1.0, 0.0, 0.0)),
            Vec3::new(0.0, 0.0, -1.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn dipole_field_on_axis_is_twice_the_moment() {
        let field = unit_dipole();
        assert_abs_diff_eq!(
            field.evaluate(&Point3::new(0.0, 0.0, 1.0)),
            Vec3::new(0.0, 0.0, 2.0),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            field.evaluate(&Point3::new(0.0, 0.0, -1.0)),
            Vec3::new(0.0, 0.0, 2.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn dipole_field_decays_with_inverse_cube_of_distance() {
        let field = unit_dipole();
        let near = field.evaluate(&Point3::new(0.0, 0.5, 0.0)).length();
        let far = field.evaluate(&Point3::new(0.0, 1.0, 0.0)).length();
        assert_abs_diff_eq!(near / far, 8.0, epsilon = 1e-12);
    }

    #[test]
    fn dipole_field_is_shifted_and_scaled() {
        let field = DipoleField3::new(DipoleFieldConfig {
            moment: Vec3::new(1.0, 0.0, 0.0),
            center: Point3::new(1.0, 1.0, 1.0),
            scale: 0.05,
            singularity_radius: 1e-7,
        })
        .unwrap();
        assert_abs_diff_eq!(
            field.evaluate(&Point3::new(3.0, 1.0, 1.0)),
            Vec3::new(2.0 * 0.05 / 8.0, 0.0, 0.0),
            epsilon = 1e-15
        );
    }

    #[test]
    fn dipole_field_vanishes_near_center() {
        let field = unit_dipole();
        let center = Point3::origin();
        assert!(field.evaluate(&center).is_zero());
        assert!(field.evaluate(&Point3::new(0.0, 0.0, 5e-8)).is_zero());
        assert!(field.is_singular_at(&center));
        assert!(!field.is_singular_at(&Point3::new(0.0, 0.0, 1e-3)));
    }

    #[test]
    fn singularity_radius_is_configurable() {
        let field = DipoleField3::new(DipoleFieldConfig {
            singularity_radius: 0.5,
            ..DipoleFieldConfig::default()
        })
        .unwrap();
        assert!(field.evaluate(&Point3::new(0.0, 0.4, 0.0)).is_zero());
        assert!(!field.evaluate(&Point3::new(0.0, 0.6, 0.0)).is_zero());
    }

    #[test]
    fn invalid_dipole_configurations_are_rejected() {
        for scale in [0.0, -0.05, ffl::NAN, ffl::INFINITY] {
            let result = DipoleField3::new(DipoleFieldConfig {
                scale,
                ..DipoleFieldConfig::default()
            });
            assert!(matches!(result, Err(TracingError::InvalidArgument(_))));
        }
        assert!(DipoleField3::new(DipoleFieldConfig {
            singularity_radius: -1.0,
            ..DipoleFieldConfig::default()
        })
        .is_err());
        assert!(DipoleField3::new(DipoleFieldConfig {
            moment: Vec3::new(0.0, ffl::NAN, 1.0),
            ..DipoleFieldConfig::default()
        })
        .is_err());
    }
}
