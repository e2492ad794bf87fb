//! Command line interface for seeding on rings around an axis.

use crate::{
    cli::utils::{self as cli_utils, AllowZero},
    exit_on_error, exit_on_false,
    seeding::ring::RingSeeder3,
    tracing::ftr,
};
use clap::{Arg, ArgMatches, Command};

/// Creates a subcommand for using a ring seeder.
pub fn create_ring_seeder_subcommand() -> Command<'static> {
    Command::new("ring_seeder")
        .about("Place seed points on rings around an axis")
        .long_about(
            "Place seed points on rings around an axis.\n\
             The rings lie in the plane perpendicular to the axis at the given offset\n\
             along the axis from the center. Angles are measured from the x-axis when\n\
             the axis points along z.",
        )
        .arg(
            Arg::new("center")
                .long("center")
                .require_equals(true)
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .value_name("X,Y,Z")
                .help("Position on the axis that the offset is measured from")
                .takes_value(true)
                .multiple_values(true)
                .default_value("0,0,0"),
        )
        .arg(
            Arg::new("axis")
                .long("axis")
                .require_equals(true)
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .value_name("X,Y,Z")
                .help("Direction of the axis the rings are centered on")
                .takes_value(true)
                .multiple_values(true)
                .default_value("0,0,1"),
        )
        .arg(
            Arg::new("offset")
                .long("offset")
                .require_equals(true)
                .allow_hyphen_values(true)
                .value_name("DISTANCE")
                .help("Distance along the axis from the center to the plane of the rings")
                .takes_value(true)
                .default_value("1.1"),
        )
        .arg(
            Arg::new("radii")
                .long("radii")
                .require_equals(true)
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .value_name("RADII")
                .help("Radius of each ring (comma-separated)")
                .takes_value(true)
                .multiple_values(true)
                .default_value("0.1"),
        )
        .arg(
            Arg::new("angles")
                .long("angles")
                .require_equals(true)
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .allow_hyphen_values(true)
                .value_name("DEGREES")
                .help("Angles of the seed points on each ring, in degrees (comma-separated)")
                .takes_value(true)
                .multiple_values(true)
                .conflicts_with("n-angles"),
        )
        .arg(
            Arg::new("n-angles")
                .long("n-angles")
                .require_equals(true)
                .value_name("NUMBER")
                .help("Number of evenly spaced seed points on each ring, starting at zero angle")
                .takes_value(true)
                .default_value("4"),
        )
}

/// Creates a ring seeder based on the provided arguments.
pub fn create_ring_seeder_from_arguments(arguments: &ArgMatches) -> RingSeeder3 {
    let center = cli_utils::parse_point3(arguments, "center");
    let axis = cli_utils::parse_vec3(arguments, "axis", AllowZero::No);
    let offset: ftr =
        cli_utils::get_finite_float_value_from_required_parseable_argument(arguments, "offset");
    let radii: Vec<ftr> =
        cli_utils::get_finite_float_values_from_required_parseable_argument(arguments, "radii");

    exit_on_false!(
        radii.iter().all(|&radius| radius >= 0.0),
        "Error: Ring radii must be non-negative"
    );

    let seeder = if let Some(angles) =
        cli_utils::get_finite_float_values_from_parseable_argument::<ftr>(arguments, "angles")
    {
        let angles: Vec<ftr> = angles.into_iter().map(ftr::to_radians).collect();
        RingSeeder3::new(center, axis, offset, &radii, &angles)
    } else {
        let n_angles: usize =
            cli_utils::get_value_from_required_parseable_argument(arguments, "n-angles");
        RingSeeder3::regular(center, axis, offset, &radii, n_angles)
    };

    exit_on_error!(seeder, "Error: Could not create ring seeder: {}")
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::{geometry::Point3, seeding::Seeder3};
    use approx::assert_abs_diff_eq;

    fn seeder_from(args: &[&str]) -> RingSeeder3 {
        let arguments = create_ring_seeder_subcommand()
            .no_binary_name(true)
            .get_matches_from(args.iter().copied());
        create_ring_seeder_from_arguments(&arguments)
    }

    #[test]
    fn default_ring_seeder_places_four_seeds_above_origin() {
        let seeder = seeder_from(&[]);
        assert_eq!(seeder.number_of_points(), 4);
        let expected = [
            Point3::new(0.1, 0.0, 1.1),
            Point3::new(0.0, 0.1, 1.1),
            Point3::new(-0.1, 0.0, 1.1),
            Point3::new(0.0, -0.1, 1.1),
        ];
        for (point, expected) in seeder.seed_points().iter().zip(expected) {
            assert_abs_diff_eq!(*point, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn explicit_angles_are_given_in_degrees() {
        let seeder = seeder_from(&["--radii=1,2", "--angles=90", "--offset=-1"]);
        assert_eq!(seeder.number_of_points(), 2);
        assert_abs_diff_eq!(
            seeder.seed_points()[1],
            Point3::new(0.0, 2.0, -1.0),
            epsilon = 1e-12
        );
    }
}
