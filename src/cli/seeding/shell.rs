//! Command line interface for random seeding in a spherical shell.

use crate::{
    cli::utils as cli_utils, exit_on_error, seeding::shell::ShellSeeder3, tracing::ftr,
};
use clap::{Arg, ArgMatches, Command};

/// Creates a subcommand for using a shell seeder.
pub fn create_shell_seeder_subcommand() -> Command<'static> {
    Command::new("shell_seeder")
        .about("Place seed points randomly in a spherical shell")
        .arg(
            Arg::new("center")
                .long("center")
                .require_equals(true)
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .value_name("X,Y,Z")
                .help("Center of the shell")
                .takes_value(true)
                .multiple_values(true)
                .default_value("0,0,0"),
        )
        .arg(
            Arg::new("inner-radius")
                .long("inner-radius")
                .require_equals(true)
                .value_name("RADIUS")
                .help("Smallest distance of a seed point from the center")
                .takes_value(true)
                .default_value("0.5"),
        )
        .arg(
            Arg::new("outer-radius")
                .long("outer-radius")
                .require_equals(true)
                .value_name("RADIUS")
                .help("Largest distance of a seed point from the center")
                .takes_value(true)
                .default_value("1.5"),
        )
        .arg(
            Arg::new("n-seeds")
                .short('n')
                .long("n-seeds")
                .require_equals(true)
                .value_name("NUMBER")
                .help("Number of seed points to generate")
                .takes_value(true)
                .default_value("100"),
        )
}

/// Creates a shell seeder based on the provided arguments.
pub fn create_shell_seeder_from_arguments(arguments: &ArgMatches) -> ShellSeeder3 {
    let center = cli_utils::parse_point3(arguments, "center");
    let inner_radius: ftr = cli_utils::get_finite_float_value_from_required_parseable_argument(
        arguments,
        "inner-radius",
    );
    let outer_radius: ftr = cli_utils::get_finite_float_value_from_required_parseable_argument(
        arguments,
        "outer-radius",
    );
    let n_seeds: usize = cli_utils::get_value_from_required_parseable_argument(arguments, "n-seeds");

    exit_on_error!(
        ShellSeeder3::random(center, inner_radius, outer_radius, n_seeds),
        "Error: Could not create shell seeder: {}"
    )
}
