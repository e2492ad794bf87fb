//! Command line options for selecting the traced vector field.

use crate::{
    cli::utils::{self as cli_utils, AllowZero},
    error::TracingResult,
    field::{
        dipole::{DipoleField3, DipoleFieldConfig},
        uniform::UniformField3,
        DynFieldFunction3,
    },
    geometry::Vec3,
    tracing::ftr,
};
use clap::{Arg, ArgMatches, Command};

/// Which vector field to trace, with its parameters.
#[derive(Clone, Debug)]
pub enum FieldConfig {
    Dipole(DipoleFieldConfig),
    Uniform(Vec3<ftr>),
}

impl FieldConfig {
    /// Creates the configured field.
    pub fn build(self) -> TracingResult<DynFieldFunction3> {
        let field: DynFieldFunction3 = match self {
            Self::Dipole(config) => Box::new(DipoleField3::new(config)?),
            Self::Uniform(vector) => Box::new(UniformField3::new(vector)?),
        };
        Ok(field)
    }
}

/// Adds the options configuring the traced field to the given command.
pub fn add_field_arguments(command: Command<'static>) -> Command<'static> {
    command
        .arg(
            Arg::new("moment")
                .long("moment")
                .require_equals(true)
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .value_name("X,Y,Z")
                .help("Dipole moment vector")
                .takes_value(true)
                .multiple_values(true)
                .default_value("0,0,1"),
        )
        .arg(
            Arg::new("center")
                .long("center")
                .require_equals(true)
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .value_name("X,Y,Z")
                .help("Position of the dipole")
                .takes_value(true)
                .multiple_values(true)
                .default_value("0,0,0"),
        )
        .arg(
            Arg::new("scale")
                .long("scale")
                .require_equals(true)
                .value_name("VALUE")
                .help("Factor scaling the strength of the dipole field")
                .takes_value(true)
                .default_value("0.05"),
        )
        .arg(
            Arg::new("singularity-radius")
                .long("singularity-radius")
                .require_equals(true)
                .value_name("VALUE")
                .help("Distance from the dipole within which the field is taken to vanish")
                .takes_value(true)
                .default_value("1e-7"),
        )
        .arg(
            Arg::new("uniform-field")
                .long("uniform-field")
                .require_equals(true)
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .value_name("X,Y,Z")
                .help("Trace a spatially constant field with this vector instead of a dipole")
                .takes_value(true)
                .multiple_values(true),
        )
}

/// Determines the field configuration from the given arguments.
pub fn construct_field_config_from_options(arguments: &ArgMatches) -> FieldConfig {
    if arguments.is_present("uniform-field") {
        return FieldConfig::Uniform(cli_utils::parse_vec3(
            arguments,
            "uniform-field",
            AllowZero::Yes,
        ));
    }
    FieldConfig::Dipole(DipoleFieldConfig {
        moment: cli_utils::parse_vec3(arguments, "moment", AllowZero::Yes),
        center: cli_utils::parse_point3(arguments, "center"),
        scale: cli_utils::get_finite_float_value_from_required_parseable_argument(
            arguments, "scale",
        ),
        singularity_radius: cli_utils::get_finite_float_value_from_required_parseable_argument(
            arguments,
            "singularity-radius",
        ),
    })
}
