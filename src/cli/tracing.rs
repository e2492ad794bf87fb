//! Command line interface for field line tracing.

use crate::{
    cli::{
        field::{add_field_arguments, construct_field_config_from_options},
        seeding::{
            manual::{create_manual_seeder_from_arguments, create_manual_seeder_subcommand},
            ring::{create_ring_seeder_from_arguments, create_ring_seeder_subcommand},
        },
        utils as cli_utils,
    },
    exit_on_error, exit_with_error,
    field::DynFieldFunction3,
    io::{utils::AtomicOutputFile, Verbosity},
    seeding::Seeder3,
    tracing::{
        field_line::{
            basic::{BasicFieldLineTracer3, BasicFieldLineTracerConfig, FieldLineTracingSense},
            FieldLineSet3,
        },
        ftr,
        stepping::euler::EulerStepperConfig,
    },
};
use clap::{Arg, ArgMatches, Command};
use std::{fmt, path::Path};

#[cfg(feature = "random-seeding")]
use crate::cli::seeding::shell::{
    create_shell_seeder_from_arguments, create_shell_seeder_subcommand,
};

/// Builds a representation of the `trace` command line subcommand.
pub fn create_trace_subcommand() -> Command<'static> {
    let command = Command::new("trace")
        .about("Trace field lines of a vector field")
        .after_help(
            "You can use a subcommand to select how seed points are generated, with options\n\
             for the seeder directly following the subcommand. If no seeder is specified,\n\
             seeds are placed by the ring seeder with its default parameters.",
        )
        .arg(
            Arg::new("output-file")
                .value_name("OUTPUT_FILE")
                .help(
                    "Path of the file where the field line data should be saved\n\
                       Writes in the following format based on the file extension:\
                       \n    *.fl: Creates a custom little-endian binary file\
                       \n    *.pickle: Creates a Python pickle file (requires the pickle feature)\
                       \n    *.json: Creates a JSON file (requires the json feature)",
                )
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::new("overwrite")
                .long("overwrite")
                .help("Automatically overwrite any existing files")
                .conflicts_with("no-overwrite"),
        )
        .arg(
            Arg::new("no-overwrite")
                .long("no-overwrite")
                .help("Do not overwrite any existing files")
                .conflicts_with("overwrite"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print status messages while tracing field lines"),
        )
        .arg(
            Arg::new("progress")
                .short('p')
                .long("progress")
                .help("Show progress bar for tracing (also implies `verbose`)"),
        )
        .arg(
            Arg::new("print-parameter-values")
                .long("print-parameter-values")
                .help("Prints the values of all the parameters that will be used")
                .hide(true),
        )
        .arg(
            Arg::new("tracing-sense")
                .long("tracing-sense")
                .require_equals(true)
                .value_name("SENSE")
                .help("Direction(s) to trace the field line relative to the field direction")
                .takes_value(true)
                .possible_values(&["both", "same", "opposite"])
                .default_value("both"),
        )
        .arg(
            Arg::new("step-size")
                .long("step-size")
                .require_equals(true)
                .value_name("LENGTH")
                .help("Distance between consecutive field line points")
                .takes_value(true)
                .default_value("0.03"),
        )
        .arg(
            Arg::new("max-steps")
                .long("max-steps")
                .require_equals(true)
                .value_name("NUMBER")
                .help("Largest number of steps to take in each direction from the seed")
                .takes_value(true)
                .default_value("8000"),
        )
        .arg(
            Arg::new("null-threshold")
                .long("null-threshold")
                .require_equals(true)
                .value_name("VALUE")
                .help("Tracing stops where the field strength falls below this value")
                .takes_value(true)
                .default_value("1e-9"),
        )
        .subcommand(create_ring_seeder_subcommand())
        .subcommand(create_manual_seeder_subcommand());

    #[cfg(feature = "random-seeding")]
    let command = command.subcommand(create_shell_seeder_subcommand());

    add_field_arguments(command)
}

/// Runs the actions for the `trace` subcommand using the given arguments.
pub fn run_trace_subcommand(arguments: &ArgMatches) {
    let output_file_path = Path::new(
        arguments
            .value_of("output-file")
            .expect("No value for required argument"),
    );
    let output_type = OutputType::from_path(output_file_path);

    let overwrite_mode = cli_utils::overwrite_mode_from_arguments(arguments);
    let verbosity = cli_utils::parse_verbosity(arguments, true);

    let field_config = construct_field_config_from_options(arguments);
    let tracer_config = construct_basic_field_line_tracer_config_from_options(arguments);

    if arguments.is_present("print-parameter-values") {
        println!("{:#?}\n{:#?}", field_config, tracer_config);
    }

    let field = exit_on_error!(field_config.build(), "Error: Invalid field: {}");
    let tracer = exit_on_error!(
        BasicFieldLineTracer3::new(tracer_config),
        "Error: Invalid tracer configuration: {}"
    );

    let atomic_output_file = exit_on_error!(
        AtomicOutputFile::new(output_file_path),
        "Error: Could not create temporary output file: {}"
    );

    if !atomic_output_file.check_if_write_allowed(overwrite_mode, &verbosity) {
        return;
    }

    let context = TracingContext {
        field,
        tracer,
        output_type,
        atomic_output_file,
        verbosity,
    };

    if let Some(seeder_arguments) = arguments.subcommand_matches("ring_seeder") {
        context.run(create_ring_seeder_from_arguments(seeder_arguments));
    } else if let Some(seeder_arguments) = arguments.subcommand_matches("manual_seeder") {
        context.run(create_manual_seeder_from_arguments(seeder_arguments));
    } else {
        #[cfg(feature = "random-seeding")]
        if let Some(seeder_arguments) = arguments.subcommand_matches("shell_seeder") {
            context.run(create_shell_seeder_from_arguments(seeder_arguments));
            return;
        }
        let default_seeder_arguments = create_ring_seeder_subcommand()
            .no_binary_name(true)
            .get_matches_from(Vec::<&str>::new());
        context.run(create_ring_seeder_from_arguments(&default_seeder_arguments));
    }
}

/// Determines basic field line tracer parameters based on provided options.
pub fn construct_basic_field_line_tracer_config_from_options(
    arguments: &ArgMatches,
) -> BasicFieldLineTracerConfig {
    let tracing_sense = cli_utils::get_value_from_required_constrained_argument(
        arguments,
        "tracing-sense",
        &["both", "same", "opposite"],
        &[
            FieldLineTracingSense::Both,
            FieldLineTracingSense::same(),
            FieldLineTracingSense::opposite(),
        ],
    );
    let step_length: ftr =
        cli_utils::get_finite_float_value_from_required_parseable_argument(arguments, "step-size");
    let null_field_threshold: ftr = cli_utils::get_finite_float_value_from_required_parseable_argument(
        arguments,
        "null-threshold",
    );
    let max_steps: usize =
        cli_utils::get_value_from_required_parseable_argument(arguments, "max-steps");

    BasicFieldLineTracerConfig {
        tracing_sense,
        stepper: EulerStepperConfig {
            step_length,
            null_field_threshold,
        },
        max_steps,
    }
}

struct TracingContext {
    field: DynFieldFunction3,
    tracer: BasicFieldLineTracer3,
    output_type: OutputType,
    atomic_output_file: AtomicOutputFile,
    verbosity: Verbosity,
}

impl TracingContext {
    fn run<Sd: Seeder3>(self, seeder: Sd) {
        let field_lines = FieldLineSet3::trace(seeder, &self.tracer, &self.field, self.verbosity);

        if field_lines.verbosity().print_messages() {
            println!(
                "Saving field lines in {}",
                self.atomic_output_file.target_path().display()
            );
        }

        let temporary_path = self.atomic_output_file.temporary_path();
        exit_on_error!(
            match self.output_type {
                OutputType::Fl => field_lines.save_into_custom_binary(temporary_path),
                #[cfg(feature = "pickle")]
                OutputType::Pickle => field_lines.save_as_combined_pickles(temporary_path),
                #[cfg(feature = "json")]
                OutputType::Json => field_lines.save_as_json(temporary_path),
            },
            "Error: Could not save output data: {}"
        );

        exit_on_error!(
            self.atomic_output_file.persist(),
            "Error: Could not move temporary output file to target path: {}"
        );
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum OutputType {
    Fl,
    #[cfg(feature = "pickle")]
    Pickle,
    #[cfg(feature = "json")]
    Json,
}

impl OutputType {
    fn from_path(file_path: &Path) -> Self {
        Self::from_extension(
            file_path
                .extension()
                .unwrap_or_else(|| {
                    exit_with_error!(
                        "Error: Missing extension for output file\n\
                         Valid extensions are: {}",
                        Self::valid_extensions_string()
                    )
                })
                .to_string_lossy()
                .as_ref(),
        )
    }

    fn from_extension(extension: &str) -> Self {
        match extension {
            "fl" => Self::Fl,
            "pickle" => {
                #[cfg(feature = "pickle")]
                {
                    Self::Pickle
                }
                #[cfg(not(feature = "pickle"))]
                exit_with_error!(
                    "Error: Compile with pickle feature in order to write Pickle files\n\
                     Tip: Use cargo flag --features=pickle"
                );
            }
            "json" => {
                #[cfg(feature = "json")]
                {
                    Self::Json
                }
                #[cfg(not(feature = "json"))]
                exit_with_error!(
                    "Error: Compile with json feature in order to write JSON files\n\
                     Tip: Use cargo flag --features=json"
                );
            }
            invalid => exit_with_error!(
                "Error: Invalid extension {} for output file\n\
                 Valid extensions are: {}",
                invalid,
                Self::valid_extensions_string()
            ),
        }
    }

    fn valid_extensions_string() -> &'static str {
        "fl, pickle, json"
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Fl => "fl",
                #[cfg(feature = "pickle")]
                Self::Pickle => "pickle",
                #[cfg(feature = "json")]
                Self::Json => "json",
            }
        )
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn default_tracer_options_match_default_config() {
        let arguments = create_trace_subcommand()
            .no_binary_name(true)
            .get_matches_from(["lines.fl"]);
        let config = construct_basic_field_line_tracer_config_from_options(&arguments);
        let default = BasicFieldLineTracerConfig::default();
        assert_eq!(config.tracing_sense, default.tracing_sense);
        assert_eq!(config.max_steps, default.max_steps);
        assert_eq!(config.stepper.step_length, default.stepper.step_length);
        assert_eq!(
            config.stepper.null_field_threshold,
            default.stepper.null_field_threshold
        );
    }

    #[test]
    fn tracer_options_are_parsed() {
        let arguments = create_trace_subcommand()
            .no_binary_name(true)
            .get_matches_from([
                "lines.fl",
                "--tracing-sense=opposite",
                "--step-size=0.01",
                "--max-steps=12",
            ]);
        let config = construct_basic_field_line_tracer_config_from_options(&arguments);
        assert_eq!(config.tracing_sense, FieldLineTracingSense::opposite());
        assert_eq!(config.stepper.step_length, 0.01);
        assert_eq!(config.max_steps, 12);
    }

    #[test]
    fn output_type_follows_extension() {
        assert_eq!(OutputType::from_path(Path::new("out/lines.fl")), OutputType::Fl);
        #[cfg(feature = "json")]
        assert_eq!(OutputType::from_extension("json"), OutputType::Json);
        assert_eq!(OutputType::Fl.to_string(), "fl");
    }
}
