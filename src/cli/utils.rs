//! Utilities for creating the command line interface.

use crate::{
    exit_on_error, exit_on_false, exit_with_error,
    geometry::{Dim3, In3D, Point3, Vec3},
    io::{OverwriteMode, Verbosity},
    num::BFloat,
    tracing::ftr,
};
use clap::ArgMatches;
use indicatif::ProgressStyle;
use lazy_static::lazy_static;
use std::str::FromStr;

lazy_static! {
    static ref DEFAULT_PROGRESS_STYLE: ProgressStyle =
        ProgressStyle::default_bar().template("Progress: {bar:40}  {percent}% | ETA: {eta}");
}

/// Whether a vector argument may be the zero vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllowZero {
    Yes,
    No,
}

pub fn parse_value_string<T>(argument_name: &str, value_string: &str) -> T
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    exit_on_error!(
        value_string.parse(),
        "Error: Could not parse value for {0}: {1}",
        argument_name
    )
}

fn parse_value_strings<'a, 'b, T, I>(argument_name: &'a str, value_strings: I) -> Vec<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
    I: Iterator<Item = &'b str>,
{
    value_strings
        .filter_map(|value_string| {
            if value_string.is_empty() {
                None
            } else {
                Some(parse_value_string(argument_name, value_string))
            }
        })
        .collect()
}

fn verify_finite_float_value<F: BFloat>(argument_name: &str, value: F) {
    exit_on_false!(value.is_finite(), "Error: {} must be finite", argument_name);
}

fn verify_argument_value_count<T>(argument_name: &str, values: &[T], required_count: usize) {
    let count = values.len();
    exit_on_false!(
        count == required_count,
        "Error: {} must have {} values, got {}",
        argument_name,
        required_count,
        count
    );
}

pub fn get_value_from_required_parseable_argument<T>(
    arguments: &ArgMatches,
    argument_name: &str,
) -> T
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    parse_value_string(
        argument_name,
        arguments
            .value_of(argument_name)
            .expect("No value for required argument"),
    )
}

pub fn get_finite_float_value_from_required_parseable_argument<F>(
    arguments: &ArgMatches,
    argument_name: &str,
) -> F
where
    F: BFloat + FromStr,
    <F as FromStr>::Err: std::fmt::Display,
{
    let value: F = get_value_from_required_parseable_argument(arguments, argument_name);
    verify_finite_float_value(argument_name, value);
    value
}

pub fn get_value_from_required_constrained_argument<T>(
    arguments: &ArgMatches,
    argument_name: &str,
    possible_value_strings: &[&str],
    possible_values: &[T],
) -> T
where
    T: Copy,
{
    let value_string = arguments
        .value_of(argument_name)
        .expect("No value for required argument");
    possible_value_strings
        .iter()
        .zip(possible_values)
        .find_map(|(&possible_value_string, &possible_value)| {
            (possible_value_string == value_string).then_some(possible_value)
        })
        .unwrap_or_else(|| {
            exit_with_error!(
                "Error: Invalid value for {}: {}",
                argument_name,
                value_string
            )
        })
}

pub fn get_finite_float_values_from_parseable_argument<F>(
    arguments: &ArgMatches,
    argument_name: &str,
) -> Option<Vec<F>>
where
    F: BFloat + FromStr,
    <F as FromStr>::Err: std::fmt::Display,
{
    let values: Option<Vec<F>> = arguments
        .values_of(argument_name)
        .map(|values| parse_value_strings(argument_name, values));
    if let Some(values) = values.as_ref() {
        values
            .iter()
            .for_each(|&value| verify_finite_float_value(argument_name, value))
    };
    values
}

pub fn get_finite_float_values_from_required_parseable_argument<F>(
    arguments: &ArgMatches,
    argument_name: &str,
) -> Vec<F>
where
    F: BFloat + FromStr,
    <F as FromStr>::Err: std::fmt::Display,
{
    get_finite_float_values_from_parseable_argument(arguments, argument_name)
        .expect("No values for required argument")
}

pub fn parse_3d_float_values<F>(
    arguments: &ArgMatches,
    argument_name: &str,
    allow_zero: AllowZero,
) -> In3D<F>
where
    F: BFloat + FromStr,
    <F as FromStr>::Err: std::fmt::Display,
{
    let values: Vec<F> =
        get_finite_float_values_from_required_parseable_argument(arguments, argument_name);

    verify_argument_value_count(argument_name, &values, 3);

    let values = In3D::with_each_component(|dim| values[dim.num()]);

    exit_on_false!(
        allow_zero == AllowZero::Yes
            || Dim3::slice()
                .into_iter()
                .any(|dim| values[dim] != F::zero()),
        "Error: {} must be non-zero",
        argument_name
    );

    values
}

pub fn parse_vec3(arguments: &ArgMatches, argument_name: &str, allow_zero: AllowZero) -> Vec3<ftr> {
    let values = parse_3d_float_values(arguments, argument_name, allow_zero);
    Vec3::with_each_component(|dim| values[dim])
}

pub fn parse_point3(arguments: &ArgMatches, argument_name: &str) -> Point3<ftr> {
    let values = parse_3d_float_values(arguments, argument_name, AllowZero::Yes);
    Point3::with_each_component(|dim| values[dim])
}

pub fn overwrite_mode_from_arguments(arguments: &ArgMatches) -> OverwriteMode {
    if arguments.is_present("overwrite") {
        OverwriteMode::Always
    } else if arguments.is_present("no-overwrite") {
        OverwriteMode::Never
    } else {
        OverwriteMode::Ask
    }
}

pub fn parse_verbosity(arguments: &ArgMatches, support_progress: bool) -> Verbosity {
    if support_progress && arguments.is_present("progress") {
        Verbosity::Progress(DEFAULT_PROGRESS_STYLE.clone())
    } else if arguments.is_present("verbose") {
        Verbosity::Messages
    } else {
        Verbosity::Quiet
    }
}
