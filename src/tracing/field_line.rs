//! Field lines traced from seed points.

pub mod basic;

use super::{ftr, stepping::SteppingSense, stepping::StoppingCause};
use crate::{
    ensure_valid,
    error::TracingResult,
    field::FieldFunction3,
    geometry::{Point3, Vec3},
    io::{utils, Verbosity},
    seeding::Seeder3,
};
use byteorder::{LittleEndian, WriteBytesExt};
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use std::{
    io::{self, Write},
    path::Path,
};

#[cfg(feature = "serialization")]
use serde::{
    ser::{SerializeStruct, Serializer},
    Serialize,
};

/// The part of a field line traced from a seed in a single sense.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct FieldLineTrace3 {
    positions: Vec<Point3<ftr>>,
    sense: SteppingSense,
    stopping_cause: StoppingCause,
    length: ftr,
}

/// Defines the properties of a field line tracer for 3D vector fields.
pub trait FieldLineTracer3 {
    /// Traces the field line through the given seed point, producing one
    /// trace for each sense the tracer is configured to trace in.
    fn trace<Fi>(&self, field: &Fi, seed: &Point3<ftr>) -> Vec<FieldLineTrace3>
    where
        Fi: FieldFunction3 + ?Sized;
}

/// A set of traced field lines together with the seeds they were traced from.
#[derive(Clone, Debug)]
pub struct FieldLineSet3 {
    seeds: Vec<Point3<ftr>>,
    seed_indices: Vec<usize>,
    field_lines: Vec<FieldLineTrace3>,
    verbosity: Verbosity,
}

impl FieldLineTrace3 {
    pub(crate) fn new(
        positions: Vec<Point3<ftr>>,
        sense: SteppingSense,
        stopping_cause: StoppingCause,
        length: ftr,
    ) -> Self {
        assert!(
            !positions.is_empty(),
            "Field line trace must contain at least the seed"
        );
        FieldLineTrace3 {
            positions,
            sense,
            stopping_cause,
            length,
        }
    }

    /// Returns the positions along the trace, starting with the seed.
    pub fn positions(&self) -> &[Point3<ftr>] {
        &self.positions
    }

    /// Returns the seed the trace started from.
    pub fn seed(&self) -> &Point3<ftr> {
        &self.positions[0]
    }

    pub fn number_of_points(&self) -> usize {
        self.positions.len()
    }

    pub fn sense(&self) -> SteppingSense {
        self.sense
    }

    pub fn stopping_cause(&self) -> StoppingCause {
        self.stopping_cause
    }

    /// Returns the total distance traced along the field line.
    pub fn length(&self) -> ftr {
        self.length
    }

    pub fn into_positions(self) -> Vec<Point3<ftr>> {
        self.positions
    }

    /// Computes evenly spaced markers indicating the direction of traversal.
    ///
    /// # Parameters
    ///
    /// - `n_markers`: Number of markers to place along the trace.
    ///
    /// # Returns
    ///
    /// A list of `(position, unit tangent)` pairs, where the tangent points from
    /// earlier to later positions of the trace. The list is empty if no markers
    /// were requested or the trace has fewer than two points.
    pub fn direction_markers(&self, n_markers: usize) -> Vec<(Point3<ftr>, Vec3<ftr>)> {
        let n_points = self.positions.len();
        if n_markers == 0 || n_points < 2 {
            return Vec::new();
        }
        let last_idx = n_points - 1;
        (0..n_markers)
            .filter_map(|marker_idx| {
                // Marker k sits at the center of the k'th of n equal segments
                let idx = ((2 * marker_idx + 1) * last_idx) / (2 * n_markers);
                let lower = &self.positions[idx.saturating_sub(1)];
                let upper = &self.positions[usize::min(idx + 1, last_idx)];
                (upper - lower)
                    .normalized()
                    .map(|tangent| (self.positions[idx], tangent))
            })
            .collect()
    }
}

/// Joins the two halves of a field line traced in opposite senses from
/// the same seed into a single sequence of positions.
///
/// The positions of `backward` are reversed and followed by the positions
/// of `forward`, with the shared seed included only once.
pub fn join_half_traces(
    backward: &FieldLineTrace3,
    forward: &FieldLineTrace3,
) -> TracingResult<Vec<Point3<ftr>>> {
    ensure_valid!(
        backward.seed() == forward.seed(),
        "Half traces must share the same seed, got {} and {}",
        backward.seed(),
        forward.seed()
    );
    ensure_valid!(
        backward.sense() != forward.sense(),
        "Half traces must be traced in opposite senses, both were traced in the {} sense",
        forward.sense()
    );
    let mut positions =
        Vec::with_capacity(backward.number_of_points() + forward.number_of_points() - 1);
    positions.extend(backward.positions()[1..].iter().rev());
    positions.extend_from_slice(forward.positions());
    Ok(positions)
}

impl FieldLineSet3 {
    /// Traces field lines through a 3D vector field.
    ///
    /// # Parameters
    ///
    /// - `seeder`: Seeder to use for generating start positions.
    /// - `tracer`: Field line tracer to use.
    /// - `field`: Vector field to trace.
    /// - `verbosity`: Whether and how to pass non-critical information to the user.
    ///
    /// # Returns
    ///
    /// A new `FieldLineSet3` with the traced field lines. Seeds where the field
    /// is singular are discarded before tracing.
    ///
    /// # Type parameters
    ///
    /// - `Sd`: Type of seeder.
    /// - `Tr`: Type of field line tracer.
    /// - `Fi`: Type of field function.
    pub fn trace<Sd, Tr, Fi>(mut seeder: Sd, tracer: &Tr, field: &Fi, verbosity: Verbosity) -> Self
    where
        Sd: Seeder3,
        Tr: FieldLineTracer3 + Sync,
        Fi: FieldFunction3 + Sync + ?Sized,
    {
        let initial_number_of_seeds = seeder.number_of_points();
        seeder.retain_points(|seed| !field.is_singular_at(seed));
        let number_of_dropped_seeds = initial_number_of_seeds - seeder.number_of_points();
        if number_of_dropped_seeds > 0 {
            eprintln!(
                "Warning: Discarded {} seed point(s) where the field is singular",
                number_of_dropped_seeds
            );
        }

        let seeds: Vec<Point3<ftr>> = seeder.into_par_iter().collect();

        if verbosity.print_messages() {
            println!("Found {} start positions", seeds.len());
        }

        let progress_bar = verbosity.create_progress_bar(seeds.len());

        let traced: Vec<(usize, Vec<FieldLineTrace3>)> = seeds
            .par_iter()
            .enumerate()
            .progress_with(progress_bar)
            .map(|(seed_idx, seed)| (seed_idx, tracer.trace(field, seed)))
            .collect();

        let (seed_indices, field_lines): (Vec<_>, Vec<_>) = traced
            .into_iter()
            .flat_map(|(seed_idx, traces)| traces.into_iter().map(move |trace| (seed_idx, trace)))
            .unzip();

        if verbosity.print_messages() {
            println!("Successfully traced {} field lines", field_lines.len());
        }

        FieldLineSet3 {
            seeds,
            seed_indices,
            field_lines,
            verbosity,
        }
    }

    /// Returns the seeds that were traced from.
    pub fn seeds(&self) -> &[Point3<ftr>] {
        &self.seeds
    }

    /// Returns the traced field lines.
    pub fn field_lines(&self) -> &[FieldLineTrace3] {
        &self.field_lines
    }

    /// Returns the index into `seeds` of the seed each field line was traced from.
    pub fn seed_indices(&self) -> &[usize] {
        &self.seed_indices
    }

    pub fn number_of_field_lines(&self) -> usize {
        self.field_lines.len()
    }

    pub fn verbosity(&self) -> &Verbosity {
        &self.verbosity
    }

    /// Serializes the field line data into a custom binary format and writes to the given writer.
    pub fn write_as_custom_binary<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u64::<LittleEndian>(self.seeds.len() as u64)?;
        for seed in &self.seeds {
            write_point(writer, seed)?;
        }
        writer.write_u64::<LittleEndian>(self.field_lines.len() as u64)?;
        for (&seed_idx, field_line) in self.seed_indices.iter().zip(&self.field_lines) {
            writer.write_u64::<LittleEndian>(seed_idx as u64)?;
            writer.write_u8(match field_line.sense() {
                SteppingSense::Same => 0,
                SteppingSense::Opposite => 1,
            })?;
            writer.write_u8(field_line.stopping_cause().code())?;
            writer.write_u64::<LittleEndian>(field_line.number_of_points() as u64)?;
            for position in field_line.positions() {
                write_point(writer, position)?;
            }
        }
        Ok(())
    }

    /// Serializes the field line data into a custom binary format and saves at the given path.
    pub fn save_into_custom_binary<P: AsRef<Path>>(&self, output_file_path: P) -> io::Result<()> {
        let mut writer = io::BufWriter::new(utils::create_file_and_required_directories(
            output_file_path,
        )?);
        self.write_as_custom_binary(&mut writer)?;
        writer.flush()
    }

    /// Serializes the field line data into JSON format and writes to the given writer.
    #[cfg(feature = "json")]
    pub fn write_as_json<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        utils::write_data_as_json(writer, self)
    }

    /// Serializes the field line data into JSON format and saves at the given path.
    #[cfg(feature = "json")]
    pub fn save_as_json<P: AsRef<Path>>(&self, output_file_path: P) -> io::Result<()> {
        utils::save_data_as_json(output_file_path, self)
    }

    /// Serializes the field line data into pickle format and writes to the given writer.
    ///
    /// The seeds and the field lines are written as two consecutive pickles.
    #[cfg(feature = "pickle")]
    pub fn write_as_combined_pickles<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        utils::write_data_as_pickle(writer, &self.seeds)?;
        utils::write_data_as_pickle(writer, &self.indexed_field_lines())
    }

    /// Serializes the field line data into pickle format and saves at the given path.
    ///
    /// The seeds and the field lines are written as two consecutive pickles.
    #[cfg(feature = "pickle")]
    pub fn save_as_combined_pickles<P: AsRef<Path>>(&self, output_file_path: P) -> io::Result<()> {
        let mut writer = io::BufWriter::new(utils::create_file_and_required_directories(
            output_file_path,
        )?);
        self.write_as_combined_pickles(&mut writer)?;
        writer.flush()
    }

    #[cfg(feature = "serialization")]
    fn indexed_field_lines(&self) -> Vec<IndexedFieldLine<'_>> {
        self.seed_indices
            .iter()
            .zip(&self.field_lines)
            .map(|(&seed_index, field_line)| IndexedFieldLine {
                seed_index,
                field_line,
            })
            .collect()
    }
}

fn write_point<W: io::Write>(writer: &mut W, point: &Point3<ftr>) -> io::Result<()> {
    for &coord in point {
        writer.write_f64::<LittleEndian>(coord)?;
    }
    Ok(())
}

#[cfg(feature = "serialization")]
#[derive(Serialize)]
struct IndexedFieldLine<'a> {
    seed_index: usize,
    #[serde(flatten)]
    field_line: &'a FieldLineTrace3,
}

#[cfg(feature = "serialization")]
impl Serialize for FieldLineSet3 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("FieldLineSet3", 2)?;
        s.serialize_field("seeds", &self.seeds)?;
        s.serialize_field("field_lines", &self.indexed_field_lines())?;
        s.end()
    }
}
