//! Reading seed points from an input file.

use super::impl_seeder_for_point_list;
use crate::{geometry::Point3, io::utils, tracing::ftr};
use std::{
    io::{self, BufRead},
    path::Path,
};

/// Generator for 3D seed points read from an input file.
#[derive(Clone, Debug)]
pub struct ManualSeeder3 {
    seed_points: Vec<Point3<ftr>>,
}

impl ManualSeeder3 {
    /// Creates a new seeder producing 3D seed points read from an input file.
    ///
    /// The input file is assumed to be in CSV format, with each line consisting
    /// of the three comma-separated coordinates of a single seed point. Blank
    /// lines and lines starting with `#` are ignored.
    ///
    /// # Parameters
    ///
    /// - `input_file_path`: Path to the input file.
    ///
    /// # Returns
    ///
    /// A `Result` which is either:
    ///
    /// - `Ok`: Contains a new `ManualSeeder3`.
    /// - `Err`: Contains an error encountered while trying to open or parse the input file.
    pub fn new<P: AsRef<Path>>(input_file_path: P) -> io::Result<Self> {
        let file = utils::open_file_and_map_err(input_file_path)?;
        Self::from_reader(io::BufReader::new(file))
    }

    /// Creates a new seeder producing 3D seed points parsed from the given CSV text.
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut seed_points = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() || trimmed_line.starts_with('#') {
                continue;
            }
            seed_points.push(parse_seed_point(trimmed_line)?);
        }
        Ok(Self { seed_points })
    }

    pub fn seed_points(&self) -> &[Point3<ftr>] {
        &self.seed_points
    }
}

impl_seeder_for_point_list!(ManualSeeder3);

fn parse_seed_point(line: &str) -> io::Result<Point3<ftr>> {
    let coords = line
        .split(',')
        .map(|coord_str| {
            coord_str.trim().parse::<ftr>().map_err(|err| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "Failed parsing coordinate string {} in input file: {}",
                        coord_str, err
                    ),
                )
            })
        })
        .collect::<io::Result<Vec<ftr>>>()?;

    if coords.len() != 3 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Expected 3 coordinates in input file line, got {}: {}",
                coords.len(),
                line
            ),
        ));
    }
    let point = Point3::with_each_component(|dim| coords[dim.num()]);
    if !point.is_finite() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Non-finite seed point in input file: {}", line),
        ));
    }
    Ok(point)
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::seeding::Seeder3;

    #[test]
    fn csv_seed_points_are_parsed_in_order() {
        let text = "# x, y, z\n0.1, 0.0, 1.1\n\n  -0.1,0,1.1  \n# trailing comment\n";
        let seeder = ManualSeeder3::from_reader(text.as_bytes()).unwrap();
        assert_eq!(seeder.number_of_points(), 2);
        assert_eq!(
            seeder.seed_points(),
            &[Point3::new(0.1, 0.0, 1.1), Point3::new(-0.1, 0.0, 1.1)]
        );
    }

    #[test]
    fn malformed_csv_lines_are_rejected() {
        for text in ["0.1, 0.0\n", "0.1, 0.0, 1.1, 4.0\n", "0.1, zero, 1.1\n", "inf, 0, 0\n"] {
            let err = ManualSeeder3::from_reader(text.as_bytes()).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        }
    }

    #[test]
    fn missing_seed_file_reports_path() {
        let err = ManualSeeder3::new("this/file/does/not/exist.csv").unwrap_err();
        assert!(err.to_string().contains("this/file/does/not/exist.csv"));
    }
}
