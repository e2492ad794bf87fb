use byteorder::{LittleEndian, ReadBytesExt};
use lazy_static::lazy_static;
use lodestone::{cli, exit_on_error, geometry::Point3, io::utils as io_utils, tracing::ftr};
use std::{
    ffi::OsString,
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

#[macro_export]
macro_rules! def_test {
    (
        IN[$($in_ident:ident = $in_str:expr),*]
        OUT[$($out_ident:ident = $out_str:expr),*]
        fn $name:ident $test_body:expr
    ) => {
        #[test]
        fn $name() {
            let test = common::Test::new(stringify!($name));

            $( let $in_ident = test.input_path($in_str); )*
            $( let $out_ident = test.output_path($out_str); )*

            let test_body = |$( $in_ident, )* $( $out_ident, )*| $test_body;

            test_body(
                $( path_str!($in_ident), )* $( path_str!($out_ident), )*
            );
        }
    };
}

#[macro_export]
macro_rules! path_str {
    ($path:expr) => {
        $path.to_string_lossy().as_ref()
    };
}

pub fn run<I, T>(args: I)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    cli::run::run_with_args(COMMAND.clone().get_matches_from(args));
}

pub fn assert_file_exists<P: AsRef<Path>>(file_path: P) {
    let file_path = file_path.as_ref();
    assert!(
        file_path.exists(),
        "File {} does not exist",
        file_path.to_string_lossy()
    );
}

/// Field line data parsed from a `.fl` file.
#[derive(Clone, Debug)]
pub struct FlFile {
    pub seeds: Vec<Point3<ftr>>,
    pub field_lines: Vec<FlFieldLine>,
}

#[derive(Clone, Debug)]
pub struct FlFieldLine {
    pub seed_idx: usize,
    pub sense: u8,
    pub stopping_cause: u8,
    pub positions: Vec<Point3<ftr>>,
}

pub fn read_fl_file<P: AsRef<Path>>(file_path: P) -> FlFile {
    let file_path = file_path.as_ref();
    exit_on_error!(
        parse_fl_file(file_path),
        "Error: Could not read field line file: {}"
    )
}

fn parse_fl_file(file_path: &Path) -> io::Result<FlFile> {
    let mut reader = io::BufReader::new(io_utils::open_file_and_map_err(file_path)?);

    let n_seeds = reader.read_u64::<LittleEndian>()? as usize;
    let seeds = (0..n_seeds)
        .map(|_| read_point(&mut reader))
        .collect::<io::Result<Vec<_>>>()?;

    let n_field_lines = reader.read_u64::<LittleEndian>()? as usize;
    let mut field_lines = Vec::with_capacity(n_field_lines);
    for _ in 0..n_field_lines {
        let seed_idx = reader.read_u64::<LittleEndian>()? as usize;
        let sense = reader.read_u8()?;
        let stopping_cause = reader.read_u8()?;
        let n_points = reader.read_u64::<LittleEndian>()? as usize;
        let positions = (0..n_points)
            .map(|_| read_point(&mut reader))
            .collect::<io::Result<Vec<_>>>()?;
        field_lines.push(FlFieldLine {
            seed_idx,
            sense,
            stopping_cause,
            positions,
        });
    }

    let mut remainder = Vec::new();
    reader.read_to_end(&mut remainder)?;
    if !remainder.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} trailing bytes in field line file", remainder.len()),
        ));
    }

    Ok(FlFile { seeds, field_lines })
}

fn read_point<R: Read>(reader: &mut R) -> io::Result<Point3<ftr>> {
    let mut coords = [0.0; 3];
    reader.read_f64_into::<LittleEndian>(&mut coords)?;
    Ok(Point3::new(coords[0], coords[1], coords[2]))
}

#[derive(Debug, Clone)]
pub struct Test {
    output_dir: PathBuf,
}

impl Test {
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        let name = name.as_ref();
        let output_dir = exit_on_error!(
            CONTEXT.prepared_output_dir(name),
            "Error: Could not prepare output directory for test {}: {}",
            name
        );
        Self { output_dir }
    }

    pub fn input_path<S: AsRef<str>>(&self, file_name: S) -> PathBuf {
        CONTEXT.input_path(file_name)
    }

    pub fn output_path<S: AsRef<str>>(&self, file_name: S) -> PathBuf {
        self.output_dir().join(file_name.as_ref())
    }

    fn output_dir(&self) -> &Path {
        self.output_dir.as_path()
    }
}

#[derive(Debug, Clone)]
pub struct TestContext {
    base_input_dir: PathBuf,
    base_output_dir: PathBuf,
}

impl TestContext {
    const BASE_INPUT_DIR_PATH_COMPONENTS: [&'static str; 3] = ["tests", "data", "input"];
    const BASE_OUTPUT_DIR_PATH_COMPONENTS: [&'static str; 3] = ["tests", "data", "output"];

    fn new() -> Self {
        let base_input_dir: PathBuf = Self::BASE_INPUT_DIR_PATH_COMPONENTS.iter().collect();
        let base_output_dir: PathBuf = Self::BASE_OUTPUT_DIR_PATH_COMPONENTS.iter().collect();
        Self {
            base_input_dir,
            base_output_dir,
        }
    }

    pub fn input_path<S: AsRef<str>>(&self, file_name: S) -> PathBuf {
        self.base_input_dir.join(file_name.as_ref())
    }

    pub fn output_dir<S: AsRef<str>>(&self, test_name: S) -> PathBuf {
        self.base_output_dir.join(test_name.as_ref())
    }

    pub fn prepared_output_dir<S: AsRef<str>>(&self, test_name: S) -> io::Result<PathBuf> {
        let output_dir = self.output_dir(test_name);
        if output_dir.exists() {
            fs::remove_dir_all(&output_dir)?;
        }
        fs::create_dir_all(&output_dir)?;
        Ok(output_dir)
    }
}

lazy_static! {
    pub static ref CONTEXT: TestContext = TestContext::new();
    static ref COMMAND: clap::Command<'static> = cli::build::build().no_binary_name(true);
}
