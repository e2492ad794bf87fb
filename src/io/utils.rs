//! Utilities for input/output.

use super::{OverwriteMode, Verbosity};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

#[cfg(feature = "serialization")]
use serde::Serialize;

/// Output file that is written to a temporary location and moved
/// to the target path once complete.
#[derive(Debug)]
pub struct AtomicOutputFile {
    temporary_file: NamedTempFile,
    target_path: PathBuf,
}

impl AtomicOutputFile {
    /// Creates a new temporary file in the directory of the given target path.
    pub fn new<P: AsRef<Path>>(target_path: P) -> io::Result<Self> {
        let target_path = target_path.as_ref().to_path_buf();
        let directory = match target_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&directory)?;
        let file_name = target_path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Output path {} has no file name", target_path.display()),
            )
        })?;
        let mut prefix = std::ffi::OsString::from(".");
        prefix.push(file_name);
        let temporary_file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".tmp")
            .tempfile_in(directory)?;
        Ok(Self {
            temporary_file,
            target_path,
        })
    }

    pub fn temporary_path(&self) -> &Path {
        self.temporary_file.path()
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Checks whether writing to the target path is allowed, consulting
    /// the user if the target exists and the overwrite mode says to ask.
    pub fn check_if_write_allowed(&self, overwrite_mode: OverwriteMode, verbosity: &Verbosity) -> bool {
        if !self.target_path.exists() {
            return true;
        }
        match overwrite_mode {
            OverwriteMode::Always => true,
            OverwriteMode::Never => {
                if verbosity.print_messages() {
                    println!(
                        "File {} already exists, skipping",
                        self.target_path.display()
                    );
                }
                false
            }
            OverwriteMode::Ask => user_says_yes(
                &format!(
                    "File {} already exists, overwrite?",
                    self.target_path.display()
                ),
                true,
            )
            .unwrap_or_else(|err| {
                eprintln!("Warning: Not overwriting due to error: {}", err);
                false
            }),
        }
    }

    /// Moves the temporary file to the target path, replacing any existing file.
    pub fn persist(self) -> io::Result<()> {
        self.temporary_file
            .persist(&self.target_path)
            .map(|_| ())
            .map_err(|err| err.error)
    }
}

/// Opens the file at the given path, including the path in any error message.
pub fn open_file_and_map_err<P: AsRef<Path>>(file_path: P) -> io::Result<fs::File> {
    let file_path = file_path.as_ref();
    fs::File::open(file_path).map_err(|err| {
        io::Error::new(
            err.kind(),
            format!("Could not open {}: {}", file_path.display(), err),
        )
    })
}

/// Creates the file at the given path, creating any missing parent directories.
pub fn create_file_and_required_directories<P: AsRef<Path>>(file_path: P) -> io::Result<fs::File> {
    let file_path = file_path.as_ref();
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::File::create(file_path)
}

/// Asks the user a yes/no question on the terminal and returns the answer.
pub fn user_says_yes(question: &str, default_is_yes: bool) -> io::Result<bool> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!(
            "{} [{}] ",
            question,
            if default_is_yes { "Y/n" } else { "y/N" }
        );
        stdout.flush()?;
        let mut answer = String::new();
        if stdin.read_line(&mut answer)? == 0 {
            return Ok(default_is_yes);
        }
        match answer.trim().to_lowercase().as_str() {
            "" => return Ok(default_is_yes),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("Please answer y or n"),
        }
    }
}

/// Serializes the given data into JSON format and writes to the given writer.
#[cfg(feature = "json")]
pub fn write_data_as_json<W: io::Write, T: Serialize>(writer: &mut W, data: &T) -> io::Result<()> {
    serde_json::to_writer(writer, data).map_err(io::Error::from)
}

/// Serializes the given data into JSON format and saves at the given path.
#[cfg(feature = "json")]
pub fn save_data_as_json<P: AsRef<Path>, T: Serialize>(file_path: P, data: &T) -> io::Result<()> {
    let mut writer = io::BufWriter::new(create_file_and_required_directories(file_path)?);
    write_data_as_json(&mut writer, data)?;
    writer.flush()
}

/// Serializes the given data into protocol 3 pickle format and writes to the given writer.
#[cfg(feature = "pickle")]
pub fn write_data_as_pickle<W: io::Write, T: Serialize>(writer: &mut W, data: &T) -> io::Result<()> {
    match serde_pickle::to_writer(writer, data, serde_pickle::SerOptions::new()) {
        Ok(_) => Ok(()),
        Err(serde_pickle::Error::Io(err)) => Err(err),
        Err(err) => Err(io::Error::new(
            io::ErrorKind::Other,
            format!("Unexpected error while serializing data to pickle: {}", err),
        )),
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use std::io::Read;

    #[test]
    fn atomic_output_file_replaces_target_on_persist() {
        let directory = tempfile::tempdir().unwrap();
        let target_path = directory.path().join("nested").join("lines.fl");

        let output_file = AtomicOutputFile::new(&target_path).unwrap();
        assert!(output_file.check_if_write_allowed(OverwriteMode::Never, &Verbosity::Quiet));
        fs::write(output_file.temporary_path(), b"first").unwrap();
        output_file.persist().unwrap();
        assert_eq!(fs::read(&target_path).unwrap(), b"first");

        let output_file = AtomicOutputFile::new(&target_path).unwrap();
        assert!(!output_file.check_if_write_allowed(OverwriteMode::Never, &Verbosity::Quiet));
        assert!(output_file.check_if_write_allowed(OverwriteMode::Always, &Verbosity::Quiet));
        fs::write(output_file.temporary_path(), b"second").unwrap();
        output_file.persist().unwrap();

        let mut content = String::new();
        open_file_and_map_err(&target_path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "second");
    }

    #[test]
    fn dropped_atomic_output_file_leaves_no_trace() {
        let directory = tempfile::tempdir().unwrap();
        let target_path = directory.path().join("lines.fl");
        let temporary_path = {
            let output_file = AtomicOutputFile::new(&target_path).unwrap();
            output_file.temporary_path().to_path_buf()
        };
        assert!(!temporary_path.exists());
        assert!(!target_path.exists());
    }
}
