//! Batch integrity check of swath files.
//!
//! Every `.nc`/`.h5` candidate is opened once, its field is extracted and the
//! file is either kept (at least one unmasked value) or removed from disk
//! (unreadable, no field for the instrument, or fully masked). A bad file
//! never stops the batch.

pub mod outcome;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::instrument::Instrument;
use crate::readers::{FieldExtractor, ReadError, file_type_from_path};

pub use outcome::{CheckReport, FileOutcome, Outcome, Summary};

/// Checks `files` in order and returns the report of every candidate.
pub fn check<P, E>(files: &[P], instrument: &Instrument, extractor: &E) -> CheckReport
where
    P: AsRef<Path>,
    E: FieldExtractor + ?Sized,
{
    let mut report = CheckReport::default();

    for (i, file) in files.iter().enumerate() {
        let index = i + 1;
        let path =
            std::path::absolute(file.as_ref()).unwrap_or_else(|_| file.as_ref().to_path_buf());

        let outcome = if file_type_from_path(&path).is_err() {
            Outcome::Skipped
        } else {
            check_file(index, &path, instrument, extractor)
        };

        if let Outcome::Valid(_) = outcome {
            report.passed.push(path.clone());
        }
        report.outcomes.push(FileOutcome {
            index,
            path,
            outcome,
        });
    }

    report
}

/// Checks `files` and returns the absolute paths of the ones that passed.
pub fn check_files<P, E>(files: &[P], instrument: &Instrument, extractor: &E) -> Vec<PathBuf>
where
    P: AsRef<Path>,
    E: FieldExtractor + ?Sized,
{
    check(files, instrument, extractor).passed
}

fn check_file<E>(index: usize, path: &Path, instrument: &Instrument, extractor: &E) -> Outcome
where
    E: FieldExtractor + ?Sized,
{
    let basename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let data = match extractor.extract(path, instrument) {
        Ok(data) => data,
        Err(ReadError::UnsupportedInstrument(_)) => {
            remove(path);
            warn!("\tFile#: {} | {}: BadFile, removed", file_number(index), basename);
            return Outcome::MissingField;
        }
        Err(e) => {
            if path.is_file() {
                remove(path);
            }
            error!(
                error = %e,
                "\tFile#: {} | {} | {}", file_number(index), basename, instrument
            );
            return Outcome::Unreadable(e.to_string());
        }
    };

    debug!("\tFile#: {} | {}\n{}", file_number(index), basename, data);

    let count = data.count();
    if count == 0 {
        remove(path);
        warn!("\tFile#: {} | {}: Empty, removed", file_number(index), basename);
        return Outcome::Empty;
    }

    info!("\tFile#: {} | {}: Pass", file_number(index), basename);
    Outcome::Valid(count)
}

/// Right-aligned file number with a sign column, e.g. `"  1"` or `" 100"`.
fn file_number(index: usize) -> String {
    format!("{:>3}", format!(" {}", index))
}

/// Best-effort removal; a failure is only reported at debug level.
fn remove(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        debug!("Could not remove {}: {}", path.display(), e);
    }
}
