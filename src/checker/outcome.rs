use std::fmt;
use std::path::PathBuf;

/// Classification of a single candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Not a `.nc`/`.h5` file; left untouched
    Skipped,
    /// Opening or reading the field failed
    Unreadable(String),
    /// No extraction rule for the instrument
    MissingField,
    /// The field has no unmasked element
    Empty,
    /// The field has this many unmasked elements
    Valid(usize),
}

impl Outcome {
    pub fn is_removed(&self) -> bool {
        matches!(
            self,
            Outcome::Unreadable(_) | Outcome::MissingField | Outcome::Empty
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Skipped => write!(f, "skipped"),
            Outcome::Unreadable(e) => write!(f, "unreadable ({})", e),
            Outcome::MissingField => write!(f, "missing field"),
            Outcome::Empty => write!(f, "empty"),
            Outcome::Valid(count) => write!(f, "valid ({} values)", count),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// 1-based position in the input list
    pub index: usize,
    pub path: PathBuf,
    pub outcome: Outcome,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub skipped: usize,
    pub unreadable: usize,
    pub missing_field: usize,
    pub empty: usize,
    pub valid: usize,
}

impl Summary {
    pub fn removed(&self) -> usize {
        self.unreadable + self.missing_field + self.empty
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} passed, {} removed ({} unreadable, {} missing field, {} empty), {} skipped",
            self.valid,
            self.removed(),
            self.unreadable,
            self.missing_field,
            self.empty,
            self.skipped
        )
    }
}

/// Result of a batch check.
#[derive(Debug, Default, Clone)]
pub struct CheckReport {
    /// Absolute paths of the files that passed, in input order
    pub passed: Vec<PathBuf>,
    pub outcomes: Vec<FileOutcome>,
}

impl CheckReport {
    pub fn summary(&self) -> Summary {
        self.outcomes
            .iter()
            .fold(Summary::default(), |mut summary, file| {
                match file.outcome {
                    Outcome::Skipped => summary.skipped += 1,
                    Outcome::Unreadable(_) => summary.unreadable += 1,
                    Outcome::MissingField => summary.missing_field += 1,
                    Outcome::Empty => summary.empty += 1,
                    Outcome::Valid(_) => summary.valid += 1,
                }
                summary
            })
    }

    pub fn removed(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|file| file.outcome.is_removed())
    }
}
