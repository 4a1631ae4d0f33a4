use std::fmt;
use std::path::PathBuf;

pub trait FieldReader {
    fn read_field(&self) -> Result<MaskedArray, ReadError>;
}

#[derive(Debug)]
pub enum ReadError {
    Open(gdal::errors::GdalError),
    Read(gdal::errors::GdalError),
    MissingAttribute { field: String, attribute: String },
    InvalidAttribute { attribute: String, value: String },
    UnsupportedFileType(PathBuf),
    UnsupportedInstrument(String),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Open(e) => write!(f, "Failed to open dataset: {}", e),
            ReadError::Read(e) => write!(f, "Failed to read field: {}", e),
            ReadError::MissingAttribute { field, attribute } => {
                write!(f, "Attribute {} not found for field {}", attribute, field)
            }
            ReadError::InvalidAttribute { attribute, value } => {
                write!(f, "Attribute {} has a non numeric value: {:?}", attribute, value)
            }
            ReadError::UnsupportedFileType(path) => {
                write!(f, "Unsupported file type: {}", path.display())
            }
            ReadError::UnsupportedInstrument(name) => {
                write!(f, "No extraction rule for instrument {:?}", name)
            }
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::Open(e) | ReadError::Read(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    NetCdf,
    Hdf5,
}

/// A 2D field paired with a validity mask.
///
/// `mask[i] == true` marks `values[i]` as invalid/missing.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedArray {
    pub width: usize,
    pub height: usize,
    pub values: Vec<f32>,
    pub mask: Vec<bool>,
    pub fill_value: f32,
}

impl MaskedArray {
    pub fn new(
        width: usize,
        height: usize,
        values: Vec<f32>,
        mask: Vec<bool>,
        fill_value: f32,
    ) -> Self {
        debug_assert_eq!(values.len(), mask.len());
        Self {
            width,
            height,
            values,
            mask,
            fill_value,
        }
    }

    /// Masks every value for which `is_invalid` returns true.
    pub fn from_values<F>(
        width: usize,
        height: usize,
        values: Vec<f32>,
        fill_value: f32,
        is_invalid: F,
    ) -> Self
    where
        F: Fn(f32) -> bool,
    {
        let mask = values.iter().map(|&v| is_invalid(v)).collect();
        Self::new(width, height, values, mask, fill_value)
    }

    /// Number of unmasked elements.
    pub fn count(&self) -> usize {
        self.mask.iter().filter(|&&masked| !masked).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn valid_values(&self) -> impl Iterator<Item = f32> + '_ {
        self.values
            .iter()
            .zip(&self.mask)
            .filter(|(_, masked)| !**masked)
            .map(|(v, _)| *v)
    }

    /// Values with masked entries replaced by the fill value.
    pub fn filled(&self) -> Vec<f32> {
        self.values
            .iter()
            .zip(&self.mask)
            .map(|(&v, &masked)| if masked { self.fill_value } else { v })
            .collect()
    }
}

impl fmt::Display for MaskedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let min_value = self
            .valid_values()
            .filter(|x| !x.is_nan())
            .fold(f32::NAN, f32::min);

        let max_value = self
            .valid_values()
            .filter(|x| !x.is_nan())
            .fold(f32::NAN, f32::max);

        write!(
            f,
            "Width: {}\nHeight: {}\nValid: {} / {}\nMin value: {}\nMax value: {}",
            self.width,
            self.height,
            self.count(),
            self.values.len(),
            min_value,
            max_value,
        )
    }
}
