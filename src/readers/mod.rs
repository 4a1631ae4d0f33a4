pub mod h5;
pub mod nc;
pub mod types;
pub mod utils;

use std::path::Path;

use crate::instrument::{Instrument, SensorFamily};

pub use h5::H5Reader;
pub use nc::NcReader;
pub use types::{FieldReader, FileType, MaskedArray, ReadError};
pub use utils::file_type_from_path;

/// Fill value attached to extracted fields.
pub const FILL_VALUE: f32 = -32767.0;

pub fn create_reader(
    path: &Path,
    instrument: &Instrument,
) -> Result<Box<dyn FieldReader>, ReadError> {
    let basename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (Some(family), Some(key)) = (instrument.family(), instrument.field_key(&basename)) else {
        return Err(ReadError::UnsupportedInstrument(instrument.to_string()));
    };

    let file_name = path.to_path_buf();
    match family {
        SensorFamily::OceanColor => Ok(Box::new(NcReader { file_name, key })),
        SensorFamily::Sgli => Ok(Box::new(H5Reader { file_name, key })),
    }
}

/// Opens `path` and returns the field selected by `instrument`.
pub fn extract_field(path: &Path, instrument: &Instrument) -> Result<MaskedArray, ReadError> {
    create_reader(path, instrument)?.read_field()
}

/// Source of masked fields for the batch checker.
pub trait FieldExtractor {
    fn extract(&self, path: &Path, instrument: &Instrument) -> Result<MaskedArray, ReadError>;
}

/// Extractor backed by the GDAL NetCDF and HDF5 drivers.
#[derive(Debug, Default, Clone, Copy)]
pub struct GdalExtractor;

impl FieldExtractor for GdalExtractor {
    fn extract(&self, path: &Path, instrument: &Instrument) -> Result<MaskedArray, ReadError> {
        extract_field(path, instrument)
    }
}
