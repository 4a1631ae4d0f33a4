use super::utils::{first_number, metadata_value, subdataset_path};
use super::{FieldReader, FileType, MaskedArray, ReadError, FILL_VALUE};
use gdal::{Dataset, Metadata};
use std::path::PathBuf;

const IMAGE_GROUP: &str = "Image_data";
const ERROR_DN: &str = "Error_DN";

/// Reads SGLI L2 fields stored under `/Image_data`.
///
/// Invalid pixels are the ones equal to the field's `Error_DN` attribute.
pub struct H5Reader {
    pub file_name: PathBuf,
    pub key: &'static str,
}

impl FieldReader for H5Reader {
    fn read_field(&self) -> Result<MaskedArray, ReadError> {
        let gdal_path = subdataset_path(FileType::Hdf5, &self.file_name, IMAGE_GROUP, self.key);

        let dataset = Dataset::open(&gdal_path).map_err(ReadError::Open)?;
        let band = dataset.rasterband(1).map_err(ReadError::Read)?;
        let (width, height) = dataset.raster_size();
        let buffer = band
            .read_as::<f64>((0, 0), (width, height), (width, height), None)
            .map_err(ReadError::Read)?;

        // GDAL exposes HDF5 attributes as metadata, either on the band or
        // flattened onto the dataset with the object path as prefix
        let mut entries = band.metadata_domain("").unwrap_or_default();
        entries.extend(dataset.metadata_domain("").unwrap_or_default());

        let sentinel = error_dn(self.key, &entries)?;

        Ok(sentinel_mask(width, height, buffer.data(), sentinel))
    }
}

/// Masks raw digital numbers equal to `sentinel` and converts them to f32.
pub fn sentinel_mask(width: usize, height: usize, raw: &[f64], sentinel: f64) -> MaskedArray {
    let values = raw.iter().map(|&v| v as f32).collect();
    let mask = raw.iter().map(|&v| v == sentinel).collect();

    MaskedArray::new(width, height, values, mask, FILL_VALUE)
}

/// Finds the `Error_DN` sentinel of `key` among `KEY=VALUE` metadata entries.
fn error_dn(key: &str, entries: &[String]) -> Result<f64, ReadError> {
    let prefixed = format!("{}_{}_{}", IMAGE_GROUP, key, ERROR_DN);
    let short = format!("{}_{}", key, ERROR_DN);

    let value = metadata_value(entries, &[ERROR_DN, prefixed.as_str(), short.as_str()])
        .ok_or_else(|| ReadError::MissingAttribute {
            field: format!("/{}/{}", IMAGE_GROUP, key),
            attribute: ERROR_DN.to_string(),
        })?;

    first_number(value).ok_or_else(|| ReadError::InvalidAttribute {
        attribute: ERROR_DN.to_string(),
        value: value.to_string(),
    })
}
