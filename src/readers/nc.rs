use super::utils::{first_number, metadata_value, numbers, subdataset_path};
use super::{FieldReader, FileType, MaskedArray, ReadError, FILL_VALUE};
use gdal::{Dataset, Metadata};
use std::path::PathBuf;

const GEOPHYSICAL_GROUP: &str = "geophysical_data";

/// Reads ocean-color L2 fields stored under `/geophysical_data`.
///
/// Masking follows the variable's `_FillValue` (GDAL no-data) and its
/// `valid_range` or `valid_min`/`valid_max`; NaN is treated as missing as well.
pub struct NcReader {
    pub file_name: PathBuf,
    pub key: &'static str,
}

impl FieldReader for NcReader {
    fn read_field(&self) -> Result<MaskedArray, ReadError> {
        let gdal_path =
            subdataset_path(FileType::NetCdf, &self.file_name, GEOPHYSICAL_GROUP, self.key);

        let dataset = Dataset::open(&gdal_path).map_err(ReadError::Open)?;
        let band = dataset.rasterband(1).map_err(ReadError::Read)?;
        let (width, height) = dataset.raster_size();
        let buffer = band
            .read_as::<f32>((0, 0), (width, height), (width, height), None)
            .map_err(ReadError::Read)?;

        // Variable attributes are on the band as `valid_min`, and on the
        // dataset as `<key>#valid_min`
        let mut entries = band.metadata_domain("").unwrap_or_default();
        entries.extend(dataset.metadata_domain("").unwrap_or_default());

        let no_data = band.no_data_value().map(|v| v as f32);
        let valid = ValidRange::from_metadata(self.key, &entries);

        Ok(fill_mask(width, height, buffer.data().to_vec(), no_data, valid))
    }
}

/// Inclusive bounds of the values a variable may hold.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ValidRange {
    pub min: Option<f32>,
    pub max: Option<f32>,
}

impl ValidRange {
    /// Reads `valid_range`, or else `valid_min`/`valid_max`, of `key`.
    pub fn from_metadata(key: &str, entries: &[String]) -> Self {
        let lookup = |attribute: &str| {
            let prefixed = format!("{}#{}", key, attribute);
            metadata_value(entries, &[attribute, prefixed.as_str()])
        };

        let range = lookup("valid_range").map(numbers).unwrap_or_default();
        if let [min, max, ..] = range[..] {
            return ValidRange {
                min: Some(min as f32),
                max: Some(max as f32),
            };
        }

        ValidRange {
            min: lookup("valid_min").and_then(first_number).map(|v| v as f32),
            max: lookup("valid_max").and_then(first_number).map(|v| v as f32),
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// Masks NaN, the no-data value and anything outside `valid`.
pub fn fill_mask(
    width: usize,
    height: usize,
    values: Vec<f32>,
    no_data: Option<f32>,
    valid: ValidRange,
) -> MaskedArray {
    MaskedArray::from_values(
        width,
        height,
        values,
        no_data.unwrap_or(FILL_VALUE),
        |v| v.is_nan() || no_data.is_some_and(|nd| v == nd) || !valid.contains(v),
    )
}
