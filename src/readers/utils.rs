use super::types::{FileType, ReadError};
use std::path::Path;

pub fn file_type_from_path(path: &Path) -> Result<FileType, ReadError> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();

    if name.ends_with(".nc") {
        Ok(FileType::NetCdf)
    } else if name.ends_with(".h5") {
        Ok(FileType::Hdf5)
    } else {
        Err(ReadError::UnsupportedFileType(path.to_path_buf()))
    }
}

/// GDAL connection string for a variable inside a group of a NetCDF or HDF5 file.
pub fn subdataset_path(file_type: FileType, path: &Path, group: &str, variable: &str) -> String {
    match file_type {
        FileType::NetCdf => format!("NETCDF:\"{}\":/{}/{}", path.display(), group, variable),
        FileType::Hdf5 => format!("HDF5:\"{}\"://{}/{}", path.display(), group, variable),
    }
}

/// Value of the first of `names` found among `KEY=VALUE` metadata entries.
///
/// Names are tried in order, so earlier names take precedence.
pub fn metadata_value<'a>(entries: &'a [String], names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|wanted| {
        entries.iter().find_map(|entry| {
            let (name, value) = entry.split_once('=')?;
            (name == *wanted).then_some(value)
        })
    })
}

/// Numeric elements of a GDAL metadata value.
///
/// Array attributes come back as a list joined by spaces or commas, possibly
/// wrapped in braces. Parsing stops at the first non numeric token.
pub fn numbers(value: &str) -> Vec<f64> {
    value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map_while(|token| token.trim_matches(|c| c == '{' || c == '}').parse().ok())
        .collect()
}

/// First numeric element of a GDAL metadata value.
pub fn first_number(value: &str) -> Option<f64> {
    numbers(value).first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_file_type_from_extension() {
        assert_eq!(
            file_type_from_path(Path::new("/data/A2023001.L2_LAC_OC.nc")).unwrap(),
            FileType::NetCdf
        );
        assert_eq!(
            file_type_from_path(Path::new("GC1SG1_NWLRQ.h5")).unwrap(),
            FileType::Hdf5
        );
        assert!(matches!(
            file_type_from_path(Path::new("chlor_a.tif")),
            Err(ReadError::UnsupportedFileType(_))
        ));
        assert!(file_type_from_path(Path::new("no_extension")).is_err());
        assert!(file_type_from_path(Path::new("A.nc.gz")).is_err());
        assert_eq!(file_type_from_path(Path::new(".nc")).unwrap(), FileType::NetCdf);
    }

    #[test]
    fn test_subdataset_path() {
        let path = PathBuf::from("/data/A.nc");
        assert_eq!(
            subdataset_path(FileType::NetCdf, &path, "geophysical_data", "chlor_a"),
            "NETCDF:\"/data/A.nc\":/geophysical_data/chlor_a"
        );

        let path = PathBuf::from("/data/B_NWLR.h5");
        assert_eq!(
            subdataset_path(FileType::Hdf5, &path, "Image_data", "NWLR_412"),
            "HDF5:\"/data/B_NWLR.h5\"://Image_data/NWLR_412"
        );
    }

    #[test]
    fn test_first_number() {
        assert_eq!(first_number("-999"), Some(-999.0));
        assert_eq!(first_number("65535 65534"), Some(65535.0));
        assert_eq!(first_number("{-999,0}"), Some(-999.0));
        assert_eq!(first_number(" 1.5, 2"), Some(1.5));
        assert_eq!(first_number("n/a"), None);
        assert_eq!(first_number(""), None);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(numbers("{0.001,100}"), vec![0.001, 100.0]);
        assert_eq!(numbers("-2 45"), vec![-2.0, 45.0]);
        assert_eq!(numbers("3 n/a 4"), vec![3.0]);
        assert!(numbers("").is_empty());
    }

    #[test]
    fn test_metadata_value_precedence() {
        let entries = vec![
            "chlor_a#valid_max=100".to_string(),
            "valid_max=50".to_string(),
            "broken entry".to_string(),
        ];

        assert_eq!(metadata_value(&entries, &["valid_max", "chlor_a#valid_max"]), Some("50"));
        assert_eq!(metadata_value(&entries, &["chlor_a#valid_max"]), Some("100"));
        assert_eq!(metadata_value(&entries, &["valid_min"]), None);
    }
}
