use glob::glob;
use std::path::PathBuf;
use tracing::warn;
use walkdir::WalkDir;

fn is_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

/// Expands the inputs given on the command line or in the config file.
///
/// Directories are walked recursively, glob patterns are expanded and
/// anything else is kept as a plain path. Input order is preserved;
/// files found under a directory or by a pattern come out sorted.
pub fn collect_inputs(inputs: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for input in inputs {
        let path = PathBuf::from(input);

        if path.is_dir() {
            files.extend(
                WalkDir::new(&path)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file())
                    .map(|e| e.into_path()),
            );
        } else if is_pattern(input) {
            match glob(input) {
                Ok(paths) => files.extend(paths.filter_map(Result::ok).filter(|p| p.is_file())),
                Err(e) => warn!("Invalid pattern {:?}: {}", input, e),
            }
        } else {
            files.push(path);
        }
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn test_plain_paths_are_kept() {
        let inputs = vec!["/data/B.nc".to_string(), "relative/A.h5".to_string()];
        assert_eq!(
            collect_inputs(&inputs),
            vec![PathBuf::from("/data/B.nc"), PathBuf::from("relative/A.h5")]
        );
    }

    #[test]
    fn test_directory_is_walked() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("2023")).unwrap();
        File::create(dir.path().join("b.nc")).unwrap();
        File::create(dir.path().join("a.h5")).unwrap();
        File::create(dir.path().join("2023").join("c.nc")).unwrap();

        let files = collect_inputs(&[dir.path().to_string_lossy().into_owned()]);

        assert_eq!(
            files,
            vec![
                dir.path().join("2023").join("c.nc"),
                dir.path().join("a.h5"),
                dir.path().join("b.nc"),
            ]
        );
    }

    #[test]
    fn test_glob_pattern_is_expanded() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("A_SST.nc")).unwrap();
        File::create(dir.path().join("A_OC.nc")).unwrap();
        File::create(dir.path().join("A_OC.txt")).unwrap();

        let pattern = format!("{}/*.nc", dir.path().display());
        let files = collect_inputs(&[pattern, "/data/explicit.h5".to_string()]);

        assert_eq!(
            files,
            vec![
                dir.path().join("A_OC.nc"),
                dir.path().join("A_SST.nc"),
                PathBuf::from("/data/explicit.h5"),
            ]
        );
    }

    #[test]
    fn test_invalid_pattern_is_ignored() {
        assert!(collect_inputs(&["/data/[.nc".to_string()]).is_empty());
    }
}
