use serde_json::{from_slice, to_vec_pretty};
use shared::{CsvqlError, CsvqlOptions};
use std::fs;
use std::path::Path;

//Creates the file with the default options when it doesn't exist
pub fn load_options(
    path: &str
) -> Result<CsvqlOptions, CsvqlError> {
    let path = Path::new(path);
    if path.exists() {
        load_options_from_existing_file(path)
    } else {
        populate_options_file_with_default_data(path)?;
        Ok(CsvqlOptions::default())
    }
}

fn populate_options_file_with_default_data(path: &Path) -> Result<(), CsvqlError> {
    let serialized = to_vec_pretty(&CsvqlOptions::default())
        .map_err(|e| CsvqlError::CannotWriteOptionsFile(path_to_string(path), e.into()))?;
    fs::write(path, serialized)
        .map_err(|e| CsvqlError::CannotWriteOptionsFile(path_to_string(path), e))
}

fn load_options_from_existing_file(path: &Path) -> Result<CsvqlOptions, CsvqlError> {
    let bytes = fs::read(path)
        .map_err(|e| CsvqlError::CannotReadOptionsFile(path_to_string(path), e))?;
    from_slice(&bytes)
        .map_err(|e| CsvqlError::CannotDecodeOptionsFile(path_to_string(path), e))
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod test {
    use crate::options_file::load_options;
    use shared::{CsvqlError, CsvqlOptions};
    use std::fs;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("options.json");

        let options = load_options(path.to_str().unwrap()).unwrap();

        assert_eq!(options, CsvqlOptions::default());
        assert!(path.exists());
        assert_eq!(load_options(path.to_str().unwrap()).unwrap(), CsvqlOptions::default());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("options.json");
        fs::write(&path, r#"{"base_path": "/data", "use_debug_logging": true}"#).unwrap();

        let options = load_options(path.to_str().unwrap()).unwrap();

        assert_eq!(options.base_path, "/data");
        assert!(options.use_debug_logging);
        assert_eq!(options.prompt, CsvqlOptions::default().prompt);
    }

    #[test]
    fn malformed_file() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("options.json");
        fs::write(&path, "{ base_path").unwrap();

        assert!(matches!(load_options(path.to_str().unwrap()), Err(CsvqlError::CannotDecodeOptionsFile(_, _))));
    }
}
