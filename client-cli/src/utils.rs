use shared::CsvqlError;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub fn duration_to_string(duration: Duration) -> String {
    format!("{}ms", duration.as_millis())
}

//Names of the <table>.csv files of the directory, sorted
pub fn list_tables(base_path: &str) -> Result<Vec<String>, CsvqlError> {
    let entries = fs::read_dir(base_path)
        .map_err(|e| CsvqlError::CannotListTables(base_path.to_string(), e))?;
    let mut tables = Vec::new();

    for entry in entries {
        let path = entry
            .map_err(|e| CsvqlError::CannotListTables(base_path.to_string(), e))?
            .path();
        if !path.is_file() || path.extension().map_or(true, |extension| extension != "csv") {
            continue;
        }
        if let Some(table_name) = path.file_stem().and_then(|stem| stem.to_str()) {
            tables.push(table_name.to_string());
        }
    }

    tables.sort();
    Ok(tables)
}

//Relative paths are resolved against the tables directory
pub fn resolve_path(base_path: &str, path: &str) -> String {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_string_lossy().to_string()
    } else {
        Path::new(base_path).join(path).to_string_lossy().to_string()
    }
}
