use crate::utils::resolve_path;
use csv::Writer;
use db::QueryResult;
use shared::CsvqlError;
use std::path::Path;

//Writes the header and the rows as CSV. Existing files are never overwritten.
//Returns the path of the written file
pub fn export_result(
    base_path: &str,
    file_path: &str,
    result: &QueryResult,
) -> Result<String, CsvqlError> {
    let path = resolve_path(base_path, file_path);
    if Path::new(&path).exists() {
        return Err(CsvqlError::CannotExport(path, String::from("File already exists")));
    }

    let mut writer = Writer::from_path(&path)
        .map_err(|e| CsvqlError::CannotExport(path.clone(), e.to_string()))?;
    writer.write_record(&result.header)
        .map_err(|e| CsvqlError::CannotExport(path.clone(), e.to_string()))?;
    for row in &result.rows {
        writer.write_record(row)
            .map_err(|e| CsvqlError::CannotExport(path.clone(), e.to_string()))?;
    }
    writer.flush()
        .map_err(|e| CsvqlError::CannotExport(path.clone(), e.to_string()))?;

    Ok(path)
}

#[cfg(test)]
mod test {
    use crate::export::export_result;
    use db::QueryResult;
    use shared::CsvqlError;
    use std::fs;

    fn result() -> QueryResult {
        QueryResult {
            header: vec![String::from("name"), String::from("title")],
            rows: vec![
                vec![String::from("Alice"), String::from("dev, senior")],
                vec![String::from("Bob"), String::new()],
            ],
        }
    }

    #[test]
    fn writes_csv_relative_to_base_path() {
        let directory = tempfile::tempdir().unwrap();
        let base_path = directory.path().to_str().unwrap();

        let path = export_result(base_path, "out.csv", &result()).unwrap();

        assert_eq!(path, directory.path().join("out.csv").to_str().unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "name,title\nAlice,\"dev, senior\"\nBob,\n");
    }

    #[test]
    fn refuses_existing_file() {
        let directory = tempfile::tempdir().unwrap();
        let base_path = directory.path().to_str().unwrap();
        fs::write(directory.path().join("out.csv"), "keep me").unwrap();

        let result = export_result(base_path, "out.csv", &result());

        assert!(matches!(result, Err(CsvqlError::CannotExport(_, _))));
        assert_eq!(fs::read_to_string(directory.path().join("out.csv")).unwrap(), "keep me");
    }
}
