use crate::table::column_namespace::ColumnNamespace;
use crate::table::row::Row;
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use shared::logger::{logger, CsvqlLayer};
use shared::CsvqlError;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

//Tables are <table name>.csv files inside the base directory. The first record is the header
pub struct TableScanner {
    base_path: PathBuf,
}

pub struct TableScan {
    table_name: String,
    namespace: ColumnNamespace,
    records: StringRecordsIntoIter<File>,
    n_scanned_rows: usize,
}

//Rows of one table grouped by the text of their join key field
pub struct BucketedTable {
    pub(crate) namespace: ColumnNamespace,
    pub(crate) buckets: HashMap<String, Vec<Row>>,
}

impl TableScanner {
    pub fn create(base_path: &str) -> TableScanner {
        TableScanner {
            base_path: PathBuf::from(base_path),
        }
    }

    pub fn table_path(&self, table_name: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", table_name))
    }

    pub fn open(&self, table_name: &str) -> Result<TableScan, CsvqlError> {
        let path = self.table_path(table_name);
        if !path.is_file() {
            return Err(CsvqlError::TableNotFound(table_name.to_string(), path_to_string(&path)));
        }

        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)
            .map_err(|e| CsvqlError::CannotReadTable(table_name.to_string(), e.to_string()))?;
        let mut records = reader.into_records();

        let header: Vec<String> = match records.next() {
            Some(record) => record_to_values(table_name, record)?,
            None => Vec::new(),
        };

        Ok(TableScan {
            namespace: ColumnNamespace::create_for_table(table_name, &header),
            table_name: table_name.to_string(),
            n_scanned_rows: 0,
            records,
        })
    }

    pub fn scan_bucketed(&self, table_name: &str, key_field_name: &str) -> Result<BucketedTable, CsvqlError> {
        let mut scan = self.open(table_name)?;
        let key_position = scan.namespace.resolve_qualified(table_name, key_field_name)?;
        let mut buckets: HashMap<String, Vec<Row>> = HashMap::new();

        while let Some(row) = scan.next()? {
            buckets.entry(row.get(key_position).to_string())
                .or_default()
                .push(row);
        }

        logger().debug(CsvqlLayer::Execution(table_name.to_string()), &format!(
            "Bucketed {} rows by {} into {} buckets", scan.n_scanned_rows, key_field_name, buckets.len()
        ));

        Ok(BucketedTable {
            namespace: scan.namespace,
            buckets,
        })
    }
}

impl TableScan {
    pub fn namespace(&self) -> &ColumnNamespace {
        &self.namespace
    }

    pub fn next(&mut self) -> Result<Option<Row>, CsvqlError> {
        match self.records.next() {
            Some(record) => {
                let values = record_to_values(&self.table_name, record)?;
                self.n_scanned_rows += 1;
                Ok(Some(Row::create_with_width(values, self.namespace.width())))
            },
            None => {
                logger().debug(CsvqlLayer::Execution(self.table_name.clone()), &format!(
                    "Scanned {} rows", self.n_scanned_rows
                ));
                Ok(None)
            }
        }
    }
}

fn record_to_values(table_name: &str, record: Result<StringRecord, csv::Error>) -> Result<Vec<String>, CsvqlError> {
    let record = record.map_err(|e| CsvqlError::CannotReadTable(table_name.to_string(), e.to_string()))?;
    Ok(record.iter().map(|value| value.to_string()).collect())
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
