use crate::sql::parser::Parser;
use crate::sql::query_result::QueryResult;
use crate::sql::statement::SelectStatement;
use crate::sql::statement_executor::StatementExecutor;
use shared::{CsvqlError, CsvqlOptions};
use std::path::Path;
use std::sync::Arc;

pub struct CsvQl {
    statement_executor: StatementExecutor,
}

impl CsvQl {
    pub fn create(
        options: CsvqlOptions,
    ) -> Result<CsvQl, CsvqlError> {
        if !Path::new(&options.base_path).is_dir() {
            return Err(CsvqlError::BaseDirectoryNotFound(options.base_path.clone()));
        }

        Ok(CsvQl {
            statement_executor: StatementExecutor::create(&Arc::new(options)),
        })
    }

    //Runs a single SELECT statement. The tables are read again on every call
    pub fn execute(
        &self,
        query: &str,
    ) -> Result<QueryResult, CsvqlError> {
        let statement = self.parse(query)?;
        self.statement_executor.execute(statement)
    }

    pub fn parse(
        &self,
        query: &str,
    ) -> Result<SelectStatement, CsvqlError> {
        Parser::create(query)?.parse()
    }
}
