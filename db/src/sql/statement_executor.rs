use crate::sql::plan::planner::Planner;
use crate::sql::query_result::QueryResult;
use crate::sql::statement::SelectStatement;
use shared::logger::{logger, CsvqlLayer};
use shared::{CsvqlError, CsvqlOptions};
use std::sync::Arc;

pub struct StatementExecutor {
    planner: Planner,
}

impl StatementExecutor {
    pub fn create(
        options: &Arc<CsvqlOptions>
    ) -> StatementExecutor {
        StatementExecutor {
            planner: Planner::create(options),
        }
    }

    //Rows are only returned once the whole plan has run, a failing statement produces no partial result
    pub fn execute(
        &self,
        statement: SelectStatement,
    ) -> Result<QueryResult, CsvqlError> {
        let table_names = statement.table_names().join(", ");
        let mut plan = self.planner.plan_select(statement)?;
        let mut rows = Vec::new();

        while let Some(row) = plan.root.next()? {
            rows.push(row.into_values());
        }

        logger().debug(CsvqlLayer::Execution(table_names), &format!("Returned {} rows", rows.len()));

        Ok(QueryResult {
            header: plan.header,
            rows,
        })
    }
}
