use crate::sql::plan::plan_step::{PlanStep, PlanStepDesc, PlanStepTrait};
use crate::sql::statement::JoinType;
use crate::table::row::Row;
use crate::table::table_scanner::BucketedTable;
use shared::logger::{logger, CsvqlLayer};
use shared::CsvqlError;
use std::collections::VecDeque;

//Hash equi join. The right table is bucketed by its key, left rows are streamed and probe the buckets.
//Every match is emitted as left columns followed by right columns, in left scan order and then
//right scan order. Left rows without a match are dropped whatever the declared join type
pub struct JoinStep {
    join_type: JoinType,
    right_table_name: String,
    right: BucketedTable,
    left_key_position: usize,
    source: PlanStep,

    pending_rows: VecDeque<Row>,
    n_joined_rows: usize,
}

impl JoinStep {
    pub fn create(
        join_type: JoinType,
        right_table_name: &str,
        right: BucketedTable,
        left_key_position: usize,
        source: PlanStep,
    ) -> JoinStep {
        JoinStep {
            right_table_name: right_table_name.to_string(),
            pending_rows: VecDeque::new(),
            n_joined_rows: 0,
            left_key_position,
            join_type,
            source,
            right,
        }
    }
}

impl PlanStepTrait for JoinStep {
    fn next(&mut self) -> Result<Option<Row>, CsvqlError> {
        loop {
            if let Some(joined_row) = self.pending_rows.pop_front() {
                self.n_joined_rows += 1;
                return Ok(Some(joined_row));
            }

            match self.source.next()? {
                Some(left_row) => {
                    if let Some(right_rows) = self.right.buckets.get(left_row.get(self.left_key_position)) {
                        for right_row in right_rows {
                            self.pending_rows.push_back(left_row.concat(right_row));
                        }
                    }
                },
                None => {
                    logger().debug(CsvqlLayer::Execution(self.right_table_name.clone()), &format!(
                        "Join produced {} rows", self.n_joined_rows
                    ));
                    return Ok(None);
                }
            }
        }
    }

    fn desc(&self) -> PlanStepDesc {
        PlanStepDesc::Join(self.join_type, self.right_table_name.clone(), Box::new(self.source.desc()))
    }
}
