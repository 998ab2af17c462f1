use crate::sql::plan::plan_step::{PlanStepDesc, PlanStepTrait};
use crate::table::row::Row;
use crate::table::table_scanner::TableScan;
use shared::CsvqlError;

pub struct FullScanStep {
    table_name: String,
    scan: TableScan,
}

impl FullScanStep {
    pub fn create(
        table_name: &str,
        scan: TableScan,
    ) -> FullScanStep {
        FullScanStep {
            table_name: table_name.to_string(),
            scan,
        }
    }
}

impl PlanStepTrait for FullScanStep {
    fn next(&mut self) -> Result<Option<Row>, CsvqlError> {
        self.scan.next()
    }

    fn desc(&self) -> PlanStepDesc {
        PlanStepDesc::FullScan(self.table_name.clone())
    }
}
