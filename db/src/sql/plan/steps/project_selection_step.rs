use crate::sql::plan::plan_step::{PlanStep, PlanStepDesc, PlanStepTrait};
use crate::table::row::Row;
use shared::CsvqlError;

pub struct ProjectSelectionStep {
    source: PlanStep,
    header: Vec<String>,
    //Position in the source row of every output column
    positions: Vec<usize>,
}

impl ProjectSelectionStep {
    pub fn create(
        header: Vec<String>,
        positions: Vec<usize>,
        source: PlanStep,
    ) -> ProjectSelectionStep {
        ProjectSelectionStep {
            header,
            positions,
            source
        }
    }
}

impl PlanStepTrait for ProjectSelectionStep {
    fn next(&mut self) -> Result<Option<Row>, CsvqlError> {
        match self.source.next()? {
            Some(row) => Ok(Some(row.project(&self.positions))),
            None => Ok(None)
        }
    }

    fn desc(&self) -> PlanStepDesc {
        PlanStepDesc::ProjectSelection(
            self.header.clone(),
            Box::new(self.source.desc())
        )
    }
}
