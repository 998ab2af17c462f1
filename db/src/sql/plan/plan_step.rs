use crate::sql::plan::steps::aggregation_step::AggregationStep;
use crate::sql::plan::steps::filter_step::FilterStep;
use crate::sql::plan::steps::full_scan_step::FullScanStep;
use crate::sql::plan::steps::join_step::JoinStep;
use crate::sql::plan::steps::limit_step::LimitStep;
use crate::sql::plan::steps::project_selection_step::ProjectSelectionStep;
use crate::sql::plan::steps::sort_step::SortStep;
use crate::sql::statement::{JoinType, SortDirection};
use crate::table::row::Row;
use shared::CsvqlError;

pub(crate) trait PlanStepTrait {
    fn next(&mut self) -> Result<Option<Row>, CsvqlError>;
    fn desc(&self) -> PlanStepDesc;
}

pub enum PlanStep {
    ProjectSelection(Box<ProjectSelectionStep>),
    Limit(Box<LimitStep>),
    Sort(Box<SortStep>),
    Aggregation(Box<AggregationStep>),
    Filter(Box<FilterStep>),
    Join(Box<JoinStep>),
    FullScan(FullScanStep),

    //Only used for testing
    #[cfg(test)]
    Mock(MockStep),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanStepDesc {
    ProjectSelection(Vec<String>, Box<PlanStepDesc>), //Output header
    Limit(usize, Box<PlanStepDesc>),
    Sort(Vec<(usize, SortDirection)>, Box<PlanStepDesc>), //Sort key positions
    Aggregation(Vec<String>, Box<PlanStepDesc>), //Group by fields
    Filter(Box<PlanStepDesc>),
    Join(JoinType, String, Box<PlanStepDesc>), //Joined table
    FullScan(String), //Table name

    #[cfg(test)]
    Mock,
}

impl PlanStep {
    pub fn next(&mut self) -> Result<Option<Row>, CsvqlError> {
        match self {
            PlanStep::ProjectSelection(step) => step.next(),
            PlanStep::Limit(step) => step.next(),
            PlanStep::Sort(step) => step.next(),
            PlanStep::Aggregation(step) => step.next(),
            PlanStep::Filter(step) => step.next(),
            PlanStep::Join(step) => step.next(),
            PlanStep::FullScan(step) => step.next(),
            #[cfg(test)]
            PlanStep::Mock(step) => step.next(),
        }
    }

    pub fn desc(&self) -> PlanStepDesc {
        match self {
            PlanStep::ProjectSelection(step) => step.desc(),
            PlanStep::Limit(step) => step.desc(),
            PlanStep::Sort(step) => step.desc(),
            PlanStep::Aggregation(step) => step.desc(),
            PlanStep::Filter(step) => step.desc(),
            PlanStep::Join(step) => step.desc(),
            PlanStep::FullScan(step) => step.desc(),
            #[cfg(test)]
            PlanStep::Mock(step) => step.desc(),
        }
    }
}

#[cfg(test)]
pub struct MockStep {
    rows: std::collections::VecDeque<Row>,
}

#[cfg(test)]
impl MockStep {
    pub fn create(rows: Vec<Vec<&str>>) -> PlanStep {
        PlanStep::Mock(MockStep {
            rows: rows.into_iter()
                .map(|values| Row::create(values.into_iter().map(|value| value.to_string()).collect()))
                .collect()
        })
    }
}

#[cfg(test)]
impl PlanStepTrait for MockStep {
    fn next(&mut self) -> Result<Option<Row>, CsvqlError> {
        Ok(self.rows.pop_front())
    }

    fn desc(&self) -> PlanStepDesc {
        PlanStepDesc::Mock
    }
}

//Drains a plan. Used by tests of single steps
#[cfg(test)]
pub fn collect_rows(mut step: PlanStep) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    while let Some(row) = step.next().unwrap() {
        rows.push(row.into_values());
    }
    rows
}
