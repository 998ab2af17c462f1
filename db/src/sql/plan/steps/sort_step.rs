use crate::sql::plan::plan_step::{PlanStep, PlanStepDesc, PlanStepTrait};
use crate::sql::statement::SortDirection;
use crate::table::row::Row;
use crate::value::compare_cells;
use shared::CsvqlError;
use std::cmp::Ordering;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortKey {
    pub(crate) position: usize,
    pub(crate) direction: SortDirection,
}

enum SortStepState {
    PendingSort,
    Sorted
}

//Reads every source row before returning the first one. Sorting is stable, rows equal
//on every key keep their source order
pub struct SortStep {
    state: SortStepState,
    keys: Vec<SortKey>,
    source: PlanStep,

    //Used when state is Sorted
    sorted_rows: VecDeque<Row>,
}

impl SortStep {
    pub fn create(
        keys: Vec<SortKey>,
        source: PlanStep,
    ) -> SortStep {
        SortStep {
            state: SortStepState::PendingSort,
            sorted_rows: VecDeque::new(),
            source,
            keys,
        }
    }

    fn sort(&mut self) -> Result<(), CsvqlError> {
        let mut rows = Vec::new();
        while let Some(row) = self.source.next()? {
            rows.push(row);
        }

        rows.sort_by(|a, b| compare_rows(a, b, &self.keys));

        self.sorted_rows = VecDeque::from(rows);
        self.state = SortStepState::Sorted;
        Ok(())
    }
}

//First key whose values differ decides
fn compare_rows(a: &Row, b: &Row, keys: &[SortKey]) -> Ordering {
    for key in keys {
        let ordering = compare_cells(a.get(key.position), b.get(key.position));
        if ordering != Ordering::Equal {
            return match key.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
        }
    }

    Ordering::Equal
}

impl PlanStepTrait for SortStep {
    fn next(&mut self) -> Result<Option<Row>, CsvqlError> {
        if let SortStepState::PendingSort = self.state {
            self.sort()?;
        }

        Ok(self.sorted_rows.pop_front())
    }

    fn desc(&self) -> PlanStepDesc {
        PlanStepDesc::Sort(
            self.keys.iter().map(|key| (key.position, key.direction)).collect(),
            Box::new(self.source.desc())
        )
    }
}
