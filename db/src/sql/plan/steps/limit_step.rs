use crate::sql::plan::plan_step::{PlanStep, PlanStepDesc, PlanStepTrait};
use crate::table::row::Row;
use shared::CsvqlError;

pub struct LimitStep {
    limit: usize,
    source: PlanStep,

    count: usize
}

impl LimitStep {
    pub fn create(
        limit: usize,
        source: PlanStep
    ) -> LimitStep {
        LimitStep {
            count: 0,
            source,
            limit,
        }
    }
}

impl PlanStepTrait for LimitStep {
    fn next(&mut self) -> Result<Option<Row>, CsvqlError> {
        if self.count >= self.limit {
            return Ok(None);
        }

        match self.source.next()? {
            Some(next_row) => {
                self.count += 1;
                Ok(Some(next_row))
            },
            None => Ok(None)
        }
    }

    fn desc(&self) -> PlanStepDesc {
        PlanStepDesc::Limit(self.limit, Box::new(self.source.desc()))
    }
}

#[cfg(test)]
mod test {
    use crate::sql::plan::plan_step::{collect_rows, MockStep, PlanStep};
    use crate::sql::plan::steps::limit_step::LimitStep;

    #[test]
    fn truncates() {
        let source = MockStep::create(vec![vec!["1"], vec!["2"], vec!["3"]]);

        let rows = collect_rows(PlanStep::Limit(Box::new(LimitStep::create(2, source))));

        assert_eq!(rows, vec![vec!["1"], vec!["2"]]);
    }

    #[test]
    fn limit_above_row_count() {
        let source = MockStep::create(vec![vec!["1"]]);

        let rows = collect_rows(PlanStep::Limit(Box::new(LimitStep::create(10, source))));

        assert_eq!(rows, vec![vec!["1"]]);
    }
}
