use crate::sql::expression::Expression;
use crate::sql::expression_evaluator::evaluate_where_expression;
use crate::sql::plan::plan_step::{PlanStep, PlanStepDesc, PlanStepTrait};
use crate::table::column_namespace::ColumnNamespace;
use crate::table::row::Row;
use shared::CsvqlError;

pub struct FilterStep {
    filter_expression: Expression,
    namespace: ColumnNamespace,
    source: PlanStep,
}

impl FilterStep {
    pub fn create(
        filter_expression: Expression,
        namespace: ColumnNamespace,
        source: PlanStep,
    ) -> FilterStep {
        FilterStep {
            filter_expression,
            namespace,
            source
        }
    }
}

impl PlanStepTrait for FilterStep {
    fn next(&mut self) -> Result<Option<Row>, CsvqlError> {
        while let Some(next_row) = self.source.next()? {
            if evaluate_where_expression(&next_row, &self.namespace, &self.filter_expression)? {
                return Ok(Some(next_row));
            }
        }

        Ok(None)
    }

    fn desc(&self) -> PlanStepDesc {
        PlanStepDesc::Filter(Box::new(self.source.desc()))
    }
}

#[cfg(test)]
mod test {
    use crate::sql::expression::{BinaryOperator, Expression};
    use crate::sql::plan::plan_step::{collect_rows, MockStep, PlanStep};
    use crate::sql::plan::steps::filter_step::FilterStep;
    use crate::table::column_namespace::ColumnNamespace;

    #[test]
    fn filters_rows() {
        let namespace = ColumnNamespace::create_for_table("t", &[String::from("id"), String::from("age")]);
        let source = MockStep::create(vec![vec!["1", "20"], vec!["2", "40"], vec!["3", "35"]]);
        let expression = Expression::binary(BinaryOperator::Greater, Expression::identifier("age"), Expression::number(30));

        let rows = collect_rows(PlanStep::Filter(Box::new(FilterStep::create(expression, namespace, source))));

        assert_eq!(rows, vec![vec!["2", "40"], vec!["3", "35"]]);
    }
}
