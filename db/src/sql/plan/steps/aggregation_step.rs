use crate::sql::plan::plan_step::{PlanStep, PlanStepDesc, PlanStepTrait};
use crate::sql::statement::AggregateFunction;
use crate::table::row::Row;
use crate::value::compare_cells;
use shared::logger::{logger, CsvqlLayer};
use shared::CsvqlError;
use std::collections::{HashMap, VecDeque};

const GROUP_KEY_TAG: &str = "groupBy";
const GROUP_KEY_SEPARATOR: char = '\u{1f}';

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateColumn {
    pub(crate) function: AggregateFunction,
    //Position of the aggregated field in the source row
    pub(crate) position: usize,
}

enum AggregationStepState {
    PendingAggregation,
    Aggregated,
}

struct Group {
    //First row seen with this key
    representative: Row,
    //One collector per aggregate column, values in scan order. Empty for grouping columns
    collectors: Vec<Vec<String>>,
}

//Emits one row per group in first seen order: the representative row followed by the
//result of every aggregate column
pub struct AggregationStep {
    state: AggregationStepState,
    table_names: String,
    group_by: Vec<String>,
    group_by_positions: Vec<usize>,
    aggregates: Vec<AggregateColumn>,
    source: PlanStep,

    //Used when state is Aggregated
    aggregated_rows: VecDeque<Row>,
}

impl AggregationStep {
    pub fn create(
        table_names: &str,
        group_by: Vec<String>,
        group_by_positions: Vec<usize>,
        aggregates: Vec<AggregateColumn>,
        source: PlanStep,
    ) -> AggregationStep {
        AggregationStep {
            state: AggregationStepState::PendingAggregation,
            table_names: table_names.to_string(),
            aggregated_rows: VecDeque::new(),
            group_by_positions,
            aggregates,
            group_by,
            source,
        }
    }

    fn aggregate(&mut self) -> Result<(), CsvqlError> {
        let mut groups: Vec<Group> = Vec::new();
        let mut group_index_by_key: HashMap<String, usize> = HashMap::new();

        while let Some(row) = self.source.next()? {
            let key = self.group_key(&row);
            let group_index = match group_index_by_key.get(&key) {
                Some(group_index) => *group_index,
                None => {
                    groups.push(Group {
                        collectors: vec![Vec::new(); self.aggregates.len()],
                        representative: row.clone(),
                    });
                    group_index_by_key.insert(key, groups.len() - 1);
                    groups.len() - 1
                }
            };

            //Grouping columns are never collected. Aggregates over them reduce an empty collector
            let group = &mut groups[group_index];
            for (collector, aggregate) in group.collectors.iter_mut().zip(self.aggregates.iter()) {
                if !self.group_by_positions.contains(&aggregate.position) {
                    collector.push(row.get(aggregate.position).to_string());
                }
            }
        }

        logger().debug(CsvqlLayer::Execution(self.table_names.clone()), &format!(
            "Grouped by {:?} into {} groups", self.group_by, groups.len()
        ));

        self.aggregated_rows = groups.into_iter()
            .map(|group| {
                let mut row = group.representative;
                for (collector, aggregate) in group.collectors.iter().zip(self.aggregates.iter()) {
                    row.push(reduce(aggregate.function, collector));
                }
                row
            })
            .collect();
        self.state = AggregationStepState::Aggregated;
        Ok(())
    }

    fn group_key(&self, row: &Row) -> String {
        let mut key = String::from(GROUP_KEY_TAG);
        for position in &self.group_by_positions {
            key.push(GROUP_KEY_SEPARATOR);
            key.push_str(row.get(*position));
        }
        key
    }
}

pub fn reduce(function: AggregateFunction, values: &[String]) -> String {
    match function {
        AggregateFunction::Sum => sum(values).to_string(),
        AggregateFunction::Count => values.len().to_string(),
        AggregateFunction::Average => {
            if values.is_empty() {
                String::new()
            } else {
                sum(values).div_euclid(values.len() as i64).to_string()
            }
        },
        AggregateFunction::Max => values.iter()
            .max_by(|a, b| compare_cells(a, b))
            .cloned()
            .unwrap_or_default(),
        AggregateFunction::Min => values.iter()
            .min_by(|a, b| compare_cells(a, b))
            .cloned()
            .unwrap_or_default(),
    }
}

//Values that are not integers count as 0
fn sum(values: &[String]) -> i64 {
    values.iter()
        .map(|value| value.parse::<i64>().unwrap_or(0))
        .fold(0, i64::saturating_add)
}

impl PlanStepTrait for AggregationStep {
    fn next(&mut self) -> Result<Option<Row>, CsvqlError> {
        if let AggregationStepState::PendingAggregation = self.state {
            self.aggregate()?;
        }

        Ok(self.aggregated_rows.pop_front())
    }

    fn desc(&self) -> PlanStepDesc {
        PlanStepDesc::Aggregation(self.group_by.clone(), Box::new(self.source.desc()))
    }
}

#[cfg(test)]
mod test {
    use crate::sql::plan::plan_step::{collect_rows, MockStep, PlanStep};
    use crate::sql::plan::steps::aggregation_step::{reduce, AggregateColumn, AggregationStep};
    use crate::sql::statement::AggregateFunction;

    fn values(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn groups_in_first_seen_order() {
        //dept, salary
        let source = MockStep::create(vec![vec!["eng", "100"], vec!["ops", "50"], vec!["eng", "200"]]);
        let step = AggregationStep::create(
            "employees",
            vec![String::from("dept")],
            vec![0],
            vec![
                AggregateColumn { function: AggregateFunction::Sum, position: 1 },
                AggregateColumn { function: AggregateFunction::Count, position: 1 },
            ],
            source,
        );

        let rows = collect_rows(PlanStep::Aggregation(Box::new(step)));

        assert_eq!(rows, vec![vec!["eng", "100", "300", "2"], vec!["ops", "50", "50", "1"]]);
    }

    #[test]
    fn composite_keys_do_not_collide() {
        let source = MockStep::create(vec![vec!["a", "bc", "1"], vec!["ab", "c", "2"], vec!["a", "bc", "3"]]);
        let step = AggregationStep::create(
            "t",
            vec![String::from("x"), String::from("y")],
            vec![0, 1],
            vec![AggregateColumn { function: AggregateFunction::Count, position: 2 }],
            source,
        );

        let rows = collect_rows(PlanStep::Aggregation(Box::new(step)));

        assert_eq!(rows, vec![vec!["a", "bc", "1", "2"], vec!["ab", "c", "2", "1"]]);
    }

    #[test]
    fn aggregates_over_grouping_columns_are_empty() {
        //dept, salary
        let source = MockStep::create(vec![vec!["eng", "100"], vec!["ops", "50"], vec!["eng", "200"]]);
        let step = AggregationStep::create(
            "employees",
            vec![String::from("dept")],
            vec![0],
            vec![
                AggregateColumn { function: AggregateFunction::Count, position: 0 },
                AggregateColumn { function: AggregateFunction::Max, position: 0 },
                AggregateColumn { function: AggregateFunction::Sum, position: 0 },
                AggregateColumn { function: AggregateFunction::Count, position: 1 },
            ],
            source,
        );

        let rows = collect_rows(PlanStep::Aggregation(Box::new(step)));

        assert_eq!(rows, vec![
            vec!["eng", "100", "0", "", "0", "2"],
            vec!["ops", "50", "0", "", "0", "1"],
        ]);
    }

    #[test]
    fn sum_ignores_non_numeric() {
        assert_eq!(reduce(AggregateFunction::Sum, &values(&["10", "x", "-3", ""])), "7");
    }

    #[test]
    fn average_floors() {
        assert_eq!(reduce(AggregateFunction::Average, &values(&["1", "2"])), "1");
        assert_eq!(reduce(AggregateFunction::Average, &values(&["-1", "-2"])), "-2");
        assert_eq!(reduce(AggregateFunction::Average, &[]), "");
    }

    #[test]
    fn max_min_are_numeric_aware() {
        let salaries = values(&["9", "100", "25"]);

        assert_eq!(reduce(AggregateFunction::Max, &salaries), "100");
        assert_eq!(reduce(AggregateFunction::Min, &salaries), "9");
        assert_eq!(reduce(AggregateFunction::Max, &values(&["Bob", "alice", "Carol"])), "alice");
        assert_eq!(reduce(AggregateFunction::Min, &[]), "");
    }
}
