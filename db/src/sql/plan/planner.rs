use crate::sql::expression::{BinaryOperator, Expression, TableIdentifier};
use crate::sql::expression_evaluator::check_column_references;
use crate::sql::plan::plan_step::PlanStep;
use crate::sql::plan::steps::aggregation_step::{AggregateColumn, AggregationStep};
use crate::sql::plan::steps::filter_step::FilterStep;
use crate::sql::plan::steps::full_scan_step::FullScanStep;
use crate::sql::plan::steps::join_step::JoinStep;
use crate::sql::plan::steps::limit_step::LimitStep;
use crate::sql::plan::steps::project_selection_step::ProjectSelectionStep;
use crate::sql::plan::steps::sort_step::{SortKey, SortStep};
use crate::sql::statement::{Column, ColumnKind, FromSource, JoinSource, JoinType, Limit, SelectStatement, Selection};
use crate::table::column_namespace::ColumnNamespace;
use crate::table::table_scanner::TableScanner;
use shared::logger::{logger, CsvqlLayer};
use shared::{CsvqlError, CsvqlOptions};
use std::sync::Arc;

pub struct Planner {
    scanner: TableScanner,
}

pub struct Plan {
    pub(crate) header: Vec<String>,
    pub(crate) root: PlanStep,
}

struct OutputColumn {
    name: String,
    position: usize,
}

//Steps are chained as: scan/join -> filter -> aggregation -> sort -> limit -> projection.
//Every column name is resolved here, so no row is read when a statement references an unknown
//or ambiguous column
impl Planner {
    pub fn create(
        options: &Arc<CsvqlOptions>
    ) -> Planner {
        Planner {
            scanner: TableScanner::create(&options.base_path),
        }
    }

    pub fn plan_select(
        &self,
        select_statement: SelectStatement,
    ) -> Result<Plan, CsvqlError> {
        let table_names = select_statement.table_names().join(", ");
        let (mut last_step, namespace) = self.build_source_step(&select_statement.source)?;

        if let Some(where_expr) = select_statement.where_expr.clone() {
            check_column_references(&namespace, &where_expr)?;
            last_step = PlanStep::Filter(Box::new(FilterStep::create(where_expr, namespace.clone(), last_step)));
        }

        let output_columns = if select_statement.is_aggregation() {
            let (aggregation_step, output_columns) = self.build_aggregation_step(&select_statement, &namespace, &table_names, last_step)?;
            last_step = aggregation_step;
            output_columns
        } else {
            Self::plain_output_columns(&select_statement.selection, &namespace)?
        };

        if !select_statement.order_by.is_empty() {
            let keys = Self::sort_keys(&select_statement, &output_columns, &namespace)?;
            last_step = PlanStep::Sort(Box::new(SortStep::create(keys, last_step)));
        }
        //LIMIT 0 returns every row
        if let Limit::Some(limit) = select_statement.limit {
            if limit > 0 {
                last_step = PlanStep::Limit(Box::new(LimitStep::create(limit, last_step)));
            }
        }

        let header: Vec<String> = output_columns.iter().map(|column| column.name.clone()).collect();
        let positions: Vec<usize> = output_columns.iter().map(|column| column.position).collect();
        last_step = PlanStep::ProjectSelection(Box::new(ProjectSelectionStep::create(header.clone(), positions, last_step)));

        Ok(Plan { header, root: last_step })
    }

    fn build_source_step(&self, source: &FromSource) -> Result<(PlanStep, ColumnNamespace), CsvqlError> {
        match source {
            FromSource::Table(table_name) => {
                let scan = self.scanner.open(table_name)?;
                let namespace = scan.namespace().clone();
                Ok((PlanStep::FullScan(FullScanStep::create(table_name, scan)), namespace))
            },
            FromSource::Join(join) => {
                let (left_step, left_namespace) = self.build_source_step(&join.left)?;
                let (left_key_position, right_key) = Self::join_keys(join, &left_namespace)?;
                let right = self.scanner.scan_bucketed(&join.right_table, &right_key.field_name)?;
                let namespace = left_namespace.join(&right.namespace);

                if join.join_type != JoinType::Inner {
                    logger().warn(CsvqlLayer::Execution(join.right_table.clone()), &format!(
                        "{:?} join is evaluated as an inner join", join.join_type
                    ));
                }

                let join_step = JoinStep::create(join.join_type, &join.right_table, right, left_key_position, left_step);
                Ok((PlanStep::Join(Box::new(join_step)), namespace))
            }
        }
    }

    //ON clauses must compare one column of the joined table with one column already in the left side.
    //Returns the position of the left column and the right column
    fn join_keys<'a>(
        join: &'a JoinSource,
        left_namespace: &ColumnNamespace,
    ) -> Result<(usize, &'a TableIdentifier), CsvqlError> {
        let (operator, left, right) = match &join.condition {
            Expression::Binary(operator, left, right) => match (left.as_ref(), right.as_ref()) {
                (Expression::QualifiedIdentifier(left), Expression::QualifiedIdentifier(right)) => (operator, left, right),
                _ => return Err(CsvqlError::UnsupportedJoinCondition(String::from(
                    "ON must compare two table.field columns"
                ))),
            },
            _ => return Err(CsvqlError::UnsupportedJoinCondition(String::from(
                "ON must compare two table.field columns"
            ))),
        };

        let (left_key, right_key) = if right.table_name == join.right_table {
            (left, right)
        } else if left.table_name == join.right_table {
            (right, left)
        } else {
            return Err(CsvqlError::UnsupportedJoinCondition(format!(
                "ON must reference a column of the joined table {}", join.right_table
            )));
        };

        if *operator != BinaryOperator::Equal {
            logger().warn(CsvqlLayer::Execution(join.right_table.clone()), &format!(
                "Only equality is evaluated in ON clauses. {:?} is evaluated as =", operator
            ));
        }

        let left_key_position = left_namespace.resolve_qualified(&left_key.table_name, &left_key.field_name)?;
        Ok((left_key_position, right_key))
    }

    fn plain_output_columns(selection: &Selection, namespace: &ColumnNamespace) -> Result<Vec<OutputColumn>, CsvqlError> {
        match selection {
            Selection::All => Ok(Self::all_output_columns(namespace)),
            Selection::Some(columns) => {
                let mut output_columns = Vec::with_capacity(columns.len());
                for column in columns {
                    if let ColumnKind::Aggregate(_) = column.kind {
                        return Err(CsvqlError::AggregateWithoutGroupBy(column.output_name()));
                    }
                    output_columns.push(Self::plain_output_column(column, namespace)?);
                }
                Ok(output_columns)
            }
        }
    }

    //Aggregate results are appended after the source columns of each representative row
    fn build_aggregation_step(
        &self,
        select_statement: &SelectStatement,
        namespace: &ColumnNamespace,
        table_names: &str,
        source: PlanStep,
    ) -> Result<(PlanStep, Vec<OutputColumn>), CsvqlError> {
        let mut group_by_positions = Vec::with_capacity(select_statement.group_by.len());
        for field_name in &select_statement.group_by {
            group_by_positions.push(namespace.resolve(field_name)?);
        }

        let mut aggregates = Vec::new();
        let output_columns = match &select_statement.selection {
            Selection::All => Self::all_output_columns(namespace),
            Selection::Some(columns) => {
                let mut output_columns = Vec::with_capacity(columns.len());
                for column in columns {
                    match column.kind {
                        ColumnKind::Plain => output_columns.push(Self::plain_output_column(column, namespace)?),
                        ColumnKind::Aggregate(function) => {
                            aggregates.push(AggregateColumn { function, position: namespace.resolve(&column.field_name)? });
                            output_columns.push(OutputColumn {
                                name: column.output_name(),
                                position: namespace.width() + aggregates.len() - 1,
                            });
                        }
                    }
                }
                output_columns
            }
        };

        let aggregation_step = AggregationStep::create(
            table_names,
            select_statement.group_by.clone(),
            group_by_positions,
            aggregates,
            source,
        );

        Ok((PlanStep::Aggregation(Box::new(aggregation_step)), output_columns))
    }

    fn plain_output_column(column: &Column, namespace: &ColumnNamespace) -> Result<OutputColumn, CsvqlError> {
        Ok(OutputColumn {
            position: namespace.resolve(&column.field_name)?,
            name: column.output_name(),
        })
    }

    fn all_output_columns(namespace: &ColumnNamespace) -> Vec<OutputColumn> {
        namespace.header().iter()
            .enumerate()
            .map(|(position, name)| OutputColumn { name: name.clone(), position })
            .collect()
    }

    //ORDER BY names are looked up in the output header first, so aliases and aggregate
    //columns can be used, then in the source columns
    fn sort_keys(
        select_statement: &SelectStatement,
        output_columns: &[OutputColumn],
        namespace: &ColumnNamespace,
    ) -> Result<Vec<SortKey>, CsvqlError> {
        let mut keys = Vec::with_capacity(select_statement.order_by.len());
        for order_by in &select_statement.order_by {
            let position = match output_columns.iter().find(|column| column.name == order_by.field_name) {
                Some(output_column) => output_column.position,
                None => namespace.resolve(&order_by.field_name)?,
            };
            keys.push(SortKey { position, direction: order_by.direction });
        }
        Ok(keys)
    }
}
