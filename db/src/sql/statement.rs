use crate::sql::expression::Expression;
use crate::sql::token::Token;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub(crate) selection: Selection,
    pub(crate) source: FromSource,
    pub(crate) where_expr: Option<Expression>,
    pub(crate) group_by: Vec<String>,
    pub(crate) order_by: Vec<OrderBy>,
    pub(crate) limit: Limit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    All,
    Some(Vec<Column>)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub(crate) kind: ColumnKind,
    pub(crate) field_name: String,
    pub(crate) alias: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnKind {
    Plain,
    Aggregate(AggregateFunction),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AggregateFunction {
    Sum,
    Count,
    Average,
    Max,
    Min,
}

//Left deep: the right side of a join is always a single table
#[derive(Debug, Clone, PartialEq)]
pub enum FromSource {
    Table(String),
    Join(Box<JoinSource>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinSource {
    pub(crate) join_type: JoinType,
    pub(crate) left: FromSource,
    pub(crate) right_table: String,
    pub(crate) condition: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub(crate) field_name: String,
    pub(crate) direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Limit {
    None,
    Some(usize)
}

impl SelectStatement {
    pub fn is_aggregation(&self) -> bool {
        !self.group_by.is_empty()
    }

    pub fn table_names(&self) -> Vec<String> {
        self.source.table_names()
    }

    pub fn describe(&self) -> String {
        let n_columns = match &self.selection {
            Selection::All => String::from("*"),
            Selection::Some(columns) => columns.len().to_string(),
        };
        format!("SELECT {} columns FROM {}. Where: {}. Group by: {:?}. Order by: {} keys. Limit: {:?}",
            n_columns, self.table_names().join(", "), self.where_expr.is_some(),
            self.group_by, self.order_by.len(), self.limit)
    }
}

impl Column {
    pub fn plain(field_name: &str) -> Column {
        Column { kind: ColumnKind::Plain, field_name: field_name.to_string(), alias: None }
    }

    pub fn aggregate(function: AggregateFunction, field_name: &str) -> Column {
        Column { kind: ColumnKind::Aggregate(function), field_name: field_name.to_string(), alias: None }
    }

    pub fn with_alias(mut self, alias: &str) -> Column {
        self.alias = Some(alias.to_string());
        self
    }

    //SUM(salary) is named SUM_salary unless an alias is given
    pub fn output_name(&self) -> String {
        if let Some(alias) = &self.alias {
            return alias.clone();
        }

        match self.kind {
            ColumnKind::Plain => self.field_name.clone(),
            ColumnKind::Aggregate(function) => format!("{}_{}", function.name(), self.field_name),
        }
    }
}

impl AggregateFunction {
    pub fn from_token(token: &Token) -> Option<AggregateFunction> {
        match token {
            Token::Sum => Some(AggregateFunction::Sum),
            Token::Count => Some(AggregateFunction::Count),
            Token::Average => Some(AggregateFunction::Average),
            Token::Max => Some(AggregateFunction::Max),
            Token::Min => Some(AggregateFunction::Min),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Average => "AVG",
            AggregateFunction::Max => "MAX",
            AggregateFunction::Min => "MIN",
        }
    }
}

impl FromSource {
    pub fn table_names(&self) -> Vec<String> {
        match self {
            FromSource::Table(table_name) => vec![table_name.clone()],
            FromSource::Join(join) => {
                let mut table_names = join.left.table_names();
                table_names.push(join.right_table.clone());
                table_names
            }
        }
    }
}

impl JoinType {
    pub fn from_token(token: &Token) -> Option<JoinType> {
        match token {
            Token::Join => Some(JoinType::Inner),
            Token::LeftJoin => Some(JoinType::Left),
            Token::RightJoin => Some(JoinType::Right),
            _ => None,
        }
    }
}
