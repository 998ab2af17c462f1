use crate::sql::parser::expression_parser::{parse_expression, ExpressionGrammar};
use crate::sql::parser::token_cursor::TokenCursor;
use crate::sql::statement::{AggregateFunction, Column, FromSource, JoinSource, JoinType, Limit, OrderBy, SelectStatement, Selection, SortDirection};
use crate::sql::token::{LocatedToken, Token};
use crate::sql::tokenizer::Tokenizer;
use shared::logger::{logger, CsvqlLayer};
use shared::CsvqlError;

//Grammar:
//SELECT <columns> FROM <table> [JOIN <table> ON <condition>]* [WHERE <expr>] [GROUP BY <fields>] [ORDER BY <field> [ASC|DESC], ...] [LIMIT <n>]
//Optional clauses are only accepted in that order
pub struct Parser {
    tokens: Vec<LocatedToken>,
}

impl Parser {
    pub fn create(query: &str) -> Result<Parser, CsvqlError> {
        Ok(Parser {
            tokens: Tokenizer::create(query).tokenize()?,
        })
    }

    pub fn parse(&self) -> Result<SelectStatement, CsvqlError> {
        let mut cursor = TokenCursor::create(&self.tokens);
        let statement = self.select(&mut cursor)?;

        logger().debug(CsvqlLayer::Parser, &statement.describe());

        Ok(statement)
    }

    fn select(&self, cursor: &mut TokenCursor) -> Result<SelectStatement, CsvqlError> {
        cursor.expect(&Token::Select, "No SELECT statement found")?;
        let selection = self.selection(cursor)?;
        cursor.expect(&Token::From, "No FROM statement found")?;
        let source = self.from_source(cursor)?;

        let mut where_expr = None;
        let mut group_by = Vec::new();
        let mut order_by = Vec::new();
        let mut limit = Limit::None;

        if cursor.maybe_expect(&Token::Where) {
            where_expr = Some(parse_expression(cursor, ExpressionGrammar::Value, 0)?);
        }
        if cursor.maybe_expect(&Token::GroupBy) {
            group_by = self.group_by(cursor)?;
        }
        if cursor.maybe_expect(&Token::OrderBy) {
            order_by = self.order_by(cursor)?;
        }
        if cursor.maybe_expect(&Token::Limit) {
            limit = self.limit(cursor)?;
        }

        self.expect_end(cursor)?;

        Ok(SelectStatement {
            selection,
            source,
            where_expr,
            group_by,
            order_by,
            limit,
        })
    }

    fn expect_end(&self, cursor: &mut TokenCursor) -> Result<(), CsvqlError> {
        match cursor.peek() {
            Token::EOF => Ok(()),
            Token::Where | Token::GroupBy | Token::OrderBy | Token::Limit => Err(cursor.error(
                "Clause out of order. Clauses must follow the order WHERE, GROUP BY, ORDER BY, LIMIT"
            )),
            _ => Err(cursor.error("Unexpected token"))
        }
    }

    fn selection(&self, cursor: &mut TokenCursor) -> Result<Selection, CsvqlError> {
        if cursor.maybe_expect(&Token::Star) {
            return Ok(Selection::All);
        }

        let mut columns = Vec::new();
        loop {
            columns.push(self.column(cursor)?);

            if !cursor.maybe_expect(&Token::Comma) {
                break;
            }
        }

        Ok(Selection::Some(columns))
    }

    fn column(&self, cursor: &mut TokenCursor) -> Result<Column, CsvqlError> {
        let column = match cursor.peek() {
            Token::Identifier(field_name) => {
                cursor.advance();
                Column::plain(field_name)
            },
            token if token.is_aggregate_function() => self.aggregate_column(cursor)?,
            _ => return Err(cursor.error("Expected column name")),
        };

        if cursor.maybe_expect(&Token::As) {
            let alias = cursor.identifier("Expected alias after AS")?;
            return Ok(column.with_alias(&alias));
        }

        Ok(column)
    }

    //SUM ( field )
    fn aggregate_column(&self, cursor: &mut TokenCursor) -> Result<Column, CsvqlError> {
        let function_token = &cursor.advance().token;
        let function = AggregateFunction::from_token(function_token)
            .ok_or_else(|| cursor.error("Expected aggregate function"))?;

        cursor.expect(&Token::OpenParen, &format!("Malformed {} call. Expected (", function.name()))?;
        let field_name = cursor.identifier(&format!("Malformed {} call. Expected column name", function.name()))?;
        cursor.expect(&Token::CloseParen, &format!("Malformed {} call. Expected )", function.name()))?;

        Ok(Column::aggregate(function, &field_name))
    }

    //Builds a left deep tree: every new JOIN takes the tree built so far as its left side
    fn from_source(&self, cursor: &mut TokenCursor) -> Result<FromSource, CsvqlError> {
        let table_name = cursor.identifier("Expected table name after FROM")?;
        let mut source = FromSource::Table(table_name);

        while let Some(join_type) = JoinType::from_token(cursor.peek()) {
            cursor.advance();
            let right_table = cursor.identifier("Expected table name after JOIN")?;
            cursor.expect(&Token::On, "Expected ON after joined table")?;
            let condition = parse_expression(cursor, ExpressionGrammar::JoinCondition, 0)?;

            source = FromSource::Join(Box::new(JoinSource {
                join_type,
                left: source,
                right_table,
                condition,
            }));
        }

        Ok(source)
    }

    fn group_by(&self, cursor: &mut TokenCursor) -> Result<Vec<String>, CsvqlError> {
        let mut fields = Vec::new();
        loop {
            fields.push(cursor.identifier("Expected column name in GROUP BY")?);

            if !cursor.maybe_expect(&Token::Comma) {
                break;
            }
        }

        Ok(fields)
    }

    fn order_by(&self, cursor: &mut TokenCursor) -> Result<Vec<OrderBy>, CsvqlError> {
        let mut order_by = Vec::new();
        loop {
            let field_name = cursor.identifier("Expected column name in ORDER BY")?;
            let direction = if cursor.maybe_expect(&Token::Desc) {
                SortDirection::Desc
            } else {
                cursor.maybe_expect(&Token::Asc);
                SortDirection::Asc
            };

            order_by.push(OrderBy { field_name, direction });

            if !cursor.maybe_expect(&Token::Comma) {
                break;
            }
        }

        Ok(order_by)
    }

    fn limit(&self, cursor: &mut TokenCursor) -> Result<Limit, CsvqlError> {
        match cursor.peek() {
            Token::Number(number) => {
                cursor.advance();
                Ok(Limit::Some(*number as usize))
            },
            _ => Err(cursor.error("Expected number after LIMIT"))
        }
    }
}

#[cfg(test)]
mod test {
    use crate::sql::expression::{BinaryOperator, Expression};
    use crate::sql::parser::parser::Parser;
    use crate::sql::statement::{AggregateFunction, Column, FromSource, JoinType, Limit, OrderBy, SelectStatement, Selection, SortDirection};
    use shared::CsvqlError;

    fn parse(query: &str) -> Result<SelectStatement, CsvqlError> {
        Parser::create(query)?.parse()
    }

    #[test]
    fn select_with_where_order_by() {
        let statement = parse("SELECT name,salary FROM employees WHERE salary>50000 ORDER BY salary DESC").unwrap();

        assert_eq!(statement.selection, Selection::Some(vec![Column::plain("name"), Column::plain("salary")]));
        assert_eq!(statement.source, FromSource::Table(String::from("employees")));
        assert_eq!(statement.where_expr, Some(Expression::binary(
            BinaryOperator::Greater,
            Expression::identifier("salary"),
            Expression::number(50000),
        )));
        assert!(statement.group_by.is_empty());
        assert_eq!(statement.order_by, vec![OrderBy { field_name: String::from("salary"), direction: SortDirection::Desc }]);
        assert_eq!(statement.limit, Limit::None);
    }

    #[test]
    fn select_all_with_limit() {
        let statement = parse("SELECT * FROM employees LIMIT 1").unwrap();

        assert_eq!(statement.selection, Selection::All);
        assert_eq!(statement.where_expr, None);
        assert_eq!(statement.limit, Limit::Some(1));
    }

    #[test]
    fn where_followed_by_every_clause() {
        let statement = parse("SELECT COUNT(id), dept FROM employees WHERE age > 20 GROUP BY dept ORDER BY dept LIMIT 5").unwrap();

        assert!(statement.where_expr.is_some());
        assert_eq!(statement.group_by, vec![String::from("dept")]);
        assert_eq!(statement.order_by.len(), 1);
        assert_eq!(statement.limit, Limit::Some(5));
    }

    #[test]
    fn aggregates_with_aliases() {
        let statement = parse("SELECT AVG(salary) AS avg_salary, COUNT(id), MAX(age), MIN(age), SUM(salary), dept FROM employees GROUP BY dept").unwrap();

        assert_eq!(statement.selection, Selection::Some(vec![
            Column::aggregate(AggregateFunction::Average, "salary").with_alias("avg_salary"),
            Column::aggregate(AggregateFunction::Count, "id"),
            Column::aggregate(AggregateFunction::Max, "age"),
            Column::aggregate(AggregateFunction::Min, "age"),
            Column::aggregate(AggregateFunction::Sum, "salary"),
            Column::plain("dept"),
        ]));
        assert!(statement.is_aggregation());
    }

    #[test]
    fn plain_column_alias() {
        let statement = parse("SELECT name AS employee FROM employees").unwrap();

        assert_eq!(statement.selection, Selection::Some(vec![Column::plain("name").with_alias("employee")]));
    }

    #[test]
    fn order_by_multiple_keys() {
        let statement = parse("SELECT * FROM employees ORDER BY name DESC, age ASC, id").unwrap();

        assert_eq!(statement.order_by, vec![
            OrderBy { field_name: String::from("name"), direction: SortDirection::Desc },
            OrderBy { field_name: String::from("age"), direction: SortDirection::Asc },
            OrderBy { field_name: String::from("id"), direction: SortDirection::Asc },
        ]);
    }

    #[test]
    fn left_deep_join() {
        let statement = parse("SELECT email, dept_name, job_title FROM employees \
            JOIN department ON employees.dept_id = department.dept_id \
            LEFT JOIN jobs ON employees.job_id = jobs.job_id").unwrap();

        let outer = match statement.source {
            FromSource::Join(join) => join,
            _ => panic!(),
        };
        assert_eq!(outer.join_type, JoinType::Left);
        assert_eq!(outer.right_table, "jobs");
        assert_eq!(outer.condition, Expression::binary(
            BinaryOperator::Equal,
            Expression::qualified("employees", "job_id"),
            Expression::qualified("jobs", "job_id"),
        ));

        let inner = match outer.left {
            FromSource::Join(join) => join,
            _ => panic!(),
        };
        assert_eq!(inner.join_type, JoinType::Inner);
        assert_eq!(inner.left, FromSource::Table(String::from("employees")));
        assert_eq!(inner.right_table, "department");
    }

    #[test]
    fn join_followed_by_where() {
        let statement = parse("SELECT name FROM employees RIGHT JOIN department ON employees.dept_id = department.dept_id WHERE salary > 10").unwrap();

        assert!(matches!(statement.source, FromSource::Join(ref join) if join.join_type == JoinType::Right));
        assert!(statement.where_expr.is_some());
    }

    #[test]
    fn missing_select() {
        let result = parse("name FROM employees");

        assert!(matches!(result, Err(CsvqlError::SyntaxError(0, _))));
    }

    #[test]
    fn missing_from() {
        assert!(matches!(parse("SELECT name employees"), Err(CsvqlError::SyntaxError(12, _))));
        assert!(matches!(parse("SELECT name"), Err(CsvqlError::SyntaxError(_, _))));
    }

    #[test]
    fn malformed_aggregate_call() {
        assert!(matches!(parse("SELECT SUM salary FROM employees"), Err(CsvqlError::SyntaxError(11, _))));
        assert!(matches!(parse("SELECT SUM(salary FROM employees"), Err(CsvqlError::SyntaxError(18, _))));
    }

    #[test]
    fn qualified_column_outside_on_is_rejected() {
        let result = parse("SELECT employees.name FROM employees");

        assert!(matches!(result, Err(CsvqlError::SyntaxError(16, _))));
    }

    #[test]
    fn join_without_on() {
        let result = parse("SELECT * FROM employees JOIN department WHERE id = 1");

        assert!(matches!(result, Err(CsvqlError::SyntaxError(40, _))));
    }

    #[test]
    fn clauses_out_of_order() {
        let result = parse("SELECT * FROM employees LIMIT 2 ORDER BY id");

        match result {
            Err(CsvqlError::SyntaxError(position, message)) => {
                assert_eq!(position, 32);
                assert!(message.contains("out of order"));
            },
            _ => panic!(),
        }
    }

    #[test]
    fn limit_requires_number() {
        assert!(matches!(parse("SELECT * FROM employees LIMIT all"), Err(CsvqlError::SyntaxError(30, _))));
    }
}
